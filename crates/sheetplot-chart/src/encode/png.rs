use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::ChartResult;
use crate::format::Format;
use crate::raster::{rasterize, RasterOptions};

/// Rasterizes the chart's own SVG, so both share one layout
pub(crate) struct PngEncoder;

impl Encoder for PngEncoder {
    fn format(&self) -> Format {
        Format::Png
    }

    fn encode(&self, chart: &Chart, raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let (_, svg) = chart.vector_content(Format::Png)?;
        rasterize(svg, raster)
    }
}

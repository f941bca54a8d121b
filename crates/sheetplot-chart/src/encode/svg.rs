use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::ChartResult;
use crate::format::Format;
use crate::raster::RasterOptions;

pub(crate) struct SvgEncoder;

impl Encoder for SvgEncoder {
    fn format(&self) -> Format {
        Format::Svg
    }

    fn encode(&self, chart: &Chart, _raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let (_, svg) = chart.vector_content(Format::Svg)?;
        Ok(svg.as_bytes().to_vec())
    }
}

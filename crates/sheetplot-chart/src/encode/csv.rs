use sheetplot_csv::CsvDocumentWriter;

use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::{ChartError, ChartResult};
use crate::format::Format;
use crate::raster::RasterOptions;

/// Heading record then one record per series, through the shared writer
pub(crate) struct CsvEncoder;

impl Encoder for CsvEncoder {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn encode(&self, chart: &Chart, _raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        CsvDocumentWriter::shared()
            .write_document(chart.data().records(&chart.heading()))
            .map_err(|e| ChartError::encoding("csv", e))
    }
}

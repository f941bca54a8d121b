//! Built charts and their output

use crate::data::DataBlock;
use crate::encode;
use crate::error::{ChartError, ChartResult};
use crate::format::{Format, Representation};
use crate::raster::RasterOptions;
use crate::scene::Scene;
use crate::svg;
use crate::types::{ChartType, Region};

#[derive(Debug, Clone, PartialEq)]
enum Content {
    /// Flattened scene plus the SVG rendered from it once
    Vector { scene: Scene, svg: String },
    Table,
}

/// One chart for one region
///
/// Every output format is encoded from the content captured at build
/// time; a chart never lays itself out again.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    chart_type: ChartType,
    region: Region,
    title: String,
    data: DataBlock,
    content: Content,
}

impl Chart {
    pub(crate) fn vector(
        chart_type: ChartType,
        region: Region,
        title: String,
        data: DataBlock,
        mut scene: Scene,
        tooltips: bool,
    ) -> ChartResult<Self> {
        scene.flatten_strokes();
        let svg = svg::render(&scene, tooltips)?;
        Ok(Self {
            chart_type,
            region,
            title,
            data,
            content: Content::Vector { scene, svg },
        })
    }

    pub(crate) fn table(region: Region, title: String, data: DataBlock) -> Self {
        Self {
            chart_type: ChartType::Table,
            region,
            title,
            data,
            content: Content::Table,
        }
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data(&self) -> &DataBlock {
        &self.data
    }

    /// `"<region label> <title>"`, the first CSV field and document heading
    pub fn heading(&self) -> String {
        format!("{} {}", self.region.label(), self.title)
    }

    pub fn scene(&self) -> Option<&Scene> {
        match &self.content {
            Content::Vector { scene, .. } => Some(scene),
            Content::Table => None,
        }
    }

    pub fn svg(&self) -> Option<&str> {
        match &self.content {
            Content::Vector { svg, .. } => Some(svg),
            Content::Table => None,
        }
    }

    /// Declared output size of a vector chart
    pub fn size(&self) -> Option<(u32, u32)> {
        self.scene().map(|s| (s.width, s.height))
    }

    pub fn supports(&self, format: Format) -> bool {
        match self.content {
            Content::Vector { .. } => true,
            Content::Table => matches!(format, Format::Csv | Format::Html | Format::Docx),
        }
    }

    /// Encode with default raster options
    pub fn output_as(&self, format: Format) -> ChartResult<Representation> {
        self.output_as_with(format, &RasterOptions::default())
    }

    pub fn output_as_with(
        &self,
        format: Format,
        raster: &RasterOptions,
    ) -> ChartResult<Representation> {
        if !self.supports(format) {
            return Err(self.unsupported(format));
        }
        let content = encode::encoder_for(format).encode(self, raster)?;
        Ok(Representation::new(content, format))
    }

    pub(crate) fn unsupported(&self, format: Format) -> ChartError {
        ChartError::UnsupportedFormat {
            chart_type: self.chart_type,
            format,
        }
    }

    /// Scene and SVG, or the unsupported-format error for tabular charts
    pub(crate) fn vector_content(&self, format: Format) -> ChartResult<(&Scene, &str)> {
        match &self.content {
            Content::Vector { scene, svg } => Ok((scene, svg)),
            Content::Table => Err(self.unsupported(format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use pretty_assertions::assert_eq;

    fn block() -> DataBlock {
        DataBlock {
            sheet: "Fitzroy".into(),
            categories: vec!["2019".into()],
            series: vec![Series {
                name: "Coral".into(),
                values: vec![Some(1.0)],
                labels: vec!["1".into()],
            }],
        }
    }

    #[test]
    fn test_table_rejects_vector_formats() {
        let chart = Chart::table(Region::Fitzroy, "Table".into(), block());
        for format in [Format::Svg, Format::Png, Format::Emf, Format::Eps] {
            match chart.output_as(format) {
                Err(ChartError::UnsupportedFormat {
                    chart_type,
                    format: f,
                }) => assert_eq!((chart_type, f), (ChartType::Table, format)),
                other => panic!("expected UnsupportedFormat for {format}, got {other:?}"),
            }
        }
        assert!(chart.supports(Format::Csv));
        assert_eq!(chart.size(), None);
        assert_eq!(chart.heading(), "Fitzroy Table");
    }

    #[test]
    fn test_unsupported_format_message() {
        let chart = Chart::table(Region::Gbr, "Table".into(), block());
        let err = chart.output_as(Format::Svg).unwrap_err();
        assert_eq!(err.to_string(), "SVG output is not supported for Table");
    }
}

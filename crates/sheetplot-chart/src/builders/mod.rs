//! Chart builders and the registry
//!
//! Each [`ChartType`] maps to one stateless builder. Lookup is a plain
//! match, so an unmapped type cannot compile.

mod bar;
mod common;
mod line;
mod pie;
mod stacked;
mod table;

pub use bar::BarBuilder;
pub use line::LineBuilder;
pub use pie::PieBuilder;
pub use stacked::StackedBarBuilder;
pub use table::TableBuilder;

use sheetplot_source::DataSource;

use crate::chart::Chart;
use crate::data::{read_block, BlockLimits, DataBlock};
use crate::dimension::Dimensions;
use crate::error::{ChartError, ChartResult};
use crate::params::{ChartParams, Settings};
use crate::types::{ChartType, Region};

/// Produces charts of one type
pub trait ChartBuilder: Send + Sync {
    fn chart_type(&self) -> ChartType;

    /// Draw one region's block
    fn chart(
        &self,
        region: Region,
        data: DataBlock,
        settings: &Settings,
        dimensions: Dimensions,
    ) -> ChartResult<Chart>;

    /// Build one chart per region, in the order of `regions`
    ///
    /// Each region's block is read from the first source that has the
    /// region's sheet (the `sheet` parameter overrides the region label).
    fn build(
        &self,
        sources: &[&dyn DataSource],
        regions: &[Region],
        dimensions: Dimensions,
        params: &ChartParams,
    ) -> ChartResult<Vec<Chart>> {
        if regions.is_empty() {
            return Err(ChartError::config("no regions requested"));
        }
        if sources.is_empty() {
            return Err(ChartError::config("no data sources given"));
        }

        let settings = Settings::resolve(self.chart_type(), params)?;
        let limits = BlockLimits {
            columns: settings.columns,
            rows: settings.rows,
        };

        regions
            .iter()
            .map(|&region| {
                let sheet = settings.sheet.as_deref().unwrap_or(region.label());
                let data = read_block(sources, sheet, settings.start, limits)?;
                self.chart(region, data, &settings, dimensions)
            })
            .collect()
    }
}

static BAR: BarBuilder = BarBuilder;
static STACKED_BAR: StackedBarBuilder = StackedBarBuilder;
static LINE: LineBuilder = LineBuilder;
static PIE: PieBuilder = PieBuilder;
static TABLE: TableBuilder = TableBuilder;

/// The builder registered for a chart type
pub fn builder_for(chart_type: ChartType) -> &'static dyn ChartBuilder {
    match chart_type {
        ChartType::Bar => &BAR,
        ChartType::StackedBar => &STACKED_BAR,
        ChartType::Line => &LINE,
        ChartType::Pie => &PIE,
        ChartType::Table => &TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::workbook;
    use pretty_assertions::assert_eq;
    use sheetplot_core::CellValue;
    use sheetplot_source::WorkbookSource;

    #[test]
    fn test_registry_is_total() {
        for chart_type in ChartType::ALL {
            assert_eq!(builder_for(chart_type).chart_type(), chart_type);
        }
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let wb = workbook(&[("Fitzroy", &[&[CellValue::Empty]])]);
        let source = WorkbookSource::new(&wb);
        let builder = builder_for(ChartType::Bar);
        let params = ChartParams::new();

        assert!(matches!(
            builder.build(&[&source], &[], Dimensions::auto(), &params),
            Err(ChartError::UnsupportedConfiguration(_))
        ));
        assert!(matches!(
            builder.build(&[], &[Region::Fitzroy], Dimensions::auto(), &params),
            Err(ChartError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn test_one_chart_per_region_in_order() {
        let rows: &[&[CellValue]] = &[
            &[CellValue::Empty, CellValue::Number(2019.0)],
            &[CellValue::string("Coral"), CellValue::Number(4.0)],
        ];
        let wb = workbook(&[("Fitzroy", rows), ("Burdekin", rows), ("Cape York", rows)]);
        let source = WorkbookSource::new(&wb);
        let regions = [Region::CapeYork, Region::Fitzroy, Region::Burdekin];
        for chart_type in ChartType::ALL {
            let charts = builder_for(chart_type)
                .build(&[&source], &regions, Dimensions::auto(), &ChartParams::new())
                .unwrap();
            let got: Vec<Region> = charts.iter().map(Chart::region).collect();
            assert_eq!(got, regions.to_vec());
        }
    }

    #[test]
    fn test_sheet_parameter_overrides_region() {
        let wb = workbook(&[(
            "Shared",
            &[
                &[CellValue::Empty, CellValue::string("Q1")],
                &[CellValue::string("Seagrass"), CellValue::Number(1.5)],
            ],
        )]);
        let source = WorkbookSource::new(&wb);
        let charts = builder_for(ChartType::Table)
            .build(
                &[&source],
                &[Region::Gbr, Region::Burdekin],
                Dimensions::auto(),
                &ChartParams::new().with("sheet", "Shared"),
            )
            .unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[1].data().sheet, "Shared");
        assert_eq!(charts[1].heading(), "Burdekin Table");
    }
}

//! Tabular charts

use crate::builders::ChartBuilder;
use crate::chart::Chart;
use crate::data::DataBlock;
use crate::dimension::Dimensions;
use crate::error::ChartResult;
use crate::params::Settings;
use crate::types::{ChartType, Region};

/// The data block as a table; there is no drawing, so dimensions are unused
#[derive(Debug, Clone, Copy, Default)]
pub struct TableBuilder;

impl ChartBuilder for TableBuilder {
    fn chart_type(&self) -> ChartType {
        ChartType::Table
    }

    fn chart(
        &self,
        region: Region,
        data: DataBlock,
        settings: &Settings,
        dimensions: Dimensions,
    ) -> ChartResult<Chart> {
        if dimensions != Dimensions::auto() {
            log::debug!("table for {} ignores requested dimensions", region.key());
        }
        Ok(Chart::table(region, settings.title.clone(), data))
    }
}

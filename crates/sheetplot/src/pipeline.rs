//! One-call build and encode

use sheetplot_chart::{
    builder_for, ChartError, ChartParams, ChartType, Dimensions, Format, RasterOptions, Region,
    Representation,
};
use sheetplot_source::DataSource;

/// Everything needed to build and encode one set of charts
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    /// One output per region, in this order
    pub regions: Vec<Region>,
    pub dimensions: Dimensions,
    pub params: ChartParams,
    pub format: Format,
    pub raster: RasterOptions,
}

impl ChartRequest {
    /// A request with no regions, natural dimensions and no parameters
    pub fn new(chart_type: ChartType, format: Format) -> Self {
        Self {
            chart_type,
            regions: Vec::new(),
            dimensions: Dimensions::auto(),
            params: ChartParams::new(),
            format,
            raster: RasterOptions::default(),
        }
    }

    pub fn region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn regions<I: IntoIterator<Item = Region>>(mut self, regions: I) -> Self {
        self.regions.extend(regions);
        self
    }

    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn raster(mut self, raster: RasterOptions) -> Self {
        self.raster = raster;
        self
    }
}

/// Build one chart per requested region and encode each in the requested format
///
/// The first failure aborts the call; representations are returned in
/// region order.
pub fn render_charts(
    sources: &[&dyn DataSource],
    request: &ChartRequest,
) -> Result<Vec<Representation>, ChartError> {
    let charts = builder_for(request.chart_type).build(
        sources,
        &request.regions,
        request.dimensions,
        &request.params,
    )?;

    let outputs = charts
        .iter()
        .map(|chart| chart.output_as_with(request.format, &request.raster))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "rendered {} {} chart(s) as {}",
        outputs.len(),
        request.chart_type.key(),
        request.format
    );
    Ok(outputs)
}

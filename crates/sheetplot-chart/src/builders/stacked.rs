//! Stacked vertical bars

use crate::builders::common::{
    axis_chart_height, axis_chart_width, category_labels, legend, series_color, title, tooltip,
    PlotArea, ValueAxis,
};
use crate::builders::ChartBuilder;
use crate::chart::Chart;
use crate::data::DataBlock;
use crate::dimension::{negotiate, Dimensions, Size};
use crate::error::ChartResult;
use crate::params::Settings;
use crate::scene::{Element, Scene, Shape};
use crate::types::{ChartType, Region};

const BAR_WIDTH: u32 = 30;
const GAP: u32 = 12;

/// One bar per category with series stacked on each other
///
/// Positive values stack upwards from zero and negative values downwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackedBarBuilder;

impl StackedBarBuilder {
    fn natural_size(data: &DataBlock) -> Size {
        Size::new(
            axis_chart_width(data.categories.len(), BAR_WIDTH + GAP),
            axis_chart_height(data.series.len() > 1),
        )
    }

    /// Lowest negative and highest positive stack totals
    fn extent(data: &DataBlock) -> (Option<f64>, Option<f64>) {
        let mut low: Option<f64> = None;
        let mut high: Option<f64> = None;
        for c in 0..data.categories.len() {
            let (mut neg, mut pos) = (0.0, 0.0);
            for series in &data.series {
                match series.values.get(c).copied().flatten() {
                    Some(v) if v < 0.0 => neg += v,
                    Some(v) => pos += v,
                    None => {}
                }
            }
            low = Some(low.map_or(neg, |l: f64| l.min(neg)));
            high = Some(high.map_or(pos, |h: f64| h.max(pos)));
        }
        (low, high)
    }
}

impl ChartBuilder for StackedBarBuilder {
    fn chart_type(&self) -> ChartType {
        ChartType::StackedBar
    }

    fn chart(
        &self,
        region: Region,
        data: DataBlock,
        settings: &Settings,
        dimensions: Dimensions,
    ) -> ChartResult<Chart> {
        let layout = negotiate(dimensions, Self::natural_size(&data));
        let with_legend = data.series.len() > 1;
        let area = PlotArea::new(layout.view_width, layout.view_height, with_legend);
        let (low, high) = Self::extent(&data);
        let axis = ValueAxis::new(low, high, settings.max);

        let mut elements = vec![title(layout.view_width, region, &settings.title)];
        axis.draw(&area, settings.y_label.as_deref(), &mut elements);

        let slot = area.width() / data.categories.len() as f64;
        let bar_width = slot * BAR_WIDTH as f64 / (BAR_WIDTH + GAP) as f64;

        let mut centers = Vec::with_capacity(data.categories.len());
        for (c, category) in data.categories.iter().enumerate() {
            let center = area.left + (c as f64 + 0.5) * slot;
            centers.push(center);

            let (mut below, mut above) = (0.0, 0.0);
            for (s, series) in data.series.iter().enumerate() {
                let Some(value) = series.values.get(c).copied().flatten() else {
                    continue;
                };
                let (from, to) = if value < 0.0 {
                    let from = below;
                    below += value;
                    (from, below)
                } else {
                    let from = above;
                    above += value;
                    (from, above)
                };
                let (y0, y1) = (axis.y(&area, from), axis.y(&area, to));
                elements.push(
                    Element::new(Shape::Rect {
                        x: center - bar_width / 2.0,
                        y: y0.min(y1),
                        width: bar_width,
                        height: (y0 - y1).abs(),
                    })
                    .fill(series_color(s))
                    .tooltip(tooltip(&series.name, category, &series.labels[c])),
                );
            }
        }

        category_labels(&area, &centers, &data.categories, &mut elements);
        if with_legend {
            let names: Vec<&str> = data.series.iter().map(|s| s.name.as_str()).collect();
            legend(layout.view_height, &names, &mut elements);
        }

        let scene = Scene {
            width: layout.width,
            height: layout.height,
            view_width: layout.view_width,
            view_height: layout.view_height,
            elements,
        };
        Chart::vector(
            ChartType::StackedBar,
            region,
            settings.title.clone(),
            data,
            scene,
            settings.tooltips,
        )
    }
}

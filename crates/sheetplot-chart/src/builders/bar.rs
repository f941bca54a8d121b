//! Grouped vertical bars

use crate::builders::common::{
    axis_chart_height, axis_chart_width, category_labels, count, legend, series_color, title,
    tooltip, PlotArea, ValueAxis,
};
use crate::builders::ChartBuilder;
use crate::chart::Chart;
use crate::data::DataBlock;
use crate::dimension::{negotiate, Dimensions, Size};
use crate::error::ChartResult;
use crate::params::Settings;
use crate::scene::{Element, Scene, Shape};
use crate::types::{ChartType, Region};

const BAR_WIDTH: u32 = 18;
const GROUP_GAP: u32 = 12;

/// One group of bars per category, one bar per series
#[derive(Debug, Clone, Copy, Default)]
pub struct BarBuilder;

impl BarBuilder {
    fn natural_size(data: &DataBlock) -> Size {
        let group = count(data.series.len())
            .saturating_mul(BAR_WIDTH)
            .saturating_add(GROUP_GAP);
        Size::new(
            axis_chart_width(data.categories.len(), group),
            axis_chart_height(data.series.len() > 1),
        )
    }
}

impl ChartBuilder for BarBuilder {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
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
        let axis = ValueAxis::new(data.min_value(), data.max_value(), settings.max);

        let mut elements = vec![title(layout.view_width, region, &settings.title)];
        axis.draw(&area, settings.y_label.as_deref(), &mut elements);

        let series_count = data.series.len() as f64;
        let group_width = area.width() / data.categories.len() as f64;
        let pad = group_width * GROUP_GAP as f64 / (series_count * BAR_WIDTH as f64 + GROUP_GAP as f64);
        let bar_width = (group_width - pad) / series_count;
        let baseline = axis.y(&area, 0.0);

        let mut centers = Vec::with_capacity(data.categories.len());
        for (c, category) in data.categories.iter().enumerate() {
            let group_left = area.left + c as f64 * group_width;
            centers.push(group_left + group_width / 2.0);

            for (s, series) in data.series.iter().enumerate() {
                let Some(value) = series.values.get(c).copied().flatten() else {
                    continue;
                };
                let top = axis.y(&area, value);
                elements.push(
                    Element::new(Shape::Rect {
                        x: group_left + pad / 2.0 + s as f64 * bar_width,
                        y: top.min(baseline),
                        width: bar_width,
                        height: (baseline - top).abs(),
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
            ChartType::Bar,
            region,
            settings.title.clone(),
            data,
            scene,
            settings.tooltips,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::params::ChartParams;
    use pretty_assertions::assert_eq;

    fn block(series: usize) -> DataBlock {
        DataBlock {
            sheet: "Burdekin".into(),
            categories: vec!["2019".into(), "2020".into(), "2021".into()],
            series: (0..series)
                .map(|i| Series {
                    name: format!("Site {}", i + 1),
                    values: vec![Some(1.0 + i as f64), None, Some(4.0)],
                    labels: vec![format!("{}", 1 + i), String::new(), "4".into()],
                })
                .collect(),
        }
    }

    fn settings() -> Settings {
        Settings::resolve(ChartType::Bar, &ChartParams::new()).unwrap()
    }

    #[test]
    fn test_natural_size() {
        assert_eq!(BarBuilder::natural_size(&block(1)), Size::new(80 + 3 * 30, 330));
        assert_eq!(BarBuilder::natural_size(&block(2)), Size::new(80 + 3 * 48, 350));
    }

    #[test]
    fn test_bars_skip_gaps() {
        let chart = BarBuilder
            .chart(Region::Burdekin, block(2), &settings(), Dimensions::auto())
            .unwrap();
        let scene = chart.scene().unwrap();
        let bars: Vec<&Element> = scene
            .elements
            .iter()
            .filter(|e| e.tooltip.is_some())
            .collect();
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].tooltip.as_deref(), Some("Site 1, 2019: 1"));
        assert_eq!(bars[3].tooltip.as_deref(), Some("Site 2, 2021: 4"));
        assert_eq!(chart.size(), Some((224, 350)));
    }

    #[test]
    fn test_bar_heights_follow_axis() {
        let chart = BarBuilder
            .chart(Region::Burdekin, block(1), &settings(), Dimensions::auto())
            .unwrap();
        let heights: Vec<f64> = chart
            .scene()
            .unwrap()
            .elements
            .iter()
            .filter(|e| e.tooltip.is_some())
            .filter_map(|e| match e.shape {
                Shape::Rect { height, .. } => Some(height),
                _ => None,
            })
            .collect();
        // Axis runs 0..5 over 240 units
        assert_eq!(heights, vec![48.0, 192.0]);
    }
}

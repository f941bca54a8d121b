//! Line series over categories

use crate::builders::common::{
    axis_chart_height, axis_chart_width, category_labels, legend, series_color, title, tooltip,
    PlotArea, ValueAxis,
};
use crate::builders::ChartBuilder;
use crate::chart::Chart;
use crate::data::DataBlock;
use crate::dimension::{negotiate, Dimensions, Size};
use crate::error::ChartResult;
use crate::params::{LineStyle, Settings};
use crate::scene::{Color, Element, Point, Scene, Shape, Stroke, StrokeStyle};
use crate::types::{ChartType, Region};

const STEP: u32 = 50;
const MARKER_RADIUS: f64 = 3.0;

/// One polyline per series; blank values break the line
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBuilder;

impl LineBuilder {
    fn natural_size(data: &DataBlock) -> Size {
        let steps = data.categories.len().saturating_sub(1).max(1);
        Size::new(axis_chart_width(steps, STEP), axis_chart_height(data.series.len() > 1))
    }
}

fn stroke(style: LineStyle, color: Color) -> Stroke {
    let style = match style {
        LineStyle::Solid => StrokeStyle::Basic {
            width: 2.0,
            dash: None,
        },
        LineStyle::Dashed => StrokeStyle::Basic {
            width: 2.0,
            dash: Some(vec![6.0, 4.0]),
        },
        LineStyle::Tapered => StrokeStyle::Tapered {
            start: 4.0,
            end: 1.0,
        },
    };
    Stroke { color, style }
}

/// Runs of consecutive present points
fn segments(points: &[Option<Point>]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(*p),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

impl ChartBuilder for LineBuilder {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
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

        let xs: Vec<f64> = match data.categories.len() {
            1 => vec![area.left + area.width() / 2.0],
            n => (0..n)
                .map(|i| area.left + area.width() * i as f64 / (n - 1) as f64)
                .collect(),
        };

        let mut markers = Vec::new();
        for (s, series) in data.series.iter().enumerate() {
            let color = series_color(s);
            let points: Vec<Option<Point>> = xs
                .iter()
                .enumerate()
                .map(|(c, x)| {
                    series
                        .values
                        .get(c)
                        .copied()
                        .flatten()
                        .map(|v| Point::new(*x, axis.y(&area, v)))
                })
                .collect();

            for run in segments(&points) {
                if run.len() > 1 {
                    elements.push(
                        Element::new(Shape::Polyline(run)).stroke(stroke(settings.style, color)),
                    );
                }
            }
            for (c, point) in points.iter().enumerate() {
                if let Some(p) = point {
                    markers.push(
                        Element::new(Shape::Circle {
                            cx: p.x,
                            cy: p.y,
                            r: MARKER_RADIUS,
                        })
                        .fill(color)
                        .tooltip(tooltip(
                            &series.name,
                            &data.categories[c],
                            &series.labels[c],
                        )),
                    );
                }
            }
        }
        // Markers above every line so hovering always reaches them
        elements.extend(markers);

        category_labels(&area, &xs, &data.categories, &mut elements);
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
            ChartType::Line,
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

    fn block(values: Vec<Option<f64>>) -> DataBlock {
        DataBlock {
            sheet: "Cape York".into(),
            categories: (0..values.len()).map(|i| format!("{}", 2015 + i)).collect(),
            series: vec![Series {
                name: "Seagrass".into(),
                labels: values
                    .iter()
                    .map(|v| v.map(|n| n.to_string()).unwrap_or_default())
                    .collect(),
                values,
            }],
        }
    }

    fn settings(style: &str) -> Settings {
        Settings::resolve(ChartType::Line, &ChartParams::new().with("style", style)).unwrap()
    }

    #[test]
    fn test_segments_split_at_gaps() {
        let p = |x: f64| Some(Point::new(x, 0.0));
        let runs = segments(&[p(0.0), p(1.0), None, p(3.0), None, None, p(6.0), p(7.0)]);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1], vec![Point::new(3.0, 0.0)]);
    }

    #[test]
    fn test_natural_width() {
        assert_eq!(LineBuilder::natural_size(&block(vec![Some(1.0)])).width, 130);
        assert_eq!(LineBuilder::natural_size(&block(vec![Some(1.0); 5])).width, 280);
    }

    #[test]
    fn test_dashed_lines_and_markers() {
        let chart = LineBuilder
            .chart(
                Region::CapeYork,
                block(vec![Some(1.0), Some(2.0), None, Some(3.0), Some(1.0)]),
                &settings("dashed"),
                Dimensions::auto(),
            )
            .unwrap();
        let scene = chart.scene().unwrap();
        let dashed = scene
            .elements
            .iter()
            .filter(|e| {
                matches!(
                    e.stroke,
                    Some(Stroke {
                        style: StrokeStyle::Basic { dash: Some(_), .. },
                        ..
                    })
                )
            })
            .count();
        assert_eq!(dashed, 2);
        let markers = scene.elements.iter().filter(|e| e.tooltip.is_some()).count();
        assert_eq!(markers, 4);
        assert!(chart.svg().unwrap().contains("stroke-dasharray=\"6 4\""));
    }

    #[test]
    fn test_tapered_lines_are_flattened() {
        let chart = LineBuilder
            .chart(
                Region::CapeYork,
                block(vec![Some(1.0), Some(2.0), Some(4.0)]),
                &settings("tapered"),
                Dimensions::auto(),
            )
            .unwrap();
        let scene = chart.scene().unwrap();
        assert!(scene.elements.iter().all(|e| !matches!(
            e.stroke,
            Some(Stroke {
                style: StrokeStyle::Tapered { .. },
                ..
            })
        )));
        let outline = scene
            .elements
            .iter()
            .find(|e| matches!(e.shape, Shape::Polygon(_)))
            .unwrap();
        assert_eq!(outline.fill, Some(series_color(0)));
    }
}

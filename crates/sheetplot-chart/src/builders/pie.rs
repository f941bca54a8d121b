//! Pie of one series across the categories

use std::f64::consts::TAU;

use crate::builders::common::{count, series_color, title, tooltip, CHAR_WIDTH};
use crate::builders::ChartBuilder;
use crate::chart::Chart;
use crate::data::DataBlock;
use crate::dimension::{negotiate, Dimensions, Size};
use crate::error::{ChartError, ChartResult};
use crate::params::Settings;
use crate::scene::{Anchor, Color, Element, Scene, Shape, Stroke};
use crate::types::{ChartType, Region};

const PIE_WIDTH: u32 = 240;
const ROW_HEIGHT: f64 = 18.0;

/// Slices are the positive values of the chosen series row
#[derive(Debug, Clone, Copy, Default)]
pub struct PieBuilder;

struct Slice<'a> {
    category: &'a str,
    label: &'a str,
    value: f64,
}

fn legend_width(slices: &[Slice<'_>]) -> u32 {
    let longest = slices
        .iter()
        .map(|s| s.category.chars().count())
        .max()
        .unwrap_or(0);
    (CHAR_WIDTH as u32).saturating_mul(count(longest)).saturating_add(40)
}

fn natural_size(slices: &[Slice<'_>]) -> Size {
    Size::new(
        PIE_WIDTH.saturating_add(legend_width(slices)),
        260.max(count(slices.len()).saturating_mul(18).saturating_add(60)),
    )
}

impl ChartBuilder for PieBuilder {
    fn chart_type(&self) -> ChartType {
        ChartType::Pie
    }

    fn chart(
        &self,
        region: Region,
        data: DataBlock,
        settings: &Settings,
        dimensions: Dimensions,
    ) -> ChartResult<Chart> {
        let series = data.series.get(settings.series - 1).ok_or_else(|| {
            ChartError::config(format!(
                "series {} requested but sheet '{}' has {}",
                settings.series,
                data.sheet,
                data.series.len()
            ))
        })?;

        let slices: Vec<Slice<'_>> = data
            .categories
            .iter()
            .enumerate()
            .filter_map(|(c, category)| {
                let value = series.values.get(c).copied().flatten()?;
                (value > 0.0).then(|| Slice {
                    category,
                    label: &series.labels[c],
                    value,
                })
            })
            .collect();
        if slices.is_empty() {
            return Err(ChartError::config(format!(
                "series '{}' on sheet '{}' has no positive values",
                series.name, data.sheet
            )));
        }

        let natural = natural_size(&slices);
        let layout = negotiate(dimensions, natural);
        let legend_w =
            legend_width(&slices) as f64 * layout.view_width / natural.width as f64;
        let pie_w = (layout.view_width - legend_w).max(1.0);
        let cx = pie_w / 2.0;
        let cy = 40.0 + (layout.view_height - 60.0).max(0.0) / 2.0;
        let r = ((pie_w.min(layout.view_height - 60.0) / 2.0) - 10.0).max(1.0);

        let mut elements = vec![title(layout.view_width, region, &settings.title)];
        let total: f64 = slices.iter().map(|s| s.value).sum();
        let mut angle = 0.0;
        for (idx, slice) in slices.iter().enumerate() {
            let sweep = if slices.len() == 1 {
                TAU
            } else {
                slice.value / total * TAU
            };
            elements.push(
                Element::new(Shape::Wedge {
                    cx,
                    cy,
                    r,
                    start: angle,
                    end: angle + sweep,
                })
                .fill(series_color(idx))
                .stroke(Stroke::solid(Color::WHITE, 1.0))
                .tooltip(tooltip(&series.name, slice.category, slice.label)),
            );
            angle += sweep;
        }

        for (idx, slice) in slices.iter().enumerate() {
            let y = 60.0 + idx as f64 * ROW_HEIGHT;
            elements.push(
                Element::new(Shape::Rect {
                    x: pie_w + 10.0,
                    y: y - 9.0,
                    width: 10.0,
                    height: 10.0,
                })
                .fill(series_color(idx)),
            );
            elements.push(Element::text(pie_w + 24.0, y, slice.category, 11.0, Anchor::Start));
        }

        let scene = Scene {
            width: layout.width,
            height: layout.height,
            view_width: layout.view_width,
            view_height: layout.view_height,
            elements,
        };
        let title = settings.title.clone();
        Chart::vector(ChartType::Pie, region, title, data, scene, settings.tooltips)
    }
}

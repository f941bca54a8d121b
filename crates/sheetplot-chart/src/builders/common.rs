//! Layout pieces shared by the vector builders

use sheetplot_core::number_format::format_general;

use crate::scene::{Anchor, Color, Element, Point, Shape, Stroke};
use crate::types::Region;

pub(crate) const MARGIN_LEFT: f64 = 60.0;
pub(crate) const MARGIN_RIGHT: f64 = 20.0;
pub(crate) const MARGIN_TOP: f64 = 40.0;
pub(crate) const MARGIN_BOTTOM: f64 = 50.0;
pub(crate) const LEGEND_HEIGHT: f64 = 20.0;
pub(crate) const PLOT_HEIGHT: f64 = 240.0;

const TITLE_SIZE: f64 = 14.0;
const LABEL_SIZE: f64 = 11.0;
const TICKS: usize = 5;

/// Approximate advance of one label character
pub(crate) const CHAR_WIDTH: f64 = 7.0;

const PALETTE: [Color; 8] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x17, 0xbe, 0xcf),
];

pub(crate) fn series_color(idx: usize) -> Color {
    PALETTE[idx % PALETTE.len()]
}

/// Item count as a pixel multiplier, clamped to `u32`
pub(crate) fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Natural width of an axis chart with `slots` slots of `slot_width` pixels
pub(crate) fn axis_chart_width(slots: usize, slot_width: u32) -> u32 {
    count(slots).saturating_mul(slot_width).saturating_add(80)
}

/// Natural height of an axis chart
pub(crate) fn axis_chart_height(legend: bool) -> u32 {
    let legend = if legend { LEGEND_HEIGHT } else { 0.0 };
    (MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM + legend) as u32
}

/// `"<series>, <category>: <value label>"`
pub(crate) fn tooltip(series: &str, category: &str, label: &str) -> String {
    format!("{}, {}: {}", series, category, label)
}

/// Heading drawn across the top: region label then chart title
pub(crate) fn title(view_width: f64, region: Region, title: &str) -> Element {
    let text = format!("{} {}", region.label(), title);
    Element::text(view_width / 2.0, 24.0, text, TITLE_SIZE, Anchor::Middle)
}

/// The rectangle values are plotted in
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub(crate) left: f64,
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,
}

impl PlotArea {
    pub(crate) fn new(view_width: f64, view_height: f64, legend: bool) -> Self {
        let legend = if legend { LEGEND_HEIGHT } else { 0.0 };
        let right = (view_width - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0);
        let bottom = (view_height - MARGIN_BOTTOM - legend).max(MARGIN_TOP + 1.0);
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right,
            bottom,
        }
    }

    pub(crate) fn width(&self) -> f64 {
        self.right - self.left
    }

    pub(crate) fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Linear value axis from a rounded minimum to a rounded maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValueAxis {
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl ValueAxis {
    /// `max` overrides the rounded data maximum when it is above the minimum
    pub(crate) fn new(data_min: Option<f64>, data_max: Option<f64>, max: Option<f64>) -> Self {
        let min = match data_min {
            Some(v) if v < 0.0 => -nice_ceiling(-v),
            _ => 0.0,
        };
        let max = match max {
            Some(m) if m > min => m,
            _ => match data_max {
                Some(v) if v > 0.0 => nice_ceiling(v),
                _ if min < 0.0 => 0.0,
                _ => 1.0,
            },
        };
        Self { min, max }
    }

    /// Vertical position of a value, clamped to the axis range
    pub(crate) fn y(&self, area: &PlotArea, value: f64) -> f64 {
        let t = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        area.bottom - t * area.height()
    }

    pub(crate) fn ticks(&self) -> Vec<f64> {
        (0..TICKS)
            .map(|i| self.min + (self.max - self.min) * i as f64 / (TICKS - 1) as f64)
            .collect()
    }

    /// Grid lines, tick labels, axis lines and the axis title
    pub(crate) fn draw(&self, area: &PlotArea, label: Option<&str>, out: &mut Vec<Element>) {
        for tick in self.ticks() {
            let y = self.y(area, tick);
            out.push(
                Element::new(Shape::Polyline(vec![
                    Point::new(area.left, y),
                    Point::new(area.right, y),
                ]))
                .stroke(Stroke::solid(Color::rgb(0xe0, 0xe0, 0xe0), 1.0)),
            );
            out.push(Element::text(
                area.left - 6.0,
                y + 4.0,
                format_general(tick),
                LABEL_SIZE,
                Anchor::End,
            ));
        }

        let zero = self.y(area, 0.0);
        out.push(
            Element::new(Shape::Polyline(vec![
                Point::new(area.left, area.top),
                Point::new(area.left, area.bottom),
            ]))
            .stroke(Stroke::solid(Color::GREY, 1.0)),
        );
        out.push(
            Element::new(Shape::Polyline(vec![
                Point::new(area.left, zero),
                Point::new(area.right, zero),
            ]))
            .stroke(Stroke::solid(Color::GREY, 1.0)),
        );

        if let Some(label) = label {
            let x = 16.0;
            let y = area.top + area.height() / 2.0;
            out.push(Element::new(Shape::Text {
                x,
                y,
                text: label.to_string(),
                size: LABEL_SIZE,
                anchor: Anchor::Middle,
                rotation: -90.0,
            })
            .fill(Color::TEXT));
        }
    }
}

/// Smallest of 1, 2, 2.5, 5, 10 times a power of ten that is `>= v`
pub(crate) fn nice_ceiling(v: f64) -> f64 {
    if v <= 0.0 || !v.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(v.log10().floor() as i32);
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= v * (1.0 - 1e-12))
        .unwrap_or(10.0 * magnitude)
}

/// Category labels centred under each `x`
pub(crate) fn category_labels(area: &PlotArea, xs: &[f64], labels: &[String], out: &mut Vec<Element>) {
    for (x, label) in xs.iter().zip(labels) {
        out.push(Element::text(*x, area.bottom + 16.0, label.as_str(), LABEL_SIZE, Anchor::Middle));
    }
}

/// One row of swatches along the bottom
pub(crate) fn legend(view_height: f64, names: &[&str], out: &mut Vec<Element>) {
    let y = view_height - 14.0;
    let mut x = MARGIN_LEFT;
    for (idx, name) in names.iter().enumerate() {
        out.push(
            Element::new(Shape::Rect {
                x,
                y: y - 9.0,
                width: 10.0,
                height: 10.0,
            })
            .fill(series_color(idx)),
        );
        out.push(Element::text(x + 14.0, y, *name, LABEL_SIZE, Anchor::Start));
        x += 24.0 + CHAR_WIDTH * name.chars().count() as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_axis_chart_width_saturates() {
        assert_eq!(axis_chart_width(3, 30), 170);
        assert_eq!(axis_chart_width(16_384, 1_048_576 * 18 + 12), u32::MAX);
        assert_eq!(axis_chart_width(usize::MAX, 1), u32::MAX);
        assert_eq!(count(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(7.0), 10.0);
        assert_eq!(nice_ceiling(1.0), 1.0);
        assert_eq!(nice_ceiling(1.3), 2.0);
        assert_eq!(nice_ceiling(21.0), 25.0);
        assert_eq!(nice_ceiling(480.0), 500.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }

    #[test]
    fn test_value_axis() {
        assert_eq!(
            ValueAxis::new(Some(3.0), Some(42.0), None),
            ValueAxis { min: 0.0, max: 50.0 }
        );
        assert_eq!(
            ValueAxis::new(Some(-4.0), Some(3.0), None),
            ValueAxis { min: -5.0, max: 5.0 }
        );
        assert_eq!(
            ValueAxis::new(Some(-4.0), Some(-1.0), None),
            ValueAxis { min: -5.0, max: 0.0 }
        );
        assert_eq!(
            ValueAxis::new(Some(1.0), Some(42.0), Some(100.0)),
            ValueAxis { min: 0.0, max: 100.0 }
        );
        assert_eq!(ValueAxis::new(None, None, None), ValueAxis { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_axis_positions() {
        let area = PlotArea::new(200.0, 330.0, false);
        let axis = ValueAxis { min: 0.0, max: 10.0 };
        assert_eq!(area.height(), 240.0);
        assert_eq!(axis.y(&area, 0.0), 280.0);
        assert_eq!(axis.y(&area, 10.0), 40.0);
        assert_eq!(axis.y(&area, 20.0), 40.0);
        assert_eq!(axis.ticks(), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_natural_height() {
        assert_eq!(axis_chart_height(false), 330);
        assert_eq!(axis_chart_height(true), 350);
    }
}

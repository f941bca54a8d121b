//! Vector scene graph
//!
//! Builders draw into a [`Scene`]; every vector output format is produced
//! from the same scene.

use std::f64::consts::TAU;

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(0x99, 0x99, 0x99);
    pub const TEXT: Color = Color::rgb(0x33, 0x33, 0x33);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A point in view-box units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Drawable geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Polyline(Vec<Point>),
    /// Closed path
    Polygon(Vec<Point>),
    /// Pie slice; angles in radians clockwise from twelve o'clock
    Wedge {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        anchor: Anchor,
        /// Degrees clockwise about (x, y)
        rotation: f64,
    },
}

impl Shape {
    /// Outline as points plus whether it is closed; `None` for text
    pub fn outline(&self) -> Option<(Vec<Point>, bool)> {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => Some((
                vec![
                    Point::new(*x, *y),
                    Point::new(x + width, *y),
                    Point::new(x + width, y + height),
                    Point::new(*x, y + height),
                ],
                true,
            )),
            Shape::Circle { cx, cy, r } => Some((arc_points(*cx, *cy, *r, 0.0, TAU, 48), true)),
            Shape::Polyline(points) => Some((points.clone(), false)),
            Shape::Polygon(points) => Some((points.clone(), true)),
            Shape::Wedge {
                cx,
                cy,
                r,
                start,
                end,
            } => {
                let sweep = end - start;
                let steps = ((sweep.abs() / TAU) * 48.0).ceil().max(2.0) as usize;
                let mut points = arc_points(*cx, *cy, *r, *start, *end, steps);
                if sweep.abs() < TAU - 1e-9 {
                    points.insert(0, Point::new(*cx, *cy));
                }
                Some((points, true))
            }
            Shape::Text { .. } => None,
        }
    }
}

/// Point on a circle at `angle` radians clockwise from twelve o'clock
pub fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> Point {
    Point::new(cx + r * angle.sin(), cy - r * angle.cos())
}

fn arc_points(cx: f64, cy: f64, r: f64, start: f64, end: f64, steps: usize) -> Vec<Point> {
    let full = (end - start).abs() >= TAU - 1e-9;
    let count = if full { steps } else { steps + 1 };
    (0..count)
        .map(|i| polar(cx, cy, r, start + (end - start) * i as f64 / steps as f64))
        .collect()
}

/// How an outline is stroked
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Maps onto stroke attributes
    Basic { width: f64, dash: Option<Vec<f64>> },
    /// Width changes linearly along the path
    Tapered { start: f64, end: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub style: StrokeStyle,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            style: StrokeStyle::Basic { width, dash: None },
        }
    }
}

/// A shape with paint and an optional tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub tooltip: Option<String>,
}

impl Element {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            tooltip: None,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn tooltip<S: Into<String>>(mut self, text: S) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn text<S: Into<String>>(x: f64, y: f64, text: S, size: f64, anchor: Anchor) -> Self {
        Self::new(Shape::Text {
            x,
            y,
            text: text.into(),
            size,
            anchor,
            rotation: 0.0,
        })
        .fill(Color::TEXT)
    }
}

/// A finished drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Declared output width in pixels
    pub width: u32,
    /// Declared output height in pixels
    pub height: u32,
    pub view_width: f64,
    pub view_height: f64,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn has_tooltips(&self) -> bool {
        self.elements.iter().any(|e| e.tooltip.is_some())
    }

    /// Replace strokes that have no stroke-attribute form with filled
    /// outlines, leaving only [`StrokeStyle::Basic`] strokes in the scene
    pub fn flatten_strokes(&mut self) {
        let elements = std::mem::take(&mut self.elements);
        for mut element in elements {
            let Some(Stroke {
                color,
                style: StrokeStyle::Tapered { start, end },
            }) = element.stroke.clone()
            else {
                self.elements.push(element);
                continue;
            };

            element.stroke = None;
            let outline = element.shape.outline();
            let tooltip = element.tooltip.clone();
            if element.fill.is_some() || matches!(element.shape, Shape::Text { .. }) {
                self.elements.push(element);
            }

            if let Some((mut points, closed)) = outline {
                if closed {
                    if let Some(first) = points.first().copied() {
                        points.push(first);
                    }
                }
                if let Some(polygon) = tapered_outline(&points, start, end) {
                    self.elements.push(Element {
                        shape: Shape::Polygon(polygon),
                        fill: Some(color),
                        stroke: None,
                        tooltip,
                    });
                }
            }
        }
    }
}

/// Filled outline of a polyline whose width goes from `start` to `end`
pub fn tapered_outline(points: &[Point], start: f64, end: f64) -> Option<Vec<Point>> {
    let points: Vec<Point> = points
        .iter()
        .copied()
        .fold(Vec::new(), |mut acc: Vec<Point>, p| {
            if acc.last().map_or(true, |q| (q.x - p.x).hypot(q.y - p.y) > 1e-9) {
                acc.push(p);
            }
            acc
        });
    if points.len() < 2 {
        return None;
    }

    let mut lengths = vec![0.0];
    for pair in points.windows(2) {
        let d = (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y);
        lengths.push(lengths[lengths.len() - 1] + d);
    }
    let total = lengths[lengths.len() - 1];

    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        // Direction: average of adjacent segment directions
        let prev = if i > 0 { points[i - 1] } else { *p };
        let next = if i + 1 < points.len() { points[i + 1] } else { *p };
        let (dx, dy) = (next.x - prev.x, next.y - prev.y);
        let len = dx.hypot(dy);
        if len == 0.0 {
            continue;
        }
        let (nx, ny) = (-dy / len, dx / len);
        let t = if total > 0.0 { lengths[i] / total } else { 0.0 };
        let half = (start + (end - start) * t) / 2.0;
        left.push(Point::new(p.x + nx * half, p.y + ny * half));
        right.push(Point::new(p.x - nx * half, p.y - ny * half));
    }

    right.reverse();
    left.extend(right);
    Some(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scene(elements: Vec<Element>) -> Scene {
        Scene {
            width: 100,
            height: 100,
            view_width: 100.0,
            view_height: 100.0,
            elements,
        }
    }

    #[test]
    fn test_tapered_outline() {
        let outline = tapered_outline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            4.0,
            2.0,
        )
        .unwrap();
        assert_eq!(
            outline,
            vec![
                Point::new(0.0, 2.0),
                Point::new(10.0, 1.0),
                Point::new(10.0, -1.0),
                Point::new(0.0, -2.0),
            ]
        );
        assert!(tapered_outline(&[Point::new(1.0, 1.0)], 1.0, 1.0).is_none());
    }

    #[test]
    fn test_flatten_keeps_basic_strokes() {
        let basic = Element::new(Shape::Polyline(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]))
            .stroke(Stroke::solid(Color::BLACK, 1.0));
        let tapered = Element::new(Shape::Polyline(vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)]))
            .stroke(Stroke {
                color: Color::GREY,
                style: StrokeStyle::Tapered { start: 3.0, end: 1.0 },
            })
            .tooltip("Coral");

        let mut s = scene(vec![basic.clone(), tapered]);
        s.flatten_strokes();

        assert_eq!(s.elements.len(), 2);
        assert_eq!(s.elements[0], basic);
        let flat = &s.elements[1];
        assert!(matches!(flat.shape, Shape::Polygon(ref p) if p.len() == 4));
        assert_eq!(flat.fill, Some(Color::GREY));
        assert_eq!(flat.stroke, None);
        assert_eq!(flat.tooltip.as_deref(), Some("Coral"));
    }

    #[test]
    fn test_flatten_filled_shape_keeps_fill() {
        let rect = Element::new(Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        })
        .fill(Color::WHITE)
        .stroke(Stroke {
            color: Color::BLACK,
            style: StrokeStyle::Tapered { start: 2.0, end: 2.0 },
        });
        let mut s = scene(vec![rect]);
        s.flatten_strokes();
        assert_eq!(s.elements.len(), 2);
        assert_eq!(s.elements[0].stroke, None);
        assert_eq!(s.elements[0].fill, Some(Color::WHITE));
    }

    #[test]
    fn test_wedge_outline() {
        let (points, closed) = Shape::Wedge {
            cx: 0.0,
            cy: 0.0,
            r: 1.0,
            start: 0.0,
            end: TAU / 4.0,
        }
        .outline()
        .unwrap();
        assert!(closed);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        let first = points[1];
        assert!((first.x - 0.0).abs() < 1e-9 && (first.y + 1.0).abs() < 1e-9);
        let last = points[points.len() - 1];
        assert!((last.x - 1.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    }
}

//! SVG rendering of a scene
//!
//! Rendering first builds a node tree from the scene; optional passes (the
//! tooltip pass) then rewrite the tree before it is serialized.

use std::f64::consts::{PI, TAU};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{ChartError, ChartResult};
use crate::scene::{polar, Element, Point, Scene, Shape, Stroke, StrokeStyle};
use crate::tooltip;

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// One SVG element
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SvgNode {
    pub(crate) name: &'static str,
    pub(crate) attrs: Vec<(&'static str, String)>,
    pub(crate) text: Option<String>,
    pub(crate) cdata: Option<String>,
    pub(crate) children: Vec<SvgNode>,
    /// Tooltip carried over from the scene element
    pub(crate) tooltip: Option<String>,
}

impl SvgNode {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            cdata: None,
            children: Vec::new(),
            tooltip: None,
        }
    }

    pub(crate) fn attr<V: Into<String>>(mut self, key: &'static str, value: V) -> Self {
        self.set_attr(key, value);
        self
    }

    pub(crate) fn set_attr<V: Into<String>>(&mut self, key: &'static str, value: V) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub(crate) fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Visit this node and all descendants, parents first
    pub(crate) fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut SvgNode)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), quick_xml::Error> {
        let mut start = BytesStart::new(self.name);
        for (key, value) in &self.attrs {
            start.push_attribute((*key, value.as_str()));
        }

        if self.text.is_none() && self.cdata.is_none() && self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        if let Some(cdata) = &self.cdata {
            writer.write_event(Event::CData(BytesCData::new(cdata.as_str())))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name)))
    }
}

/// Render a scene to an SVG document
///
/// `tooltips` enables the tooltip pass; it only runs when some element
/// carries tooltip text.
pub fn render(scene: &Scene, tooltips: bool) -> ChartResult<String> {
    let mut root = base_tree(scene);
    if tooltips && scene.has_tooltips() {
        tooltip::inject(&mut root);
    }
    serialize(&root, true)
}

/// Serialize a node tree, optionally with an XML declaration
pub(crate) fn serialize(root: &SvgNode, declaration: bool) -> ChartResult<String> {
    let mut writer = Writer::new(Vec::new());
    if declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| ChartError::encoding("svg declaration", e))?;
        writer.get_mut().push(b'\n');
    }
    root.write(&mut writer)
        .map_err(|e| ChartError::encoding("svg serialization", e))?;
    String::from_utf8(writer.into_inner()).map_err(|e| ChartError::encoding("svg utf-8", e))
}

/// The SVG tree for a scene with no optional passes applied
pub(crate) fn base_tree(scene: &Scene) -> SvgNode {
    let mut root = SvgNode::new("svg")
        .attr("xmlns", SVG_NS)
        .attr("width", scene.width.to_string())
        .attr("height", scene.height.to_string())
        .attr(
            "viewBox",
            format!("0 0 {} {}", num(scene.view_width), num(scene.view_height)),
        )
        .attr("font-family", FONT_FAMILY);

    root.children.push(
        SvgNode::new("rect")
            .attr("x", "0")
            .attr("y", "0")
            .attr("width", num(scene.view_width))
            .attr("height", num(scene.view_height))
            .attr("fill", "#ffffff"),
    );
    root.children.extend(scene.elements.iter().map(element_node));
    root
}

fn element_node(element: &Element) -> SvgNode {
    let mut node = match &element.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => SvgNode::new("rect")
            .attr("x", num(*x))
            .attr("y", num(*y))
            .attr("width", num(*width))
            .attr("height", num(*height)),
        Shape::Circle { cx, cy, r } => circle(*cx, *cy, *r),
        Shape::Polyline(points) => SvgNode::new("polyline").attr("points", points_attr(points)),
        Shape::Polygon(points) => SvgNode::new("polygon").attr("points", points_attr(points)),
        Shape::Wedge {
            cx,
            cy,
            r,
            start,
            end,
        } => {
            if (end - start).abs() >= TAU - 1e-9 {
                circle(*cx, *cy, *r)
            } else {
                let p0 = polar(*cx, *cy, *r, *start);
                let p1 = polar(*cx, *cy, *r, *end);
                let large = if end - start > PI { 1 } else { 0 };
                SvgNode::new("path").attr(
                    "d",
                    format!(
                        "M{},{} L{},{} A{},{} 0 {} 1 {},{} Z",
                        num(*cx),
                        num(*cy),
                        num(p0.x),
                        num(p0.y),
                        num(*r),
                        num(*r),
                        large,
                        num(p1.x),
                        num(p1.y)
                    ),
                )
            }
        }
        Shape::Text {
            x,
            y,
            text,
            size,
            anchor,
            rotation,
        } => {
            let mut node = SvgNode::new("text")
                .attr("x", num(*x))
                .attr("y", num(*y))
                .attr("font-size", num(*size))
                .attr("text-anchor", anchor.as_str());
            if *rotation != 0.0 {
                node.set_attr(
                    "transform",
                    format!("rotate({} {} {})", num(*rotation), num(*x), num(*y)),
                );
            }
            node.text = Some(text.clone());
            node
        }
    };

    node.set_attr(
        "fill",
        element
            .fill
            .map(|c| c.hex())
            .unwrap_or_else(|| "none".to_string()),
    );
    if let Some(stroke) = &element.stroke {
        apply_stroke(&mut node, stroke);
    }
    node.tooltip = element.tooltip.clone();
    node
}

fn apply_stroke(node: &mut SvgNode, stroke: &Stroke) {
    node.set_attr("stroke", stroke.color.hex());
    match &stroke.style {
        StrokeStyle::Basic { width, dash } => {
            node.set_attr("stroke-width", num(*width));
            if let Some(dash) = dash {
                let pattern: Vec<String> = dash.iter().map(|d| num(*d)).collect();
                node.set_attr("stroke-dasharray", pattern.join(" "));
            }
        }
        StrokeStyle::Tapered { start, end } => {
            // Unflattened scenes only; draw at the mean width
            log::warn!("tapered stroke reached the svg renderer unflattened");
            node.set_attr("stroke-width", num((start + end) / 2.0));
        }
    }
}

fn circle(cx: f64, cy: f64, r: f64) -> SvgNode {
    SvgNode::new("circle")
        .attr("cx", num(cx))
        .attr("cy", num(cy))
        .attr("r", num(r))
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coordinate text: at most two decimals, no trailing zeros
pub(crate) fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.2}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

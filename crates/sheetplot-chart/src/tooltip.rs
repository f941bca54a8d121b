//! Tooltip pass over a rendered SVG tree
//!
//! Adds the embedded script, the hidden helper elements and the hover
//! handlers on every node that carries tooltip text.

use crate::svg::SvgNode;

const SCRIPT: &str = include_str!("tooltip.js");

pub(crate) const TEXT_ID: &str = "sheetplot-tooltip";
pub(crate) const BACKGROUND_ID: &str = "sheetplot-tooltip-bg";

/// Apply the pass to an `<svg>` root; does nothing if no node has a tooltip
/// or the pass already ran
pub(crate) fn inject(root: &mut SvgNode) {
    if root.get_attr("onload").is_some() {
        return;
    }

    let mut attached = 0usize;
    root.walk_mut(&mut |node| {
        if let Some(text) = node.tooltip.take() {
            node.set_attr(
                "onmousemove",
                format!("tooltipShow(evt, '{}')", escape_script(&text)),
            );
            node.set_attr("onmouseout", "tooltipHide(evt)");
            attached += 1;
        }
    });
    if attached == 0 {
        return;
    }

    root.set_attr("onload", "tooltipInit(evt)");

    let mut script = SvgNode::new("script").attr("type", "text/ecmascript");
    script.cdata = Some(SCRIPT.to_string());
    root.children.insert(0, script);

    root.children.push(
        SvgNode::new("rect")
            .attr("id", BACKGROUND_ID)
            .attr("x", "0")
            .attr("y", "0")
            .attr("width", "0")
            .attr("height", "0")
            .attr("rx", "3")
            .attr("fill", "#ffffe0")
            .attr("stroke", "#666666")
            .attr("stroke-width", "0.5")
            .attr("visibility", "hidden")
            .attr("pointer-events", "none"),
    );
    let mut label = SvgNode::new("text")
        .attr("id", TEXT_ID)
        .attr("x", "0")
        .attr("y", "0")
        .attr("font-size", "11")
        .attr("fill", "#000000")
        .attr("visibility", "hidden")
        .attr("pointer-events", "none");
    label.text = Some(String::new());
    root.children.push(label);

    log::trace!("attached {} tooltips", attached);
}

/// Escape text for a single-quoted script string
fn escape_script(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Element, Scene, Shape};
    use crate::svg;
    use pretty_assertions::assert_eq;

    fn bar(tooltip: Option<&str>) -> Element {
        let e = Element::new(Shape::Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        });
        match tooltip {
            Some(t) => e.tooltip(t),
            None => e,
        }
    }

    fn scene(elements: Vec<Element>) -> Scene {
        Scene {
            width: 10,
            height: 10,
            view_width: 10.0,
            view_height: 10.0,
            elements,
        }
    }

    #[test]
    fn test_escape_script() {
        assert_eq!(escape_script(r"Bob's \ path"), r"Bob\'s \\ path");
        assert_eq!(escape_script("a\r\nb"), r"a\r\nb");
    }

    #[test]
    fn test_injected_once() {
        let s = scene(vec![bar(Some("Coral, 2019: 3")), bar(Some("it's")), bar(None)]);
        let mut root = svg::base_tree(&s);
        inject(&mut root);
        inject(&mut root);
        let out = svg::serialize(&root, true).unwrap();

        assert_eq!(out.matches("<script").count(), 1);
        assert_eq!(out.matches("onload=\"tooltipInit(evt)\"").count(), 1);
        assert_eq!(out.matches("id=\"sheetplot-tooltip\"").count(), 1);
        assert_eq!(out.matches("id=\"sheetplot-tooltip-bg\"").count(), 1);
        assert_eq!(out.matches("onmouseout=\"tooltipHide(evt)\"").count(), 2);
        assert!(out.contains("onmousemove=\"tooltipShow(evt, &apos;Coral, 2019: 3&apos;)\""));
        assert!(out.contains("tooltipShow(evt, &apos;it\\&apos;s&apos;)"));
        assert!(out.contains("function tooltipShow(evt, text)"));
    }

    #[test]
    fn test_no_tooltips_no_injection() {
        let s = scene(vec![bar(None)]);
        let mut root = svg::base_tree(&s);
        let before = root.clone();
        inject(&mut root);
        assert_eq!(root, before);
    }

    #[test]
    fn test_helpers_follow_content() {
        let s = scene(vec![bar(Some("x"))]);
        let mut root = svg::base_tree(&s);
        inject(&mut root);
        let names: Vec<&str> = root.children.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["script", "rect", "rect", "rect", "text"]);
        assert_eq!(root.children[3].get_attr("id"), Some(BACKGROUND_ID));
    }
}

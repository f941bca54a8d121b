use std::fmt::Write as _;

use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::{ChartError, ChartResult};
use crate::format::Format;
use crate::raster::RasterOptions;
use crate::scene::{Anchor, Color, Element, Point, Scene, Shape, StrokeStyle};
use crate::svg::num;

/// EPSF-3.0; the scene is drawn in view-box units under a y-flip
pub(crate) struct EpsEncoder;

impl Encoder for EpsEncoder {
    fn format(&self) -> Format {
        Format::Eps
    }

    fn encode(&self, chart: &Chart, _raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let (scene, _) = chart.vector_content(Format::Eps)?;
        document(scene, &chart.heading())
            .map(String::into_bytes)
            .map_err(|e| ChartError::encoding("eps", e))
    }
}

fn document(scene: &Scene, title: &str) -> Result<String, std::fmt::Error> {
    let (w, h) = (scene.width, scene.height);
    let mut out = String::new();
    writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(out, "%%BoundingBox: 0 0 {} {}", w, h)?;
    writeln!(out, "%%HiResBoundingBox: 0 0 {}.0 {}.0", w, h)?;
    writeln!(out, "%%Title: {}", title.replace(['\r', '\n'], " "))?;
    writeln!(out, "%%Creator: sheetplot")?;
    writeln!(out, "%%Pages: 1")?;
    writeln!(out, "%%EndComments")?;
    writeln!(out, "gsave")?;
    writeln!(out, "0 {} translate", h)?;
    writeln!(
        out,
        "{} -{} scale",
        num4(w as f64 / scene.view_width),
        num4(h as f64 / scene.view_height)
    )?;
    writeln!(out, "1 setlinejoin")?;

    for element in &scene.elements {
        draw(&mut out, element)?;
    }

    writeln!(out, "grestore")?;
    writeln!(out, "showpage")?;
    writeln!(out, "%%EOF")?;
    Ok(out)
}

fn draw(out: &mut String, element: &Element) -> std::fmt::Result {
    match &element.shape {
        Shape::Text {
            x,
            y,
            text,
            size,
            anchor,
            rotation,
        } => {
            set_color(out, element.fill.unwrap_or(Color::BLACK))?;
            write!(out, "gsave {} {} translate 1 -1 scale ", num(*x), num(*y))?;
            if *rotation != 0.0 {
                write!(out, "{} rotate ", num(-rotation))?;
            }
            write!(out, "/Helvetica findfont {} scalefont setfont ", num(*size))?;
            let s = ps_string(text);
            match anchor {
                Anchor::Start => writeln!(out, "0 0 moveto {} show grestore", s),
                Anchor::Middle => writeln!(
                    out,
                    "{} dup stringwidth pop 2 div neg 0 moveto show grestore",
                    s
                ),
                Anchor::End => {
                    writeln!(out, "{} dup stringwidth pop neg 0 moveto show grestore", s)
                }
            }
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let rect = format!("{} {} {} {}", num(*x), num(*y), num(*width), num(*height));
            if let Some(fill) = element.fill {
                set_color(out, fill)?;
                writeln!(out, "{} rectfill", rect)?;
            }
            if stroke_setup(out, element)? {
                writeln!(out, "{} rectstroke", rect)?;
            }
            Ok(())
        }
        Shape::Circle { cx, cy, r } => {
            let path = format!("newpath {} {} {} 0 360 arc closepath", num(*cx), num(*cy), num(*r));
            paint(out, element, &path)
        }
        Shape::Polyline(points) => {
            if stroke_setup(out, element)? {
                writeln!(out, "{} stroke", path(points))?;
            }
            Ok(())
        }
        Shape::Polygon(points) => paint(out, element, &format!("{} closepath", path(points))),
        Shape::Wedge {
            cx,
            cy,
            r,
            start,
            end,
        } => {
            let path = if (end - start).abs() >= std::f64::consts::TAU - 1e-9 {
                format!("newpath {} {} {} 0 360 arc closepath", num(*cx), num(*cy), num(*r))
            } else {
                // Clockwise from twelve o'clock in a y-down space
                format!(
                    "newpath {cx} {cy} moveto {cx} {cy} {r} {a0} {a1} arc closepath",
                    cx = num(*cx),
                    cy = num(*cy),
                    r = num(*r),
                    a0 = num(start.to_degrees() - 90.0),
                    a1 = num(end.to_degrees() - 90.0)
                )
            };
            paint(out, element, &path)
        }
    }
}

/// Fill then stroke a closed path
fn paint(out: &mut String, element: &Element, path: &str) -> std::fmt::Result {
    if let Some(fill) = element.fill {
        set_color(out, fill)?;
        writeln!(out, "{} fill", path)?;
    }
    if stroke_setup(out, element)? {
        writeln!(out, "{} stroke", path)?;
    }
    Ok(())
}

/// Emit stroke state; `false` when the element has no stroke
fn stroke_setup(out: &mut String, element: &Element) -> Result<bool, std::fmt::Error> {
    let Some(stroke) = &element.stroke else {
        return Ok(false);
    };
    set_color(out, stroke.color)?;
    match &stroke.style {
        StrokeStyle::Basic { width, dash } => {
            let dash: Vec<String> = dash.iter().flatten().map(|d| num(*d)).collect();
            writeln!(out, "{} setlinewidth [{}] 0 setdash", num(*width), dash.join(" "))?;
        }
        StrokeStyle::Tapered { start, end } => {
            writeln!(out, "{} setlinewidth [] 0 setdash", num((start + end) / 2.0))?;
        }
    }
    Ok(true)
}

fn set_color(out: &mut String, color: Color) -> std::fmt::Result {
    writeln!(
        out,
        "{} {} {} setrgbcolor",
        num4(color.r as f64 / 255.0),
        num4(color.g as f64 / 255.0),
        num4(color.b as f64 / 255.0)
    )
}

fn path(points: &[Point]) -> String {
    let mut out = String::from("newpath");
    for (i, p) in points.iter().enumerate() {
        let op = if i == 0 { "moveto" } else { "lineto" };
        out.push_str(&format!(" {} {} {}", num(p.x), num(p.y), op));
    }
    out
}

/// Four decimals, no trailing zeros
fn num4(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// PostScript string literal; non-Latin-1 characters become `?`
fn ps_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimensions;
    use crate::encode::tests::{bar_chart, NO_FONTS};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ps_string() {
        assert_eq!(ps_string("a (b) \\ c"), "(a \\(b\\) \\\\ c)");
        assert_eq!(ps_string("é\n"), "(\\351\\012)");
        assert_eq!(ps_string("見"), "(?)");
    }

    #[test]
    fn test_num4() {
        assert_eq!(num4(1.0), "1");
        assert_eq!(num4(0.5), "0.5");
        assert_eq!(num4(1.0 / 3.0), "0.3333");
        assert_eq!(num4(-0.00001), "0");
    }

    #[test]
    fn test_document_structure() {
        let chart = bar_chart(Dimensions::new(0, 165));
        let (w, h) = chart.size().unwrap();
        let eps = String::from_utf8(EpsEncoder.encode(&chart, &NO_FONTS).unwrap()).unwrap();

        let lines: Vec<&str> = eps.lines().collect();
        assert_eq!(lines[0], "%!PS-Adobe-3.0 EPSF-3.0");
        assert_eq!(lines[1], format!("%%BoundingBox: 0 0 {} {}", w, h));
        assert_eq!(h, 165);
        assert!(eps.contains("0 165 translate\n0.5 -0.5 scale\n"));
        assert!(eps.contains("(Wet Tropics Bar Chart) dup stringwidth pop 2 div neg 0 moveto show"));
        assert!(eps.contains("rectfill"));
        assert!(eps.ends_with("showpage\n%%EOF\n"));
    }
}

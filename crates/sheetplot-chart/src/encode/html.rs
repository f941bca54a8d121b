use quick_xml::escape::escape;

use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::ChartResult;
use crate::format::Format;
use crate::raster::RasterOptions;

/// HTML5 page with a heading and either the inline SVG or a table
pub(crate) struct HtmlEncoder;

impl Encoder for HtmlEncoder {
    fn format(&self) -> Format {
        Format::Html
    }

    fn encode(&self, chart: &Chart, _raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let heading = chart.heading();
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(heading.as_str())));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(heading.as_str())));

        match chart.svg() {
            Some(svg) => {
                // Inline SVG takes no XML declaration
                let start = svg.find("<svg").unwrap_or(0);
                html.push_str(&svg[start..]);
                html.push('\n');
            }
            None => html.push_str(&table(chart.data().records(&heading))),
        }

        html.push_str("</body>\n</html>\n");
        Ok(html.into_bytes())
    }
}

fn table(records: Vec<Vec<String>>) -> String {
    let mut out = String::from("<table>\n");
    for (r, record) in records.iter().enumerate() {
        out.push_str("<tr>");
        for (c, field) in record.iter().enumerate() {
            let tag = if r == 0 || c == 0 { "th" } else { "td" };
            out.push_str(&format!("<{tag}>{}</{tag}>", escape(field.as_str())));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

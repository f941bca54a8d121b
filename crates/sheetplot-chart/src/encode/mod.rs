//! Format encoders
//!
//! One stateless encoder per [`Format`]. Vector encoders read the scene and
//! SVG captured when the chart was built.

mod csv;
mod docx;
mod emf;
mod eps;
mod html;
mod png;
mod svg;

use crate::chart::Chart;
use crate::error::ChartResult;
use crate::format::Format;
use crate::raster::RasterOptions;

/// Turns a chart into the bytes of one format
pub trait Encoder: Send + Sync {
    fn format(&self) -> Format;

    fn encode(&self, chart: &Chart, raster: &RasterOptions) -> ChartResult<Vec<u8>>;
}

static CSV: csv::CsvEncoder = csv::CsvEncoder;
static DOCX: docx::DocxEncoder = docx::DocxEncoder;
static EMF: emf::EmfEncoder = emf::EmfEncoder;
static EPS: eps::EpsEncoder = eps::EpsEncoder;
static HTML: html::HtmlEncoder = html::HtmlEncoder;
static PNG: png::PngEncoder = png::PngEncoder;
static SVG: svg::SvgEncoder = svg::SvgEncoder;

/// The encoder registered for a format
pub fn encoder_for(format: Format) -> &'static dyn Encoder {
    match format {
        Format::Csv => &CSV,
        Format::Docx => &DOCX,
        Format::Emf => &EMF,
        Format::Html => &HTML,
        Format::Png => &PNG,
        Format::Svg => &SVG,
        Format::Eps => &EPS,
    }
}

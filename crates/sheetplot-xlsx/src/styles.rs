//! `xl/styles.xml` reading
//!
//! Only number formats are carried into the workbook model: the `numFmts`
//! table of custom codes and the `numFmtId` of each `cellXfs` entry.

use std::io::{BufReader, Read};

use ahash::AHashMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use sheetplot_core::NumberFormat;

use crate::error::{XlsxError, XlsxResult};

/// Number formats indexed by cell style (`s` attribute of `<c>`)
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedStyles {
    pub(crate) cell_formats: Vec<NumberFormat>,
}

impl ParsedStyles {
    /// Format for a cell style index; out-of-range indices read as General
    pub(crate) fn format_for(&self, style_idx: u32) -> NumberFormat {
        match self.cell_formats.get(style_idx as usize) {
            Some(format) => format.clone(),
            None => {
                log::warn!("cell style index {} out of bounds, using General", style_idx);
                NumberFormat::General
            }
        }
    }
}

impl Default for ParsedStyles {
    fn default() -> Self {
        Self {
            cell_formats: vec![NumberFormat::General],
        }
    }
}

pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<ParsedStyles> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut numfmts: AHashMap<u32, String> = AHashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"numFmt" => read_numfmt(&e, &mut numfmts),
                b"xf" if in_cell_xfs => xf_ids.push(xf_numfmt_id(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"numFmt" => read_numfmt(&e, &mut numfmts),
                b"xf" if in_cell_xfs => xf_ids.push(xf_numfmt_id(&e)),
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut cell_formats: Vec<NumberFormat> = xf_ids
        .into_iter()
        .map(|id| match numfmts.get(&id) {
            Some(code) => NumberFormat::from_code(code.as_str()),
            None => NumberFormat::from_id(id),
        })
        .collect();
    if cell_formats.is_empty() {
        cell_formats.push(NumberFormat::General);
    }

    Ok(ParsedStyles { cell_formats })
}

fn read_numfmt(e: &BytesStart<'_>, numfmts: &mut AHashMap<u32, String>) {
    let mut id = None;
    let mut code = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"numFmtId" => {
                id = attr
                    .unescape_value()
                    .ok()
                    .and_then(|s| s.parse::<u32>().ok());
            }
            b"formatCode" => {
                code = attr.unescape_value().ok().map(|s| s.to_string());
            }
            _ => {}
        }
    }
    if let (Some(id), Some(code)) = (id, code) {
        numfmts.insert(id, code);
    }
}

fn xf_numfmt_id(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok()?.parse::<u32>().ok())
        .unwrap_or(0)
}

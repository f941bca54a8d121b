//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, ParsedStyles};
use sheetplot_core::{CellAddress, CellData, CellError, CellValue, Workbook, Worksheet};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters XML cannot carry verbatim:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Raw state of one `<c>` element while it is being read
#[derive(Debug, Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
    inline_text: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let styles = Self::read_styles(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();

        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                log::warn!("sheet '{}' has no worksheet relationship {}", name, r_id);
                continue;
            };
            let mut worksheet = Worksheet::new(name.as_str());
            Self::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings, &styles)?;
            log::debug!(
                "read sheet '{}' from {}: {} cells",
                name,
                path,
                worksheet.cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        log::debug!(
            "read xlsx workbook: {} sheets, {} shared strings",
            workbook.sheet_count(),
            shared_strings.len()
        );

        Ok(workbook)
    }

    /// Read the shared strings table
    ///
    /// Rich-text runs are concatenated; phonetic runs (`<rPh>`) are skipped.
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<ParsedStyles> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(ParsedStyles::default()),
        }
    }

    /// Read workbook.xml to get sheet names and rIds, in workbook order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to the xl/ folder unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet part from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        styles: &ParsedStyles,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();

        // Rows and cells may omit their `r` attribute; positions then follow on
        let mut next_row: u32 = 0;
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = row_index(&e).unwrap_or(next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let pending = Self::start_cell(&e, current_row, next_col)?;
                        next_col = pending.address.map_or(next_col, |a| a.col + 1);
                        cell = Some(pending);
                    }
                    b"v" if cell.is_some() => in_value = true,
                    b"f" if cell.is_some() => in_formula = true,
                    b"t" if cell.is_some() => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = row_index(&e).unwrap_or(next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let pending = Self::start_cell(&e, current_row, next_col)?;
                        next_col = pending.address.map_or(next_col, |a| a.col + 1);
                        Self::process_cell(worksheet, pending, shared_strings, styles)?;
                    }
                    b"f" => {
                        // Shared formula child without its own text
                        log::trace!("shared formula reference without text, keeping cached value");
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some(pending) = cell.as_mut() {
                        if in_value {
                            pending
                                .value
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        } else if in_formula {
                            pending
                                .formula
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        } else if in_inline_text {
                            pending
                                .inline_text
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            Self::process_cell(worksheet, pending, shared_strings, styles)?;
                        }
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    fn start_cell(e: &BytesStart<'_>, row: u32, col: u16) -> XlsxResult<PendingCell> {
        let mut pending = PendingCell::default();

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    let reference = attr
                        .unescape_value()
                        .map_err(|e| XlsxError::Parse(e.to_string()))?;
                    let addr = CellAddress::parse(&reference).map_err(|e| {
                        XlsxError::Parse(format!("Invalid cell reference '{}': {}", reference, e))
                    })?;
                    pending.address = Some(addr);
                }
                b"t" => {
                    pending.cell_type = attr.unescape_value().ok().map(|s| s.to_string());
                }
                b"s" => {
                    pending.style = attr
                        .unescape_value()
                        .ok()
                        .and_then(|s| s.parse::<u32>().ok());
                }
                _ => {}
            }
        }

        if pending.address.is_none() {
            pending.address = Some(CellAddress::new(row, col));
        }

        Ok(pending)
    }

    /// Convert a finished `<c>` element into a stored cell
    ///
    /// A cell element with neither a value nor a formula is stored as blank.
    fn process_cell(
        worksheet: &mut Worksheet,
        cell: PendingCell,
        shared_strings: &[String],
        styles: &ParsedStyles,
    ) -> XlsxResult<()> {
        let Some(addr) = cell.address else {
            return Ok(());
        };
        let cell_type = cell.cell_type.as_deref();
        let value = match cell_type {
            Some("inlineStr") => cell.inline_text.or(cell.value),
            _ => cell.value,
        };

        let cell_value = match (cell.formula, value) {
            (Some(f), cached) => {
                let cached = match cached {
                    Some(v) => Some(Self::parse_value(cell_type, &v, shared_strings)?),
                    None => None,
                };
                let text = if f.starts_with('=') {
                    f
                } else {
                    format!("={}", f)
                };
                CellValue::Formula {
                    text,
                    cached_value: cached.map(Box::new),
                }
            }
            (None, Some(v)) => Self::parse_value(cell_type, &v, shared_strings)?,
            (None, None) => CellValue::Empty,
        };

        let number_format = styles.format_for(cell.style.unwrap_or(0));

        worksheet.set_cell_at(
            addr.row,
            addr.col,
            CellData::with_format(cell_value, number_format),
        )?;

        Ok(())
    }

    /// Interpret the text of a `<v>` (or inline `<t>`) according to the cell type
    fn parse_value(
        cell_type: Option<&str>,
        value: &str,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        Ok(match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }

            // Boolean
            Some("b") => {
                let v = value.trim();
                CellValue::Boolean(v == "1" || v.eq_ignore_ascii_case("true"))
            }

            // Error
            Some("e") => CellError::parse(value.trim())
                .map(CellValue::Error)
                .unwrap_or_else(|| CellValue::String(value.to_string())),

            // Inline or formula string
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(value.to_string()),
            },

            // Unknown type - treat as string
            Some(_) => CellValue::String(value.to_string()),
        })
    }
}

fn row_index(e: &BytesStart<'_>) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| attr.unescape_value().ok()?.parse::<u32>().ok())
        .map(|r| r.saturating_sub(1)) // 1-based to 0-based
}

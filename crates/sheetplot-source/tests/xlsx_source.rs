//! Selecting through an XLSX workbook loaded from disk

use std::io::Write;

use pretty_assertions::assert_eq;
use sheetplot_source::{DataSource, SelectionError, Spreadsheet, SpreadsheetKind};

const SHEET: &str = r#"<?xml version="1.0"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" s="1"><v>3</v></c><c r="C1"/></row>
<row r="2"><c r="A2" t="b"><v>0</v></c><c r="B2"><f>B1/0</f><v>0</v></c><c r="C2"><f>B1*2</f></c><c r="D2"><f>FORECAST(1,2)</f><v>7</v></c></row>
</sheetData></worksheet>"#;

fn write_xlsx(path: &std::path::Path) {
    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    let parts = [
        ("[Content_Types].xml", r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#),
        ("xl/workbook.xml", r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Coral Reef" sheetId="1" r:id="rId1"/><sheet name="Coral" sheetId="2" r:id="rId2"/></sheets></workbook>"#),
        ("xl/_rels/workbook.xml.rels", r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#),
        ("xl/styles.xml", r#"<styleSheet><numFmts count="1"><numFmt numFmtId="164" formatCode="0.00"/></numFmts><cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="164"/></cellXfs></styleSheet>"#),
        ("xl/sharedStrings.xml", r#"<sst><si><t>Coral cover</t></si></sst>"#),
        ("xl/worksheets/sheet1.xml", r#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>reef</t></is></c></row></sheetData></worksheet>"#),
        ("xl/worksheets/sheet2.xml", SHEET),
    ];
    for (name, content) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn select_from_xlsx_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reef.xlsx");
    write_xlsx(&path);

    let sheet = Spreadsheet::open(&path).unwrap();
    assert_eq!(sheet.kind(), SpreadsheetKind::Xlsx);
    let source = sheet.source();

    assert_eq!(source.select("Coral!A1").unwrap().to_string(), "Coral cover");
    assert_eq!(source.select("Reef!A1").unwrap().to_string(), "reef");

    let b1 = source.select("Coral!B1").unwrap();
    assert_eq!(b1.format("value").unwrap(), "3.0");
    assert_eq!(b1.to_string(), "3.00");

    assert_eq!(source.select("Coral!C1").unwrap().format("value").unwrap(), "");
    assert_eq!(source.select("Coral!A2").unwrap().format("value").unwrap(), "false");
    assert_eq!(source.select("Coral!B2").unwrap().format("value").unwrap(), "#DIV/0!");
    assert_eq!(source.select("Coral!C2").unwrap().format("value").unwrap(), "6.0");
    // unknown function falls back to the cached result
    assert_eq!(source.select("Coral!D2").unwrap().format("value").unwrap(), "7.0");

    assert_eq!(
        source.select("Coral!E2"),
        Err(SelectionError::CellNotFound {
            sheet: "Coral".into(),
            cell: "E2".into()
        })
    );
}

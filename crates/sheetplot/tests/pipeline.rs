//! End-to-end: bytes in, encoded charts out

use std::io::{Cursor, Read, Write};

use pretty_assertions::assert_eq;
use sheetplot::prelude::*;
use sheetplot::SpreadsheetKind;

const WET_TROPICS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>2019</v></c><c r="C1"><v>2020</v></c><c r="D1"><v>2021</v></c></row>
<row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>12.5</v></c><c r="C2"/><c r="D2"><f>B2*2</f><v>25</v></c></row>
<row r="3"><c r="A3" t="s"><v>2</v></c><c r="B3"><v>3</v></c><c r="C3"><v>4</v></c><c r="D3"><v>5</v></c></row>
</sheetData></worksheet>"#;

const FITZROY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="B1" t="inlineStr"><is><t>Inshore</t></is></c><c r="C1" t="inlineStr"><is><t>Offshore</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>Seagrass</t></is></c><c r="B2"><v>7</v></c><c r="C2"><v>9</v></c></row>
</sheetData></worksheet>"#;

fn xlsx_bytes() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    let parts = [
        ("[Content_Types].xml", r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#),
        ("xl/workbook.xml", r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Wet Tropics Coral" sheetId="1" r:id="rId1"/><sheet name="fitzroy" sheetId="2" r:id="rId2"/></sheets></workbook>"#),
        ("xl/_rels/workbook.xml.rels", r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#),
        ("xl/sharedStrings.xml", r#"<sst><si><t>Year</t></si><si><t>Hard coral</t></si><si><r><t>Soft </t></r><r><t>coral</t></r></si></sst>"#),
        ("xl/worksheets/sheet1.xml", WET_TROPICS),
        ("xl/worksheets/sheet2.xml", FITZROY),
    ];
    for (name, content) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn no_fonts() -> RasterOptions {
    RasterOptions {
        load_system_fonts: false,
    }
}

#[test]
fn test_csv_from_xlsx() {
    let sheet = Spreadsheet::from_bytes(&xlsx_bytes(), &LoadOptions::default()).unwrap();
    assert_eq!(sheet.kind(), SpreadsheetKind::Xlsx);
    let source = sheet.source();

    let request = ChartRequest::new(ChartType::Line, Format::Csv)
        .regions([Region::WetTropics, Region::Fitzroy]);
    let outputs = render_charts(&[&source], &request).unwrap();

    assert_eq!(
        std::str::from_utf8(outputs[0].content()).unwrap(),
        "Wet Tropics Line Chart,2019,2020,2021\r\nHard coral,12.5,,25\r\nSoft coral,3,4,5\r\n"
    );
    assert_eq!(
        std::str::from_utf8(outputs[1].content()).unwrap(),
        "Fitzroy Line Chart,Inshore,Offshore\r\nSeagrass,7,9\r\n"
    );
}

#[test]
fn test_every_format_for_bar_charts() {
    let sheet = Spreadsheet::from_bytes(&xlsx_bytes(), &LoadOptions::default()).unwrap();
    let source = sheet.source();

    for format in Format::ALL {
        let request = ChartRequest::new(ChartType::Bar, format)
            .region(Region::WetTropics)
            .dimensions(Dimensions::new(400, 0))
            .param("title", "Cover")
            .raster(no_fonts());
        let outputs = render_charts(&[&source], &request).unwrap();
        assert_eq!(outputs.len(), 1);
        let output = &outputs[0];
        assert_eq!(output.content_type(), format.content_type());

        let content = output.content();
        match format {
            Format::Svg => {
                let svg = std::str::from_utf8(content).unwrap();
                assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
                assert!(svg.contains("width=\"400\""));
                assert!(svg.contains("Wet Tropics Cover"));
            }
            Format::Png => {
                assert_eq!(&content[..8], b"\x89PNG\r\n\x1a\n");
                assert_eq!(sheetplot_chart::png_dimensions(content).map(|d| d.0), Some(400));
            }
            Format::Csv => assert!(content.starts_with(b"Wet Tropics Cover,2019,2020,2021\r\n")),
            Format::Html => {
                let html = std::str::from_utf8(content).unwrap();
                assert!(html.starts_with("<!DOCTYPE html>"));
                assert!(html.contains("<h1>Wet Tropics Cover</h1>"));
                assert!(html.contains("<svg"));
            }
            Format::Docx => {
                let mut archive = zip::ZipArchive::new(Cursor::new(content)).unwrap();
                let mut document = String::new();
                archive
                    .by_name("word/document.xml")
                    .unwrap()
                    .read_to_string(&mut document)
                    .unwrap();
                assert!(document.contains("Wet Tropics Cover"));
                assert!(archive.by_name("word/media/chart1.png").is_ok());
            }
            // EMR_HEADER type, then the " EMF" signature at offset 40
            Format::Emf => {
                assert_eq!(&content[..4], &1u32.to_le_bytes());
                assert_eq!(&content[40..44], &0x464D_4520u32.to_le_bytes());
            }
            Format::Eps => {
                let eps = std::str::from_utf8(content).unwrap();
                assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 400 "));
            }
        }
    }
}

#[test]
fn test_pie_of_second_series() {
    let sheet = Spreadsheet::from_bytes(&xlsx_bytes(), &LoadOptions::default()).unwrap();
    let source = sheet.source();

    let request = ChartRequest::new(ChartType::Pie, Format::Svg)
        .region(Region::WetTropics)
        .param("series", "2");
    let svg = render_charts(&[&source], &request).unwrap().remove(0);
    let svg = String::from_utf8(svg.into_content()).unwrap();
    assert!(svg.contains("Soft coral, 2019: 3"));
    assert!(!svg.contains("Hard coral, 2019"));

    let request = request.param("series", "3");
    assert!(matches!(
        render_charts(&[&source], &request),
        Err(ChartError::UnsupportedConfiguration(_))
    ));
}

#[test]
fn test_csv_source_with_sheet_param() {
    let csv = "Site,Q1,Q2\r\nReef flat,1.5,2\r\nSlope,,3\r\n";
    let sheet = Spreadsheet::from_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap();
    assert_eq!(sheet.kind(), SpreadsheetKind::Csv);
    let source = sheet.source();

    let request = ChartRequest::new(ChartType::Table, Format::Html).region(Region::BurnettMary);
    assert!(matches!(
        render_charts(&[&source], &request),
        Err(ChartError::UnsupportedConfiguration(_))
    ));

    let request = request.param("sheet", "Sheet1");
    let html = render_charts(&[&source], &request).unwrap().remove(0);
    let html = String::from_utf8(html.into_content()).unwrap();
    assert!(html.contains("<h1>Burnett Mary Table</h1>"));
    assert!(html.contains("<th>Reef flat</th>"));
    assert!(html.contains("<td></td>"));
}

#[test]
fn test_later_sources_fill_missing_regions() {
    let xlsx = Spreadsheet::from_bytes(&xlsx_bytes(), &LoadOptions::default()).unwrap();

    let mut wb = Workbook::empty();
    let idx = wb.add_worksheet_with_name("Cape York").unwrap();
    let ws = wb.worksheet_mut(idx).unwrap();
    ws.set_cell_value("B1", "2022").unwrap();
    ws.set_cell_value("A2", "Seagrass").unwrap();
    ws.set_cell_value("B2", 11.0).unwrap();

    let first = xlsx.source();
    let second = WorkbookSource::new(&wb);
    let request = ChartRequest::new(ChartType::StackedBar, Format::Csv)
        .regions([Region::Fitzroy, Region::CapeYork]);
    let outputs = render_charts(&[&first, &second], &request).unwrap();
    assert!(outputs[0].content().starts_with(b"Fitzroy Stacked Bar Chart,Inshore"));
    assert_eq!(
        outputs[1].content(),
        b"Cape York Stacked Bar Chart,2022\r\nSeagrass,11\r\n"
    );
}

#[test]
fn test_pipeline_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reef.xlsx");
    std::fs::write(&path, xlsx_bytes()).unwrap();

    let sheet = Spreadsheet::open(&path).unwrap();
    let source = sheet.source();
    let names = source.sheet_names();
    assert_eq!(names, vec!["Wet Tropics Coral".to_string(), "fitzroy".to_string()]);

    let request = ChartRequest::new(ChartType::Table, Format::Docx).region(Region::Fitzroy);
    let docx = render_charts(&[&source], &request).unwrap().remove(0);
    let mut archive = zip::ZipArchive::new(Cursor::new(docx.content())).unwrap();
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();
    assert_eq!(document.matches("<w:tr>").count(), 2);
    assert!(document.contains("Seagrass"));
}

use std::io::{Cursor, Seek, Write};

use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::{ChartError, ChartResult};
use crate::format::Format;
use crate::raster::{rasterize, RasterOptions};

/// English Metric Units per pixel at 96 dpi
const EMU_PER_PIXEL: u64 = 9525;

const IMAGE_PART: &str = "word/media/chart1.png";

/// WordprocessingML package with the heading and the chart as an inline
/// PNG, or the data as a table
pub(crate) struct DocxEncoder;

impl Encoder for DocxEncoder {
    fn format(&self) -> Format {
        Format::Docx
    }

    fn encode(&self, chart: &Chart, raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let picture = match (chart.svg(), chart.size()) {
            (Some(svg), Some(size)) => Some((rasterize(svg, raster)?, size)),
            _ => None,
        };

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        write_package(&mut zip, chart, picture.as_ref())
            .map_err(|e| ChartError::encoding("docx package", e))?;
        let cursor = zip
            .finish()
            .map_err(|e| ChartError::encoding("docx package", e))?;
        Ok(cursor.into_inner())
    }
}

fn write_package<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    chart: &Chart,
    picture: Option<&(Vec<u8>, (u32, u32))>,
) -> ZipResult<()> {
    write_content_types(zip)?;
    write_root_rels(zip)?;

    let body = match picture {
        Some((png, (width, height))) => {
            write_document_rels(zip)?;
            zip.start_file(IMAGE_PART, SimpleFileOptions::default())?;
            zip.write_all(png)?;
            inline_picture(*width, *height)
        }
        None => table(&chart.data().records(&chart.heading())),
    };
    write_document(zip, &chart.heading(), &body)
}

fn write_content_types<W: Write + Seek>(zip: &mut ZipWriter<W>) -> ZipResult<()> {
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())?;
    let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="png" ContentType="image/png"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> ZipResult<()> {
    zip.start_file("_rels/.rels", SimpleFileOptions::default())?;
    let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn write_document_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> ZipResult<()> {
    zip.start_file("word/_rels/document.xml.rels", SimpleFileOptions::default())?;
    let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/chart1.png"/>
</Relationships>"#;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn write_document<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    heading: &str,
    body: &str,
) -> ZipResult<()> {
    zip.start_file("word/document.xml", SimpleFileOptions::default())?;

    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">
<w:body>"#,
    );
    content.push_str(&format!(
        r#"
<w:p><w:r><w:rPr><w:b/><w:sz w:val="32"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(heading)
    ));
    content.push_str(body);
    content.push_str("\n<w:sectPr/>\n</w:body>\n</w:document>");

    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn inline_picture(width: u32, height: u32) -> String {
    let cx = width as u64 * EMU_PER_PIXEL;
    let cy = height as u64 * EMU_PER_PIXEL;
    format!(
        r#"
<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="1" name="Chart 1"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="chart1.png"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="rId1"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
    )
}

fn table(records: &[Vec<String>]) -> String {
    let mut content = String::from(
        r#"
<w:tbl><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4"/><w:left w:val="single" w:sz="4"/><w:bottom w:val="single" w:sz="4"/><w:right w:val="single" w:sz="4"/><w:insideH w:val="single" w:sz="4"/><w:insideV w:val="single" w:sz="4"/></w:tblBorders></w:tblPr>"#,
    );
    for record in records {
        content.push_str("\n<w:tr>");
        for field in record {
            content.push_str(&format!(
                r#"<w:tc><w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:tc>"#,
                escape_xml(field)
            ));
        }
        content.push_str("</w:tr>");
    }
    content.push_str("\n</w:tbl>\n<w:p/>");
    content
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimensions;
    use crate::encode::tests::{bar_chart, table_chart, NO_FONTS};
    use crate::raster::png_dimensions;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn part(docx: &[u8], name: &str) -> Option<Vec<u8>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = Vec::new();
        file.read_to_end(&mut out).unwrap();
        Some(out)
    }

    #[test]
    fn test_picture_document() {
        let chart = bar_chart(Dimensions::new(200, 100));
        let docx = DocxEncoder.encode(&chart, &NO_FONTS).unwrap();

        let png = part(&docx, IMAGE_PART).unwrap();
        assert_eq!(png_dimensions(&png), Some((200, 100)));

        let document = String::from_utf8(part(&docx, "word/document.xml").unwrap()).unwrap();
        assert!(document.contains(r#"<wp:extent cx="1905000" cy="952500"/>"#));
        assert!(document.contains(">Wet Tropics Bar Chart</w:t>"));
        assert!(part(&docx, "word/_rels/document.xml.rels").is_some());
        assert!(part(&docx, "[Content_Types].xml").is_some());
    }

    #[test]
    fn test_table_document() {
        let docx = DocxEncoder.encode(&table_chart(), &NO_FONTS).unwrap();
        assert_eq!(part(&docx, IMAGE_PART), None);

        let document = String::from_utf8(part(&docx, "word/document.xml").unwrap()).unwrap();
        assert_eq!(document.matches("<w:tr>").count(), 2);
        assert!(document.contains("Coral &amp; &quot;algae&quot;"));
    }
}

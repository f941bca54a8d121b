#![allow(dead_code)]

use sheetplot_chart::Region;
use sheetplot_core::{CellValue, Workbook};

/// One sheet per region: years 1-4 across, two series below
pub fn reef_workbook() -> Workbook {
    let mut wb = Workbook::empty();
    for (r, region) in Region::ALL.into_iter().enumerate() {
        let idx = wb.add_worksheet_with_name(region.label()).unwrap();
        let ws = wb.worksheet_mut(idx).unwrap();
        for year in 1..=4u16 {
            ws.set_cell_value_at(0, year, year as f64).unwrap();
        }
        for (s, name) in ["Coral", "Seagrass"].into_iter().enumerate() {
            let row = s as u32 + 1;
            ws.set_cell_value_at(row, 0, CellValue::string(name)).unwrap();
            for year in 1..=4u16 {
                let value = (r + 1) as f64 * year as f64 + s as f64 * 2.5;
                ws.set_cell_value_at(row, year, value).unwrap();
            }
        }
    }
    wb
}

/// `(width, height, viewBox width, viewBox height)` of the root `<svg>`
pub fn svg_box(svg: &str) -> (u32, u32, f64, f64) {
    let start = svg.find("<svg").unwrap();
    let end = start + svg[start..].find('>').unwrap();
    let root = &svg[start..end];
    let attr = |name: &str| {
        let key = format!(" {}=\"", name);
        let from = root.find(&key).unwrap() + key.len();
        let to = from + root[from..].find('"').unwrap();
        root[from..to].to_string()
    };
    let view: Vec<f64> = attr("viewBox")
        .split(' ')
        .map(|v| v.parse().unwrap())
        .collect();
    (
        attr("width").parse().unwrap(),
        attr("height").parse().unwrap(),
        view[2],
        view[3],
    )
}

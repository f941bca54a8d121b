//! Runs the `sheetplot` binary against files in a temporary directory

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const REEF_CSV: &str = "Site,2020,2021\r\nReef flat,1.5,2\r\nSlope,,3\r\n";

fn sheetplot(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sheetplot"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_input(dir: &Path) -> String {
    let path = dir.join("reef.csv");
    std::fs::write(&path, REEF_CSV).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_render_csv_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let out = sheetplot(&[
        "render", &input, "--chart", "bar", "--region", "wet-tropics", "--format", "csv",
        "--param", "sheet=Sheet1",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Wet Tropics Bar Chart,2020,2021\r\nReef flat,1.5,2\r\nSlope,,3\r\n"
    );
}

#[test]
fn test_render_one_file_per_region() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let charts = dir.path().join("charts");

    let out = sheetplot(&[
        "render",
        &input,
        "-c",
        "line",
        "-r",
        "gbr",
        "-r",
        "fitzroy",
        "--width",
        "300",
        "-p",
        "sheet=Sheet1",
        "--out-dir",
        charts.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    for key in ["gbr", "fitzroy"] {
        let svg = std::fs::read_to_string(charts.join(format!("{}.svg", key))).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"300\""));
    }
}

#[test]
fn test_render_png_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let png = dir.path().join("chart.png");

    let out = sheetplot(&[
        "render",
        &input,
        "-c",
        "pie",
        "-r",
        "burdekin",
        "--width",
        "200",
        "--height",
        "150",
        "-f",
        "png",
        "-p",
        "sheet=Sheet1",
        "--no-system-fonts",
        "-o",
        png.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 200);
    assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 150);
}

#[test]
fn test_render_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    // Region label has no matching sheet
    let out = sheetplot(&["render", &input, "-c", "bar", "-r", "gbr"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to render bar as SVG"));

    // Table charts have no vector output
    let out = sheetplot(&[
        "render", &input, "-c", "table", "-r", "gbr", "-f", "svg", "-p", "sheet=Sheet1",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not supported"));

    // Several regions need --out-dir
    let out = sheetplot(&["render", &input, "-c", "bar", "-r", "gbr", "-r", "fitzroy"]);
    assert!(!out.status.success());

    let out = sheetplot(&["render", &input, "-c", "donut", "-r", "gbr"]);
    assert!(!out.status.success());
}

#[test]
fn test_sheets_and_select() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let out = sheetplot(&["sheets", &input]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "0: Sheet1\n");

    let out = sheetplot(&["select", &input, "B1"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "2020\n");

    let out = sheetplot(&["select", &input, "Sheet1!B1", "--raw"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "2020.0\n");

    let out = sheetplot(&["select", &input, "Z99"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to resolve 'Z99'"));
}

#[test]
fn test_missing_input() {
    let out = sheetplot(&["sheets", "/nonexistent/reef.xlsx"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to open"));
}

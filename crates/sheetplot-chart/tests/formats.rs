mod common;

use common::reef_workbook;
use pretty_assertions::assert_eq;
use sheetplot_chart::{
    builder_for, ChartError, ChartParams, ChartType, Dimensions, Format, RasterOptions, Region,
};
use sheetplot_source::WorkbookSource;

const RASTER: RasterOptions = RasterOptions {
    load_system_fonts: false,
};

#[test]
fn test_table_format_support() {
    let wb = reef_workbook();
    let source = WorkbookSource::new(&wb);
    let chart = builder_for(ChartType::Table)
        .build(&[&source], &[Region::Fitzroy], Dimensions::auto(), &ChartParams::new())
        .unwrap()
        .remove(0);

    for format in Format::ALL {
        let result = chart.output_as_with(format, &RASTER);
        match format {
            Format::Csv | Format::Html | Format::Docx => {
                let rep = result.unwrap();
                assert!(!rep.content().is_empty());
                assert_eq!(rep.content_type(), format.content_type());
            }
            _ => assert!(matches!(
                result,
                Err(ChartError::UnsupportedFormat { chart_type: ChartType::Table, format: f }) if f == format
            )),
        }
    }
}

#[test]
fn test_vector_charts_support_every_format() {
    let wb = reef_workbook();
    let source = WorkbookSource::new(&wb);
    for chart_type in [ChartType::Bar, ChartType::StackedBar, ChartType::Line, ChartType::Pie] {
        let chart = builder_for(chart_type)
            .build(&[&source], &[Region::Burdekin], Dimensions::new(400, 0), &ChartParams::new())
            .unwrap()
            .remove(0);
        for format in Format::ALL {
            let rep = chart.output_as_with(format, &RASTER).unwrap();
            assert!(!rep.content().is_empty(), "{chart_type} {format}");
            assert_eq!(rep.content_type(), format.content_type());
        }
    }
}

#[test]
fn test_tooltip_injection() {
    let wb = reef_workbook();
    let source = WorkbookSource::new(&wb);

    let with = builder_for(ChartType::Line)
        .build(&[&source], &[Region::Gbr], Dimensions::auto(), &ChartParams::new())
        .unwrap()
        .remove(0);
    let svg = with.svg().unwrap();
    assert_eq!(svg.matches("<script").count(), 1);
    assert_eq!(svg.matches("onload=\"tooltipInit(evt)\"").count(), 1);
    assert_eq!(svg.matches("id=\"sheetplot-tooltip\"").count(), 1);
    assert_eq!(svg.matches("id=\"sheetplot-tooltip-bg\"").count(), 1);
    // one marker per value: 2 series x 4 years
    assert_eq!(svg.matches("onmouseout=\"tooltipHide(evt)\"").count(), 8);
    assert!(svg.contains("tooltipShow(evt, &apos;Coral, 1: 1&apos;)"));

    let without = builder_for(ChartType::Line)
        .build(
            &[&source],
            &[Region::Gbr],
            Dimensions::auto(),
            &ChartParams::new().with("tooltips", "false"),
        )
        .unwrap()
        .remove(0);
    let svg = without.svg().unwrap();
    assert!(!svg.contains("<script"));
    assert!(!svg.contains("sheetplot-tooltip"));
    assert!(!svg.contains("onmousemove"));
}

#[test]
fn test_sources_tried_in_order() {
    let empty = sheetplot_core::Workbook::new();
    let wb = reef_workbook();
    let first = WorkbookSource::new(&empty);
    let second = WorkbookSource::new(&wb);
    let charts = builder_for(ChartType::Table)
        .build(&[&first, &second], &[Region::CapeYork], Dimensions::auto(), &ChartParams::new())
        .unwrap();
    assert_eq!(charts[0].data().series.len(), 2);
}

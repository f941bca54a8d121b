mod common;

use common::{reef_workbook, svg_box};
use pretty_assertions::assert_eq;
use sheetplot_chart::{
    builder_for, png_dimensions, ChartParams, ChartType, Dimensions, Format, RasterOptions,
    Region,
};
use sheetplot_source::WorkbookSource;

const RASTER: RasterOptions = RasterOptions {
    load_system_fonts: false,
};

fn check(dimensions: Dimensions, expect: impl Fn((u32, u32, f64, f64))) {
    let wb = reef_workbook();
    let source = WorkbookSource::new(&wb);
    for chart_type in ChartType::ALL.into_iter().filter(|t| t.is_vector()) {
        let charts = builder_for(chart_type)
            .build(&[&source], &Region::ALL, dimensions, &ChartParams::new())
            .unwrap();
        assert_eq!(charts.len(), Region::ALL.len());

        for chart in &charts {
            let svg = chart.output_as(Format::Svg).unwrap();
            let svg = std::str::from_utf8(svg.content()).unwrap();
            let vector = svg_box(svg);
            expect(vector);

            let png = chart.output_as_with(Format::Png, &RASTER).unwrap();
            assert_eq!(
                png_dimensions(png.content()),
                Some((vector.0, vector.1)),
                "{} {}",
                chart_type,
                chart.region()
            );
        }
    }
}

#[test]
fn test_natural_size() {
    check(Dimensions::auto(), |(w, h, vw, vh)| {
        assert_eq!((w as f64, h as f64), (vw, vh));
    });
}

#[test]
fn test_height_only() {
    check(Dimensions::new(0, 200), |(w, h, _, _)| {
        assert_eq!(h, 200);
        assert!(w > 0);
    });
}

#[test]
fn test_width_only() {
    check(Dimensions::new(500, 0), |(w, h, vw, vh)| {
        assert_eq!(w, 500);
        assert!(h > 0);
        let expected = (500.0 * vh / vw).round() as u32;
        assert_eq!(h, expected.max(1));
    });
}

#[test]
fn test_both_given() {
    check(Dimensions::new(321, 123), |(w, h, vw, vh)| {
        assert_eq!((w, h), (321, 123));
        assert_eq!((vw, vh), (321.0, 123.0));
    });
}

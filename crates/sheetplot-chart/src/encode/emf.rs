//! Enhanced Metafile output
//!
//! One logical unit is one declared pixel. The reference device is a
//! 1920x1080 display at 96 dpi.

mod records;

use std::mem::size_of;

use zerocopy::{Immutable, IntoBytes};

use crate::chart::Chart;
use crate::encode::Encoder;
use crate::error::ChartResult;
use crate::format::Format;
use crate::raster::RasterOptions;
use crate::scene::{Anchor, Color, Element, Point, Scene, Shape, Stroke, StrokeStyle};

use records::*;

const NULL_BRUSH: u32 = 0x8000_0005;
const NULL_PEN: u32 = 0x8000_0008;
const SYSTEM_FONT: u32 = 0x8000_000D;

const PEN: u32 = 1;
const BRUSH: u32 = 2;
const FONT: u32 = 3;
const HANDLE_COUNT: u16 = 4;

const TRANSPARENT: u32 = 1;
const TA_BASELINE: u32 = 24;
const TA_CENTER: u32 = 6;
const TA_RIGHT: u32 = 2;
const PS_SOLID: u32 = 0;
const PS_DASH: u32 = 1;
const BS_SOLID: u32 = 0;
const GM_COMPATIBLE: u32 = 1;
const FW_NORMAL: i32 = 400;
const DEFAULT_CHARSET: u8 = 1;

pub(crate) struct EmfEncoder;

impl Encoder for EmfEncoder {
    fn format(&self) -> Format {
        Format::Emf
    }

    fn encode(&self, chart: &Chart, _raster: &RasterOptions) -> ChartResult<Vec<u8>> {
        let (scene, _) = chart.vector_content(Format::Emf)?;
        Ok(EmfWriter::new(scene).write(scene))
    }
}

struct EmfWriter {
    body: Vec<u8>,
    records: u32,
    sx: f64,
    sy: f64,
}

impl EmfWriter {
    fn new(scene: &Scene) -> Self {
        Self {
            body: Vec::new(),
            records: 0,
            sx: scene.width as f64 / scene.view_width,
            sy: scene.height as f64 / scene.view_height,
        }
    }

    fn write(mut self, scene: &Scene) -> Vec<u8> {
        self.push(&EmrSetValue::new(EMR_SETBKMODE, TRANSPARENT));
        for element in &scene.elements {
            self.element(element);
        }
        self.push(&EmrEof::new());

        let total = size_of::<EmrHeader>() + self.body.len();
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        let header = header(scene.width, scene.height, total, self.records + 1);
        let mut out = Vec::with_capacity(total as usize);
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    /// Append one record; `tail` is its variable part, already counted in
    /// the record's size
    fn push_with<R: IntoBytes + Immutable>(&mut self, record: &R, tail: &[u8]) {
        self.body.extend_from_slice(record.as_bytes());
        self.body.extend_from_slice(tail);
        self.records += 1;
    }

    fn push<R: IntoBytes + Immutable>(&mut self, record: &R) {
        self.push_with(record, &[]);
    }

    fn x(&self, v: f64) -> i32 {
        (v * self.sx).round() as i32
    }

    fn y(&self, v: f64) -> i32 {
        (v * self.sy).round() as i32
    }

    fn element(&mut self, element: &Element) {
        if let Shape::Text {
            x,
            y,
            text,
            size,
            anchor,
            rotation,
        } = &element.shape
        {
            self.text(*x, *y, text, *size, *anchor, *rotation, element.fill);
            return;
        }

        match element.fill {
            Some(color) => {
                let brush = LogBrush {
                    style: BS_SOLID,
                    color: colorref(color),
                    hatch: 0,
                };
                self.push(&EmrCreateBrushIndirect::new(BRUSH, brush));
                self.push(&EmrObject::select(BRUSH));
            }
            None => self.push(&EmrObject::select(NULL_BRUSH)),
        }
        match &element.stroke {
            Some(stroke) => {
                self.create_pen(stroke);
                self.push(&EmrObject::select(PEN));
            }
            None => self.push(&EmrObject::select(NULL_PEN)),
        }

        match &element.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => {
                let bounds =
                    RectL::new(self.x(*x), self.y(*y), self.x(x + width), self.y(y + height));
                self.push(&EmrBox::new(EMR_RECTANGLE, bounds));
            }
            Shape::Circle { cx, cy, r } => {
                let bounds =
                    RectL::new(self.x(cx - r), self.y(cy - r), self.x(cx + r), self.y(cy + r));
                self.push(&EmrBox::new(EMR_ELLIPSE, bounds));
            }
            Shape::Polyline(points) => self.poly(EMR_POLYLINE16, points),
            Shape::Polygon(points) => self.poly(EMR_POLYGON16, points),
            shape @ Shape::Wedge { .. } => {
                if let Some((points, _)) = shape.outline() {
                    self.poly(EMR_POLYGON16, &points);
                }
            }
            Shape::Text { .. } => {}
        }

        self.push(&EmrObject::select(NULL_BRUSH));
        self.push(&EmrObject::select(NULL_PEN));
        if element.fill.is_some() {
            self.push(&EmrObject::delete(BRUSH));
        }
        if element.stroke.is_some() {
            self.push(&EmrObject::delete(PEN));
        }
    }

    fn create_pen(&mut self, stroke: &Stroke) {
        let (style, width) = match &stroke.style {
            StrokeStyle::Basic { width, dash } => {
                (if dash.is_some() { PS_DASH } else { PS_SOLID }, *width)
            }
            StrokeStyle::Tapered { start, end } => (PS_SOLID, (start + end) / 2.0),
        };
        let width = ((width * self.sx).round() as i32).max(1);
        let pen = LogPen {
            style,
            width: PointL { x: width, y: 0 },
            color: colorref(stroke.color),
        };
        self.push(&EmrCreatePen::new(PEN, pen));
    }

    fn poly(&mut self, kind: u32, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        let scaled: Vec<PointS> = points
            .iter()
            .map(|p| PointS {
                x: clamp16(self.x(p.x)),
                y: clamp16(self.y(p.y)),
            })
            .collect();
        self.push_with(&EmrPoly16::new(kind, &scaled), scaled.as_bytes());
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        size: f64,
        anchor: Anchor,
        rotation: f64,
        fill: Option<Color>,
    ) {
        let escapement = -(rotation * 10.0).round() as i32;
        let font = LogFontW {
            height: -((size * self.sy).round() as i32).max(1),
            width: 0,
            escapement,
            orientation: escapement,
            weight: FW_NORMAL,
            italic: 0,
            underline: 0,
            strike_out: 0,
            char_set: DEFAULT_CHARSET,
            out_precision: 0,
            clip_precision: 0,
            quality: 0,
            pitch_and_family: 0,
            face_name: LogFontW::face("Arial"),
        };
        self.push(&EmrExtCreateFontIndirectW::new(FONT, font));
        self.push(&EmrObject::select(FONT));

        let align = TA_BASELINE
            | match anchor {
                Anchor::Start => 0,
                Anchor::Middle => TA_CENTER,
                Anchor::End => TA_RIGHT,
            };
        self.push(&EmrSetValue::new(EMR_SETTEXTALIGN, align));
        self.push(&EmrSetValue::new(
            EMR_SETTEXTCOLOR,
            colorref(fill.unwrap_or(Color::BLACK)).value,
        ));

        let units: Vec<u16> = text.encode_utf16().collect();
        let advance = ((size * self.sx * 0.6).round() as u32).max(1);
        let dx = vec![advance; units.len()];
        let mut tail = units.as_bytes().to_vec();
        tail.resize((tail.len() + 3) & !3, 0);
        let string_len = tail.len();
        tail.extend_from_slice(dx.as_bytes());

        let record = EmrExtTextOutW::new(
            PointL {
                x: self.x(x),
                y: self.y(y),
            },
            GM_COMPATIBLE,
            u32::try_from(units.len()).unwrap_or(u32::MAX),
            &tail[..string_len],
            &dx,
        );
        self.push_with(&record, &tail);

        self.push(&EmrObject::select(SYSTEM_FONT));
        self.push(&EmrObject::delete(FONT));
    }
}

fn header(width: u32, height: u32, total_bytes: u32, records: u32) -> EmrHeader {
    let (w, h) = (width as i32, height as i32);
    // Frame in hundredths of a millimetre at 96 dpi
    let frame = |px: i32| (px as f64 * 2540.0 / 96.0).round() as i32;

    EmrHeader {
        record_type: EMR_HEADER,
        record_size: size_of::<EmrHeader>() as u32,
        bounds: RectL::new(0, 0, w - 1, h - 1),
        frame: RectL::new(0, 0, frame(w), frame(h)),
        signature: ENHMETA_SIGNATURE,
        version: 0x0001_0000,
        bytes: total_bytes,
        records,
        handles: HANDLE_COUNT,
        reserved: 0,
        n_description: 0,
        off_description: 0,
        n_pal_entries: 0,
        device: SizeL { cx: 1920, cy: 1080 },
        millimeters: SizeL { cx: 508, cy: 286 },
        cb_pixel_format: 0,
        off_pixel_format: 0,
        open_gl: 0,
        micrometers: SizeL {
            cx: 508_000,
            cy: 285_750,
        },
    }
}

fn colorref(color: Color) -> ColorRef {
    ColorRef::from_rgb(color.r, color.g, color.b)
}

fn clamp16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

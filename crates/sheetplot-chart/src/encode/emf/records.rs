//! EMF record layouts written by the encoder
//!
//! Every record is a `#[repr(C)]` struct whose bytes are the little-endian
//! wire form; variable parts (points, strings, advances) follow the fixed
//! struct directly.

use std::mem::size_of;

use zerocopy::{FromBytes, Immutable, IntoBytes};

pub(crate) const EMR_HEADER: u32 = 1;
pub(crate) const EMR_EOF: u32 = 14;
pub(crate) const EMR_SETBKMODE: u32 = 18;
pub(crate) const EMR_SETTEXTALIGN: u32 = 22;
pub(crate) const EMR_SETTEXTCOLOR: u32 = 24;
pub(crate) const EMR_SELECTOBJECT: u32 = 37;
pub(crate) const EMR_CREATEPEN: u32 = 38;
pub(crate) const EMR_CREATEBRUSHINDIRECT: u32 = 39;
pub(crate) const EMR_DELETEOBJECT: u32 = 40;
pub(crate) const EMR_ELLIPSE: u32 = 42;
pub(crate) const EMR_RECTANGLE: u32 = 43;
pub(crate) const EMR_EXTCREATEFONTINDIRECTW: u32 = 82;
pub(crate) const EMR_EXTTEXTOUTW: u32 = 84;
pub(crate) const EMR_POLYGON16: u32 = 86;
pub(crate) const EMR_POLYLINE16: u32 = 87;

pub(crate) const ENHMETA_SIGNATURE: u32 = 0x464D_4520;

/// Size field for a record of fixed part `R` followed by `tail` bytes
fn record_size<R>(tail: usize) -> u32 {
    u32::try_from(size_of::<R>() + tail).unwrap_or(u32::MAX)
}

/// Type and size common to every record
#[cfg(test)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct RecordHeader {
    pub record_type: u32,
    pub record_size: u32,
}

/// POINTL
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct PointL {
    pub x: i32,
    pub y: i32,
}

/// POINTS
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct PointS {
    pub x: i16,
    pub y: i16,
}

/// RECTL, inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct RectL {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectL {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The "bounds not computed" rectangle
    pub fn unset() -> Self {
        Self::new(0, 0, -1, -1)
    }
}

/// SIZEL
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct SizeL {
    pub cx: i32,
    pub cy: i32,
}

/// COLORREF, 0x00BBGGRR
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct ColorRef {
    pub value: u32,
}

impl ColorRef {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: (r as u32) | ((g as u32) << 8) | ((b as u32) << 16),
        }
    }
}

/// EMR_HEADER without description or pixel format
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrHeader {
    pub record_type: u32,
    pub record_size: u32,
    pub bounds: RectL,
    /// Picture frame in hundredths of a millimetre
    pub frame: RectL,
    pub signature: u32,
    pub version: u32,
    pub bytes: u32,
    pub records: u32,
    pub handles: u16,
    pub reserved: u16,
    pub n_description: u32,
    pub off_description: u32,
    pub n_pal_entries: u32,
    /// Reference device in pixels
    pub device: SizeL,
    /// Reference device in millimetres
    pub millimeters: SizeL,
    pub cb_pixel_format: u32,
    pub off_pixel_format: u32,
    pub open_gl: u32,
    /// Reference device in micrometres
    pub micrometers: SizeL,
}

/// EMR_EOF with no palette
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrEof {
    pub record_type: u32,
    pub record_size: u32,
    pub n_pal_entries: u32,
    pub off_pal_entries: u32,
    pub n_size_last: u32,
}

impl EmrEof {
    pub fn new() -> Self {
        let size = record_size::<Self>(0);
        Self {
            record_type: EMR_EOF,
            record_size: size,
            n_pal_entries: 0,
            off_pal_entries: 16,
            n_size_last: size,
        }
    }
}

/// EMR_SETBKMODE, EMR_SETTEXTALIGN and EMR_SETTEXTCOLOR
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrSetValue {
    pub record_type: u32,
    pub record_size: u32,
    pub value: u32,
}

impl EmrSetValue {
    pub fn new(record_type: u32, value: u32) -> Self {
        Self {
            record_type,
            record_size: record_size::<Self>(0),
            value,
        }
    }
}

/// EMR_SELECTOBJECT and EMR_DELETEOBJECT
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrObject {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
}

impl EmrObject {
    pub fn select(object_index: u32) -> Self {
        Self::new(EMR_SELECTOBJECT, object_index)
    }

    pub fn delete(object_index: u32) -> Self {
        Self::new(EMR_DELETEOBJECT, object_index)
    }

    fn new(record_type: u32, object_index: u32) -> Self {
        Self {
            record_type,
            record_size: record_size::<Self>(0),
            object_index,
        }
    }
}

/// LOGPEN; only `width.x` is read
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct LogPen {
    pub style: u32,
    pub width: PointL,
    pub color: ColorRef,
}

/// EMR_CREATEPEN
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrCreatePen {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
    pub pen: LogPen,
}

impl EmrCreatePen {
    pub fn new(object_index: u32, pen: LogPen) -> Self {
        Self {
            record_type: EMR_CREATEPEN,
            record_size: record_size::<Self>(0),
            object_index,
            pen,
        }
    }
}

/// LOGBRUSH
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct LogBrush {
    pub style: u32,
    pub color: ColorRef,
    pub hatch: u32,
}

/// EMR_CREATEBRUSHINDIRECT
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrCreateBrushIndirect {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
    pub brush: LogBrush,
}

impl EmrCreateBrushIndirect {
    pub fn new(object_index: u32, brush: LogBrush) -> Self {
        Self {
            record_type: EMR_CREATEBRUSHINDIRECT,
            record_size: record_size::<Self>(0),
            object_index,
            brush,
        }
    }
}

/// EMR_RECTANGLE and EMR_ELLIPSE
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrBox {
    pub record_type: u32,
    pub record_size: u32,
    pub bounds: RectL,
}

impl EmrBox {
    pub fn new(record_type: u32, bounds: RectL) -> Self {
        Self {
            record_type,
            record_size: record_size::<Self>(0),
            bounds,
        }
    }
}

/// EMR_POLYLINE16 and EMR_POLYGON16; `count` [`PointS`] values follow
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrPoly16 {
    pub record_type: u32,
    pub record_size: u32,
    pub bounds: RectL,
    pub count: u32,
}

impl EmrPoly16 {
    pub fn new(record_type: u32, points: &[PointS]) -> Self {
        let bounds = RectL::new(
            points.iter().map(|p| p.x).min().unwrap_or(0).into(),
            points.iter().map(|p| p.y).min().unwrap_or(0).into(),
            points.iter().map(|p| p.x).max().unwrap_or(0).into(),
            points.iter().map(|p| p.y).max().unwrap_or(0).into(),
        );
        Self {
            record_type,
            record_size: record_size::<Self>(points.as_bytes().len()),
            bounds,
            count: u32::try_from(points.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Face name slots in a LOGFONTW
pub(crate) const LF_FACESIZE: usize = 32;

/// LOGFONTW
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct LogFontW {
    pub height: i32,
    pub width: i32,
    pub escapement: i32,
    pub orientation: i32,
    pub weight: i32,
    pub italic: u8,
    pub underline: u8,
    pub strike_out: u8,
    pub char_set: u8,
    pub out_precision: u8,
    pub clip_precision: u8,
    pub quality: u8,
    pub pitch_and_family: u8,
    pub face_name: [u16; LF_FACESIZE],
}

impl LogFontW {
    /// Face name as NUL-padded UTF-16, truncated to fit
    pub fn face(name: &str) -> [u16; LF_FACESIZE] {
        let mut face = [0u16; LF_FACESIZE];
        for (slot, unit) in face[..LF_FACESIZE - 1].iter_mut().zip(name.encode_utf16()) {
            *slot = unit;
        }
        face
    }
}

/// EMR_EXTCREATEFONTINDIRECTW carrying a plain LOGFONTW
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrExtCreateFontIndirectW {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
    pub font: LogFontW,
}

impl EmrExtCreateFontIndirectW {
    pub fn new(object_index: u32, font: LogFontW) -> Self {
        Self {
            record_type: EMR_EXTCREATEFONTINDIRECTW,
            record_size: record_size::<Self>(0),
            object_index,
            font,
        }
    }
}

/// EMRTEXT; offsets count from the start of the enclosing record
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrText {
    pub reference: PointL,
    pub chars: u32,
    pub off_string: u32,
    pub options: u32,
    pub rectangle: RectL,
    pub off_dx: u32,
}

/// EMR_EXTTEXTOUTW; the string and then the advance array follow
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
pub(crate) struct EmrExtTextOutW {
    pub record_type: u32,
    pub record_size: u32,
    pub bounds: RectL,
    pub graphics_mode: u32,
    pub ex_scale: f32,
    pub ey_scale: f32,
    pub text: EmrText,
}

impl EmrExtTextOutW {
    /// Text record for `string` (UTF-16 padded to four bytes) with one
    /// advance per character
    pub fn new(
        reference: PointL,
        graphics_mode: u32,
        chars: u32,
        string: &[u8],
        dx: &[u32],
    ) -> Self {
        let off_string = record_size::<Self>(0);
        let off_dx = record_size::<Self>(string.len());
        Self {
            record_type: EMR_EXTTEXTOUTW,
            record_size: record_size::<Self>(string.len() + dx.as_bytes().len()),
            bounds: RectL::unset(),
            graphics_mode,
            ex_scale: 1.0,
            ey_scale: 1.0,
            text: EmrText {
                reference,
                chars,
                off_string,
                options: 0,
                rectangle: RectL::unset(),
                off_dx,
            },
        }
    }
}

//! Dimension negotiation
//!
//! A requested size may leave either side unspecified. The chart's natural
//! size (computed per builder from its content) decides the missing side so
//! that the natural aspect ratio is kept.

/// One requested side of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    Pixels(u32),
    #[default]
    Auto,
}

impl Dimension {
    /// `0` means unspecified
    pub fn from_pixels(px: u32) -> Self {
        if px == 0 {
            Dimension::Auto
        } else {
            Dimension::Pixels(px)
        }
    }

    pub fn pixels(self) -> Option<u32> {
        match self {
            Dimension::Pixels(px) => Some(px),
            Dimension::Auto => None,
        }
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Dimension::from_pixels(px)
    }
}

/// A requested (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: Dimension,
    pub height: Dimension,
}

impl Dimensions {
    pub fn new<W: Into<Dimension>, H: Into<Dimension>>(width: W, height: H) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Both sides unspecified
    pub fn auto() -> Self {
        Self::default()
    }
}

/// Intrinsic content size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// The outcome of negotiation
///
/// `width`/`height` are the declared output size. The scene is laid out in
/// a `view_width` × `view_height` box which is scaled to the declared size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub view_width: f64,
    pub view_height: f64,
}

impl Layout {
    /// Horizontal and vertical scale from view box to declared size
    pub fn scale(&self) -> (f64, f64) {
        (
            self.width as f64 / self.view_width,
            self.height as f64 / self.view_height,
        )
    }
}

/// Fix the output size from a request and the natural size
pub fn negotiate(request: Dimensions, natural: Size) -> Layout {
    let nw = natural.width.max(1) as f64;
    let nh = natural.height.max(1) as f64;

    let layout = match (request.width, request.height) {
        (Dimension::Auto, Dimension::Auto) => Layout {
            width: natural.width.max(1),
            height: natural.height.max(1),
            view_width: nw,
            view_height: nh,
        },
        (Dimension::Pixels(w), Dimension::Auto) => Layout {
            width: w,
            height: derive_side(w, nh, nw),
            view_width: nw,
            view_height: nh,
        },
        (Dimension::Auto, Dimension::Pixels(h)) => Layout {
            width: derive_side(h, nw, nh),
            height: h,
            view_width: nw,
            view_height: nh,
        },
        // Both given: the layout reflows into the requested box
        (Dimension::Pixels(w), Dimension::Pixels(h)) => Layout {
            width: w,
            height: h,
            view_width: w as f64,
            view_height: h as f64,
        },
    };

    log::debug!(
        "negotiated {:?} against natural {}x{}: {}x{} (view box {}x{})",
        request,
        natural.width,
        natural.height,
        layout.width,
        layout.height,
        layout.view_width,
        layout.view_height
    );

    layout
}

fn derive_side(given: u32, numerator: f64, denominator: f64) -> u32 {
    let derived = (given as f64 * numerator / denominator).round();
    if derived < 1.0 {
        1
    } else if derived > u32::MAX as f64 {
        u32::MAX
    } else {
        derived as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auto_is_natural() {
        let layout = negotiate(Dimensions::auto(), Size::new(400, 330));
        assert_eq!((layout.width, layout.height), (400, 330));
        assert_eq!((layout.view_width, layout.view_height), (400.0, 330.0));
    }

    #[test]
    fn test_derived_sides_keep_aspect() {
        let natural = Size::new(400, 300);
        let layout = negotiate(Dimensions::new(800, 0), natural);
        assert_eq!((layout.width, layout.height), (800, 600));
        assert_eq!(layout.view_width, 400.0);

        let layout = negotiate(Dimensions::new(0, 150), natural);
        assert_eq!((layout.width, layout.height), (200, 150));

        let layout = negotiate(Dimensions::new(1, 0), Size::new(1000, 10));
        assert_eq!(layout.height, 1);
    }

    #[test]
    fn test_both_given_reflows() {
        let layout = negotiate(Dimensions::new(640, 200), Size::new(400, 300));
        assert_eq!((layout.width, layout.height), (640, 200));
        assert_eq!((layout.view_width, layout.view_height), (640.0, 200.0));
        assert_eq!(layout.scale(), (1.0, 1.0));
    }

    #[test]
    fn test_zero_means_auto() {
        assert_eq!(Dimension::from(0), Dimension::Auto);
        assert_eq!(Dimension::from(12).pixels(), Some(12));
    }
}

//! PNG rasterization of rendered SVG

use std::sync::Arc;

use once_cell::sync::Lazy;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use crate::error::{ChartError, ChartResult};

/// Loaded once on first use, then shared read-only
static SYSTEM_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("loaded {} system font faces", db.len());
    Arc::new(db)
});

static NO_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| Arc::new(fontdb::Database::new()));

/// Rasterizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Use system fonts for text; without them text is not drawn
    pub load_system_fonts: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
        }
    }
}

/// Rasterize an SVG document into a PNG of its declared size
pub fn rasterize(svg: &str, options: &RasterOptions) -> ChartResult<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb = if options.load_system_fonts {
        Arc::clone(&SYSTEM_FONTS)
    } else {
        Arc::clone(&NO_FONTS)
    };

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| ChartError::encoding("svg parse", e))?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        ChartError::encoding(
            "pixmap allocation",
            format!("{}x{}", size.width(), size.height()),
        )
    })?;

    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| ChartError::encoding("png encoding", e))
}

/// Width and height from a PNG's IHDR chunk
pub fn png_dimensions(png: &[u8]) -> Option<(u32, u32)> {
    if png.len() < 24 || &png[..8] != b"\x89PNG\r\n\x1a\n" || &png[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    Some((width, height))
}

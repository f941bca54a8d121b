//! # sheetplot-chart
//!
//! Charts built from spreadsheet data sources, rendered once into a vector
//! scene and encoded into any supported [`Format`].
//!
//! ```no_run
//! use sheetplot_chart::{builder_for, ChartParams, ChartType, Dimensions, Format, Region};
//! use sheetplot_source::Spreadsheet;
//!
//! let sheet = Spreadsheet::open("reef.xlsx")?;
//! let source = sheet.source();
//! let charts = builder_for(ChartType::Bar).build(
//!     &[&source],
//!     &[Region::WetTropics],
//!     Dimensions::new(640, 0),
//!     &ChartParams::new().with("y_label", "Cover (%)"),
//! )?;
//! let svg = charts[0].output_as(Format::Svg)?;
//! assert_eq!(svg.content_type(), "image/svg+xml; charset=utf-8");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builders;
pub mod chart;
pub mod data;
pub mod dimension;
pub mod encode;
pub mod error;
pub mod format;
pub mod params;
pub mod raster;
pub mod scene;
pub mod svg;
mod tooltip;
pub mod types;

pub use builders::{builder_for, ChartBuilder};
pub use chart::Chart;
pub use data::{DataBlock, Series};
pub use dimension::{negotiate, Dimension, Dimensions, Layout, Size};
pub use encode::{encoder_for, Encoder};
pub use error::{ChartError, ChartResult};
pub use format::{Format, Representation};
pub use params::{ChartParams, LineStyle};
pub use raster::{png_dimensions, RasterOptions};
pub use types::{ChartType, Region};

//! Prelude module - common imports for sheetplot users
//!
//! ```rust
//! use sheetplot::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    render_charts,
    // Chart types
    Chart,
    ChartError,
    ChartParams,
    ChartRequest,
    ChartType,
    // Cell types
    CellValue,
    // Data access
    DataSource,
    Dimensions,
    Format,
    LoadOptions,
    RasterOptions,
    Region,
    Representation,
    SelectionError,
    Spreadsheet,
    Value,
    // Main types
    Workbook,
    WorkbookSource,
    Worksheet,
};

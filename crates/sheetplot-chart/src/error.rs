//! Chart error types

use thiserror::Error;

use crate::format::Format;
use crate::types::ChartType;
use sheetplot_source::SelectionError;

/// Result type for chart operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while building or encoding charts
#[derive(Debug, Error)]
pub enum ChartError {
    /// The builder cannot produce a chart from these inputs
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The chart cannot be written in the requested format
    #[error("{format} output is not supported for {chart_type}")]
    UnsupportedFormat {
        chart_type: ChartType,
        format: Format,
    },

    /// A data cell could not be selected
    #[error("cannot select {selector}: {source}")]
    Selection {
        selector: String,
        #[source]
        source: SelectionError,
    },

    /// An internal encoding step failed; this is a defect, not bad input
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl ChartError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        ChartError::UnsupportedConfiguration(message.into())
    }

    /// Build an [`ChartError::Encoding`] and log it at the point of detection
    pub(crate) fn encoding<E: std::fmt::Display>(context: &str, err: E) -> Self {
        log::error!("{}: {}", context, err);
        ChartError::Encoding(format!("{}: {}", context, err))
    }
}

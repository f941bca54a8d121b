//! Output formats and representations

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Output kinds, each bound to one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Docx,
    Emf,
    Html,
    Png,
    Svg,
    Eps,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Csv,
        Format::Docx,
        Format::Emf,
        Format::Html,
        Format::Png,
        Format::Svg,
        Format::Eps,
    ];

    /// Canonical content type
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Csv => "text/csv; charset=utf-8",
            Format::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::Emf => "image/x-emf",
            Format::Html => "text/html; charset=utf-8",
            Format::Png => "image/png",
            Format::Svg => "image/svg+xml; charset=utf-8",
            Format::Eps => "image/x-eps",
        }
    }

    /// File extension, also the lowercase key
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Docx => "docx",
            Format::Emf => "emf",
            Format::Html => "html",
            Format::Png => "png",
            Format::Svg => "svg",
            Format::Eps => "eps",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(key))
            .or_else(|| key.eq_ignore_ascii_case("htm").then_some(Format::Html))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for Format {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ChartError::config(format!("unknown format '{}'", s)))
    }
}

/// Encoded chart output: content bytes plus content type
///
/// Never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    content: Vec<u8>,
    content_type: &'static str,
}

impl Representation {
    pub(crate) fn new(content: Vec<u8>, format: Format) -> Self {
        Self {
            content,
            content_type: format.content_type(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

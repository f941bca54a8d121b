//! Per-call chart parameters
//!
//! Parameters arrive as a string map. Each chart type recognizes a fixed set
//! of keys; keys it does not recognize are ignored.

use std::collections::BTreeMap;

use sheetplot_core::CellAddress;

use crate::error::{ChartError, ChartResult};
use crate::types::ChartType;

/// Named string parameters for one build call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartParams {
    values: BTreeMap<String, String>,
}

impl ChartParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ChartParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// How line series are stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    /// Width narrows along the line; has no stroke-attribute form
    Tapered,
}

/// Keys every chart type accepts
const COMMON_KEYS: &[&str] = &["title", "sheet", "start", "columns", "rows"];

/// Keys recognized by a chart type
pub fn recognized_keys(chart_type: ChartType) -> Vec<&'static str> {
    let extra: &[&str] = match chart_type {
        ChartType::Bar | ChartType::StackedBar => &["tooltips", "y_label", "max"],
        ChartType::Line => &["tooltips", "y_label", "max", "style"],
        ChartType::Pie => &["tooltips", "series"],
        ChartType::Table => &[],
    };
    COMMON_KEYS.iter().chain(extra).copied().collect()
}

/// Parameters resolved and validated for one chart type
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub sheet: Option<String>,
    pub start: CellAddress,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub tooltips: bool,
    pub y_label: Option<String>,
    pub max: Option<f64>,
    pub style: LineStyle,
    /// 1-based series row for pie charts
    pub series: usize,
}

impl Settings {
    pub fn resolve(chart_type: ChartType, params: &ChartParams) -> ChartResult<Self> {
        let keys = recognized_keys(chart_type);
        let get = |key: &str| {
            if keys.contains(&key) {
                params.get(key)
            } else {
                None
            }
        };

        for (key, _) in params.iter() {
            if !keys.contains(&key) {
                log::debug!("ignoring parameter '{}' for {}", key, chart_type.key());
            }
        }

        let start = match get("start") {
            Some(s) => CellAddress::parse(s)
                .map_err(|e| ChartError::config(format!("invalid start '{}': {}", s, e)))?,
            None => CellAddress::new(0, 0),
        };

        Ok(Self {
            title: get("title")
                .map(str::to_string)
                .unwrap_or_else(|| chart_type.label().to_string()),
            sheet: get("sheet").map(str::to_string),
            start,
            columns: get("columns").map(|v| positive("columns", v)).transpose()?,
            rows: get("rows").map(|v| positive("rows", v)).transpose()?,
            tooltips: match get("tooltips") {
                None => true,
                Some(v) if v.eq_ignore_ascii_case("true") => true,
                Some(v) if v.eq_ignore_ascii_case("false") => false,
                Some(v) => return Err(ChartError::config(format!("invalid tooltips '{}'", v))),
            },
            y_label: get("y_label").map(str::to_string),
            max: match get("max") {
                None => None,
                Some(v) => match v.trim().parse::<f64>() {
                    Ok(m) if m.is_finite() && m > 0.0 => Some(m),
                    _ => return Err(ChartError::config(format!("invalid max '{}'", v))),
                },
            },
            style: match get("style").map(str::trim) {
                None => LineStyle::Solid,
                Some(s) if s.eq_ignore_ascii_case("solid") => LineStyle::Solid,
                Some(s) if s.eq_ignore_ascii_case("dashed") => LineStyle::Dashed,
                Some(s) if s.eq_ignore_ascii_case("tapered") => LineStyle::Tapered,
                Some(s) => return Err(ChartError::config(format!("unknown style '{}'", s))),
            },
            series: get("series").map(|v| positive("series", v)).transpose()?.unwrap_or(1),
        })
    }
}

fn positive(key: &str, value: &str) -> ChartResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ChartError::config(format!("invalid {} '{}'", key, value))),
    }
}

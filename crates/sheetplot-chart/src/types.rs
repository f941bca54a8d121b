//! Chart types and regions

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// The closed set of chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Grouped vertical bars
    Bar,
    /// Vertical bars with series stacked per category
    StackedBar,
    Line,
    Pie,
    /// Tabular only; no vector rendering
    Table,
}

impl ChartType {
    pub const ALL: [ChartType; 5] = [
        ChartType::Bar,
        ChartType::StackedBar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Table,
    ];

    /// Stable lowercase key
    pub fn key(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::StackedBar => "stacked-bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Table => "table",
        }
    }

    /// Display label, used as the default chart title
    pub fn label(self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::StackedBar => "Stacked Bar Chart",
            ChartType::Line => "Line Chart",
            ChartType::Pie => "Pie Chart",
            ChartType::Table => "Table",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Whether this type renders a vector scene
    pub fn is_vector(self) -> bool {
        !matches!(self, ChartType::Table)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ChartError::config(format!("unknown chart type '{}'", s)))
    }
}

/// The closed set of regions a chart can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Gbr,
    CapeYork,
    WetTropics,
    Burdekin,
    MackayWhitsunday,
    Fitzroy,
    BurnettMary,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Gbr,
        Region::CapeYork,
        Region::WetTropics,
        Region::Burdekin,
        Region::MackayWhitsunday,
        Region::Fitzroy,
        Region::BurnettMary,
    ];

    /// Kebab-case key
    pub fn key(self) -> &'static str {
        match self {
            Region::Gbr => "gbr",
            Region::CapeYork => "cape-york",
            Region::WetTropics => "wet-tropics",
            Region::Burdekin => "burdekin",
            Region::MackayWhitsunday => "mackay-whitsunday",
            Region::Fitzroy => "fitzroy",
            Region::BurnettMary => "burnett-mary",
        }
    }

    /// Display label; also the default sheet name for the region's data
    pub fn label(self) -> &'static str {
        match self {
            Region::Gbr => "Great Barrier Reef",
            Region::CapeYork => "Cape York",
            Region::WetTropics => "Wet Tropics",
            Region::Burdekin => "Burdekin",
            Region::MackayWhitsunday => "Mackay Whitsunday",
            Region::Fitzroy => "Fitzroy",
            Region::BurnettMary => "Burnett Mary",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ChartError::config(format!("unknown region '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_round_trip() {
        for t in ChartType::ALL {
            assert_eq!(ChartType::from_key(t.key()), Some(t));
        }
        for r in Region::ALL {
            assert_eq!(r.key().parse::<Region>().unwrap(), r);
        }
        assert_eq!(ChartType::from_key("Stacked-Bar"), Some(ChartType::StackedBar));
        assert!("sunburst".parse::<ChartType>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Region::WetTropics.to_string(), "Wet Tropics");
        assert_eq!(ChartType::Bar.label(), "Bar Chart");
        assert!(!ChartType::Table.is_vector());
    }
}

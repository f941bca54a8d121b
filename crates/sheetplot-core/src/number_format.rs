//! Number formats and display formatting
//!
//! [`NumberFormat::format_value`] renders a cell the way a spreadsheet
//! application would show it: `General` numbers, fixed decimals, thousands
//! separators, percentages, scientific notation, dates and times in the 1900
//! date system, text sections and quoted literals. Formatting is a pure
//! function of the format and the value.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

use crate::cell::CellValue;

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format code
    Custom(String),
}

impl NumberFormat {
    /// 1 - 0
    pub const ID_NUMBER_INT: u32 = 1;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 3 - #,##0
    pub const ID_NUMBER_SEP: u32 = 3;
    /// 9 - 0%
    pub const ID_PERCENT_INT: u32 = 9;
    /// 10 - 0.00%
    pub const ID_PERCENT_DEC2: u32 = 10;
    /// 11 - 0.00E+00
    pub const ID_SCIENTIFIC: u32 = 11;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a format from a built-in ID (0 is General)
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// Create a format from a format code
    pub fn from_code<S: Into<String>>(code: S) -> Self {
        let code = code.into();
        if code.eq_ignore_ascii_case("general") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(code)
        }
    }

    /// Get the format code
    pub fn format_code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_code(*id).unwrap_or("General"),
            NumberFormat::Custom(s) => s,
        }
    }

    /// Get the code of a built-in format
    pub fn builtin_code(id: u32) -> Option<&'static str> {
        Some(match id {
            0 => "General",
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            12 => "# ?/?",
            13 => "# ??/??",
            14 => "mm-dd-yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            37 => "#,##0 ;(#,##0)",
            38 => "#,##0 ;[Red](#,##0)",
            39 => "#,##0.00;(#,##0.00)",
            40 => "#,##0.00;[Red](#,##0.00)",
            45 => "mm:ss",
            46 => "[h]:mm:ss",
            48 => "##0.0E+0",
            49 => "@",
            _ => return None,
        })
    }

    /// Check if the positive section of this format renders a date or time
    pub fn is_date_format(&self) -> bool {
        split_sections(self.format_code())
            .first()
            .map(|section| tokenize(section).iter().any(Token::is_date_part))
            .unwrap_or(false)
    }

    /// Render a number with this format
    pub fn format_number(&self, n: f64) -> String {
        let code = self.format_code();
        if code.eq_ignore_ascii_case("general") || !n.is_finite() {
            return format_general(n);
        }

        let sections = split_sections(code);
        let (section, value, minus) = match sections.len() {
            _ if n > 0.0 => (sections[0], n, false),
            1 => (sections[0], n.abs(), n < 0.0),
            2 => {
                if n < 0.0 {
                    (sections[1], n.abs(), false)
                } else {
                    (sections[0], n, false)
                }
            }
            _ => {
                if n < 0.0 {
                    (sections[1], n.abs(), false)
                } else {
                    (sections[2], 0.0, false)
                }
            }
        };

        let tokens = tokenize(section);
        let body = if tokens.iter().any(Token::is_date_part) {
            // a negative serial has no date; fall back like an unknown code
            match serial_to_datetime(value) {
                Some(dt) if !minus => render_date(&tokens, dt),
                _ => return format_general(n),
            }
        } else {
            render_number(&tokens, value)
        };

        if minus && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Render a string with this format's text section
    pub fn format_text(&self, text: &str) -> String {
        let sections = split_sections(self.format_code());
        let section = match sections.len() {
            4.. => sections[3],
            _ if sections[0].contains('@') => sections[0],
            _ => return text.to_string(),
        };

        tokenize(section)
            .into_iter()
            .map(|token| match token {
                Token::Text => text.to_string(),
                Token::Literal(s) => s,
                _ => String::new(),
            })
            .collect()
    }

    /// Render a cell value for display
    ///
    /// Formula cells render their cached result; callers that need a
    /// freshly evaluated result evaluate first and format that.
    pub fn format_value(&self, value: &CellValue) -> String {
        match value {
            CellValue::Empty => String::new(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Number(n) => self.format_number(*n),
            CellValue::String(s) => self.format_text(s),
            CellValue::Error(e) => e.as_str().to_string(),
            CellValue::Formula { cached_value, .. } => cached_value
                .as_deref()
                .map(|v| self.format_value(v))
                .unwrap_or_default(),
        }
    }
}

/// Format a number the way the `General` format does
///
/// Integers print without decimals, other values with up to ten significant
/// digits, and magnitudes outside `[1e-5, 1e11)` in scientific notation.
pub fn format_general(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return "#NUM!".to_string();
    }

    let abs = n.abs();
    if !(1e-5..1e11).contains(&abs) {
        let sci = format!("{:.5E}", n);
        let (mantissa, exponent) = sci.split_once('E').unwrap_or((&sci, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        return format!(
            "{}E{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        );
    }

    let magnitude = abs.log10().floor() as i32;
    let decimals = (9 - magnitude).clamp(0, 20) as usize;
    trim_fraction(&format!("{:.*}", decimals, round_half_away(n, decimals)))
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

fn round_half_away(v: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = v * factor;
    if scaled.is_finite() && scaled.abs() < 1e15 {
        scaled.round() / factor
    } else {
        v
    }
}

fn split_sections(code: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in code.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            ';' if !in_quote => {
                sections.push(&code[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&code[start..]);
    sections
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    /// `0`, `#` or `?`
    Digit(char),
    Point,
    Comma,
    Percent,
    Exponent { plus: bool },
    Text,
    General,
    /// Run of a date letter (`y`, `m`, `d`, `h`, `s`) and its length
    Date(char, usize),
    AmPm { long: bool },
}

impl Token {
    fn is_date_part(&self) -> bool {
        matches!(self, Token::Date(..) | Token::AmPm { .. })
    }
}

fn tokenize(section: &str) -> Vec<Token> {
    let chars: Vec<char> = section.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let rest: String = chars[i..].iter().take(7).collect::<String>().to_ascii_lowercase();
        match c {
            '"' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&ch| ch == '"')
                    .map(|p| i + 1 + p)
                    .unwrap_or(chars.len());
                tokens.push(Token::Literal(chars[i + 1..end].iter().collect()));
                i = end + 1;
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    tokens.push(Token::Literal(next.to_string()));
                }
                i += 2;
                continue;
            }
            '_' => {
                tokens.push(Token::Literal(" ".to_string()));
                i += 2;
                continue;
            }
            '*' => {
                i += 2;
                continue;
            }
            '[' => {
                let end = chars[i..]
                    .iter()
                    .position(|&ch| ch == ']')
                    .map(|p| i + p)
                    .unwrap_or(chars.len());
                let inner: String = chars[i + 1..end.min(chars.len())].iter().collect();
                if let Some(currency) = inner.strip_prefix('$') {
                    let symbol = currency.split('-').next().unwrap_or("");
                    tokens.push(Token::Literal(symbol.to_string()));
                } else if !inner.is_empty()
                    && inner.chars().all(|ch| matches!(ch.to_ascii_lowercase(), 'h' | 'm' | 's'))
                {
                    let letter = inner.chars().next().map(|ch| ch.to_ascii_lowercase());
                    if let Some(letter) = letter {
                        tokens.push(Token::Date(letter, inner.len()));
                    }
                }
                // colors and conditions carry no text
                i = end + 1;
                continue;
            }
            '0' | '#' | '?' => tokens.push(Token::Digit(c)),
            '.' => tokens.push(Token::Point),
            ',' => tokens.push(Token::Comma),
            '%' => tokens.push(Token::Percent),
            '@' => tokens.push(Token::Text),
            'E' | 'e' if matches!(chars.get(i + 1), Some('+') | Some('-')) => {
                tokens.push(Token::Exponent {
                    plus: chars[i + 1] == '+',
                });
                i += 2;
                continue;
            }
            _ if rest.starts_with("general") => {
                tokens.push(Token::General);
                i += 7;
                continue;
            }
            _ if rest.starts_with("am/pm") => {
                tokens.push(Token::AmPm { long: true });
                i += 5;
                continue;
            }
            _ if rest.starts_with("a/p") => {
                tokens.push(Token::AmPm { long: false });
                i += 3;
                continue;
            }
            _ if matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's') => {
                let letter = c.to_ascii_lowercase();
                let run = chars[i..]
                    .iter()
                    .take_while(|ch| ch.to_ascii_lowercase() == letter)
                    .count();
                tokens.push(Token::Date(letter, run));
                i += run;
                continue;
            }
            _ => tokens.push(Token::Literal(c.to_string())),
        }
        i += 1;
    }

    tokens
}

fn render_number(tokens: &[Token], value: f64) -> String {
    if tokens.iter().any(|t| *t == Token::General) {
        return tokens
            .iter()
            .map(|t| match t {
                Token::General => format_general(value),
                Token::Literal(s) => s.clone(),
                _ => String::new(),
            })
            .collect();
    }

    let exponent_at = tokens
        .iter()
        .position(|t| matches!(t, Token::Exponent { .. }));
    let mantissa_tokens = &tokens[..exponent_at.unwrap_or(tokens.len())];
    let point_at = mantissa_tokens.iter().position(|t| *t == Token::Point);
    let int_tokens = &mantissa_tokens[..point_at.unwrap_or(mantissa_tokens.len())];
    let frac_placeholders: Vec<char> = point_at
        .map(|p| {
            mantissa_tokens[p + 1..]
                .iter()
                .filter_map(|t| match t {
                    Token::Digit(d) => Some(*d),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let int_placeholders: Vec<char> = int_tokens
        .iter()
        .filter_map(|t| match t {
            Token::Digit(d) => Some(*d),
            _ => None,
        })
        .collect();
    let last_int_digit = int_tokens.iter().rposition(|t| matches!(t, Token::Digit(_)));
    let first_int_digit = int_tokens.iter().position(|t| matches!(t, Token::Digit(_)));
    let mut grouping = false;
    let mut scale_commas = 0;
    for (idx, token) in int_tokens.iter().enumerate() {
        if *token == Token::Comma {
            match (first_int_digit, last_int_digit) {
                (Some(first), Some(last)) if idx > first && idx < last => grouping = true,
                (Some(_), Some(last)) if idx > last => scale_commas += 1,
                _ => {}
            }
        }
    }

    let percents = tokens.iter().filter(|t| **t == Token::Percent).count();
    let mut v = value * 100f64.powi(percents as i32) / 1000f64.powi(scale_commas);

    let mut exponent = 0i32;
    if exponent_at.is_some() && v != 0.0 {
        let int_width = int_placeholders.len().max(1) as i32;
        exponent = v.abs().log10().floor() as i32 - (int_width - 1);
        v /= 10f64.powi(exponent);
        let rounded = round_half_away(v, frac_placeholders.len());
        if rounded.abs() >= 10f64.powi(int_width) {
            v /= 10.0;
            exponent += 1;
        }
    }

    let (int_str, frac_str) = digits_for(v, &int_placeholders, &frac_placeholders, grouping);
    let exponent_placeholders = exponent_at
        .map(|e| tokens[e + 1..].iter().filter(|t| matches!(t, Token::Digit(_))).count())
        .unwrap_or(0);

    let mut out = String::new();
    let mut integer_written = false;
    for (idx, token) in tokens.iter().enumerate() {
        let in_mantissa = exponent_at.map_or(true, |e| idx < e);
        match token {
            Token::Digit(_) | Token::Comma | Token::Point if in_mantissa && !integer_written => {
                out.push_str(&int_str);
                integer_written = true;
                if *token == Token::Point {
                    out.push('.');
                    out.push_str(&frac_str);
                }
            }
            Token::Point if in_mantissa => {
                out.push('.');
                out.push_str(&frac_str);
            }
            Token::Exponent { plus } => {
                if !integer_written {
                    out.push_str(&int_str);
                    integer_written = true;
                }
                out.push('E');
                if exponent < 0 {
                    out.push('-');
                } else if *plus {
                    out.push('+');
                }
                out.push_str(&format!(
                    "{:0width$}",
                    exponent.abs(),
                    width = exponent_placeholders.max(1)
                ));
            }
            Token::Literal(s) => out.push_str(s),
            Token::Percent => out.push('%'),
            Token::Text => out.push_str(&format_general(value)),
            _ => {}
        }
    }
    out
}

/// Integer and fraction digit strings for `v` (non-negative)
fn digits_for(v: f64, int_ph: &[char], frac_ph: &[char], grouping: bool) -> (String, String) {
    let decimals = frac_ph.len();
    let fixed = format!("{:.*}", decimals, round_half_away(v.abs(), decimals));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));

    let min_int = int_ph.iter().filter(|&&c| c == '0').count();
    let mut int_digits = if int_part == "0" && min_int == 0 {
        String::new()
    } else {
        int_part.to_string()
    };
    while int_digits.len() < min_int {
        int_digits.insert(0, '0');
    }
    let pad = int_ph.iter().filter(|&&c| c == '?').count();
    if int_digits.is_empty() && pad > 0 {
        int_digits.push(' ');
    }
    if grouping {
        int_digits = group_thousands(&int_digits);
    }

    let mut frac: Vec<char> = frac_part.chars().collect();
    for (pos, placeholder) in frac_ph.iter().enumerate().rev() {
        if frac.get(pos) != Some(&'0') {
            break;
        }
        match placeholder {
            '#' => {
                frac.truncate(pos);
            }
            '?' => frac[pos] = ' ',
            _ => break,
        }
    }

    (int_digits, frac.into_iter().collect())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 && c.is_ascii_digit() {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Convert a 1900-system serial date to a date and time
///
/// Serial 60 is the nonexistent 1900-02-29 and renders as 1900-02-28.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let mut days = serial.trunc() as u64;
    let mut seconds = ((serial - serial.trunc()) * 86_400.0).round() as u32;
    if seconds >= 86_400 {
        seconds -= 86_400;
        days += 1;
    }

    let date = match days {
        0..=59 => NaiveDate::from_ymd_opt(1899, 12, 31)?.checked_add_days(Days::new(days))?,
        60 => NaiveDate::from_ymd_opt(1900, 2, 28)?,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(days))?,
    };
    date.and_hms_opt(seconds / 3600, (seconds / 60) % 60, seconds % 60)
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn render_date(tokens: &[Token], dt: NaiveDateTime) -> String {
    let twelve_hour = tokens.iter().any(|t| matches!(t, Token::AmPm { .. }));
    let date_letters: Vec<(usize, char)> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match t {
            Token::Date(letter, _) => Some((i, *letter)),
            _ => None,
        })
        .collect();

    // `m`/`mm` right after an hour or right before a second is a minute
    let is_minute = |idx: usize| {
        let pos = date_letters.iter().position(|(i, _)| *i == idx);
        pos.map_or(false, |p| {
            let prev = p.checked_sub(1).map(|q| date_letters[q].1);
            let next = date_letters.get(p + 1).map(|(_, l)| *l);
            prev == Some('h') || next == Some('s')
        })
    };

    let mut out = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Date('y', n) => {
                if *n <= 2 {
                    out.push_str(&format!("{:02}", dt.year() % 100));
                } else {
                    out.push_str(&format!("{:04}", dt.year()));
                }
            }
            Token::Date('m', n) if *n <= 2 && is_minute(idx) => {
                out.push_str(&pad(dt.minute(), *n));
            }
            Token::Date('m', n) => {
                let name = MONTHS[dt.month0() as usize];
                match n {
                    1 | 2 => out.push_str(&pad(dt.month(), *n)),
                    3 => out.push_str(&name[..3]),
                    5 => out.push_str(&name[..1]),
                    _ => out.push_str(name),
                }
            }
            Token::Date('d', n) => {
                let name = WEEKDAYS[dt.weekday().num_days_from_monday() as usize];
                match n {
                    1 | 2 => out.push_str(&pad(dt.day(), *n)),
                    3 => out.push_str(&name[..3]),
                    _ => out.push_str(name),
                }
            }
            Token::Date('h', n) => {
                let hour = if twelve_hour {
                    match dt.hour() % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    dt.hour()
                };
                out.push_str(&pad(hour, *n));
            }
            Token::Date('s', n) => out.push_str(&pad(dt.second(), *n)),
            Token::AmPm { long } => {
                let pm = dt.hour() >= 12;
                out.push_str(match (long, pm) {
                    (true, false) => "AM",
                    (true, true) => "PM",
                    (false, false) => "A",
                    (false, true) => "P",
                });
            }
            Token::Literal(s) => out.push_str(s),
            Token::Point => out.push('.'),
            Token::Digit(_) => out.push('0'),
            _ => {}
        }
    }
    out
}

fn pad(value: u32, width: usize) -> String {
    if width >= 2 {
        format!("{:02}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(code: &str, n: f64) -> String {
        NumberFormat::from_code(code).format_number(n)
    }

    #[test]
    fn test_general() {
        assert_eq!(format_general(3.0), "3");
        assert_eq!(format_general(-2.5), "-2.5");
        assert_eq!(format_general(0.1 + 0.2), "0.3");
        assert_eq!(format_general(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_general(1234567.891), "1234567.891");
        assert_eq!(format_general(1e12), "1E+12");
        assert_eq!(format_general(123456789012.0), "1.23457E+11");
        assert_eq!(format_general(0.00000000012), "1.2E-10");
        assert_eq!(format_general(1e-7), "1E-07");
        assert_eq!(format_general(-0.0000012), "-1.2E-06");
        assert_eq!(format_general(0.00001), "0.00001");
        assert_eq!(format_general(0.0001234), "0.0001234");
    }

    #[test]
    fn test_fixed_and_grouped() {
        assert_eq!(fmt("0", 2.5), "3");
        assert_eq!(fmt("0.00", 3.14159), "3.14");
        assert_eq!(fmt("#,##0", 1234567.4), "1,234,567");
        assert_eq!(fmt("#,##0.00", -1234.5), "-1,234.50");
        assert_eq!(fmt("0.0#", 1.5), "1.5");
        assert_eq!(fmt("#.00", 0.5), ".50");
        assert_eq!(NumberFormat::BuiltIn(3).format_number(999.0), "999");
    }

    #[test]
    fn test_percent_and_scientific() {
        assert_eq!(fmt("0%", 0.256), "26%");
        assert_eq!(fmt("0.00%", 0.256), "25.60%");
        assert_eq!(fmt("0.00E+00", 12345.0), "1.23E+04");
        assert_eq!(fmt("0.00E+00", 0.00012), "1.20E-04");
        assert_eq!(fmt("0.00E+00", 0.0), "0.00E+00");
    }

    #[test]
    fn test_sections_and_literals() {
        assert_eq!(fmt("#,##0;(#,##0)", -1234.0), "(1,234)");
        assert_eq!(fmt("0;-0;\"zero\"", 0.0), "zero");
        assert_eq!(fmt("\"$\"#,##0.00", 1234.5), "$1,234.50");
        assert_eq!(fmt("[Red]0.0", -1.25), "-1.3");
        assert_eq!(fmt("0.0 \"t\"", 12.0), "12.0 t");
    }

    #[test]
    fn test_dates_and_times() {
        assert_eq!(NumberFormat::BuiltIn(14).format_number(45000.0), "03-15-23");
        assert_eq!(NumberFormat::BuiltIn(15).format_number(45000.0), "15-Mar-23");
        assert_eq!(NumberFormat::BuiltIn(20).format_number(0.75), "18:00");
        assert_eq!(NumberFormat::BuiltIn(18).format_number(0.75), "6:00 PM");
        assert_eq!(fmt("yyyy-mm-dd hh:mm:ss", 45000.5), "2023-03-15 12:00:00");
        assert_eq!(fmt("dddd d mmmm yyyy", 45000.0), "Wednesday 15 March 2023");
        assert_eq!(fmt("d-mmm-yyyy", 61.0), "1-Mar-1900");
        assert!(NumberFormat::BuiltIn(14).is_date_format());
        assert!(!NumberFormat::BuiltIn(4).is_date_format());
    }

    #[test]
    fn test_values_and_text() {
        let general = NumberFormat::General;
        assert_eq!(general.format_value(&CellValue::Empty), "");
        assert_eq!(general.format_value(&CellValue::Boolean(true)), "TRUE");
        assert_eq!(general.format_value(&CellValue::Number(3.0)), "3");
        assert_eq!(general.format_value(&CellValue::string("abc")), "abc");
        assert_eq!(
            general.format_value(&CellValue::Error(crate::CellError::Div0)),
            "#DIV/0!"
        );
        assert_eq!(
            NumberFormat::from_code("0;0;0;\"pre \"@").format_value(&CellValue::string("x")),
            "pre x"
        );
        assert_eq!(NumberFormat::BuiltIn(49).format_value(&CellValue::string("x")), "x");
    }

    #[test]
    fn test_unknown_builtin_falls_back_to_general() {
        assert_eq!(NumberFormat::BuiltIn(999).format_number(2.5), "2.5");
        assert_eq!(NumberFormat::from_id(0), NumberFormat::General);
    }
}

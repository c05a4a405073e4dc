//! Month/year matching for `dd/MM/yyyy` date strings.
//!
//! The layout is fixed: three `/`-separated decimal fields. No calendar
//! validation is performed, so `31/02/2023` parses as day 31 of February.

use crate::utils::error::{DateParseError, Segment};
use serde::{Deserialize, Serialize};

/// A parsed date with a zero-based month (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

/// Parses `date` into its day, zero-based month and year.
///
/// The year segment runs from the second `/` to the end of the first line,
/// so `15/6/2023/extra` still yields year 2023. Each segment follows C-style
/// integer conversion: leading whitespace and a sign are accepted and parsing
/// stops at the first non-digit.
pub fn parse_date(date: &str) -> Result<DateParts, DateParseError> {
    let (day_part, month_part, year_part) = split_segments(date)?;

    let day = parse_segment(Segment::Day, day_part)?;
    let month = parse_segment(Segment::Month, month_part)?
        .checked_sub(1)
        .ok_or_else(|| DateParseError::OutOfRange {
            segment: Segment::Month,
            value: month_part.to_string(),
        })?;
    let year = parse_segment(Segment::Year, year_part)?;

    Ok(DateParts { day, month, year })
}

/// Reports whether `date` falls in `selected_month` (zero-based) of
/// `selected_year`.
///
/// `selected_day` is accepted for call-site compatibility and never compared.
/// Any malformed input yields `false`.
pub fn matches(date: &str, selected_day: i32, selected_month: i32, selected_year: i32) -> bool {
    try_matches(date, selected_day, selected_month, selected_year).unwrap_or(false)
}

/// Like [`matches`], but surfaces why a malformed date could not be compared.
pub fn try_matches(
    date: &str,
    _selected_day: i32,
    selected_month: i32,
    selected_year: i32,
) -> Result<bool, DateParseError> {
    let parts = parse_date(date)?;
    Ok(parts.year == selected_year && parts.month == selected_month)
}

/// A fixed match query, for callers that test many dates against one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMonthMatcher {
    pub selected_day: i32,
    pub selected_month: i32,
    pub selected_year: i32,
}

impl DateMonthMatcher {
    pub fn new(selected_day: i32, selected_month: i32, selected_year: i32) -> Self {
        Self {
            selected_day,
            selected_month,
            selected_year,
        }
    }

    pub fn matches(&self, date: &str) -> bool {
        matches(date, self.selected_day, self.selected_month, self.selected_year)
    }

    pub fn try_matches(&self, date: &str) -> Result<bool, DateParseError> {
        try_matches(date, self.selected_day, self.selected_month, self.selected_year)
    }

    /// Keeps the items whose date, as extracted by `date_of`, matches.
    pub fn filter<'a, T, I, F>(&self, items: I, date_of: F) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> &str,
    {
        items
            .into_iter()
            .filter(|item| self.matches(date_of(item)))
            .collect()
    }
}

fn split_segments(date: &str) -> Result<(&str, &str, &str), DateParseError> {
    let missing = |segment| DateParseError::MissingSegment {
        date: date.to_string(),
        segment,
    };

    let (day, rest) = match date.split_once('/') {
        Some(split) => split,
        None if date.is_empty() => return Err(missing(Segment::Day)),
        None => return Err(missing(Segment::Month)),
    };
    if rest.is_empty() {
        return Err(missing(Segment::Month));
    }

    let (month, rest) = rest.split_once('/').ok_or_else(|| missing(Segment::Year))?;
    if rest.is_empty() {
        return Err(missing(Segment::Year));
    }

    let year = rest.split_once('\n').map_or(rest, |(line, _)| line);
    Ok((day, month, year))
}

fn parse_segment(segment: Segment, text: &str) -> Result<i32, DateParseError> {
    let trimmed = text.trim_start_matches([' ', '\t', '\n', '\x0b', '\x0c', '\r']);
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digit_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return Err(DateParseError::InvalidNumber {
            segment,
            value: text.to_string(),
        });
    }

    // only overflow can fail once a digit run is present
    trimmed[..sign_len + digit_len]
        .parse::<i32>()
        .map_err(|_| DateParseError::OutOfRange {
            segment,
            value: text.to_string(),
        })
}

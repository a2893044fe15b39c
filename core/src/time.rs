use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub const MIN_VALID_YEAR: i32 = 1900;
pub const MAX_VALID_YEAR: i32 = 2100;

/// chrono format string for the canonical `YYYY-MM-DD` date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Returns true when `input` is a real calendar date in `YYYY-MM-DD` form
/// with a year between [`MIN_VALID_YEAR`] and [`MAX_VALID_YEAR`].
pub fn is_valid_date(input: &str) -> bool {
    parse_calendar_date(input).is_some()
}

pub fn is_valid_year_month(year: i32, month: u32) -> bool {
    (MIN_VALID_YEAR..=MAX_VALID_YEAR).contains(&year) && (1..=12).contains(&month)
}

pub(crate) fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_only = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_only {
        return None;
    }

    let year: i32 = input[0..4].parse().ok()?;
    let month: u32 = input[5..7].parse().ok()?;
    let day: u32 = input[8..10].parse().ok()?;

    if !is_valid_year_month(year, month) || !(1..=31).contains(&day) {
        return None;
    }

    // from_ymd_opt refuses Feb 30, Apr 31 and friends
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

pub fn parse_human_date(input: &str) -> Result<NaiveDate> {
    parse_human_date_from(input, Local::now().date_naive())
}

/// Resolves `today`, `yesterday`, `-Nd` / `+Nd` or an explicit `YYYY-MM-DD`
/// against the given anchor day.
pub fn parse_human_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if input.starts_with('-') || input.starts_with('+') {
        let (sign, rest) = input.split_at(1);
        let num_str = rest
            .strip_suffix('d')
            .ok_or_else(|| anyhow!("Unknown unit in relative date: {}", input))?;
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative date: {}", input))?;
        let offset = if sign == "-" { -count } else { count };
        return today
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| anyhow!("Relative date out of range: {}", input));
    }

    parse_calendar_date(input).ok_or_else(|| anyhow!("Could not parse date: {}", input))
}

/// Number of blank cells before day 1 in a Sunday-first week grid.
pub fn first_weekday_offset(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday().num_days_from_sunday())
}

//! Loose statement-date parsing.
//!
//! Banks print transaction dates as `d/m/yy`, `d-m-yyyy` or `d Mon yyyy`
//! with no padding guarantees. Anything else is unparsable, which callers
//! treat as a per-row condition rather than an abort.

use chrono::NaiveDate;

/// Parse a loosely formatted statement date.
///
/// Two-digit years mean 2000+yy (statements predating 2000 do not reach
/// this engine).
pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_numeric(s, '/')
        .or_else(|| parse_numeric(s, '-'))
        .or_else(|| parse_day_month_name(s))
}

fn parse_numeric(s: &str, sep: char) -> Option<NaiveDate> {
    let mut it = s.split(sep);
    let day: u32 = it.next()?.trim().parse().ok()?;
    let month: u32 = it.next()?.trim().parse().ok()?;
    let year_raw = it.next()?.trim();
    if it.next().is_some() {
        return None;
    }
    let year: i32 = match year_raw.len() {
        2 => 2000 + year_raw.parse::<i32>().ok()?,
        4 => year_raw.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_day_month_name(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month = month_number(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month from a name or its 3-letter prefix, case-insensitive.
fn month_number(name: &str) -> Option<u32> {
    if name.len() < 3 || !name.is_char_boundary(3) {
        return None;
    }
    let month = match name[..3].to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

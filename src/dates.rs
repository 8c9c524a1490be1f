//! Spanish date text handling.
//!
//! Bulletins write dates as free text (`"30 de mayo"`, `"1 enero"`). This module maps
//! month names to numbers, renders the canonical `"{day} de {month}"` form, and exposes
//! the two date patterns shared by every parser.

use chrono::NaiveDate;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Month names in calendar order; index + 1 is the month number.
pub const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Alternation of all month names, for embedding in larger patterns.
pub const MONTH_ALTERNATION: &str =
    "enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|octubre|noviembre|diciembre";

static DATE_WITH_DE_REGEX: OnceLock<Regex> = OnceLock::new();
static LOOSE_DATE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A date found in bulletin text together with its canonical Spanish rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanishDate {
    pub date: NaiveDate,
    pub text: String,
}

/// Returns the month number (1-12) for a Spanish month name, ignoring case.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}

/// Returns the Spanish name of a month number (1-12).
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Renders the canonical `"{day} de {month}"` text, e.g. `"30 de mayo"`.
pub fn date_text(day: u32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{day} de {name}"),
        None => format!("{day}/{month}"),
    }
}

/// Builds a [`SpanishDate`] when `day`/`month` form a valid date in `year`.
pub fn spanish_date(year: i32, month: u32, day: u32) -> Option<SpanishDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(SpanishDate {
        date,
        text: date_text(day, month),
    })
}

/// Finds the first `"{day} de {month}"` occurrence in `text` (case-insensitive).
///
/// Returns the date and the byte range of the match inside `text`, so callers can cut
/// the date out of the surrounding description. Matches that do not form a valid
/// calendar date in `year` are skipped.
pub fn find_date_with_de(text: &str, year: i32) -> Option<(SpanishDate, Range<usize>)> {
    let re = DATE_WITH_DE_REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?i)(\d{{1,2}})\s+de\s+({MONTH_ALTERNATION})"))
            .expect("date-with-de pattern is a valid regex pattern")
    });

    re.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month = month_number(caps.get(2)?.as_str())?;
        spanish_date(year, month, day).map(|d| (d, whole.range()))
    })
}

/// Parses a short date such as `"1 enero"` or `"6 de Enero"` found at the start of `text`.
pub fn parse_loose_date(text: &str, year: i32) -> Option<SpanishDate> {
    let re = LOOSE_DATE_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)^\s*(\d{{1,2}})\s+(?:de\s+)?({MONTH_ALTERNATION})\b"
        ))
        .expect("loose date pattern is a valid regex pattern")
    });

    let caps = re.captures(text)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(caps.get(2)?.as_str())?;
    spanish_date(year, month, day)
}

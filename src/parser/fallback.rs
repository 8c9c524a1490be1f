//! Generic extraction strategies shared by the national and regional parsers.
//!
//! Both look for a `"{day} de {month}"` date and treat the rest of the row or line as
//! the description. They know nothing about which holidays to expect, so they are only
//! used when the fixed-table strategy falls short.

use super::strategy::{dedupe_by_date, ParseInput};
use super::text::{html_to_text, table_rows};
use crate::dates::find_date_with_de;
use crate::models::HolidayRecord;
use crate::utils::title_case;
use regex::Regex;
use std::sync::OnceLock;

/// Descriptions must be longer than this (in characters).
const MIN_DESCRIPTION_CHARS: usize = 3;
/// Line descriptions are cut to this many characters.
const MAX_LINE_DESCRIPTION_CHARS: usize = 100;

static LEADING_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
static LEADING_INDEX_REGEX: OnceLock<Regex> = OnceLock::new();

/// Extracts holidays from HTML table rows.
pub fn table_strategy(input: &ParseInput<'_>) -> Vec<HolidayRecord> {
    let leading_number = LEADING_NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^\d+\s*").expect("leading number pattern is a valid regex pattern")
    });

    let records = table_rows(input.content)
        .iter()
        .filter_map(|row| {
            let (date, range) = find_date_with_de(row, input.year)?;
            let rest = remove_range(row, range);
            let rest = leading_number.replace(rest.trim_start(), "");
            let description = rest.trim_matches(|c: char| ".,;:-".contains(c) || c.is_whitespace());
            if description.chars().count() <= MIN_DESCRIPTION_CHARS {
                return None;
            }
            Some(input.profile.record(date, title_case(description), false))
        })
        .collect();

    dedupe_by_date(records)
}

/// Extracts holidays from individual text lines.
pub fn line_strategy(input: &ParseInput<'_>) -> Vec<HolidayRecord> {
    let leading_index = LEADING_INDEX_REGEX.get_or_init(|| {
        Regex::new(r"^\d+\s*[.)\-:]\s*").expect("leading index pattern is a valid regex pattern")
    });

    let text = html_to_text(input.content);
    let records = text
        .lines()
        .filter_map(|line| {
            let (date, range) = find_date_with_de(line, input.year)?;
            let rest = remove_range(line, range);
            let rest = leading_index.replace(rest.trim_start(), "");
            let rest = rest
                .trim_matches(|c: char| ".,;:-()[]".contains(c) || c.is_whitespace());
            if rest.chars().count() <= MIN_DESCRIPTION_CHARS {
                return None;
            }

            let first_sentence = rest.split('.').next().unwrap_or(rest);
            let description: String = first_sentence
                .chars()
                .take(MAX_LINE_DESCRIPTION_CHARS)
                .collect();
            let description = description.trim();
            if description.is_empty() {
                return None;
            }
            Some(input.profile.record(date, title_case(description), false))
        })
        .collect();

    dedupe_by_date(records)
}

fn remove_range(text: &str, range: std::ops::Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..range.start]);
    out.push_str(&text[range.end..]);
    out
}

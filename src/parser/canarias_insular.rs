//! Parser for the BOC decree with the Canarias regional and insular holidays.
//!
//! The decree declares Día de Canarias for the whole community and one holiday per
//! island, written as `"En {island}: el {day} de {month}, festividad de {saint}."`.

use super::text::{html_to_text, normalize_bulletin_text};
use crate::dates::{month_number, spanish_date, MONTH_ALTERNATION};
use crate::models::{HolidayRecord, HolidayScope};
use crate::territory::{island_of, normalize_island, CANARIAS_REGION};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

const DIA_DE_CANARIAS: &str = "Día de Canarias";

static ISLAND_CLAUSE_REGEX: OnceLock<Regex> = OnceLock::new();
static CLAUSE_END_REGEX: OnceLock<Regex> = OnceLock::new();

/// Parses the regional and insular holidays of `year`.
///
/// With a `municipality`, island holidays are limited to that municipality's island.
/// Municipalities missing from the island table leave the result unfiltered.
pub fn parse_canarias_autonomous(
    content: &str,
    year: i32,
    municipality: Option<&str>,
) -> Vec<HolidayRecord> {
    let text = normalize_bulletin_text(&html_to_text(content));
    let lower = text.to_lowercase();

    let mut records = Vec::new();
    if lower.contains("30 de mayo") || lower.contains("30 mayo") {
        if let Some(date) = spanish_date(year, 5, 30) {
            records.push(HolidayRecord::autonomous(date, DIA_DE_CANARIAS, CANARIAS_REGION, false));
        }
    }
    records.extend(island_holidays(&text, year));
    info!(records = records.len(), "Canarias autonomous holidays extracted");

    match municipality {
        Some(name) => filter_by_island(records, name),
        None => records,
    }
}

fn island_holidays(text: &str, year: i32) -> Vec<HolidayRecord> {
    let clause = ISLAND_CLAUSE_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\bEn\s+([^:]+?):\s+el\s+(\d{{1,2}})\s+de\s+({MONTH_ALTERNATION}),\s+festividad\s+de\b\s*"
        ))
        .expect("island clause pattern is a valid regex pattern")
    });

    let heads: Vec<_> = clause.captures_iter(text).collect();
    let mut records = Vec::with_capacity(heads.len());

    for (i, caps) in heads.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let next_start = heads
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let island = normalize_island(&caps[1]);

        let Ok(day) = caps[2].parse::<u32>() else {
            continue;
        };
        let Some(date) = month_number(&caps[3]).and_then(|m| spanish_date(year, m, day)) else {
            debug!(island = %island, day = day, "Skipping invalid island holiday date");
            continue;
        };

        let saint = clause_description(&text[whole.end()..next_start]);
        let description = if saint.is_empty() {
            format!("Festividad insular de {island}")
        } else {
            format!("Festividad de {saint}")
        };
        debug!(island = %island, date = %date.date, "Island holiday found");
        records.push(HolidayRecord::insular(date, description, CANARIAS_REGION, &island));
    }

    records
}

/// Cuts a clause tail at its first period or at the next `" En "`.
fn clause_description(tail: &str) -> &str {
    let end_re = CLAUSE_END_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\.|\s+En\s+").expect("clause end pattern is a valid regex pattern")
    });
    let end = end_re.find(tail).map_or(tail.len(), |m| m.start());
    tail[..end].trim()
}

fn filter_by_island(records: Vec<HolidayRecord>, municipality: &str) -> Vec<HolidayRecord> {
    let Some(island) = island_of(municipality) else {
        warn!(
            municipality = municipality,
            "Municipality not found in the island table, keeping every holiday"
        );
        return records;
    };

    info!(municipality = municipality, island = island, "Filtering holidays by island");
    records
        .into_iter()
        .filter(|r| r.scope != HolidayScope::Island || r.island.as_deref() == Some(island))
        .collect()
}

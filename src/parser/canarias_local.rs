//! Parser for the BOC order with the municipal holidays of every Canarias municipality.
//!
//! The order lists each municipality as a header line (`"ADEJE."`) followed by its
//! holidays, one per line (`"2 febrero: Festividad de la Candelaria"`).

use super::text::{html_to_text, strip_control_chars};
use crate::dates::parse_loose_date;
use crate::models::HolidayRecord;
use crate::territory::{municipality_key, province_of, CANARIAS_REGION};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

static HOLIDAY_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Holidays accumulated for the municipality currently being read.
struct MunicipalityBlock {
    name: String,
    records: Vec<HolidayRecord>,
}

impl MunicipalityBlock {
    fn new(name: String) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    fn push(&mut self, record: HolidayRecord) {
        if self.records.iter().any(|r| r.date == record.date) {
            debug!(municipality = %self.name, date = %record.date, "Duplicate local holiday skipped");
            return;
        }
        self.records.push(record);
    }
}

/// Parses the municipal holidays of `year`, optionally keeping a single municipality.
///
/// Municipality names are compared ignoring accents, case, repeated whitespace and a
/// trailing period.
pub fn parse_canarias_local(
    content: &str,
    year: i32,
    municipality: Option<&str>,
) -> Vec<HolidayRecord> {
    let text = strip_control_chars(&html_to_text(content));
    let wanted = municipality.map(municipality_key);

    let mut records = Vec::new();
    let mut current: Option<MunicipalityBlock> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_municipality_header(line) {
            if let Some(block) = current.take() {
                flush(block, wanted.as_deref(), &mut records);
            }
            let name = line.trim_end_matches('.').trim().to_string();
            current = Some(MunicipalityBlock::new(name));
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };
        if let Some(record) = holiday_line(line, year, &block.name) {
            block.push(record);
        }
    }
    if let Some(block) = current.take() {
        flush(block, wanted.as_deref(), &mut records);
    }

    info!(records = records.len(), "Canarias local holidays extracted");
    records
}

/// A header is a capitalized line of letters and spaces ending with a period.
///
/// Description lines of the same shape are indistinguishable and also start a block.
pub fn is_municipality_header(line: &str) -> bool {
    let Some(body) = line.strip_suffix('.') else {
        return false;
    };
    let letters: Vec<char> = body.chars().filter(|&c| c != ' ').collect();
    !letters.is_empty()
        && letters.iter().all(|c| c.is_alphabetic())
        && line.chars().next().map_or(false, char::is_uppercase)
}

fn holiday_line(line: &str, year: i32, municipality: &str) -> Option<HolidayRecord> {
    let re = HOLIDAY_LINE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d+\s+(?:de\s+)?\w+):\s*(.+)")
            .expect("local holiday line pattern is a valid regex pattern")
    });

    let caps = re.captures(line)?;
    let date = parse_loose_date(&caps[1], year)?;
    let description = caps[2].trim();
    Some(HolidayRecord::municipal(
        date,
        description,
        CANARIAS_REGION,
        municipality,
        province_of(municipality),
    ))
}

fn flush(block: MunicipalityBlock, wanted: Option<&str>, out: &mut Vec<HolidayRecord>) {
    let keep = wanted.map_or(true, |key| municipality_key(&block.name) == key);
    if keep {
        out.extend(block.records);
    }
}

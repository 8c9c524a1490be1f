//! Parser for the BOE resolution listing the national working holidays.

use super::fallback::{line_strategy, table_strategy};
use super::strategy::{run_strategies, ParseInput, RecordProfile, Strategy};
use crate::dates::{month_number, spanish_date, SpanishDate};
use crate::models::HolidayRecord;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// A holiday on the same calendar date every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHoliday {
    pub day: u32,
    pub month: u32,
    pub description: &'static str,
    pub substitutable: bool,
}

pub(crate) const fn fixed(day: u32, month: u32, description: &'static str, substitutable: bool) -> FixedHoliday {
    FixedHoliday {
        day,
        month,
        description,
        substitutable,
    }
}

/// Calendar-fixed national holidays.
pub const NATIONAL_FIXED_HOLIDAYS: [FixedHoliday; 9] = [
    fixed(1, 1, "Año Nuevo", false),
    fixed(6, 1, "Epifanía del Señor", true),
    fixed(1, 5, "Fiesta del Trabajo", false),
    fixed(15, 8, "Asunción de la Virgen", true),
    fixed(12, 10, "Fiesta Nacional de España", false),
    fixed(1, 11, "Todos los Santos", true),
    fixed(6, 12, "Día de la Constitución Española", false),
    fixed(8, 12, "Inmaculada Concepción", true),
    fixed(25, 12, "Natividad del Señor", false),
];

/// A national parse is plausible once it has as many records as fixed holidays.
pub const NATIONAL_THRESHOLD: usize = NATIONAL_FIXED_HOLIDAYS.len();

/// Characters inspected on each side of a Holy Week match when looking for its month.
const MONTH_CONTEXT_CHARS: usize = 500;
/// Holy Thursday/Friday on a day up to this fall in April, later days in March.
const LAST_APRIL_HEURISTIC_DAY: u32 = 15;

static JUEVES_SANTO_REGEX: OnceLock<Regex> = OnceLock::new();
static VIERNES_SANTO_REGEX: OnceLock<Regex> = OnceLock::new();

const STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "known-patterns",
        run: known_patterns_strategy,
    },
    Strategy {
        name: "html-table",
        run: table_strategy,
    },
    Strategy {
        name: "text-lines",
        run: line_strategy,
    },
];

/// Parses the national holidays of `year` from the BOE resolution.
///
/// Never fails: a source with no recognizable holidays yields an empty list.
pub fn parse_national(content: &str, year: i32) -> Vec<HolidayRecord> {
    let input = ParseInput {
        content,
        year,
        profile: RecordProfile::National,
    };
    run_strategies(&STRATEGIES, &input, NATIONAL_THRESHOLD).records
}

/// Emits the fixed holidays from a table, attributed with `profile`.
pub(crate) fn fixed_records(
    table: &[FixedHoliday],
    year: i32,
    profile: RecordProfile,
) -> Vec<HolidayRecord> {
    table
        .iter()
        .filter_map(|h| {
            let date = spanish_date(year, h.month, h.day)?;
            Some(profile.record(date, h.description, h.substitutable))
        })
        .collect()
}

/// Fixed national holidays plus Holy Thursday/Friday found in the text.
fn known_patterns_strategy(input: &ParseInput<'_>) -> Vec<HolidayRecord> {
    let mut records = fixed_records(&NATIONAL_FIXED_HOLIDAYS, input.year, input.profile);
    let lower = input.content.to_lowercase();

    let jueves = JUEVES_SANTO_REGEX.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+jueves\s+santo").expect("jueves santo pattern is a valid regex pattern")
    });
    let viernes = VIERNES_SANTO_REGEX.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+viernes\s+santo").expect("viernes santo pattern is a valid regex pattern")
    });

    if let Some(date) = holy_week_date(&lower, jueves, input.year) {
        records.push(input.profile.record(date, "Jueves Santo", true));
    }
    if let Some(date) = holy_week_date(&lower, viernes, input.year) {
        records.push(input.profile.record(date, "Viernes Santo", false));
    }

    records
}

/// Dates the first match of a Holy Week pattern in lower-cased text.
///
/// The month is the `marzo`/`abril` mention nearest to the match within
/// [`MONTH_CONTEXT_CHARS`]; without one, days up to the 15th are taken as April.
fn holy_week_date(lower: &str, pattern: &Regex, year: i32) -> Option<SpanishDate> {
    let caps = pattern.captures(lower)?;
    let whole = caps.get(0)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;

    let month = nearest_holy_week_month(lower, whole.start()).unwrap_or(
        if day <= LAST_APRIL_HEURISTIC_DAY { 4 } else { 3 },
    );
    debug!(day = day, month = month, "Holy Week date located");
    spanish_date(year, month, day)
}

// Only March and April count: a closer mention of any other month (a May holiday in the
// same table, say) never moves Holy Week out of spring.
fn nearest_holy_week_month(text: &str, at: usize) -> Option<u32> {
    let start = text[..at]
        .char_indices()
        .rev()
        .nth(MONTH_CONTEXT_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let end = text[at..]
        .char_indices()
        .nth(MONTH_CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| at + i);
    let context = &text[start..end];
    let anchor = at - start;

    ["marzo", "abril"]
        .iter()
        .flat_map(|name| {
            context
                .match_indices(name)
                .map(move |(pos, _)| (pos.abs_diff(anchor), *name))
        })
        .min_by_key(|(distance, _)| *distance)
        .and_then(|(_, name)| month_number(name))
}

//! Parser for the BOCM decree with the Comunidad de Madrid working holidays.

use super::fallback::{line_strategy, table_strategy};
use super::national::{fixed, fixed_records, FixedHoliday};
use super::strategy::{run_strategies, ParseInput, RecordProfile, Strategy};
use crate::dates::{month_number, spanish_date, MONTH_ALTERNATION};
use crate::models::HolidayRecord;
use crate::utils::title_case;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub const MADRID_REGION: &str = "Madrid";

/// National fixed holidays plus the regional 2 May.
pub const MADRID_FIXED_HOLIDAYS: [FixedHoliday; 10] = [
    fixed(1, 1, "Año Nuevo", false),
    fixed(6, 1, "Epifanía del Señor", true),
    fixed(1, 5, "Fiesta del Trabajo", false),
    fixed(2, 5, "Fiesta de la Comunidad de Madrid", false),
    fixed(15, 8, "Asunción de la Virgen", true),
    fixed(12, 10, "Fiesta Nacional de España", false),
    fixed(1, 11, "Todos los Santos", true),
    fixed(6, 12, "Día de la Constitución Española", false),
    fixed(8, 12, "Inmaculada Concepción", true),
    fixed(25, 12, "Natividad del Señor", false),
];

const PROFILE: RecordProfile = RecordProfile::Autonomous {
    region: MADRID_REGION,
};

static JUEVES_SANTO_REGEX: OnceLock<Regex> = OnceLock::new();
static VIERNES_SANTO_REGEX: OnceLock<Regex> = OnceLock::new();
static TRASLADO_REGEX: OnceLock<Regex> = OnceLock::new();

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

/// Parses the Comunidad de Madrid holidays of `year`.
pub fn parse_madrid(content: &str, year: i32) -> Vec<HolidayRecord> {
    let input = ParseInput {
        content,
        year,
        profile: PROFILE,
    };
    run_strategies(&STRATEGIES, &input, MADRID_FIXED_HOLIDAYS.len()).records
}

fn known_patterns_strategy(input: &ParseInput<'_>) -> Vec<HolidayRecord> {
    let mut records = fixed_records(&MADRID_FIXED_HOLIDAYS, input.year, input.profile);
    let lower = input.content.to_lowercase();

    let jueves = JUEVES_SANTO_REGEX.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+de\s+(marzo|abril)[,\s]+jueves\s+santo")
            .expect("jueves santo pattern is a valid regex pattern")
    });
    let viernes = VIERNES_SANTO_REGEX.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+de\s+(marzo|abril)[,\s]+viernes\s+santo")
            .expect("viernes santo pattern is a valid regex pattern")
    });

    for (pattern, description, substitutable) in [
        (jueves, "Jueves Santo", true),
        (viernes, "Viernes Santo", false),
    ] {
        let Some(caps) = pattern.captures(&lower) else {
            continue;
        };
        let day = caps[1].parse::<u32>().ok();
        let month = month_number(&caps[2]);
        if let Some(date) = day.zip(month).and_then(|(d, m)| spanish_date(input.year, m, d)) {
            records.push(input.profile.record(date, description, substitutable));
        }
    }

    records.extend(transfers(&lower, input.year, &records));
    records
}

/// Finds "{day} de {month} ({weekday}), traslado de {holiday}" clauses whose date is
/// not already a holiday.
fn transfers(lower: &str, year: i32, existing: &[HolidayRecord]) -> Vec<HolidayRecord> {
    let re = TRASLADO_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"(\d{{1,2}})\s+de\s+({MONTH_ALTERNATION})\s+\([^)]+\),\s+traslado\s+de\s+([^.]+)"
        ))
        .expect("traslado pattern is a valid regex pattern")
    });

    let mut found: Vec<HolidayRecord> = Vec::new();
    for caps in re.captures_iter(lower) {
        let Ok(day) = caps[1].parse::<u32>() else {
            continue;
        };
        let Some(date) = month_number(&caps[2]).and_then(|m| spanish_date(year, m, day)) else {
            continue;
        };
        let taken = existing
            .iter()
            .chain(found.iter())
            .any(|r| r.date == date.date);
        if taken {
            debug!(date = %date.date, "Transfer date already listed");
            continue;
        }

        let original = title_case(caps[3].trim());
        found.push(PROFILE.record(date, format!("Traslado de {original}"), false));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HolidayKind, HolidayScope};

    #[test]
    fn fixed_table_includes_dos_de_mayo() {
        let records = parse_madrid("", 2026);
        assert_eq!(records.len(), 10);
        let dos_de_mayo = records.iter().find(|r| r.date.to_string() == "2026-05-02").unwrap();
        assert_eq!(dos_de_mayo.description, "Fiesta de la Comunidad de Madrid");
        assert_eq!(dos_de_mayo.kind, HolidayKind::Autonomous);
        assert_eq!(dos_de_mayo.scope, HolidayScope::AutonomousCommunity);
        assert_eq!(dos_de_mayo.region.as_deref(), Some("Madrid"));
    }

    #[test]
    fn holy_week_needs_explicit_month() {
        let text = "2 de abril, Jueves Santo. 3 de abril, Viernes Santo.";
        let records = parse_madrid(text, 2026);
        assert_eq!(records.len(), 12);
        let jueves = records.iter().find(|r| r.description == "Jueves Santo").unwrap();
        assert_eq!(jueves.date.to_string(), "2026-04-02");
        assert!(jueves.substitutable);

        // No day-of-month heuristic for the regional decree
        let records = parse_madrid("15 Jueves Santo", 2026);
        assert!(records.iter().all(|r| r.description != "Jueves Santo"));
    }

    #[test]
    fn transfer_added_when_date_is_free() {
        let text = "7 de diciembre (lunes), traslado de la fiesta del día de la constitución española.";
        let records = parse_madrid(text, 2026);
        let transfer = records.iter().find(|r| r.date.to_string() == "2026-12-07").unwrap();
        assert_eq!(
            transfer.description,
            "Traslado de La Fiesta Del Día De La Constitución Española"
        );
        assert!(!transfer.substitutable);
    }

    #[test]
    fn transfer_skipped_when_date_taken() {
        let text = "8 de diciembre (martes), traslado de algo.";
        let records = parse_madrid(text, 2026);
        let on_date: Vec<_> = records
            .iter()
            .filter(|r| r.date.to_string() == "2026-12-08")
            .collect();
        assert_eq!(on_date.len(), 1);
        assert_eq!(on_date[0].description, "Inmaculada Concepción");
    }
}

//! Best-effort discovery of the yearly BOE holiday resolution.
//!
//! The resolution is published at the end of the previous year. Discovery probes the BOE
//! open-data sumario API for a small grid of dates and looks for a document ID whose
//! summary mentions "fiestas laborales" and the target year. Every failure degrades to
//! "not found"; nothing here aborts a scrape.

use super::fetcher::Fetch;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

const BOE_BASE_URL: &str = "https://www.boe.es";
const SUMARIO_API_PATH: &str = "/datosabiertos/api/boe/sumario";
const DOCUMENT_PATH: &str = "/diario_boe/txt.php?id=";

const TOPIC_KEYWORD: &str = "fiestas laborales";
const FIXED_HOLIDAY_KEYWORD: &str = "año nuevo";

/// Publication months probed, in order.
const CANDIDATE_MONTHS: [u32; 3] = [10, 11, 12];
/// Days probed per month; the resolution tends to appear at month end.
const CANDIDATE_DAYS: [u32; 7] = [28, 29, 30, 31, 27, 26, 25];

const DOCUMENT_ID_PATTERN: &str = r"boe-a-\d{4}-\d{5}";

static DOCUMENT_ID_REGEX: OnceLock<Regex> = OnceLock::new();

/// BOE auto-discovery and URL validation over a [`Fetch`] implementation.
#[derive(Debug, Clone)]
pub struct BoeDiscovery<'a, F> {
    fetcher: &'a F,
    probe_timeout: Duration,
    validation_timeout: Duration,
}

impl<'a, F: Fetch> BoeDiscovery<'a, F> {
    pub fn new(fetcher: &'a F, probe_timeout: Duration, validation_timeout: Duration) -> Self {
        Self {
            fetcher,
            probe_timeout,
            validation_timeout,
        }
    }

    /// Searches the sumario API for the resolution of `year`.
    ///
    /// Returns the canonical document URL of the first match, or `None` once the
    /// candidate grid is exhausted.
    pub async fn discover(&self, year: i32) -> Option<String> {
        info!(year = year, "Trying BOE auto-discovery");
        for date in candidate_dates(year) {
            let api_url = sumario_url(date);
            let summary = match self.fetcher.fetch_json(&api_url, self.probe_timeout).await {
                Ok(summary) => summary,
                Err(e) => {
                    debug!(url = %api_url, error = %e, "Sumario probe failed");
                    continue;
                }
            };

            if let Some(doc_id) = find_document_id(&summary, year) {
                let url = document_url(&doc_id);
                info!(year = year, date = %date, url = %url, "Candidate resolution found");
                return Some(url);
            }
        }

        warn!(year = year, "BOE auto-discovery found no candidate");
        None
    }

    /// Checks that `url` holds the holiday resolution for `year`.
    ///
    /// The page must mention "fiestas laborales", the year and "año nuevo"; any fetch
    /// failure counts as invalid.
    pub async fn validate(&self, url: &str, year: i32) -> bool {
        match self.fetcher.fetch(url, self.validation_timeout).await {
            Ok(body) => {
                let valid = contains_required_keywords(&body, year);
                if !valid {
                    warn!(url = url, year = year, "URL does not look like the holiday resolution");
                }
                valid
            }
            Err(e) => {
                warn!(url = url, error = %e, "Could not fetch URL for validation");
                false
            }
        }
    }
}

/// Publication dates probed for `year`, in probe order. Impossible dates are skipped.
pub fn candidate_dates(year: i32) -> Vec<NaiveDate> {
    let search_year = year - 1;
    CANDIDATE_MONTHS
        .iter()
        .flat_map(|&month| {
            CANDIDATE_DAYS
                .iter()
                .filter_map(move |&day| NaiveDate::from_ymd_opt(search_year, month, day))
        })
        .collect()
}

/// Sumario API endpoint for one publication date.
pub fn sumario_url(date: NaiveDate) -> String {
    format!(
        "{BOE_BASE_URL}{SUMARIO_API_PATH}/{}",
        date.format("%Y%m%d")
    )
}

/// Canonical text URL of a BOE document.
pub fn document_url(doc_id: &str) -> String {
    format!("{BOE_BASE_URL}{DOCUMENT_PATH}{doc_id}")
}

/// Finds the document ID of the sumario entry mentioning the topic keyword.
///
/// The sumario as a whole must also mention `year`. The innermost JSON node that
/// mentions the keyword and carries an ID wins, so unrelated entries of the same day
/// are not picked up.
pub fn find_document_id(summary: &serde_json::Value, year: i32) -> Option<String> {
    let text = summary.to_string().to_lowercase();
    if !text.contains(&year.to_string()) {
        return None;
    }
    innermost_document_id(summary)
}

fn innermost_document_id(value: &serde_json::Value) -> Option<String> {
    let text = value.to_string().to_lowercase();
    if !text.contains(TOPIC_KEYWORD) {
        return None;
    }

    let nested = match value {
        serde_json::Value::Object(map) => map.values().find_map(innermost_document_id),
        serde_json::Value::Array(items) => items.iter().find_map(innermost_document_id),
        _ => None,
    };
    nested.or_else(|| {
        let re = DOCUMENT_ID_REGEX.get_or_init(|| {
            Regex::new(DOCUMENT_ID_PATTERN).expect("DOCUMENT_ID_PATTERN is a valid regex pattern")
        });
        re.find(&text).map(|m| m.as_str().to_uppercase())
    })
}

/// Whether a fetched page contains every keyword of the holiday resolution.
pub fn contains_required_keywords(body: &str, year: i32) -> bool {
    let lower = body.to_lowercase();
    let year = year.to_string();
    [TOPIC_KEYWORD, year.as_str(), FIXED_HOLIDAY_KEYWORD]
        .iter()
        .all(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_grid_covers_previous_year_quarter() {
        let dates = candidate_dates(2027);
        // 31 November does not exist
        assert_eq!(dates.len(), 20);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 10, 28).unwrap());
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
        assert!(dates.iter().all(|d| d.format("%Y").to_string() == "2026"));
        assert_eq!(*dates.last().unwrap(), NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
    }

    #[test]
    fn sumario_url_uses_compact_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        assert_eq!(
            sumario_url(date),
            "https://www.boe.es/datosabiertos/api/boe/sumario/20251028"
        );
    }

    #[test]
    fn find_document_id_requires_keyword_and_year() {
        let summary = json!({
            "data": {"sumario": {"item": [{
                "identificador": "BOE-A-2025-21667",
                "titulo": "Resolución por la que se publica la relación de fiestas laborales para el año 2026"
            }]}}
        });
        assert_eq!(
            find_document_id(&summary, 2026),
            Some("BOE-A-2025-21667".to_string())
        );
        assert_eq!(find_document_id(&summary, 2031), None);

        let crowded = json!({"item": [
            {"identificador": "BOE-A-2025-00001", "titulo": "Real Decreto 2026"},
            {"identificador": "BOE-A-2025-21667", "titulo": "Relación de fiestas laborales"},
            {"identificador": "BOE-A-2025-30000", "titulo": "Orden de nombramiento"}
        ]});
        assert_eq!(
            find_document_id(&crowded, 2026),
            Some("BOE-A-2025-21667".to_string())
        );

        let unrelated = json!({"item": {"identificador": "BOE-A-2025-00001", "titulo": "Orden 2026"}});
        assert_eq!(find_document_id(&unrelated, 2026), None);
    }

    #[test]
    fn required_keywords_all_present() {
        let body = "<p>Fiestas laborales para 2026</p><td>1 de enero, Año Nuevo</td>";
        assert!(contains_required_keywords(body, 2026));
        assert!(!contains_required_keywords(body, 2027));
        assert!(!contains_required_keywords("fiestas laborales 2026", 2026));
    }

    #[test]
    fn document_url_is_canonical() {
        assert_eq!(
            document_url("BOE-A-2024-21234"),
            "https://www.boe.es/diario_boe/txt.php?id=BOE-A-2024-21234"
        );
    }
}

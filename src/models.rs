use crate::dates::SpanishDate;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Sentinel region tag meaning "applies everywhere in the record's scope".
pub const ALL_REGIONS: &str = "all";

/// Administrative level that declared the holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    National,
    Autonomous,
    Local,
}

impl HolidayKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::Autonomous => "autonomous",
            Self::Local => "local",
        }
    }
}

/// Geographic tier the holiday applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayScope {
    National,
    AutonomousCommunity,
    Island,
    Municipal,
}

impl HolidayScope {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::AutonomousCommunity => "autonomous-community",
            Self::Island => "island",
            Self::Municipal => "municipal",
        }
    }
}

/// One public holiday extracted from a bulletin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayRecord {
    /// ISO date; its year always equals [`HolidayRecord::year`]
    pub date: NaiveDate,
    /// Spanish rendering, e.g. `"30 de mayo"`
    pub date_text: String,
    pub description: String,
    pub kind: HolidayKind,
    pub scope: HolidayScope,
    /// Region, island or municipality identifiers; `["all"]` for universal applicability
    pub region_tags: Vec<String>,
    /// Whether the holiday moves when it falls on a Sunday
    pub substitutable: bool,
    pub year: i32,
    /// Autonomous community name (`Madrid`, `Canarias`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub island: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

impl HolidayRecord {
    /// Builds a nationwide record.
    pub fn national(date: SpanishDate, description: impl Into<String>, substitutable: bool) -> Self {
        Self::base(
            date,
            description.into(),
            HolidayKind::National,
            HolidayScope::National,
            vec![ALL_REGIONS.to_string()],
            substitutable,
        )
    }

    /// Builds a record applying to a whole autonomous community.
    pub fn autonomous(
        date: SpanishDate,
        description: impl Into<String>,
        region: &str,
        substitutable: bool,
    ) -> Self {
        let mut record = Self::base(
            date,
            description.into(),
            HolidayKind::Autonomous,
            HolidayScope::AutonomousCommunity,
            vec![ALL_REGIONS.to_string()],
            substitutable,
        );
        record.region = Some(region.to_string());
        record
    }

    /// Builds an island-wide record declared by the autonomous community.
    pub fn insular(date: SpanishDate, description: impl Into<String>, region: &str, island: &str) -> Self {
        let mut record = Self::base(
            date,
            description.into(),
            HolidayKind::Autonomous,
            HolidayScope::Island,
            vec![island.to_string()],
            false,
        );
        record.region = Some(region.to_string());
        record.island = Some(island.to_string());
        record
    }

    /// Builds a single-municipality record.
    pub fn municipal(
        date: SpanishDate,
        description: impl Into<String>,
        region: &str,
        municipality: &str,
        province: &str,
    ) -> Self {
        let mut record = Self::base(
            date,
            description.into(),
            HolidayKind::Local,
            HolidayScope::Municipal,
            vec![municipality.to_string()],
            false,
        );
        record.region = Some(region.to_string());
        record.municipality = Some(municipality.to_string());
        record.province = Some(province.to_string());
        record
    }

    fn base(
        date: SpanishDate,
        description: String,
        kind: HolidayKind,
        scope: HolidayScope,
        region_tags: Vec<String>,
        substitutable: bool,
    ) -> Self {
        Self {
            year: date.date.year(),
            date: date.date,
            date_text: date.text,
            description,
            kind,
            scope,
            region_tags,
            substitutable,
            region: None,
            island: None,
            municipality: None,
            province: None,
        }
    }

    /// Whether the record applies regardless of island or municipality.
    pub fn is_universal(&self) -> bool {
        self.region_tags.iter().any(|t| t == ALL_REGIONS)
    }
}

/// The bulletin/holiday-type combinations this tool can scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScraperKind {
    /// BOE resolution with the national working holidays
    National,
    /// BOCM decree with the Comunidad de Madrid holidays
    MadridAutonomous,
    /// BOC decree with the Canarias regional and insular holidays
    CanariasAutonomous,
    /// BOC order with the Canarias municipal holidays
    CanariasLocal,
}

impl ScraperKind {
    pub const ALL: [ScraperKind; 4] = [
        Self::National,
        Self::MadridAutonomous,
        Self::CanariasAutonomous,
        Self::CanariasLocal,
    ];

    /// Returns a human-readable name for the scraper.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::National => "BOE national holidays",
            Self::MadridAutonomous => "BOCM Madrid autonomous holidays",
            Self::CanariasAutonomous => "BOC Canarias autonomous holidays",
            Self::CanariasLocal => "BOC Canarias local holidays",
        }
    }

    /// Stem used for output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::National => "nacionales",
            Self::MadridAutonomous => "madrid_autonomicos",
            Self::CanariasAutonomous => "canarias_autonomicos",
            Self::CanariasLocal => "canarias_locales",
        }
    }

    /// Year scraped when none is given on the command line.
    pub fn default_year(&self) -> i32 {
        match self {
            Self::National | Self::MadridAutonomous => 2026,
            Self::CanariasAutonomous | Self::CanariasLocal => 2025,
        }
    }

    /// Cache file name (inside the configured cache directory).
    pub fn cache_file(&self) -> &'static str {
        match self {
            Self::National => "boe_urls_cache.json",
            Self::MadridAutonomous => "madrid_urls_cache.json",
            Self::CanariasAutonomous | Self::CanariasLocal => "canarias_urls_cache.json",
        }
    }

    /// Top-level key inside the cache file.
    pub fn cache_category(&self) -> &'static str {
        match self {
            Self::National => "nacionales",
            Self::MadridAutonomous | Self::CanariasAutonomous => "autonomicos",
            Self::CanariasLocal => "locales",
        }
    }

    /// Verified source URLs, newest year first.
    pub fn known_urls(&self) -> &'static [(i32, &'static str)] {
        match self {
            Self::National => &[
                (2026, "https://www.boe.es/diario_boe/txt.php?id=BOE-A-2025-21667"),
                (2025, "https://www.boe.es/diario_boe/txt.php?id=BOE-A-2024-21234"),
            ],
            Self::MadridAutonomous => &[(
                2026,
                "https://www.bocm.es/boletin/CM_Orden_BOCM/2025/09/25/BOCM-20250925-16.PDF",
            )],
            Self::CanariasAutonomous => {
                &[(2025, "https://www.gobiernodecanarias.org/boc/2024/187/3013.html")]
            }
            Self::CanariasLocal => {
                &[(2025, "https://www.gobiernodecanarias.org/boc/2024/238/3948.html")]
            }
        }
    }

    /// Bulletin home page searched by hand when no URL is known.
    pub fn search_site(&self) -> &'static str {
        match self {
            Self::National => "https://www.boe.es",
            Self::MadridAutonomous => "https://www.bocm.es",
            Self::CanariasAutonomous | Self::CanariasLocal => {
                "https://www.gobiernodecanarias.org/boc/"
            }
        }
    }

    /// Search phrase that finds the yearly holiday document on the bulletin site.
    pub fn search_phrase(&self, year: i32) -> String {
        match self {
            Self::CanariasLocal => format!("fiestas locales {year}"),
            _ => format!("fiestas laborales {year}"),
        }
    }

    /// When the holiday document is usually published.
    pub fn publication_hint(&self, year: i32) -> String {
        let previous = year - 1;
        match self {
            Self::National => format!("usually October-November {previous}"),
            Self::MadridAutonomous => format!("usually September {previous}"),
            Self::CanariasAutonomous => format!("usually September {previous}"),
            Self::CanariasLocal => format!("usually December {previous}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::spanish_date;

    #[test]
    fn national_record_is_universal() {
        let r = HolidayRecord::national(spanish_date(2026, 1, 6).unwrap(), "Epifanía del Señor", true);
        assert_eq!(r.year, 2026);
        assert_eq!(r.kind, HolidayKind::National);
        assert_eq!(r.scope, HolidayScope::National);
        assert!(r.is_universal());
        assert!(r.substitutable);
        assert!(r.municipality.is_none());
    }

    #[test]
    fn municipal_record_has_single_attribution() {
        let r = HolidayRecord::municipal(
            spanish_date(2025, 2, 2).unwrap(),
            "Fiesta Local",
            "Canarias",
            "ADEJE",
            "Santa Cruz de Tenerife",
        );
        assert_eq!(r.scope, HolidayScope::Municipal);
        assert_eq!(r.region_tags, vec!["ADEJE".to_string()]);
        assert_eq!(r.municipality.as_deref(), Some("ADEJE"));
        assert!(!r.is_universal());
    }

    #[test]
    fn record_serializes_iso_date_and_kebab_scope() {
        let r = HolidayRecord::insular(
            spanish_date(2025, 2, 2).unwrap(),
            "Festividad de la Candelaria",
            "Canarias",
            "Tenerife",
        );
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "2025-02-02");
        assert_eq!(json["scope"], "island");
        assert_eq!(json["kind"], "autonomous");
        assert_eq!(json["island"], "Tenerife");
        assert!(json.get("municipality").is_none());
    }

    #[test]
    fn autonomous_scope_serializes_kebab_case() {
        let r = HolidayRecord::autonomous(spanish_date(2026, 5, 2).unwrap(), "Fiesta", "Madrid", false);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["scope"], "autonomous-community");
    }

    #[test]
    fn scraper_kind_cache_categories() {
        assert_eq!(ScraperKind::CanariasLocal.cache_category(), "locales");
        assert_eq!(ScraperKind::CanariasAutonomous.cache_category(), "autonomicos");
        assert_eq!(
            ScraperKind::CanariasLocal.cache_file(),
            ScraperKind::CanariasAutonomous.cache_file()
        );
    }

    #[test]
    fn known_urls_have_unique_years() {
        for kind in ScraperKind::ALL {
            let urls = kind.known_urls();
            for (i, (year, _)) in urls.iter().enumerate() {
                assert!(urls[i + 1..].iter().all(|(y, _)| y != year));
            }
        }
    }
}

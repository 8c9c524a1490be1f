//! One scraper run: resolve the source URL, fetch it, parse it and write the records.

use crate::config::ResolvedConfig;
use crate::errors::AppResult;
use crate::models::{HolidayRecord, ScraperKind};
use crate::output::{default_output_path, write_json, RunSummary};
use crate::parser::{parse_canarias_autonomous, parse_canarias_local, parse_madrid, parse_national};
use crate::source::{BoeDiscovery, Fetch, ResolvedUrl, UrlCache, UrlOrigin, UrlResolver};
use crate::utils::format_duration;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// What to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub kind: ScraperKind,
    pub year: i32,
    /// Municipality filter; only honored by the Canarias scrapers
    pub municipality: Option<String>,
    /// Source URL given by the user, bypassing resolution
    pub url: Option<String>,
    /// Output file overriding [`default_output_path`]
    pub output: Option<PathBuf>,
}

impl ScrapeRequest {
    pub fn new(kind: ScraperKind, year: i32) -> Self {
        Self {
            kind,
            year,
            municipality: None,
            url: None,
            output: None,
        }
    }

    fn municipality_filter(&self) -> Option<&str> {
        match self.kind {
            ScraperKind::CanariasAutonomous | ScraperKind::CanariasLocal => {
                self.municipality.as_deref()
            }
            ScraperKind::National | ScraperKind::MadridAutonomous => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub source: ResolvedUrl,
    pub records: Vec<HolidayRecord>,
    /// Where the records were written; `None` when nothing was found
    pub output_path: Option<PathBuf>,
}

/// Runs one scraper end to end.
///
/// # Errors
///
/// Returns `NoUrlFound` when no source URL can be resolved, `UrlError` for an invalid
/// `--url`, `NetworkError` when the bulletin cannot be fetched and `IoError` when the
/// output cannot be written. Parsing itself never fails.
pub async fn run<F: Fetch>(
    request: &ScrapeRequest,
    config: &ResolvedConfig,
    fetcher: &F,
) -> AppResult<ScrapeOutcome> {
    let start = Instant::now();
    let kind = request.kind;
    let year = request.year;
    info!(scraper = kind.display_name(), year = year, "Starting scrape");

    let mut resolver = UrlResolver::new(kind, UrlCache::load(config.cache_path(kind)));
    let source = resolve_source(&mut resolver, request, config, fetcher).await?;
    info!(url = %source.url, origin = ?source.origin, "Fetching bulletin");
    let content = fetcher.fetch(&source.url, config.fetch_timeout()).await?;
    if source.origin == UrlOrigin::Manual {
        resolver.remember(year, &source.url);
    }

    let municipality = request.municipality_filter();
    let records = parse_content(kind, &content, year, municipality);
    let summary = RunSummary::from_records(&records);
    summary.log(kind, year);

    let output_path = if records.is_empty() {
        warn!(scraper = kind.display_name(), year = year, "No holidays found, nothing written");
        None
    } else {
        let path = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(config, kind, year, municipality));
        write_json(&records, &path)?;
        Some(path)
    };

    info!(
        scraper = kind.display_name(),
        records = records.len(),
        elapsed = %format_duration(start.elapsed()),
        "Scrape completed"
    );

    Ok(ScrapeOutcome {
        source,
        records,
        output_path,
    })
}

/// Dispatches bulletin content to the parser of `kind`.
pub fn parse_content(
    kind: ScraperKind,
    content: &str,
    year: i32,
    municipality: Option<&str>,
) -> Vec<HolidayRecord> {
    match kind {
        ScraperKind::National => parse_national(content, year),
        ScraperKind::MadridAutonomous => parse_madrid(content, year),
        ScraperKind::CanariasAutonomous => parse_canarias_autonomous(content, year, municipality),
        ScraperKind::CanariasLocal => parse_canarias_local(content, year, municipality),
    }
}

async fn resolve_source<F: Fetch>(
    resolver: &mut UrlResolver,
    request: &ScrapeRequest,
    config: &ResolvedConfig,
    fetcher: &F,
) -> AppResult<ResolvedUrl> {
    let kind = request.kind;

    if let Some(url) = request.url.as_deref() {
        return resolver.manual(url);
    }

    if kind == ScraperKind::National && config.auto_discovery {
        let discovery = BoeDiscovery::new(
            fetcher,
            config.discovery_timeout(),
            config.validation_timeout(),
        );
        return resolver.resolve_with_discovery(request.year, &discovery).await;
    }

    resolver.resolve(request.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn municipality_filter_only_for_canarias() {
        let mut request = ScrapeRequest::new(ScraperKind::National, 2026);
        request.municipality = Some("ADEJE".to_string());
        assert_eq!(request.municipality_filter(), None);

        request.kind = ScraperKind::CanariasLocal;
        assert_eq!(request.municipality_filter(), Some("ADEJE"));
    }

    #[test]
    fn parse_content_dispatches_by_kind() {
        let national = parse_content(ScraperKind::National, "", 2026, None);
        assert_eq!(national.len(), 9);
        let madrid = parse_content(ScraperKind::MadridAutonomous, "", 2026, None);
        assert_eq!(madrid.len(), 10);
        let local = parse_content(ScraperKind::CanariasLocal, "ADEJE.\n2 febrero: Candelaria", 2025, None);
        assert_eq!(local.len(), 1);
    }
}

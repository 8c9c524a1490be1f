use super::cache::UrlCache;
use super::discovery::BoeDiscovery;
use super::fetcher::Fetch;
use crate::errors::{AppError, AppResult};
use crate::models::ScraperKind;
use tracing::{info, warn};
use url::Url;

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOrigin {
    /// Static table of verified URLs
    Known,
    /// Region cache file
    Cached,
    /// BOE auto-discovery
    Discovered,
    /// Given on the command line
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub origin: UrlOrigin,
}

/// Resolves the source URL of one scraper for a given year.
///
/// Resolution order: static known-URL table, cache file, auto-discovery (national
/// bulletin only), then a [`AppError::NoUrlFound`] carrying remediation steps.
#[derive(Debug)]
pub struct UrlResolver {
    kind: ScraperKind,
    cache: UrlCache,
}

impl UrlResolver {
    pub fn new(kind: ScraperKind, cache: UrlCache) -> Self {
        Self { kind, cache }
    }

    pub fn cache(&self) -> &UrlCache {
        &self.cache
    }

    /// Verified URL from the static table.
    pub fn known_url(&self, year: i32) -> Option<&'static str> {
        self.kind
            .known_urls()
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, url)| *url)
    }

    pub fn cached_url(&self, year: i32) -> Option<&str> {
        self.cache.get(self.kind.cache_category(), year)
    }

    /// Resolves from the static table or the cache, without touching the network.
    pub fn resolve(&self, year: i32) -> AppResult<ResolvedUrl> {
        if let Some(url) = self.known_url(year) {
            info!(year = year, url = url, "Using known URL");
            return Ok(ResolvedUrl {
                url: url.to_string(),
                origin: UrlOrigin::Known,
            });
        }

        if let Some(url) = self.cached_url(year) {
            info!(year = year, url = url, "Using cached URL");
            return Ok(ResolvedUrl {
                url: url.to_string(),
                origin: UrlOrigin::Cached,
            });
        }

        Err(self.no_url_found(year))
    }

    /// Resolves like [`UrlResolver::resolve`], validating cached URLs and falling back
    /// to auto-discovery. A discovered URL is saved to the cache.
    pub async fn resolve_with_discovery<F: Fetch>(
        &mut self,
        year: i32,
        discovery: &BoeDiscovery<'_, F>,
    ) -> AppResult<ResolvedUrl> {
        if let Some(url) = self.known_url(year) {
            info!(year = year, url = url, "Using known URL");
            return Ok(ResolvedUrl {
                url: url.to_string(),
                origin: UrlOrigin::Known,
            });
        }

        if let Some(url) = self.cached_url(year).map(str::to_string) {
            if discovery.validate(&url, year).await {
                info!(year = year, url = %url, "Using cached URL");
                return Ok(ResolvedUrl {
                    url,
                    origin: UrlOrigin::Cached,
                });
            }
            warn!(year = year, url = %url, "Cached URL failed validation, trying discovery");
        }

        if let Some(url) = discovery.discover(year).await {
            if discovery.validate(&url, year).await {
                info!(
                    year = year,
                    url = %url,
                    "URL found by auto-discovery; consider adding it to the known URL table"
                );
                self.cache.save(self.kind.cache_category(), year, &url);
                return Ok(ResolvedUrl {
                    url,
                    origin: UrlOrigin::Discovered,
                });
            }
        }

        Err(self.no_url_found(year))
    }

    /// Checks a URL given by the user. Nothing is cached until the page has been fetched;
    /// see [`UrlResolver::remember`].
    pub fn manual(&self, url: &str) -> AppResult<ResolvedUrl> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::UrlError(format!(
                "Expected an http(s) URL, got: {url}"
            )));
        }
        Ok(ResolvedUrl {
            url: parsed.to_string(),
            origin: UrlOrigin::Manual,
        })
    }

    /// Stores a fetched URL in the cache so later runs resolve it without `--url`.
    pub fn remember(&mut self, year: i32, url: &str) -> bool {
        self.cache.save(self.kind.cache_category(), year, url)
    }

    /// Builds the configuration error with instructions to add the missing URL.
    pub fn no_url_found(&self, year: i32) -> AppError {
        let kind = self.kind;
        let mut instructions = format!(
            "To add it:\n\
             1. Search {site} for '{phrase}'\n\
             2. Find the official document ({hint})\n",
            site = kind.search_site(),
            phrase = kind.search_phrase(year),
            hint = kind.publication_hint(year),
        );
        if kind == ScraperKind::National {
            instructions.push_str(&format!(
                "   Document IDs look like BOE-A-{}-XXXXX\n",
                year - 1
            ));
        }
        instructions.push_str(&format!(
            "3. Re-run passing --url <URL>, or add it to {cache}:\n   \"{category}\": {{ \"{year}\": \"<URL>\" }}",
            cache = self.cache.path().display(),
            category = kind.cache_category(),
        ));

        AppError::NoUrlFound {
            bulletin: kind.display_name().to_string(),
            year,
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver(kind: ScraperKind, dir: &TempDir) -> UrlResolver {
        UrlResolver::new(kind, UrlCache::load(dir.path().join(kind.cache_file())))
    }

    #[test]
    fn known_url_wins_over_cache() {
        let dir = TempDir::new().unwrap();
        let mut cache = UrlCache::load(dir.path().join("canarias_urls_cache.json"));
        cache.save("autonomicos", 2025, "https://example.com/other");
        let resolver = UrlResolver::new(ScraperKind::CanariasAutonomous, cache);

        let resolved = resolver.resolve(2025).unwrap();
        assert_eq!(resolved.origin, UrlOrigin::Known);
        assert_eq!(
            resolved.url,
            "https://www.gobiernodecanarias.org/boc/2024/187/3013.html"
        );
    }

    #[test]
    fn cache_answers_unknown_year() {
        let dir = TempDir::new().unwrap();
        let mut cache = UrlCache::load(dir.path().join("madrid_urls_cache.json"));
        cache.save("autonomicos", 2027, "https://www.bocm.es/2027.PDF");
        let resolver = UrlResolver::new(ScraperKind::MadridAutonomous, cache);

        let resolved = resolver.resolve(2027).unwrap();
        assert_eq!(resolved.origin, UrlOrigin::Cached);
        assert_eq!(resolved.url, "https://www.bocm.es/2027.PDF");
    }

    #[test]
    fn categories_do_not_leak_between_scrapers() {
        let dir = TempDir::new().unwrap();
        let mut cache = UrlCache::load(dir.path().join("canarias_urls_cache.json"));
        cache.save("locales", 2030, "https://example.com/locales");
        let resolver = UrlResolver::new(ScraperKind::CanariasAutonomous, cache);
        assert!(resolver.resolve(2030).is_err());
    }

    #[test]
    fn missing_year_reports_instructions() {
        let dir = TempDir::new().unwrap();
        let err = resolver(ScraperKind::National, &dir).resolve(2031).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, AppError::NoUrlFound { year: 2031, .. }));
        assert!(msg.contains("https://www.boe.es"));
        assert!(msg.contains("fiestas laborales 2031"));
        assert!(msg.contains("BOE-A-2030-XXXXX"));
        assert!(msg.contains("\"nacionales\""));
        assert!(msg.contains("--url"));
    }

    #[test]
    fn manual_url_is_cached_only_when_remembered() {
        let dir = TempDir::new().unwrap();
        let mut r = resolver(ScraperKind::CanariasLocal, &dir);
        let resolved = r
            .manual("https://www.gobiernodecanarias.org/boc/2025/240/4000.html")
            .unwrap();
        assert_eq!(resolved.origin, UrlOrigin::Manual);
        assert!(resolver(ScraperKind::CanariasLocal, &dir).resolve(2026).is_err());

        assert!(r.remember(2026, &resolved.url));
        let again = resolver(ScraperKind::CanariasLocal, &dir).resolve(2026).unwrap();
        assert_eq!(again.origin, UrlOrigin::Cached);
        assert_eq!(
            again.url,
            "https://www.gobiernodecanarias.org/boc/2025/240/4000.html"
        );
    }

    #[test]
    fn manual_rejects_non_http_urls() {
        let dir = TempDir::new().unwrap();
        let r = resolver(ScraperKind::MadridAutonomous, &dir);
        assert!(r.manual("not a url").is_err());
        assert!(r.manual("ftp://example.com/file").is_err());
        assert!(r.resolve(2027).is_err());
    }
}

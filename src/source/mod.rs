//! Source URL resolution and fetching.
//!
//! [`UrlResolver`] answers "which document holds the holidays of year N" from a static
//! table, a JSON cache file, or (for the BOE) auto-discovery. [`Fetch`] is the network
//! capability the resolver, discovery and scrape pipeline share.

mod cache;
mod discovery;
mod fetcher;
mod resolver;

// Re-export public API
pub use cache::UrlCache;
pub use discovery::{
    candidate_dates, contains_required_keywords, document_url, find_document_id, sumario_url,
    BoeDiscovery,
};
pub use fetcher::{Fetch, HttpFetcher};
pub use resolver::{ResolvedUrl, UrlOrigin, UrlResolver};

//! festivos-cli library
//!
//! This crate provides the core functionality for the `festivos-cli` binary: scrapers
//! that turn Spanish official bulletins into public-holiday records.
//!
//! ## Overview
//!
//! - [`source`] - Resolves bulletin URLs (known table, URL cache, BOE auto-discovery) and fetches them
//! - [`parser`] - Extracts holidays from bulletin HTML or text with layered strategies
//! - [`scrape`] - Runs one scraper end to end: resolve, fetch, parse, write
//! - [`output`] - JSON output and run summaries
//! - [`cli`] - Command-line interface
//! - [`models`] - Holiday records and the supported scrapers
//! - [`dates`] / [`territory`] - Spanish date text and Canary Islands lookup tables
//! - [`config`] / [`errors`] - Configuration and error types
//!
//! ## Example Usage
//!
//! ```no_run
//! use festivos_cli::{config::ResolvedConfig, errors::AppResult, models::ScraperKind};
//! use festivos_cli::scrape::{self, ScrapeRequest};
//! use festivos_cli::source::HttpFetcher;
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let fetcher = HttpFetcher::new(&config.user_agent)?;
//!
//! let request = ScrapeRequest::new(ScraperKind::National, 2026);
//! let outcome = scrape::run(&request, &config, &fetcher).await?;
//! println!("{} holidays", outcome.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! Parsers can also be used directly on content fetched elsewhere:
//!
//! ```
//! use festivos_cli::parser::parse_canarias_local;
//!
//! let text = "ADEJE.\n2 febrero: Festividad de la Candelaria\n13 de junio: San Antonio";
//! let records = parse_canarias_local(text, 2025, None);
//! assert_eq!(records.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod dates;
pub mod errors;
pub mod models;
pub mod output;
pub mod parser;
pub mod scrape;
pub mod source;
pub mod territory;
pub mod utils;

use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ScraperKind;
use crate::scrape::{self, ScrapeRequest};
use crate::source::HttpFetcher;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Parses command-line arguments and runs the selected scraper.
///
/// Subcommands:
/// - `nacional [YEAR]`: national holidays from the BOE
/// - `madrid [YEAR]`: Comunidad de Madrid holidays from the BOCM
/// - `canarias-autonomicos [YEAR] [--municipio NAME]`: regional and island holidays
/// - `canarias-locales [YEAR] [MUNICIPIO]`: municipal holidays, arguments in any order
///
/// Every subcommand accepts `--url` to scrape a given document (and remember it in the
/// URL cache) and `--output` to choose the JSON file. Without a subcommand the help is
/// printed.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed year or argument list, or propagates the
/// configuration, resolution, network and output errors of the run.
pub async fn cli() -> AppResult<()> {
    let cmd = build_command();
    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    let Some((name, sub)) = matches.subcommand() else {
        cmd_for_help
            .print_help()
            .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        return Ok(());
    };

    let request = request_from_matches(name, sub)?;
    let config = match sub.get_one::<PathBuf>("config") {
        Some(path) => ResolvedConfig::from_toml_file(path)?,
        None => ResolvedConfig::default(),
    };

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let outcome = scrape::run(&request, &config, &fetcher).await?;

    match &outcome.output_path {
        Some(path) => info!(
            records = outcome.records.len(),
            output_file = %path.display(),
            "Done"
        ),
        None => info!(records = 0, "Done"),
    }
    Ok(())
}

/// Terminal rendering of a failed run, using the `Display` form so multi-line
/// remediation steps keep their line breaks.
pub fn error_report(err: &AppError) -> String {
    format!("Error: {err}")
}

fn build_command() -> Command<'static> {
    Command::new("festivos-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a TOML configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            source_args(Command::new("nacional"))
                .about("National holidays from the BOE")
                .arg(year_arg(ScraperKind::National)),
        )
        .subcommand(
            source_args(Command::new("madrid"))
                .about("Comunidad de Madrid holidays from the BOCM")
                .arg(year_arg(ScraperKind::MadridAutonomous)),
        )
        .subcommand(
            source_args(Command::new("canarias-autonomicos"))
                .about("Canarias regional and island holidays from the BOC")
                .after_help("Example:\n  festivos-cli canarias-autonomicos 2025 --municipio ARRECIFE")
                .arg(year_arg(ScraperKind::CanariasAutonomous))
                .arg(
                    Arg::new("municipio")
                        .short('m')
                        .long("municipio")
                        .help("Keep only the island holidays of this municipality's island")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            source_args(Command::new("canarias-locales"))
                .about("Canarias municipal holidays from the BOC")
                .after_help("Year and municipality may be given in any order.\nExample:\n  festivos-cli canarias-locales ADEJE 2025")
                .arg(Arg::new("first").help("Year or municipality").action(ArgAction::Set))
                .arg(Arg::new("second").help("Year or municipality").action(ArgAction::Set)),
        )
}

fn source_args(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("url")
            .short('u')
            .long("url")
            .help("Bulletin URL to scrape; saved to the URL cache for later runs")
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .help("JSON output file (defaults to <output_dir>/<scraper>_<year>.json)")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    )
}

fn year_arg(kind: ScraperKind) -> Arg<'static> {
    let help = match kind {
        ScraperKind::National | ScraperKind::MadridAutonomous => "Year to scrape [default: 2026]",
        ScraperKind::CanariasAutonomous | ScraperKind::CanariasLocal => {
            "Year to scrape [default: 2025]"
        }
    };
    Arg::new("year").help(help).action(ArgAction::Set)
}

fn request_from_matches(name: &str, sub: &ArgMatches) -> AppResult<ScrapeRequest> {
    let kind = match name {
        "nacional" => ScraperKind::National,
        "madrid" => ScraperKind::MadridAutonomous,
        "canarias-autonomicos" => ScraperKind::CanariasAutonomous,
        "canarias-locales" => ScraperKind::CanariasLocal,
        other => {
            return Err(AppError::InvalidInput(format!(
                "Unknown subcommand: {other}"
            )))
        }
    };

    let (year, municipality) = if kind == ScraperKind::CanariasLocal {
        let free: Vec<&str> = ["first", "second"]
            .iter()
            .filter_map(|id| sub.get_one::<String>(id).map(String::as_str))
            .collect();
        split_year_and_municipality(&free)?
    } else {
        let year = sub
            .get_one::<String>("year")
            .map(String::as_str)
            .map(parse_year)
            .transpose()?;
        let municipality = if kind == ScraperKind::CanariasAutonomous {
            sub.get_one::<String>("municipio").cloned()
        } else {
            None
        };
        (year, municipality)
    };

    Ok(ScrapeRequest {
        kind,
        year: year.unwrap_or_else(|| kind.default_year()),
        municipality,
        url: sub.get_one::<String>("url").cloned(),
        output: sub.get_one::<PathBuf>("output").cloned(),
    })
}

/// Parses a year argument.
///
/// # Errors
///
/// Returns `InvalidInput` if `value` is not an integer between 1900 and 2100.
pub fn parse_year(value: &str) -> AppResult<i32> {
    let year: i32 = value
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Year must be a number, got '{value}'")))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::InvalidInput(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(year)
}

/// Interprets up to two free arguments as a year (all digits) and a municipality.
///
/// # Errors
///
/// Returns `InvalidInput` when two years or two municipalities are given.
pub fn split_year_and_municipality(args: &[&str]) -> AppResult<(Option<i32>, Option<String>)> {
    let mut year = None;
    let mut municipality: Option<String> = None;

    for arg in args {
        let looks_numeric = !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit());
        if looks_numeric {
            if year.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Two years given, expected at most one (extra: '{arg}')"
                )));
            }
            year = Some(parse_year(arg)?);
        } else {
            if municipality.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Two municipalities given, expected at most one (extra: '{arg}')"
                )));
            }
            municipality = Some(arg.to_string());
        }
    }

    Ok((year, municipality))
}

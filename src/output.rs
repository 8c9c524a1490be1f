use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{HolidayRecord, ScraperKind};
use crate::territory::municipality_key;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Default JSON output path for a run.
///
/// A municipality filter (Canarias scrapers only) replaces the scraper slug with
/// `canarias_{municipality}`.
pub fn default_output_path(
    config: &ResolvedConfig,
    kind: ScraperKind,
    year: i32,
    municipality: Option<&str>,
) -> PathBuf {
    let stem = match municipality {
        Some(name) => format!("canarias_{}", municipality_key(name).replace(' ', "_")),
        None => kind.slug().to_string(),
    };
    config.output_dir.join(format!("{stem}_{year}.json"))
}

/// Writes `records` as a pretty-printed JSON array, replacing `path` atomically.
///
/// # Errors
///
/// Returns `IoError` if the directory cannot be created or the file cannot be written.
pub fn write_json(records: &[HolidayRecord], path: &Path) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| {
        AppError::IoError(format!("Failed to create output directory {}: {e}", dir.display()))
    })?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut tmp, records)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| {
        AppError::IoError(format!("Failed to write output file {}: {e}", path.display()))
    })?;

    info!(output_file = %path.display(), records = records.len(), "Holidays written");
    Ok(())
}

/// Aggregate view of a run's records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
    pub by_scope: BTreeMap<&'static str, usize>,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    /// Distinct municipalities among local records
    pub municipalities: usize,
}

impl RunSummary {
    pub fn from_records(records: &[HolidayRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut municipalities: Vec<&str> = Vec::new();

        for record in records {
            *summary.by_kind.entry(record.kind.display_name()).or_default() += 1;
            *summary.by_scope.entry(record.scope.display_name()).or_default() += 1;
            summary.first = Some(summary.first.map_or(record.date, |d| d.min(record.date)));
            summary.last = Some(summary.last.map_or(record.date, |d| d.max(record.date)));
            if let Some(name) = record.municipality.as_deref() {
                if !municipalities.contains(&name) {
                    municipalities.push(name);
                }
            }
        }
        summary.municipalities = municipalities.len();
        summary
    }

    pub fn log(&self, kind: ScraperKind, year: i32) {
        info!(
            scraper = kind.display_name(),
            year = year,
            total = self.total,
            kinds = %format_counts(&self.by_kind),
            scopes = %format_counts(&self.by_scope),
            first = ?self.first,
            last = ?self.last,
            municipalities = self.municipalities,
            "Run summary"
        );
    }
}

fn format_counts(counts: &BTreeMap<&'static str, usize>) -> String {
    counts
        .iter()
        .map(|(label, n)| format!("{label}={n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

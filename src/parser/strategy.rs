//! Ordered-strategy evaluation.
//!
//! Parsers list their extraction strategies from most to least reliable. Strategies run
//! in order until one yields at least `threshold` records; if none does, the richest
//! result is used (ties go to the earlier strategy).

use crate::dates::SpanishDate;
use crate::models::HolidayRecord;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// How records produced by a shared strategy are attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordProfile {
    National,
    Autonomous { region: &'static str },
}

impl RecordProfile {
    pub fn record(
        &self,
        date: SpanishDate,
        description: impl Into<String>,
        substitutable: bool,
    ) -> HolidayRecord {
        match *self {
            Self::National => HolidayRecord::national(date, description, substitutable),
            Self::Autonomous { region } => {
                HolidayRecord::autonomous(date, description, region, substitutable)
            }
        }
    }
}

/// Everything a strategy needs to run.
#[derive(Debug, Clone, Copy)]
pub struct ParseInput<'a> {
    pub content: &'a str,
    pub year: i32,
    pub profile: RecordProfile,
}

pub type StrategyFn = fn(&ParseInput<'_>) -> Vec<HolidayRecord>;

#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

/// Outcome of [`run_strategies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Name of the strategy whose records were kept, if any produced records
    pub strategy: Option<&'static str>,
    /// Whether the kept result reached the threshold
    pub confident: bool,
    pub records: Vec<HolidayRecord>,
}

pub fn run_strategies(strategies: &[Strategy], input: &ParseInput<'_>, threshold: usize) -> Selection {
    let mut best: Option<(&'static str, Vec<HolidayRecord>)> = None;

    for strategy in strategies {
        let records = (strategy.run)(input);
        debug!(strategy = strategy.name, records = records.len(), "Strategy finished");

        if records.len() >= threshold {
            info!(strategy = strategy.name, records = records.len(), "Strategy accepted");
            return Selection {
                strategy: Some(strategy.name),
                confident: true,
                records,
            };
        }

        let richer = best.as_ref().map_or(true, |(_, b)| records.len() > b.len());
        if !records.is_empty() && richer {
            best = Some((strategy.name, records));
        }
    }

    match best {
        Some((name, records)) => {
            warn!(
                strategy = name,
                records = records.len(),
                threshold = threshold,
                "No strategy reached the threshold, using the richest result"
            );
            Selection {
                strategy: Some(name),
                confident: false,
                records,
            }
        }
        None => {
            warn!(year = input.year, "No strategy produced any holiday");
            Selection {
                strategy: None,
                confident: false,
                records: Vec::new(),
            }
        }
    }
}

/// Keeps the first record of every date.
pub fn dedupe_by_date(records: Vec<HolidayRecord>) -> Vec<HolidayRecord> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    records.into_iter().filter(|r| seen.insert(r.date)).collect()
}

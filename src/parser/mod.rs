mod canarias_insular;
mod canarias_local;
mod fallback;
mod madrid;
mod national;
mod strategy;
mod text;

// Re-export public API
pub use canarias_insular::parse_canarias_autonomous;
pub use canarias_local::{is_municipality_header, parse_canarias_local};
pub use fallback::{line_strategy, table_strategy};
pub use madrid::{parse_madrid, MADRID_FIXED_HOLIDAYS, MADRID_REGION};
pub use national::{parse_national, FixedHoliday, NATIONAL_FIXED_HOLIDAYS, NATIONAL_THRESHOLD};
pub use strategy::{
    dedupe_by_date, run_strategies, ParseInput, RecordProfile, Selection, Strategy, StrategyFn,
};
pub use text::{html_to_text, normalize_bulletin_text, strip_control_chars, table_rows};

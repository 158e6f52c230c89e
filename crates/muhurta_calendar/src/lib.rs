//! Calendar assembly: per-classifier date ranges, the combined
//! three-source calendar, and the flat snapshot records consumed by
//! the export layers.

pub mod combined;
pub mod error;
pub mod generate;
pub mod record;

pub use combined::{
    CombinedClass, CombinedResult, SystemBreakdown, analyze, is_double_go, is_double_go_labels,
    parse_pti_label, parse_vedic_label, retag_double_go,
};
pub use error::CalendarError;
pub use generate::{DayOutcome, generate, label_map};
pub use record::{DayRecord, SNAPSHOT_KEY, records_from_snapshot, snapshot};

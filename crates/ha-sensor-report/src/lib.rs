//! Sensor inventory reports for Home Assistant
//!
//! Pulls one state snapshot, keeps the `sensor` and `binary_sensor` entities,
//! flattens each into a fixed-schema [`SensorRecord`] and writes three
//! artifacts that share one run timestamp:
//!
//! - `sensors_report_<ts>.csv` - one row per record
//! - `sensors_report_<ts>.json` - both record lists plus counts
//! - `sensors_summary_<ts>.md` - per-integration Markdown tables
//!
//! ```text
//! fetch ──▶ partition ──▶ normalize ──┬──▶ CSV / JSON
//!                                     └──▶ Markdown summary
//! ```

mod error;
pub mod export;
pub mod filter;
mod pipeline;
mod record;
mod stamp;
pub mod summary;

pub use error::{ReportError, ReportResult};
pub use filter::{partition, DomainPartition};
pub use pipeline::{run_report, run_with_source, ReportOutcome};
pub use record::{SensorRecord, SupportedFeatures, COLUMNS, NOT_AVAILABLE};
pub use stamp::{Artifact, RunStamp};
pub use summary::{Status, SummaryReport};

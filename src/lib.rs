mod alerts;
mod error;
mod export;
mod normalizer;
mod pipeline;
mod series;
mod source;
mod summary;
mod timestamp;
mod types;
mod utils;

pub mod derived;

pub use error::ForecastError;
pub use export::error::ExportError;
pub use source::error::SourceError;

pub use types::forecast_row::*;
pub use types::raw_slot::*;
pub use types::wind::{Beaufort, CompassPoint};

pub use normalizer::*;
pub use timestamp::{parse_timestamp, slot_timestamp};

pub use series::{DuplicatePolicy, ForecastSeries};
pub use summary::{daily_digests, summarize, DailyDigest, SummaryDigest};
pub use alerts::*;

pub use export::frame::EXPORT_TIME_FORMAT;
pub use source::local_csv::{matches_city, LocalCsvSource};

pub use pipeline::{build_from_json, build_from_local_csv, export_csv};

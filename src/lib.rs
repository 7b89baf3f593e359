pub mod analysis;
pub mod config;
pub mod enrichment;
pub mod normalization;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod tracing;
pub mod week;

pub mod util {
    pub mod env;
}

pub use config::SourceConfig;
pub use enrichment::{EnrichedRow, EnrichmentProgress, UNKNOWN};
pub use pipeline::{load_week, LoadStatus, WeekReport};
pub use source::{BoxOfficeSource, KoficClient};

pub mod batch;
pub mod config;
pub mod error;
pub mod input;
pub mod sink;

pub use batch::{reanalyze, ReanalysisSummary};
pub use config::WorkerConfig;
pub use error::WorkerError;
pub use sink::{FeatureSink, JsonLinesSink, MemorySink};

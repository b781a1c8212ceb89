mod analyze;
mod client;

pub use analyze::{AnalysisError, analyze};
pub use client::{AnalysisClientError, new_client};

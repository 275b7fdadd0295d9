pub mod config;
pub mod error;
pub mod outputs;
pub mod pipeline;
pub mod policy;
pub mod reports;
pub mod scan;
pub mod util;

pub use error::{ScanError, ScanResult};
pub use pipeline::{aggregate, run};

pub const TOOL_NAME: &str = "scangate";

/// JSON schema version of run summaries.
/// Bump only when the summary layout changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

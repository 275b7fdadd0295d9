use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for every hard failure in the aggregation pipeline.
///
/// Each variant carries the file path or nesting level that failed so the
/// message alone is enough to diagnose a broken scan from CI logs.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("content report {path} has no `content` field")]
    MissingContent { path: PathBuf },

    #[error("content report {path} is malformed: {message}")]
    Structure { path: PathBuf, message: String },

    #[error("policy evaluation {path} is malformed: {source}")]
    Policy {
        path: PathBuf,
        #[source]
        source: PolicyShapeError,
    },

    #[error("policy bundle {path} is unusable: {message}")]
    PolicyBundle { path: PathBuf, message: String },

    #[error("failed to start scanner {program}: {source}")]
    ScannerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scanner {program} exited with {}", exit_label(.code))]
    ScannerExit { program: String, code: Option<i32> },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Levels of the nested policy evaluation document, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationLevel {
    Evaluation,
    ImageId,
    ImageTag,
    PolicyResult,
    Status,
}

impl fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Evaluation => "evaluation array",
            Self::ImageId => "image id",
            Self::ImageTag => "image tag",
            Self::PolicyResult => "policy result array",
            Self::Status => "status",
        };
        f.write_str(label)
    }
}

/// Structural violation found while descending a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyShapeError {
    #[error("{level} level is empty")]
    Empty { level: EvaluationLevel },

    #[error("{level} level has {count} keys, expected exactly one")]
    Ambiguous { level: EvaluationLevel, count: usize },

    #[error("{level} field is missing")]
    Missing { level: EvaluationLevel },

    #[error("{level} level is not {expected}")]
    Shape {
        level: EvaluationLevel,
        expected: &'static str,
    },
}

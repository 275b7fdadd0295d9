//! Policy verdict extraction.
//!
//! The scanner writes its evaluation as a stack of wrapper levels:
//!
//! ```text
//! [ { "<image id>": { "<image tag>": [ { "status": "pass", ... } ] } } ]
//! ```
//!
//! Arrays are read at index 0. Object levels must hold exactly one key; a
//! second image id or tag has no defined meaning, so it is rejected instead
//! of picking one arbitrarily.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{EvaluationLevel, PolicyShapeError, ScanError, ScanResult};
use crate::reports::read::read_json;

/// Status value the scanner uses for a failed evaluation.
pub const FAIL_STATUS: &str = "fail";

/// Policy status exactly as the scanner reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyVerdict(String);

impl PolicyVerdict {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-sensitive comparison against [`FAIL_STATUS`].
    pub fn is_fail(&self) -> bool {
        self.0 == FAIL_STATUS
    }
}

impl fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verdict together with the image it was evaluated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub image_id: String,
    pub image_tag: String,
    pub verdict: PolicyVerdict,
}

/// Walk an evaluation document down to its status.
pub fn evaluate(document: &Value) -> Result<PolicyOutcome, PolicyShapeError> {
    let by_image = first_element(document, EvaluationLevel::Evaluation)?;
    let (image_id, by_tag) = sole_entry(by_image, EvaluationLevel::ImageId)?;
    let (image_tag, results) = sole_entry(by_tag, EvaluationLevel::ImageTag)?;
    let result = first_element(results, EvaluationLevel::PolicyResult)?;

    let Value::Object(fields) = result else {
        return Err(PolicyShapeError::Shape {
            level: EvaluationLevel::PolicyResult,
            expected: "an array of objects",
        });
    };

    let status = match fields.get("status") {
        Some(Value::String(status)) => status,
        Some(_) => {
            return Err(PolicyShapeError::Shape {
                level: EvaluationLevel::Status,
                expected: "a string",
            });
        }
        None => {
            return Err(PolicyShapeError::Missing {
                level: EvaluationLevel::Status,
            });
        }
    };

    Ok(PolicyOutcome {
        image_id: image_id.to_string(),
        image_tag: image_tag.to_string(),
        verdict: PolicyVerdict::new(status.as_str()),
    })
}

/// Extract only the status string from an evaluation document.
pub fn extract_verdict(document: &Value) -> Result<PolicyVerdict, PolicyShapeError> {
    evaluate(document).map(|outcome| outcome.verdict)
}

/// Read the evaluation file at `path` and extract its verdict.
pub fn read_verdict(path: &Path) -> ScanResult<PolicyVerdict> {
    let document = read_json(path)?;
    let outcome = evaluate(&document).map_err(|source| ScanError::Policy {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        image_id = %outcome.image_id,
        image_tag = %outcome.image_tag,
        status = %outcome.verdict,
        "policy evaluation read"
    );
    Ok(outcome.verdict)
}

fn first_element(value: &Value, level: EvaluationLevel) -> Result<&Value, PolicyShapeError> {
    match value {
        Value::Array(items) => items.first().ok_or(PolicyShapeError::Empty { level }),
        _ => Err(PolicyShapeError::Shape {
            level,
            expected: "an array",
        }),
    }
}

fn sole_entry(value: &Value, level: EvaluationLevel) -> Result<(&str, &Value), PolicyShapeError> {
    let Value::Object(map) = value else {
        return Err(PolicyShapeError::Shape {
            level,
            expected: "an object",
        });
    };

    let mut entries = map.iter();
    match (entries.next(), map.len()) {
        (Some((key, inner)), 1) => Ok((key.as_str(), inner)),
        (None, _) => Err(PolicyShapeError::Empty { level }),
        (Some(_), count) => Err(PolicyShapeError::Ambiguous { level, count }),
    }
}

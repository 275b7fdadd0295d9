use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ScanError, ScanResult};
use crate::reports::model::{BillOfMaterials, ContentReport};
use crate::reports::read::read_json;

/// Load one content report and extract its `content` records.
///
/// The document must be an object with a `content` array. A missing field
/// means the scanner changed its output shape and is reported as such
/// rather than treated as an empty report.
pub fn load_content_report(path: &Path) -> ScanResult<ContentReport> {
    let document = read_json(path)?;

    let Value::Object(mut fields) = document else {
        return Err(ScanError::Structure {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", kind_of(&document)),
        });
    };

    let content = match fields.remove("content") {
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(ScanError::Structure {
                path: path.to_path_buf(),
                message: format!("`content` must be an array, found {}", kind_of(&other)),
            });
        }
        None => {
            return Err(ScanError::MissingContent {
                path: path.to_path_buf(),
            });
        }
    };

    debug!(path = %path.display(), records = content.len(), "loaded content report");
    Ok(ContentReport {
        path: path.to_path_buf(),
        content,
    })
}

/// Load every report in `paths` and concatenate their records in order.
///
/// The first failing file aborts the merge; no partial result is returned.
pub fn merge_content_reports(paths: &[PathBuf]) -> ScanResult<BillOfMaterials> {
    let reports = paths
        .iter()
        .map(|p| load_content_report(p))
        .collect::<ScanResult<Vec<_>>>()?;

    Ok(BillOfMaterials::from_reports(reports))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

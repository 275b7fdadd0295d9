use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::PolicyBundle;
use crate::error::{ScanError, ScanResult};
use crate::reports::read::read_json;

/// Load a user-supplied policy bundle and take its name from the `id` field.
pub fn load_custom(path: &Path) -> ScanResult<PolicyBundle> {
    debug!(path = %path.display(), "loading custom policy bundle");
    let document = read_json(path)?;

    let name = match document.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => {
            return Err(ScanError::PolicyBundle {
                path: path.to_path_buf(),
                message: "could not extract id; bundle may be malformed or lack an `id` property"
                    .to_string(),
            });
        }
    };

    info!(policy_id = %name, "detected custom policy bundle");
    Ok(PolicyBundle {
        name,
        path: path.to_path_buf(),
    })
}

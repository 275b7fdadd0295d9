use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ScanError, ScanResult};

/// Cryptographic fingerprint of a written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHash {
    pub algorithm: String,
    pub value: String,
}

/// Compute the SHA-256 fingerprint of `bytes`.
///
/// Identical inputs always produce an identical fingerprint, which is what
/// lets two runs over the same reports be compared byte for byte.
pub fn fingerprint(bytes: &[u8]) -> ArtifactHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();

    ArtifactHash {
        algorithm: "sha256".to_string(),
        value: hex::encode(digest),
    }
}

/// Read and parse a JSON document, attributing any failure to `path`.
pub fn read_json(path: &Path) -> ScanResult<Value> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

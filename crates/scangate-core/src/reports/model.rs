use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ScanError, ScanResult};
use crate::reports::read::{ArtifactHash, fingerprint};

/// One scanner output file describing a single content category.
///
/// Records are opaque: the scanner owns their schema and unknown fields
/// must survive untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentReport {
    pub path: PathBuf,
    pub content: Vec<Value>,
}

/// Merged package records of every content report for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    pub packages: Vec<Value>,
}

impl BillOfMaterials {
    pub fn from_reports(reports: Vec<ContentReport>) -> Self {
        Self {
            packages: reports.into_iter().flat_map(|r| r.content).collect(),
        }
    }
}

/// Metadata about a bill of materials written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomArtifact {
    pub path: PathBuf,
    pub package_count: usize,
    pub size_bytes: u64,
    pub hash: ArtifactHash,
}

/// Serialize `bom` compactly to `path`, replacing any previous file.
pub fn write_bill_of_materials(path: &Path, bom: &BillOfMaterials) -> ScanResult<BomArtifact> {
    let bytes = serde_json::to_vec(bom).map_err(|source| ScanError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ScanError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, &bytes).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(BomArtifact {
        path: path.to_path_buf(),
        package_count: bom.packages.len(),
        size_bytes: bytes.len() as u64,
        hash: fingerprint(&bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn from_reports_concatenates_in_order() {
        let reports = vec![
            ContentReport {
                path: "content-os.json".into(),
                content: vec![json!({"a": 1}), json!({"a": 2})],
            },
            ContentReport {
                path: "content-npm.json".into(),
                content: vec![],
            },
            ContentReport {
                path: "content-gem.json".into(),
                content: vec![json!({"b": 3})],
            },
        ];

        let bom = BillOfMaterials::from_reports(reports);
        assert_eq!(
            bom.packages,
            vec![json!({"a": 1}), json!({"a": 2}), json!({"b": 3})]
        );
    }

    #[test]
    fn writes_packages_document_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("content.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let bom = BillOfMaterials {
            packages: vec![json!({"a": 1}), json!({"b": 2})],
        };
        let artifact = write_bill_of_materials(&path, &bom).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"{"packages":[{"a":1},{"b":2}]}"#);
        assert_eq!(artifact.package_count, 2);
        assert_eq!(artifact.size_bytes, written.len() as u64);
        assert_eq!(artifact.hash, fingerprint(written.as_bytes()));
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("content.json");

        write_bill_of_materials(&path, &BillOfMaterials::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"packages":[]}"#);
    }
}

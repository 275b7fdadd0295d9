use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::util::deterministic::sort_report_paths;

const CONTENT_PREFIX: &[u8] = b"content-";
const CONTENT_SUFFIX: &[u8] = b".json";

/// Whether `file_name` follows the `content-<label>.json` naming scheme.
///
/// The label may be any byte sequence, including one that is not UTF-8.
pub fn is_content_report(file_name: impl AsRef<OsStr>) -> bool {
    let name = file_name.as_ref().as_encoded_bytes();
    name.len() >= CONTENT_PREFIX.len() + CONTENT_SUFFIX.len()
        && name.starts_with(CONTENT_PREFIX)
        && name.ends_with(CONTENT_SUFFIX)
}

/// Find every content report directly inside `dir`.
///
/// Listing failures never propagate: a missing or unreadable directory
/// yields an empty list, which downstream becomes an empty bill of
/// materials. Only regular files are returned; the result is ordered by
/// file name.
pub fn find_content_reports(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no report directory found");
            return Vec::new();
        }
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "report directory could not be listed");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !is_content_report(entry.file_name()) {
            continue;
        }
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file content match");
            continue;
        }
        found.push(path);
    }

    sort_report_paths(&mut found);

    if found.is_empty() {
        debug!(dir = %dir.display(), "no content reports found");
    } else {
        debug!(dir = %dir.display(), count = found.len(), files = ?found, "located content reports");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn matches_naming_scheme() {
        assert!(is_content_report("content-os.json"));
        assert!(is_content_report("content-java.json"));
        assert!(is_content_report("content-.json"));

        assert!(!is_content_report("content.json"));
        assert!(!is_content_report("content-os.json.bak"));
        assert!(!is_content_report("my-content-os.json"));
        assert!(!is_content_report("policy_evaluation.json"));
        assert!(!is_content_report("content-.jso"));
    }

    #[test]
    fn finds_only_matching_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in [
            "content-os.json",
            "content-npm.json",
            "content.json",
            "vulnerabilities.json",
            "policy_evaluation.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let found = find_content_reports(dir.path());
        assert_eq!(names(&found), vec!["content-npm.json", "content-os.json"]);
        assert!(found.iter().all(|p| p.starts_with(dir.path())));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_located() {
        use std::os::unix::ffi::OsStrExt;

        let odd = OsStr::from_bytes(b"content-\xff.json");
        assert!(is_content_report(odd));
        assert!(!is_content_report(OsStr::from_bytes(b"\xffcontent-os.json")));

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("content-os.json"), r#"{"content":[{"a":1}]}"#).unwrap();
        if fs::write(dir.path().join(odd), r#"{"content":[{"b":2}]}"#).is_err() {
            // Filesystem rejects non-UTF-8 names; nothing to locate.
            return;
        }

        let found = find_content_reports(dir.path());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].file_name(), Some(OsStr::new("content-os.json")));
        assert_eq!(found[1].file_name(), Some(odd));
    }

    #[test]
    fn does_not_recurse_or_return_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content-dir.json")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("content-os.json"), "{}").unwrap();

        assert!(find_content_reports(dir.path()).is_empty());
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_content_reports(dir.path()).is_empty());
    }

    #[test]
    fn missing_directory_soft_fails() {
        let dir = TempDir::new().unwrap();
        assert!(find_content_reports(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn file_instead_of_directory_soft_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("content-os.json");
        fs::write(&file, "{}").unwrap();

        assert!(find_content_reports(&file).is_empty());
    }
}

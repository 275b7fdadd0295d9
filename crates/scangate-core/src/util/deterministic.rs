//! Deterministic ordering helpers.
//!
//! Directory listing order differs between platforms and filesystems. These
//! helpers pin it down so identical report directories always produce
//! identical bills of materials.

use std::path::PathBuf;

/// Sort located report paths by file name.
///
/// Ordering is byte-wise on the name so it does not depend on locale.
pub fn sort_report_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::{SCAN_SCRIPT, ScanConfig};

/// Command line handed to the scanner runner.
///
/// Argument order is fixed by the runner script:
/// `<script> <scanner image> <image> <debug> <bundle path> <bundle name> [<dockerfile>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ScanInvocation {
    pub fn from_config(config: &ScanConfig) -> Self {
        let mut args: Vec<OsString> = vec![
            SCAN_SCRIPT.into(),
            config.scanner_image.reference().into(),
            config.image_reference.clone().into(),
            config.debug.to_string().into(),
            config.policy.path.clone().into_os_string(),
            config.policy.name.clone().into(),
        ];
        if let Some(dockerfile) = &config.dockerfile_path {
            args.push(dockerfile.clone().into_os_string());
        }

        Self {
            program: config.runner.clone(),
            args,
        }
    }

    /// Printable form for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

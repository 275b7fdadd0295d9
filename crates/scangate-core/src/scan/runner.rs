use std::process::Command;

use tracing::{debug, info};

use crate::error::{ScanError, ScanResult};
use crate::scan::invocation::ScanInvocation;

/// Runs the external scanner.
///
/// Implementations must return only once the scanner has finished writing
/// its reports.
pub trait Scanner {
    fn run(&self, invocation: &ScanInvocation) -> ScanResult<()>;
}

/// Runs the scanner as a child process sharing this process's stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessScanner;

impl Scanner for ProcessScanner {
    fn run(&self, invocation: &ScanInvocation) -> ScanResult<()> {
        let program = invocation.program.display().to_string();
        debug!(command = %invocation.display(), "starting scanner");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| ScanError::ScannerSpawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ScanError::ScannerExit {
                program,
                code: status.code(),
            });
        }

        info!("scanner finished");
        Ok(())
    }
}

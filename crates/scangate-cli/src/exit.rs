/// Process exit codes.
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Completed; build not failed                    |
/// | 1    | Completed; policy failed with fail-build on    |
/// | 2    | Error (scanner failure, malformed output, I/O) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Pass = 0,
    PolicyFail = 1,
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

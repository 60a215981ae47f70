use std::fmt;
use std::io;
use std::path::Path;

use thermohid_device::DeviceError;
use thermohid_report::ReportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Exit code for an argument parsing outcome. Help and version output are not failures.
pub fn usage_code(err: &clap::Error) -> i32 {
    match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => SUCCESS,
        _ => FAILURE,
    }
}

pub fn device_error(err: DeviceError) -> CliError {
    match err {
        DeviceError::Open { ref source, .. }
            if source.kind() == io::ErrorKind::PermissionDenied =>
        {
            CliError::new(
                FAILURE,
                format!("{err} (make sure you have read access to the hidraw node)"),
            )
        }
        other => CliError::new(FAILURE, other.to_string()),
    }
}

pub fn log_open_error(path: &Path, err: io::Error) -> CliError {
    CliError::new(
        FAILURE,
        format!("unable to open log file {}: {err}", path.display()),
    )
}

pub fn report_error(context: &str, err: ReportError) -> CliError {
    match err {
        ReportError::Invalid(invalid) => CliError::new(FAILURE, invalid.to_string()),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn stdout_error(err: io::Error) -> CliError {
    CliError::new(FAILURE, format!("failed to write to stdout: {err}"))
}

pub fn signal_error(err: ctrlc::Error) -> CliError {
    CliError::new(FAILURE, format!("signal handler setup failed: {err}"))
}

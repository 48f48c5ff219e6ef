// Consistent exit codes for the ticketpilot CLI.
//
//   0 = success
//   1 = general error
//   2 = usage/argument error
//   3 = requested record not found
//   4 = dataset or config could not be read, or is inconsistent

use std::process;

use ticketpilot_common::config::ConfigError;
use ticketpilot_common::dataset::DatasetError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    NotFound = 3,
    Data = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return Self::from_error_code(cli_err.code);
            }
            if cause.downcast_ref::<DatasetError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
            {
                return Self::Data;
            }
        }
        Self::Error
    }

    /// Map a CLI error code string to an exit code.
    pub fn from_error_code(code: &str) -> Self {
        match code {
            "INVALID_ARGUMENT" | "DATA_PATH_MISSING" => Self::Usage,

            "TICKET_NOT_FOUND" | "CONFIG_NOT_FOUND" => Self::NotFound,

            "DATA_INCONSISTENT" => Self::Data,

            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

/// A typed CLI failure that can be embedded in an `anyhow::Error` chain.
#[derive(Debug)]
pub struct CliError {
    pub code: &'static str,
    pub message: String,
}

impl CliError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

// Rendering of views and errors.
//
// Views go to stdout as text on a terminal and as one JSON document otherwise
// (or always with `--json`). Errors go to stderr in the same format.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use ticketpilot_common::config::ConfigError;
use ticketpilot_common::dataset::DatasetError;

use crate::context::DATA_ENV;
use crate::exit_code::CliError;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn detect(json_flag: bool) -> Self {
        Self::choose(json_flag, io::stdout().is_terminal())
    }

    fn choose(json_flag: bool, stdout_is_tty: bool) -> Self {
        if json_flag || !stdout_is_tty {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Render a view to stdout.
pub fn print_output<T, F>(format: OutputFormat, view: &T, human: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    write_output(&mut io::stdout().lock(), format, view, human)
}

/// Render a view to `writer`, newline-terminated in both formats.
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    view: &T,
    human: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => writeln!(writer, "{}", human(view)),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, view).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Print a mapped, actionable error for a command failure.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    let (code, message) = actionable_error(error);
    let line = render_error(format, code, &message, io::stderr().is_terminal());
    let _ = writeln!(io::stderr().lock(), "{line}");
}

fn render_error(format: OutputFormat, code: &str, message: &str, stderr_is_tty: bool) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::json!({ "error": { "code": code, "message": message } }).to_string()
        }
        OutputFormat::Human if stderr_is_tty => format!("{ANSI_RED}error:{ANSI_RESET} {message}"),
        OutputFormat::Human => format!("error: {message}"),
    }
}

fn actionable_error(error: &anyhow::Error) -> (&'static str, String) {
    let message = format!("{error:#}");

    for cause in error.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            let hint = match cli_err.code {
                "TICKET_NOT_FOUND" => " Run: ticketpilot tickets to list ticket ids",
                "DATA_INCONSISTENT" => " Fix the ids listed above and re-run: ticketpilot validate",
                _ => "",
            };
            return (cli_err.code, format!("{}.{hint}", cli_err.message));
        }
        if let Some(data_err) = cause.downcast_ref::<DatasetError>() {
            return match data_err {
                DatasetError::Io(source) if source.kind() == io::ErrorKind::NotFound => (
                    "DATA_NOT_FOUND",
                    format!("{message}. Check the --data path or ${DATA_ENV}"),
                ),
                DatasetError::Io(_) => ("DATA_UNREADABLE", message),
                DatasetError::Parse(_) => (
                    "DATA_INVALID",
                    format!("{message}. Expected a JSON snapshot with tickets, users and projects"),
                ),
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return (
                "CONFIG_INVALID",
                format!("{message}. Fix the file or remove it to use the built-in defaults"),
            );
        }
    }

    ("ERROR", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_unless_human_terminal() {
        assert_eq!(OutputFormat::choose(false, true), OutputFormat::Human);
        assert_eq!(OutputFormat::choose(false, false), OutputFormat::Json);
        assert_eq!(OutputFormat::choose(true, true), OutputFormat::Json);
    }

    #[test]
    fn json_error_carries_code_and_message() {
        let line =
            render_error(OutputFormat::Json, "TICKET_NOT_FOUND", "ticket TP-9999 not found", true);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["error"]["code"], "TICKET_NOT_FOUND");
        assert_eq!(parsed["error"]["message"], "ticket TP-9999 not found");
    }

    #[test]
    fn human_error_is_coloured_only_on_a_terminal() {
        let tty = render_error(OutputFormat::Human, "ERROR", "boom", true);
        assert!(tty.starts_with(ANSI_RED));
        assert!(tty.ends_with("boom"));
        assert_eq!(render_error(OutputFormat::Human, "ERROR", "boom", false), "error: boom");
    }

    #[test]
    fn actionable_error_ticket_not_found_message() {
        let err = anyhow::Error::new(CliError::new("TICKET_NOT_FOUND", "ticket TP-9999 not found"));
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "TICKET_NOT_FOUND");
        assert!(message.contains("TP-9999"));
        assert!(message.contains("ticketpilot tickets"));
    }

    #[test]
    fn actionable_error_missing_dataset_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = anyhow::Error::new(DatasetError::Io(io)).context("failed to load dataset x.json");
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "DATA_NOT_FOUND");
        assert!(message.contains("x.json"));
        assert!(message.contains("TICKETPILOT_DATA"));
    }

    #[test]
    fn actionable_error_malformed_dataset_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = anyhow::Error::new(DatasetError::Parse(parse));
        let (code, _) = actionable_error(&err);
        assert_eq!(code, "DATA_INVALID");
    }

    #[test]
    fn actionable_error_generic_passthrough() {
        let err = anyhow::anyhow!("something broke");
        assert_eq!(actionable_error(&err), ("ERROR", "something broke".to_string()));
    }
}

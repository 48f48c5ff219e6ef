// ticketpilot CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod exit_code;
mod output;

use context::GlobalArgs;
use exit_code::ExitCode;
use output::OutputFormat;

const LOG_ENV: &str = "TICKETPILOT_LOG";

#[derive(Parser)]
#[command(name = "ticketpilot", about = "Ticket dashboard views over a dataset snapshot")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: commands::Command,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let format = OutputFormat::detect(cli.global.json);
    match commands::run(cli.command, &cli.global, format) {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            output::print_anyhow_error(format, &err);
            ExitCode::from_error(&err).into()
        }
    }
}

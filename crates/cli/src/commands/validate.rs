// `ticketpilot validate`: list references that resolve to nothing.
//
// Views silently omit dangling ids; this command is where they surface.

use clap::Args;
use serde::Serialize;

use ticketpilot_common::dataset::{DanglingReference, Dataset};

use crate::context::{Context, GlobalArgs};
use crate::exit_code::CliError;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ValidateArgs {}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateReport {
    pub tickets: usize,
    pub users: usize,
    pub projects: usize,
    pub dangling: Vec<DanglingReference>,
}

pub fn run(_args: ValidateArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let report = build(&ctx.dataset);
    output::print_output(format, &report, format_human)?;

    if report.dangling.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(
            "DATA_INCONSISTENT",
            format!("{} dangling reference(s)", report.dangling.len()),
        )
        .into())
    }
}

fn build(dataset: &Dataset) -> ValidateReport {
    ValidateReport {
        tickets: dataset.tickets.len(),
        users: dataset.users.len(),
        projects: dataset.projects.len(),
        dangling: dataset.validate(),
    }
}

fn format_human(report: &ValidateReport) -> String {
    let mut lines = vec![format!(
        "{} tickets, {} users, {} projects",
        report.tickets, report.users, report.projects
    )];
    if report.dangling.is_empty() {
        lines.push("All references resolve.".into());
    }
    for d in &report.dangling {
        lines.push(format!(
            "  {}: {} `{}` does not exist",
            d.owner_id,
            d.kind.as_str(),
            d.missing_id
        ));
    }
    lines.join("\n")
}

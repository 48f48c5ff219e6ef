// `ticketpilot workload`: open tickets per developer and QA engineer.

use clap::Args;
use serde::Serialize;

use ticketpilot_common::projection::workload::{
    open_ticket_count, workload_distribution, WorkloadRow,
};

use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

const BAR_WIDTH: f64 = 20.0;

#[derive(Debug, Args)]
pub struct WorkloadArgs {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadEntry {
    #[serde(flatten)]
    pub row: WorkloadRow,
    /// Open tickets actually assigned in the snapshot.
    pub assigned_open: usize,
}

pub fn run(_args: WorkloadArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let entries = build(&ctx);
    output::print_output(format, &entries, |e| format_human(e))?;
    Ok(())
}

fn build(ctx: &Context) -> Vec<WorkloadEntry> {
    workload_distribution(&ctx.dataset.users, &ctx.config.workload)
        .into_iter()
        .map(|row| {
            let assigned_open = open_ticket_count(&row.user_id, &ctx.dataset.tickets);
            WorkloadEntry { row, assigned_open }
        })
        .collect()
}

fn format_human(entries: &[WorkloadEntry]) -> String {
    if entries.is_empty() {
        return "No developers or QA engineers in the dataset.".into();
    }
    entries
        .iter()
        .map(|e| {
            let r = &e.row;
            let filled = (r.bar_percent / 100.0 * BAR_WIDTH).round() as usize;
            let empty = BAR_WIDTH as usize - filled;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));
            let mismatch = if r.consistent {
                String::new()
            } else {
                format!("  (count suggests {})", r.derived_level.label())
            };
            format!(
                "{:<18} {bar} {:>3}  {}{mismatch}",
                r.name,
                r.open_tickets,
                r.level.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

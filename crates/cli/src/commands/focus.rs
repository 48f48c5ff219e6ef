// `ticketpilot focus`: the current user's assigned tickets, most urgent first.

use clap::Args;
use serde::Serialize;

use ticketpilot_common::projection::priority::focus_queue;
use ticketpilot_common::projection::summary::{summarize, TicketSummary};

use super::summary_line;
use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct FocusArgs {
    /// Maximum number of tickets (defaults to the configured focus limit).
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FocusResult {
    pub user: String,
    pub tickets: Vec<TicketSummary>,
}

pub fn run(args: FocusArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let result = build(&ctx, args.limit);
    output::print_output(format, &result, format_human)?;
    Ok(())
}

fn build(ctx: &Context, limit: Option<usize>) -> FocusResult {
    let limit = limit.unwrap_or(ctx.config.focus.limit);
    let tickets = focus_queue(&ctx.dataset.tickets, &ctx.user, limit)
        .into_iter()
        .map(|t| summarize(t, &ctx.dataset, &ctx.config.labels, ctx.now, Some(2)))
        .collect();
    FocusResult { user: ctx.user.clone(), tickets }
}

fn format_human(result: &FocusResult) -> String {
    if result.tickets.is_empty() {
        return format!("No tickets assigned to {}.", result.user);
    }
    let mut lines = vec![format!("{} ticket(s) for {}", result.tickets.len(), result.user)];
    lines.extend(result.tickets.iter().map(|t| format!("  {}", summary_line(t))));
    lines.join("\n")
}

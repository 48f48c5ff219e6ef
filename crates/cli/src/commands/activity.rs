// `ticketpilot activity`: recent activity feed.

use clap::Args;

use ticketpilot_common::projection::activity::{activity_entries, ActivityEntry};

use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Maximum number of entries.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

pub fn run(args: ActivityArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let entries = activity_entries(&ctx.dataset.activities, args.limit, ctx.now);
    output::print_output(format, &entries, |e| format_human(e))?;
    Ok(())
}

fn format_human(entries: &[ActivityEntry]) -> String {
    if entries.is_empty() {
        return "No recent activity.".into();
    }
    entries
        .iter()
        .map(|a| {
            let when = a.when.as_deref().unwrap_or("?");
            format!(
                "{when:>8}  {:<16} {} {} ({})",
                a.kind.as_str(),
                a.user_name,
                a.description,
                a.ticket_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

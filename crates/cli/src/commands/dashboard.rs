// `ticketpilot dashboard`: headline counters plus the dashboard panels.

use clap::Args;

use ticketpilot_common::projection::dashboard::{dashboard_view, DashboardView};

use super::summary_line;
use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Number of activity entries to show.
    #[arg(long, default_value_t = 5)]
    activity: usize,
}

pub fn run(args: DashboardArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let view = build(&ctx, args.activity);
    output::print_output(format, &view, format_human)?;
    Ok(())
}

fn build(ctx: &Context, activity: usize) -> DashboardView {
    dashboard_view(&ctx.dataset, &ctx.user, &ctx.config, ctx.now, activity)
}

fn format_human(view: &DashboardView) -> String {
    let s = &view.stats;
    let mut lines = vec![
        format!(
            "My open: {}  In progress: {}  Awaiting QA: {}  Overdue: {}  Resolved this week: {}",
            s.my_open_tickets, s.in_progress, s.awaiting_qa, s.overdue, s.resolved_this_week
        ),
        format!("Project health: {}% ({})", s.health_score, s.health_band.label()),
        String::new(),
        "Focus queue".to_string(),
    ];

    if view.focus.is_empty() {
        lines.push("  Nothing assigned.".into());
    }
    lines.extend(view.focus.iter().map(|t| format!("  {}", summary_line(t))));

    lines.push(String::new());
    lines.push("Team workload".into());
    for row in &view.workload {
        lines.push(format!(
            "  {:<18} {:>3} open  {}",
            row.name,
            row.open_tickets,
            row.level.label()
        ));
    }

    lines.push(String::new());
    lines.push("Active projects".into());
    for p in &view.projects {
        lines.push(format!(
            "  {:<18} {:>3}%  health {} ({})",
            p.name,
            p.progress.percent,
            p.health,
            p.health_band.label()
        ));
    }

    lines.push(String::new());
    lines.push("Recent activity".into());
    for a in &view.activity {
        let when = a.when.as_deref().unwrap_or("unknown time");
        lines.push(format!("  {} {} on {} ({when})", a.user_name, a.description, a.ticket_id));
    }
    lines.join("\n")
}

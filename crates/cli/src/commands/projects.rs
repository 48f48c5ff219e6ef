// `ticketpilot projects`: project cards with progress and health.

use clap::Args;

use ticketpilot_common::projection::project::{project_list, ProjectListView};
use ticketpilot_common::types::ProjectStatus;

use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    /// Case-insensitive match on the project name.
    #[arg(long)]
    search: Option<String>,

    /// active, on-hold, completed or planning.
    #[arg(long)]
    status: Option<ProjectStatus>,
}

pub fn run(args: ProjectsArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let view = build(&ctx, &args);
    output::print_output(format, &view, format_human)?;
    Ok(())
}

fn build(ctx: &Context, args: &ProjectsArgs) -> ProjectListView {
    project_list(&ctx.dataset, args.search.as_deref(), args.status, &ctx.config, ctx.now)
}

fn format_human(view: &ProjectListView) -> String {
    let s = &view.stats;
    let mut lines = vec![format!(
        "{} project(s): {} active, {} on hold, {} completed, {} planning",
        s.total, s.active, s.on_hold, s.completed, s.planning
    )];
    if view.projects.is_empty() {
        lines.push("No projects match.".into());
    }
    for p in &view.projects {
        let client = p.client.as_deref().map(|c| format!(" for {c}")).unwrap_or_default();
        lines.push(format!("{} [{}]{client}", p.name, p.status.as_str()));
        lines.push(format!(
            "  progress {}% ({}/{})  overdue {}  critical {}  health {} ({})",
            p.progress.percent,
            p.progress.completed,
            p.progress.total,
            p.overdue,
            p.critical,
            p.health,
            p.health_band.label()
        ));
        if !p.team.is_empty() {
            let team: Vec<&str> = p.team.iter().map(|m| m.name.as_str()).collect();
            lines.push(format!("  team: {}", team.join(", ")));
        }
    }
    lines.join("\n")
}

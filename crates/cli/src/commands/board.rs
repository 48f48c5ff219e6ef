// `ticketpilot board`: Kanban columns with WIP limits.

use clap::Args;

use ticketpilot_common::projection::board::{board_view, BoardView};

use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Only show tickets of this project id.
    #[arg(long)]
    project: Option<String>,
}

pub fn run(args: BoardArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let view = build(&ctx, args.project.as_deref());
    output::print_output(format, &view, format_human)?;
    Ok(())
}

fn build(ctx: &Context, project: Option<&str>) -> BoardView {
    let tickets = ctx
        .dataset
        .tickets
        .iter()
        .filter(|t| project.map_or(true, |p| t.project_id == p));
    board_view(tickets, &ctx.dataset, &ctx.config, ctx.now)
}

fn format_human(view: &BoardView) -> String {
    let mut lines = Vec::new();
    for column in &view.columns {
        let count = match column.wip_limit {
            Some(limit) => format!("{}/{}", column.count, limit),
            None => column.count.to_string(),
        };
        let breach = if column.over_limit { "  OVER WIP LIMIT" } else { "" };
        lines.push(format!("{} ({count}){breach}", column.label));

        if column.cards.is_empty() {
            lines.push("  (no tickets)".into());
        }
        for card in &column.cards {
            let mut line = format!("  {} {} [{}]", card.id, card.title, card.priority.as_str());
            if card.overdue {
                line.push_str(" OVERDUE");
            }
            if let Some(eta) = &card.ai_predicted_eta {
                line.push_str(&format!(" eta {eta}"));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

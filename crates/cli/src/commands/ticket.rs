// `ticketpilot ticket <ID>`: full ticket detail with status flow and comments.

use clap::Args;

use ticketpilot_common::projection::comments::Audience;
use ticketpilot_common::projection::detail::{ticket_detail_for, TicketDetail};
use ticketpilot_common::projection::status_flow::StepState;

use crate::context::{Context, GlobalArgs};
use crate::exit_code::CliError;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct TicketArgs {
    /// Ticket id, e.g. TP-0142.
    id: String,

    /// Comment audience: team sees everything, client only shared comments.
    #[arg(long, default_value = "team")]
    audience: Audience,
}

pub fn run(args: TicketArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let detail = build(&ctx, &args.id, args.audience)?;
    output::print_output(format, &detail, format_human)?;
    Ok(())
}

fn build(ctx: &Context, id: &str, audience: Audience) -> anyhow::Result<TicketDetail> {
    ticket_detail_for(&ctx.dataset, id, audience, Some(ctx.user.as_str()), &ctx.config, ctx.now)
        .ok_or_else(|| CliError::new("TICKET_NOT_FOUND", format!("ticket `{id}` not found")).into())
}

fn format_human(d: &TicketDetail) -> String {
    let mut lines = vec![
        format!("{} {}", d.id, d.title),
        format!(
            "{} | {} | {}{}",
            d.status.label(),
            d.priority.label(),
            d.kind.label(),
            d.project.as_ref().map(|p| format!(" | {}", p.name)).unwrap_or_default()
        ),
    ];

    let flow: Vec<String> = d
        .flow
        .iter()
        .map(|step| match step.state {
            StepState::Completed => format!("✓ {}", step.status.as_str()),
            StepState::Current => format!("[{}]", step.status.as_str()),
            StepState::Upcoming => step.status.as_str().to_string(),
        })
        .collect();
    lines.push(format!("Flow: {}", flow.join(" → ")));

    if let Some(summary) = &d.ai_summary {
        lines.push(format!("AI summary: {summary}"));
    }
    if !d.description.is_empty() {
        lines.push(String::new());
        lines.push(d.description.clone());
        lines.push(String::new());
    }

    let assignees: Vec<&str> = d.assignees.iter().map(|a| a.name.as_str()).collect();
    lines.push(format!(
        "Assignees: {}",
        if assignees.is_empty() { "unassigned".to_string() } else { assignees.join(", ") }
    ));
    lines.push(format!(
        "Reporter: {}",
        d.reporter.as_ref().map(|r| r.name.as_str()).unwrap_or("unknown")
    ));
    if !d.labels.is_empty() {
        let labels: Vec<&str> = d.labels.iter().map(|l| l.label.as_str()).collect();
        lines.push(format!("Labels: {}", labels.join(", ")));
    }
    if let Some(due) = d.due_date {
        let flag = if d.overdue { " (overdue)" } else { "" };
        lines.push(format!("Due: {}{flag}", due.format("%b %-d, %Y %H:%M")));
    }
    lines.push(format!("SLA: {}", d.sla.label()));
    if let Some(eta) = &d.ai_predicted_eta {
        lines.push(format!("AI ETA: {eta}"));
    }
    if let (Some(est), Some(logged)) = (&d.estimated_time, &d.logged_time) {
        lines.push(format!("Time: {logged} logged of {est}"));
    }

    lines.push(String::new());
    lines.push(format!("Comments ({})", d.comments.len()));
    for c in &d.comments {
        let when = c.when.as_deref().unwrap_or("unknown time");
        lines.push(format!("  {} ({when}): {}", c.author, c.content));
        if !c.reactions.is_empty() {
            let chips: Vec<String> = c
                .reactions
                .iter()
                .map(|r| {
                    let mine = if r.reacted { "*" } else { "" };
                    format!("{} {}{mine}", r.emoji, r.count)
                })
                .collect();
            lines.push(format!("    {}", chips.join("  ")));
        }
    }
    lines.join("\n")
}

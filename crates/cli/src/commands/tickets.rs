// `ticketpilot tickets`: the filterable, sortable, groupable ticket table.

use clap::Args;

use ticketpilot_common::projection::query::{
    run_query, GroupKey, QuickFilter, SortKey, TicketListView, TicketQuery, ViewContext,
};
use ticketpilot_common::types::{Priority, TicketStatus};

use super::summary_line;
use crate::context::{Context, GlobalArgs};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct TicketsArgs {
    /// Quick filter (my-tickets, unassigned, overdue, critical, blocked,
    /// client-tickets, updated-today). Repeat to combine.
    #[arg(long = "filter", value_delimiter = ',')]
    filters: Vec<QuickFilter>,

    /// Case-insensitive match on id, title or label.
    #[arg(long)]
    search: Option<String>,

    /// Only these statuses.
    #[arg(long, value_delimiter = ',')]
    status: Vec<TicketStatus>,

    /// Only these priorities.
    #[arg(long, value_delimiter = ',')]
    priority: Vec<Priority>,

    /// Only tickets of this project id.
    #[arg(long)]
    project: Option<String>,

    /// Only tickets assigned to this user id.
    #[arg(long)]
    assignee: Option<String>,

    /// Only tickets carrying this label.
    #[arg(long)]
    label: Option<String>,

    /// priority, due-date, updated, created or id.
    #[arg(long, default_value = "updated")]
    sort: SortKey,

    /// none, status, priority, project, assignee or type.
    #[arg(long, default_value = "none")]
    group: GroupKey,
}

impl TicketsArgs {
    fn into_query(self) -> TicketQuery {
        TicketQuery {
            quick_filters: self.filters,
            search: self.search,
            statuses: self.status,
            priorities: self.priority,
            project_id: self.project,
            assignee_id: self.assignee,
            label: self.label,
            sort: self.sort,
            group: self.group,
        }
    }
}

pub fn run(args: TicketsArgs, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = Context::load(global)?;
    let view = build(&ctx, &args.into_query());
    output::print_output(format, &view, format_human)?;
    Ok(())
}

fn build(ctx: &Context, query: &TicketQuery) -> TicketListView {
    let view_ctx = ViewContext { current_user: &ctx.user, now: ctx.now };
    run_query(&ctx.dataset, query, &ctx.config, &view_ctx)
}

fn format_human(view: &TicketListView) -> String {
    if view.total == 0 {
        return "No tickets match.".into();
    }

    let mut lines = vec![format!("{} ticket(s)", view.total)];
    let grouped = view.groups.len() > 1 || view.groups.first().is_some_and(|g| g.key != "all");
    for group in &view.groups {
        let indent = if grouped {
            lines.push(format!("{} ({})", group.label, group.tickets.len()));
            "    "
        } else {
            "  "
        };
        lines.extend(group.tickets.iter().map(|t| format!("{indent}{}", summary_line(t))));
    }
    lines.join("\n")
}

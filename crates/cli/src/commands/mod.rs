// CLI subcommand dispatch.

use clap::Subcommand;

use ticketpilot_common::projection::sla::SlaClass;
use ticketpilot_common::projection::summary::TicketSummary;

use crate::context::GlobalArgs;
use crate::output::OutputFormat;

pub mod activity;
pub mod board;
pub mod dashboard;
pub mod focus;
pub mod projects;
pub mod ticket;
pub mod tickets;
pub mod validate;
pub mod workload;

#[derive(Subcommand)]
pub enum Command {
    /// Headline counters, focus queue, workload, projects and recent activity
    Dashboard(dashboard::DashboardArgs),
    /// Your assigned tickets, most urgent first
    Focus(focus::FocusArgs),
    /// Kanban board grouped by status
    Board(board::BoardArgs),
    /// Filter, sort and group the ticket table
    Tickets(tickets::TicketsArgs),
    /// Show one ticket with its status flow and comments
    Ticket(ticket::TicketArgs),
    /// Project cards with progress and health
    Projects(projects::ProjectsArgs),
    /// Open tickets per developer and QA
    Workload(workload::WorkloadArgs),
    /// Recent activity, newest first
    Activity(activity::ActivityArgs),
    /// Report references that point at missing records
    Validate(validate::ValidateArgs),
}

pub fn run(cmd: Command, global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        Command::Dashboard(args) => dashboard::run(args, global, format),
        Command::Focus(args) => focus::run(args, global, format),
        Command::Board(args) => board::run(args, global, format),
        Command::Tickets(args) => tickets::run(args, global, format),
        Command::Ticket(args) => ticket::run(args, global, format),
        Command::Projects(args) => projects::run(args, global, format),
        Command::Workload(args) => workload::run(args, global, format),
        Command::Activity(args) => activity::run(args, global, format),
        Command::Validate(args) => validate::run(args, global, format),
    }
}

/// One-line rendering of an annotated ticket, shared by the list views.
pub(crate) fn summary_line(t: &TicketSummary) -> String {
    let mut line = format!(
        "{:<8} {:<9} {:<12} {}",
        t.id,
        t.priority.as_str(),
        t.status.as_str(),
        t.title
    );

    if !t.assignees.is_empty() {
        let initials: Vec<&str> = t.assignees.iter().map(|a| a.initials.as_str()).collect();
        line.push_str(&format!(" ({})", initials.join(", ")));
    }
    if let Some(due) = &t.due_relative {
        line.push_str(&format!(" due {due}"));
    }
    if t.overdue {
        line.push_str(" OVERDUE");
    }
    if t.sla != SlaClass::Absent {
        line.push_str(&format!(" [SLA {}]", t.sla.label()));
    }
    line
}

#[cfg(test)]
pub(crate) mod testing {
    // Fixture snapshot shared by the command tests.

    use chrono::{DateTime, TimeZone, Utc};
    use serde::Serialize;
    use ticketpilot_common::config::ProjectionConfig;
    use ticketpilot_common::dataset::Dataset;

    use crate::context::Context;
    use crate::output::{write_output, OutputFormat};

    pub const DATASET: &str = include_str!("../../../../tests/fixtures/dataset.json");

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).single().expect("valid test timestamp")
    }

    pub fn context() -> Context {
        Context {
            dataset: Dataset::from_json_str(DATASET).expect("fixture dataset parses"),
            config: ProjectionConfig::default(),
            now: now(),
            user: "u1".into(),
        }
    }

    /// What a command would print to stdout for `view`.
    pub fn render<T, F>(format: OutputFormat, view: &T, human: F) -> String
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        let mut buf = Vec::new();
        write_output(&mut buf, format, view, human).expect("write to Vec");
        String::from_utf8(buf).expect("utf-8 output")
    }

    pub fn render_json<T: Serialize>(view: &T) -> serde_json::Value {
        let out = render(OutputFormat::Json, view, |_| unreachable!("json output"));
        assert!(out.ends_with('\n'));
        serde_json::from_str(out.trim_end()).expect("valid json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketpilot_common::projection::summary::summarize;

    #[test]
    fn summary_line_shows_flags() {
        let ctx = testing::context();
        let ticket = ctx.dataset.ticket("TP-0142").unwrap();
        let summary = summarize(ticket, &ctx.dataset, &ctx.config.labels, ctx.now, Some(2));
        let line = summary_line(&summary);
        assert!(line.starts_with("TP-0142"));
        assert!(line.contains("critical"));
        assert!(line.contains("OVERDUE"));
        assert!(line.contains("[SLA At Risk]"));
    }
}

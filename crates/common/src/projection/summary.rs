// Annotated ticket view-model shared by the focus queue, board cards and
// table rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::{label_chips, LabelChip};
use super::overdue::derive_overdue;
use super::sla::{classify_sla, SlaClass};
use crate::config::LabelPalette;
use crate::dataset::Dataset;
use crate::timestamp::format_relative;
use crate::types::{Priority, Project, Ticket, TicketStatus, TicketType, User};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
    pub initials: String,
}

impl From<&User> for PersonRef {
    fn from(user: &User) -> Self {
        Self { id: user.id.clone(), name: user.name.clone(), initials: user.initials() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectTag {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<&Project> for ProjectTag {
    fn from(project: &Project) -> Self {
        Self { id: project.id.clone(), name: project.name.clone(), color: project.color.clone() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: TicketType,
    /// `None` when the project id does not resolve.
    pub project: Option<ProjectTag>,
    /// Resolved assignees; unknown ids are dropped.
    pub assignees: Vec<PersonRef>,
    pub labels: Vec<LabelChip>,
    pub hidden_labels: usize,
    pub due_date: Option<DateTime<Utc>>,
    pub due_relative: Option<String>,
    pub overdue: bool,
    pub sla: SlaClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_predicted_eta: Option<String>,
    pub updated_relative: Option<String>,
    pub comment_count: usize,
}

/// Build the row/card annotations for one ticket. `max_labels` caps the
/// visible label chips (cards show two).
pub fn summarize(
    ticket: &Ticket,
    dataset: &Dataset,
    palette: &LabelPalette,
    now: DateTime<Utc>,
    max_labels: Option<usize>,
) -> TicketSummary {
    let (labels, hidden_labels) = label_chips(&ticket.labels, palette, max_labels);
    let due_date = ticket.due_at();

    TicketSummary {
        id: ticket.id.clone(),
        title: ticket.title.clone(),
        ai_summary: ticket.ai_summary.clone(),
        status: ticket.status,
        priority: ticket.priority,
        kind: ticket.kind,
        project: dataset.project(&ticket.project_id).map(ProjectTag::from),
        assignees: dataset
            .resolve_users(&ticket.assignee_ids)
            .into_iter()
            .map(PersonRef::from)
            .collect(),
        labels,
        hidden_labels,
        due_date,
        due_relative: due_date.map(|due| format_relative(due, now)),
        overdue: derive_overdue(ticket, now),
        sla: classify_sla(ticket),
        ai_predicted_eta: ticket.ai_predicted_eta.clone(),
        updated_relative: ticket.updated().map(|ts| format_relative(ts, now)),
        comment_count: dataset.comment_count(&ticket.id),
    }
}

// Single-ticket detail view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::comments::{has_reacted, visible_comments, Audience};
use super::labels::{label_chips, LabelChip};
use super::overdue::derive_overdue;
use super::sla::{classify_sla, SlaClass};
use super::status_flow::{status_flow_steps, FlowStep};
use super::summary::{PersonRef, ProjectTag};
use crate::config::ProjectionConfig;
use crate::dataset::Dataset;
use crate::timestamp::{format_relative, parse_timestamp_lenient};
use crate::types::{CommentVisibility, Priority, Ticket, TicketStatus, TicketType, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub author_role: UserRole,
    pub content: String,
    pub visibility: CommentVisibility,
    pub when: Option<String>,
    pub reactions: Vec<ReactionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReactionView {
    pub emoji: String,
    pub count: u32,
    /// The viewer is among the reactors.
    pub reacted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: TicketType,
    pub project: Option<ProjectTag>,
    pub assignees: Vec<PersonRef>,
    /// `None` when the reporter id does not resolve.
    pub reporter: Option<PersonRef>,
    pub labels: Vec<LabelChip>,
    pub flow: Vec<FlowStep>,
    pub due_date: Option<DateTime<Utc>>,
    pub overdue: bool,
    pub sla: SlaClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_predicted_eta: Option<String>,
    pub created_relative: Option<String>,
    pub updated_relative: Option<String>,
    pub comments: Vec<CommentView>,
}

/// Detail for `ticket_id` as seen by the team.
pub fn ticket_detail(
    dataset: &Dataset,
    ticket_id: &str,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> Option<TicketDetail> {
    ticket_detail_for(dataset, ticket_id, Audience::Team, None, config, now)
}

/// Detail for `ticket_id` with the comment thread filtered for `audience`.
/// Reactions are flagged for `viewer` when one is given.
pub fn ticket_detail_for(
    dataset: &Dataset,
    ticket_id: &str,
    audience: Audience,
    viewer: Option<&str>,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> Option<TicketDetail> {
    let ticket = dataset.ticket(ticket_id)?;
    debug!(ticket = ticket_id, audience = audience.as_str(), "building ticket detail");
    Some(build(ticket, dataset, audience, viewer, config, now))
}

fn build(
    ticket: &Ticket,
    dataset: &Dataset,
    audience: Audience,
    viewer: Option<&str>,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> TicketDetail {
    let (labels, _) = label_chips(&ticket.labels, &config.labels, None);
    let comments = visible_comments(&dataset.comments, &ticket.id, audience)
        .into_iter()
        .map(|c| CommentView {
            id: c.id.clone(),
            author: c.user_name.clone(),
            author_role: c.user_role,
            content: c.content.clone(),
            visibility: c.visibility,
            when: parse_timestamp_lenient(&c.created_at).map(|ts| format_relative(ts, now)),
            reactions: c
                .reactions
                .iter()
                .map(|r| ReactionView {
                    emoji: r.emoji.clone(),
                    count: r.count,
                    reacted: viewer.is_some_and(|user| has_reacted(r, user)),
                })
                .collect(),
        })
        .collect();

    TicketDetail {
        id: ticket.id.clone(),
        title: ticket.title.clone(),
        description: ticket.description.clone(),
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
        reporter: dataset.user(&ticket.reporter_id).map(PersonRef::from),
        labels,
        flow: status_flow_steps(ticket.status, &config.flow.steps),
        due_date: ticket.due_at(),
        overdue: derive_overdue(ticket, now),
        sla: classify_sla(ticket),
        estimated_time: ticket.estimated_time.clone(),
        logged_time: ticket.logged_time.clone(),
        ai_predicted_eta: ticket.ai_predicted_eta.clone(),
        created_relative: ticket.created().map(|ts| format_relative(ts, now)),
        updated_relative: ticket.updated().map(|ts| format_relative(ts, now)),
        comments,
    }
}

// Kanban projection: one group per configured column.
//
// Tickets whose status has no column (blocked, closed, reopened with the
// default layout) do not appear on the board at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::summary::{summarize, TicketSummary};
use crate::config::{BoardColumn, ProjectionConfig};
use crate::dataset::Dataset;
use crate::types::{Ticket, TicketStatus};

/// Cards show at most this many labels.
const CARD_LABEL_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroup<'a> {
    pub status: TicketStatus,
    /// Tickets in input order.
    pub tickets: Vec<&'a Ticket>,
    pub wip_limit: Option<usize>,
    /// `count > wip_limit`; always false without a limit.
    pub over_limit: bool,
}

/// Column groups in configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroups<'a> {
    pub groups: Vec<StatusGroup<'a>>,
}

impl<'a> StatusGroups<'a> {
    pub fn get(&self, status: TicketStatus) -> Option<&StatusGroup<'a>> {
        self.groups.iter().find(|g| g.status == status)
    }

    /// Total number of tickets placed on the board.
    pub fn placed(&self) -> usize {
        self.groups.iter().map(|g| g.tickets.len()).sum()
    }
}

/// Partition `tickets` among `columns` by status, preserving input order.
pub fn group_by_status<'a, I>(tickets: I, columns: &[BoardColumn]) -> StatusGroups<'a>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut groups: Vec<StatusGroup<'a>> = columns
        .iter()
        .map(|column| StatusGroup {
            status: column.status,
            tickets: Vec::new(),
            wip_limit: column.wip_limit,
            over_limit: false,
        })
        .collect();

    let mut skipped = 0usize;
    for ticket in tickets {
        match groups.iter_mut().find(|g| g.status == ticket.status) {
            Some(group) => group.tickets.push(ticket),
            None => skipped += 1,
        }
    }

    for group in &mut groups {
        group.over_limit = group.wip_limit.is_some_and(|limit| group.tickets.len() > limit);
    }

    debug!(columns = groups.len(), skipped, "tickets grouped by status");
    StatusGroups { groups }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumnView {
    pub status: TicketStatus,
    pub label: String,
    pub color: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<usize>,
    pub over_limit: bool,
    pub cards: Vec<TicketSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<BoardColumnView>,
}

/// Full board: grouping plus card annotations.
pub fn board_view<'a, I>(
    tickets: I,
    dataset: &Dataset,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> BoardView
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let grouped = group_by_status(tickets, &config.board.columns);
    let columns = grouped
        .groups
        .into_iter()
        .map(|group| BoardColumnView {
            status: group.status,
            label: group.status.label().to_string(),
            color: group.status.color().to_string(),
            count: group.tickets.len(),
            wip_limit: group.wip_limit,
            over_limit: group.over_limit,
            cards: group
                .tickets
                .iter()
                .map(|t| summarize(t, dataset, &config.labels, now, Some(CARD_LABEL_LIMIT)))
                .collect(),
        })
        .collect();
    BoardView { columns }
}

// Linear status-flow indicator for the ticket detail view.
//
// The flow is a display aid only: statuses are not validated against it,
// and off-flow statuses (blocked, closed, client-review, reopened) simply
// have no position.

use serde::{Deserialize, Serialize};

use crate::types::TicketStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowStep {
    pub status: TicketStatus,
    pub state: StepState,
}

/// Index of `status` within `flow`.
pub fn flow_position(status: TicketStatus, flow: &[TicketStatus]) -> Option<usize> {
    flow.iter().position(|s| *s == status)
}

pub fn status_flow_steps(status: TicketStatus, flow: &[TicketStatus]) -> Vec<FlowStep> {
    let current = flow_position(status, flow);
    flow.iter()
        .enumerate()
        .map(|(index, step)| {
            let state = match current {
                Some(pos) if index < pos => StepState::Completed,
                Some(pos) if index == pos => StepState::Current,
                _ => StepState::Upcoming,
            };
            FlowStep { status: *step, state }
        })
        .collect()
}

// Workload bucketing and the team distribution chart.
//
// `User::workload_level` is authored independently of `open_tickets`.
// Rows report both the stored level and the one derived from the count.

use serde::{Deserialize, Serialize};

use crate::config::WorkloadThresholds;
use crate::types::{Ticket, User, UserRole, WorkloadLevel};

/// Classify an open-ticket count against the thresholds.
pub fn derive_workload_level(open_tickets: u32, thresholds: &WorkloadThresholds) -> WorkloadLevel {
    if open_tickets <= thresholds.light_max {
        WorkloadLevel::Light
    } else if open_tickets <= thresholds.moderate_max {
        WorkloadLevel::Moderate
    } else if open_tickets <= thresholds.heavy_max {
        WorkloadLevel::Heavy
    } else {
        WorkloadLevel::Overloaded
    }
}

/// Open (not resolved or closed) tickets assigned to `user_id`.
pub fn open_ticket_count<'a, I>(user_id: &str, tickets: I) -> usize
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets.into_iter().filter(|t| t.status.is_open() && t.is_assigned_to(user_id)).count()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRow {
    pub user_id: String,
    pub name: String,
    pub initials: String,
    pub open_tickets: u32,
    /// Bar width relative to the busiest member, 0–100.
    pub bar_percent: f64,
    pub level: WorkloadLevel,
    pub derived_level: WorkloadLevel,
    /// Stored and derived levels agree.
    pub consistent: bool,
}

/// Developers and QA, in input order, with bars scaled to the maximum
/// open-ticket count.
pub fn workload_distribution(users: &[User], thresholds: &WorkloadThresholds) -> Vec<WorkloadRow> {
    let members: Vec<&User> = users
        .iter()
        .filter(|u| matches!(u.role, UserRole::Developer | UserRole::Qa))
        .collect();
    let max = members.iter().map(|u| u.open_tickets).max().unwrap_or(0);

    members
        .into_iter()
        .map(|user| {
            let derived_level = derive_workload_level(user.open_tickets, thresholds);
            let bar_percent =
                if max == 0 { 0.0 } else { f64::from(user.open_tickets) / f64::from(max) * 100.0 };
            WorkloadRow {
                user_id: user.id.clone(),
                name: user.name.clone(),
                initials: user.initials(),
                open_tickets: user.open_tickets,
                bar_percent,
                level: user.workload_level,
                derived_level,
                consistent: derived_level == user.workload_level,
            }
        })
        .collect()
}

// Dashboard: headline counters plus the panels shown beneath them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::activity::{activity_entries, ActivityEntry};
use super::overdue::count_overdue;
use super::priority::focus_queue;
use super::project::{project_card, project_health, HealthBand, ProjectCard};
use super::summary::{summarize, TicketSummary};
use super::workload::{workload_distribution, WorkloadRow};
use crate::config::ProjectionConfig;
use crate::dataset::Dataset;
use crate::types::{ProjectStatus, TicketStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Assigned to the user and not resolved or closed.
    pub my_open_tickets: usize,
    pub in_progress: usize,
    pub awaiting_qa: usize,
    pub overdue: usize,
    pub resolved_this_week: usize,
    /// Mean health of active projects.
    pub health_score: u8,
    pub health_band: HealthBand,
}

pub fn dashboard_stats(
    dataset: &Dataset,
    user_id: &str,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> DashboardStats {
    let tickets = &dataset.tickets;
    let week_ago = now - Duration::days(7);

    let scores: Vec<u32> = dataset
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .map(|p| u32::from(project_health(p, &config.health)))
        .collect();
    let health_score = match scores.len() as u32 {
        0 => config.health.default_score,
        n => ((2 * scores.iter().sum::<u32>() + n) / (2 * n)) as u8,
    };

    DashboardStats {
        my_open_tickets: tickets
            .iter()
            .filter(|t| t.status.is_open() && t.is_assigned_to(user_id))
            .count(),
        in_progress: tickets.iter().filter(|t| t.status == TicketStatus::InDev).count(),
        awaiting_qa: tickets.iter().filter(|t| t.status == TicketStatus::Qa).count(),
        overdue: count_overdue(tickets, now),
        resolved_this_week: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Resolved)
            .filter(|t| t.updated().is_some_and(|ts| ts >= week_ago && ts <= now))
            .count(),
        health_score,
        health_band: HealthBand::classify(health_score, &config.health),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub focus: Vec<TicketSummary>,
    pub workload: Vec<WorkloadRow>,
    pub activity: Vec<ActivityEntry>,
    /// Active projects only.
    pub projects: Vec<ProjectCard>,
}

/// Everything the dashboard page shows for `user_id`.
pub fn dashboard_view(
    dataset: &Dataset,
    user_id: &str,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
    activity_limit: usize,
) -> DashboardView {
    let focus = focus_queue(&dataset.tickets, user_id, config.focus.limit)
        .into_iter()
        .map(|t| summarize(t, dataset, &config.labels, now, Some(2)))
        .collect();
    let projects = dataset
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .map(|p| project_card(p, dataset, config, now))
        .collect::<Vec<_>>();

    debug!(user = user_id, projects = projects.len(), "dashboard assembled");
    DashboardView {
        stats: dashboard_stats(dataset, user_id, config, now),
        focus,
        workload: workload_distribution(&dataset.users, &config.workload),
        activity: activity_entries(&dataset.activities, activity_limit, now),
        projects,
    }
}

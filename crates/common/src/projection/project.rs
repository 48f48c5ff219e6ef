// Project cards: progress, health, overdue/critical counts and the
// filtered project list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::overdue::count_overdue;
use super::summary::PersonRef;
use crate::config::{HealthConfig, ProjectionConfig};
use crate::dataset::Dataset;
use crate::timestamp::{format_relative, parse_timestamp_lenient};
use crate::types::{Priority, Project, ProjectStatus, Ticket, TicketStatus};

// ── Progress ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Resolved share of `tickets`, rounded half-up to a whole percent.
/// An empty list is 0/0 at 0%.
pub fn compute_progress<'a, I>(tickets: I) -> Progress
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let (completed, total) = tickets.into_iter().fold((0usize, 0usize), |(done, all), t| {
        (done + usize::from(t.status == TicketStatus::Resolved), all + 1)
    });
    let percent = if total == 0 { 0 } else { ((200 * completed + total) / (2 * total)) as u8 };
    Progress { completed, total, percent }
}

// ── Health ─────────────────────────────────────────────────────────

/// Authored health score, or the configured default (85) when absent.
/// Never derived from ticket data.
pub fn project_health(project: &Project, health: &HealthConfig) -> u8 {
    project.health.unwrap_or(health.default_score).min(100)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HealthBand {
    Healthy,
    NeedsAttention,
    Critical,
}

impl HealthBand {
    pub fn classify(score: u8, health: &HealthConfig) -> Self {
        if score >= health.healthy_min {
            Self::Healthy
        } else if score >= health.attention_min {
            Self::NeedsAttention
        } else {
            Self::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs Attention",
            Self::Critical => "Critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Healthy => "#10B981",
            Self::NeedsAttention => "#F59E0B",
            Self::Critical => "#EF4444",
        }
    }
}

// ── Cards ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Client name; `None` without a client or when the id is dangling.
    pub client: Option<String>,
    pub progress: Progress,
    pub overdue: usize,
    pub critical: usize,
    pub team: Vec<PersonRef>,
    pub health: u8,
    pub health_band: HealthBand,
    pub updated_relative: Option<String>,
}

pub fn project_card(
    project: &Project,
    dataset: &Dataset,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> ProjectCard {
    let tickets = dataset.project_tickets(&project.id);
    let health = project_health(project, &config.health);
    let last_touch = project.updated_at.as_deref().unwrap_or(&project.last_activity);

    ProjectCard {
        id: project.id.clone(),
        name: project.name.clone(),
        color: project.color.clone(),
        description: project.description.clone(),
        status: project.status,
        client: project
            .client_id
            .as_deref()
            .and_then(|id| dataset.client(id))
            .map(|c| c.name.clone()),
        progress: compute_progress(tickets.iter().copied()),
        overdue: count_overdue(tickets.iter().copied(), now),
        critical: tickets.iter().filter(|t| t.priority == Priority::Critical).count(),
        team: dataset.resolve_users(&project.team_ids).into_iter().map(PersonRef::from).collect(),
        health,
        health_band: HealthBand::classify(health, &config.health),
        updated_relative: parse_timestamp_lenient(last_touch).map(|ts| format_relative(ts, now)),
    }
}

// ── Project list ───────────────────────────────────────────────────

/// Counts over every project, independent of the active filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub on_hold: usize,
    pub completed: usize,
    pub planning: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(Self { total: projects.len(), ..Self::default() }, |mut acc, p| {
            match p.status {
                ProjectStatus::Active => acc.active += 1,
                ProjectStatus::OnHold => acc.on_hold += 1,
                ProjectStatus::Completed => acc.completed += 1,
                ProjectStatus::Planning => acc.planning += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectListView {
    pub stats: ProjectStats,
    pub projects: Vec<ProjectCard>,
}

/// Projects whose name contains `search` (case-insensitive, surrounding
/// whitespace ignored) and whose status matches `status` when given.
pub fn project_list(
    dataset: &Dataset,
    search: Option<&str>,
    status: Option<ProjectStatus>,
    config: &ProjectionConfig,
    now: DateTime<Utc>,
) -> ProjectListView {
    let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
    let projects = dataset
        .projects
        .iter()
        .filter(|p| needle.as_deref().map_or(true, |n| p.name.to_lowercase().contains(n)))
        .filter(|p| status.map_or(true, |s| p.status == s))
        .map(|p| project_card(p, dataset, config, now))
        .collect();

    ProjectListView { stats: ProjectStats::from_projects(&dataset.projects), projects }
}

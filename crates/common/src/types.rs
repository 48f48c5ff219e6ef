// Core domain records shared by the projection engine and the CLI.
//
// Snapshot shape follows the dashboard data: camelCase field names,
// kebab-case enum values (`"in-dev"`, `"on-track"`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::parse_timestamp_lenient;

/// Error returned when a kebab-case enum value is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ── Ticket ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    New,
    Triaged,
    InDev,
    InReview,
    Qa,
    ClientReview,
    Blocked,
    Resolved,
    Closed,
    Reopened,
}

impl TicketStatus {
    /// All statuses in declaration order.
    pub const ALL: [TicketStatus; 10] = [
        Self::New,
        Self::Triaged,
        Self::InDev,
        Self::InReview,
        Self::Qa,
        Self::ClientReview,
        Self::Blocked,
        Self::Resolved,
        Self::Closed,
        Self::Reopened,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Triaged => "triaged",
            Self::InDev => "in-dev",
            Self::InReview => "in-review",
            Self::Qa => "qa",
            Self::ClientReview => "client-review",
            Self::Blocked => "blocked",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Reopened => "reopened",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Triaged => "Triaged",
            Self::InDev => "In Dev",
            Self::InReview => "In Review",
            Self::Qa => "QA",
            Self::ClientReview => "Client Review",
            Self::Blocked => "Blocked",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Reopened => "Reopened",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::New => "#3B82F6",
            Self::Triaged => "#6366F1",
            Self::InDev => "#F59E0B",
            Self::InReview => "#8B5CF6",
            Self::Qa => "#EC4899",
            Self::ClientReview => "#06B6D4",
            Self::Blocked => "#EF4444",
            Self::Resolved => "#10B981",
            Self::Closed => "#6B7280",
            Self::Reopened => "#F97316",
        }
    }

    /// Whether the ticket still counts toward someone's open load.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "status", value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    pub const ALL: [Priority; 5] =
        [Self::Critical, Self::High, Self::Medium, Self::Low, Self::None];

    /// Fixed sort rank: critical(0) < high(1) < medium(2) < low(3) < none(4).
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::None => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "None",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Critical => "#DC2626",
            Self::High => "#F97316",
            Self::Medium => "#EAB308",
            Self::Low => "#3B82F6",
            Self::None => "#9CA3AF",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "priority", value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum TicketType {
    Bug,
    Feature,
    Task,
    Improvement,
    Question,
    Incident,
}

impl TicketType {
    pub const ALL: [TicketType; 6] =
        [Self::Bug, Self::Feature, Self::Task, Self::Improvement, Self::Question, Self::Incident];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Task => "task",
            Self::Improvement => "improvement",
            Self::Question => "question",
            Self::Incident => "incident",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Feature => "Feature",
            Self::Task => "Task",
            Self::Improvement => "Improvement",
            Self::Question => "Question",
            Self::Incident => "Incident",
        }
    }
}

/// Externally supplied SLA compliance state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

impl SlaStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::Breached => "breached",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// `TP-####`.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: TicketType,
    pub project_id: String,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
    pub reporter_id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Raw due date; may be unparseable, see [`Ticket::due_at`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_status: Option<SlaStatus>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_predicted_eta: Option<String>,
}

impl Ticket {
    /// Parsed due date. Unparseable values behave as absent.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_timestamp_lenient)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp_lenient(&self.created_at)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_timestamp_lenient(&self.updated_at)
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignee_ids.iter().any(|id| id == user_id)
    }
}

// ── User ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    ProjectManager,
    Developer,
    Qa,
    Client,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project-manager",
            Self::Developer => "developer",
            Self::Qa => "qa",
            Self::Client => "client",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum WorkloadLevel {
    Light,
    Moderate,
    Heavy,
    Overloaded,
}

impl WorkloadLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
            Self::Overloaded => "overloaded",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
            Self::Overloaded => "Overloaded",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Light => "#10B981",
            Self::Moderate => "#F59E0B",
            Self::Heavy => "#F97316",
            Self::Overloaded => "#EF4444",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    pub role: UserRole,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub open_tickets: u32,
    /// Authored separately from `open_tickets`; nothing keeps them in sync.
    pub workload_level: WorkloadLevel,
    #[serde(default)]
    pub is_online: bool,
}

impl User {
    /// Up to two uppercase initials, e.g. "Sarah Chen" → "SC".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

// ── Project / Client ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Planning,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] =
        [Self::Active, Self::OnHold, Self::Completed, Self::Planning];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Planning => "planning",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Active => "#10B981",
            Self::OnHold => "#F59E0B",
            Self::Completed => "#6B7280",
            Self::Planning => "#3B82F6",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "project status", value: s.to_string() })
    }
}

fn default_project_status() -> ProjectStatus {
    ProjectStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub ticket_count: u32,
    #[serde(default)]
    pub open_tickets: u32,
    #[serde(default)]
    pub resolved_tickets: u32,
    #[serde(default)]
    pub overdue_tickets: u32,
    /// Authored progress percentage; cards recompute it from tickets.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub last_activity: String,
    #[serde(default = "default_project_status")]
    pub status: ProjectStatus,
    /// Authored health score (0–100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u8>,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub primary_contact: String,
    pub email: String,
    /// Percentage, 0–100.
    pub sla_compliance: f64,
    #[serde(default)]
    pub active_projects: u32,
    #[serde(default)]
    pub open_tickets: u32,
}

// ── Activity ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    StatusChange,
    PriorityChange,
    Assignment,
    Comment,
    Created,
    Resolved,
    AiAction,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusChange => "status-change",
            Self::PriorityChange => "priority-change",
            Self::Assignment => "assignment",
            Self::Comment => "comment",
            Self::Created => "created",
            Self::Resolved => "resolved",
            Self::AiAction => "ai-action",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub ticket_id: String,
    pub ticket_title: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,
    pub description: String,
    pub timestamp: String,
}

// ── Comment ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CommentVisibility {
    /// Team only.
    Internal,
    /// Shared with the client.
    Client,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub count: u32,
    /// Ids of the users who reacted.
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub ticket_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,
    pub user_role: UserRole,
    pub content: String,
    pub visibility: CommentVisibility,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket_json() -> &'static str {
        r#"{
            "id": "TP-0142",
            "title": "Safari login loop",
            "description": "Users on Safari are bounced back to login.",
            "aiSummary": "WebSocket auth handshake fails on Safari 17",
            "status": "in-dev",
            "priority": "critical",
            "type": "bug",
            "projectId": "p1",
            "assigneeIds": ["u1", "u3"],
            "reporterId": "u7",
            "labels": ["frontend", "safari"],
            "dueDate": "2026-10-17T12:00:00Z",
            "slaStatus": "at-risk",
            "createdAt": "2026-10-10T09:00:00Z",
            "updatedAt": "2026-10-18T08:00:00Z",
            "aiPredictedEta": "2 days"
        }"#
    }

    #[test]
    fn ticket_deserializes_dashboard_shape() {
        let ticket: Ticket = serde_json::from_str(sample_ticket_json()).unwrap();
        assert_eq!(ticket.status, TicketStatus::InDev);
        assert_eq!(ticket.priority, Priority::Critical);
        assert_eq!(ticket.kind, TicketType::Bug);
        assert_eq!(ticket.sla_status, Some(SlaStatus::AtRisk));
        assert_eq!(ticket.assignee_ids, vec!["u1", "u3"]);
        assert!(ticket.is_assigned_to("u3"));
        assert!(!ticket.is_assigned_to("u2"));
    }

    #[test]
    fn ticket_serializes_type_and_camel_case_fields() {
        let ticket: Ticket = serde_json::from_str(sample_ticket_json()).unwrap();
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["type"], "bug");
        assert_eq!(value["status"], "in-dev");
        assert_eq!(value["assigneeIds"][0], "u1");
        assert!(value.get("estimatedTime").is_none());
    }

    #[test]
    fn malformed_due_date_parses_as_absent() {
        let mut ticket: Ticket = serde_json::from_str(sample_ticket_json()).unwrap();
        ticket.due_date = Some("next tuesday-ish".into());
        assert!(ticket.due_at().is_none());
    }

    #[test]
    fn priority_rank_table_is_fixed() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn status_round_trips_through_from_str() {
        for status in TicketStatus::ALL {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        }
        let err = "done".parse::<TicketStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown status `done`");
    }

    #[test]
    fn only_resolved_and_closed_are_not_open() {
        let closed: Vec<_> = TicketStatus::ALL.into_iter().filter(|s| !s.is_open()).collect();
        assert_eq!(closed, vec![TicketStatus::Resolved, TicketStatus::Closed]);
    }

    #[test]
    fn user_initials_take_first_two_words() {
        let user = User {
            id: "u1".into(),
            name: "sarah jane chen".into(),
            email: "sarah@example.com".into(),
            avatar: String::new(),
            role: UserRole::Developer,
            skills: vec![],
            open_tickets: 4,
            workload_level: WorkloadLevel::Moderate,
            is_online: true,
        };
        assert_eq!(user.initials(), "SJ");
    }

    #[test]
    fn project_defaults_status_and_health() {
        let project: Project = serde_json::from_str(
            r##"{"id": "p1", "name": "Client Portal", "color": "#4F46E5"}"##,
        )
        .unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(project.health.is_none());
        assert!(project.team_ids.is_empty());
    }

    #[test]
    fn comment_visibility_uses_kebab_case() {
        assert_eq!(serde_json::to_string(&CommentVisibility::Internal).unwrap(), "\"internal\"");
        assert_eq!(serde_json::to_string(&ActivityType::AiAction).unwrap(), "\"ai-action\"");
    }
}

// Immutable entity snapshot the projections read from.
//
// Loaded once from JSON. Lookups never fail: a dangling id resolves to
// nothing and is omitted from whatever view asked for it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{Activity, Client, Comment, Project, Ticket, User};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Dataset {
    pub tickets: Vec<Ticket>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub activities: Vec<Activity>,
    pub comments: Vec<Comment>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            tickets = dataset.tickets.len(),
            users = dataset.users.len(),
            projects = dataset.projects.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Resolve user ids in order, skipping ids with no matching user.
    pub fn resolve_users<'a, I>(&'a self, ids: I) -> Vec<&'a User>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ids.into_iter().filter_map(|id| self.user(id.as_ref())).collect()
    }

    /// Tickets belonging to `project_id`, in snapshot order.
    pub fn project_tickets(&self, project_id: &str) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| t.project_id == project_id).collect()
    }

    /// Number of stored comments on a ticket.
    pub fn comment_count(&self, ticket_id: &str) -> usize {
        self.comments.iter().filter(|c| c.ticket_id == ticket_id).count()
    }

    /// List every reference that does not resolve. Each finding is logged;
    /// none of them is fatal.
    pub fn validate(&self) -> Vec<DanglingReference> {
        let mut findings = Vec::new();

        for ticket in &self.tickets {
            if self.project(&ticket.project_id).is_none() {
                findings.push(DanglingReference::new(
                    &ticket.id,
                    ReferenceKind::Project,
                    &ticket.project_id,
                ));
            }
            if self.user(&ticket.reporter_id).is_none() {
                findings.push(DanglingReference::new(
                    &ticket.id,
                    ReferenceKind::Reporter,
                    &ticket.reporter_id,
                ));
            }
            for assignee in &ticket.assignee_ids {
                if self.user(assignee).is_none() {
                    findings.push(DanglingReference::new(
                        &ticket.id,
                        ReferenceKind::Assignee,
                        assignee,
                    ));
                }
            }
        }

        for project in &self.projects {
            if let Some(client_id) = &project.client_id {
                if self.client(client_id).is_none() {
                    findings.push(DanglingReference::new(
                        &project.id,
                        ReferenceKind::Client,
                        client_id,
                    ));
                }
            }
            for member in &project.team_ids {
                if self.user(member).is_none() {
                    findings.push(DanglingReference::new(
                        &project.id,
                        ReferenceKind::TeamMember,
                        member,
                    ));
                }
            }
        }

        for activity in &self.activities {
            if self.ticket(&activity.ticket_id).is_none() {
                findings.push(DanglingReference::new(
                    &activity.id,
                    ReferenceKind::Ticket,
                    &activity.ticket_id,
                ));
            }
        }

        for comment in &self.comments {
            if self.ticket(&comment.ticket_id).is_none() {
                findings.push(DanglingReference::new(
                    &comment.id,
                    ReferenceKind::Ticket,
                    &comment.ticket_id,
                ));
            }
        }

        for finding in &findings {
            warn!(
                owner = %finding.owner_id,
                kind = finding.kind.as_str(),
                missing = %finding.missing_id,
                "dangling reference"
            );
        }
        findings
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Project,
    Reporter,
    Assignee,
    Client,
    TeamMember,
    Ticket,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Reporter => "reporter",
            Self::Assignee => "assignee",
            Self::Client => "client",
            Self::TeamMember => "team-member",
            Self::Ticket => "ticket",
        }
    }
}

/// An id on `owner_id` that points at nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub owner_id: String,
    pub kind: ReferenceKind,
    pub missing_id: String,
}

impl DanglingReference {
    fn new(owner_id: &str, kind: ReferenceKind, missing_id: &str) -> Self {
        Self { owner_id: owner_id.to_string(), kind, missing_id: missing_id.to_string() }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::types::{Priority, TicketStatus, UserRole};
    use tempfile::TempDir;

    fn small_dataset() -> Dataset {
        Dataset {
            tickets: vec![
                assigned(ticket("TP-0001", TicketStatus::New, Priority::High), &["u1", "ghost"]),
                ticket("TP-0002", TicketStatus::Qa, Priority::Low),
            ],
            users: vec![
                user("u1", "Sarah Chen", UserRole::Developer, 4),
                user("u7", "Mike Ross", UserRole::ProjectManager, 0),
            ],
            projects: vec![project("p1", "Client Portal")],
            ..Dataset::default()
        }
    }

    #[test]
    fn resolve_users_omits_unknown_ids() {
        let ds = small_dataset();
        let users = ds.resolve_users(&ds.tickets[0].assignee_ids);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
    }

    #[test]
    fn lookups_return_none_for_missing_records() {
        let ds = small_dataset();
        assert!(ds.ticket("TP-9999").is_none());
        assert!(ds.project("p404").is_none());
        assert!(ds.client("c1").is_none());
        assert_eq!(ds.project_tickets("p1").len(), 2);
    }

    #[test]
    fn validate_reports_dangling_assignee() {
        let ds = small_dataset();
        let findings = ds.validate();
        assert_eq!(
            findings,
            vec![DanglingReference {
                owner_id: "TP-0001".into(),
                kind: ReferenceKind::Assignee,
                missing_id: "ghost".into(),
            }]
        );
    }

    #[test]
    fn validate_reports_missing_project_and_client() {
        let mut ds = small_dataset();
        ds.tickets[1].project_id = "p9".into();
        ds.projects[0].client_id = Some("c404".into());
        let kinds: Vec<_> = ds.validate().into_iter().map(|f| f.kind).collect();
        assert!(kinds.contains(&ReferenceKind::Project));
        assert!(kinds.contains(&ReferenceKind::Client));
    }

    #[test]
    fn empty_json_object_is_empty_dataset() {
        let ds = Dataset::from_json_str("{}").unwrap();
        assert_eq!(ds, Dataset::default());
    }

    #[test]
    fn load_from_file_and_report_parse_errors() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("data.json");
        std::fs::write(&good, serde_json::to_string(&small_dataset()).unwrap()).unwrap();
        let loaded = Dataset::load_from(&good).unwrap();
        assert_eq!(loaded, small_dataset());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{\"tickets\": [{}]}").unwrap();
        assert!(matches!(Dataset::load_from(&bad), Err(DatasetError::Parse(_))));
        assert!(matches!(
            Dataset::load_from(&dir.path().join("missing.json")),
            Err(DatasetError::Io(_))
        ));
    }
}

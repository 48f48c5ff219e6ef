// Ticket table: quick filters, field filters, search, sort and grouping.
//
// Every sort is stable, so a secondary ordering can be obtained by sorting
// the input first.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::overdue::derive_overdue;
use super::summary::{summarize, TicketSummary};
use crate::config::ProjectionConfig;
use crate::dataset::Dataset;
use crate::types::{ParseEnumError, Priority, Ticket, TicketStatus, TicketType};

// ── Query vocabulary ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    MyTickets,
    Unassigned,
    Overdue,
    Critical,
    Blocked,
    ClientTickets,
    UpdatedToday,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 7] = [
        Self::MyTickets,
        Self::Unassigned,
        Self::Overdue,
        Self::Critical,
        Self::Blocked,
        Self::ClientTickets,
        Self::UpdatedToday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MyTickets => "my-tickets",
            Self::Unassigned => "unassigned",
            Self::Overdue => "overdue",
            Self::Critical => "critical",
            Self::Blocked => "blocked",
            Self::ClientTickets => "client-tickets",
            Self::UpdatedToday => "updated-today",
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "quick filter", value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Priority,
    /// Earliest first; missing or unparseable due dates last.
    DueDate,
    /// Most recently updated first.
    #[default]
    Updated,
    /// Most recently created first.
    Created,
    Id,
}

impl SortKey {
    pub const ALL: [SortKey; 5] =
        [Self::Priority, Self::DueDate, Self::Updated, Self::Created, Self::Id];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due-date",
            Self::Updated => "updated",
            Self::Created => "created",
            Self::Id => "id",
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "sort key", value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKey {
    #[default]
    None,
    Status,
    Priority,
    Project,
    Assignee,
    Type,
}

impl GroupKey {
    pub const ALL: [GroupKey; 6] =
        [Self::None, Self::Status, Self::Priority, Self::Project, Self::Assignee, Self::Type];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Project => "project",
            Self::Assignee => "assignee",
            Self::Type => "type",
        }
    }
}

impl FromStr for GroupKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "group key", value: s.to_string() })
    }
}

/// A table view request. Empty lists and `None` fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketQuery {
    /// AND-ed together.
    pub quick_filters: Vec<QuickFilter>,
    /// Case-insensitive substring of id, title or any label.
    pub search: Option<String>,
    pub statuses: Vec<TicketStatus>,
    pub priorities: Vec<Priority>,
    pub project_id: Option<String>,
    pub assignee_id: Option<String>,
    pub label: Option<String>,
    pub sort: SortKey,
    pub group: GroupKey,
}

/// Who is asking and when.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub current_user: &'a str,
    pub now: DateTime<Utc>,
}

// ── Filtering ──────────────────────────────────────────────────────

pub fn matches_quick_filter(
    ticket: &Ticket,
    filter: QuickFilter,
    dataset: &Dataset,
    ctx: &ViewContext<'_>,
) -> bool {
    match filter {
        QuickFilter::MyTickets => ticket.is_assigned_to(ctx.current_user),
        QuickFilter::Unassigned => ticket.assignee_ids.is_empty(),
        QuickFilter::Overdue => derive_overdue(ticket, ctx.now),
        QuickFilter::Critical => ticket.priority == Priority::Critical,
        QuickFilter::Blocked => ticket.status == TicketStatus::Blocked,
        QuickFilter::ClientTickets => dataset
            .project(&ticket.project_id)
            .is_some_and(|p| p.client_id.is_some()),
        QuickFilter::UpdatedToday => ticket
            .updated()
            .is_some_and(|ts| ts.date_naive() == ctx.now.date_naive()),
    }
}

fn matches_search(ticket: &Ticket, needle: &str) -> bool {
    ticket.id.to_lowercase().contains(needle)
        || ticket.title.to_lowercase().contains(needle)
        || ticket.labels.iter().any(|l| l.to_lowercase().contains(needle))
}

/// Tickets matching every criterion of `query`, in snapshot order.
pub fn filter_tickets<'a>(
    dataset: &'a Dataset,
    query: &TicketQuery,
    ctx: &ViewContext<'_>,
) -> Vec<&'a Ticket> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    dataset
        .tickets
        .iter()
        .filter(|t| {
            query.quick_filters.iter().all(|f| matches_quick_filter(t, *f, dataset, ctx))
        })
        .filter(|t| query.statuses.is_empty() || query.statuses.contains(&t.status))
        .filter(|t| query.priorities.is_empty() || query.priorities.contains(&t.priority))
        .filter(|t| query.project_id.as_deref().map_or(true, |p| t.project_id == p))
        .filter(|t| query.assignee_id.as_deref().map_or(true, |u| t.is_assigned_to(u)))
        .filter(|t| query.label.as_deref().map_or(true, |l| t.labels.iter().any(|x| x == l)))
        .filter(|t| needle.as_deref().map_or(true, |n| matches_search(t, n)))
        .collect()
}

// ── Sorting ────────────────────────────────────────────────────────

pub fn sort_tickets(tickets: &mut [&Ticket], key: SortKey) {
    match key {
        SortKey::Priority => tickets.sort_by_key(|t| t.priority.rank()),
        SortKey::DueDate => tickets.sort_by_cached_key(|t| {
            let due = t.due_at();
            (due.is_none(), due)
        }),
        SortKey::Updated => tickets.sort_by_cached_key(|t| {
            let ts = t.updated();
            (ts.is_none(), Reverse(ts))
        }),
        SortKey::Created => tickets.sort_by_cached_key(|t| {
            let ts = t.created();
            (ts.is_none(), Reverse(ts))
        }),
        SortKey::Id => tickets.sort_by(|a, b| a.id.cmp(&b.id)),
    }
}

// ── Grouping ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketGroup {
    pub key: String,
    pub label: String,
    pub tickets: Vec<TicketSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketListView {
    /// Number of tickets that passed the filters.
    pub total: usize,
    pub groups: Vec<TicketGroup>,
}

/// Table rows show at most this many labels.
const ROW_LABEL_LIMIT: usize = 2;

const UNASSIGNED_KEY: &str = "unassigned";
const UNKNOWN_PROJECT_KEY: &str = "unknown";

type Bucket<'a> = (String, String, Vec<&'a Ticket>);

fn bucket<'a>(
    tickets: &[&'a Ticket],
    key: &str,
    label: &str,
    pred: impl Fn(&Ticket) -> bool,
) -> Bucket<'a> {
    let members = tickets.iter().copied().filter(|t| pred(*t)).collect();
    (key.to_string(), label.to_string(), members)
}

/// Bucket already-sorted tickets. Buckets come out in a fixed order per key
/// and empty buckets are dropped.
fn group_tickets<'a>(tickets: &[&'a Ticket], key: GroupKey, dataset: &Dataset) -> Vec<Bucket<'a>> {
    let buckets: Vec<Bucket<'a>> = match key {
        GroupKey::None => vec![("all".to_string(), "All tickets".to_string(), tickets.to_vec())],
        GroupKey::Status => TicketStatus::ALL
            .iter()
            .map(|s| bucket(tickets, s.as_str(), s.label(), |t| t.status == *s))
            .collect(),
        GroupKey::Priority => Priority::ALL
            .iter()
            .map(|p| bucket(tickets, p.as_str(), p.label(), |t| t.priority == *p))
            .collect(),
        GroupKey::Type => TicketType::ALL
            .iter()
            .map(|k| bucket(tickets, k.as_str(), k.label(), |t| t.kind == *k))
            .collect(),
        GroupKey::Project => {
            let mut buckets: Vec<Bucket<'a>> = dataset
                .projects
                .iter()
                .map(|p| bucket(tickets, &p.id, &p.name, |t| t.project_id == p.id))
                .collect();
            buckets.push(bucket(tickets, UNKNOWN_PROJECT_KEY, "Unknown", |t| {
                dataset.project(&t.project_id).is_none()
            }));
            buckets
        }
        GroupKey::Assignee => {
            let mut buckets: Vec<Bucket<'a>> = dataset
                .users
                .iter()
                .map(|u| bucket(tickets, &u.id, &u.name, |t| t.is_assigned_to(&u.id)))
                .collect();
            buckets.push(bucket(tickets, UNASSIGNED_KEY, "Unassigned", |t| {
                dataset.resolve_users(&t.assignee_ids).is_empty()
            }));
            buckets
        }
    };

    buckets.into_iter().filter(|(_, _, members)| !members.is_empty()).collect()
}

/// Filter, sort, group and annotate.
pub fn run_query(
    dataset: &Dataset,
    query: &TicketQuery,
    config: &ProjectionConfig,
    ctx: &ViewContext<'_>,
) -> TicketListView {
    let mut tickets = filter_tickets(dataset, query, ctx);
    sort_tickets(&mut tickets, query.sort);

    let groups: Vec<TicketGroup> = group_tickets(&tickets, query.group, dataset)
        .into_iter()
        .map(|(key, label, members)| TicketGroup {
            key,
            label,
            tickets: members
                .iter()
                .map(|t| summarize(t, dataset, &config.labels, ctx.now, Some(ROW_LABEL_LIMIT)))
                .collect(),
        })
        .collect();

    debug!(
        total = tickets.len(),
        groups = groups.len(),
        sort = query.sort.as_str(),
        group = query.group.as_str(),
        "ticket query evaluated"
    );
    TicketListView { total: tickets.len(), groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{assigned, project, ticket, user};
    use crate::types::UserRole;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).single().expect("valid test timestamp")
    }

    fn ctx() -> ViewContext<'static> {
        ViewContext { current_user: "u1", now: now() }
    }

    fn dataset() -> Dataset {
        let mut a = assigned(ticket("TP-0001", TicketStatus::InDev, Priority::High), &["u1"]);
        a.due_date = Some("2026-10-20".into());
        a.labels = vec!["frontend".into()];
        a.updated_at = "2026-10-18T08:00:00Z".into();

        let mut b = ticket("TP-0002", TicketStatus::Blocked, Priority::Critical);
        b.due_date = Some("2026-10-01".into());
        b.title = "Payment webhook drops events".into();
        b.updated_at = "2026-10-17T08:00:00Z".into();

        let mut c = assigned(ticket("TP-0003", TicketStatus::Qa, Priority::High), &["u2", "ghost"]);
        c.project_id = "p2".into();
        c.due_date = Some("not a date".into());
        c.updated_at = "garbage".into();

        let mut d = assigned(ticket("TP-0004", TicketStatus::Resolved, Priority::Low), &["ghost"]);
        d.project_id = "p404".into();
        d.updated_at = "2026-10-18T11:00:00Z".into();

        let mut portal = project("p1", "Client Portal");
        portal.client_id = Some("c1".into());

        Dataset {
            tickets: vec![a, b, c, d],
            users: vec![
                user("u1", "Sarah Chen", UserRole::Developer, 1),
                user("u2", "Priya Patel", UserRole::Qa, 1),
            ],
            projects: vec![portal, project("p2", "Mobile App")],
            ..Dataset::default()
        }
    }

    fn ids(view: &[&Ticket]) -> Vec<String> {
        view.iter().map(|t| t.id.clone()).collect()
    }

    // ── filters ──────────────────────────────────────────────────────

    #[test]
    fn quick_filters_select_expected_tickets() {
        let ds = dataset();
        let run = |filter: QuickFilter| {
            let query = TicketQuery { quick_filters: vec![filter], ..TicketQuery::default() };
            ids(&filter_tickets(&ds, &query, &ctx()))
        };
        assert_eq!(run(QuickFilter::MyTickets), vec!["TP-0001"]);
        assert_eq!(run(QuickFilter::Unassigned), vec!["TP-0002"]);
        assert_eq!(run(QuickFilter::Overdue), vec!["TP-0002"]);
        assert_eq!(run(QuickFilter::Critical), vec!["TP-0002"]);
        assert_eq!(run(QuickFilter::Blocked), vec!["TP-0002"]);
        assert_eq!(run(QuickFilter::ClientTickets), vec!["TP-0001", "TP-0002"]);
        assert_eq!(run(QuickFilter::UpdatedToday), vec!["TP-0001", "TP-0004"]);
    }

    #[test]
    fn quick_filters_are_anded() {
        let ds = dataset();
        let query = TicketQuery {
            quick_filters: vec![QuickFilter::ClientTickets, QuickFilter::UpdatedToday],
            ..TicketQuery::default()
        };
        assert_eq!(ids(&filter_tickets(&ds, &query, &ctx())), vec!["TP-0001"]);
    }

    #[test]
    fn search_matches_id_title_and_labels_case_insensitively() {
        let ds = dataset();
        let search = |s: &str| {
            let query = TicketQuery { search: Some(s.into()), ..TicketQuery::default() };
            ids(&filter_tickets(&ds, &query, &ctx()))
        };
        assert_eq!(search("tp-0003"), vec!["TP-0003"]);
        assert_eq!(search("WEBHOOK"), vec!["TP-0002"]);
        assert_eq!(search("Front"), vec!["TP-0001"]);
        assert_eq!(search("   ").len(), 4);
    }

    #[test]
    fn field_filters_combine() {
        let ds = dataset();
        let query = TicketQuery {
            statuses: vec![TicketStatus::InDev, TicketStatus::Qa],
            priorities: vec![Priority::High],
            project_id: Some("p2".into()),
            ..TicketQuery::default()
        };
        assert_eq!(ids(&filter_tickets(&ds, &query, &ctx())), vec!["TP-0003"]);

        let query = TicketQuery { label: Some("frontend".into()), ..TicketQuery::default() };
        assert_eq!(ids(&filter_tickets(&ds, &query, &ctx())), vec!["TP-0001"]);

        let query = TicketQuery { assignee_id: Some("u2".into()), ..TicketQuery::default() };
        assert_eq!(ids(&filter_tickets(&ds, &query, &ctx())), vec!["TP-0003"]);
    }

    // ── sorting ──────────────────────────────────────────────────────

    #[test]
    fn sort_by_due_date_puts_missing_and_malformed_last() {
        let ds = dataset();
        let mut tickets: Vec<&Ticket> = ds.tickets.iter().collect();
        sort_tickets(&mut tickets, SortKey::DueDate);
        assert_eq!(ids(&tickets), vec!["TP-0002", "TP-0001", "TP-0003", "TP-0004"]);
    }

    #[test]
    fn sort_by_updated_is_newest_first_with_garbage_last() {
        let ds = dataset();
        let mut tickets: Vec<&Ticket> = ds.tickets.iter().collect();
        sort_tickets(&mut tickets, SortKey::Updated);
        assert_eq!(ids(&tickets), vec!["TP-0004", "TP-0001", "TP-0002", "TP-0003"]);
    }

    #[test]
    fn sort_by_priority_is_stable() {
        let ds = dataset();
        let mut tickets: Vec<&Ticket> = ds.tickets.iter().collect();
        sort_tickets(&mut tickets, SortKey::Priority);
        assert_eq!(ids(&tickets), vec!["TP-0002", "TP-0001", "TP-0003", "TP-0004"]);
    }

    // ── grouping / run_query ─────────────────────────────────────────

    #[test]
    fn ungrouped_query_returns_single_group() {
        let ds = dataset();
        let view = run_query(&ds, &TicketQuery::default(), &ProjectionConfig::default(), &ctx());
        assert_eq!(view.total, 4);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].key, "all");
    }

    #[test]
    fn group_by_status_drops_empty_buckets_and_keeps_declaration_order() {
        let ds = dataset();
        let query = TicketQuery { group: GroupKey::Status, ..TicketQuery::default() };
        let view = run_query(&ds, &query, &ProjectionConfig::default(), &ctx());
        let keys: Vec<_> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["in-dev", "qa", "blocked", "resolved"]);
    }

    #[test]
    fn group_by_assignee_duplicates_shared_tickets_and_collects_unassigned() {
        let ds = dataset();
        let query = TicketQuery { group: GroupKey::Assignee, ..TicketQuery::default() };
        let view = run_query(&ds, &query, &ProjectionConfig::default(), &ctx());
        let summary: Vec<(String, Vec<String>)> = view
            .groups
            .iter()
            .map(|g| (g.key.clone(), g.tickets.iter().map(|t| t.id.clone()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("u1".to_string(), vec!["TP-0001".to_string()]),
                ("u2".to_string(), vec!["TP-0003".to_string()]),
                ("unassigned".to_string(), vec!["TP-0004".to_string(), "TP-0002".to_string()]),
            ]
        );
    }

    #[test]
    fn group_by_project_collects_dangling_projects() {
        let ds = dataset();
        let query = TicketQuery { group: GroupKey::Project, ..TicketQuery::default() };
        let view = run_query(&ds, &query, &ProjectionConfig::default(), &ctx());
        let keys: Vec<_> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["p1", "p2", "unknown"]);
    }

    #[test]
    fn query_vocabulary_parses_from_kebab_case() {
        assert_eq!("client-tickets".parse::<QuickFilter>().unwrap(), QuickFilter::ClientTickets);
        assert_eq!("due-date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("assignee".parse::<GroupKey>().unwrap(), GroupKey::Assignee);
        assert!("sideways".parse::<SortKey>().is_err());
    }
}

// Recent-activity feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp::{format_relative, parse_timestamp_lenient};
use crate::types::{Activity, ActivityType};

/// Newest first. Entries with unparseable timestamps sort last; ties keep
/// input order.
pub fn activity_feed(activities: &[Activity], limit: usize) -> Vec<&Activity> {
    let mut feed: Vec<&Activity> = activities.iter().collect();
    feed.sort_by_cached_key(|a| {
        let ts = parse_timestamp_lenient(&a.timestamp);
        (ts.is_none(), std::cmp::Reverse(ts))
    });
    feed.truncate(limit);
    feed
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub ticket_id: String,
    pub ticket_title: String,
    pub user_name: String,
    pub description: String,
    pub when: Option<String>,
}

pub fn activity_entries(
    activities: &[Activity],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    activity_feed(activities, limit)
        .into_iter()
        .map(|a| ActivityEntry {
            id: a.id.clone(),
            kind: a.kind,
            ticket_id: a.ticket_id.clone(),
            ticket_title: a.ticket_title.clone(),
            user_name: a.user_name.clone(),
            description: a.description.clone(),
            when: parse_timestamp_lenient(&a.timestamp).map(|ts| format_relative(ts, now)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activity(id: &str, timestamp: &str) -> Activity {
        Activity {
            id: id.to_string(),
            kind: ActivityType::Comment,
            ticket_id: "TP-0001".into(),
            ticket_title: "Safari login loop".into(),
            user_id: "u1".into(),
            user_name: "Sarah Chen".into(),
            user_avatar: String::new(),
            description: "commented".into(),
            timestamp: timestamp.to_string(),
        }
    }

    fn ids(feed: &[&Activity]) -> Vec<String> {
        feed.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn newest_first_with_garbage_last() {
        let activities = vec![
            activity("a1", "2026-10-16T09:00:00Z"),
            activity("a2", "yesterday-ish"),
            activity("a3", "2026-10-18T09:00:00Z"),
            activity("a4", "2026-10-16T09:00:00Z"),
        ];
        assert_eq!(ids(&activity_feed(&activities, 10)), vec!["a3", "a1", "a4", "a2"]);
    }

    #[test]
    fn limit_truncates() {
        let activities = vec![
            activity("a1", "2026-10-16T09:00:00Z"),
            activity("a2", "2026-10-17T09:00:00Z"),
        ];
        assert_eq!(ids(&activity_feed(&activities, 1)), vec!["a2"]);
        assert!(activity_feed(&activities, 0).is_empty());
    }

    #[test]
    fn entries_carry_relative_time() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).single().unwrap();
        let activities = vec![activity("a1", "2026-10-18T09:00:00Z"), activity("a2", "")];
        let entries = activity_entries(&activities, 10, now);
        assert_eq!(entries[0].when.as_deref(), Some("3h ago"));
        assert_eq!(entries[1].when, None);
    }
}

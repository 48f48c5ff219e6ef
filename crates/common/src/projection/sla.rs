// SLA classification. The value is authored by an external SLA tracker;
// nothing here derives it from due dates or logged time.

use serde::{Deserialize, Serialize};

use crate::types::{SlaStatus, Ticket};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SlaClass {
    OnTrack,
    AtRisk,
    Breached,
    /// No SLA attached to the ticket.
    Absent,
}

impl SlaClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Breached => "Breached",
            Self::Absent => "N/A",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::OnTrack => "#10B981",
            Self::AtRisk => "#F59E0B",
            Self::Breached => "#EF4444",
            Self::Absent => "#94A3B8",
        }
    }
}

impl From<Option<SlaStatus>> for SlaClass {
    fn from(status: Option<SlaStatus>) -> Self {
        match status {
            Some(SlaStatus::OnTrack) => Self::OnTrack,
            Some(SlaStatus::AtRisk) => Self::AtRisk,
            Some(SlaStatus::Breached) => Self::Breached,
            None => Self::Absent,
        }
    }
}

/// Pass-through of the stored SLA status.
pub fn classify_sla(ticket: &Ticket) -> SlaClass {
    SlaClass::from(ticket.sla_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::ticket;
    use crate::types::{Priority, TicketStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn passes_stored_status_through() {
        let mut t = ticket("TP-0301", TicketStatus::InDev, Priority::High);
        t.sla_status = Some(SlaStatus::Breached);
        assert_eq!(classify_sla(&t), SlaClass::Breached);
        t.sla_status = Some(SlaStatus::OnTrack);
        assert_eq!(classify_sla(&t), SlaClass::OnTrack);
    }

    #[test]
    fn missing_status_is_absent() {
        let t = ticket("TP-0302", TicketStatus::New, Priority::Low);
        assert_eq!(classify_sla(&t), SlaClass::Absent);
        assert_eq!(SlaClass::Absent.label(), "N/A");
    }

    #[test]
    fn overdue_ticket_is_not_reclassified() {
        let mut t = ticket("TP-0303", TicketStatus::InDev, Priority::High);
        t.due_date = Some("2020-01-01".into());
        t.sla_status = Some(SlaStatus::OnTrack);
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).single().unwrap();
        assert!(crate::projection::overdue::derive_overdue(&t, now));
        assert_eq!(classify_sla(&t), SlaClass::OnTrack);
    }

    #[test]
    fn serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&SlaClass::AtRisk).unwrap(), "\"at-risk\"");
        assert_eq!(serde_json::to_string(&SlaClass::Absent).unwrap(), "\"absent\"");
    }
}

// Priority ranking and the personal focus queue.

use tracing::debug;

use crate::types::Ticket;

/// Stable sort ascending by the fixed priority rank. Equal priorities keep
/// their input order.
pub fn rank_by_priority<'a, I>(tickets: I) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut ranked: Vec<&Ticket> = tickets.into_iter().collect();
    ranked.sort_by_key(|t| t.priority.rank());
    ranked
}

/// Tickets assigned to `user_id`, ranked by priority, truncated to `limit`.
pub fn focus_queue<'a, I>(tickets: I, user_id: &str, limit: usize) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut queue = rank_by_priority(tickets.into_iter().filter(|t| t.is_assigned_to(user_id)));
    queue.truncate(limit);
    debug!(user = user_id, limit, size = queue.len(), "focus queue built");
    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{assigned, ticket};
    use crate::types::{Priority, TicketStatus};

    fn ids(tickets: &[&Ticket]) -> Vec<String> {
        tickets.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn ranks_critical_first_and_none_last() {
        let tickets = vec![
            ticket("TP-0001", TicketStatus::New, Priority::None),
            ticket("TP-0002", TicketStatus::New, Priority::Low),
            ticket("TP-0003", TicketStatus::New, Priority::Critical),
            ticket("TP-0004", TicketStatus::New, Priority::Medium),
            ticket("TP-0005", TicketStatus::New, Priority::High),
        ];
        let ranked = rank_by_priority(&tickets);
        assert_eq!(ids(&ranked), vec!["TP-0003", "TP-0005", "TP-0004", "TP-0002", "TP-0001"]);
    }

    #[test]
    fn equal_priorities_keep_input_order() {
        let tickets = vec![
            ticket("TP-0010", TicketStatus::New, Priority::High),
            ticket("TP-0004", TicketStatus::New, Priority::Critical),
            ticket("TP-0002", TicketStatus::New, Priority::High),
            ticket("TP-0007", TicketStatus::New, Priority::High),
        ];
        let ranked = rank_by_priority(&tickets);
        assert_eq!(ids(&ranked), vec!["TP-0004", "TP-0010", "TP-0002", "TP-0007"]);
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        let tickets: Vec<Ticket> = vec![];
        assert!(rank_by_priority(&tickets).is_empty());
    }

    #[test]
    fn focus_queue_only_includes_assigned_tickets() {
        let tickets = vec![
            assigned(ticket("TP-0001", TicketStatus::New, Priority::Low), &["u1"]),
            assigned(ticket("TP-0002", TicketStatus::New, Priority::Critical), &["u2"]),
            assigned(ticket("TP-0003", TicketStatus::InDev, Priority::High), &["u2", "u1"]),
            ticket("TP-0004", TicketStatus::New, Priority::Critical),
        ];
        let queue = focus_queue(&tickets, "u1", 6);
        assert_eq!(ids(&queue), vec!["TP-0003", "TP-0001"]);
    }

    #[test]
    fn focus_queue_truncates_after_ranking() {
        let tickets: Vec<Ticket> = (0..10)
            .map(|i| {
                let priority = if i == 9 { Priority::Critical } else { Priority::Medium };
                assigned(ticket(&format!("TP-{i:04}"), TicketStatus::New, priority), &["u1"])
            })
            .collect();
        let queue = focus_queue(&tickets, "u1", 6);
        assert_eq!(queue.len(), 6);
        assert_eq!(queue[0].id, "TP-0009");
        assert_eq!(queue[1].id, "TP-0000");
    }

    #[test]
    fn focus_queue_with_zero_limit_is_empty() {
        let tickets = vec![assigned(ticket("TP-0001", TicketStatus::New, Priority::Low), &["u1"])];
        assert!(focus_queue(&tickets, "u1", 0).is_empty());
    }
}

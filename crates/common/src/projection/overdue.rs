// Overdue detection. Derived on every call, never stored.

use chrono::{DateTime, Utc};

use crate::types::{Ticket, TicketStatus};

/// True iff the ticket has a parseable due date strictly before `now` and
/// is not resolved. Unparseable due dates count as no due date.
pub fn derive_overdue(ticket: &Ticket, now: DateTime<Utc>) -> bool {
    if ticket.status == TicketStatus::Resolved {
        return false;
    }
    ticket.due_at().is_some_and(|due| due < now)
}

/// Number of overdue tickets in `tickets`.
pub fn count_overdue<'a, I>(tickets: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets.into_iter().filter(|t| derive_overdue(t, now)).count()
}

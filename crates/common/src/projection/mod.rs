// View projection engine: pure derivations from a dataset snapshot to the
// view-models the dashboard, board, table and detail pages render.
//
// Nothing here performs I/O or reads the clock; `now` is always an input.

pub mod activity;
pub mod board;
pub mod comments;
pub mod dashboard;
pub mod detail;
pub mod labels;
pub mod overdue;
pub mod priority;
pub mod project;
pub mod query;
pub mod sla;
pub mod status_flow;
pub mod summary;
pub mod workload;

pub use activity::activity_feed;
pub use board::{board_view, group_by_status};
pub use comments::{has_reacted, visible_comments, Audience};
pub use dashboard::{dashboard_stats, dashboard_view};
pub use detail::ticket_detail;
pub use labels::label_color;
pub use overdue::derive_overdue;
pub use priority::{focus_queue, rank_by_priority};
pub use project::{compute_progress, project_card, project_health, project_list, HealthBand};
pub use query::{run_query, TicketQuery, ViewContext};
pub use sla::{classify_sla, SlaClass};
pub use status_flow::status_flow_steps;
pub use workload::{derive_workload_level, workload_distribution};

// ticketpilot-common: ticket taxonomy, dataset snapshot, projection config
// and the view projection engine.

pub mod config;
pub mod dataset;
pub mod projection;
pub mod timestamp;
pub mod types;

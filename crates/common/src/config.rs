// Projection configuration: board columns and WIP limits, focus-queue size,
// label palette, health and workload thresholds, status flow.
//
// Serialized as TOML. Every section is optional; missing keys use defaults.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::TicketStatus;

/// Neutral colour for labels missing from the palette.
pub const DEFAULT_LABEL_COLOR: &str = "#64748B";

/// Health score used when a project carries none.
pub const DEFAULT_PROJECT_HEALTH: u8 = 85;

/// Number of tickets shown in the focus queue.
pub const DEFAULT_FOCUS_LIMIT: usize = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ProjectionConfig {
    pub board: BoardConfig,
    pub focus: FocusConfig,
    pub labels: LabelPalette,
    pub health: HealthConfig,
    pub workload: WorkloadThresholds,
    pub flow: StatusFlowConfig,
}

impl ProjectionConfig {
    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "projection config loaded");
        Ok(config)
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject configs the projections cannot interpret consistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for column in &self.board.columns {
            if !seen.insert(column.status) {
                return Err(ConfigError::Invalid(format!(
                    "board column `{}` is listed more than once",
                    column.status
                )));
            }
            if column.wip_limit == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "board column `{}` has a WIP limit of 0",
                    column.status
                )));
            }
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.flow.steps.iter().find(|status| !seen.insert(**status)) {
            return Err(ConfigError::Invalid(format!("status flow repeats `{dup}`")));
        }

        if self.health.default_score > 100 {
            return Err(ConfigError::Invalid("health.default_score exceeds 100".into()));
        }
        if self.health.attention_min > self.health.healthy_min {
            return Err(ConfigError::Invalid(
                "health.attention_min must not exceed health.healthy_min".into(),
            ));
        }

        let w = &self.workload;
        if !(w.light_max <= w.moderate_max && w.moderate_max <= w.heavy_max) {
            return Err(ConfigError::Invalid(
                "workload thresholds must be non-decreasing".into(),
            ));
        }
        Ok(())
    }
}

// ── Board ──────────────────────────────────────────────────────────

/// One Kanban column. `wip_limit` is sparse: most columns carry none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<usize>,
}

impl BoardColumn {
    pub fn new(status: TicketStatus) -> Self {
        Self { status, wip_limit: None }
    }

    pub fn with_limit(status: TicketStatus, limit: usize) -> Self {
        Self { status, wip_limit: Some(limit) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    pub columns: Vec<BoardColumn>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                BoardColumn::new(TicketStatus::New),
                BoardColumn::new(TicketStatus::Triaged),
                BoardColumn::with_limit(TicketStatus::InDev, 5),
                BoardColumn::new(TicketStatus::InReview),
                BoardColumn::new(TicketStatus::Qa),
                BoardColumn::new(TicketStatus::ClientReview),
                BoardColumn::new(TicketStatus::Resolved),
            ],
        }
    }
}

// ── Focus queue ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    pub limit: usize,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self { limit: DEFAULT_FOCUS_LIMIT }
    }
}

// ── Labels ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelPalette {
    /// Colour for labels not present in `colors`.
    pub default_color: String,
    pub colors: BTreeMap<String, String>,
}

impl Default for LabelPalette {
    fn default() -> Self {
        let colors = [
            ("frontend", "#3B82F6"),
            ("backend", "#10B981"),
            ("urgent", "#EF4444"),
            ("security", "#F59E0B"),
            ("api", "#8B5CF6"),
            ("database", "#06B6D4"),
            ("ui", "#EC4899"),
            ("mobile", "#F97316"),
            ("performance", "#6366F1"),
            ("responsive", "#14B8A6"),
            ("safari", "#F97316"),
            ("blocking", "#DC2626"),
        ]
        .into_iter()
        .map(|(label, color)| (label.to_string(), color.to_string()))
        .collect();

        Self { default_color: DEFAULT_LABEL_COLOR.to_string(), colors }
    }
}

// ── Health ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthConfig {
    /// Score for projects without an authored health value.
    pub default_score: u8,
    /// Scores at or above this are healthy.
    pub healthy_min: u8,
    /// Scores at or above this (and below `healthy_min`) need attention.
    pub attention_min: u8,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { default_score: DEFAULT_PROJECT_HEALTH, healthy_min: 80, attention_min: 60 }
    }
}

// ── Workload ───────────────────────────────────────────────────────

/// Inclusive upper bounds of open-ticket counts per workload level.
/// Anything above `heavy_max` is overloaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkloadThresholds {
    pub light_max: u32,
    pub moderate_max: u32,
    pub heavy_max: u32,
}

impl Default for WorkloadThresholds {
    fn default() -> Self {
        Self { light_max: 3, moderate_max: 6, heavy_max: 9 }
    }
}

// ── Status flow ────────────────────────────────────────────────────

/// Linear progress indicator shown on the ticket detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatusFlowConfig {
    pub steps: Vec<TicketStatus>,
}

impl Default for StatusFlowConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                TicketStatus::New,
                TicketStatus::Triaged,
                TicketStatus::InDev,
                TicketStatus::InReview,
                TicketStatus::Qa,
                TicketStatus::Resolved,
            ],
        }
    }
}

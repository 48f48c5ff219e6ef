// Shared inputs for every subcommand: dataset, projection config, clock and
// current user.
//
// Config lookup: `--config` → `$TICKETPILOT_CONFIG` → `~/.ticketpilot/config.toml`
// → built-in defaults. Dataset lookup: `--data` → `$TICKETPILOT_DATA`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::debug;

use ticketpilot_common::config::ProjectionConfig;
use ticketpilot_common::dataset::Dataset;
use ticketpilot_common::timestamp::parse_timestamp;

use crate::exit_code::CliError;

pub const CONFIG_ENV: &str = "TICKETPILOT_CONFIG";
pub const DATA_ENV: &str = "TICKETPILOT_DATA";

/// Flags accepted by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Dataset snapshot (JSON). Defaults to $TICKETPILOT_DATA.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Projection config (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate views as of this RFC 3339 instant instead of the wall clock.
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Current user id.
    #[arg(long, global = true, default_value = "u1")]
    pub user: String,

    /// Force JSON output.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `~/.ticketpilot/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ticketpilot"))
}

/// `~/.ticketpilot/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Where the config comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named explicitly by flag or env var; must exist.
    Explicit(PathBuf),
    /// The per-user default file; used only if present.
    Home(PathBuf),
    Defaults,
}

pub fn resolve_config_source(
    flag: Option<&Path>,
    env: Option<&str>,
    home_default: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(path) = env.filter(|s| !s.is_empty()) {
        return ConfigSource::Explicit(PathBuf::from(path));
    }
    match home_default {
        Some(path) => ConfigSource::Home(path),
        None => ConfigSource::Defaults,
    }
}

pub fn load_config(source: &ConfigSource) -> anyhow::Result<ProjectionConfig> {
    match source {
        ConfigSource::Explicit(path) => {
            if !path.exists() {
                return Err(CliError::new(
                    "CONFIG_NOT_FOUND",
                    format!("config file {} does not exist", path.display()),
                )
                .into());
            }
            ProjectionConfig::load_from(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        ConfigSource::Home(path) if path.exists() => ProjectionConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        ConfigSource::Home(_) | ConfigSource::Defaults => {
            debug!("using default projection config");
            Ok(ProjectionConfig::default())
        }
    }
}

pub fn resolve_data_path(flag: Option<&Path>, env: Option<&str>) -> anyhow::Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env.filter(|s| !s.is_empty()).map(PathBuf::from))
        .ok_or_else(|| {
            CliError::new(
                "DATA_PATH_MISSING",
                format!("no dataset given. Pass --data <FILE> or set {DATA_ENV}"),
            )
            .into()
        })
}

pub fn resolve_now(flag: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match flag {
        Some(raw) => parse_timestamp(raw).map_err(|e| {
            CliError::new("INVALID_ARGUMENT", format!("invalid --now value `{raw}`: {e}")).into()
        }),
        None => Ok(Utc::now()),
    }
}

/// Everything a view needs, loaded once per invocation.
#[derive(Debug)]
pub struct Context {
    pub dataset: Dataset,
    pub config: ProjectionConfig,
    pub now: DateTime<Utc>,
    pub user: String,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> anyhow::Result<Self> {
        let env_config = std::env::var(CONFIG_ENV).ok();
        let env_data = std::env::var(DATA_ENV).ok();

        let source = resolve_config_source(
            global.config.as_deref(),
            env_config.as_deref(),
            global_config_path(),
        );
        let config = load_config(&source)?;

        let data_path = resolve_data_path(global.data.as_deref(), env_data.as_deref())?;
        let dataset = Dataset::load_from(&data_path)
            .with_context(|| format!("failed to load dataset {}", data_path.display()))?;

        let now = resolve_now(global.now.as_deref())?;
        debug!(user = %global.user, now = %now, "context ready");
        Ok(Self { dataset, config, now, user: global.user.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_code::ExitCode;
    use std::fs;

    #[test]
    fn flag_beats_env_beats_home() {
        let home = Some(PathBuf::from("/home/me/.ticketpilot/config.toml"));
        assert_eq!(
            resolve_config_source(Some(Path::new("a.toml")), Some("b.toml"), home.clone()),
            ConfigSource::Explicit(PathBuf::from("a.toml"))
        );
        assert_eq!(
            resolve_config_source(None, Some("b.toml"), home.clone()),
            ConfigSource::Explicit(PathBuf::from("b.toml"))
        );
        assert_eq!(
            resolve_config_source(None, Some(""), home.clone()),
            ConfigSource::Home(PathBuf::from("/home/me/.ticketpilot/config.toml"))
        );
        assert_eq!(resolve_config_source(None, None, None), ConfigSource::Defaults);
    }

    #[test]
    fn missing_home_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let source = ConfigSource::Home(tmp.path().join("config.toml"));
        assert_eq!(load_config(&source).unwrap(), ProjectionConfig::default());
    }

    #[test]
    fn missing_explicit_config_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let source = ConfigSource::Explicit(tmp.path().join("nope.toml"));
        let err = load_config(&source).unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);
    }

    #[test]
    fn explicit_config_is_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[focus]\nlimit = 3\n").unwrap();
        let config = load_config(&ConfigSource::Explicit(path)).unwrap();
        assert_eq!(config.focus.limit, 3);
    }

    #[test]
    fn invalid_config_maps_to_data_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[focus]\nlimit = \"many\"\n").unwrap();
        let err = load_config(&ConfigSource::Explicit(path)).unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::Data);
    }

    #[test]
    fn data_path_requires_flag_or_env() {
        assert_eq!(
            resolve_data_path(Some(Path::new("d.json")), Some("e.json")).unwrap(),
            PathBuf::from("d.json")
        );
        assert_eq!(resolve_data_path(None, Some("e.json")).unwrap(), PathBuf::from("e.json"));
        let err = resolve_data_path(None, None).unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::Usage);
    }

    #[test]
    fn now_flag_is_parsed() {
        let now = resolve_now(Some("2026-10-18T12:00:00Z")).unwrap();
        assert_eq!(now.to_rfc3339(), "2026-10-18T12:00:00+00:00");
        let err = resolve_now(Some("soon")).unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::Usage);
    }
}

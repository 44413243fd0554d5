use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest accepted calendar offset from UTC, in minutes.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KudosConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Zone used to decide which calendar day or month an instant falls in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl CalendarConfig {
    /// Resolve the configured offset into a [`FixedOffset`].
    ///
    /// # Errors
    ///
    /// Returns an error when the offset lies outside +/-18 hours.
    pub fn zone(&self) -> Result<FixedOffset> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            bail!(
                "calendar.utc_offset_minutes = {} is outside +/-{MAX_UTC_OFFSET_MINUTES}",
                self.utc_offset_minutes
            );
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .with_context(|| format!("invalid UTC offset {} minutes", self.utc_offset_minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl TriggerConfig {
    #[must_use]
    pub const fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The task backend's SQLite database, opened read-only.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

const fn default_workers() -> usize {
    4
}

const fn default_queue_capacity() -> usize {
    256
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

impl KudosConfig {
    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range calendar offset, zero workers,
    /// a zero queue capacity, or zero attempts.
    pub fn validate(&self) -> Result<()> {
        self.calendar.zone()?;
        if self.trigger.workers == 0 {
            bail!("trigger.workers must be at least 1");
        }
        if self.trigger.queue_capacity == 0 {
            bail!("trigger.queue_capacity must be at least 1");
        }
        if self.trigger.max_attempts == 0 {
            bail!("trigger.max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Load a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<KudosConfig> {
    if !path.exists() {
        return Ok(KudosConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<KudosConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Default per-user config location (`<config dir>/kudos/config.toml`).
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kudos/config.toml"))
}

/// Resolve the effective configuration.
///
/// Order: `explicit` path if given, else the user config file, else
/// defaults; then `KUDOS_*` environment overrides; then validation.
///
/// # Errors
///
/// Returns an error if loading, an override, or validation fails.
pub fn resolve_config(explicit: Option<&Path>) -> Result<KudosConfig> {
    let base = match explicit.map(Path::to_path_buf).or_else(user_config_path) {
        Some(path) => load_config(&path)?,
        None => KudosConfig::default(),
    };

    let config = apply_env_overrides(base, |key| std::env::var(key).ok())?;
    config.validate()?;
    tracing::debug!(?config, "resolved kudos config");
    Ok(config)
}

/// Apply `KUDOS_WORKERS`, `KUDOS_UTC_OFFSET_MINUTES`, and `KUDOS_STORE_PATH`.
///
/// # Errors
///
/// Returns an error when a numeric override does not parse.
pub fn apply_env_overrides(
    mut config: KudosConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<KudosConfig> {
    if let Some(raw) = lookup("KUDOS_WORKERS") {
        config.trigger.workers = raw
            .trim()
            .parse()
            .with_context(|| format!("KUDOS_WORKERS must be an integer, got '{raw}'"))?;
    }
    if let Some(raw) = lookup("KUDOS_UTC_OFFSET_MINUTES") {
        config.calendar.utc_offset_minutes = raw
            .trim()
            .parse()
            .with_context(|| format!("KUDOS_UTC_OFFSET_MINUTES must be an integer, got '{raw}'"))?;
    }
    if let Some(raw) = lookup("KUDOS_STORE_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.store.path = Some(PathBuf::from(trimmed));
        }
    }
    Ok(config)
}

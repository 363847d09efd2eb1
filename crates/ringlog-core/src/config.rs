//! Configuration types for ringlog.
//!
//! [`Config::load`] reads `~/.config/ringlog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::error::{ProcessorError, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[buffer]
max_entries      = 10000
initial_capacity = 1000
source_slots     = 1024
max_alerts       = 100

[search]
default_limit = 10

[feed]
channel_capacity = 1024
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/ringlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// `[buffer]` section of `config.toml`. Sizes the store, the source set and
/// the alert log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BufferConfig {
    /// Hard ceiling on retained entries; the oldest is evicted past it.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Slots allocated up front. Grows by doubling until `max_entries`.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Fixed slot count of the source set. Must be a power of two; this is
    /// also the ceiling on distinct sources tracked.
    #[serde(default = "default_source_slots")]
    pub source_slots: usize,
    /// Alerts kept before the oldest is dropped. `0` disables alerting.
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
}

fn default_max_entries() -> usize { 10_000 }
fn default_initial_capacity() -> usize { 1_000 }
fn default_source_slots() -> usize { 1_024 }
fn default_max_alerts() -> usize { 100 }

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            initial_capacity: default_initial_capacity(),
            source_slots: default_source_slots(),
            max_alerts: default_max_alerts(),
        }
    }
}

impl BufferConfig {
    /// Buffer config with the given ceiling and the default remaining fields.
    /// `initial_capacity` is clamped so it never exceeds the ceiling.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            initial_capacity: default_initial_capacity().min(max_entries),
            ..Self::default()
        }
    }

    /// Reject values the store and source set cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(ProcessorError::InvalidConfig(
                "buffer.max_entries must be at least 1".to_string(),
            ));
        }
        if self.initial_capacity > self.max_entries {
            return Err(ProcessorError::InvalidConfig(format!(
                "buffer.initial_capacity ({}) exceeds buffer.max_entries ({})",
                self.initial_capacity, self.max_entries
            )));
        }
        if !self.source_slots.is_power_of_two() {
            return Err(ProcessorError::InvalidConfig(format!(
                "buffer.source_slots ({}) must be a power of two",
                self.source_slots
            )));
        }
        Ok(())
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Result limit used when the caller does not pass one.
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
}

fn default_search_limit() -> usize { 10 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
        }
    }
}

/// `[feed]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Bound of the channel between a feed task and the processor.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize { 1_024 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/ringlog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()?;
        cfg.buffer.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("ringlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

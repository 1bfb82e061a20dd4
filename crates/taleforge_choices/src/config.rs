//! Configuration structures for choice extraction.
//!
//! This module provides TOML-based configuration for the extraction thresholds
//! and the fallback pool. The configuration system supports:
//! - Bundled defaults (include_str! from taleforge.toml)
//! - User overrides (./taleforge.toml or ~/.config/taleforge/taleforge.toml)
//! - Automatic merging with user values taking precedence

use crate::CHOICE_COUNT;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taleforge_error::{ConfigError, TaleforgeError, TaleforgeResult};
use tracing::{debug, instrument};

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../taleforge.toml");

/// Character-length window for a candidate: `min` inclusive, `max` exclusive.
///
/// # Examples
///
/// ```
/// use taleforge_choices::LengthBounds;
///
/// let bounds = LengthBounds::new(4, 50);
/// assert!(!bounds.contains(3));
/// assert!(bounds.contains(4));
/// assert!(bounds.contains(49));
/// assert!(!bounds.contains(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthBounds {
    /// Smallest accepted length
    pub min: usize,
    /// First rejected length
    pub max: usize,
}

impl LengthBounds {
    /// Create a new length window.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `len` falls inside the window.
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len < self.max
    }

    fn validate(&self, name: &str) -> TaleforgeResult<()> {
        if self.min == 0 {
            return Err(ConfigError::new(format!("{}.min must be at least 1", name)).into());
        }
        if self.min >= self.max {
            return Err(ConfigError::new(format!(
                "{}.min ({}) must be less than {}.max ({})",
                name, self.min, name, self.max
            ))
            .into());
        }
        Ok(())
    }
}

fn default_line_min_chars() -> usize {
    6
}

fn default_sentence_bounds() -> LengthBounds {
    LengthBounds::new(6, 100)
}

fn default_phrase_bounds() -> LengthBounds {
    LengthBounds::new(4, 50)
}

fn default_fallback_pool() -> Vec<String> {
    [
        "Continue the adventure",
        "Try something different",
        "Explore a different path",
        "Make a brave decision",
        "Ask a friend for help",
        "Look around carefully",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Thresholds and fallback pool for the extraction cascade.
///
/// # Example
///
/// ```toml
/// [extraction]
/// line_min_chars = 6
/// fallback_pool = ["Keep exploring", "Turn back", "Call for help"]
///
/// [extraction.sentence_bounds]
/// min = 6
/// max = 100
/// ```
///
/// ```
/// use taleforge_choices::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .line_min_chars(8)
///     .build()
///     .unwrap();
/// assert_eq!(*config.line_min_chars(), 8);
/// assert_eq!(config.sentence_bounds().max, 100);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(deny_unknown_fields)]
#[builder(default)]
pub struct ExtractionConfig {
    /// Minimum length of a cleaned line for line-based extraction.
    #[serde(default = "default_line_min_chars")]
    line_min_chars: usize,

    /// Generic choices used, in order, to pad short results.
    #[serde(default = "default_fallback_pool")]
    fallback_pool: Vec<String>,

    /// Length window for sentence-based extraction.
    #[serde(default = "default_sentence_bounds")]
    sentence_bounds: LengthBounds,

    /// Length window for delimiter-based phrase extraction.
    #[serde(default = "default_phrase_bounds")]
    phrase_bounds: LengthBounds,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            line_min_chars: default_line_min_chars(),
            fallback_pool: default_fallback_pool(),
            sentence_bounds: default_sentence_bounds(),
            phrase_bounds: default_phrase_bounds(),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new extraction config builder.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }

    /// Validates thresholds and the fallback pool.
    ///
    /// The pool needs at least three distinct non-blank entries: when `k`
    /// grounded choices were found, at most `k` pool entries can collide
    /// with them and `3 - k` are still needed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> TaleforgeResult<()> {
        if self.line_min_chars == 0 {
            return Err(ConfigError::new("line_min_chars must be at least 1").into());
        }
        self.sentence_bounds.validate("sentence_bounds")?;
        self.phrase_bounds.validate("phrase_bounds")?;

        let distinct: HashSet<String> = self
            .fallback_pool
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_lowercase)
            .collect();
        if distinct.len() < CHOICE_COUNT {
            return Err(ConfigError::new(format!(
                "fallback_pool needs at least {} distinct non-blank entries, got {}",
                CHOICE_COUNT,
                distinct.len()
            ))
            .into());
        }
        Ok(())
    }
}

/// Top-level Tale Forge configuration.
///
/// Loads configuration from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from taleforge.toml)
/// 2. User override (~/.config/taleforge/taleforge.toml, then ./taleforge.toml)
///
/// # Example
///
/// ```no_run
/// use taleforge_choices::TaleforgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TaleforgeConfig::load()?;
/// println!("Line minimum: {}", config.extraction.line_min_chars());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct TaleforgeConfig {
    /// Choice extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl TaleforgeConfig {
    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TaleforgeResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::build(builder).map_err(|e| {
            TaleforgeError::from(ConfigError::new(format!(
                "Failed to read configuration from {}: {}",
                path.as_ref().display(),
                e
            )))
        })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (taleforge.toml shipped with the library)
    /// 2. User config in home directory (~/.config/taleforge/taleforge.toml)
    /// 3. User config in current directory (./taleforge.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load() -> TaleforgeResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/taleforge/taleforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("taleforge").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> TaleforgeResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                TaleforgeError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.extraction.validate()?;
        debug!(
            line_min_chars = config.extraction.line_min_chars,
            fallback_pool = config.extraction.fallback_pool.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

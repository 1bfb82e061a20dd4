//! The choice extraction cascade.
//!
//! Raw model output is run through [`Strategy::Lines`], then
//! [`Strategy::Sentences`], then [`Strategy::Delimiters`], stopping as soon
//! as three grounded candidates are available. Anything still missing is
//! padded from the configured fallback pool, so every call yields exactly
//! three choices.

use crate::{CHOICE_COUNT, ExtractionConfig, Strategy};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use taleforge_error::TaleforgeResult;
use tracing::{debug, instrument, warn};

/// Padding of last resort. Unreachable with a validated pool.
const LAST_RESORT: &str = "Continue the adventure";

static DEFAULT_EXTRACTOR: LazyLock<ChoiceExtractor> = LazyLock::new(ChoiceExtractor::default);

/// Exactly three choice strings, in document order.
///
/// # Examples
///
/// ```
/// use taleforge_choices::ChoiceExtractor;
///
/// let outcome = ChoiceExtractor::default().extract("Hide\nSeek");
/// let choices = outcome.choices();
/// assert_eq!(choices.len(), 3);
/// assert!(choices.iter().all(|choice| !choice.is_empty()));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Deref, derive_more::From,
)]
pub struct Choices([String; CHOICE_COUNT]);

impl Choices {
    /// Consume into the underlying array.
    pub fn into_inner(self) -> [String; CHOICE_COUNT] {
        self.0
    }
}

impl From<Choices> for [String; CHOICE_COUNT] {
    fn from(choices: Choices) -> Self {
        choices.0
    }
}

/// Result of running the cascade, tagged by whether padding was needed.
///
/// # Examples
///
/// ```
/// use taleforge_choices::{ChoiceExtractor, ChoiceOutcome, Strategy};
///
/// let extractor = ChoiceExtractor::default();
///
/// let outcome = extractor.extract("Search the cave\nAsk the owl\nFollow the trail");
/// assert!(matches!(outcome, ChoiceOutcome::Extracted { strategy: Strategy::Lines, .. }));
///
/// let outcome = extractor.extract("");
/// assert_eq!(outcome.fallback_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChoiceOutcome {
    /// All three choices came from the model's own text.
    Extracted {
        /// The extracted choices
        choices: Choices,
        /// Strategy that produced them
        strategy: Strategy,
    },
    /// Some or all choices came from the fallback pool.
    Fallback {
        /// Grounded choices first, then pool entries
        choices: Choices,
        /// Strategy that produced the grounded choices, if any were found
        strategy: Option<Strategy>,
        /// Number of pool entries used (1 to 3)
        fallback_count: usize,
    },
}

impl ChoiceOutcome {
    /// The three choices.
    pub fn choices(&self) -> &Choices {
        match self {
            Self::Extracted { choices, .. } | Self::Fallback { choices, .. } => choices,
        }
    }

    /// Consume the outcome, keeping only the choices.
    pub fn into_choices(self) -> Choices {
        match self {
            Self::Extracted { choices, .. } | Self::Fallback { choices, .. } => choices,
        }
    }

    /// Strategy that produced the grounded choices.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Self::Extracted { strategy, .. } => Some(*strategy),
            Self::Fallback { strategy, .. } => *strategy,
        }
    }

    /// Whether any pool entry was used.
    pub fn used_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Number of pool entries used.
    pub fn fallback_count(&self) -> usize {
        match self {
            Self::Extracted { .. } => 0,
            Self::Fallback { fallback_count, .. } => *fallback_count,
        }
    }
}

/// Extracts three branching choices from raw model output.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone, Default, derive_getters::Getters)]
pub struct ChoiceExtractor {
    config: ExtractionConfig,
}

impl ChoiceExtractor {
    /// Create an extractor with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config fails
    /// [`ExtractionConfig::validate`].
    pub fn new(config: ExtractionConfig) -> TaleforgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the cascade without padding.
    ///
    /// Returns the strategy whose candidates were kept (if any survived) and
    /// at most three candidates. A later strategy replaces the current best
    /// when it finds at least as many candidates.
    #[instrument(skip_all, fields(input_len = raw.len()))]
    pub fn candidates(&self, raw: &str) -> (Option<Strategy>, Vec<String>) {
        let mut best: Option<(Strategy, Vec<String>)> = None;

        for strategy in Strategy::iter() {
            let found = strategy.candidates(raw, &self.config);
            let best_len = best.as_ref().map_or(0, |(_, kept)| kept.len());
            debug!(%strategy, found = found.len(), best = best_len, "Strategy finished");

            if !found.is_empty() && found.len() >= best_len {
                best = Some((strategy, found));
            }
            if best.as_ref().is_some_and(|(_, kept)| kept.len() >= CHOICE_COUNT) {
                break;
            }
        }

        match best {
            Some((strategy, kept)) => (Some(strategy), kept),
            None => (None, Vec::new()),
        }
    }

    /// Extract exactly three choices, padding from the fallback pool if needed.
    #[instrument(skip_all, fields(input_len = raw.len()))]
    pub fn extract(&self, raw: &str) -> ChoiceOutcome {
        let (strategy, grounded) = self.candidates(raw);

        let grounded = match <[String; CHOICE_COUNT]>::try_from(grounded) {
            Ok(choices) => match strategy {
                Some(strategy) => {
                    debug!(%strategy, "Extracted choices from model output");
                    return ChoiceOutcome::Extracted {
                        choices: Choices(choices),
                        strategy,
                    };
                }
                None => Vec::from(choices),
            },
            Err(partial) => partial,
        };

        let padding = self.padding(&grounded);
        let fallback_count = padding.len();
        warn!(
            grounded = grounded.len(),
            fallback_count, "Padding choices from fallback pool"
        );

        let mut entries = grounded
            .into_iter()
            .chain(padding)
            .chain(std::iter::repeat_with(|| LAST_RESORT.to_string()));
        let choices = std::array::from_fn(|_| entries.next().unwrap_or_default());

        ChoiceOutcome::Fallback {
            choices: Choices(choices),
            strategy,
            fallback_count,
        }
    }

    /// Pool entries needed to fill `grounded` up to three, in pool order,
    /// skipping entries that repeat a grounded choice or an earlier entry.
    fn padding(&self, grounded: &[String]) -> Vec<String> {
        let needed = CHOICE_COUNT.saturating_sub(grounded.len());
        let mut seen: Vec<String> = grounded.iter().map(|c| c.to_lowercase()).collect();
        let mut padding = Vec::with_capacity(needed);

        for entry in self.config.fallback_pool() {
            if padding.len() == needed {
                break;
            }
            let entry = entry.trim();
            let key = entry.to_lowercase();
            if entry.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            padding.push(entry.to_string());
        }
        padding
    }
}

/// Extract three choices from raw model output with the default configuration.
///
/// Total over every input: empty or unparseable text yields fallback choices.
///
/// # Examples
///
/// ```
/// use taleforge_choices::extract_choices;
///
/// let choices = extract_choices("1. Search the cave\n2) Ask the owl\n3: Follow the trail");
/// assert_eq!(choices, ["Search the cave", "Ask the owl", "Follow the trail"]);
/// ```
pub fn extract_choices(raw: &str) -> [String; CHOICE_COUNT] {
    DEFAULT_EXTRACTOR.extract(raw).into_choices().into_inner()
}

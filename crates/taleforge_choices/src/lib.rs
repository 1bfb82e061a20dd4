//! Branching-choice extraction for Tale Forge story segments.
//!
//! After each story segment the language model is asked for three options
//! the reader can pick from. Its answer is free text: sometimes a clean
//! numbered list, sometimes prose, sometimes JSON. This crate turns that
//! text into exactly three choices.
//!
//! # Extraction cascade
//!
//! [`ChoiceExtractor`] tries three strategies, strictest first, and stops as
//! soon as one yields three candidates:
//!
//! 1. [`Strategy::Lines`] - one choice per cleaned line
//! 2. [`Strategy::Sentences`] - sentence fragments
//! 3. [`Strategy::Delimiters`] - comma/semicolon/dash/pipe separated phrases
//!
//! Short results are padded from a fixed, ordered fallback pool and reported
//! as [`ChoiceOutcome::Fallback`].
//!
//! # Examples
//!
//! ```
//! use taleforge_choices::{ChoiceExtractor, extract_choices};
//!
//! let choices = extract_choices("1. Search the cave\n2) Ask the owl\n3: Follow the trail");
//! assert_eq!(choices, ["Search the cave", "Ask the owl", "Follow the trail"]);
//!
//! let outcome = ChoiceExtractor::default().extract("Once upon a time there was a fox.");
//! assert!(outcome.used_fallback());
//! assert_eq!(outcome.choices().len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cleanup;
mod config;
mod extractor;
mod segment;
mod strategy;
mod structured;

/// Number of choices every extraction yields.
pub const CHOICE_COUNT: usize = 3;

pub use cleanup::{char_len, clean_line, is_numeric_only, strip_enumerator};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, LengthBounds, TaleforgeConfig};
pub use extractor::{ChoiceExtractor, ChoiceOutcome, Choices, extract_choices};
pub use segment::{SegmentSource, StorySegment, parse_segment};
pub use strategy::Strategy;
pub use structured::{
    StructuredChoice, StructuredSegment, extract_json, parse_json, parse_structured,
};

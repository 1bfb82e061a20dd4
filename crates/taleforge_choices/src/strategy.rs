//! The three candidate-extraction strategies, from strictest to noisiest.

use crate::cleanup::{char_len, clean_line, is_numeric_only};
use crate::{CHOICE_COUNT, ExtractionConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("Valid line break regex"));

static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Valid sentence terminator regex"));

static PHRASE_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;|\r\n\-–—]").expect("Valid phrase delimiter regex"));

/// One stage of the extraction cascade.
///
/// Variants are declared in cascade order; [`strum::IntoEnumIterator`]
/// yields them strictest first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One choice per line, after enumerator/bullet/quote cleanup.
    #[display("lines")]
    Lines,
    /// Sentence fragments of the text joined into one paragraph.
    #[display("sentences")]
    Sentences,
    /// Phrases between commas, semicolons, dashes, pipes and newlines.
    #[display("delimiters")]
    Delimiters,
}

impl Strategy {
    /// Run this strategy, returning at most three candidates in document order.
    pub fn candidates(self, raw: &str, config: &ExtractionConfig) -> Vec<String> {
        match self {
            Self::Lines => lines(raw, *config.line_min_chars()),
            Self::Sentences => sentences(raw, config),
            Self::Delimiters => phrases(raw, config),
        }
    }
}

fn lines(raw: &str, min_chars: usize) -> Vec<String> {
    LINE_BREAKS
        .split(raw)
        .map(clean_line)
        .filter(|line| char_len(line) >= min_chars && !is_numeric_only(line))
        .take(CHOICE_COUNT)
        .collect()
}

fn sentences(raw: &str, config: &ExtractionConfig) -> Vec<String> {
    let paragraph = LINE_BREAKS.replace_all(raw, " ");
    let bounds = config.sentence_bounds();
    SENTENCE_TERMINATORS
        .split(&paragraph)
        .map(clean_line)
        .filter(|fragment| bounds.contains(char_len(fragment)))
        .take(CHOICE_COUNT)
        .collect()
}

fn phrases(raw: &str, config: &ExtractionConfig) -> Vec<String> {
    let bounds = config.phrase_bounds();
    PHRASE_DELIMITERS
        .split(raw)
        .map(clean_line)
        .filter(|fragment| bounds.contains(char_len(fragment)))
        .take(CHOICE_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn run(strategy: Strategy, raw: &str) -> Vec<String> {
        strategy.candidates(raw, &ExtractionConfig::default())
    }

    #[test]
    fn test_cascade_order() {
        let order: Vec<_> = Strategy::iter().collect();
        assert_eq!(
            order,
            vec![Strategy::Lines, Strategy::Sentences, Strategy::Delimiters]
        );
    }

    #[test]
    fn test_lines_skip_short_and_numeric() {
        let raw = "12345\nGo\n\n  Search the cave  \r\n3.\nAsk the owl";
        assert_eq!(run(Strategy::Lines, raw), vec!["Search the cave", "Ask the owl"]);
    }

    #[test]
    fn test_lines_truncate_to_three() {
        let raw = "First option\nSecond option\nThird option\nFourth option";
        assert_eq!(
            run(Strategy::Lines, raw),
            vec!["First option", "Second option", "Third option"]
        );
    }

    #[test]
    fn test_sentences_join_lines() {
        let raw = "The fox paused\nat the river. Should she swim? Or wait!!! Yes";
        assert_eq!(
            run(Strategy::Sentences, raw),
            vec!["The fox paused at the river", "Should she swim", "Or wait"]
        );
    }

    #[test]
    fn test_sentences_reject_run_on_fragments() {
        let long = "word ".repeat(30);
        let raw = format!("{}. Climb the hill. Hi. Rest a while.", long);
        assert_eq!(
            run(Strategy::Sentences, &raw),
            vec!["Climb the hill", "Rest a while"]
        );
    }

    #[test]
    fn test_phrases_split_on_delimiters() {
        let raw = "You can swim, climb; or run | 1. hide in the barn - or sing";
        assert_eq!(
            run(Strategy::Delimiters, raw),
            vec!["You can swim", "climb", "or run"]
        );
    }

    #[test]
    fn test_phrases_strip_enumerators() {
        let raw = "ok, 1. hide in the barn, b) sing loudly";
        assert_eq!(
            run(Strategy::Delimiters, raw),
            vec!["hide in the barn", "sing loudly"]
        );
    }

    #[test]
    fn test_fragments_are_cleaned_like_lines() {
        let raw = "- \"Explore the ruins\"";
        assert_eq!(run(Strategy::Sentences, raw), vec!["Explore the ruins"]);
        assert_eq!(run(Strategy::Delimiters, raw), vec!["Explore the ruins"]);

        let raw = "**Wake the dragon**, 'Sing a song'";
        assert_eq!(
            run(Strategy::Delimiters, raw),
            vec!["Wake the dragon", "Sing a song"]
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Strategy::Lines.to_string(), "lines");
        assert_eq!(Strategy::Delimiters.to_string(), "delimiters");
    }
}

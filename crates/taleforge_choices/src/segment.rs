//! Story segment parsing: narrative text plus its three choices.

use crate::cleanup::{char_len, choice_header_len, clean_line, starts_choice_block};
use crate::structured::locate_structured;
use crate::{CHOICE_COUNT, ChoiceExtractor, ChoiceOutcome, Choices};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a segment's choices came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SegmentSource {
    /// The model answered with JSON containing at least three usable choices.
    Structured,
    /// Choices were salvaged from free text by the extraction cascade.
    Heuristic {
        /// Outcome of the cascade
        outcome: ChoiceOutcome,
    },
}

/// A parsed story segment, ready to be stored alongside its choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorySegment {
    /// Narrative text of the segment
    text: String,
    /// The three branching choices
    choices: Choices,
    /// How the choices were obtained
    #[serde(flatten)]
    source: SegmentSource,
}

impl StorySegment {
    /// Whether any fallback pool entry was used.
    pub fn used_fallback(&self) -> bool {
        match &self.source {
            SegmentSource::Structured => false,
            SegmentSource::Heuristic { outcome } => outcome.used_fallback(),
        }
    }
}

/// Split raw model output into narrative text and three choices.
///
/// JSON output is preferred when present and it carries at least three
/// choices that survive cleanup. Otherwise the narrative is the prose before
/// the first list item or choice header, and the free-text cascade runs over
/// the rest. Never fails.
///
/// # Examples
///
/// ```
/// use taleforge_choices::{ChoiceExtractor, parse_segment};
///
/// let raw = "The fox reached the river.\n\n1. Swim across\n2. Build a raft\n3. Ask the beaver";
/// let segment = parse_segment(&ChoiceExtractor::default(), raw);
/// assert_eq!(segment.text(), "The fox reached the river.");
/// assert_eq!(segment.choices()[0], "Swim across");
/// ```
#[instrument(skip_all, fields(input_len = raw.len()))]
pub fn parse_segment(extractor: &ChoiceExtractor, raw: &str) -> StorySegment {
    if let Some(segment) = structured_segment(extractor, raw) {
        debug!("Parsed structured segment");
        return segment;
    }

    let (text, choice_block) = split_narrative(raw);
    let outcome = extractor.extract(choice_block);
    StorySegment {
        text,
        choices: outcome.choices().clone(),
        source: SegmentSource::Heuristic { outcome },
    }
}

fn structured_segment(extractor: &ChoiceExtractor, raw: &str) -> Option<StorySegment> {
    let (json_start, structured) = match locate_structured(raw) {
        Ok(found) => found,
        Err(e) => {
            debug!(error = %e, "No structured segment, using heuristic extraction");
            return None;
        }
    };

    let bounds = extractor.config().sentence_bounds();
    let cleaned: Vec<String> = structured
        .choices
        .iter()
        .map(|choice| clean_line(choice.text()))
        .filter(|choice| bounds.contains(char_len(choice)))
        .take(CHOICE_COUNT)
        .collect();

    let choices = match <[String; CHOICE_COUNT]>::try_from(cleaned) {
        Ok(choices) => Choices::from(choices),
        Err(partial) => {
            debug!(
                usable = partial.len(),
                "Structured segment has too few usable choices"
            );
            return None;
        }
    };

    let text = match structured.text {
        Some(text) => text.trim().to_string(),
        None => split_narrative(&raw[..json_start]).0,
    };

    Some(StorySegment {
        text,
        choices,
        source: SegmentSource::Structured,
    })
}

/// Split raw output at the first list item or choice header.
///
/// Returns the narrative prose before that line and the text the cascade
/// should run over. A choice header itself is never part of that text, but
/// anything written after its colon is. Without prose the whole trimmed text
/// is the narrative; without a usable block the cascade sees all of it.
fn split_narrative(raw: &str) -> (String, &str) {
    let mut prose_end = raw.len();
    let mut block_start = raw.len();
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        if starts_choice_block(line) {
            prose_end = offset;
            block_start = offset + choice_header_len(line).unwrap_or(0);
            break;
        }
        offset += line.len();
    }

    let prose = raw[..prose_end].trim();
    let block = &raw[block_start..];
    if block.trim().is_empty() {
        (raw.trim().to_string(), raw)
    } else if prose.is_empty() {
        (raw.trim().to_string(), block)
    } else {
        (prose.to_string(), block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strategy;

    fn parse(raw: &str) -> StorySegment {
        parse_segment(&ChoiceExtractor::default(), raw)
    }

    #[test]
    fn test_structured_segment_preferred() {
        let raw = r#"```json
{"text": "Pip found a map.", "choices": ["1. Read the map", "- \"Hide the map\"", "Show Grandpa"]}
```"#;
        let segment = parse(raw);
        assert_eq!(segment.source(), &SegmentSource::Structured);
        assert_eq!(segment.text(), "Pip found a map.");
        assert_eq!(
            **segment.choices(),
            [
                "Read the map".to_string(),
                "Hide the map".to_string(),
                "Show Grandpa".to_string()
            ]
        );
        assert!(!segment.used_fallback());
    }

    #[test]
    fn test_structured_text_falls_back_to_leading_prose() {
        let raw = "Pip found a map.\n[\"Read the map\", \"Hide the map\", \"Show Grandpa\"]";
        let segment = parse(raw);
        assert_eq!(segment.source(), &SegmentSource::Structured);
        assert_eq!(segment.text(), "Pip found a map.");
    }

    #[test]
    fn test_short_structured_choices_use_heuristics() {
        let raw = r#"{"text": "Pip found a map.", "choices": ["Read", "Hide the map"]}"#;
        let segment = parse(raw);
        assert!(matches!(segment.source(), SegmentSource::Heuristic { .. }));
    }

    #[test]
    fn test_heuristic_segment_splits_prose_from_list() {
        let raw = "Luna saw a glowing door.\nIt hummed softly.\n\nChoices:\n- Open the door\n- Knock politely\n- Walk away";
        let segment = parse(raw);
        assert_eq!(segment.text(), "Luna saw a glowing door.\nIt hummed softly.");
        assert_eq!(
            **segment.choices(),
            [
                "Open the door".to_string(),
                "Knock politely".to_string(),
                "Walk away".to_string()
            ]
        );
        match segment.source() {
            SegmentSource::Heuristic { outcome } => {
                assert_eq!(outcome.strategy(), Some(Strategy::Lines));
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_choice_headers_are_not_choices() {
        for header in ["**Choices:**", "Choose:", "### Your options:"] {
            let raw = format!(
                "Luna saw a glowing door.\n\n{}\n1. Open the door\n2. Knock politely\n3. Walk away",
                header
            );
            let segment = parse(&raw);
            assert_eq!(segment.text(), "Luna saw a glowing door.", "header: {}", header);
            assert_eq!(
                **segment.choices(),
                [
                    "Open the door".to_string(),
                    "Knock politely".to_string(),
                    "Walk away".to_string()
                ],
                "header: {}",
                header
            );
            assert!(!segment.used_fallback());
        }
    }

    #[test]
    fn test_inline_choices_after_header_are_kept() {
        let (text, block) = split_narrative("The owl blinked.\nChoose: Wave\nHoot back");
        assert_eq!(text, "The owl blinked.");
        assert_eq!(block, " Wave\nHoot back");
    }

    #[test]
    fn test_header_without_prose_is_skipped() {
        let raw = "**Choices:**\n- Open the door\n- Knock politely\n- Walk away";
        let segment = parse(raw);
        assert_eq!(segment.choices()[0], "Open the door");
        assert_eq!(segment.choices()[2], "Walk away");
    }

    #[test]
    fn test_stage_direction_before_json() {
        let raw = r#"The fox [smiling] waited. {"choices": ["Open the door", "Knock politely", "Walk away"]}"#;
        let segment = parse(raw);
        assert_eq!(segment.source(), &SegmentSource::Structured);
        assert_eq!(segment.text(), "The fox [smiling] waited.");
        assert_eq!(segment.choices()[0], "Open the door");
    }

    #[test]
    fn test_split_without_prose_or_list_keeps_whole_text() {
        let raw = "  Once upon a time.  ";
        assert_eq!(split_narrative(raw), ("Once upon a time.".to_string(), raw));

        let raw = "1. Go\n2. Stay";
        assert_eq!(split_narrative(raw), ("1. Go\n2. Stay".to_string(), raw));
    }

    #[test]
    fn test_split_handles_crlf() {
        let raw = "The owl blinked.\r\n1) Wave\r\n2) Hoot back";
        let (text, block) = split_narrative(raw);
        assert_eq!(text, "The owl blinked.");
        assert_eq!(block, "1) Wave\r\n2) Hoot back");
    }

    #[test]
    fn test_segment_serializes_source_inline() {
        let segment = parse("");
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["source"], "heuristic");
        assert_eq!(json["outcome"]["kind"], "fallback");
        assert_eq!(json["choices"].as_array().unwrap().len(), 3);
    }
}

//! Utilities for reading structured segments out of model responses.
//!
//! When asked for a story continuation with choices, models sometimes answer
//! with JSON, often wrapped in markdown code blocks or surrounded by
//! explanatory prose. This module locates and parses that JSON so the
//! heuristic cascade is only needed when the model answered in free text.

use serde::Deserialize;
use taleforge_error::{ExtractionError, ExtractionErrorKind, TaleforgeError, TaleforgeResult};

/// A choice as the model wrote it: a bare string or an object with a label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StructuredChoice {
    /// `"Search the cave"`
    Text(String),
    /// `{"text": "Search the cave"}` (also `label`, `choice`, `option`)
    Labeled {
        /// Choice label
        #[serde(alias = "label", alias = "choice", alias = "option")]
        text: String,
    },
}

impl StructuredChoice {
    /// The choice text.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Labeled { text } => text,
        }
    }
}

/// Story text and choices as emitted in a JSON response.
///
/// # Examples
///
/// ```
/// use taleforge_choices::{StructuredSegment, parse_json};
///
/// let json = r#"{"content": "The fox woke up.", "options": ["Eat", {"label": "Sleep"}]}"#;
/// let segment: StructuredSegment = parse_json(json).unwrap();
/// assert_eq!(segment.text.as_deref(), Some("The fox woke up."));
/// assert_eq!(segment.choices[1].text(), "Sleep");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StructuredSegment {
    /// Story text of the segment
    #[serde(default, alias = "content", alias = "story", alias = "segment")]
    pub text: Option<String>,
    /// Branching choices
    #[serde(default, alias = "options")]
    pub choices: Vec<StructuredChoice>,
}

/// Locate and parse a structured segment in a model response.
///
/// A top-level JSON array is read as a list of choices with no text.
/// Candidate structures are tried in document order, so bracketed prose
/// such as a `[smiling]` stage direction does not hide JSON after it.
///
/// # Errors
///
/// Returns an error if no JSON is present or none of it matches the segment shape.
///
/// # Examples
///
/// ```
/// use taleforge_choices::parse_structured;
///
/// let response = r#"The fox [smiling] waited. {"choices": ["Wave", "Hide", "Sing"]}"#;
/// let segment = parse_structured(response).unwrap();
/// assert_eq!(segment.choices.len(), 3);
/// ```
pub fn parse_structured(response: &str) -> TaleforgeResult<StructuredSegment> {
    locate_structured(response).map(|(_, segment)| segment)
}

/// Parse the first candidate structure that fits the segment shape and
/// return it with its byte offset in `response`.
///
/// A candidate with choices wins over an earlier one without any.
pub(crate) fn locate_structured(response: &str) -> TaleforgeResult<(usize, StructuredSegment)> {
    let mut first_parsed = None;
    let mut first_error = None;

    for (offset, json) in json_candidates(response) {
        match parse_segment_json(&json) {
            Ok(segment) if !segment.choices.is_empty() => return Ok((offset, segment)),
            Ok(segment) => {
                if first_parsed.is_none() {
                    first_parsed = Some((offset, segment));
                }
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match (first_parsed, first_error) {
        (Some(found), _) => Ok(found),
        (None, Some(e)) => Err(e),
        (None, None) => Err(no_json(response)),
    }
}

fn parse_segment_json(json: &str) -> TaleforgeResult<StructuredSegment> {
    if json.trim_start().starts_with('[') {
        let choices: Vec<StructuredChoice> = parse_json(json)?;
        return Ok(StructuredSegment { text: None, choices });
    }
    parse_json(json)
}

/// Extract JSON from a response that may contain markdown or extra text.
///
/// This function tries multiple extraction strategies:
/// 1. Markdown code blocks: ```json ... ```
/// 2. The first balanced structure: { ... } or [ ... ]
///
/// # Errors
///
/// Returns an error if no JSON is found in the response.
///
/// # Examples
///
/// ```
/// use taleforge_choices::extract_json;
///
/// let response = "Here is the next part:\n\
///     \n\
///     ```json\n\
///     {\"text\": \"The fox ran.\", \"choices\": [\"Follow\", \"Wait\", \"Hide\"]}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("Follow"));
/// ```
pub fn extract_json(response: &str) -> TaleforgeResult<String> {
    json_candidates(response)
        .into_iter()
        .next()
        .map(|(_, json)| json)
        .ok_or_else(|| no_json(response))
}

fn no_json(response: &str) -> TaleforgeError {
    tracing::debug!(response_length = response.len(), "No JSON found in model response");
    ExtractionError::new(ExtractionErrorKind::NoJson {
        length: response.len(),
    })
    .into()
}

/// Every JSON-looking structure in `response` with its byte offset: a code
/// block first, then each top-level balanced `{}` or `[]` in document order.
fn json_candidates(response: &str) -> Vec<(usize, String)> {
    let mut candidates: Vec<_> = extract_from_code_block(response, "json").into_iter().collect();

    let mut from = 0;
    while let Some(found) = response[from..].find(['{', '[']) {
        let start = from + found;
        match extract_balanced(response, start) {
            Some(json) => {
                from = start + json.len();
                candidates.push((start, json));
            }
            None => from = start + 1,
        }
    }
    candidates
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<(usize, String)> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some((start, content.trim().to_string()));
        }
        // No closing fence: the response was likely truncated
        return Some((start, response[content_start..].trim().to_string()));
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip a language specifier, if any
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        let content = match response[skip_to..].find("```") {
            Some(end) => &response[skip_to..skip_to + end],
            None => &response[skip_to..],
        };
        let content = content.trim();
        // Unlabelled fences often hold prose; only accept JSON-looking content
        if content.starts_with('{') || content.starts_with('[') {
            return Some((start, content.to_string()));
        }
    }

    None
}

/// Extract content between balanced delimiters.
///
/// `start` must point at a `{` or `[`; content is extracted up to the
/// matching close, handling nesting and string literals.
fn extract_balanced(response: &str, start: usize) -> Option<String> {
    let open = response[start..].chars().next()?;
    let close = match open {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use taleforge_choices::parse_json;
///
/// let choices: Vec<String> = parse_json(r#"["Swim", "Climb", "Run"]"#).unwrap();
/// assert_eq!(choices.len(), 3);
/// ```
pub fn parse_json<T>(json_str: &str) -> TaleforgeResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::debug!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        ExtractionError::new(ExtractionErrorKind::JsonParse {
            message: e.to_string(),
            preview,
        })
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleforge_error::TaleforgeErrorKind;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the next part of the story:

```json
{
  "text": "The fox found a cave.",
  "choices": ["Go in", "Wait outside", "Call a friend"]
}
```

Enjoy!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("Wait outside"));
    }

    #[test]
    fn test_extract_json_truncated_code_block() {
        let response = "```json\n{\"text\": \"The fox";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"text\": \"The fox");
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! {"text": "A {curly} tale", "meta": {"page": 2}} Bye."#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"text": "A {curly} tale", "meta": {"page": 2}}"#);
    }

    #[test]
    fn test_extract_json_array_first() {
        let response = r#"Options: ["Swim", "Climb"] and {"ignored": true}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"["Swim", "Climb"]"#);
    }

    #[test]
    fn test_unlabelled_prose_fence_is_not_json() {
        let response = "```\nOnce upon a time.\n```";
        assert!(extract_json(response).is_err());
    }

    #[test]
    fn test_no_json_found() {
        let err = extract_json("Just a story with no structure").unwrap_err();
        assert!(matches!(
            err.kind(),
            TaleforgeErrorKind::Extraction(e) if matches!(e.kind(), ExtractionErrorKind::NoJson { .. })
        ));
    }

    #[test]
    fn test_extract_json_with_string_escapes() {
        let response = r#"{"text": "She said \"hi}\""}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_parse_structured_object() {
        let response = r#"{"story": "It rained.", "choices": ["Jump in puddles", {"text": "Stay dry"}]}"#;
        let segment = parse_structured(response).unwrap();
        assert_eq!(segment.text.as_deref(), Some("It rained."));
        let texts: Vec<_> = segment.choices.iter().map(StructuredChoice::text).collect();
        assert_eq!(texts, vec!["Jump in puddles", "Stay dry"]);
    }

    #[test]
    fn test_parse_structured_bare_array() {
        let segment = parse_structured(r#"["Swim", "Climb", "Run"]"#).unwrap();
        assert_eq!(segment.text, None);
        assert_eq!(segment.choices.len(), 3);
    }

    #[test]
    fn test_parse_json_error_has_preview() {
        let err = parse_json::<StructuredSegment>("{\"text\": 5}").unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse JSON"));
    }

    #[test]
    fn test_bracketed_prose_before_json_is_skipped() {
        let response = r#"The fox [smiling] waited. {"text": "x", "choices": ["Open the door", "Knock politely", "Walk away"]}"#;
        let (offset, segment) = locate_structured(response).unwrap();
        assert_eq!(&response[..offset], "The fox [smiling] waited. ");
        assert_eq!(segment.text.as_deref(), Some("x"));
        let texts: Vec<_> = segment.choices.iter().map(StructuredChoice::text).collect();
        assert_eq!(texts, vec!["Open the door", "Knock politely", "Walk away"]);
    }

    #[test]
    fn test_object_with_choices_beats_earlier_empty_object() {
        let response = r#"{"mood": "calm"} then {"choices": ["Wave", "Hide", "Sing"]}"#;
        let (offset, segment) = locate_structured(response).unwrap();
        assert_eq!(offset, 22);
        assert_eq!(segment.choices.len(), 3);
    }

    #[test]
    fn test_parse_structured_reports_parse_errors() {
        let err = parse_structured("[smiling] and {broken}").unwrap_err();
        assert!(matches!(
            err.kind(),
            TaleforgeErrorKind::Extraction(e) if matches!(e.kind(), ExtractionErrorKind::JsonParse { .. })
        ));
    }

    #[test]
    fn test_code_block_offset_is_fence_start() {
        let response = "The end.\n```json\n{\"choices\": [\"Wave\"]}\n```";
        let (offset, _) = locate_structured(response).unwrap();
        assert_eq!(offset, 9);
    }
}

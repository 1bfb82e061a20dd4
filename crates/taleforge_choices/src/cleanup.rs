//! Cleanup rules applied to candidate choice lines.
//!
//! Models decorate their options with list enumerators, bullets, labels,
//! markdown emphasis and quotes. These helpers peel that decoration off so
//! only the choice text itself remains.

use regex::Regex;
use std::sync::LazyLock;

/// `1. `, `2) `, `3: `, `4 `
static NUMERIC_ENUMERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.):]\s*|\s+)").expect("Valid numeric enumerator regex"));

/// `A. `, `b) `, `C: `. A bare letter is an ordinary word ("A", "I"), so the
/// punctuation is required.
static LETTER_ENUMERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][.):]\s+").expect("Valid letter enumerator regex"));

/// `Option 1: `, `Choice B) `, `choice: `
static CHOICE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:option|choice)\s*(?:\d+|[a-z])?\s*[.):]\s*").expect("Valid label regex")
});

/// Markdown list bullets need trailing whitespace, which keeps `**bold**` intact.
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+•]\s+").expect("Valid bullet regex"));

static NUMERIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?$").expect("Valid numeric regex"));

/// Start of an explicit list item, as used to find where narrative prose ends.
/// Stricter than the enumerator strippers: a number needs its punctuation.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.):]|[A-Za-z][.)]|[-*+•])\s+").expect("Valid list item regex")
});

/// `Choices:`, `**Choose:**`, `### Your options:`
static CHOICE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[#*_\s]*(?:your\s+)?(?:choices|choose|options)\s*[*_]*\s*:[*_]*")
        .expect("Valid choice header regex")
});

const QUOTE_PAIRS: [(char, char); 5] = [
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
    ('\u{201C}', '\u{201D}'),
    ('\u{2018}', '\u{2019}'),
];

const EMPHASIS_MARKERS: [&str; 2] = ["**", "__"];

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether `text` is nothing but a number, optionally followed by a period.
///
/// # Examples
///
/// ```
/// use taleforge_choices::is_numeric_only;
///
/// assert!(is_numeric_only("12345"));
/// assert!(is_numeric_only("3."));
/// assert!(!is_numeric_only("3 bears"));
/// ```
pub fn is_numeric_only(text: &str) -> bool {
    NUMERIC_ONLY.is_match(text)
}

/// Strip one leading numeric enumerator, then one leading letter enumerator.
///
/// A number glued to a following digit (`1.5 miles`, `3:30 sharp`) is a
/// value, not an enumerator, and is kept.
///
/// # Examples
///
/// ```
/// use taleforge_choices::strip_enumerator;
///
/// assert_eq!(strip_enumerator("2) Ask the owl"), "Ask the owl");
/// assert_eq!(strip_enumerator("3.5 hours later"), "3.5 hours later");
/// ```
pub fn strip_enumerator(text: &str) -> &str {
    let text = text.trim();
    let text = match NUMERIC_ENUMERATOR.find(text) {
        Some(m)
            if !m.as_str().ends_with(char::is_whitespace)
                && text[m.end()..].starts_with(|c: char| c.is_ascii_digit()) =>
        {
            text
        }
        Some(m) => text[m.end()..].trim(),
        None => text,
    };
    strip_prefix_match(&LETTER_ENUMERATOR, text)
}

/// Clean a single line of model output down to its choice text.
///
/// Strips, in order: a numeric enumerator, a letter enumerator, an
/// `Option N:` label, a bullet, wrapping markdown emphasis and one pair of
/// wrapping quotes. Whitespace is trimmed between every step.
///
/// # Examples
///
/// ```
/// use taleforge_choices::clean_line;
///
/// assert_eq!(clean_line("2) Ask the owl"), "Ask the owl");
/// assert_eq!(clean_line("- \"Explore the ruins\""), "Explore the ruins");
/// assert_eq!(clean_line("Option 3: **Follow the trail**"), "Follow the trail");
/// ```
pub fn clean_line(line: &str) -> String {
    let text = strip_enumerator(line);
    let text = strip_prefix_match(&CHOICE_LABEL, text);
    let text = strip_prefix_match(&BULLET, text);
    let text = strip_emphasis(text);
    strip_quotes(text).to_string()
}

/// Whether a trimmed line opens a list item or a choice header.
pub fn starts_choice_block(line: &str) -> bool {
    let line = line.trim();
    LIST_ITEM.is_match(line) || CHOICE_LABEL.is_match(line) || CHOICE_HEADER.is_match(line)
}

/// Byte length of a leading choice header such as `**Choices:**`, if any.
pub(crate) fn choice_header_len(line: &str) -> Option<usize> {
    CHOICE_HEADER.find(line).map(|m| m.end())
}

fn strip_prefix_match<'a>(pattern: &Regex, text: &'a str) -> &'a str {
    match pattern.find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text,
    }
}

fn strip_emphasis(text: &str) -> &str {
    for marker in EMPHASIS_MARKERS {
        let inner = text
            .strip_prefix(marker)
            .and_then(|rest| rest.strip_suffix(marker))
            .map(str::trim);
        if let Some(inner) = inner.filter(|inner| !inner.is_empty()) {
            return inner;
        }
    }
    text
}

fn strip_quotes(text: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    text
}

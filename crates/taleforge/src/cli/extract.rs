//! Extract command handler.

use super::commands::OutputFormat;
use std::io::Read;
use std::path::Path;
use taleforge::{
    ChoiceExtractor, ChoiceOutcome, Choices, IoError, JsonError, StorySegment, TaleforgeConfig,
    TaleforgeResult, parse_segment,
};
use tracing::{debug, instrument};

const STDIN_NAME: &str = "<stdin>";

/// Read model output, extract choices and print them.
#[instrument(skip(config))]
pub fn handle_extract(
    config: &TaleforgeConfig,
    file: Option<&Path>,
    format: OutputFormat,
    segment: bool,
) -> TaleforgeResult<()> {
    let extractor = ChoiceExtractor::new(config.extraction.clone())?;
    let raw = read_input(file)?;
    debug!(input_len = raw.len(), "Read model output");

    let rendered = if segment {
        render_segment(&parse_segment(&extractor, &raw), format)?
    } else {
        render_outcome(&extractor.extract(&raw), format)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Read the whole input from a file, or stdin for `None` and `-`.
fn read_input(file: Option<&Path>) -> TaleforgeResult<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| IoError::new(path.display().to_string(), e.to_string()).into()),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| IoError::new(STDIN_NAME, e.to_string()))?;
            Ok(buffer)
        }
    }
}

fn render_outcome(outcome: &ChoiceOutcome, format: OutputFormat) -> TaleforgeResult<String> {
    match format {
        OutputFormat::Json => to_json(outcome),
        OutputFormat::Human => {
            let mut out = numbered(outcome.choices());
            if let Some(strategy) = outcome.strategy() {
                out.push_str(&format!("\nStrategy: {}", strategy));
            }
            if outcome.used_fallback() {
                out.push_str(&format!(
                    "\nNote: {} choice(s) came from the fallback pool",
                    outcome.fallback_count()
                ));
            }
            Ok(out)
        }
    }
}

fn render_segment(segment: &StorySegment, format: OutputFormat) -> TaleforgeResult<String> {
    match format {
        OutputFormat::Json => to_json(segment),
        OutputFormat::Human => {
            let mut out = String::new();
            if !segment.text().is_empty() {
                out.push_str(segment.text());
                out.push_str("\n\n");
            }
            out.push_str(&numbered(segment.choices()));
            if segment.used_fallback() {
                out.push_str("\nNote: fallback choices were used");
            }
            Ok(out)
        }
    }
}

fn numbered(choices: &Choices) -> String {
    choices
        .iter()
        .enumerate()
        .map(|(i, choice)| format!("{}. {}", i + 1, choice))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_json<T: serde::Serialize>(value: &T) -> TaleforgeResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()).into())
}

//! Tale Forge - branching story tooling
//!
//! Tale Forge asks a language model for a story segment and three options
//! the reader can choose from. This crate re-exports the workspace crates
//! and ships the `taleforge` binary for inspecting model output by hand.
//!
//! # Quick Start
//!
//! ```
//! use taleforge::{ChoiceExtractor, parse_segment};
//!
//! let raw = "The owl blinked twice.\n\n1. Follow the owl\n2. Climb the oak\n3. Go home";
//! let segment = parse_segment(&ChoiceExtractor::default(), raw);
//! assert_eq!(segment.text(), "The owl blinked twice.");
//! assert_eq!(segment.choices()[2], "Go home");
//! ```
//!
//! # Architecture
//!
//! - `taleforge_error` - Error types
//! - `taleforge_choices` - Choice extraction, configuration and segment parsing
//!
//! This crate (`taleforge`) re-exports everything for convenience.

pub use taleforge_choices::*;
pub use taleforge_error::*;

mod observability;

pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

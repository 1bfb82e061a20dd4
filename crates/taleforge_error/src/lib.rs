//! Error types for the Tale Forge library.
//!
//! This crate provides the foundation error types used throughout the Tale Forge crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Choice extraction itself never fails. These errors cover the edges around
//! it: configuration, structured (JSON) model output, reading input and
//! rendering output.
//!
//! # Examples
//!
//! ```
//! use taleforge_error::{ConfigError, TaleforgeResult};
//!
//! fn load_thresholds() -> TaleforgeResult<usize> {
//!     Err(ConfigError::new("line_min_chars must be at least 1"))?
//! }
//!
//! match load_thresholds() {
//!     Ok(min) => println!("Got: {}", min),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod extraction;
mod io;
mod json;

pub use config::ConfigError;
pub use error::{TaleforgeError, TaleforgeErrorKind, TaleforgeResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use io::IoError;
pub use json::JsonError;

//! Embed AIGC provenance chunks into RIFF/WAVE files.
//!
//! The [`riff`] module is a small chunk-stream codec; [`tagger`] composes it
//! into the file-to-file operation that inserts an `AIGC` chunk right after
//! the `fmt ` chunk while passing every other chunk through untouched.

pub mod aigc;
pub mod config;
pub mod constants;
pub mod error;
pub mod riff;
pub mod tagger;
pub mod utils;

pub use error::{AigcError, Result};
pub use tagger::{TagOptions, TagReport, tag_with_aigc, tag_with_options};

//! Convert parsed ASS/SSA subtitle documents into WebVTT.
//!
//! The core is [`cue::convert`]: it takes a [`model::ParsedDocument`] and
//! returns the cues plus a report of lines that were omitted or degraded
//! because WebVTT cannot express them.

pub mod alignment;
pub mod cli;
pub mod config;
pub mod cue;
pub mod error;
pub mod formats;
pub mod markup;
pub mod model;
pub mod pipeline;
pub mod style_index;
pub mod unsupported;

pub use cue::{Conversion, ConvertOptions, Cue, CueMode, ImpactedLine, Report, convert};
pub use error::ConvertError;
pub use model::ParsedDocument;

//! # Unfurl
//!
//! A cancellable typewriter-reveal engine for streamed markup.
//!
//! Unfurl turns a raw, loosely structured API response into safe display
//! markup, then streams that markup to a display surface one semantic unit
//! at a time without ever exposing a malformed partial tag.
//!
//! ## Core Concepts
//!
//! - **Format pipeline**: deterministic raw-text → [`SafeMarkup`] stages
//! - **Reveal units**: a single grapheme or one whole tag, never less
//! - **Cooperative cancellation**: a superseded reveal stops before its
//!   next sink write, silently
//! - **Session registry**: at most one active reveal per sink
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use unfurl::{reveal, shared, FormatPipeline, MemorySink};
//!
//! let pipeline = FormatPipeline::default();
//! let markup = pipeline.format(Some("**hello world**"), Some("")).unwrap();
//!
//! let sink = shared(MemorySink::new());
//! reveal(sink, markup, Duration::from_millis(20)).wait();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod format;
pub mod reveal;
pub mod sink;
pub mod source;

// Re-exports for convenience
pub use format::sanitize::{AllowListSanitizer, Sanitize};
pub use format::{FormatError, FormatPipeline, SafeMarkup, LINE_BREAK};
pub use reveal::{reveal, units, RevealHandle, RevealRegistry, RevealUnit, SinkId, Units};
pub use sink::{shared, MemorySink, Sink, SharedSink, TerminalSink};
pub use source::{AnagramSource, Presenter, SourceError, FALLBACK_MESSAGE};

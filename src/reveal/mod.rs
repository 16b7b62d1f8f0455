//! Reveal scheduling: cancellable, incrementally paced emission.
//!
//! A reveal session walks a [`SafeMarkup`](crate::format::SafeMarkup)
//! string unit by unit (one grapheme or one whole tag at a time) and
//! writes the growing prefix to a sink with a pause between units:
//!
//! ```text
//! SafeMarkup ──▶ Units ──▶ ┌───────────────┐      write(prefix)
//!                          │ session thread │ ───────────────────▶ Sink
//!                          └───────────────┘
//!                                 ▲
//!                 cancel flag + wake channel (RevealHandle)
//! ```
//!
//! Sessions are registered per sink in a [`RevealRegistry`] so at most
//! one loop ever drives a given sink.

mod registry;
mod session;
mod unit;

pub use registry::{RevealRegistry, SinkId};
pub use session::{reveal, RevealHandle};
pub use unit::{units, RevealUnit, Units};

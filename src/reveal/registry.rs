//! Registry of running reveal sessions, keyed by sink identity.
//!
//! The registry owns the at-most-one-active-session-per-sink invariant:
//! starting a reveal for a sink that already has one running cancels and
//! joins the old session first, so the superseded loop can never write
//! to the sink again. It is an explicit object owned by whichever
//! component manages the sinks; dropping it cancels every session it
//! still tracks.

use crate::format::SafeMarkup;
use crate::reveal::session::{reveal, RevealHandle};
use crate::sink::SharedSink;
use log::debug;
use std::collections::HashMap;
use std::time::Duration;

/// Identifies a sink within a [`RevealRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(pub u32);

impl SinkId {
    /// Create a new sink ID.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Tracks the active reveal session for each sink.
#[derive(Default)]
pub struct RevealRegistry {
    sessions: HashMap<SinkId, RevealHandle>,
}

impl RevealRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a reveal for `id`, superseding any session already running
    /// against the same sink.
    ///
    /// The superseded session is cancelled and joined before the new one
    /// spawns. Joining is bounded by one inter-unit delay because the
    /// cancel also wakes the session's sleep.
    pub fn start(&mut self, id: SinkId, sink: SharedSink, text: SafeMarkup, unit_delay: Duration) {
        if let Some(prev) = self.sessions.remove(&id) {
            debug!("superseding reveal session for {id:?}");
            prev.join();
        }
        self.sessions.insert(id, reveal(sink, text, unit_delay));
    }

    /// Cancel the session for `id`, if any.
    ///
    /// Silent when no session is running; cancellation is never an error.
    pub fn cancel(&mut self, id: SinkId) {
        if let Some(handle) = self.sessions.remove(&id) {
            handle.join();
        }
    }

    /// Whether a session for `id` is still emitting.
    pub fn is_active(&self, id: SinkId) -> bool {
        self.sessions.get(&id).is_some_and(|h| !h.is_finished())
    }

    /// Drop handles whose loops have already exited.
    pub fn reap(&mut self) {
        self.sessions.retain(|_, handle| !handle.is_finished());
    }

    /// Number of tracked sessions, including finished-but-unreaped ones.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry tracks no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

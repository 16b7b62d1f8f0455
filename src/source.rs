//! The anagram-source seam and the presentation facade.
//!
//! The core never fetches anything itself: an [`AnagramSource`]
//! collaborator produces raw response text, and any failure there means
//! "no usable raw text". [`Presenter`] ties the collaborators together
//! in the one supported control flow (fetch, format, reveal) and
//! absorbs fetch failures by animating a static fallback message
//! through the same reveal path.

use crate::format::{sanitize::Sanitize, FormatError, FormatPipeline, SafeMarkup};
use crate::reveal::{RevealRegistry, SinkId};
use crate::sink::SharedSink;
use log::warn;
use std::time::Duration;
use thiserror::Error;

/// Shown in place of pipeline output when the upstream fetch fails.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, we could not come up with anything for that just now. Please try again in a moment.";

/// Failures surfaced by an [`AnagramSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The upstream endpoint could not be reached.
    #[error("network failure: {0}")]
    Network(String),
    /// The upstream endpoint answered with something unusable.
    #[error("protocol failure: {0}")]
    Protocol(String),
}

/// Upstream provider of raw anagram text.
pub trait AnagramSource {
    /// Fetch the raw response for `input`.
    fn fetch(&self, input: &str) -> Result<String, SourceError>;
}

/// Ties the pipeline and the scheduler together for one set of sinks.
///
/// [`Presenter::present`] fetches, formats, and starts the reveal,
/// superseding any reveal already running on the target sink. A fetch
/// failure substitutes [`FALLBACK_MESSAGE`], skipping the pipeline
/// since the fallback is caller-controlled text, and still animates it
/// so the user sees the message arrive the same way.
pub struct Presenter<Q: AnagramSource, S: Sanitize> {
    source: Q,
    pipeline: FormatPipeline<S>,
    registry: RevealRegistry,
    unit_delay: Duration,
}

impl<Q: AnagramSource, S: Sanitize> Presenter<Q, S> {
    /// Create a presenter with the given collaborators and pacing.
    pub fn new(source: Q, pipeline: FormatPipeline<S>, unit_delay: Duration) -> Self {
        Self {
            source,
            pipeline,
            registry: RevealRegistry::new(),
            unit_delay,
        }
    }

    /// Fetch, format, and reveal the response for `input` on `sink`.
    ///
    /// # Errors
    ///
    /// Only [`FormatError`] for absent arguments escapes; fetch failures
    /// are absorbed into the fallback message and cancellation of a
    /// superseded reveal is not an error at all.
    pub fn present(
        &mut self,
        id: SinkId,
        sink: SharedSink,
        input: &str,
    ) -> Result<(), FormatError> {
        let markup = match self.source.fetch(input) {
            Ok(raw) => self.pipeline.format(Some(&raw), Some(input))?,
            Err(err) => {
                warn!("anagram fetch failed, presenting fallback: {err}");
                SafeMarkup::verbatim(FALLBACK_MESSAGE)
            }
        };
        self.registry.start(id, sink, markup, self.unit_delay);
        Ok(())
    }

    /// The session registry, for cancelling or inspecting reveals.
    pub fn registry_mut(&mut self) -> &mut RevealRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatPipeline;
    use crate::sink::MemorySink;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn pipeline() -> FormatPipeline {
        FormatPipeline::default()
    }

    struct CannedSource(Result<String, SourceError>);

    impl AnagramSource for CannedSource {
        fn fetch(&self, _input: &str) -> Result<String, SourceError> {
            self.0.clone()
        }
    }

    fn wait_for_idle<Q: AnagramSource, S: Sanitize>(presenter: &mut Presenter<Q, S>, id: SinkId) {
        for _ in 0..200 {
            if !presenter.registry_mut().is_active(id) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("reveal did not finish in time");
    }

    #[test]
    fn test_present_formats_and_reveals() {
        let source = CannedSource(Ok("**hello world**".to_owned()));
        let mut presenter = Presenter::new(source, pipeline(), Duration::ZERO);

        let sink = Arc::new(Mutex::new(MemorySink::new()));
        let shared: SharedSink = sink.clone();
        presenter.present(SinkId(0), shared, "").unwrap();
        wait_for_idle(&mut presenter, SinkId(0));

        assert_eq!(sink.lock().unwrap().content(), "<b>Hello World</b>");
    }

    #[test]
    fn test_fetch_failure_presents_fallback() {
        let source = CannedSource(Err(SourceError::Network("timed out".to_owned())));
        let mut presenter = Presenter::new(source, pipeline(), Duration::ZERO);

        let sink = Arc::new(Mutex::new(MemorySink::new()));
        let shared: SharedSink = sink.clone();
        presenter.present(SinkId(0), shared, "new york").unwrap();
        wait_for_idle(&mut presenter, SinkId(0));

        assert_eq!(sink.lock().unwrap().content(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_present_supersedes_previous_reveal() {
        let source = CannedSource(Ok("replacement".to_owned()));
        let mut presenter = Presenter::new(source, pipeline(), Duration::ZERO);

        let sink = Arc::new(Mutex::new(MemorySink::new()));
        let shared: SharedSink = sink.clone();
        presenter.present(SinkId(7), shared.clone(), "").unwrap();
        presenter.present(SinkId(7), shared, "").unwrap();
        wait_for_idle(&mut presenter, SinkId(7));

        assert_eq!(sink.lock().unwrap().content(), "replacement");
    }

    #[test]
    fn test_source_error_display() {
        assert_eq!(
            SourceError::Network("down".to_owned()).to_string(),
            "network failure: down"
        );
        assert_eq!(
            SourceError::Protocol("bad json".to_owned()).to_string(),
            "protocol failure: bad json"
        );
    }
}

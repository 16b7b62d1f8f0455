//! Typewriter Demo: reveals a formatted anagram response in the terminal.
//!
//! Run with `cargo run --example typewriter`.

use std::time::Duration;
use unfurl::{
    shared, AnagramSource, FormatPipeline, Presenter, SinkId, SourceError, TerminalSink,
};

/// Canned stand-in for the real anagram API.
///
/// Produces the same rough shape the live endpoint does: a hash heading,
/// markdown bold, HTML entities, and the user's phrase with its spaces
/// stripped (which the pipeline restores).
struct CannedSource;

impl AnagramSource for CannedSource {
    fn fetch(&self, input: &str) -> Result<String, SourceError> {
        let compact: String = input.split_whitespace().collect();
        Ok(format!(
            "### Anagram Report:\nWe unscrambled **{input}** for you &amp; friends.\nBest match: &quot;{compact}&quot; &#8212; enjoy!"
        ))
    }
}

fn main() {
    println!("Unfurl Typewriter Demo");
    println!("======================\n");

    let pipeline: FormatPipeline = FormatPipeline::default();
    let mut presenter = Presenter::new(CannedSource, pipeline, Duration::from_millis(18));

    let sink = shared(TerminalSink::new());
    presenter
        .present(SinkId(0), sink, "new york")
        .expect("both arguments are present");

    // The reveal runs on its own thread; dropping the presenter would
    // cancel it, so hold on until the animation finishes.
    while presenter.registry_mut().is_active(SinkId(0)) {
        std::thread::sleep(Duration::from_millis(25));
    }
    println!();
}

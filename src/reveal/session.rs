//! Reveal sessions: one cancellable timed loop per sink.
//!
//! Each call to [`reveal`] spawns a dedicated thread that walks the
//! markup unit by unit, writing the cumulative revealed prefix to the
//! sink and pausing between units. Cancellation is cooperative and
//! silent: the flag is checked before every sink mutation, and the
//! inter-unit sleep doubles as a wake channel so a cancel interrupts
//! the pause immediately instead of waiting it out.

use crate::format::SafeMarkup;
use crate::reveal::unit::units;
use crate::sink::SharedSink;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running reveal session.
///
/// Dropping the handle cancels the session, so a caller that wants the
/// animation to finish must hold the handle (or park it in a
/// [`RevealRegistry`](crate::reveal::RevealRegistry)).
pub struct RevealHandle {
    /// Cooperative cancellation flag, checked before each sink write.
    cancelled: Arc<AtomicBool>,
    /// Wakes the inter-unit sleep so cancellation takes effect promptly.
    cancel_tx: Sender<()>,
    /// Session thread, taken on join.
    handle: Option<JoinHandle<()>>,
}

impl RevealHandle {
    /// Signal the session to stop emitting further units.
    ///
    /// Already-emitted units are not rolled back and no error is
    /// reported; cancellation is an expected, silent outcome. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        let _ = self.cancel_tx.try_send(());
    }

    /// Whether the reveal loop has exited (completed or cancelled).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and block until the session thread has exited and its
    /// timer resources are released.
    pub fn join(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Block until the session runs to natural completion.
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a reveal session: stream `text` to `sink` one unit at a time.
///
/// Returns immediately; the animation runs on a dedicated thread. The
/// sink receives the cumulative revealed prefix after each unit, in
/// strict left-to-right order, and the complete text as a final step
/// when the session is not cancelled.
///
/// # Panics
///
/// Panics if the OS fails to spawn the session thread.
#[allow(clippy::missing_panics_doc)]
pub fn reveal(sink: SharedSink, text: SafeMarkup, unit_delay: Duration) -> RevealHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    // Capacity 1 is enough: one message means "stop".
    let (cancel_tx, cancel_rx) = bounded(1);

    let handle = thread::Builder::new()
        .name("unfurl-reveal".to_owned())
        .spawn(move || run_loop(&sink, text.as_str(), unit_delay, &flag, &cancel_rx))
        .expect("Failed to spawn reveal thread");

    RevealHandle {
        cancelled,
        cancel_tx,
        handle: Some(handle),
    }
}

/// The timed emission loop.
fn run_loop(
    sink: &SharedSink,
    text: &str,
    unit_delay: Duration,
    cancelled: &AtomicBool,
    wake: &Receiver<()>,
) {
    let mut revealed = String::with_capacity(text.len());

    for unit in units(text) {
        if cancelled.load(Ordering::Relaxed) {
            debug!(
                "reveal cancelled after {} of {} bytes",
                revealed.len(),
                text.len()
            );
            return;
        }

        revealed.push_str(unit.text());
        sink.lock().unwrap().write(&revealed);

        match wake.recv_timeout(unit_delay * unit.delay_weight()) {
            Err(RecvTimeoutError::Timeout) => {}
            // A wake message, or a dropped handle, means cancellation.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!(
                    "reveal cancelled mid-pause after {} of {} bytes",
                    revealed.len(),
                    text.len()
                );
                return;
            }
        }
    }

    // End-state guarantee: a non-cancelled run always leaves the sink
    // holding the complete text.
    if !cancelled.load(Ordering::Relaxed) {
        sink.lock().unwrap().write(text);
        debug!("reveal completed ({} bytes)", text.len());
    }
}

//! Ordered progress channel between a running upload and its renderer.

use std::sync::{Arc, Mutex, MutexGuard};

use filedrop_core::{ProgressEvent, ProgressTracker};
use tokio::sync::mpsc;

pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Create the channel a single upload attempt reports on.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Publishes progress for one attempt.
///
/// Clones share one tracker. Events are computed and sent under the same lock,
/// so the channel sees them in tracker order.
#[derive(Clone, Debug)]
pub struct ProgressReporter {
    tracker: Arc<Mutex<ProgressTracker>>,
    tx: ProgressSender,
}

impl ProgressReporter {
    pub fn new(total_bytes: u64, tx: ProgressSender) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(ProgressTracker::new(total_bytes))),
            tx,
        }
    }

    pub fn advance(&self, bytes: u64) {
        let mut tracker = self.lock();
        if let Some(event) = tracker.advance(bytes) {
            self.publish(event);
        }
    }

    pub fn finish(&self) {
        let mut tracker = self.lock();
        if let Some(event) = tracker.finish() {
            self.publish(event);
        }
    }

    fn publish(&self, event: ProgressEvent) {
        // A dropped receiver only means nobody is rendering.
        if self.tx.send(event).is_err() {
            tracing::trace!(?event, "Progress receiver dropped");
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressTracker> {
        match self.tracker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

//! Upload progress accounting.
//!
//! `ProgressTracker` turns byte counts into percentages and decides which
//! notifications to publish. Within one attempt the published percentages never
//! decrease and `Finished` is published exactly once, after which the tracker
//! stays silent.

use serde::Serialize;

/// Notification sent from a running submission to whoever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "percent", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Percentage of the file body handed to the transport so far.
    Advanced(u8),
    /// The attempt reached a terminal response. Nothing follows.
    Finished,
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total_bytes: u64,
    sent_bytes: u64,
    last_percent: Option<u8>,
    finished: bool,
}

impl ProgressTracker {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            sent_bytes: 0,
            last_percent: None,
            finished: false,
        }
    }

    /// `round(sent / total * 100)`, clamped to 100. An empty body reports 0
    /// until it finishes.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 0;
        }
        let ratio = self.sent_bytes as f64 / self.total_bytes as f64;
        (ratio * 100.0).round().min(100.0) as u8
    }

    /// Account for `bytes` more sent. Returns the event to publish, if the
    /// rounded percentage moved forward.
    pub fn advance(&mut self, bytes: u64) -> Option<ProgressEvent> {
        if self.finished {
            return None;
        }

        self.sent_bytes = self.sent_bytes.saturating_add(bytes);
        let percent = self.percent();

        match self.last_percent {
            Some(last) if percent <= last => None,
            _ => {
                self.last_percent = Some(percent);
                Some(ProgressEvent::Advanced(percent))
            }
        }
    }

    /// Close the attempt. Returns `Finished` the first time only.
    pub fn finish(&mut self) -> Option<ProgressEvent> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(ProgressEvent::Finished)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

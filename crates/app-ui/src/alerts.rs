//! Alert queue
//!
//! Alerts raised by the controllers are queued here until the view layer
//! presents them as dialogs.

use app_core::auth::{Alert, Alerter};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// FIFO of alerts waiting to be shown
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: Mutex<VecDeque<Alert>>,
    presented: Mutex<usize>,
}

impl AlertQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Alert currently on screen, if any
    pub fn current(&self) -> Option<Alert> {
        self.pending.lock().front().cloned()
    }

    /// Dismiss the alert on screen
    pub fn dismiss(&self) -> Option<Alert> {
        self.pending.lock().pop_front()
    }

    /// Remove and return all pending alerts
    pub fn take(&self) -> Vec<Alert> {
        self.pending.lock().drain(..).collect()
    }

    /// Number of alerts waiting
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Total number of alerts ever raised
    pub fn presented_count(&self) -> usize {
        *self.presented.lock()
    }
}

impl Alerter for AlertQueue {
    fn alert(&self, alert: Alert) {
        tracing::debug!(title = %alert.title, "alert raised");
        self.pending.lock().push_back(alert);
        *self.presented.lock() += 1;
    }
}

use super::context::StatusReporter;
use std::sync::Mutex;
use tracing::info;

/// Reports worker status through the application log
#[derive(Debug, Clone, Copy)]
pub struct TracingStatusReporter {
    worker_id: usize,
}

impl TracingStatusReporter {
    pub fn new(worker_id: usize) -> Self {
        Self { worker_id }
    }
}

impl StatusReporter for TracingStatusReporter {
    fn set_status(&self, status: &str) {
        info!(worker = self.worker_id, "{}", status);
    }
}

/// Keeps every reported status in memory
#[derive(Debug, Default)]
pub struct RecordingStatusReporter {
    statuses: Mutex<Vec<String>>,
}

impl RecordingStatusReporter {
    pub fn statuses(&self) -> Vec<String> {
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatusReporter for RecordingStatusReporter {
    fn set_status(&self, status: &str) {
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(status.to_string());
    }
}

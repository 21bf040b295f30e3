use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Request counters for the assistant core.
/// All metrics are atomic counters so a host can share them across threads.
#[derive(Clone, Default, Debug)]
pub struct Metrics {
    /// Instructions handed to the command interpreter
    pub commands_total: Arc<AtomicU64>,
    /// Level/goal/interest updates that were persisted
    pub profile_updates: Arc<AtomicU64>,
    /// Recommendation requests answered
    pub recommendations_served: Arc<AtomicU64>,
    /// Decisions routed to an external collaborator
    pub delegated_total: Arc<AtomicU64>,
    /// Failed instructions
    pub errors_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_command(&self) {
        self.commands_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_profile_update(&self) {
        self.profile_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recommendation(&self) {
        self.recommendations_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delegation(&self) {
        self.delegated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commands_total: self.commands_total.load(Ordering::Relaxed),
            profile_updates: self.profile_updates.load(Ordering::Relaxed),
            recommendations_served: self.recommendations_served.load(Ordering::Relaxed),
            delegated_total: self.delegated_total.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub commands_total: u64,
    pub profile_updates: u64,
    pub recommendations_served: u64,
    pub delegated_total: u64,
    pub errors_total: u64,
}

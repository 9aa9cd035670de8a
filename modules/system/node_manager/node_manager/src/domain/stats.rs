//! Diagnostic counters for discovery and export.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Monotonic counters shared by the discovery engine and the exporter.
#[derive(Debug, Default)]
pub struct Stats {
    discoveries_succeeded: AtomicU64,
    discoveries_failed: AtomicU64,
    skipped_addresses: AtomicU64,
    dropped_export_facts: AtomicU64,
}

/// Point-in-time copy of [`Stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub discoveries_succeeded: u64,
    pub discoveries_failed: u64,
    /// Guest addresses skipped because they are not IPv4.
    pub skipped_addresses: u64,
    /// Address facts left out of exports because of their type.
    pub dropped_export_facts: u64,
}

fn as_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn discovery_succeeded(&self, skipped_addresses: usize) {
        self.discoveries_succeeded.fetch_add(1, Ordering::Relaxed);
        self.skipped_addresses
            .fetch_add(as_u64(skipped_addresses), Ordering::Relaxed);
    }

    pub(crate) fn discovery_failed(&self) {
        self.discoveries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn export_dropped(&self, facts: usize) {
        if facts > 0 {
            self.dropped_export_facts
                .fetch_add(as_u64(facts), Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            discoveries_succeeded: self.discoveries_succeeded.load(Ordering::Relaxed),
            discoveries_failed: self.discoveries_failed.load(Ordering::Relaxed),
            skipped_addresses: self.skipped_addresses.load(Ordering::Relaxed),
            dropped_export_facts: self.dropped_export_facts.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = Stats::new();
        stats.discovery_succeeded(2);
        stats.discovery_succeeded(0);
        stats.discovery_failed();
        stats.export_dropped(3);
        stats.export_dropped(0);

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                discoveries_succeeded: 2,
                discoveries_failed: 1,
                skipped_addresses: 2,
                dropped_export_facts: 3,
            }
        );
    }
}

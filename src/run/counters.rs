use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic "next ticket" counter. Tickets are `1..=limit`; each is
/// claimed by exactly one worker and none are issued past the cap.
#[derive(Debug)]
pub struct TicketCounter {
    next: AtomicU64,
    limit: u64,
}

impl TicketCounter {
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self {
            next: AtomicU64::new(1),
            limit,
        }
    }

    /// Claims the next ticket, or `None` once the counter is exhausted.
    pub fn claim(&self) -> Option<u64> {
        let ticket = self.next.fetch_add(1, Ordering::Relaxed);
        (ticket <= self.limit).then_some(ticket)
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

/// The only state mutated by more than one worker: the ticket counter
/// and the completed-count. Both are plain atomic increments; no
/// compound invariant spans them, so no lock is needed.
#[derive(Debug)]
pub struct SharedCounters {
    pub tickets: TicketCounter,
    completed: AtomicU64,
}

impl SharedCounters {
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self {
            tickets: TicketCounter::new(limit),
            completed: AtomicU64::new(0),
        }
    }

    /// Records one completed measured request and returns the new total.
    pub fn record_completion(&self) -> u64 {
        self.completed
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1)
    }

    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }
}

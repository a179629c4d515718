// SPDX-License-Identifier: MPL-2.0
//! Cancellable single-purpose timers.
//!
//! The gallery never sleeps itself: it hands out a [`Ticket`] describing how
//! long the caller should wait, and the caller reports back with the ticket's
//! generation when the delay elapses. Scheduling again (or cancelling) bumps
//! the generation, so any older ticket still in flight is ignored when it
//! fires.

use std::time::Duration;

/// A scheduled wake-up handed to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub delay: Duration,
}

/// One timer purpose (search debounce, fade, deferred focus, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSlot {
    generation: u64,
    pending: bool,
}

impl TimerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the timer, invalidating any pending ticket.
    pub fn schedule(&mut self, delay: Duration) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        Ticket {
            generation: self.generation,
            delay,
        }
    }

    /// Cancels the pending ticket, if any.
    pub fn cancel(&mut self) {
        if self.pending {
            self.generation = self.generation.wrapping_add(1);
            self.pending = false;
        }
    }

    /// Consumes a fired ticket. Returns `true` only for the latest pending one.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending && generation == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn latest_ticket_fires_once() {
        let mut slot = TimerSlot::new();
        let ticket = slot.schedule(DELAY);
        assert!(slot.is_pending());
        assert!(slot.fire(ticket.generation));
        assert!(!slot.fire(ticket.generation));
        assert!(!slot.is_pending());
    }

    #[test]
    fn rescheduling_invalidates_previous_ticket() {
        let mut slot = TimerSlot::new();
        let first = slot.schedule(DELAY);
        let second = slot.schedule(DELAY);
        assert!(!slot.fire(first.generation));
        assert!(slot.fire(second.generation));
    }

    #[test]
    fn cancel_invalidates_pending_ticket() {
        let mut slot = TimerSlot::new();
        let ticket = slot.schedule(DELAY);
        slot.cancel();
        assert!(!slot.fire(ticket.generation));
    }

    #[test]
    fn ticket_carries_requested_delay() {
        let mut slot = TimerSlot::new();
        assert_eq!(slot.schedule(DELAY).delay, DELAY);
    }
}

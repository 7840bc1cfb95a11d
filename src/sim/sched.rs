//! Tick-deadline scheduler
//!
//! Every delayed game action goes through this queue instead of ad-hoc
//! callbacks. Entries are stamped with the epoch they were scheduled under;
//! `cancel_all` bumps the epoch, so anything queued by a finished round is
//! invalidated and dropped at drain time. Ticks are the only clock here.

/// A delayed game action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Light tile `0..len` of the sequence and queue the next step
    PlayStep(usize),
    /// Revert the lit tile to its base color
    EndHighlight,
    /// Playback done and settled; open the input window
    OpenInput,
    /// Begin the next level
    Advance,
    /// Hide the bonus ball and start accepting the guess
    HideBall,
    /// Drop the countdown meter by one
    CountdownTick,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: u64,
    epoch: u64,
    action: Action,
}

/// Pending delayed actions for the current round
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    epoch: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation; bumped by every `cancel_all`
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Queue `action` to fire `delay_ticks` after `now`
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, action: Action) {
        self.pending.push(Pending {
            due: now + delay_ticks,
            epoch: self.epoch,
            action,
        });
    }

    /// Invalidate everything scheduled so far
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
    }

    /// Drop pending actions matching `pred` (e.g. the countdown when the
    /// input window closes early)
    pub fn cancel_where(&mut self, pred: impl Fn(Action) -> bool) {
        self.pending.retain(|p| !pred(p.action));
    }

    /// Pop every action due at `now`, earliest deadline first. Entries from a
    /// stale epoch are discarded here, never returned.
    pub fn drain_due(&mut self, now: u64) -> Vec<Action> {
        self.pending.retain(|p| p.epoch == self.epoch);
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.due);
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.iter().all(|p| p.epoch != self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_deadline_order() {
        let mut sched = Scheduler::new();
        sched.schedule(0, 20, Action::OpenInput);
        sched.schedule(0, 10, Action::PlayStep(0));
        assert_eq!(sched.drain_due(5), vec![]);
        assert_eq!(sched.drain_due(20), vec![Action::PlayStep(0), Action::OpenInput]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_cancel_all_invalidates_pending() {
        let mut sched = Scheduler::new();
        sched.schedule(0, 10, Action::PlayStep(3));
        sched.cancel_all();
        // The old entry is due but stale; it must not fire
        assert_eq!(sched.drain_due(100), vec![]);
        assert!(sched.is_empty());

        // Fresh entries after the bump still fire
        sched.schedule(100, 10, Action::Advance);
        assert_eq!(sched.drain_due(110), vec![Action::Advance]);
    }

    #[test]
    fn test_cancel_where_is_selective() {
        let mut sched = Scheduler::new();
        sched.schedule(0, 10, Action::CountdownTick);
        sched.schedule(0, 10, Action::EndHighlight);
        sched.cancel_where(|a| a == Action::CountdownTick);
        assert_eq!(sched.drain_due(10), vec![Action::EndHighlight]);
    }

    #[test]
    fn test_epoch_monotonic() {
        let mut sched = Scheduler::new();
        let e0 = sched.epoch();
        sched.cancel_all();
        sched.cancel_all();
        assert_eq!(sched.epoch(), e0 + 2);
    }
}

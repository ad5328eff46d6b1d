//! Virtual-time scheduler for the page's timers.
//!
//! Each [`TimerKind`] has at most one pending instance: scheduling a kind that
//! is already pending replaces it, so re-arming never leaves a second timer
//! running. Time only moves through [`Scheduler::pop_due`] and
//! [`Scheduler::settle`].

use crate::domain::event::TimerKind;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: Duration,
    period: Option<Duration>,
    /// Insertion order, breaks ties between timers due at the same instant.
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: HashMap<TimerKind, Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, timer: TimerKind, after: Duration, repeat: bool) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self.pending.insert(
            timer,
            Pending {
                due: self.now + after,
                period: repeat.then_some(after),
                seq,
            },
        );
        if replaced.is_some() {
            tracing::trace!("Re-armed timer {:?}", timer);
        }
    }

    pub fn cancel(&mut self, timer: TimerKind) -> bool {
        self.pending.remove(&timer).is_some()
    }

    pub fn is_pending(&self, timer: TimerKind) -> bool {
        self.pending.contains_key(&timer)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time left until `timer` fires, if it is pending.
    pub fn remaining(&self, timer: TimerKind) -> Option<Duration> {
        self.pending
            .get(&timer)
            .map(|p| p.due.saturating_sub(self.now))
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time. Repeating timers are re-armed for their next period.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (timer, pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(t, p)| (*t, *p))?;

        self.now = self.now.max(pending.due);
        match pending.period {
            // A zero period would fire forever within one advance.
            Some(period) if !period.is_zero() => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.pending.insert(
                    timer,
                    Pending {
                        due: pending.due + period,
                        period: Some(period),
                        seq,
                    },
                );
            }
            _ => {
                self.pending.remove(&timer);
            }
        }
        Some(timer)
    }

    /// Moves the clock forward to `until` once no timer is left to fire.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormKind;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_schedule_replaces_pending_instance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Autoplay, ms(5000), true);
        scheduler.schedule(TimerKind::Autoplay, ms(5000), true);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_repeating_timer_rearms() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Autoplay, ms(100), true);

        let mut fired = 0;
        while scheduler.pop_due(ms(350)).is_some() {
            fired += 1;
        }
        scheduler.settle(ms(350));

        assert_eq!(fired, 3);
        assert_eq!(scheduler.remaining(TimerKind::Autoplay), Some(ms(50)));
    }

    #[test]
    fn test_one_shot_fires_once_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::BannerDismiss(FormKind::Contact), ms(200), false);
        scheduler.schedule(TimerKind::SubmitDelay(FormKind::Contact), ms(100), false);

        assert_eq!(
            scheduler.pop_due(ms(1000)),
            Some(TimerKind::SubmitDelay(FormKind::Contact))
        );
        assert_eq!(scheduler.now(), ms(100));
        assert_eq!(
            scheduler.pop_due(ms(1000)),
            Some(TimerKind::BannerDismiss(FormKind::Contact))
        );
        assert_eq!(scheduler.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::ScrollThrottle, ms(10), false);
        assert!(scheduler.cancel(TimerKind::ScrollThrottle));
        assert!(!scheduler.cancel(TimerKind::ScrollThrottle));
        assert_eq!(scheduler.pop_due(ms(100)), None);
    }

    #[test]
    fn test_timer_not_due_yet_is_kept() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::ScrollThrottle, ms(10), false);
        assert_eq!(scheduler.pop_due(ms(5)), None);
        scheduler.settle(ms(5));
        assert_eq!(scheduler.remaining(TimerKind::ScrollThrottle), Some(ms(5)));
    }
}

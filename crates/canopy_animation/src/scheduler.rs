//! Animation scheduler
//!
//! Owns the repeating timers behind decorative effects. Every timer records
//! the owner that started it so the owner's teardown can cancel exactly its
//! own timers; nothing here outlives an explicit cancellation.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct IntervalId;
}

#[derive(Clone, Debug)]
struct Interval<O> {
    owner: O,
    period_ms: f32,
    elapsed_ms: f32,
    fired: u32,
}

/// A timer firing reported by [`AnimationScheduler::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Firing<O> {
    pub id: IntervalId,
    pub owner: O,
    /// 0-based count of this timer's firings.
    pub sequence: u32,
}

pub struct AnimationScheduler<O: Copy + PartialEq> {
    intervals: SlotMap<IntervalId, Interval<O>>,
}

impl<O: Copy + PartialEq> AnimationScheduler<O> {
    pub fn new() -> Self {
        Self {
            intervals: SlotMap::with_key(),
        }
    }

    /// Start a repeating timer. The first firing happens one period from now.
    pub fn start_interval(&mut self, owner: O, period_ms: f32) -> IntervalId {
        self.intervals.insert(Interval {
            owner,
            period_ms: period_ms.max(1.0),
            elapsed_ms: 0.0,
            fired: 0,
        })
    }

    pub fn cancel(&mut self, id: IntervalId) -> bool {
        self.intervals.remove(id).is_some()
    }

    /// Cancel every timer started by `owner`, returning how many were live.
    pub fn cancel_owned_by(&mut self, owner: O) -> usize {
        let before = self.intervals.len();
        self.intervals.retain(|_, i| i.owner != owner);
        let cancelled = before - self.intervals.len();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled owner intervals");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.intervals.len();
        self.intervals.clear();
        n
    }

    pub fn is_active(&self, id: IntervalId) -> bool {
        self.intervals.contains_key(id)
    }

    pub fn has_owner(&self, owner: O) -> bool {
        self.intervals.values().any(|i| i.owner == owner)
    }

    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }

    /// Advance all timers, reporting every firing in order.
    pub fn tick(&mut self, dt_ms: f32) -> SmallVec<[Firing<O>; 4]> {
        let mut out = SmallVec::new();
        let dt_ms = dt_ms.max(0.0);
        for (id, interval) in self.intervals.iter_mut() {
            interval.elapsed_ms += dt_ms;
            while interval.elapsed_ms >= interval.period_ms {
                interval.elapsed_ms -= interval.period_ms;
                out.push(Firing {
                    id,
                    owner: interval.owner,
                    sequence: interval.fired,
                });
                interval.fired += 1;
            }
        }
        out
    }
}

impl<O: Copy + PartialEq> Default for AnimationScheduler<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_once_per_period() {
        let mut s = AnimationScheduler::new();
        let id = s.start_interval(7u32, 100.0);
        assert!(s.tick(50.0).is_empty());
        let fired = s.tick(260.0);
        assert_eq!(fired.len(), 3);
        assert!(fired.iter().all(|f| f.id == id && f.owner == 7));
        assert_eq!(fired[2].sequence, 2);
    }

    #[test]
    fn cancelling_by_owner_leaves_others_running() {
        let mut s = AnimationScheduler::new();
        s.start_interval(1u32, 10.0);
        s.start_interval(1u32, 10.0);
        let keep = s.start_interval(2u32, 10.0);
        assert_eq!(s.cancel_owned_by(1), 2);
        assert!(!s.has_owner(1));
        assert!(s.is_active(keep));
        assert_eq!(s.tick(10.0).len(), 1);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = AnimationScheduler::new();
        let id = s.start_interval((), 10.0);
        assert!(s.cancel(id));
        assert!(s.tick(100.0).is_empty());
        assert_eq!(s.active_count(), 0);
    }
}

//! Distance-based update staggering.
//!
//! Creatures near the player update every tick; farther ones are deferred
//! by a randomized delay drawn from their distance band. Delays are kept
//! in a queue keyed by the next eligible tick instead of wall-clock timers,
//! so a seeded run schedules identically every time.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use dl_core::CreatureId;
use dl_core::balance::{DelayRange, SchedulingBalance};
use rand::Rng;

/// A creature whose update is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueUpdate {
    /// The creature to update.
    pub id: CreatureId,
    /// Ticks since its previous update (at least 1).
    pub elapsed: u64,
}

/// Convert a delay window to a tick count, drawing uniformly inside it.
///
/// Milliseconds become ticks by rounding up; the result is never below
/// one tick.
pub fn delay_ticks<R: Rng + ?Sized>(
    range: DelayRange,
    scheduling: &SchedulingBalance,
    rng: &mut R,
) -> u64 {
    let (lo, hi) = if range.min_ms <= range.max_ms {
        (range.min_ms, range.max_ms)
    } else {
        (range.max_ms, range.min_ms)
    };
    let ms = if lo == hi {
        lo
    } else {
        rng.random_range(lo..=hi)
    };
    ms.div_ceil(scheduling.tick_duration_ms.max(1)).max(1)
}

/// Min-queue of pending creature updates keyed by `(tick, insertion order)`.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    queue: BinaryHeap<Reverse<(u64, u64, CreatureId)>>,
    pending: BTreeMap<CreatureId, u64>,
    last_update: BTreeMap<CreatureId, u64>,
    seq: u64,
}

impl UpdateScheduler {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id` for `tick`, replacing any earlier entry.
    pub fn schedule_at(&mut self, id: CreatureId, tick: u64) {
        self.seq += 1;
        self.pending.insert(id, tick);
        self.queue.push(Reverse((tick, self.seq, id)));
    }

    /// Queue `id` after a delay drawn from its distance band. Returns the tick.
    pub fn schedule<R: Rng + ?Sized>(
        &mut self,
        id: CreatureId,
        now: u64,
        distance: f64,
        scheduling: &SchedulingBalance,
        rng: &mut R,
    ) -> u64 {
        let tick = now + delay_ticks(scheduling.delay_for(distance), scheduling, rng);
        self.schedule_at(id, tick);
        tick
    }

    /// Mark when a creature was last updated, for elapsed-tick reporting.
    pub fn mark_updated(&mut self, id: CreatureId, tick: u64) {
        self.last_update.insert(id, tick);
    }

    /// Pop every update due at or before `now`, in `(tick, insertion)` order.
    ///
    /// Entries superseded by a later `schedule_at` and entries for which
    /// `exists` is false are dropped silently.
    pub fn pop_due<F>(&mut self, now: u64, exists: F) -> Vec<DueUpdate>
    where
        F: Fn(CreatureId) -> bool,
    {
        let mut due = Vec::new();
        while let Some(Reverse((tick, _, id))) = self.queue.peek().copied() {
            if tick > now {
                break;
            }
            self.queue.pop();
            if self.pending.get(&id) != Some(&tick) {
                continue;
            }
            self.pending.remove(&id);
            if !exists(id) {
                self.last_update.remove(&id);
                continue;
            }
            let elapsed = self
                .last_update
                .insert(id, now)
                .map_or(1, |last| now.saturating_sub(last).max(1));
            due.push(DueUpdate { id, elapsed });
        }
        due
    }

    /// Forget a creature entirely.
    pub fn remove(&mut self, id: CreatureId) {
        self.pending.remove(&id);
        self.last_update.remove(&id);
    }

    /// Whether a creature has a pending update.
    pub fn is_scheduled(&self, id: CreatureId) -> bool {
        self.pending.contains_key(&id)
    }

    /// The tick a creature is next due, if scheduled.
    pub fn next_tick(&self, id: CreatureId) -> Option<u64> {
        self.pending.get(&id).copied()
    }

    /// Number of creatures with a pending update.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#![forbid(unsafe_code)]

//! Cooperative single-threaded host: timer queue and listener registry.
//!
//! The page runs on one event loop. Nothing blocks and nothing spawns: every
//! wait (scroll trailing edge, scroll quiet detection, carousel advance,
//! simulated submission latency) is a timer in the [`TimerQueue`], and every
//! ambient subscription (scroll, pointer, resize) is an entry in the
//! [`ListenerRegistry`]. Components acquire both through the [`Host`] on
//! mount and hand them back on dispose.
//!
//! # Invariants
//!
//! 1. Timers fire in deadline order; ties fire in scheduling order.
//! 2. An interval timer is rescheduled from its previous deadline, never from
//!    the time it was observed to fire, so its phase is fixed at scheduling.
//!    If the host falls behind by several periods each period fires once.
//! 3. A cancelled timer never fires, even if already due.
//! 4. Listener and timer ids are never reused within one host.
//!
//! # Design Notes
//!
//! The queue is a small `Vec` scanned linearly. A page holds a handful of
//! timers at once, so ordering by scan is simpler than a heap with lazy
//! deletion and keeps cancellation exact.

use std::fmt;

use showroom_core::ListenerKinds;
use web_time::{Duration, Instant};

use crate::effect_system;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Handle to a registered ambient listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Timer queue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    owner: &'static str,
    deadline: Instant,
    repeat: Repeat,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    /// The deadline the timer was scheduled for (not the observation time).
    pub deadline: Instant,
}

/// Deadline-ordered timer queue.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }

    /// Schedule a one-shot timer at `deadline`.
    pub fn schedule_once(&mut self, owner: &'static str, deadline: Instant) -> TimerId {
        let id = self.allocate();
        self.entries.push(TimerEntry {
            id,
            owner,
            deadline,
            repeat: Repeat::Once,
        });
        effect_system::record_timer_scheduled(owner, id.0, false);
        id
    }

    /// Schedule an interval timer whose first firing is `start + period`.
    ///
    /// A zero period is raised to one millisecond so the queue always makes
    /// progress.
    pub fn schedule_every(
        &mut self,
        owner: &'static str,
        start: Instant,
        period: Duration,
    ) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        let id = self.allocate();
        self.entries.push(TimerEntry {
            id,
            owner,
            deadline: start + period,
            repeat: Repeat::Every(period),
        });
        effect_system::record_timer_scheduled(owner, id.0, true);
        id
    }

    /// Cancel a timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        effect_system::record_timer_cancelled(entry.owner, id.0);
        true
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Next deadline of `id`, if pending.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// One-shot timers are removed; interval timers advance their deadline by
    /// one period and stay queued.
    pub fn pop_due(&mut self, now: Instant) -> Option<FiredTimer> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;

        let entry = &self.entries[pos];
        let fired = FiredTimer {
            id: entry.id,
            deadline: entry.deadline,
        };
        let owner = entry.owner;
        match entry.repeat {
            Repeat::Once => {
                self.entries.remove(pos);
            }
            Repeat::Every(period) => self.entries[pos].deadline += period,
        }
        effect_system::record_timer_fired(owner, fired.id.0);
        Some(fired)
    }
}

// ---------------------------------------------------------------------------
// Listener registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ListenerEntry {
    id: ListenerId,
    owner: &'static str,
    kinds: ListenerKinds,
}

/// Registry of live ambient listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kinds`.
    pub fn register(&mut self, owner: &'static str, kinds: ListenerKinds) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(ListenerEntry { id, owner, kinds });
        effect_system::record_listener_attached(owner, id.0, kinds);
        id
    }

    /// Remove a registration. Returns `false` if it was not live.
    pub fn deregister(&mut self, id: ListenerId) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        effect_system::record_listener_detached(entry.owner, id.0);
        true
    }

    /// Whether `id` is live and interested in any of `kinds`.
    #[must_use]
    pub fn wants(&self, id: ListenerId, kinds: ListenerKinds) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == id && e.kinds.intersects(kinds))
    }

    /// Number of live listeners interested in any of `kinds`.
    #[must_use]
    pub fn count(&self, kinds: ListenerKinds) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kinds.intersects(kinds))
            .count()
    }

    /// Total live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The event-loop services a component may acquire.
#[derive(Debug, Default)]
pub struct Host {
    pub timers: TimerQueue,
    pub listeners: ListenerRegistry,
}

impl Host {
    /// Create an idle host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the host holds no listeners and no timers.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.listeners.is_empty()
    }
}

/// Lifecycle of a component that holds host resources.
///
/// `mount` acquires listeners and timers; `dispose` must release every one
/// of them. `on_timer` is offered each fired timer and returns `true` if the
/// timer belonged to this component.
pub trait Component {
    /// Label used in logs and counters.
    fn name(&self) -> &'static str;

    /// Acquire host resources.
    fn mount(&mut self, host: &mut Host, now: Instant);

    /// Handle a fired timer. `at` is the timer's scheduled deadline.
    fn on_timer(&mut self, _host: &mut Host, _timer: TimerId, _at: Instant) -> bool {
        false
    }

    /// Release every host resource.
    fn dispose(&mut self, host: &mut Host);
}

/// Release a listener slot if held.
pub(crate) fn release_listener(host: &mut Host, slot: &mut Option<ListenerId>) {
    if let Some(id) = slot.take() {
        host.listeners.deregister(id);
    }
}

/// Cancel a timer slot if held.
pub(crate) fn release_timer(host: &mut Host, slot: &mut Option<TimerId>) {
    if let Some(id) = slot.take() {
        host.timers.cancel(id);
    }
}

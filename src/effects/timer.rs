//! Timer capability consumed by the executor.
//!
//! A [`TimerService`] schedules and cancels; it never calls back into the
//! state machine. Whoever drives the service delivers each [`Fired`] value
//! to [`Tooltip::handle_timer`](crate::effects::Tooltip::handle_timer), which
//! discards fires whose handle is no longer live.

use crate::core::Event;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opaque token identifying one scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Fires once, then is spent.
    Once,
    /// Fires every interval until cancelled.
    Repeating,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

impl Fired {
    /// The state machine event this fire stands for.
    pub fn event(&self) -> Event {
        match self.kind {
            TimerKind::Once => Event::Timeout,
            TimerKind::Repeating => Event::Tick,
        }
    }
}

/// Schedule and cancel one-shot timers and repeating tickers.
///
/// Cancelling a handle that already fired or was already cancelled is a
/// no-op.
pub trait TimerService {
    fn start_once(&mut self, delay: Duration) -> TimerHandle;

    fn cancel_once(&mut self, handle: TimerHandle);

    fn start_repeating(&mut self, interval: Duration) -> TimerHandle;

    fn cancel_repeating(&mut self, handle: TimerHandle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Scheduled {
    handle: TimerHandle,
    due: Duration,
    every: Option<Duration>,
}

/// Deterministic timer service driven by an explicit clock.
///
/// Nothing fires on its own: [`fire_next`](ManualTimers::fire_next) pops the
/// earliest due timer up to a deadline, advancing the clock to it. Ties fire
/// in scheduling order. Repeating timers are rescheduled before they are
/// returned, so cancelling one while handling its tick removes it for good.
///
/// # Example
///
/// ```rust
/// use fadetip::effects::{ManualTimers, TimerKind, TimerService};
/// use std::time::Duration;
///
/// let mut timers = ManualTimers::new();
/// let once = timers.start_once(Duration::from_millis(500));
/// let ticker = timers.start_repeating(Duration::from_millis(200));
///
/// let deadline = Duration::from_millis(500);
/// let fired: Vec<_> = std::iter::from_fn(|| timers.fire_next(deadline)).collect();
/// assert_eq!(fired.len(), 3);
/// assert_eq!(fired[0].handle, ticker);
/// assert_eq!(fired[2].handle, once);
/// assert_eq!(fired[2].kind, TimerKind::Once);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_id: u64,
    scheduled: Vec<Scheduled>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers and tickers.
    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.scheduled.iter().any(|s| s.handle == handle)
    }

    /// When the earliest live timer is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduled.iter().map(|s| s.due).min()
    }

    /// Fire the earliest timer due at or before `deadline`, advancing the
    /// clock to its due time. Returns `None` once nothing is due, leaving the
    /// clock at `deadline`.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<Fired> {
        let index = self
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= deadline)
            .min_by_key(|(_, s)| (s.due, s.handle))
            .map(|(index, _)| index);

        let Some(index) = index else {
            self.now = self.now.max(deadline);
            return None;
        };

        let scheduled = self.scheduled.remove(index);
        self.now = self.now.max(scheduled.due);
        let kind = match scheduled.every {
            Some(every) => {
                self.scheduled.push(Scheduled {
                    due: scheduled.due.saturating_add(every),
                    ..scheduled
                });
                TimerKind::Repeating
            }
            None => TimerKind::Once,
        };
        Some(Fired {
            handle: scheduled.handle,
            kind,
        })
    }

    fn schedule(&mut self, delay: Duration, every: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.scheduled.push(Scheduled {
            handle,
            due: self.now.saturating_add(delay),
            every,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.scheduled.retain(|s| s.handle != handle);
    }
}

impl TimerService for ManualTimers {
    fn start_once(&mut self, delay: Duration) -> TimerHandle {
        self.schedule(delay, None)
    }

    fn cancel_once(&mut self, handle: TimerHandle) {
        self.cancel(handle);
    }

    fn start_repeating(&mut self, interval: Duration) -> TimerHandle {
        // a zero interval would fire forever without the clock moving
        let interval = interval.max(Duration::from_nanos(1));
        self.schedule(interval, Some(interval))
    }

    fn cancel_repeating(&mut self, handle: TimerHandle) {
        self.cancel(handle);
    }
}

//! Clock/scheduler seam
//!
//! The simulation only needs one primitive from its host: "call me back every
//! N milliseconds". [`TimerQueue`] is a deterministic implementation driven by
//! elapsed time the host feeds it; fired timers are returned to the caller,
//! which dispatches them between ticks.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// Anything that can schedule periodic callbacks
pub trait Clock {
    /// Schedule a timer firing every `period_ms` (once if not `repeating`)
    fn schedule(&mut self, period_ms: u32, repeating: bool) -> TimerId;
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    period_ms: f64,
    next_due_ms: f64,
    repeating: bool,
}

/// Deterministic timer queue advanced by the host loop
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: f64,
    timers: Vec<Timer>,
    next_id: u32,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock time elapsed so far (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of live timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove a timer. Returns false if it was unknown or already finished.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Advance the clock and return every timer that fired, in firing order.
    ///
    /// A repeating timer fires once per elapsed period, so a long frame can
    /// yield the same id several times.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<TimerId> {
        let target = self.now_ms + elapsed_ms.max(0.0);
        let mut fired = Vec::new();

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.next_due_ms <= target)
                .min_by(|(_, a), (_, b)| {
                    a.next_due_ms
                        .partial_cmp(&b.next_due_ms)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.id.0.cmp(&b.id.0))
                })
                .map(|(i, _)| i);

            let Some(index) = next else { break };
            let timer = &mut self.timers[index];
            fired.push(timer.id);
            if timer.repeating {
                timer.next_due_ms += timer.period_ms;
            } else {
                self.timers.remove(index);
            }
        }

        self.now_ms = target;
        fired
    }
}

impl Clock for TimerQueue {
    fn schedule(&mut self, period_ms: u32, repeating: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // A zero period would fire forever within one advance
        let period_ms = f64::from(period_ms.max(1));
        self.timers.push(Timer {
            id,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
            repeating,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_cadence() {
        let mut clock = TimerQueue::new();
        let id = clock.schedule(1500, true);

        let mut fires = 0;
        // 10 seconds in 16ms frames
        for _ in 0..625 {
            fires += clock.advance(16.0).iter().filter(|&&t| t == id).count();
        }
        assert_eq!(fires, 10000 / 1500);
    }

    #[test]
    fn test_long_frame_fires_multiple_times() {
        let mut clock = TimerQueue::new();
        let id = clock.schedule(100, true);
        assert_eq!(clock.advance(350.0), vec![id, id, id]);
        assert_eq!(clock.advance(50.0), vec![id]);
    }

    #[test]
    fn test_one_shot_timer() {
        let mut clock = TimerQueue::new();
        let id = clock.schedule(10, false);
        assert!(clock.advance(9.0).is_empty());
        assert_eq!(clock.advance(1.0), vec![id]);
        assert!(clock.advance(100.0).is_empty());
        assert!(clock.is_empty());
    }

    #[test]
    fn test_firing_order_across_timers() {
        let mut clock = TimerQueue::new();
        let slow = clock.schedule(30, true);
        let fast = clock.schedule(20, true);
        assert_eq!(clock.advance(60.0), vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn test_cancel() {
        let mut clock = TimerQueue::new();
        let id = clock.schedule(10, true);
        assert!(clock.cancel(id));
        assert!(!clock.cancel(id));
        assert!(clock.advance(100.0).is_empty());
    }
}

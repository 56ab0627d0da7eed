//! Cooperative timer queue.
//!
//! Timers only move when [`TimerQueue::advance`] is called, so firing is
//! always serialized with the rest of the frame.

use std::time::Duration;

/// Handle used to cancel a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer<A> {
    handle: TimerHandle,
    action: A,
    remaining: Duration,
    interval: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    timers: Vec<Timer<A>>,
    next_id: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<A: Clone> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, delay: Duration, action: A, interval: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            action,
            remaining: delay,
            interval,
        });
        handle
    }

    /// Fire `action` once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration, action: A) -> TimerHandle {
        self.push(delay, action, None)
    }

    /// Fire `action` every `interval` until cancelled.
    pub fn schedule_repeating(&mut self, interval: Duration, action: A) -> TimerHandle {
        // Zero would fire forever inside one advance
        let interval = interval.max(Duration::from_millis(1));
        self.push(interval, action, Some(interval))
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Advance time by `dt` and return every timer that came due, in due order.
    ///
    /// A repeating timer fires once per elapsed interval. Ties keep
    /// scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerHandle, A)> {
        let mut fired: Vec<(Duration, TimerHandle, A)> = Vec::new();

        self.timers.retain_mut(|timer| {
            let mut budget = dt;
            let mut offset = Duration::ZERO;
            loop {
                if timer.remaining > budget {
                    timer.remaining -= budget;
                    return true;
                }
                budget -= timer.remaining;
                offset += timer.remaining;
                fired.push((offset, timer.handle, timer.action.clone()));
                match timer.interval {
                    Some(interval) => timer.remaining = interval,
                    None => return false,
                }
            }
        });

        fired.sort_by_key(|(at, handle, _)| (*at, handle.0));
        fired
            .into_iter()
            .map(|(_, handle, action)| (handle, action))
            .collect()
    }
}

#[cfg(test)]
impl<A> TimerQueue<A> {
    fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    fn len(&self) -> usize {
        self.timers.len()
    }

    fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

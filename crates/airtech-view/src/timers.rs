//! Deferred callbacks.

use std::cell::RefCell;
use std::rc::Rc;

/// Fire-and-forget timer scheduling, the shape of `setTimeout`.
pub trait Timers: Clone + 'static {
    /// Run `callback` once after `delay_ms` milliseconds.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

struct Pending {
    due: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Timers driven by hand, for tests.
///
/// Nothing runs until [`ManualTimers::advance`] moves the clock. Callbacks
/// due at the same instant run in scheduling order.
#[derive(Clone, Default)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    /// Create timers at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds.
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of callbacks not yet run.
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward, running every callback that falls due.
    ///
    /// Callbacks scheduled by a running callback run too if they fall due
    /// within the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now().saturating_add(ms);
        while let Some(pending) = self.pop_due(target) {
            (pending.callback)();
        }
        self.clock.borrow_mut().now = target;
    }

    /// Run everything still scheduled.
    pub fn run_all(&self) {
        while let Some(due) = self.next_due() {
            let now = self.now();
            self.advance(due.saturating_sub(now));
        }
    }

    fn next_due(&self) -> Option<u64> {
        self.clock.borrow().pending.iter().map(|p| p.due).min()
    }

    fn pop_due(&self, target: u64) -> Option<Pending> {
        let mut clock = self.clock.borrow_mut();
        let index = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        let pending = clock.pending.swap_remove(index);
        clock.now = pending.due;
        Some(pending)
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let mut clock = self.clock.borrow_mut();
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let due = clock.now.saturating_add(u64::from(delay_ms));
        clock.pending.push(Pending { due, seq, callback });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callbacks_run_in_due_order() {
        let timers = ManualTimers::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(200, "late"), (100, "early"), (100, "early-2")] {
            let log = log.clone();
            timers.set_timeout(delay, Box::new(move || log.borrow_mut().push(name)));
        }

        timers.advance(99);
        assert!(log.borrow().is_empty());

        timers.advance(1);
        assert_eq!(*log.borrow(), vec!["early", "early-2"]);

        timers.advance(500);
        assert_eq!(*log.borrow(), vec!["early", "early-2", "late"]);
        assert_eq!(timers.now(), 600);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_nested_scheduling() {
        let timers = ManualTimers::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_timers = timers.clone();
        let inner_log = log.clone();
        timers.set_timeout(
            10,
            Box::new(move || {
                inner_log.borrow_mut().push(inner_timers.now());
                let log = inner_log.clone();
                let t = inner_timers.clone();
                inner_timers.set_timeout(10, Box::new(move || log.borrow_mut().push(t.now())));
            }),
        );

        timers.run_all();
        assert_eq!(*log.borrow(), vec![10, 20]);
    }
}

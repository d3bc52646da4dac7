//! Quiet-period debouncing of keyword input
use crate::scheduler::{Scheduler, TaskHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
enum DebounceState {
    #[default]
    Idle,
    Pending {
        keyword: String,
        ticket: u64,
        handle: Option<TaskHandle>,
    },
}

#[derive(Debug, Default)]
struct Inner {
    state: DebounceState,
    next_ticket: u64,
}

impl Inner {
    /// Drop the pending timer, if any. Returns whether one was pending.
    fn cancel_pending(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DebounceState::Idle => false,
            DebounceState::Pending { handle, .. } => {
                if let Some(handle) = handle {
                    handle.cancel();
                }
                true
            }
        }
    }

    /// Move to Idle if `ticket` is still the live one, handing back its keyword.
    fn take_if_current(&mut self, ticket: u64) -> Option<String> {
        match &self.state {
            DebounceState::Pending { ticket: live, .. } if *live == ticket => {}
            _ => return None,
        }
        match std::mem::take(&mut self.state) {
            DebounceState::Pending { keyword, .. } => Some(keyword),
            DebounceState::Idle => None,
        }
    }
}

/// Delays firing until input has been stable for the quiet period.
///
/// Each submit supersedes the previous pending one, so at most one timer is
/// alive and only the latest keyword ever fires.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    quiet_period: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, quiet_period: Duration) -> Self {
        Self {
            scheduler,
            quiet_period,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Restart the quiet period for `keyword`. Returns true when a pending
    /// keyword was superseded.
    pub fn submit<F>(&self, keyword: String, fire: F) -> bool
    where
        F: FnOnce(String) + Send + 'static,
    {
        let (superseded, ticket) = {
            let mut inner = self.inner.lock();
            let superseded = inner.cancel_pending();
            inner.next_ticket += 1;
            let ticket = inner.next_ticket;
            inner.state = DebounceState::Pending {
                keyword,
                ticket,
                handle: None,
            };
            (superseded, ticket)
        };

        let shared = Arc::clone(&self.inner);
        let handle = self.scheduler.schedule(
            self.quiet_period,
            Box::new(move || {
                let keyword = shared.lock().take_if_current(ticket);
                if let Some(keyword) = keyword {
                    fire(keyword);
                }
            }),
        );

        let mut inner = self.inner.lock();
        match &mut inner.state {
            DebounceState::Pending {
                ticket: live,
                handle: slot,
                ..
            } if *live == ticket => *slot = Some(handle),
            _ => handle.cancel(),
        }

        superseded
    }

    /// Cancel any pending timer without firing. Safe to call repeatedly.
    pub fn cancel(&self) -> bool {
        self.inner.lock().cancel_pending()
    }

    /// Cancel the pending timer and hand back its keyword for the caller
    /// to fire now.
    pub fn take_pending(&self) -> Option<String> {
        match std::mem::take(&mut self.inner.lock().state) {
            DebounceState::Idle => None,
            DebounceState::Pending {
                keyword, handle, ..
            } => {
                if let Some(handle) = handle {
                    handle.cancel();
                }
                Some(keyword)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.inner.lock().state, DebounceState::Pending { .. })
    }

    pub fn pending_keyword(&self) -> Option<String> {
        match &self.inner.lock().state {
            DebounceState::Pending { keyword, .. } => Some(keyword.clone()),
            DebounceState::Idle => None,
        }
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Task;
    use std::sync::atomic::Ordering;

    /// Collects tasks and runs them on demand, honouring cancellation.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        queued: Arc<Mutex<Vec<(TaskHandle, Task)>>>,
    }

    impl ManualScheduler {
        fn run_all(&self) -> usize {
            let queued: Vec<_> = self.queued.lock().drain(..).collect();
            let mut ran = 0;
            for (handle, task) in queued {
                if !handle.cancel_flag().load(Ordering::SeqCst) {
                    task();
                    ran += 1;
                }
            }
            ran
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, _delay: Duration, task: Task) -> TaskHandle {
            let handle = TaskHandle::new();
            self.queued.lock().push((handle.clone(), task));
            handle
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn() -> Box<dyn FnOnce(String) + Send>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let make = move || {
            let sink = Arc::clone(&sink);
            Box::new(move |keyword: String| sink.lock().push(keyword)) as Box<dyn FnOnce(String) + Send>
        };
        (fired, make)
    }

    #[test]
    fn test_only_latest_keyword_fires() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
        let (fired, make) = recorder();

        assert!(!debouncer.submit("A".into(), make()));
        assert!(debouncer.submit("AB".into(), make()));
        assert!(debouncer.submit("ABC".into(), make()));
        assert_eq!(debouncer.pending_keyword().as_deref(), Some("ABC"));

        assert_eq!(scheduler.run_all(), 1);
        assert_eq!(*fired.lock(), vec!["ABC".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_stale_ticket_fires_nothing() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
        let (fired, make) = recorder();

        debouncer.submit("old".into(), make());
        // Simulate a timer that escaped cancellation and runs anyway.
        let stale: Vec<_> = scheduler.queued.lock().drain(..).collect();
        debouncer.submit("new".into(), make());
        for (_, task) in stale {
            task();
        }

        assert!(fired.lock().is_empty());
        assert_eq!(scheduler.run_all(), 1);
        assert_eq!(*fired.lock(), vec!["new".to_string()]);
    }

    #[test]
    fn test_cancel_prevents_firing_and_is_idempotent() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
        let (fired, make) = recorder();

        debouncer.submit("tree".into(), make());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        assert_eq!(scheduler.run_all(), 0);
        assert!(fired.lock().is_empty());
    }

    #[test]
    fn test_take_pending_cancels_timer() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
        let (fired, make) = recorder();

        debouncer.submit("tree".into(), make());
        assert_eq!(debouncer.take_pending().as_deref(), Some("tree"));
        assert_eq!(debouncer.take_pending(), None);
        assert!(!debouncer.is_pending());

        assert_eq!(scheduler.run_all(), 0);
        assert!(fired.lock().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let scheduler = ManualScheduler::default();
        let (fired, make) = recorder();
        {
            let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
            debouncer.submit("tree".into(), make());
        }

        assert_eq!(scheduler.run_all(), 0);
        assert!(fired.lock().is_empty());
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), DEFAULT_QUIET_PERIOD);
        let (fired, make) = recorder();

        debouncer.submit("樹".into(), make());
        scheduler.run_all();
        debouncer.submit("搜".into(), make());
        scheduler.run_all();

        assert_eq!(*fired.lock(), vec!["樹".to_string(), "搜".to_string()]);
    }
}

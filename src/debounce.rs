use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

/// Cancellable scheduled task: every `submit` arms a fresh timer and
/// invalidates the previous one via a generation counter. Only the timer
/// that is still current when it fires runs its job, so a burst of changes
/// renders exactly the final state and no stale job can complete after a
/// newer one.
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    in_flight: Arc<(Mutex<u64>, Condvar)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new((Mutex::new(0), Condvar::new())),
        }
    }

    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let (count, _) = &*self.in_flight;
            let mut pending = count.lock().unwrap_or_else(|e| e.into_inner());
            *pending += 1;
        }

        let generation = Arc::clone(&self.generation);
        let in_flight = Arc::clone(&self.in_flight);
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            if generation.load(Ordering::SeqCst) == token {
                job();
            }

            let (count, signal) = &*in_flight;
            let mut pending = count.lock().unwrap_or_else(|e| e.into_inner());
            *pending -= 1;
            signal.notify_all();
        });
    }

    /// Block until every armed timer has either fired or been superseded.
    pub fn settle(&self) {
        let (count, signal) = &*self.in_flight;
        let mut pending = count.lock().unwrap_or_else(|e| e.into_inner());
        while *pending > 0 {
            pending = match signal.wait(pending) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn only_the_last_job_of_a_burst_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            debouncer.submit(move || log.lock().unwrap().push(name));
        }
        debouncer.settle();

        assert_eq!(*log.lock().unwrap(), ["third"]);
    }

    #[test]
    fn spaced_submissions_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            debouncer.submit(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            debouncer.settle();
        }

        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn settle_with_nothing_pending_returns_immediately() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.settle();
    }
}

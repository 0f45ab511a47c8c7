//! [`Scheduled`] definition.

use std::{future::Future, time::Duration};

use tokio::{
    task::{self, JoinHandle},
    time,
};

/// Slot holding at most one delayed job.
///
/// Scheduling a new job aborts the previous one, whether it's still waiting
/// or already running. Dropping the slot aborts its job as well.
#[derive(Debug, Default)]
pub struct Scheduled(Option<JoinHandle<()>>);

impl Scheduled {
    /// Schedules the provided `job` to run after the `delay` elapses,
    /// aborting the previously scheduled one.
    pub fn schedule<F>(&mut self, delay: Duration, job: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.cancel();
        self.0 = Some(task::spawn_local(async move {
            time::sleep(delay).await;
            job.await;
        }));
    }

    /// Aborts the scheduled job, if any.
    pub fn cancel(&mut self) {
        if let Some(job) = self.0.take() {
            job.abort();
        }
    }

    /// Indicates whether a scheduled job hasn't completed yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0.as_ref().is_some_and(|job| !job.is_finished())
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod spec {
    use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

    use tokio::{task::LocalSet, time};

    use super::Scheduled;

    fn record(log: &Rc<RefCell<Vec<u8>>>, n: u8) -> impl Future<Output = ()> {
        let log = Rc::clone(log);
        async move { log.borrow_mut().push(n) }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        LocalSet::new()
            .run_until(async {
                let log = Rc::new(RefCell::new(Vec::new()));
                let mut slot = Scheduled::default();

                slot.schedule(Duration::from_millis(500), record(&log, 1));
                time::sleep(Duration::from_millis(499)).await;
                assert!(log.borrow().is_empty());
                assert!(slot.is_pending());

                time::sleep(Duration::from_millis(2)).await;
                assert_eq!(*log.borrow(), [1]);
                assert!(!slot.is_pending());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn replaces_previous_job() {
        LocalSet::new()
            .run_until(async {
                let log = Rc::new(RefCell::new(Vec::new()));
                let mut slot = Scheduled::default();

                slot.schedule(Duration::from_millis(500), record(&log, 1));
                time::sleep(Duration::from_millis(300)).await;
                slot.schedule(Duration::from_millis(500), record(&log, 2));
                time::sleep(Duration::from_millis(300)).await;
                assert!(log.borrow().is_empty());

                time::sleep(Duration::from_millis(300)).await;
                assert_eq!(*log.borrow(), [2]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn aborts_on_cancel_and_drop() {
        LocalSet::new()
            .run_until(async {
                let log = Rc::new(RefCell::new(Vec::new()));

                let mut slot = Scheduled::default();
                slot.schedule(Duration::from_millis(100), record(&log, 1));
                slot.cancel();
                assert!(!slot.is_pending());

                let mut dropped = Scheduled::default();
                dropped.schedule(Duration::from_millis(100), record(&log, 2));
                drop(dropped);

                time::sleep(Duration::from_secs(1)).await;
                assert!(log.borrow().is_empty());
            })
            .await;
    }
}

//! Delayed local tasks.
//!
//! Everything here is spawned onto the current [`LocalSet`], so it must be
//! called from within one.
//!
//! [`LocalSet`]: tokio::task::LocalSet

mod scheduled;

use std::{future::Future, time::Duration};

use tokio::{task, time};

pub use self::scheduled::Scheduled;

/// Runs the provided `job` after the `delay` elapses, detached from the
/// caller.
pub fn defer<F>(delay: Duration, job: F)
where
    F: Future<Output = ()> + 'static,
{
    drop(task::spawn_local(async move {
        time::sleep(delay).await;
        job.await;
    }));
}

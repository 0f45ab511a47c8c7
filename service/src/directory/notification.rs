//! Short-lived status [`Notification`]s.

use std::{rc::Rc, time::Duration};

use derive_more::{AsRef, Display, From};
use tokio::sync::watch;

use crate::task;

/// Status message shown to an operator for a limited time.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Notification(String);

/// State of a [`Notifier`] slot.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    /// Number of [`Notification`]s shown so far.
    generation: u64,

    /// Currently shown [`Notification`], if any.
    current: Option<Notification>,
}

impl Slot {
    /// Returns the currently shown [`Notification`], if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

/// Channel holding at most one current [`Notification`].
///
/// Every shown [`Notification`] is cleared after the configured time to live,
/// unless a newer one replaced it before.
#[derive(Clone, Debug)]
pub struct Notifier {
    /// Slot of the current [`Notification`].
    slot: Rc<watch::Sender<Slot>>,

    /// Time a [`Notification`] stays shown.
    ttl: Duration,
}

impl Notifier {
    /// Creates a new empty [`Notifier`] clearing [`Notification`]s after the
    /// provided `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Rc::new(watch::Sender::new(Slot::default())),
            ttl,
        }
    }

    /// Shows the provided [`Notification`], replacing the current one.
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn show(&self, notification: impl Into<Notification>) {
        let mut generation = 0;
        self.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.current = Some(notification.into());
            generation = slot.generation;
        });

        let slot = Rc::clone(&self.slot);
        task::defer(self.ttl, async move {
            _ = slot.send_if_modified(|slot| {
                let expired =
                    slot.generation == generation && slot.current.is_some();
                if expired {
                    slot.current = None;
                }
                expired
            });
        });
    }

    /// Returns the currently shown [`Notification`], if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().current.clone()
    }

    /// Subscribes to changes of the current [`Notification`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Slot> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::{task::LocalSet, time};

    use super::{Notification, Notifier};

    fn shown(n: &Notifier) -> Option<String> {
        n.current().map(|n| n.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_ttl() {
        LocalSet::new()
            .run_until(async {
                let notifier = Notifier::new(Duration::from_secs(3));

                notifier.show("✅ done");
                assert_eq!(shown(&notifier).as_deref(), Some("✅ done"));

                time::sleep(Duration::from_millis(2999)).await;
                assert_eq!(shown(&notifier).as_deref(), Some("✅ done"));

                time::sleep(Duration::from_millis(2)).await;
                assert_eq!(notifier.current(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_keeps_newer_notification() {
        LocalSet::new()
            .run_until(async {
                let notifier = Notifier::new(Duration::from_secs(3));

                notifier.show("first");
                time::sleep(Duration::from_secs(2)).await;
                notifier.show(Notification::from("second"));
                assert_eq!(shown(&notifier).as_deref(), Some("second"));

                time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(shown(&notifier).as_deref(), Some("second"));

                time::sleep(Duration::from_secs(2)).await;
                assert_eq!(notifier.current(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn notifies_subscribers() {
        LocalSet::new()
            .run_until(async {
                let notifier = Notifier::new(Duration::from_secs(3));
                let mut rx = notifier.subscribe();

                notifier.show("hello");
                rx.changed().await.unwrap();
                assert_eq!(
                    rx.borrow_and_update().current().cloned(),
                    Some(Notification::from("hello")),
                );

                rx.changed().await.unwrap();
                assert!(rx.borrow().current().is_none());
            })
            .await;
    }
}

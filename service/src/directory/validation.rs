//! Debounced uniqueness [`Validator`].

use std::rc::Rc;

use derive_more::{AsRef, Display};
use tokio::sync::watch;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::{domain::User, Config};
use crate::{
    domain::user,
    infra::remote,
    query::users::Occupied,
    task::Scheduled,
    Query, Service,
};

/// Warning about a value colliding with an existing [`User`]'s one.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Warning(String);

impl Warning {
    /// Creates the [`Warning`] about an occupied value of the provided
    /// [`user::Key`].
    #[must_use]
    pub fn occupied(key: user::Key) -> Self {
        Self(
            match key {
                user::Key::Name => {
                    "⚠️ This name already exists. Please choose another name."
                }
                user::Key::Email => {
                    "⚠️ This email already exists. Please use another email."
                }
            }
            .to_owned(),
        )
    }
}

/// Validator of a single [`user::Key`] value uniqueness.
///
/// Checks only the last value provided within the [`Config::debounce`]
/// window. A check started before a newer change is discarded.
#[derive(Debug)]
pub struct Validator<R> {
    /// [`Service`] performing the checks.
    service: Service<R>,

    /// [`user::Key`] being validated.
    key: user::Key,

    /// [`User`] whose own value doesn't collide.
    except: Option<user::Id>,

    /// Current [`Warning`], if any.
    warning: Rc<watch::Sender<Option<Warning>>>,

    /// Scheduled check.
    pending: Scheduled,
}

impl<R> Validator<R> {
    /// Creates a new [`Validator`] of the provided [`user::Key`].
    ///
    /// Values of the `except`ed [`User`] never collide.
    #[must_use]
    pub fn new(
        service: Service<R>,
        key: user::Key,
        except: Option<user::Id>,
    ) -> Self {
        Self {
            service,
            key,
            except,
            warning: Rc::new(watch::Sender::new(None)),
            pending: Scheduled::default(),
        }
    }

    /// Returns the current [`Warning`], if any.
    #[must_use]
    pub fn warning(&self) -> Option<Warning> {
        self.warning.borrow().clone()
    }

    /// Subscribes to changes of the [`Warning`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Warning>> {
        self.warning.subscribe()
    }

    /// Indicates whether a check is scheduled or in progress.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }
}

impl<R> Validator<R>
where
    Service<R>: Query<Occupied, Ok = bool, Err = Traced<remote::Error>>
        + Clone
        + 'static,
{
    /// Reacts on the validated value being changed.
    ///
    /// Blank value clears the [`Warning`] at once. Any other value is checked
    /// once no further changes happen within the [`Config::debounce`].
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn on_change(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.pending.cancel();
            _ = self.warning.send_if_modified(|w| w.take().is_some());
            return;
        }

        let service = self.service.clone();
        let warning = Rc::clone(&self.warning);
        let key = self.key;
        let query = Occupied {
            key,
            value: value.to_owned(),
            except: self.except.clone(),
        };
        self.pending
            .schedule(self.service.config().debounce, async move {
                match service.execute(query).await {
                    Ok(occupied) => {
                        let new = occupied.then(|| Warning::occupied(key));
                        _ = warning.send_if_modified(|w| {
                            let changed = *w != new;
                            *w = new;
                            changed
                        });
                    }
                    Err(e) => {
                        log::warn!("failed to check `{key}` uniqueness: {e}");
                    }
                }
            });
    }
}

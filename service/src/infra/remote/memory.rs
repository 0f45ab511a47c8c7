//! In-memory [`Remote`] collection implementation.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError};
use tokio::time;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{remote, Remote},
};

/// [`Remote`] collection of [`User`]s living in memory.
///
/// Records every call made to it, so callers can assert which requests were
/// issued. Clones share the same collection.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<State>>);

/// State of a [`Memory`] collection.
#[derive(Debug, Default)]
struct State {
    /// [`User`]s in the collection.
    users: Vec<User>,

    /// Sequence number of the last assigned [`user::Id`].
    last_id: u64,

    /// [`Call`]s made so far.
    calls: Vec<Call>,

    /// Indicator whether every [`Call`] fails as if the collection were
    /// unreachable.
    unreachable: bool,

    /// Delay before a [`Call::List`] responds.
    list_latency: Duration,
}

/// Call made to a [`Memory`] collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    /// Whole collection was listed.
    List,

    /// Single [`User`] was fetched.
    Get(user::Id),

    /// [`User`] with the provided [`user::Name`] was created.
    Create(user::Name),

    /// [`User`] was updated.
    Update(user::Id),

    /// [`User`] was deleted.
    Delete(user::Id),
}

impl Memory {
    /// Creates a new [`Memory`] collection holding the provided [`User`]s.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().collect::<Vec<_>>();
        let last_id = users
            .iter()
            .filter_map(|u| u.id.as_ref().parse::<u64>().ok())
            .max()
            .unwrap_or_default();
        Self(Arc::new(Mutex::new(State {
            users,
            last_id,
            ..State::default()
        })))
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state().unreachable = unreachable;
    }

    /// Delays every subsequent listing by the provided `latency`.
    pub fn set_list_latency(&self, latency: Duration) {
        self.state().list_latency = latency;
    }

    /// Returns all the [`Call`]s made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Returns all the [`User`]s currently in the collection.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    /// Locks the [`State`] of this collection.
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the provided [`Call`], failing if the collection is
    /// unreachable.
    fn record(&self, call: Call) -> Result<MutexGuard<'_, State>, Error> {
        let mut state = self.state();
        state.calls.push(call);
        if state.unreachable {
            return Err(Error::Unreachable);
        }
        Ok(state)
    }
}

impl Remote<Select<By<Vec<User>, ()>>> for Memory {
    type Ok = Vec<User>;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let latency = {
            let mut state = self.state();
            state.calls.push(Call::List);
            state.list_latency
        };
        if !latency.is_zero() {
            time::sleep(latency).await;
        }

        let state = self.state();
        if state.unreachable {
            return Err(tracerr::new!(remote::Error::from(Error::Unreachable)));
        }
        Ok(state.users.clone())
    }
}

impl Remote<Select<By<User, user::Id>>> for Memory {
    type Ok = User;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self
            .record(Call::Get(id.clone()))
            .map_err(tracerr::from_and_wrap!(=> remote::Error))?;

        state
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| tracerr::new!(remote::Error::NotFound(id)))
    }
}

impl Remote<Insert<user::New>> for Memory {
    type Ok = User;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<user::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self
            .record(Call::Create(new.name.clone()))
            .map_err(tracerr::from_and_wrap!(=> remote::Error))?;

        state.last_id += 1;
        let user::New {
            name,
            email,
            role,
            avatar,
            child,
        } = new;
        let user = User {
            id: state.last_id.to_string().into(),
            created_at: Some(DateTime::now().coerce()),
            name,
            email,
            role,
            avatar,
            child,
        };
        state.users.push(user.clone());

        Ok(user)
    }
}

impl Remote<Update<(user::Id, user::Patch)>> for Memory {
    type Ok = User;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Update((id, patch)): Update<(user::Id, user::Patch)>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self
            .record(Call::Update(id.clone()))
            .map_err(tracerr::from_and_wrap!(=> remote::Error))?;

        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| tracerr::new!(remote::Error::NotFound(id)))?;
        patch.apply(user);

        Ok(user.clone())
    }
}

impl Remote<Delete<By<User, user::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self
            .record(Call::Delete(id.clone()))
            .map_err(tracerr::from_and_wrap!(=> remote::Error))?;

        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(tracerr::new!(remote::Error::NotFound(id)));
        }
        Ok(())
    }
}

/// [`Memory`] collection error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Collection was switched into an unreachable mode.
    #[display("collection is unreachable")]
    Unreachable,
}

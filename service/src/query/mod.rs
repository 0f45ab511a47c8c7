//! [`Query`] definition.

pub mod user;
pub mod users;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{remote, Remote},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Remote`] collection.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct RemoteQuery<T>(T);

impl<W, B> RemoteQuery<By<W, B>> {
    /// Creates a new [`RemoteQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<R, W, B> Query<RemoteQuery<By<W, B>>> for Service<R>
where
    R: Remote<Select<By<W, B>>, Ok = W, Err = Traced<remote::Error>>,
{
    type Ok = W;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        RemoteQuery(by): RemoteQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.remote()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

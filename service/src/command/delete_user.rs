//! [`Command`] for deleting a [`User`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::{remote, Remote},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`User`].
#[derive(Clone, Debug, From)]
pub struct DeleteUser {
    /// ID of the [`User`] to be deleted.
    pub user_id: user::Id,
}

impl<R> Command<DeleteUser> for Service<R>
where
    R: Remote<Delete<By<User, user::Id>>, Ok = (), Err = Traced<remote::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { user_id } = cmd;

        self.remote()
            .execute(Delete(By::new(user_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`User(id: {user_id})` deleted");

        Ok(())
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] collection error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::User,
        infra::{memory::Call, Memory},
        Command as _, Config, Service,
    };

    use super::DeleteUser;

    #[tokio::test]
    async fn deletes_user() {
        let user: User =
            serde_json::from_value(serde_json::json!({"id": "3"})).unwrap();
        let svc = Service::new(Config::default(), Memory::new([user]));

        svc.execute(DeleteUser::from(user_id("3"))).await.unwrap();

        assert!(svc.remote().users().is_empty());
        assert_eq!(svc.remote().calls(), [Call::Delete(user_id("3"))]);
    }

    #[tokio::test]
    async fn fails_on_absent_user() {
        let svc = Service::new(Config::default(), Memory::default());

        assert!(svc.execute(DeleteUser::from(user_id("3"))).await.is_err());
    }

    fn user_id(id: &str) -> crate::domain::user::Id {
        id.into()
    }
}

//! [`Command`] for creating a new [`User`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::{
    domain::user::{Avatar, Email, Name, Role},
    Config,
};
use crate::{
    domain::{user, User},
    infra::{remote, Remote},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
///
/// The new [`User`] gets the [`Config::default_avatar`] as its [`Avatar`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Role`] of a new [`User`].
    pub role: user::Role,
}

impl<R> Command<CreateUser> for Service<R>
where
    R: Remote<Insert<user::New>, Ok = User, Err = Traced<remote::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser { name, email, role } = cmd;

        let user = self
            .remote()
            .execute(Insert(user::New {
                name,
                email,
                role,
                avatar: self.config().default_avatar.clone(),
                child: None,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`User(id: {})` created", user.id);

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] collection error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),
}

//! [`Command`] for updating an existing [`User`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Role};
use crate::{
    domain::{user, User},
    infra::{remote, Remote},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Name`], [`Email`] and [`Role`] of an
/// existing [`User`].
///
/// Other fields of the [`User`] are left untouched.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to be updated.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`].
    pub name: user::Name,

    /// New [`Email`] of the [`User`].
    pub email: user::Email,

    /// New [`Role`] of the [`User`].
    pub role: user::Role,
}

impl<R> Command<UpdateUser> for Service<R>
where
    R: Remote<
        Update<(user::Id, user::Patch)>,
        Ok = User,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            name,
            email,
            role,
        } = cmd;

        let patch = user::Patch {
            name: Some(name),
            email: Some(email),
            role: Some(role),
            ..user::Patch::default()
        };
        let user = self
            .remote()
            .execute(Update((user_id, patch)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`User(id: {})` updated", user.id);

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] collection error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{user, User},
        infra::{remote, Memory},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateUser};

    fn cmd(id: &str) -> UpdateUser {
        UpdateUser {
            user_id: id.into(),
            name: user::Name::new("Ann B").unwrap(),
            email: user::Email::new("annb@example.com").unwrap(),
            role: user::Role::new("editor").unwrap(),
        }
    }

    fn service() -> Service<Memory> {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Ann",
            "email": "ann@example.com",
            "role": "admin",
            "avatar": "https://example.com/1.jpg",
            "child": {"firstname": "Bo", "lastname": "Smith"},
        }))
        .unwrap();
        Service::new(Config::default(), Memory::new([user]))
    }

    #[tokio::test]
    async fn updates_only_editable_fields() {
        let svc = service();

        let user = svc.execute(cmd("1")).await.unwrap();

        assert_eq!(user.name.as_ref(), "Ann B");
        assert_eq!(user.email.as_ref(), "annb@example.com");
        assert_eq!(user.role.as_ref(), "editor");
        assert_eq!(user.avatar.as_ref(), "https://example.com/1.jpg");
        assert!(user.child.is_some());
        assert_eq!(svc.remote().users(), [user]);
    }

    #[tokio::test]
    async fn fails_on_absent_user() {
        let err = service().execute(cmd("9")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Remote(remote::Error::NotFound(_)),
        ));
    }
}

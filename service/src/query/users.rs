//! [`Query`] collection related to the multiple [`User`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{remote, Remote},
    Service,
};

use super::{Query, RemoteQuery};

/// Queries the whole list of [`User`]s.
pub type List = RemoteQuery<By<Vec<User>, ()>>;

impl List {
    /// Creates a new [`List`] query.
    #[must_use]
    pub fn all() -> Self {
        Self::by(())
    }
}

/// Queries whether a [`user::Key`] value is already taken by some [`User`].
///
/// Values are compared case-insensitively. The whole collection is fetched
/// and scanned, since the remote collection offers no lookup by value.
#[derive(Clone, Debug)]
pub struct Occupied {
    /// [`user::Key`] to check.
    pub key: user::Key,

    /// Value to look for.
    pub value: String,

    /// [`User`] whose own value doesn't count as occupying one.
    pub except: Option<user::Id>,
}

impl Occupied {
    /// Indicates whether the provided [`User`] occupies the value.
    fn is_occupied_by(&self, user: &User) -> bool {
        self.except.as_ref() != Some(&user.id)
            && user.key(self.key).to_lowercase() == self.value.to_lowercase()
    }
}

impl<R> Query<Occupied> for Service<R>
where
    R: Remote<
        Select<By<Vec<User>, ()>>,
        Ok = Vec<User>,
        Err = Traced<remote::Error>,
    >,
{
    type Ok = bool;
    type Err = Traced<remote::Error>;

    async fn execute(&self, query: Occupied) -> Result<Self::Ok, Self::Err> {
        let users = self
            .remote()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(users.iter().any(|u| query.is_occupied_by(u)))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{user, User},
        infra::Memory,
        Config, Query as _, Service,
    };

    use super::{List, Occupied};

    fn user(id: &str, name: &str, email: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "email": email,
        }))
        .unwrap()
    }

    fn service() -> Service<Memory> {
        Service::new(
            Config::default(),
            Memory::new([
                user("1", "Ann", "ann@example.com"),
                user("2", "Bob", "bob@example.com"),
            ]),
        )
    }

    fn occupied(key: user::Key, value: &str) -> Occupied {
        Occupied {
            key,
            value: value.to_owned(),
            except: None,
        }
    }

    #[tokio::test]
    async fn lists_everything() {
        let users = service().execute(List::all()).await.unwrap();

        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn detects_case_insensitive_collisions() {
        let svc = service();

        assert!(svc.execute(occupied(user::Key::Name, "ann")).await.unwrap());
        assert!(svc.execute(occupied(user::Key::Name, "ANN")).await.unwrap());
        assert!(svc
            .execute(occupied(user::Key::Email, "Bob@Example.com"))
            .await
            .unwrap());
        assert!(!svc.execute(occupied(user::Key::Name, "an")).await.unwrap());
        assert!(!svc
            .execute(occupied(user::Key::Email, "ann"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn ignores_excepted_user() {
        let svc = service();

        let own = Occupied {
            except: Some("1".into()),
            ..occupied(user::Key::Name, "Ann")
        };
        assert!(!svc.execute(own).await.unwrap());

        let other = Occupied {
            except: Some("2".into()),
            ..occupied(user::Key::Name, "Ann")
        };
        assert!(svc.execute(other).await.unwrap());
    }

    #[tokio::test]
    async fn fails_when_unreachable() {
        let svc = service();
        svc.remote().set_unreachable(true);

        assert!(svc.execute(occupied(user::Key::Name, "x")).await.is_err());
    }
}

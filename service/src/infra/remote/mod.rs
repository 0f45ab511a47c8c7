//! [`Remote`] collection of [`User`]s.
//!
//! Supported operations:
//! - [`Select`]`<`[`By`]`<Vec<User>, ()>>` lists the whole collection;
//! - [`Select`]`<`[`By`]`<User, user::Id>>` fetches a single [`User`];
//! - [`Insert`]`<`[`user::New`]`>` creates a [`User`];
//! - [`Update`]`<(user::Id, user::Patch)>` partially updates a [`User`];
//! - [`Delete`]`<`[`By`]`<User, user::Id>>` removes a [`User`].
//!
//! [`Http`] also relays raw JSON documents, so their shape is kept as is.

#[cfg(feature = "http")]
pub mod http;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use common::operations::{By, Delete, Insert, Select, Update};

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

#[cfg(feature = "http")]
pub use self::http::Http;
#[cfg(any(test, feature = "memory"))]
pub use self::memory::Memory;

/// Operation upon the remote collection.
pub use common::Handler as Remote;

/// [`Remote`] collection error.
///
/// Any failure is opaque to callers: no retries are performed and no
/// partial results are returned.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Requested [`User`] is absent in the collection.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    NotFound(#[error(not(source))] user::Id),

    #[cfg(feature = "http")]
    /// [`Http`] collection error.
    #[display("HTTP collection failed: {_0}")]
    Http(http::Error),

    #[cfg(any(test, feature = "memory"))]
    /// [`Memory`] collection error.
    #[display("in-memory collection failed: {_0}")]
    Memory(memory::Error),
}

#[cfg(test)]
mod spec {
    use std::error::Error as _;

    use crate::domain::user;

    use super::{memory, Error};

    #[test]
    fn describes_failures() {
        let absent = Error::NotFound(user::Id::from("9"));
        assert_eq!(absent.to_string(), "`User(id: 9)` does not exist");
        assert!(absent.source().is_none());

        let memory = Error::from(memory::Error::Unreachable);
        assert!(memory.to_string().starts_with("in-memory collection failed: "));
        assert!(memory.source().is_some());
    }
}

//! HTTP [`Remote`] collection implementation.

use std::time::Duration;

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{user, User},
    infra::{remote, Remote},
};

/// [`Http`] collection configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the collection, serving the whole list on `GET` and a single
    /// [`User`] on `GET {url}/{id}`.
    pub url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Remote`] collection of [`User`]s reachable over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// URL of the collection.
    collection: Url,
}

impl Http {
    /// Creates a new [`Http`] collection client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the configured URL is invalid or the HTTP client cannot be built.
    pub fn new(conf: &Config) -> Result<Self, Traced<remote::Error>> {
        let collection = Url::parse(&conf.url)
            .map_err(Error::Url)
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)?;
        if collection.cannot_be_a_base() {
            return Err(tracerr::new!(remote::Error::from(Error::NotABase(
                collection
            ))));
        }

        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(Error::Client)
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)?;

        Ok(Self { client, collection })
    }

    /// Returns URL of the [`User`] with the provided [`user::Id`].
    fn member(&self, id: &user::Id) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            _ = segments.pop_if_empty().push(id.as_ref());
        }
        url
    }

    /// Sends the provided `request`, treating any non-success status as a
    /// failure.
    async fn send(request: RequestBuilder) -> Result<Response, Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(tracerr::new!(Error::Status(status)))
        }
    }

    /// Decodes JSON body of the provided `response`.
    async fn decode<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, Traced<Error>> {
        response
            .json()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())
    }

    /// Sends the provided `request` and decodes its JSON response body.
    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, Traced<Error>> {
        let response = Self::send(request).await.map_err(tracerr::wrap!())?;
        Self::decode(response).await.map_err(tracerr::wrap!())
    }

    /// Posts the provided `body` to the collection, returning the created
    /// member.
    async fn create<B, T>(&self, body: &B) -> Result<T, Traced<remote::Error>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST `{}`", self.collection);

        Self::fetch(self.client.post(self.collection.clone()).json(body))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }

    /// Puts the provided `body` to the member with the provided
    /// [`user::Id`], returning the updated member.
    async fn replace<B, T>(
        &self,
        id: &user::Id,
        body: &B,
    ) -> Result<T, Traced<remote::Error>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.member(id);
        log::debug!("PUT `{url}`");

        Self::fetch(self.client.put(url).json(body))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Lists the whole collection, decoded as `T`.
///
/// [`serde_json::Value`] keeps the collection's response as is.
impl<T: DeserializeOwned> Remote<Select<By<T, ()>>> for Http {
    type Ok = T;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        _: Select<By<T, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("GET `{}`", self.collection);

        Self::fetch(self.client.get(self.collection.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Fetches a single member, decoded as `T`.
impl<T: DeserializeOwned> Remote<Select<By<T, user::Id>>> for Http {
    type Ok = T;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<T, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let url = self.member(&id);
        log::debug!("GET `{url}`");

        let response =
            Self::send(self.client.get(url)).await.map_err(|e| {
                if e.as_ref().status() == Some(StatusCode::NOT_FOUND.as_u16()) {
                    tracerr::new!(remote::Error::NotFound(id.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })?;
        Self::decode(response)
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

impl Remote<Insert<user::New>> for Http {
    type Ok = User;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<user::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.create(&new).await
    }
}

/// Creates a member out of the provided JSON document as is.
impl Remote<Insert<Value>> for Http {
    type Ok = Value;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Insert(body): Insert<Value>,
    ) -> Result<Self::Ok, Self::Err> {
        self.create(&body).await
    }
}

impl Remote<Update<(user::Id, user::Patch)>> for Http {
    type Ok = User;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Update((id, patch)): Update<(user::Id, user::Patch)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.replace(&id, &patch).await
    }
}

/// Updates a member with the provided JSON document as is.
impl Remote<Update<(user::Id, Value)>> for Http {
    type Ok = Value;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Update((id, body)): Update<(user::Id, Value)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.replace(&id, &body).await
    }
}

impl Remote<Delete<By<User, user::Id>>> for Http {
    type Ok = ();
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.member(by.as_inner());
        log::debug!("DELETE `{url}`");

        Self::send(self.client.delete(url))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// [`Http`] collection error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Configured collection URL cannot be parsed.
    #[display("invalid collection URL: {_0}")]
    Url(url::ParseError),

    /// Configured collection URL cannot have member paths.
    #[display("`{_0}` cannot be a collection URL")]
    NotABase(#[error(not(source))] Url),

    /// HTTP client cannot be built.
    #[display("failed to build HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Request could not complete, or its response could not be decoded.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Collection responded with a non-success status.
    #[display("collection responded with `{_0}`")]
    Status(#[error(not(source))] StatusCode),
}

impl Error {
    /// Returns the non-success HTTP status the collection responded with, if
    /// any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(status.as_u16()),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Url(_) | Self::NotABase(_) | Self::Client(_) => None,
        }
    }
}

//! `/users` API handlers.
//!
//! Every request is relayed to the remote collection as is. Any failure is
//! answered with an opaque [`Error`] describing the failed operation.

use std::fmt;

use axum::{
    extract::{rejection::JsonRejection, Path},
    Extension, Json,
};
use common::operations::{By, Delete, Insert, Select, Update};
use serde_json::{json, Value};
use service::{
    domain::{user, User},
    infra::{Http, Remote as _},
};
use tracerr::Traced;
use tracing as log;

use crate::{define_error, Error};

define_error! {
    enum CollectionError {
        #[code = "FETCH_USERS_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to fetch users"]
        Fetch,

        #[code = "CREATE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to create user"]
        Create,
    }
}

define_error! {
    enum MemberError {
        #[code = "FETCH_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to fetch user"]
        Fetch,

        #[code = "UPDATE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to update user"]
        Update,

        #[code = "DELETE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to delete user"]
        Delete,
    }
}

/// Lists all the [`User`]s as the remote collection returns them.
///
/// # Errors
///
/// If the remote collection fails.
#[tracing::instrument(skip_all)]
pub async fn list(
    Extension(remote): Extension<Http>,
) -> Result<Json<Value>, Error> {
    remote
        .execute(Select(By::<Value, _>::new(())))
        .await
        .map(Json)
        .map_err(|e| failed(CollectionError::Fetch, &e))
}

/// Creates a new [`User`] out of the request body as is.
///
/// # Errors
///
/// If the request body is not JSON or the remote collection fails.
#[tracing::instrument(skip_all)]
pub async fn create(
    Extension(remote): Extension<Http>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let Json(body) = body.map_err(|e| rejected(CollectionError::Create, &e))?;
    remote
        .execute(Insert(body))
        .await
        .map(Json)
        .map_err(|e| failed(CollectionError::Create, &e))
}

/// Fetches a single [`User`] as the remote collection returns it.
///
/// # Errors
///
/// If the [`User`] doesn't exist or the remote collection fails.
#[tracing::instrument(skip_all)]
pub async fn get(
    Extension(remote): Extension<Http>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    remote
        .execute(Select(By::<Value, _>::new(user::Id::from(id))))
        .await
        .map(Json)
        .map_err(|e| failed(MemberError::Fetch, &e))
}

/// Updates an existing [`User`] with the request body as is.
///
/// # Errors
///
/// If the request body is not JSON or the remote collection fails.
#[tracing::instrument(skip_all)]
pub async fn update(
    Extension(remote): Extension<Http>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let Json(body) = body.map_err(|e| rejected(MemberError::Update, &e))?;
    remote
        .execute(Update((user::Id::from(id), body)))
        .await
        .map(Json)
        .map_err(|e| failed(MemberError::Update, &e))
}

/// Deletes a [`User`].
///
/// # Errors
///
/// If the remote collection fails.
#[tracing::instrument(skip_all)]
pub async fn delete(
    Extension(remote): Extension<Http>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    remote
        .execute(Delete(By::<User, _>::new(user::Id::from(id))))
        .await
        .map(|()| Json(json!({ "success": true })))
        .map_err(|e| failed(MemberError::Delete, &e))
}

/// Converts the failed operation into an [`Error`], logging its cause.
fn failed<E: fmt::Display>(
    operation: impl Into<Error>,
    cause: &Traced<E>,
) -> Error {
    let err = operation.into().caused_by(cause);
    log::error!("{err}\ncaused by: {cause}");
    err
}

/// Converts the operation with a malformed request into an [`Error`],
/// logging the rejection.
fn rejected(operation: impl Into<Error>, rejection: &JsonRejection) -> Error {
    let err = operation.into();
    log::error!("{err}\ncaused by: {rejection}");
    err
}

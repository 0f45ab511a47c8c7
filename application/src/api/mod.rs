//! HTTP API forwarding requests to the remote collection.

pub mod users;

use axum::{routing::get, Extension, Router};
use service::infra::Http;

/// Creates a [`Router`] forwarding `/users` requests to the provided [`Http`]
/// collection.
pub fn router(remote: Http) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .layer(Extension(remote))
}

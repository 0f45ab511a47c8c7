//! Service contains the logic of the user directory.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod directory;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::time::Duration;

use common::pagination;
use smart_default::SmartDefault;

use crate::domain::user;
#[cfg(doc)]
use crate::{domain::User, infra::Remote};

pub use self::{command::Command, directory::Directory, query::Query};

/// Default [`user::Avatar`] assigned to newly created [`User`]s.
pub const DEFAULT_AVATAR: &str = "https://cloudflare-ipfs.com/ipfs/\
                                  Qmd3W5DuhgHirLHGVixi6V76LhCkZUz6pnFt5AJBiyvHye/\
                                  avatar/1.jpg";

/// Default number of [`User`]s on a single listing page.
const DEFAULT_PAGE_SIZE: pagination::Size = match pagination::Size::new(5) {
    Some(size) => size,
    None => panic!("page size must be positive"),
};

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`User`]s on a single listing page.
    #[default(DEFAULT_PAGE_SIZE)]
    pub page_size: pagination::Size,

    /// Quiet period after the last edit before a uniqueness check is sent.
    #[default(Duration::from_millis(500))]
    pub debounce: Duration,

    /// Time a notification stays visible.
    #[default(Duration::from_secs(3))]
    pub notification_ttl: Duration,

    /// [`user::Avatar`] assigned to newly created [`User`]s.
    #[default(user::Avatar::from(DEFAULT_AVATAR))]
    pub default_avatar: user::Avatar,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<R> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Remote`] collection of this [`Service`].
    remote: R,
}

impl<R> Service<R> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, remote: R) -> Self {
        Self { config, remote }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Remote`] collection of this [`Service`].
    #[must_use]
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

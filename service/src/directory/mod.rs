//! [`Directory`] controller keeping a local view of the remote collection.
//!
//! The local list of [`User`]s is a disposable copy of the [`Remote`]
//! collection: it's fully reloaded on entering the listing and after every
//! deletion, and never written to directly.
//!
//! Everything here runs on a single thread, so it must be driven from within
//! a [`LocalSet`].
//!
//! [`LocalSet`]: tokio::task::LocalSet
//! [`Remote`]: crate::infra::Remote

pub mod form;
pub mod notification;
pub mod validation;

use common::pagination;
use derive_more::{Display, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{delete_user, DeleteUser},
    domain::{user, User},
    infra::remote,
    query,
    read::user::list::{Filter, RoleFilter, View},
    Command, Query, Service,
};

pub use self::{
    form::{CreateForm, EditForm},
    notification::{Notification, Notifier},
    validation::{Validator, Warning},
};

/// One-shot message carried to the listing after a successful mutation.
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Flash(String);

impl From<Flash> for Notification {
    fn from(flash: Flash) -> Self {
        flash.0.into()
    }
}

/// Controller of the [`User`]s listing.
#[derive(Debug)]
pub struct Directory<R> {
    /// [`Service`] to interact with the remote collection through.
    service: Service<R>,

    /// Local copy of the remote collection.
    users: Vec<User>,

    /// Indicator whether the local copy is being (re)loaded.
    is_loading: bool,

    /// Current [`Filter`] of the listing.
    filter: Filter,

    /// Current [`pagination::Number`] of the listing.
    page: pagination::Number,

    /// [`User`] awaiting the deletion confirmation.
    pending_deletion: Option<user::Id>,

    /// Disclosed [`user::Child`] information.
    disclosed_child: Option<user::Child>,

    /// [`Notifier`] of the listing.
    notifier: Notifier,
}

impl<R> Directory<R> {
    /// Creates a new [`Directory`] in the loading state.
    #[must_use]
    pub fn new(service: Service<R>) -> Self {
        Self {
            notifier: Notifier::new(service.config().notification_ttl),
            service,
            users: Vec::new(),
            is_loading: true,
            filter: Filter::default(),
            page: pagination::Number::FIRST,
            pending_deletion: None,
            disclosed_child: None,
        }
    }

    /// Returns the local copy of the remote collection.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Indicates whether the local copy is being (re)loaded.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns the current [`Filter`].
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns the current [`pagination::Number`].
    #[must_use]
    pub fn page(&self) -> pagination::Number {
        self.page
    }

    /// Projects the local copy onto the current [`Filter`] and page.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        View::project(
            &self.users,
            &self.filter,
            self.page,
            self.service.config().page_size,
        )
    }

    /// Sets the search term, returning to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        self.page = pagination::Number::FIRST;
    }

    /// Sets the [`RoleFilter`], returning to the first page.
    pub fn set_role_filter(&mut self, role: RoleFilter) {
        self.filter.role = role;
        self.page = pagination::Number::FIRST;
    }

    /// Navigates to the provided page, clamped into the existing ones.
    pub fn go_to_page(&mut self, number: usize) {
        let total = self.view().page.total_pages;
        self.page = pagination::Number::new(number)
            .unwrap_or(pagination::Number::FIRST)
            .clamp_to(total);
    }

    /// Navigates to the next page, if any.
    pub fn next_page(&mut self) {
        self.go_to_page(self.page.next().get());
    }

    /// Navigates to the previous page, if any.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.previous().get());
    }

    /// Requests the [`User`] with the provided [`user::Id`] to be deleted,
    /// replacing any previous request.
    ///
    /// Nothing is deleted until the request is confirmed.
    pub fn request_deletion(&mut self, id: user::Id) {
        self.pending_deletion = Some(id);
    }

    /// Cancels the requested deletion, if any.
    pub fn cancel_deletion(&mut self) {
        self.pending_deletion = None;
    }

    /// Returns the [`user::Id`] of the [`User`] awaiting the deletion
    /// confirmation, if any.
    #[must_use]
    pub fn pending_deletion(&self) -> Option<&user::Id> {
        self.pending_deletion.as_ref()
    }

    /// Discloses [`user::Child`] information of the [`User`] with the
    /// provided [`user::Id`].
    ///
    /// Does nothing if the [`User`] has no [`user::Child`].
    pub fn disclose_child(&mut self, id: &user::Id) {
        let child = self
            .users
            .iter()
            .find(|u| &u.id == id)
            .and_then(|u| u.child.clone());
        if child.is_some() {
            self.disclosed_child = child;
        }
    }

    /// Closes the disclosed [`user::Child`] information.
    pub fn close_child(&mut self) {
        self.disclosed_child = None;
    }

    /// Returns the disclosed [`user::Child`] information, if any.
    #[must_use]
    pub fn disclosed_child(&self) -> Option<&user::Child> {
        self.disclosed_child.as_ref()
    }

    /// Returns the currently shown [`Notification`], if any.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    /// Returns the [`Notifier`] of this [`Directory`].
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl<R> Directory<R>
where
    Service<R>: Query<
        query::users::List,
        Ok = Vec<User>,
        Err = Traced<remote::Error>,
    >,
{
    /// Enters the listing, showing the carried [`Flash`] (if any) and
    /// reloading the local copy.
    pub async fn enter(&mut self, flash: Option<Flash>) {
        if let Some(flash) = flash {
            self.notifier.show(flash);
        }
        self.reload().await;
    }

    /// Reloads the local copy of the remote collection.
    ///
    /// On failure the local copy is emptied.
    pub async fn reload(&mut self) {
        self.is_loading = true;
        match self.service.execute(query::users::List::all()).await {
            Ok(users) => self.users = users,
            Err(e) => {
                log::error!("failed to load `User`s: {e}");
                self.users.clear();
                self.notifier
                    .show("❌ Failed to load users. Please try again.");
            }
        }
        self.is_loading = false;
    }
}

impl<R> Directory<R>
where
    Service<R>: Query<
            query::users::List,
            Ok = Vec<User>,
            Err = Traced<remote::Error>,
        > + Command<
            DeleteUser,
            Ok = (),
            Err = Traced<delete_user::ExecutionError>,
        >,
{
    /// Confirms the requested deletion, if any.
    ///
    /// The local copy is reloaded whatever the outcome is.
    pub async fn confirm_deletion(&mut self) {
        let Some(user_id) = self.pending_deletion.take() else {
            return;
        };

        let deleted = self.service.execute(DeleteUser { user_id }).await;
        self.reload().await;

        match deleted {
            Ok(()) => self.notifier.show("✅ User deleted successfully!"),
            Err(e) => {
                log::error!("failed to delete `User`: {e}");
                self.notifier.show("❌ Failed to delete user");
            }
        }
    }
}

//! [`CreateForm`] and [`EditForm`] definitions.

use derive_more::{Display, Error as StdError, From};
use strum::Display as StrumDisplay;
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{create_user, update_user, CreateUser, UpdateUser},
    domain::{user, User},
    infra::remote,
    query::{self, users::Occupied},
    Command, Query, Service,
};

use super::{
    validation::{Validator, Warning},
    Flash,
};

/// Input field of a form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Input {
    /// [`user::Name`] input.
    Name,

    /// [`user::Email`] input.
    Email,

    /// [`user::Role`] input.
    Role,
}

/// Values typed into a form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Typed [`user::Name`].
    pub name: String,

    /// Typed [`user::Email`].
    pub email: String,

    /// Typed [`user::Role`].
    pub role: String,
}

impl Draft {
    /// Parses this [`Draft`], requiring every [`Input`] to be filled.
    fn parse(
        &self,
    ) -> Result<(user::Name, user::Email, user::Role), SubmitError> {
        Ok((
            user::Name::new(self.name.as_str())
                .ok_or(SubmitError::Blank(Input::Name))?,
            user::Email::new(self.email.as_str())
                .ok_or(SubmitError::Blank(Input::Email))?,
            user::Role::new(self.role.as_str())
                .ok_or(SubmitError::Blank(Input::Role))?,
        ))
    }
}

/// Error of submitting a form.
#[derive(Debug, Display, From, StdError)]
pub enum SubmitError {
    /// Required [`Input`] is blank.
    #[display("`{_0}` is required")]
    Blank(#[error(not(source))] Input),

    /// Value of the [`user::Key`] collides with an existing [`User`]'s one.
    #[display("`{_0}` is already occupied")]
    Conflict(#[error(not(source))] user::Key),

    /// [`User`] cannot be created.
    #[display("Failed to create `User`: {_0}")]
    #[from]
    Create(create_user::ExecutionError),

    /// [`User`] cannot be updated.
    #[display("Failed to update `User`: {_0}")]
    #[from]
    Update(update_user::ExecutionError),

    /// Edited [`User`] hasn't been loaded.
    #[display("`User` is not loaded")]
    NotLoaded,
}

/// Message shown when a submission is blocked by a [`Warning`].
const FIX_ERRORS: &str = "❌ Please fix the errors before submitting.";

/// Pair of [`Validator`]s of the unique [`user::Key`]s.
#[derive(Debug)]
struct Validators<R> {
    /// [`user::Key::Name`] [`Validator`].
    name: Validator<R>,

    /// [`user::Key::Email`] [`Validator`].
    email: Validator<R>,
}

impl<R: Clone> Validators<R> {
    /// Creates new [`Validators`] ignoring values of the `except`ed [`User`].
    fn new(service: &Service<R>, except: Option<&user::Id>) -> Self {
        Self {
            name: Validator::new(
                service.clone(),
                user::Key::Name,
                except.cloned(),
            ),
            email: Validator::new(
                service.clone(),
                user::Key::Email,
                except.cloned(),
            ),
        }
    }
}

impl<R> Validators<R> {
    /// Returns the current [`Warning`] of the provided [`user::Key`].
    fn warning(&self, key: user::Key) -> Option<Warning> {
        match key {
            user::Key::Name => self.name.warning(),
            user::Key::Email => self.email.warning(),
        }
    }

    /// Returns the first [`user::Key`] having a [`Warning`], if any.
    fn conflict(&self) -> Option<user::Key> {
        [user::Key::Name, user::Key::Email]
            .into_iter()
            .find(|k| self.warning(*k).is_some())
    }
}

/// Form creating a new [`User`].
#[derive(Debug)]
pub struct CreateForm<R> {
    /// [`Service`] to create the [`User`] with.
    service: Service<R>,

    /// Typed values.
    draft: Draft,

    /// Uniqueness [`Validator`]s.
    validators: Validators<R>,

    /// Error shown above the form, if any.
    alert: Option<&'static str>,
}

impl<R: Clone> CreateForm<R> {
    /// Creates a new empty [`CreateForm`].
    #[must_use]
    pub fn new(service: Service<R>) -> Self {
        Self {
            validators: Validators::new(&service, None),
            service,
            draft: Draft::default(),
            alert: None,
        }
    }
}

impl<R> CreateForm<R> {
    /// Returns the typed values.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the current [`Warning`] of the provided [`user::Key`].
    #[must_use]
    pub fn warning(&self, key: user::Key) -> Option<Warning> {
        self.validators.warning(key)
    }

    /// Returns the error shown above the form, if any.
    #[must_use]
    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    /// Sets the typed [`user::Role`].
    pub fn set_role(&mut self, role: impl Into<String>) {
        self.draft.role = role.into();
    }
}

impl<R> CreateForm<R>
where
    Service<R>: Query<Occupied, Ok = bool, Err = Traced<remote::Error>>
        + Command<
            CreateUser,
            Ok = User,
            Err = Traced<create_user::ExecutionError>,
        > + Clone
        + 'static,
{
    /// Sets the typed [`user::Name`], checking its uniqueness.
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.validators.name.on_change(&self.draft.name);
    }

    /// Sets the typed [`user::Email`], checking its uniqueness.
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
        self.validators.email.on_change(&self.draft.email);
    }

    /// Submits this [`CreateForm`], returning the [`Flash`] to be carried
    /// to the listing.
    ///
    /// Typed values are kept on failure.
    ///
    /// # Errors
    ///
    /// If any [`Input`] is blank, a [`Warning`] is present or the [`User`]
    /// cannot be created.
    pub async fn submit(&mut self) -> Result<Flash, Traced<SubmitError>> {
        use SubmitError as E;

        self.alert = None;

        let (name, email, role) =
            self.draft.parse().map_err(tracerr::wrap!())?;
        if let Some(key) = self.validators.conflict() {
            self.alert = Some(FIX_ERRORS);
            return Err(tracerr::new!(E::Conflict(key)));
        }

        let created =
            self.service.execute(CreateUser { name, email, role }).await;
        if let Err(e) = &created {
            log::error!("failed to add `User`: {e}");
            self.alert = Some("❌ Failed to add user. Please try again.");
        }
        _ = created.map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Flash::from("✅ User added successfully!"))
    }
}

/// Loading state of an [`EditForm`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Load {
    /// Edited [`User`] is being loaded.
    Loading,

    /// Edited [`User`] cannot be loaded.
    Failed,

    /// Edited [`User`] is loaded and can be edited.
    Ready,
}

/// Form editing an existing [`User`].
#[derive(Debug)]
pub struct EditForm<R> {
    /// [`Service`] to update the [`User`] with.
    service: Service<R>,

    /// ID of the edited [`User`].
    user_id: user::Id,

    /// [`Load`]ing state.
    load: Load,

    /// Typed values.
    draft: Draft,

    /// Uniqueness [`Validator`]s, ignoring the edited [`User`] itself.
    validators: Validators<R>,

    /// Error shown above the form, if any.
    alert: Option<&'static str>,
}

impl<R: Clone> EditForm<R> {
    /// Creates a new [`EditForm`] of the [`User`] with the provided
    /// [`user::Id`], not loaded yet.
    #[must_use]
    pub fn new(service: Service<R>, user_id: user::Id) -> Self {
        Self {
            validators: Validators::new(&service, Some(&user_id)),
            service,
            user_id,
            load: Load::Loading,
            draft: Draft::default(),
            alert: None,
        }
    }
}

impl<R> EditForm<R> {
    /// Returns ID of the edited [`User`].
    #[must_use]
    pub fn user_id(&self) -> &user::Id {
        &self.user_id
    }

    /// Returns the [`Load`]ing state.
    #[must_use]
    pub fn load_state(&self) -> Load {
        self.load
    }

    /// Returns the message replacing the form when the [`User`] cannot be
    /// loaded.
    #[must_use]
    pub fn load_error(&self) -> Option<&'static str> {
        (self.load == Load::Failed)
            .then_some("Failed to load user data. Please try again.")
    }

    /// Returns the typed values.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the current [`Warning`] of the provided [`user::Key`].
    #[must_use]
    pub fn warning(&self, key: user::Key) -> Option<Warning> {
        self.validators.warning(key)
    }

    /// Returns the error alerted on the last submission, if any.
    #[must_use]
    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    /// Sets the typed [`user::Role`].
    pub fn set_role(&mut self, role: impl Into<String>) {
        self.draft.role = role.into();
    }
}

impl<R> EditForm<R>
where
    Service<R>: Query<
            query::user::ById,
            Ok = User,
            Err = Traced<remote::Error>,
        > + Clone,
{
    /// Loads the edited [`User`], filling the form with its values.
    ///
    /// Failure is final: the form stays in the [`Load::Failed`] state.
    pub async fn load(&mut self) {
        self.load = Load::Loading;
        match self
            .service
            .execute(query::user::ById::by(self.user_id.clone()))
            .await
        {
            Ok(user) => {
                self.draft = Draft {
                    name: user.name.to_string(),
                    email: user.email.to_string(),
                    role: user.role.to_string(),
                };
                self.load = Load::Ready;
            }
            Err(e) => {
                log::error!(
                    "failed to load `User(id: {})`: {e}",
                    self.user_id,
                );
                self.load = Load::Failed;
            }
        }
    }
}

impl<R> EditForm<R>
where
    Service<R>: Query<Occupied, Ok = bool, Err = Traced<remote::Error>>
        + Command<
            UpdateUser,
            Ok = User,
            Err = Traced<update_user::ExecutionError>,
        > + Clone
        + 'static,
{
    /// Sets the typed [`user::Name`], checking its uniqueness.
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.validators.name.on_change(&self.draft.name);
    }

    /// Sets the typed [`user::Email`], checking its uniqueness.
    ///
    /// Must be called within a [`LocalSet`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
        self.validators.email.on_change(&self.draft.email);
    }

    /// Submits this [`EditForm`], returning the [`Flash`] to be carried to
    /// the listing.
    ///
    /// Typed values are kept on failure.
    ///
    /// # Errors
    ///
    /// If the [`User`] isn't loaded, any [`Input`] is blank, a [`Warning`]
    /// is present or the [`User`] cannot be updated.
    pub async fn submit(&mut self) -> Result<Flash, Traced<SubmitError>> {
        use SubmitError as E;

        self.alert = None;

        if self.load != Load::Ready {
            return Err(tracerr::new!(E::NotLoaded));
        }
        let (name, email, role) =
            self.draft.parse().map_err(tracerr::wrap!())?;
        if let Some(key) = self.validators.conflict() {
            self.alert = Some(FIX_ERRORS);
            return Err(tracerr::new!(E::Conflict(key)));
        }

        let updated = self
            .service
            .execute(UpdateUser {
                user_id: self.user_id.clone(),
                name,
                email,
                role,
            })
            .await;
        if let Err(e) = &updated {
            log::error!(
                "failed to update `User(id: {})`: {e}",
                self.user_id,
            );
            self.alert = Some("❌ Failed to update user. Please try again.");
        }
        _ = updated.map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Flash::from("✅ User updated successfully!"))
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::{task::LocalSet, time};

    use crate::{
        domain::{user, User},
        infra::{memory::Call, Memory},
        Config, Service,
    };

    use super::{CreateForm, EditForm, Input, Load, SubmitError};

    fn service() -> Service<Memory> {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Ann",
            "email": "ann@example.com",
            "role": "admin",
        }))
        .unwrap();
        Service::new(Config::default(), Memory::new([user]))
    }

    fn fill(
        form: &mut CreateForm<Memory>,
        name: &str,
        email: &str,
        role: &str,
    ) {
        form.set_name(name);
        form.set_email(email);
        form.set_role(role);
    }

    #[tokio::test(start_paused = true)]
    async fn creates_user() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = CreateForm::new(svc.clone());

                fill(&mut form, "Bob", "bob@example.com", "user");
                time::sleep(Duration::from_millis(600)).await;
                let flash = form.submit().await.unwrap();

                assert_eq!(flash.to_string(), "✅ User added successfully!");
                assert_eq!(form.alert(), None);
                assert_eq!(svc.remote().users().len(), 2);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn blocks_conflicting_submission() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = CreateForm::new(svc.clone());

                fill(&mut form, "ann", "new@example.com", "user");
                time::sleep(Duration::from_millis(600)).await;
                assert!(form.warning(user::Key::Name).is_some());
                assert!(form.warning(user::Key::Email).is_none());
                let calls = svc.remote().calls().len();

                let err = form.submit().await.unwrap_err();

                assert!(matches!(
                    err.as_ref(),
                    SubmitError::Conflict(user::Key::Name),
                ));
                assert_eq!(
                    form.alert(),
                    Some("❌ Please fix the errors before submitting."),
                );
                assert_eq!(svc.remote().calls().len(), calls);
                assert_eq!(svc.remote().users().len(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_blank_inputs() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = CreateForm::new(svc.clone());

                fill(&mut form, "Bob", "bob@example.com", "  ");
                let err = form.submit().await.unwrap_err();

                assert!(matches!(err.as_ref(), SubmitError::Blank(Input::Role)));
                assert_eq!(err.as_ref().to_string(), "`role` is required");
                assert!(svc.remote().calls().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_input_on_failure() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = CreateForm::new(svc.clone());

                fill(&mut form, "Bob", "bob@example.com", "user");
                time::sleep(Duration::from_millis(600)).await;
                svc.remote().set_unreachable(true);

                let err = form.submit().await.unwrap_err();

                assert!(matches!(err.as_ref(), SubmitError::Create(_)));
                assert_eq!(
                    form.alert(),
                    Some("❌ Failed to add user. Please try again."),
                );
                assert_eq!(form.draft().name, "Bob");
                assert_eq!(form.draft().email, "bob@example.com");
                assert_eq!(form.draft().role, "user");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn edits_loaded_user() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = EditForm::new(svc.clone(), "1".into());
                assert_eq!(form.load_state(), Load::Loading);

                form.load().await;
                assert_eq!(form.load_state(), Load::Ready);
                assert_eq!(form.draft().name, "Ann");
                assert_eq!(form.draft().role, "admin");

                form.set_name("ann");
                form.set_role("owner");
                time::sleep(Duration::from_millis(600)).await;
                assert!(form.warning(user::Key::Name).is_none());

                let flash = form.submit().await.unwrap();
                assert_eq!(flash.to_string(), "✅ User updated successfully!");

                let users = svc.remote().users();
                assert_eq!(users[0].name.as_ref(), "ann");
                assert_eq!(users[0].role.as_ref(), "owner");
                assert_eq!(
                    svc.remote().calls().last(),
                    Some(&Call::Update("1".into())),
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn fails_to_load_absent_user() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = EditForm::new(svc.clone(), "9".into());

                form.load().await;

                assert_eq!(form.load_state(), Load::Failed);
                assert_eq!(
                    form.load_error(),
                    Some("Failed to load user data. Please try again."),
                );
                let err = form.submit().await.unwrap_err();
                assert!(matches!(err.as_ref(), SubmitError::NotLoaded));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn alerts_on_update_failure() {
        LocalSet::new()
            .run_until(async {
                let svc = service();
                let mut form = EditForm::new(svc.clone(), "1".into());
                form.load().await;
                form.set_role("owner");
                svc.remote().set_unreachable(true);

                let err = form.submit().await.unwrap_err();

                assert!(matches!(err.as_ref(), SubmitError::Update(_)));
                assert_eq!(
                    form.alert(),
                    Some("❌ Failed to update user. Please try again."),
                );
                assert_eq!(form.draft().role, "owner");
            })
            .await;
    }
}

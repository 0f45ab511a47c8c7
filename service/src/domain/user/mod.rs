//! [`User`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize};

/// Member of the directory, as stored in the remote collection.
///
/// Every field except [`Id`] is taken as-is from the remote collection: an
/// absent or `null` string decodes as an empty one.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`DateTime`] when this [`User`] was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreationDateTime>,

    /// [`Name`] of this [`User`].
    #[serde(default, deserialize_with = "nullable")]
    pub name: Name,

    /// [`Email`] of this [`User`].
    #[serde(default, deserialize_with = "nullable")]
    pub email: Email,

    /// [`Role`] of this [`User`].
    #[serde(default, deserialize_with = "nullable")]
    pub role: Role,

    /// [`Avatar`] of this [`User`].
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: Avatar,

    /// Information about the [`Child`] of this [`User`], if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<Child>,
}

impl User {
    /// Returns the value of this [`User`] under the provided [`Key`].
    #[must_use]
    pub fn key(&self, key: Key) -> &str {
        match key {
            Key::Name => self.name.as_ref(),
            Key::Email => self.email.as_ref(),
        }
    }
}

/// Field of a [`User`] expected to be unique across the collection.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Key {
    /// [`User::name`].
    #[display("name")]
    Name,

    /// [`User::email`].
    #[display("email")]
    Email,
}

/// ID of a [`User`], assigned by the remote collection.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

/// Name of a [`User`].
#[derive(
    AsRef, Clone, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`], unless the provided one is blank.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.trim().is_empty()).then_some(Self(name))
    }
}

/// Email address of a [`User`].
#[derive(
    AsRef, Clone, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`], unless the provided address is blank.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        (!address.trim().is_empty()).then_some(Self(address))
    }
}

/// Free-text role of a [`User`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a new [`Role`], unless the provided one is blank.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Option<Self> {
        let role = role.into();
        (!role.trim().is_empty()).then_some(Self(role))
    }

    /// Indicates whether this [`Role`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// URL of a [`User`]'s avatar picture.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Avatar(String);

/// Child of a [`User`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Child {
    /// First name of this [`Child`].
    #[serde(default, deserialize_with = "nullable")]
    pub firstname: String,

    /// Last name of this [`Child`].
    #[serde(default, deserialize_with = "nullable")]
    pub lastname: String,
}

/// Fields of a [`User`] to be created.
///
/// [`Id`] and creation [`DateTime`] are assigned by the remote collection.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct New {
    /// [`Name`] of a new [`User`].
    pub name: Name,

    /// [`Email`] of a new [`User`].
    pub email: Email,

    /// [`Role`] of a new [`User`].
    #[serde(default)]
    pub role: Role,

    /// [`Avatar`] of a new [`User`].
    #[serde(default)]
    pub avatar: Avatar,

    /// [`Child`] of a new [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<Child>,
}

/// Partial update of a [`User`].
///
/// [`None`] fields are left untouched by the remote collection.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Patch {
    /// New [`Name`] of the [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,

    /// New [`Email`] of the [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    /// New [`Role`] of the [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// New [`Avatar`] of the [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,

    /// New [`Child`] of the [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<Child>,
}

impl Patch {
    /// Applies this [`Patch`] to the provided [`User`].
    pub fn apply(self, user: &mut User) {
        let Self {
            name,
            email,
            role,
            avatar,
            child,
        } = self;

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(avatar) = avatar {
            user.avatar = avatar;
        }
        if child.is_some() {
            user.child = child;
        }
    }
}

/// Decodes an absent or `null` value as the default one.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

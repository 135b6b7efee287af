//! User accounts.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::choice::define_choice;
use super::formats::{EmailAddress, FormatValidationError, PhoneNumber, PostalCode};

/// Maximum username length.
pub const USERNAME_MAX: usize = 150;
/// Maximum length of the street address line.
pub const ADDRESS_MAX: usize = 255;
/// Maximum length of the city and state lines.
pub const LOCALITY_MAX: usize = 120;
/// Maximum length of first and last names.
pub const PERSON_NAME_MAX: usize = 150;

/// Validation errors returned by [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyUsername,
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    FieldTooLong { field: &'static str, max: usize },
    Format(FormatValidationError),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, digits, and @/./+/-/_ characters",
            ),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::Format(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<FormatValidationError> for UserValidationError {
    fn from(value: FormatValidationError) -> Self {
        Self::Format(value)
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Login name, unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[\w.@+-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

define_choice! {
    /// Account role.
    #[derive(Default)]
    pub enum Role ("role") {
        #[default]
        Customer => "customer",
        Admin => "admin",
        Staff => "staff",
    }
}

define_choice! {
    /// Self-declared gender.
    #[derive(Default)]
    pub enum Gender ("gender") {
        Male => "male",
        Female => "female",
        #[default]
        Other => "other",
    }
}

/// Postal address lines attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
}

impl Address {
    fn validate(self) -> Result<Self, UserValidationError> {
        ensure_max(&self.address, "address", ADDRESS_MAX)?;
        ensure_max(&self.city, "city", LOCALITY_MAX)?;
        ensure_max(&self.state, "state", LOCALITY_MAX)?;
        Ok(self)
    }
}

fn ensure_max(value: &str, field: &'static str, max: usize) -> Result<(), UserValidationError> {
    if value.chars().count() > max {
        return Err(UserValidationError::FieldTooLong { field, max });
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UserDraft {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub address: Address,
    pub postcode: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub receive_notification_code: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

/// Salon account: customer, staff member, or administrator.
///
/// ## Invariants
/// - `username`, `email`, `phone`, and `postcode` match their formats.
/// - Name and address lines respect their length limits.
///
/// Uniqueness of username, e-mail, phone, and postcode is a storage
/// constraint reported by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    phone: PhoneNumber,
    role: Role,
    gender: Gender,
    address: Address,
    postcode: PostalCode,
    is_verified: bool,
    receive_notification_code: bool,
    is_superuser: bool,
    is_active: bool,
    birthday: Option<NaiveDate>,
}

impl User {
    /// Validate and construct a user.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> UserId {
        self.id
    }
    pub fn username(&self) -> &Username {
        &self.username
    }
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn gender(&self) -> Gender {
        self.gender
    }
    pub fn address(&self) -> &Address {
        &self.address
    }
    pub fn postcode(&self) -> &PostalCode {
        &self.postcode
    }
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }
    pub fn receive_notification_code(&self) -> bool {
        self.receive_notification_code
    }
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    /// First and last name joined by a space, or the username when both
    /// are blank.
    pub fn full_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            self.username.to_string()
        } else {
            trimmed.to_owned()
        }
    }

    /// `true` for the customer role.
    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }

    /// `true` for the staff role.
    pub fn is_staff_member(&self) -> bool {
        self.role == Role::Staff
    }

    /// `true` for administrators and superusers.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.is_superuser
    }

    /// Change the account role.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Mark the contact details as verified or unverified.
    pub fn set_verified(&mut self, verified: bool) {
        self.is_verified = verified;
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            id: self.id.0,
            username: self.username.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email.into(),
            phone: self.phone.into(),
            role: self.role,
            gender: self.gender,
            address: self.address,
            postcode: self.postcode.into(),
            is_verified: self.is_verified,
            receive_notification_code: self.receive_notification_code,
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            birthday: self.birthday,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.username.fmt(f)
    }
}

impl TryFrom<UserDraft> for User {
    type Error = UserValidationError;

    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        let username = Username::new(draft.username)?;
        ensure_max(&draft.first_name, "first_name", PERSON_NAME_MAX)?;
        ensure_max(&draft.last_name, "last_name", PERSON_NAME_MAX)?;
        let email = EmailAddress::new(draft.email)?;
        let phone = PhoneNumber::new(draft.phone)?;
        let postcode = PostalCode::new(draft.postcode)?;
        let address = draft.address.validate()?;

        Ok(Self {
            id: UserId::from_uuid(draft.id),
            username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email,
            phone,
            role: draft.role,
            gender: draft.gender,
            address,
            postcode,
            is_verified: draft.is_verified,
            receive_notification_code: draft.receive_notification_code,
            is_superuser: draft.is_superuser,
            is_active: draft.is_active,
            birthday: draft.birthday,
        })
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        UserDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;

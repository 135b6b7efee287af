//! URL slugs shared by catalogue entities.
//!
//! Slugs are trimmed, non-empty identifiers composed of ASCII letters,
//! digits, underscores, and hyphens. [`slugify`] derives one from a display
//! name by lowercasing, dropping punctuation and non-ASCII characters, and
//! collapsing whitespace and hyphen runs into single hyphens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum slug length accepted by catalogue tables.
pub const SLUG_MAX: usize = 255;

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::TooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain ASCII letters, digits, underscores, and hyphens"
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_slug_char)
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Derive a slug from free text.
///
/// Returns an empty string when nothing slug-safe remains.
///
/// # Examples
/// ```
/// use salon_backend::domain::slugify;
///
/// assert_eq!(slugify("  Hair & Scalp  Care "), "hair-scalp-care");
/// ```
pub fn slugify(value: &str) -> String {
    let kept: String = value
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace())
        .map(|ch| if ch.is_whitespace() { '-' } else { ch })
        .collect();

    kept.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches(|ch| ch == '-' || ch == '_')
        .to_owned()
}

/// Validated URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`].
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !is_valid_slug(&value) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Use `explicit` when provided and non-blank, otherwise slugify `name`.
    pub fn or_derive_from(
        explicit: Option<String>,
        name: &str,
    ) -> Result<Self, SlugValidationError> {
        match explicit.filter(|value| !value.trim().is_empty()) {
            Some(value) => Self::new(value),
            None => Self::new(slugify(name)),
        }
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

//! Pattern-validated text fields.
//!
//! Each type wraps a `String` that matched its pattern at construction and
//! round-trips through serde as a plain string.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation failure for a pattern-checked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize },
    Mismatch { field: &'static str, hint: &'static str },
}

impl fmt::Display for FormatValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::Mismatch { field, hint } => write!(f, "{field} is malformed: {hint}"),
        }
    }
}

impl std::error::Error for FormatValidationError {}

impl FormatValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Mismatch { field, .. } => {
                field
            }
        }
    }
}

fn compile(slot: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    slot.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
    })
}

macro_rules! pattern_field {
    (
        $(#[$meta:meta])*
        $name:ident {
            field: $field:literal,
            pattern: $pattern:literal,
            max: $max:expr,
            hint: $hint:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Field name reported in validation errors.
            pub const FIELD: &'static str = $field;

            /// Validate and construct the value.
            pub fn new(value: impl Into<String>) -> Result<Self, FormatValidationError> {
                static PATTERN: OnceLock<Regex> = OnceLock::new();
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(FormatValidationError::Empty { field: $field });
                }
                if value.chars().count() > $max {
                    return Err(FormatValidationError::TooLong {
                        field: $field,
                        max: $max,
                    });
                }
                if !compile(&PATTERN, $pattern).is_match(&value) {
                    return Err(FormatValidationError::Mismatch {
                        field: $field,
                        hint: $hint,
                    });
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FormatValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pattern_field! {
    /// E-mail address such as `example@gmail.com`.
    EmailAddress {
        field: "email",
        pattern: r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$",
        max: 254,
        hint: "expected an address such as example@gmail.com",
    }
}

pattern_field! {
    /// Mobile number in the national `09XXXXXXXXX` format.
    PhoneNumber {
        field: "phone",
        pattern: r"^09\d{9}$",
        max: 11,
        hint: "expected the format 09121234567",
    }
}

pattern_field! {
    /// Ten-digit postal code written as two five-digit groups.
    PostalCode {
        field: "postcode",
        pattern: r"^\d{5} ?- ?\d{5}$",
        max: 13,
        hint: "expected two five-digit groups such as 12345-67890",
    }
}

pattern_field! {
    /// Stock keeping unit shared by products and their variants.
    Sku {
        field: "sku",
        pattern: r"^\d{5} ?- ?\d{5}$",
        max: 13,
        hint: "expected two five-digit groups such as 10001-20002",
    }
}

pattern_field! {
    /// Six hexadecimal digits without a leading `#`, e.g. `FF5733`.
    HexColour {
        field: "color_code",
        pattern: r"^[0-9A-Fa-f]{6}$",
        max: 6,
        hint: "expected exactly 6 hexadecimal characters such as FF5733",
    }
}

pattern_field! {
    /// CSS-style colour with a leading `#` in short or long form.
    SwatchColour {
        field: "color_code",
        pattern: r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$",
        max: 7,
        hint: "expected #RGB or #RRGGBB",
    }
}

//! UUID-backed identifiers for salon entities.

use std::fmt;

/// Raised when text is not a valid identifier of the named kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntityId {
    pub kind: &'static str,
}

impl fmt::Display for InvalidEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} id must be a valid UUID", self.kind)
    }
}

impl std::error::Error for InvalidEntityId {}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Parse the identifier from its textual UUID form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, $crate::domain::ids::InvalidEntityId> {
                let raw = id.as_ref();
                if raw.trim() != raw {
                    return Err($crate::domain::ids::InvalidEntityId { kind: $kind });
                }
                ::uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| $crate::domain::ids::InvalidEntityId { kind: $kind })
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::ids::InvalidEntityId;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_entity_id;

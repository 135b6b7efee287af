//! Closed string-valued choice sets.
//!
//! [`define_choice!`] declares an enum whose variants map one-to-one onto
//! the stored text values, with `FromStr`/`Display` and serde support.

use std::fmt;

/// Raised when text does not name any variant of a choice set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownChoice {}

macro_rules! define_choice {
    (
        $(#[$outer:meta])*
        pub enum $name:ident ($kind:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stored text form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::choice::UnknownChoice;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err($crate::domain::choice::UnknownChoice {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use define_choice;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    define_choice! {
        pub enum Flavour ("flavour") {
            Plain => "plain",
            SaltedCaramel => "salted_caramel",
        }
    }

    #[rstest]
    fn round_trips_text() {
        for flavour in Flavour::ALL {
            assert_eq!(Flavour::from_str(flavour.as_str()), Ok(*flavour));
        }
    }

    #[rstest]
    fn rejects_unknown_text() {
        let error = Flavour::from_str("mint").expect_err("unknown flavour");
        assert_eq!(error.kind, "flavour");
        assert_eq!(error.to_string(), "unknown flavour value: \"mint\"");
    }

    #[rstest]
    fn serialises_as_text() {
        let value = serde_json::to_value(Flavour::SaltedCaramel).expect("serialise");
        assert_eq!(value, serde_json::json!("salted_caramel"));
    }
}

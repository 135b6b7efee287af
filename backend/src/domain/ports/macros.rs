//! Helper macro for generating repository port error enums.
//!
//! Each variant names the [`crate::domain::Error`] constructor it maps to, so
//! services can propagate port failures with `?`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (@pattern $name:ident $variant:ident) => { $name::$variant };
    (@pattern $name:ident $variant:ident { $($field:ident : $ty:ty),* }) => { $name::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $code:ident : $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                let message = error.to_string();
                match error {
                    $(
                        define_port_error!(@pattern $name $variant $( { $($field : $ty),* } )?) => {
                            Self::$code(message)
                        }
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::ErrorCode;

    define_port_error! {
        pub enum LedgerPortError {
            Offline => service_unavailable: "ledger offline",
            Rejected { reason: String } => invalid_request: "ledger rejected entry: {reason}",
            Clash { field: String, count: u32 } => conflict: "{count} entries clash on {field}",
        }
    }

    #[rstest]
    fn constructors_accept_str_for_string_fields() {
        let err = LedgerPortError::rejected("closed period");
        assert_eq!(err.to_string(), "ledger rejected entry: closed period");
    }

    #[rstest]
    fn constructors_support_mixed_fields() {
        let err = LedgerPortError::clash("sku", 2_u32);
        assert_eq!(err.to_string(), "2 entries clash on sku");
    }

    #[rstest]
    #[case(LedgerPortError::offline(), ErrorCode::ServiceUnavailable)]
    #[case(LedgerPortError::rejected("x"), ErrorCode::InvalidRequest)]
    #[case(LedgerPortError::clash("sku", 1_u32), ErrorCode::Conflict)]
    fn converts_into_domain_error(#[case] error: LedgerPortError, #[case] code: ErrorCode) {
        let message = error.to_string();
        let domain: crate::domain::Error = error.into();
        assert_eq!(domain.code(), code);
        assert_eq!(domain.message(), message);
    }
}

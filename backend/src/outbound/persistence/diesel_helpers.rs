//! Shared helpers for Diesel repository implementations.
//!
//! This module provides common utilities for database access including:
//! - Error mapping from pool and Diesel errors to port errors
//! - Count casting between `INTEGER` columns and domain `u32` values
//! - Text decoding for stored choice values
//! - `ILIKE` pattern escaping for free-text search

use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, warn};

use super::pool::PoolError;

/// Constructors shared by every repository port error.
pub(crate) trait RepositoryFailure {
    fn connection_failure(message: String) -> Self;
    fn query_failure(message: String) -> Self;
    fn duplicate_field(field: String) -> Self;
}

/// Implement [`RepositoryFailure`] for port errors generated with
/// `Connection`, `Query`, and `Duplicate { field }` variants.
macro_rules! impl_repository_failure {
    ($($error:ty),+ $(,)?) => {
        $(
            impl $crate::outbound::persistence::diesel_helpers::RepositoryFailure for $error {
                fn connection_failure(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failure(message: String) -> Self {
                    Self::query(message)
                }

                fn duplicate_field(field: String) -> Self {
                    Self::duplicate(field)
                }
            }
        )+
    };
}

pub(crate) use impl_repository_failure;

/// Map pool errors to the port's connection error.
pub(crate) fn map_pool_error<E: RepositoryFailure>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            E::connection_failure(message)
        }
    }
}

/// Map Diesel errors to port errors.
///
/// Unique violations name the offending field, recovered from the
/// constraint name (`{table}_{field}_key`).
pub(crate) fn map_diesel_error<E: RepositoryFailure>(
    error: diesel::result::Error,
    table: &'static str,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, table, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            table,
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => E::query_failure("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failure("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            E::duplicate_field(constraint_field(table, info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection_failure("database connection error".to_owned())
        }
        _ => E::query_failure("database error".to_owned()),
    }
}

/// Field named by a unique constraint, `record` when it cannot be told.
pub(crate) fn constraint_field(table: &str, constraint: Option<&str>) -> String {
    let field = constraint
        .and_then(|name| name.strip_prefix(table))
        .and_then(|rest| rest.strip_prefix('_'))
        .map(|rest| match rest {
            "pkey" => "id",
            other => other.strip_suffix("_key").unwrap_or(other),
        })
        .filter(|field| !field.is_empty());
    field.unwrap_or("record").to_owned()
}

/// Store a domain count in an `INTEGER` column.
///
/// Counters are capped at `i32::MAX`: larger values are written as
/// `i32::MAX` and read back as that value.
pub(crate) fn count_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Read a count column that must never be negative.
pub(crate) fn count_from_db(value: i32, column: &'static str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} holds negative value {value}"))
}

/// Decode a stored choice, falling back to the default for unknown text.
pub(crate) fn choice_or_default<T>(raw: &str, column: &'static str) -> T
where
    T: FromStr + Default,
{
    raw.parse().unwrap_or_else(|_| {
        warn!(column, value = raw, "unrecognised stored choice, using default");
        T::default()
    })
}

/// Decode an optional stored choice; unknown text reads as absent.
pub(crate) fn optional_choice<T: FromStr>(raw: Option<&str>, column: &'static str) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(choice) => Some(choice),
        Err(_) => {
            warn!(column, value = raw, "unrecognised stored choice, ignoring");
            None
        }
    }
}

/// Decode a stored choice that has no sensible default.
pub(crate) fn required_choice<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|err: T::Err| err.to_string())
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserRepositoryError;
    use crate::domain::{Gender, Role};
    use rstest::rstest;

    #[rstest]
    #[case(Some("users_email_key"), "email")]
    #[case(Some("users_pkey"), "id")]
    #[case(Some("users_phone_key"), "phone")]
    #[case(Some("other_table_email_key"), "record")]
    #[case(None, "record")]
    fn constraint_names_resolve_to_fields(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(constraint_field("users", constraint), expected);
    }

    #[rstest]
    fn composite_constraints_keep_every_column() {
        assert_eq!(
            constraint_field("time_slots", Some("time_slots_staff_id_weekday_start_time_key")),
            "staff_id_weekday_start_time"
        );
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error: UserRepositoryError = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, UserRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let error: UserRepositoryError = map_diesel_error(diesel::result::Error::NotFound, "users");
        assert_eq!(error, UserRepositoryError::query("record not found"));
    }

    #[rstest]
    #[case("staff", Role::Staff)]
    #[case("superuser", Role::Customer)]
    fn choices_fall_back_to_default(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(choice_or_default::<Role>(raw, "users.role"), expected);
    }

    #[rstest]
    fn optional_choices_drop_unknown_text() {
        assert_eq!(optional_choice::<Gender>(Some("male"), "g"), Some(Gender::Male));
        assert_eq!(optional_choice::<Gender>(Some("unknown"), "g"), None);
        assert_eq!(optional_choice::<Gender>(None, "g"), None);
    }

    #[rstest]
    #[case(0, Ok(0))]
    #[case(42, Ok(42))]
    #[case(-1, Err("stock holds negative value -1".to_owned()))]
    fn counts_reject_negative_values(#[case] raw: i32, #[case] expected: Result<u32, String>) {
        assert_eq!(count_from_db(raw, "stock"), expected);
    }

    #[rstest]
    fn counts_saturate_when_stored() {
        assert_eq!(count_to_db(u32::MAX), i32::MAX);
        assert_eq!(count_to_db(7), 7);
    }

    #[rstest]
    #[case("0912", "%0912%")]
    #[case("50%_off", "%50\\%\\_off%")]
    #[case("a\\b", "%a\\\\b%")]
    fn search_terms_are_escaped(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(term), expected);
    }
}

//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: Uuid::parse_str(VALID_ID).expect("fixture uuid"),
        username: "sara.k".to_owned(),
        first_name: "Sara".to_owned(),
        last_name: "Karimi".to_owned(),
        email: "sara@example.com".to_owned(),
        phone: "09121234567".to_owned(),
        role: Role::Customer,
        gender: Gender::Female,
        address: Address {
            address: "12 Vali Asr".to_owned(),
            city: "Tehran".to_owned(),
            state: "Tehran".to_owned(),
        },
        postcode: "12345-67890".to_owned(),
        is_verified: false,
        receive_notification_code: true,
        is_superuser: false,
        is_active: true,
        birthday: None,
    }
}

#[rstest]
fn accepts_valid_draft(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    assert_eq!(user.id().to_string(), VALID_ID);
    assert_eq!(user.username().as_ref(), "sara.k");
    assert_eq!(user.to_string(), "sara.k");
}

#[rstest]
fn full_name_joins_first_and_last(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    assert_eq!(user.full_name(), "Sara Karimi");
}

#[rstest]
#[case("Sara", "", "Sara")]
#[case("", "Karimi", "Karimi")]
#[case("", "", "sara.k")]
#[case("  ", " ", "sara.k")]
fn full_name_trims_and_falls_back(
    mut draft: UserDraft,
    #[case] first: &str,
    #[case] last: &str,
    #[case] expected: &str,
) {
    draft.first_name = first.to_owned();
    draft.last_name = last.to_owned();
    let user = User::new(draft).expect("valid user");
    assert_eq!(user.full_name(), expected);
}

#[rstest]
#[case(Role::Customer, false, (true, false, false))]
#[case(Role::Staff, false, (false, true, false))]
#[case(Role::Admin, false, (false, false, true))]
#[case(Role::Customer, true, (true, false, true))]
fn role_predicates(
    mut draft: UserDraft,
    #[case] role: Role,
    #[case] superuser: bool,
    #[case] expected: (bool, bool, bool),
) {
    draft.role = role;
    draft.is_superuser = superuser;
    let user = User::new(draft).expect("valid user");
    assert_eq!(
        (user.is_customer(), user.is_staff_member(), user.is_admin()),
        expected
    );
}

#[rstest]
fn rejects_malformed_phone(mut draft: UserDraft) {
    draft.phone = "+98 912 123 4567".to_owned();
    let result = User::new(draft);
    assert!(matches!(
        result,
        Err(UserValidationError::Format(FormatValidationError::TooLong {
            field: "phone",
            ..
        }))
    ));
}

#[rstest]
fn rejects_malformed_email(mut draft: UserDraft) {
    draft.email = "sara-at-example".to_owned();
    assert!(matches!(
        User::new(draft),
        Err(UserValidationError::Format(FormatValidationError::Mismatch {
            field: "email",
            ..
        }))
    ));
}

#[rstest]
fn rejects_malformed_postcode(mut draft: UserDraft) {
    draft.postcode = "1234".to_owned();
    assert!(matches!(
        User::new(draft),
        Err(UserValidationError::Format(FormatValidationError::Mismatch {
            field: "postcode",
            ..
        }))
    ));
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
#[case("bad$char", UserValidationError::UsernameInvalidCharacters)]
fn rejects_invalid_usernames(
    mut draft: UserDraft,
    #[case] username: &str,
    #[case] expected: UserValidationError,
) {
    draft.username = username.to_owned();
    assert_eq!(User::new(draft), Err(expected));
}

#[rstest]
fn accepts_maximum_username_length(mut draft: UserDraft) {
    draft.username = "a".repeat(USERNAME_MAX);
    assert!(User::new(draft).is_ok());
}

#[rstest]
fn rejects_overlong_username(mut draft: UserDraft) {
    draft.username = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        User::new(draft),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn rejects_overlong_city(mut draft: UserDraft) {
    draft.address.city = "x".repeat(LOCALITY_MAX + 1);
    assert_eq!(
        User::new(draft),
        Err(UserValidationError::FieldTooLong {
            field: "city",
            max: LOCALITY_MAX,
        })
    );
}

#[rstest]
fn user_id_rejects_padded_input() {
    assert_eq!(
        UserId::new(format!(" {VALID_ID}")),
        Err(UserValidationError::InvalidId)
    );
    assert!(UserId::new(VALID_ID).is_ok());
}

#[rstest]
fn user_id_parses_from_str() {
    let parsed: UserId = VALID_ID.parse().expect("valid id");
    assert_eq!(parsed.to_string(), VALID_ID);
    assert_eq!(
        "not-a-uuid".parse::<UserId>(),
        Err(UserValidationError::InvalidId)
    );
}

#[rstest]
fn deserialise_applies_defaults() {
    let user: User = serde_json::from_value(json!({
        "id": VALID_ID,
        "username": "nima",
        "email": "nima@example.com",
        "phone": "09351234567",
        "postcode": "11111-22222",
    }))
    .expect("minimal payload");

    assert_eq!(user.role(), Role::Customer);
    assert_eq!(user.gender(), Gender::Other);
    assert!(user.receive_notification_code());
    assert!(user.is_active());
    assert!(!user.is_verified());
}

#[rstest]
fn deserialise_rejects_invalid_fields() {
    let result: Result<User, _> = serde_json::from_value(json!({
        "id": VALID_ID,
        "username": "nima",
        "email": "nima@example.com",
        "phone": "12345",
        "postcode": "11111-22222",
    }));
    assert!(result.is_err());
}

#[rstest]
fn serialisation_round_trips(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise");
    assert_eq!(value["role"], json!("customer"));
    let parsed: User = serde_json::from_value(value).expect("deserialise");
    assert_eq!(parsed, user);
}

#[rstest]
fn into_draft_preserves_fields(draft: UserDraft) {
    let user = User::new(draft.clone()).expect("valid user");
    assert_eq!(user.into_draft(), draft);
}

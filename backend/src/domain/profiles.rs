//! Role-specific profiles attached one-to-one to user accounts.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::choice::define_choice;
use super::rating::{Rating, RatingValidationError};
use super::service_catalogue::ServiceId;
use super::user::{ADDRESS_MAX, Address, LOCALITY_MAX, UserId};
use super::validation::{self, FieldError};

/// Maximum length of the free-text profile postcode.
pub const PROFILE_POSTCODE_MAX: usize = 20;

/// Validation errors returned by profile constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    Field(FieldError),
    Rating(RatingValidationError),
    BlankCertification { index: usize },
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(error) => error.fmt(f),
            Self::Rating(error) => write!(f, "staff_profile.rating: {error}"),
            Self::BlankCertification { index } => {
                write!(f, "staff_profile.certifications[{index}] must not be blank")
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}

impl From<FieldError> for ProfileValidationError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

define_choice! {
    /// Skin type recorded for treatment recommendations.
    #[derive(Default)]
    pub enum SkinType ("skin type") {
        #[default]
        Normal => "normal",
        Dry => "dry",
        Oily => "oily",
        Sensitive => "sensitive",
        Combination => "combination",
    }
}

define_choice! {
    /// Hair texture.
    #[derive(Default)]
    pub enum HairType ("hair type") {
        #[default]
        Normal => "normal",
        Wavy => "wavy",
        Curly => "curly",
        Coily => "coily",
    }
}

define_choice! {
    /// Natural or current hair colour.
    #[derive(Default)]
    pub enum HairColour ("hair colour") {
        #[default]
        Black => "black",
        White => "white",
        Red => "red",
        Green => "green",
        Blue => "blue",
        Purple => "purple",
        Cyan => "cyan",
        Magenta => "magenta",
        Yellow => "yellow",
        Brown => "brown",
        Blonde => "blonde",
        Other => "other",
    }
}

define_choice! {
    /// Hair length.
    #[derive(Default)]
    pub enum HairLength ("hair length") {
        #[default]
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

/// Input payload for [`CustomerProfile::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct CustomerProfileDraft {
    pub user_id: Uuid,
    pub skin_type: SkinType,
    pub hair_type: HairType,
    pub hair_color: HairColour,
    pub hair_length: HairLength,
    pub face_image: Option<String>,
    pub face_analysis_data: Option<Value>,
    pub total_reservations: u32,
    pub last_reservation_date: Option<DateTime<Utc>>,
    pub is_vip: bool,
    pub notes: Option<String>,
    pub wants_sms_notifications: bool,
    pub wants_email_notifications: bool,
    pub address: Address,
    pub postcode: String,
}

/// Beauty profile and booking history of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    user_id: UserId,
    skin_type: SkinType,
    hair_type: HairType,
    hair_color: HairColour,
    hair_length: HairLength,
    face_image: Option<String>,
    face_analysis_data: Option<Value>,
    total_reservations: u32,
    last_reservation_date: Option<DateTime<Utc>>,
    is_vip: bool,
    notes: Option<String>,
    wants_sms_notifications: bool,
    wants_email_notifications: bool,
    address: Address,
    postcode: String,
}

impl CustomerProfile {
    /// Validate and construct a customer profile.
    pub fn new(draft: CustomerProfileDraft) -> Result<Self, ProfileValidationError> {
        Self::try_from(draft)
    }

    /// Default profile for a freshly registered customer.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            skin_type: SkinType::default(),
            hair_type: HairType::default(),
            hair_color: HairColour::default(),
            hair_length: HairLength::default(),
            face_image: None,
            face_analysis_data: None,
            total_reservations: 0,
            last_reservation_date: None,
            is_vip: false,
            notes: None,
            wants_sms_notifications: false,
            wants_email_notifications: false,
            address: Address::default(),
            postcode: String::new(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
    pub fn skin_type(&self) -> SkinType {
        self.skin_type
    }
    pub fn hair_type(&self) -> HairType {
        self.hair_type
    }
    pub fn hair_color(&self) -> HairColour {
        self.hair_color
    }
    pub fn hair_length(&self) -> HairLength {
        self.hair_length
    }
    pub fn face_image(&self) -> Option<&str> {
        self.face_image.as_deref()
    }
    pub fn face_analysis_data(&self) -> Option<&Value> {
        self.face_analysis_data.as_ref()
    }
    pub fn total_reservations(&self) -> u32 {
        self.total_reservations
    }
    pub fn last_reservation_date(&self) -> Option<DateTime<Utc>> {
        self.last_reservation_date
    }
    pub fn is_vip(&self) -> bool {
        self.is_vip
    }
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
    pub fn wants_sms_notifications(&self) -> bool {
        self.wants_sms_notifications
    }
    pub fn wants_email_notifications(&self) -> bool {
        self.wants_email_notifications
    }
    pub fn address(&self) -> &Address {
        &self.address
    }
    pub fn postcode(&self) -> &str {
        self.postcode.as_str()
    }

    /// Count a new reservation made at `at`.
    pub fn record_reservation(&mut self, at: DateTime<Utc>) {
        self.total_reservations = self.total_reservations.saturating_add(1);
        self.last_reservation_date = Some(at);
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> CustomerProfileDraft {
        CustomerProfileDraft {
            user_id: *self.user_id.as_uuid(),
            skin_type: self.skin_type,
            hair_type: self.hair_type,
            hair_color: self.hair_color,
            hair_length: self.hair_length,
            face_image: self.face_image,
            face_analysis_data: self.face_analysis_data,
            total_reservations: self.total_reservations,
            last_reservation_date: self.last_reservation_date,
            is_vip: self.is_vip,
            notes: self.notes,
            wants_sms_notifications: self.wants_sms_notifications,
            wants_email_notifications: self.wants_email_notifications,
            address: self.address,
            postcode: self.postcode,
        }
    }
}

impl TryFrom<CustomerProfileDraft> for CustomerProfile {
    type Error = ProfileValidationError;

    fn try_from(draft: CustomerProfileDraft) -> Result<Self, Self::Error> {
        validation::max_chars(&draft.address.address, "customer_profile.address", ADDRESS_MAX)?;
        validation::max_chars(&draft.address.city, "customer_profile.city", LOCALITY_MAX)?;
        validation::max_chars(&draft.address.state, "customer_profile.state", LOCALITY_MAX)?;
        validation::max_chars(
            &draft.postcode,
            "customer_profile.postcode",
            PROFILE_POSTCODE_MAX,
        )?;

        Ok(Self {
            user_id: UserId::from_uuid(draft.user_id),
            skin_type: draft.skin_type,
            hair_type: draft.hair_type,
            hair_color: draft.hair_color,
            hair_length: draft.hair_length,
            face_image: draft.face_image.filter(|path| !path.trim().is_empty()),
            face_analysis_data: draft.face_analysis_data,
            total_reservations: draft.total_reservations,
            last_reservation_date: draft.last_reservation_date,
            is_vip: draft.is_vip,
            notes: draft.notes,
            wants_sms_notifications: draft.wants_sms_notifications,
            wants_email_notifications: draft.wants_email_notifications,
            address: draft.address,
            postcode: draft.postcode,
        })
    }
}

impl<'de> Deserialize<'de> for CustomerProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CustomerProfileDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

fn default_true() -> bool {
    true
}

/// Input payload for [`StaffProfile::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfileDraft {
    pub user_id: Uuid,
    #[serde(default)]
    pub specialties: BTreeSet<Uuid>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub working_hours: Map<String, Value>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Public profile of a staff member, including their review average.
///
/// `rating` and `total_reviews` only change through
/// [`StaffProfile::update_rating`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    user_id: UserId,
    specialties: BTreeSet<ServiceId>,
    experience_years: u32,
    bio: Option<String>,
    working_hours: Map<String, Value>,
    is_active: bool,
    rating: Rating,
    total_reviews: u32,
    certifications: Vec<String>,
}

impl StaffProfile {
    /// Validate and construct a staff profile.
    pub fn new(draft: StaffProfileDraft) -> Result<Self, ProfileValidationError> {
        Self::try_from(draft)
    }

    /// Empty profile for a newly appointed staff member.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            specialties: BTreeSet::new(),
            experience_years: 0,
            bio: None,
            working_hours: Map::new(),
            is_active: true,
            rating: Rating::MIN,
            total_reviews: 0,
            certifications: Vec::new(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
    pub fn specialties(&self) -> &BTreeSet<ServiceId> {
        &self.specialties
    }
    pub fn experience_years(&self) -> u32 {
        self.experience_years
    }
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }
    pub fn working_hours(&self) -> &Map<String, Value> {
        &self.working_hours
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn rating(&self) -> Rating {
        self.rating
    }
    pub fn total_reviews(&self) -> u32 {
        self.total_reviews
    }
    pub fn certifications(&self) -> &[String] {
        self.certifications.as_slice()
    }

    /// `true` when the staff member is listed as performing `service`.
    pub fn specialises_in(&self, service: ServiceId) -> bool {
        self.specialties.contains(&service)
    }

    /// Fold a new review score into the running average.
    ///
    /// The stored average is rounded to two places, halves to even.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use salon_backend::domain::{Rating, StaffProfile, UserId};
    ///
    /// let mut profile = StaffProfile::for_user(UserId::random());
    /// profile.update_rating(Rating::from_stars(5)).expect("in range");
    /// profile.update_rating(Rating::from_stars(4)).expect("in range");
    /// assert_eq!(profile.rating().value(), Decimal::new(450, 2));
    /// assert_eq!(profile.total_reviews(), 2);
    /// ```
    pub fn update_rating(&mut self, score: Rating) -> Result<Rating, RatingValidationError> {
        let reviews = Decimal::from(self.total_reviews);
        let total = self.rating.value() * reviews + score.value();
        let rating = Rating::quantized(total / (reviews + Decimal::ONE))?;
        self.rating = rating;
        self.total_reviews = self.total_reviews.saturating_add(1);
        Ok(rating)
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> StaffProfileDraft {
        StaffProfileDraft {
            user_id: *self.user_id.as_uuid(),
            specialties: self.specialties.iter().map(|id| *id.as_uuid()).collect(),
            experience_years: self.experience_years,
            bio: self.bio,
            working_hours: self.working_hours,
            is_active: self.is_active,
            rating: self.rating.value(),
            total_reviews: self.total_reviews,
            certifications: self.certifications,
        }
    }
}

impl TryFrom<StaffProfileDraft> for StaffProfile {
    type Error = ProfileValidationError;

    fn try_from(draft: StaffProfileDraft) -> Result<Self, Self::Error> {
        let rating = Rating::new(draft.rating).map_err(ProfileValidationError::Rating)?;
        if let Some(index) = draft
            .certifications
            .iter()
            .position(|entry| entry.trim().is_empty())
        {
            return Err(ProfileValidationError::BlankCertification { index });
        }

        Ok(Self {
            user_id: UserId::from_uuid(draft.user_id),
            specialties: draft
                .specialties
                .into_iter()
                .map(ServiceId::from_uuid)
                .collect(),
            experience_years: draft.experience_years,
            bio: draft.bio,
            working_hours: draft.working_hours,
            is_active: draft.is_active,
            rating,
            total_reviews: draft.total_reviews,
            certifications: draft.certifications,
        })
    }
}

impl<'de> Deserialize<'de> for StaffProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        StaffProfileDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;

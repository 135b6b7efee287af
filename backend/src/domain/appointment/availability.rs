//! Weekly staff availability and salon-wide holidays.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppointmentValidationError;
use crate::domain::choice::define_choice;
use crate::domain::ids::define_entity_id;
use crate::domain::user::UserId;
use crate::domain::validation;

/// Maximum length of a holiday name.
pub const HOLIDAY_NAME_MAX: usize = 100;

define_entity_id!(
    /// Identifier of a [`TimeSlot`].
    TimeSlotId,
    "time slot"
);
define_entity_id!(
    /// Identifier of a [`Holiday`].
    HolidayId,
    "holiday"
);

define_choice! {
    /// Day of the week a time slot recurs on.
    pub enum Weekday ("weekday") {
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
        Sunday => "Sunday",
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

/// Input payload for [`TimeSlot::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TimeSlotDraft {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub weekday: Weekday,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_available: bool,
}

/// Recurring weekly window declared by a staff member.
///
/// Unique per staff member, weekday, and start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    id: TimeSlotId,
    staff_id: UserId,
    weekday: Weekday,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    is_available: bool,
}

impl TimeSlot {
    /// Validate and construct a time slot.
    pub fn new(draft: TimeSlotDraft) -> Result<Self, AppointmentValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> TimeSlotId {
        self.id
    }
    pub fn staff_id(&self) -> UserId {
        self.staff_id
    }
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// `"{staff} - {weekday} ({start} - {end})"`; unset times render empty.
    pub fn label(&self, staff_name: &str) -> String {
        let render = |time: Option<NaiveTime>| time.map(|t| t.to_string()).unwrap_or_default();
        format!(
            "{staff_name} - {} ({} - {})",
            self.weekday,
            render(self.start_time),
            render(self.end_time)
        )
    }
}

impl TryFrom<TimeSlotDraft> for TimeSlot {
    type Error = AppointmentValidationError;

    fn try_from(draft: TimeSlotDraft) -> Result<Self, Self::Error> {
        if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
            if end <= start {
                return Err(AppointmentValidationError::SlotEndsBeforeStart { start, end });
            }
        }
        Ok(Self {
            id: TimeSlotId::from_uuid(draft.id),
            staff_id: UserId::from_uuid(draft.staff_id),
            weekday: draft.weekday,
            start_time: draft.start_time,
            end_time: draft.end_time,
            is_available: draft.is_available,
        })
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        TimeSlotDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

fn default_true() -> bool {
    true
}

/// Input payload for [`Holiday::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct HolidayDraft {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Day the salon is closed. At most one holiday per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    id: HolidayId,
    name: String,
    date: NaiveDate,
    description: String,
    is_active: bool,
}

impl Holiday {
    /// Validate and construct a holiday.
    pub fn new(draft: HolidayDraft) -> Result<Self, AppointmentValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> HolidayId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn date(&self) -> NaiveDate {
        self.date
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<HolidayDraft> for Holiday {
    type Error = AppointmentValidationError;

    fn try_from(draft: HolidayDraft) -> Result<Self, Self::Error> {
        let name = validation::bounded_name(draft.name, "holiday.name", HOLIDAY_NAME_MAX)?;
        Ok(Self {
            id: HolidayId::from_uuid(draft.id),
            name,
            date: draft.date,
            description: draft.description,
            is_active: draft.is_active,
        })
    }
}

impl<'de> Deserialize<'de> for Holiday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        HolidayDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

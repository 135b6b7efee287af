//! Running review average for staff members.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::ProfileRepository;
use crate::domain::{Error, Rating, StaffProfile, UserId};

/// Folds customer review scores into staff profiles.
#[derive(Clone)]
pub struct StaffRatingService<P> {
    profiles: Arc<P>,
}

impl<P> StaffRatingService<P> {
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> StaffRatingService<P>
where
    P: ProfileRepository,
{
    /// Add `score` to the staff member's average and persist the profile.
    ///
    /// # Errors
    /// `not_found` when `user_id` has no staff profile.
    pub async fn rate(&self, user_id: UserId, score: Rating) -> Result<StaffProfile, Error> {
        let mut profile = self
            .profiles
            .find_staff_profile(&user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("staff profile for user {user_id} not found")))?;

        let average = profile
            .update_rating(score)
            .map_err(|err| Error::internal(format!("rating average out of range: {err}")))?;
        self.profiles.upsert_staff_profile(&profile).await?;
        info!(
            %user_id,
            %score,
            %average,
            total_reviews = profile.total_reviews(),
            "staff rating updated"
        );
        Ok(profile)
    }
}

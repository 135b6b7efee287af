//! Wishlists and product page views.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProductId, ProductViewId, ShopValidationError, WishlistId};
use crate::domain::user::UserId;
use crate::domain::validation;

/// Maximum length of a browser session key.
pub const SESSION_KEY_MAX: usize = 255;

/// A product saved by a user. Each user lists a product at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: WishlistId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub added_at: DateTime<Utc>,
}

impl Wishlist {
    /// New wishlist entry added at `now`.
    pub fn new(user_id: UserId, product_id: ProductId, now: DateTime<Utc>) -> Self {
        Self {
            id: WishlistId::random(),
            user_id,
            product_id,
            added_at: now,
        }
    }
}

/// Input payload for [`ProductView::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductViewDraft {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub ip_address: IpAddr,
    #[serde(default)]
    pub session_key: String,
}

/// One visit to a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    id: ProductViewId,
    product_id: ProductId,
    user_id: UserId,
    ip_address: IpAddr,
    session_key: String,
    viewed_at: DateTime<Utc>,
}

impl ProductView {
    /// Validate and record a view at `now`.
    pub fn new(draft: ProductViewDraft, now: DateTime<Utc>) -> Result<Self, ShopValidationError> {
        validation::max_chars(&draft.session_key, "product_view.session_key", SESSION_KEY_MAX)?;
        Ok(Self {
            id: ProductViewId::random(),
            product_id: draft.product_id,
            user_id: draft.user_id,
            ip_address: draft.ip_address,
            session_key: draft.session_key,
            viewed_at: now,
        })
    }

    /// Rebuild a stored view.
    pub fn from_parts(id: ProductViewId, draft: ProductViewDraft, viewed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id: draft.product_id,
            user_id: draft.user_id,
            ip_address: draft.ip_address,
            session_key: draft.session_key,
            viewed_at,
        }
    }

    pub fn id(&self) -> ProductViewId {
        self.id
    }
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
    pub fn ip_address(&self) -> IpAddr {
        self.ip_address
    }
    pub fn session_key(&self) -> &str {
        self.session_key.as_str()
    }
    pub fn viewed_at(&self) -> DateTime<Utc> {
        self.viewed_at
    }
}

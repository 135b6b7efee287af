//! PostgreSQL-backed `EngagementRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EngagementRepository, EngagementRepositoryError};
use crate::domain::{ProductId, ProductView, UserId, Wishlist, WishlistId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{ProductViewRow, WishlistRow};
use super::pool::DbPool;
use super::schema::{product_views, wishlists};

/// Diesel-backed implementation of the `EngagementRepository` port.
#[derive(Clone)]
pub struct DieselEngagementRepository {
    pool: DbPool,
}

impl DieselEngagementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn wishlist_to_row(entry: &Wishlist) -> WishlistRow {
    WishlistRow {
        id: *entry.id.as_uuid(),
        user_id: *entry.user_id.as_uuid(),
        product_id: *entry.product_id.as_uuid(),
        added_at: entry.added_at,
    }
}

fn row_to_wishlist(row: WishlistRow) -> Wishlist {
    Wishlist {
        id: WishlistId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        product_id: ProductId::from_uuid(row.product_id),
        added_at: row.added_at,
    }
}

fn view_to_row(view: &ProductView) -> ProductViewRow {
    ProductViewRow {
        id: *view.id().as_uuid(),
        product_id: *view.product_id().as_uuid(),
        user_id: *view.user_id().as_uuid(),
        ip_address: view.ip_address().to_string(),
        session_key: view.session_key().to_owned(),
        viewed_at: view.viewed_at(),
    }
}

#[async_trait]
impl EngagementRepository for DieselEngagementRepository {
    async fn add_to_wishlist(&self, entry: &Wishlist) -> Result<(), EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The (user_id, product_id) unique index reports repeats as duplicates.
        diesel::insert_into(wishlists::table)
            .values(&wishlist_to_row(entry))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "wishlists"))
    }

    async fn remove_from_wishlist(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            wishlists::table
                .filter(wishlists::user_id.eq(user_id.as_uuid()))
                .filter(wishlists::product_id.eq(product_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "wishlists"))?;

        Ok(removed > 0)
    }

    async fn list_wishlist(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Wishlist>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WishlistRow> = wishlists::table
            .filter(wishlists::user_id.eq(user_id.as_uuid()))
            .select(WishlistRow::as_select())
            .order((wishlists::added_at.desc(), wishlists::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "wishlists"))?;

        Ok(rows.into_iter().map(row_to_wishlist).collect())
    }

    async fn record_view(&self, view: &ProductView) -> Result<(), EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(product_views::table)
            .values(&view_to_row(view))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "product_views"))
    }

    async fn count_views(&self, product_id: &ProductId) -> Result<u64, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = product_views::table
            .filter(product_views::product_id.eq(product_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "product_views"))?;

        u64::try_from(total).map_err(|_| {
            EngagementRepositoryError::query(format!("negative view count {total}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductViewDraft;
    use chrono::Utc;
    use rstest::rstest;
    use std::net::{IpAddr, Ipv6Addr};

    #[rstest]
    fn wishlist_entries_survive_a_row_trip() {
        let entry = Wishlist::new(UserId::random(), ProductId::random(), Utc::now());
        assert_eq!(row_to_wishlist(wishlist_to_row(&entry)), entry);
    }

    #[rstest]
    #[case(IpAddr::from([10, 0, 0, 7]), "10.0.0.7")]
    #[case(IpAddr::V6(Ipv6Addr::LOCALHOST), "::1")]
    fn view_addresses_are_stored_as_text(#[case] address: IpAddr, #[case] expected: &str) {
        let view = ProductView::new(
            ProductViewDraft {
                product_id: ProductId::random(),
                user_id: UserId::random(),
                ip_address: address,
                session_key: "abc123".to_owned(),
            },
            Utc::now(),
        )
        .expect("valid view");

        let row = view_to_row(&view);

        assert_eq!(row.ip_address, expected);
        assert_eq!(row.session_key, "abc123");
    }
}

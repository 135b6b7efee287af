//! PostgreSQL-backed `ServiceCatalogueRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ServiceCatalogueRepository, ServiceCatalogueRepositoryError, ServiceListQuery,
};
use crate::domain::{
    Service, ServiceCategory, ServiceCategoryDraft, ServiceCategoryId, ServiceDraft, ServiceId,
};

use super::diesel_helpers::{
    contains_pattern, count_from_db, count_to_db, map_diesel_error, map_pool_error,
};
use super::models::{ServiceCategoryRow, ServiceRow};
use super::pool::DbPool;
use super::schema::{service_categories, services};

/// Diesel-backed implementation of the `ServiceCatalogueRepository` port.
#[derive(Clone)]
pub struct DieselServiceCatalogueRepository {
    pool: DbPool,
}

impl DieselServiceCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_row(table: &str, detail: impl std::fmt::Display) -> ServiceCatalogueRepositoryError {
    ServiceCatalogueRepositoryError::query(format!("stored {table} row is invalid: {detail}"))
}

fn category_to_row(category: &ServiceCategory) -> ServiceCategoryRow {
    let draft = category.clone().into_draft();
    ServiceCategoryRow {
        id: draft.id,
        name: draft.name,
        slug: draft.slug.unwrap_or_default(),
        description: draft.description,
        icon: draft.icon,
        color_code: draft.color_code,
        display_order: count_to_db(draft.order),
        is_featured: draft.is_featured,
        is_active: draft.is_active,
    }
}

fn row_to_category(
    row: ServiceCategoryRow,
) -> Result<ServiceCategory, ServiceCatalogueRepositoryError> {
    let order = count_from_db(row.display_order, "service_categories.display_order")
        .map_err(|err| invalid_row("service_categories", err))?;
    ServiceCategory::new(ServiceCategoryDraft {
        id: row.id,
        name: row.name,
        slug: Some(row.slug),
        description: row.description,
        icon: row.icon,
        color_code: row.color_code,
        order,
        is_featured: row.is_featured,
        is_active: row.is_active,
    })
    .map_err(|err| invalid_row("service_categories", err))
}

fn service_to_row(service: &Service) -> ServiceRow {
    let draft = service.clone().into_draft();
    ServiceRow {
        id: draft.id,
        category_id: draft.category_id,
        name: draft.name,
        slug: draft.slug.unwrap_or_default(),
        description: draft.description,
        price: draft.price,
        discount_price: draft.discount_price,
        duration_minutes: count_to_db(draft.duration_minutes),
        view_count: count_to_db(draft.view_count),
        booking_count: count_to_db(draft.booking_count),
        rating: draft.rating,
        is_active: draft.is_active,
        is_featured: draft.is_featured,
    }
}

fn row_to_service(row: ServiceRow) -> Result<Service, ServiceCatalogueRepositoryError> {
    let count = |value: i32, column: &'static str| {
        count_from_db(value, column).map_err(|err| invalid_row("services", err))
    };
    Service::new(ServiceDraft {
        id: row.id,
        category_id: row.category_id,
        name: row.name,
        slug: Some(row.slug),
        description: row.description,
        price: row.price,
        discount_price: row.discount_price,
        duration_minutes: count(row.duration_minutes, "services.duration_minutes")?,
        view_count: count(row.view_count, "services.view_count")?,
        booking_count: count(row.booking_count, "services.booking_count")?,
        rating: row.rating,
        is_active: row.is_active,
        is_featured: row.is_featured,
    })
    .map_err(|err| invalid_row("services", err))
}

#[async_trait]
impl ServiceCatalogueRepository for DieselServiceCatalogueRepository {
    async fn upsert_category(
        &self,
        category: &ServiceCategory,
    ) -> Result<(), ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = category_to_row(category);

        diesel::insert_into(service_categories::table)
            .values(&row)
            .on_conflict(service_categories::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "service_categories"))
    }

    async fn find_category(
        &self,
        id: &ServiceCategoryId,
    ) -> Result<Option<ServiceCategory>, ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = service_categories::table
            .filter(service_categories::id.eq(id.as_uuid()))
            .select(ServiceCategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "service_categories"))?;

        row.map(row_to_category).transpose()
    }

    async fn list_categories(
        &self,
        active_only: bool,
    ) -> Result<Vec<ServiceCategory>, ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = service_categories::table
            .select(ServiceCategoryRow::as_select())
            .into_boxed();
        if active_only {
            statement = statement.filter(service_categories::is_active.eq(true));
        }
        let rows = statement
            .order((service_categories::display_order.asc(), service_categories::name.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "service_categories"))?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn upsert_service(&self, service: &Service) -> Result<(), ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = service_to_row(service);

        diesel::insert_into(services::table)
            .values(&row)
            .on_conflict(services::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "services"))
    }

    async fn find_service(
        &self,
        id: &ServiceId,
    ) -> Result<Option<Service>, ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = services::table
            .filter(services::id.eq(id.as_uuid()))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "services"))?;

        row.map(row_to_service).transpose()
    }

    async fn list_services(
        &self,
        query: &ServiceListQuery,
    ) -> Result<Vec<Service>, ServiceCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = services::table.select(ServiceRow::as_select()).into_boxed();
        if let Some(category) = query.category_id {
            statement = statement.filter(services::category_id.eq(*category.as_uuid()));
        }
        if query.active_only {
            statement = statement.filter(services::is_active.eq(true));
        }
        if let Some(term) = query.search.as_deref() {
            let pattern = contains_pattern(term);
            let matching_categories = service_categories::table
                .filter(service_categories::name.ilike(pattern.clone()))
                .select(service_categories::id);
            statement = statement.filter(
                services::name
                    .ilike(pattern)
                    .or(services::category_id.eq_any(matching_categories)),
            );
        }

        let rows = statement
            .order((services::created_at.desc(), services::id.asc()))
            .limit(i64::from(query.page.limit()))
            .offset(i64::from(query.page.offset()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "services"))?;

        rows.into_iter().map(row_to_service).collect()
    }
}

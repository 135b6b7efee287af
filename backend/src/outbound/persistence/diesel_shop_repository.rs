//! PostgreSQL-backed `ShopRepository` implementation.
//!
//! Brands, categories, products, and their images, variants, and tags share
//! one adapter because the shop service reads across all of them.

use async_trait::async_trait;
use diesel::dsl;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductListQuery, ShopRepository, ShopRepositoryError};
use crate::domain::{
    Brand, BrandDraft, Category, CategoryDraft, CategoryId, Product, ProductDraft, ProductId,
    ProductImage, ProductImageDraft, ProductVariant, ProductVariantDraft, ProductVariantId, Tag,
    TagDraft,
};

use super::diesel_helpers::{
    choice_or_default, contains_pattern, count_from_db, count_to_db, map_diesel_error,
    map_pool_error, optional_choice,
};
use super::models::{
    BrandRow, CategoryRow, ProductImageRow, ProductRow, ProductVariantRow, TagRow,
};
use super::pool::DbPool;
use super::schema::{brands, categories, product_images, product_variants, products, tags};

/// Diesel-backed implementation of the `ShopRepository` port.
#[derive(Clone)]
pub struct DieselShopRepository {
    pool: DbPool,
}

impl DieselShopRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_row(table: &str, detail: impl std::fmt::Display) -> ShopRepositoryError {
    ShopRepositoryError::query(format!("stored {table} row is invalid: {detail}"))
}

fn optional_count(
    value: Option<i32>,
    column: &'static str,
    table: &str,
) -> Result<Option<u32>, ShopRepositoryError> {
    value
        .map(|raw| count_from_db(raw, column))
        .transpose()
        .map_err(|err| invalid_row(table, err))
}

fn brand_to_row(brand: &Brand) -> BrandRow {
    BrandRow {
        id: *brand.id().as_uuid(),
        name: brand.name().to_owned(),
        slug: brand.slug().as_ref().to_owned(),
        description: brand.description().map(str::to_owned),
        country: brand.country().map(|country| country.as_str().to_owned()),
        website: brand.website().map(ToString::to_string),
        is_active: brand.is_active(),
    }
}

fn row_to_brand(row: BrandRow) -> Result<Brand, ShopRepositoryError> {
    Brand::new(BrandDraft {
        id: row.id,
        name: row.name,
        slug: Some(row.slug),
        description: row.description,
        country: optional_choice(row.country.as_deref(), "brands.country"),
        website: row.website,
        is_active: row.is_active,
    })
    .map_err(|err| invalid_row("brands", err))
}

fn category_to_row(category: &Category) -> CategoryRow {
    let draft = category.clone().into_draft();
    CategoryRow {
        id: draft.id,
        name: draft.name,
        slug: draft.slug.unwrap_or_default(),
        parent_id: draft.parent_id,
        description: draft.description,
        icon: draft.icon,
        display_order: draft.order.map(count_to_db),
        is_active: draft.is_active,
    }
}

fn row_to_category(row: CategoryRow) -> Result<Category, ShopRepositoryError> {
    let order = optional_count(row.display_order, "categories.display_order", "categories")?;
    Category::new(CategoryDraft {
        id: row.id,
        name: row.name,
        slug: Some(row.slug),
        parent_id: row.parent_id,
        description: row.description,
        icon: row.icon,
        order,
        is_active: row.is_active,
    })
    .map_err(|err| invalid_row("categories", err))
}

fn product_to_row(product: &Product) -> ProductRow {
    let draft = product.clone().into_draft();
    ProductRow {
        id: draft.id,
        name: draft.name,
        slug: draft.slug.unwrap_or_default(),
        category_id: draft.category_id,
        brand_id: draft.brand_id,
        description: draft.description,
        price: draft.price,
        discount_price: draft.discount_price,
        cost_price: draft.cost_price,
        stock: draft.stock.map(count_to_db),
        low_stock_threshold: count_to_db(draft.low_stock_threshold),
        sku: draft.sku,
        barcode: draft.barcode,
        weight: draft.weight,
        volume: draft.volume,
        ingredients: draft.ingredients.map(|value| value.as_str().to_owned()),
        how_to_use: draft.how_to_use.map(|value| value.as_str().to_owned()),
        features: draft.features.map(|value| value.as_str().to_owned()),
        suitable_for_skin: draft.suitable_for_skin.as_str().to_owned(),
        view_count: count_to_db(draft.view_count),
        sales_count: count_to_db(draft.sales_count),
        rating: draft.rating,
        rating_count: count_to_db(draft.rating_count),
        is_active: draft.is_active,
        is_featured: draft.is_featured,
        is_available: draft.is_available,
    }
}

fn row_to_product(row: ProductRow) -> Result<Product, ShopRepositoryError> {
    let count = |value: i32, column: &'static str| {
        count_from_db(value, column).map_err(|err| invalid_row("products", err))
    };
    let draft = ProductDraft {
        id: row.id,
        name: row.name,
        slug: Some(row.slug),
        category_id: row.category_id,
        brand_id: row.brand_id,
        description: row.description,
        price: row.price,
        discount_price: row.discount_price,
        cost_price: row.cost_price,
        stock: optional_count(row.stock, "products.stock", "products")?,
        low_stock_threshold: count(row.low_stock_threshold, "products.low_stock_threshold")?,
        sku: row.sku,
        barcode: row.barcode,
        weight: row.weight,
        volume: row.volume,
        ingredients: optional_choice(row.ingredients.as_deref(), "products.ingredients"),
        how_to_use: optional_choice(row.how_to_use.as_deref(), "products.how_to_use"),
        features: optional_choice(row.features.as_deref(), "products.features"),
        suitable_for_skin: choice_or_default(
            &row.suitable_for_skin,
            "products.suitable_for_skin",
        ),
        view_count: count(row.view_count, "products.view_count")?,
        sales_count: count(row.sales_count, "products.sales_count")?,
        rating: row.rating,
        rating_count: count(row.rating_count, "products.rating_count")?,
        is_active: row.is_active,
        is_featured: row.is_featured,
        is_available: row.is_available,
    };
    Product::new(draft).map_err(|err| invalid_row("products", err))
}

fn image_to_row(image: &ProductImage) -> ProductImageRow {
    ProductImageRow {
        id: *image.id().as_uuid(),
        product_id: *image.product_id().as_uuid(),
        alt_text: image.alt_text().to_owned(),
        display_order: image.order().map(count_to_db),
    }
}

fn row_to_image(row: ProductImageRow) -> Result<ProductImage, ShopRepositoryError> {
    let order = optional_count(row.display_order, "product_images.display_order", "product_images")?;
    ProductImage::new(ProductImageDraft {
        id: row.id,
        product_id: row.product_id,
        alt_text: row.alt_text,
        order,
    })
    .map_err(|err| invalid_row("product_images", err))
}

fn variant_to_row(variant: &ProductVariant) -> ProductVariantRow {
    ProductVariantRow {
        id: *variant.id().as_uuid(),
        product_id: *variant.product_id().as_uuid(),
        name: variant.name().to_owned(),
        sku: variant.sku().as_ref().to_owned(),
        color_code: variant.color_code().as_ref().to_owned(),
        price_adjustment: variant.price_adjustment().amount(),
        stock: variant.stock().map(count_to_db),
        is_active: variant.is_active(),
    }
}

fn row_to_variant(row: ProductVariantRow) -> Result<ProductVariant, ShopRepositoryError> {
    let stock = optional_count(row.stock, "product_variants.stock", "product_variants")?;
    ProductVariant::new(ProductVariantDraft {
        id: row.id,
        product_id: row.product_id,
        name: row.name,
        sku: row.sku,
        color_code: row.color_code,
        price_adjustment: row.price_adjustment,
        stock,
        is_active: row.is_active,
    })
    .map_err(|err| invalid_row("product_variants", err))
}

fn tag_to_row(tag: &Tag) -> TagRow {
    TagRow {
        id: *tag.id().as_uuid(),
        product_id: *tag.product_id().as_uuid(),
        name: tag.name().to_owned(),
        slug: tag.slug().as_ref().to_owned(),
    }
}

fn row_to_tag(row: TagRow) -> Result<Tag, ShopRepositoryError> {
    Tag::new(TagDraft {
        id: row.id,
        product_id: row.product_id,
        name: row.name,
        slug: Some(row.slug),
    })
    .map_err(|err| invalid_row("tags", err))
}

type ProductListing =
    dsl::IntoBoxed<'static, dsl::Select<products::table, dsl::AsSelect<ProductRow, Pg>>, Pg>;

/// Filtered, paged product query. Ties on `created_at` fall back to the id so
/// offset pages stay stable.
fn product_listing(query: &ProductListQuery) -> ProductListing {
    let mut statement = products::table.select(ProductRow::as_select()).into_boxed();
    if query.active_only {
        statement = statement.filter(products::is_active.eq(true));
    }
    if query.featured_only {
        statement = statement.filter(products::is_featured.eq(true));
    }
    if let Some(category) = query.category_id {
        statement = statement.filter(products::category_id.eq(*category.as_uuid()));
    }
    if let Some(brand) = query.brand_id {
        statement = statement.filter(products::brand_id.eq(*brand.as_uuid()));
    }
    if let Some(term) = query.search.as_deref() {
        statement = statement.filter(products::name.ilike(contains_pattern(term)));
    }
    statement
        .order((products::created_at.desc(), products::id.asc()))
        .limit(i64::from(query.page.limit()))
        .offset(i64::from(query.page.offset()))
}

#[async_trait]
impl ShopRepository for DieselShopRepository {
    async fn upsert_brand(&self, brand: &Brand) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = brand_to_row(brand);

        diesel::insert_into(brands::table)
            .values(&row)
            .on_conflict(brands::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "brands"))
    }

    async fn list_brands(&self, active_only: bool) -> Result<Vec<Brand>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = brands::table.select(BrandRow::as_select()).into_boxed();
        if active_only {
            statement = statement.filter(brands::is_active.eq(true));
        }
        let rows = statement
            .order(brands::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "brands"))?;

        rows.into_iter().map(row_to_brand).collect()
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = category_to_row(category);

        diesel::insert_into(categories::table)
            .values(&row)
            .on_conflict(categories::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "categories"))
    }

    async fn find_category(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = categories::table
            .filter(categories::id.eq(id.as_uuid()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "categories"))?;

        row.map(row_to_category).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order((categories::name.asc(), categories::display_order.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "categories"))?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn list_children(
        &self,
        parent: &CategoryId,
    ) -> Result<Vec<Category>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::parent_id.eq(parent.as_uuid()))
            .select(CategoryRow::as_select())
            .order((categories::name.asc(), categories::display_order.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "categories"))?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = product_to_row(product);

        diesel::insert_into(products::table)
            .values(&row)
            .on_conflict(products::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "products"))
    }

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = products::table
            .filter(products::id.eq(id.as_uuid()))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "products"))?;

        row.map(row_to_product).transpose()
    }

    async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<Vec<Product>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = product_listing(query)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "products"))?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn upsert_image(&self, image: &ProductImage) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = image_to_row(image);

        diesel::insert_into(product_images::table)
            .values(&row)
            .on_conflict(product_images::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "product_images"))
    }

    async fn list_images(
        &self,
        product: &ProductId,
    ) -> Result<Vec<ProductImage>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductImageRow> = product_images::table
            .filter(product_images::product_id.eq(product.as_uuid()))
            .select(ProductImageRow::as_select())
            .order(product_images::display_order.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "product_images"))?;

        rows.into_iter().map(row_to_image).collect()
    }

    async fn upsert_variant(&self, variant: &ProductVariant) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = variant_to_row(variant);

        diesel::insert_into(product_variants::table)
            .values(&row)
            .on_conflict(product_variants::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "product_variants"))
    }

    async fn find_variant(
        &self,
        id: &ProductVariantId,
    ) -> Result<Option<ProductVariant>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = product_variants::table
            .filter(product_variants::id.eq(id.as_uuid()))
            .select(ProductVariantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "product_variants"))?;

        row.map(row_to_variant).transpose()
    }

    async fn list_variants(
        &self,
        product: &ProductId,
    ) -> Result<Vec<ProductVariant>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductVariantRow> = product_variants::table
            .filter(product_variants::product_id.eq(product.as_uuid()))
            .select(ProductVariantRow::as_select())
            .order((product_variants::created_at.desc(), product_variants::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "product_variants"))?;

        rows.into_iter().map(row_to_variant).collect()
    }

    async fn upsert_tag(&self, tag: &Tag) -> Result<(), ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tag_to_row(tag);

        diesel::insert_into(tags::table)
            .values(&row)
            .on_conflict(tags::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "tags"))
    }

    async fn list_tags(&self, product: &ProductId) -> Result<Vec<Tag>, ShopRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .filter(tags::product_id.eq(product.as_uuid()))
            .select(TagRow::as_select())
            .order(tags::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "tags"))?;

        rows.into_iter().map(row_to_tag).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, Feature, StockStatus};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[rstest]
    fn product_listing_breaks_timestamp_ties_by_id() {
        let query = ProductListQuery {
            active_only: true,
            ..ProductListQuery::default()
        };
        let sql = diesel::debug_query::<Pg, _>(&product_listing(&query)).to_string();
        assert!(
            sql.contains(r#"ORDER BY "products"."created_at" DESC, "products"."id" ASC"#),
            "unexpected SQL: {sql}"
        );
    }

    #[fixture]
    fn product_row() -> ProductRow {
        ProductRow {
            id: Uuid::new_v4(),
            name: "Argan Oil".to_owned(),
            slug: "argan-oil".to_owned(),
            category_id: None,
            brand_id: None,
            description: None,
            price: Decimal::from(450_000),
            discount_price: Some(Decimal::from(400_000)),
            cost_price: Some(Decimal::from(250_000)),
            stock: Some(4),
            low_stock_threshold: 10,
            sku: "10001-20002".to_owned(),
            barcode: String::new(),
            weight: Some(Decimal::new(12_550, 2)),
            volume: None,
            ingredients: Some("Organic".to_owned()),
            how_to_use: None,
            features: Some("matter".to_owned()),
            suitable_for_skin: "dry".to_owned(),
            view_count: 0,
            sales_count: 2,
            rating: Decimal::new(45, 1),
            rating_count: 2,
            is_active: true,
            is_featured: false,
            is_available: true,
        }
    }

    #[rstest]
    fn product_rows_survive_a_row_trip(product_row: ProductRow) {
        let product = row_to_product(product_row.clone()).expect("valid row");

        assert_eq!(product.features(), Some(Feature::Matte));
        assert_eq!(product.stock_status(), StockStatus::Low { remaining: 4 });
        let stored = product_to_row(&product);
        assert_eq!(stored.features.as_deref(), Some("matter"));
        assert_eq!(stored.sku, product_row.sku);
    }

    #[rstest]
    fn unknown_optional_choices_read_as_unset(mut product_row: ProductRow) {
        product_row.ingredients = Some("Glitter".to_owned());
        let product = row_to_product(product_row).expect("valid row");
        assert_eq!(product.ingredients(), None);
    }

    #[rstest]
    fn negative_stock_is_a_query_error(mut product_row: ProductRow) {
        product_row.stock = Some(-1);
        let error = row_to_product(product_row).expect_err("negative stock");
        assert!(matches!(error, ShopRepositoryError::Query { .. }));
    }

    #[rstest]
    fn brand_rows_keep_country_and_website() {
        let row = BrandRow {
            id: Uuid::new_v4(),
            name: "Maison".to_owned(),
            slug: "maison".to_owned(),
            description: None,
            country: Some("FR".to_owned()),
            website: Some("https://maison.example/".to_owned()),
            is_active: true,
        };

        let brand = row_to_brand(row.clone()).expect("valid row");

        assert_eq!(brand.country(), Some(Country::France));
        assert_eq!(brand_to_row(&brand).website, row.website);
    }

    #[rstest]
    fn variants_keep_negative_adjustments() {
        let row = ProductVariantRow {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            name: "Travel size".to_owned(),
            sku: "10001-20003".to_owned(),
            color_code: "#FFF".to_owned(),
            price_adjustment: Decimal::from(-50_000),
            stock: None,
            is_active: true,
        };

        let variant = row_to_variant(row.clone()).expect("valid row");

        assert_eq!(variant_to_row(&variant).price_adjustment, row.price_adjustment);
    }
}

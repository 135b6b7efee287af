//! Port for the retail catalogue.

use async_trait::async_trait;

use crate::domain::{
    Brand, Category, CategoryId, Product, ProductId, ProductImage, ProductVariant,
    ProductVariantId, Tag,
};

use super::{ProductListQuery, define_port_error};

define_port_error! {
    /// Errors raised by shop repository adapters.
    pub enum ShopRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "shop repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "shop repository query failed: {message}",
        /// A unique name, slug, or SKU is already taken.
        Duplicate { field: String } => conflict:
            "a shop entry with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Insert or update a brand.
    async fn upsert_brand(&self, brand: &Brand) -> Result<(), ShopRepositoryError>;

    /// List brands by name.
    async fn list_brands(&self, active_only: bool) -> Result<Vec<Brand>, ShopRepositoryError>;

    /// Insert or update a category.
    async fn upsert_category(&self, category: &Category) -> Result<(), ShopRepositoryError>;

    /// Fetch a category by identifier.
    async fn find_category(&self, id: &CategoryId)
    -> Result<Option<Category>, ShopRepositoryError>;

    /// List every category ordered by name then order.
    async fn list_categories(&self) -> Result<Vec<Category>, ShopRepositoryError>;

    /// Direct children of `parent`.
    async fn list_children(&self, parent: &CategoryId)
    -> Result<Vec<Category>, ShopRepositoryError>;

    /// Insert or update a product.
    async fn upsert_product(&self, product: &Product) -> Result<(), ShopRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, ShopRepositoryError>;

    /// List products matching `query`.
    async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<Vec<Product>, ShopRepositoryError>;

    /// Insert or update image metadata.
    async fn upsert_image(&self, image: &ProductImage) -> Result<(), ShopRepositoryError>;

    /// Images of a product by display order.
    async fn list_images(&self, product: &ProductId)
    -> Result<Vec<ProductImage>, ShopRepositoryError>;

    /// Insert or update a variant.
    async fn upsert_variant(&self, variant: &ProductVariant) -> Result<(), ShopRepositoryError>;

    /// Fetch a variant by identifier.
    async fn find_variant(
        &self,
        id: &ProductVariantId,
    ) -> Result<Option<ProductVariant>, ShopRepositoryError>;

    /// Variants of a product, newest first.
    async fn list_variants(
        &self,
        product: &ProductId,
    ) -> Result<Vec<ProductVariant>, ShopRepositoryError>;

    /// Insert or update a tag.
    async fn upsert_tag(&self, tag: &Tag) -> Result<(), ShopRepositoryError>;

    /// Tags attached to a product.
    async fn list_tags(&self, product: &ProductId) -> Result<Vec<Tag>, ShopRepositoryError>;
}

//! Operator-facing shop workflows: category maintenance, variant pricing,
//! and stock reporting.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::ports::{Page, ProductListQuery, ShopRepository};
use crate::domain::{
    Category, CategoryDraft, CategoryId, CategoryTree, Error, ProductId, ProductVariantId,
    StockStatus,
};

/// One product needing restock attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportLine {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub status: StockStatus,
}

/// Shop catalogue workflows over a [`ShopRepository`].
#[derive(Clone)]
pub struct ShopService<R> {
    shop: Arc<R>,
}

impl<R> ShopService<R> {
    pub fn new(shop: Arc<R>) -> Self {
        Self { shop }
    }
}

impl<R> ShopService<R>
where
    R: ShopRepository,
{
    /// Validate and persist a category, deriving its slug from the name when
    /// none is given.
    ///
    /// # Errors
    /// `invalid_request` for malformed drafts, an unknown parent, or a parent
    /// that already sits below the category.
    pub async fn save_category(&self, draft: CategoryDraft) -> Result<Category, Error> {
        let category =
            Category::new(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        if let Some(parent) = category.parent_id() {
            let tree = self.category_tree().await?;
            if tree.get(parent).is_none() {
                return Err(Error::invalid_request(format!(
                    "parent category {parent} does not exist"
                )));
            }
            if tree.descends_from(parent, category.id()) {
                return Err(Error::invalid_request(format!(
                    "category {} cannot move below its own descendant {parent}",
                    category.id()
                )));
            }
        }
        self.shop.upsert_category(&category).await?;
        info!(category_id = %category.id(), slug = %category.slug(), "category saved");
        Ok(category)
    }

    /// Every descendant of `id`, children before grandchildren.
    pub async fn category_descendants(&self, id: CategoryId) -> Result<Vec<Category>, Error> {
        let tree = self.category_tree().await?;
        if tree.get(id).is_none() {
            return Err(Error::not_found(format!("category {id} not found")));
        }
        Ok(tree.all_children(id).into_iter().cloned().collect())
    }

    /// The full category hierarchy.
    pub async fn category_tree(&self) -> Result<CategoryTree, Error> {
        let categories = self.shop.list_categories().await?;
        Ok(CategoryTree::new(categories))
    }

    /// Selling price of a variant: its product's final price plus the
    /// variant's adjustment.
    pub async fn variant_price(&self, id: ProductVariantId) -> Result<Decimal, Error> {
        let variant = self
            .shop
            .find_variant(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("product variant {id} not found")))?;
        let product_id = variant.product_id();
        let product = self
            .shop
            .find_product(&product_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;
        Ok(variant.final_price(&product))
    }

    /// Active products that are out of stock or at or below their low-stock
    /// threshold, in listing order.
    pub async fn stock_report(&self) -> Result<Vec<StockReportLine>, Error> {
        let mut report = Vec::new();
        let mut page = Page::default();
        loop {
            let query = ProductListQuery {
                active_only: true,
                page,
                ..ProductListQuery::default()
            };
            let products = self.shop.list_products(&query).await?;
            let fetched = products.len();
            debug!(offset = page.offset(), fetched, "scanned product page");

            report.extend(products.into_iter().filter_map(|product| {
                match product.stock_status() {
                    StockStatus::InStock { .. } => None,
                    status => Some(StockReportLine {
                        product_id: product.id(),
                        name: product.name().to_owned(),
                        sku: product.sku().to_string(),
                        status,
                    }),
                }
            }));

            if fetched < page.limit() as usize {
                break;
            }
            page = Page::new(page.limit(), page.offset().saturating_add(page.limit()));
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "shop_service_tests.rs"]
mod tests;

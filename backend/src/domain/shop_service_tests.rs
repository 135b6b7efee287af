//! Tests for the shop service.

use std::sync::Arc;

use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockShopRepository, ShopRepositoryError};
use crate::domain::{ErrorCode, Product, ProductDraft, ProductVariant, ProductVariantDraft};

fn category(name: &str, parent: Option<&Category>) -> Category {
    Category::new(CategoryDraft {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: None,
        parent_id: parent.map(|p| *p.id().as_uuid()),
        description: None,
        icon: None,
        order: None,
        is_active: true,
    })
    .expect("valid category")
}

fn product(name: &str, sku: &str, stock: Option<u32>) -> Product {
    Product::new(ProductDraft {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: None,
        category_id: None,
        brand_id: None,
        description: None,
        price: Decimal::from(450_000),
        discount_price: Some(Decimal::from(400_000)),
        cost_price: None,
        stock,
        low_stock_threshold: 10,
        sku: sku.to_owned(),
        barcode: String::new(),
        weight: None,
        volume: None,
        ingredients: None,
        how_to_use: None,
        features: None,
        suitable_for_skin: Default::default(),
        view_count: 0,
        sales_count: 0,
        rating: Decimal::ZERO,
        rating_count: 0,
        is_active: true,
        is_featured: false,
        is_available: true,
    })
    .expect("valid product")
}

#[rstest]
#[tokio::test]
async fn save_category_derives_slug() {
    let mut repo = MockShopRepository::new();
    repo.expect_upsert_category()
        .withf(|saved| saved.slug().as_ref() == "hair-care")
        .times(1)
        .return_once(|_| Ok(()));

    let service = ShopService::new(Arc::new(repo));
    let saved = service
        .save_category(CategoryDraft {
            id: Uuid::new_v4(),
            name: "Hair Care".to_owned(),
            slug: None,
            parent_id: None,
            description: None,
            icon: None,
            order: Some(1),
            is_active: true,
        })
        .await
        .expect("category saved");

    assert_eq!(saved.name(), "Hair Care");
}

#[rstest]
#[tokio::test]
async fn save_category_rejects_unknown_parent() {
    let mut repo = MockShopRepository::new();
    repo.expect_list_categories().return_once(|| Ok(Vec::new()));
    repo.expect_upsert_category().never();

    let service = ShopService::new(Arc::new(repo));
    let error = service
        .save_category(CategoryDraft {
            id: Uuid::new_v4(),
            name: "Orphan".to_owned(),
            slug: None,
            parent_id: Some(Uuid::new_v4()),
            description: None,
            icon: None,
            order: None,
            is_active: true,
        })
        .await
        .expect_err("unknown parent");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn save_category_rejects_moving_below_a_descendant() {
    let hair = category("Hair", None);
    let care = category("Care", Some(&hair));
    let mut moved = hair.clone().into_draft();
    moved.parent_id = Some(*care.id().as_uuid());
    let stored = vec![hair, care];

    let mut repo = MockShopRepository::new();
    repo.expect_list_categories()
        .return_once(move || Ok(stored));
    repo.expect_upsert_category().never();

    let service = ShopService::new(Arc::new(repo));
    let error = service.save_category(moved).await.expect_err("cycle");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn save_category_accepts_reparenting_under_a_sibling() {
    let hair = category("Hair", None);
    let care = category("Care", Some(&hair));
    let masks = category("Masks", Some(&hair));
    let mut moved = masks.clone().into_draft();
    moved.parent_id = Some(*care.id().as_uuid());
    let stored = vec![hair, care, masks];

    let mut repo = MockShopRepository::new();
    repo.expect_list_categories()
        .return_once(move || Ok(stored));
    repo.expect_upsert_category()
        .times(1)
        .return_once(|_| Ok(()));

    let service = ShopService::new(Arc::new(repo));
    let saved = service.save_category(moved).await.expect("moved");

    assert_eq!(saved.name(), "Masks");
}

#[rstest]
#[tokio::test]
async fn save_category_maps_duplicate_slug_to_conflict() {
    let mut repo = MockShopRepository::new();
    repo.expect_upsert_category()
        .return_once(|_| Err(ShopRepositoryError::duplicate("slug")));

    let service = ShopService::new(Arc::new(repo));
    let error = service
        .save_category(CategoryDraft {
            id: Uuid::new_v4(),
            name: "Nails".to_owned(),
            slug: None,
            parent_id: None,
            description: None,
            icon: None,
            order: None,
            is_active: true,
        })
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn category_descendants_walks_the_tree() {
    let face = category("Face", None);
    let serums = category("Serums", Some(&face));
    let retinol = category("Retinol", Some(&serums));
    let body = category("Body", None);
    let root = face.id();
    let stored = vec![face, serums, retinol, body];

    let mut repo = MockShopRepository::new();
    repo.expect_list_categories()
        .return_once(move || Ok(stored));

    let service = ShopService::new(Arc::new(repo));
    let names: Vec<String> = service
        .category_descendants(root)
        .await
        .expect("descendants")
        .iter()
        .map(|c| c.name().to_owned())
        .collect();

    assert_eq!(names, ["Serums", "Retinol"]);
}

#[rstest]
#[tokio::test]
async fn category_descendants_reports_unknown_category() {
    let mut repo = MockShopRepository::new();
    repo.expect_list_categories().return_once(|| Ok(Vec::new()));

    let service = ShopService::new(Arc::new(repo));
    let error = service
        .category_descendants(CategoryId::random())
        .await
        .expect_err("unknown");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("25000", "425000")]
#[case("-500000", "-100000")]
#[tokio::test]
async fn variant_price_adds_adjustment_to_final_price(
    #[case] adjustment: &str,
    #[case] expected: &str,
) {
    let base = product("Lip Tint", "10001-20002", Some(40));
    let variant = ProductVariant::new(ProductVariantDraft {
        id: Uuid::new_v4(),
        product_id: *base.id().as_uuid(),
        name: "Coral".to_owned(),
        sku: "10001-20003".to_owned(),
        color_code: "#ff7f50".to_owned(),
        price_adjustment: adjustment.parse().expect("decimal"),
        stock: Some(5),
        is_active: true,
    })
    .expect("valid variant");
    let variant_id = variant.id();

    let mut repo = MockShopRepository::new();
    repo.expect_find_variant()
        .return_once(move |_| Ok(Some(variant)));
    repo.expect_find_product()
        .return_once(move |_| Ok(Some(base)));

    let service = ShopService::new(Arc::new(repo));
    let price = service.variant_price(variant_id).await.expect("priced");

    assert_eq!(price, expected.parse::<Decimal>().expect("decimal"));
}

#[rstest]
#[tokio::test]
async fn stock_report_lists_low_and_empty_active_products() {
    let products = vec![
        product("Shampoo", "11111-22222", Some(3)),
        product("Conditioner", "11111-33333", Some(50)),
        product("Hair Oil", "11111-44444", None),
        product("Mask", "11111-55555", Some(10)),
    ];

    let mut repo = MockShopRepository::new();
    repo.expect_list_products()
        .withf(|query| query.active_only && query.page.offset() == 0)
        .times(1)
        .return_once(move |_| Ok(products));

    let service = ShopService::new(Arc::new(repo));
    let report = service.stock_report().await.expect("report");

    let lines: Vec<(String, StockStatus)> = report
        .into_iter()
        .map(|line| (line.name, line.status))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("Shampoo".to_owned(), StockStatus::Low { remaining: 3 }),
            ("Hair Oil".to_owned(), StockStatus::OutOfStock),
            ("Mask".to_owned(), StockStatus::Low { remaining: 10 }),
        ]
    );
}

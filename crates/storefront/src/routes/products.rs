//! Product route handlers.
//!
//! Listing supports the shop's filter sidebar: category, brand, skin type,
//! price bounds (on the discounted price), text search, novelty and best
//! seller flags, and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use belle_core::ProductId;
use belle_core::catalog::{Category, Product, SkinType};
use belle_core::pricing::unit_price;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub skin_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Free-text search over name, brand, and description.
    pub q: Option<String>,
    pub new: Option<bool>,
    pub best_seller: Option<bool>,
    pub sort: Option<SortOrder>,
}

/// Supported sort orders for the listing.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    Rating,
    Name,
}

/// Listing payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Detail payload with related products from the same category.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: Product,
    pub related: Vec<Product>,
}

/// `GET /products` - filtered, sorted listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListResponse>> {
    let category = match &query.category {
        Some(raw) => Some(
            Category::from_str(raw)
                .map_err(|_| AppError::BadRequest(format!("unknown category '{raw}'")))?,
        ),
        None => None,
    };
    let skin_type = match &query.skin_type {
        Some(raw) => Some(
            SkinType::from_str(raw)
                .map_err(|_| AppError::BadRequest(format!("unknown skin type '{raw}'")))?,
        ),
        None => None,
    };

    let mut products: Vec<Product> = state
        .catalog()
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            query
                .brand
                .as_deref()
                .is_none_or(|b| p.brand.eq_ignore_ascii_case(b))
        })
        .filter(|p| skin_type.is_none_or(|s| p.skin_types.contains(&s)))
        .filter(|p| query.min_price.is_none_or(|min| unit_price(p) >= min))
        .filter(|p| query.max_price.is_none_or(|max| unit_price(p) <= max))
        .filter(|p| query.q.as_deref().is_none_or(|q| matches_search(p, q)))
        .filter(|p| query.new.is_none_or(|flag| p.is_new == flag))
        .filter(|p| query.best_seller.is_none_or(|flag| p.is_best_seller == flag))
        .collect();

    if let Some(sort) = query.sort {
        sort_products(&mut products, sort);
    }

    let total = products.len();
    Ok(Json(ProductListResponse { products, total }))
}

/// `GET /products/{id}` - detail plus up to 4 related products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailResponse>> {
    let catalog = state.catalog();
    let product = catalog
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related: Vec<Product> = catalog
        .into_iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(4)
        .collect();

    Ok(Json(ProductDetailResponse { product, related }))
}

/// Case-insensitive substring match over name, brand, and description.
fn matches_search(product: &Product, query: &str) -> bool {
    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.brand.to_lowercase().contains(&needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Sort in place. Price sorts use the discounted price; unrated products
/// sink to the bottom of the rating sort.
fn sort_products(products: &mut [Product], sort: SortOrder) {
    match sort {
        SortOrder::PriceAsc => products.sort_by_key(unit_price),
        SortOrder::PriceDesc => {
            products.sort_by(|a, b| unit_price(b).cmp(&unit_price(a)));
        }
        SortOrder::Rating => products.sort_by(|a, b| match (b.rating, a.rating) {
            (Some(rb), Some(ra)) => rb.cmp(&ra),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }),
        SortOrder::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use belle_core::catalog::demo_products;

    #[test]
    fn test_matches_search_on_brand() {
        let products = demo_products();
        let hit = products.iter().find(|p| matches_search(p, &products[0].brand.to_lowercase()));
        assert!(hit.is_some());
    }

    #[test]
    fn test_sort_price_asc() {
        let mut products = demo_products();
        sort_products(&mut products, SortOrder::PriceAsc);
        for pair in products.windows(2) {
            assert!(unit_price(&pair[0]) <= unit_price(&pair[1]));
        }
    }

    #[test]
    fn test_sort_rating_puts_unrated_last() {
        let mut products = demo_products();
        sort_products(&mut products, SortOrder::Rating);
        let first_unrated = products.iter().position(|p| p.rating.is_none());
        if let Some(idx) = first_unrated {
            assert!(products.iter().skip(idx).all(|p| p.rating.is_none()));
        }
    }
}

//! Catalog administration routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use belle_core::catalog::Product;
use belle_core::types::ProductId;

use crate::db::{ProductDraft, ProductRepository};
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Catalog listing payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// `GET /products` - the effective catalog.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<ProductListResponse>> {
    let products = ProductRepository::new(state.store()).list(state.base_catalog());
    let total = products.len();
    Ok(Json(ProductListResponse { products, total }))
}

/// `GET /products/{id}` - one product.
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.store())
        .get(state.base_catalog(), ProductId::new(id))
        .map(Json)
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))
}

/// `POST /products` - create a product.
#[instrument(skip(state, _admin, draft))]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    draft.validate().map_err(AdminError::Validation)?;

    let product = ProductRepository::new(state.store()).create(state.base_catalog(), draft)?;
    tracing::info!(product_id = product.id.as_i32(), "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}` - replace a product's fields.
#[instrument(skip(state, _admin, draft))]
pub async fn update(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i32>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>> {
    draft.validate().map_err(AdminError::Validation)?;

    ProductRepository::new(state.store())
        .update(state.base_catalog(), ProductId::new(id), draft)?
        .map(Json)
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))
}

/// `DELETE /products/{id}` - remove a product from the catalog.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let removed =
        ProductRepository::new(state.store()).delete(state.base_catalog(), ProductId::new(id))?;
    if !removed {
        return Err(AdminError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = id, "Product removed");
    Ok(Json(json!({ "deleted": true })))
}

//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use belle_core::catalog::{Product, Testimonial};

use crate::state::AppState;

/// Home payload: the sections the landing page renders.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub new_products: Vec<Product>,
    pub best_sellers: Vec<Product>,
    pub testimonials: Vec<Testimonial>,
}

/// Number of products shown per home section.
const PRODUCTS_PER_SECTION: usize = 4;

/// `GET /` - home payload.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let catalog = state.catalog();

    let new_products: Vec<Product> = catalog
        .iter()
        .filter(|p| p.is_new)
        .take(PRODUCTS_PER_SECTION)
        .cloned()
        .collect();
    let best_sellers: Vec<Product> = catalog
        .iter()
        .filter(|p| p.is_best_seller)
        .take(PRODUCTS_PER_SECTION)
        .cloned()
        .collect();

    Json(HomeResponse {
        new_products,
        best_sellers,
        testimonials: state.testimonials().to_vec(),
    })
}

//! Static content page route handlers.
//!
//! Serves markdown-based informational pages (about, FAQ, shipping policy,
//! legal) loaded into the content store at startup.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::content::Page;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Summary entry for the page index.
#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

/// `GET /pages` - list available pages.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<PageSummary>> {
    let mut pages: Vec<PageSummary> = state
        .content()
        .get_all_pages()
        .map(|page| PageSummary {
            slug: page.slug.clone(),
            title: page.meta.title.clone(),
            description: page.meta.description.clone(),
        })
        .collect();
    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    Json(pages)
}

/// `GET /pages/{slug}` - a rendered page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Page>> {
    let page = state
        .content()
        .get_page(&slug)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("page '{slug}'")))?;

    Ok(Json(page))
}

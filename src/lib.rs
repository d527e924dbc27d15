pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use crate::state::AppState;

/// Builds the application router over an already migrated pool.
pub fn app(db: SqlitePool) -> Result<Router, tera::Error> {
    let templates = Arc::new(views::load_templates()?);
    Ok(api::router(AppState { db, templates }))
}

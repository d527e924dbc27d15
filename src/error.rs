use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(ref e) => {
                error!("database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Template(ref e) => {
                error!("template error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(error_page(status))).into_response()
    }
}

// Rendered without Tera so a broken template set still yields a page.
fn error_page(status: StatusCode) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{status}</title></head>\n\
         <body><h1>{status}</h1><p><a href=\"/\">Back to the list</a></p></body>\n</html>\n"
    )
}

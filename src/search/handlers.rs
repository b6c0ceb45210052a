use super::engine::search;
use super::types::{SearchRequest, SearchResponse};
use crate::storage::types::DocumentStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub const DATABASE_ERROR: &str = "Database error";
pub const INTERNAL_ERROR: &str = "Internal server error";

pub async fn handle_search<S: DocumentStore>(
    Extension(store): Extension<Arc<S>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> (StatusCode, Json<SearchResponse>) {
    let req = match body {
        Ok(Json(req)) => req,
        Err(e) => {
            tracing::error!("Rejected search request body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failure(INTERNAL_ERROR)),
            );
        }
    };

    match search(&req.query, store.as_ref()).await {
        Ok((parsed, results)) => {
            tracing::info!("Search {:?} returned {} results", req.query, results.len());
            (StatusCode::OK, Json(SearchResponse::success(parsed, results)))
        }
        Err(e) => {
            tracing::error!("Search {:?} failed reading the document store: {:#}", req.query, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failure(DATABASE_ERROR)),
            )
        }
    }
}

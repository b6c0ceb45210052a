use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
};
use std::sync::Arc;

use super::protocol::CollectionParams;
use super::types::{Biobank, DocumentStore, Specimen};

pub async fn handle_list_biobanks<S: DocumentStore>(
    Extension(store): Extension<Arc<S>>,
) -> (StatusCode, Json<Vec<Biobank>>) {
    match store.list_biobanks().await {
        Ok(biobanks) => (StatusCode::OK, Json(biobanks)),
        Err(e) => {
            tracing::error!("Failed to list biobanks: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

pub async fn handle_list_specimens<S: DocumentStore>(
    Extension(store): Extension<Arc<S>>,
    Query(params): Query<CollectionParams>,
) -> (StatusCode, Json<Vec<Specimen>>) {
    let limit = params.limit.unwrap_or(usize::MAX);

    match store.list_specimens(limit).await {
        Ok(specimens) => {
            tracing::debug!("Serving {} specimens (limit {:?})", specimens.len(), params.limit);
            (StatusCode::OK, Json(specimens))
        }
        Err(e) => {
            tracing::error!("Failed to list specimens: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

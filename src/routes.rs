//! HTTP router assembly.
//!
//! The router is generic over the document store so that the same routes serve a node
//! holding its own data and a node reading from a peer.

use crate::search::handlers::handle_search;
use crate::storage::handlers::{handle_list_biobanks, handle_list_specimens};
use crate::storage::protocol::{ENDPOINT_BIOBANKS, ENDPOINT_SPECIMENS};
use crate::storage::types::DocumentStore;
use axum::{
    Json, Router,
    extract::Extension,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/api/search";
pub const ENDPOINT_HEALTH: &str = "/api/health";

pub fn build_router<S: DocumentStore>(store: Arc<S>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, post(handle_search::<S>))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(ENDPOINT_BIOBANKS, get(handle_list_biobanks::<S>))
        .route(ENDPOINT_SPECIMENS, get(handle_list_specimens::<S>))
        .layer(Extension(store))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

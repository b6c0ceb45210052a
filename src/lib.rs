//! AminoChain Specimen Search
//!
//! Backend for the biospecimen marketplace's free-text search box. Researchers type
//! queries like `"frozen ffpe tissue, breast cancer, ages 40-60"`; the service turns them
//! into structured predicates and returns the best matching specimens across biobanks.
//!
//! ## Modules
//! - **`search`**: query intent parsing, filtering, ranking and the search endpoint.
//! - **`storage`**: the `DocumentStore` seam with in-memory and HTTP implementations,
//!   collection endpoints and seed loading.
//! - **`config`**: command-line and environment configuration.
//! - **`routes`**: assembles the axum router around an injected store.

pub mod config;
pub mod routes;
pub mod search;
pub mod storage;

//! Collection Read Protocol
//!
//! Endpoints and query parameters used between a node and the peer it reads its
//! collections from. Bodies are plain JSON arrays of `Biobank` / `Specimen`.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Lists every biobank held by the node.
pub const ENDPOINT_BIOBANKS: &str = "/collections/biobanks";
/// Lists specimens in insertion order, optionally capped with `?limit=N`.
pub const ENDPOINT_SPECIMENS: &str = "/collections/specimens";

/// Query parameters accepted by `ENDPOINT_SPECIMENS`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CollectionParams {
    /// Maximum number of documents to return. `None` returns the whole collection.
    pub limit: Option<usize>,
}

//! Specimen Search Module
//!
//! Answers free-text specimen queries such as `"blood diabetes female over 60"`.
//!
//! ## Pipeline
//! 1. **Parsing**: the query is lowercased and matched against ordered pattern lists to
//!    produce a `ParsedQuery` (age bounds, gender, sample types, diagnoses, preservation).
//! 2. **Retrieval**: biobanks and up to 100 specimens are read from the injected
//!    `DocumentStore`.
//! 3. **Filtering**: a specimen must satisfy every active predicate category.
//! 4. **Ranking**: survivors are scored, sorted by descending score and cut to 50.
//!
//! ## Submodules
//! - **`parser`**: query intent extraction.
//! - **`engine`**: filtering, scoring and ordering.
//! - **`handlers`**: the `POST /api/search` endpoint.
//! - **`types`**: request, response and intermediate types.

pub mod engine;
pub mod handlers;
pub mod parser;
pub mod types;

//! Document Store Module
//!
//! Holds the two reference collections the search service reads: biobanks and specimens.
//!
//! ## Core Concepts
//! - **Seam**: `DocumentStore` is the only thing the search engine knows about storage.
//!   The concrete store is built by the caller and injected into the router.
//! - **Local**: `MemoryStore` keeps seeded collections in process memory. Specimens keep
//!   insertion order, which is the "fetch order" search ties fall back to.
//! - **Remote**: `HttpDocumentStore` reads the same collections from another node over HTTP.
//! - **Exposure**: every node serves its collections on `/collections/*` so that it can act
//!   as the remote store of another node.

pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod remote;
pub mod seed;
pub mod types;

#[cfg(test)]
mod tests;

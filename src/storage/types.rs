//! Document Types
//!
//! The reference documents stored per collection and the `DocumentStore` trait
//! through which the search engine reads them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;

/// A biological sample record with clinical and demographic metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specimen {
    #[serde(default)]
    pub id: String,
    pub external_id: String,
    pub biobank_id: String,
    #[serde(rename = "type")]
    pub specimen_type: String,
    pub diagnosis: String,
    pub gender: String,
    pub age_at_collection: u32,
    #[serde(default)]
    pub ethnicity: String,
    pub preservation_method: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub available: bool,
    /// Lowercase tokens matched exactly against the whole query text.
    #[serde(rename = "searchableFields", default)]
    pub searchable_fields: Vec<String>,
}

impl Specimen {
    /// Builds the lowercase token set for this specimen.
    ///
    /// Each descriptive value contributes itself (lowercased) and each of its words,
    /// so both `"diabetes type 2"` and `"diabetes"` end up searchable.
    pub fn derive_searchable_fields(&self) -> Vec<String> {
        let sources = [
            &self.specimen_type,
            &self.diagnosis,
            &self.gender,
            &self.ethnicity,
            &self.preservation_method,
        ];

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for value in sources {
            let lowered = value.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            let words: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();
            for token in std::iter::once(lowered).chain(words) {
                if seen.insert(token.clone()) {
                    fields.push(token);
                }
            }
        }
        fields
    }
}

/// An institution that stores and provides specimens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Biobank {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub institution_type: String,
}

/// Read-only access to the biobank and specimen collections.
///
/// Implementations must be shareable across request tasks; the returned futures are
/// `Send` so generic axum handlers can await them.
pub trait DocumentStore: Send + Sync + 'static {
    /// Returns every biobank in the collection.
    fn list_biobanks(&self) -> impl Future<Output = Result<Vec<Biobank>>> + Send;

    /// Returns at most `limit` specimens, in the store's natural order.
    fn list_specimens(&self, limit: usize) -> impl Future<Output = Result<Vec<Specimen>>> + Send;
}

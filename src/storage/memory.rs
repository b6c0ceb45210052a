use super::seed::SeedData;
use super::types::{Biobank, DocumentStore, Specimen};

use anyhow::Result;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process document store backed by the seeded collections.
///
/// Biobanks are looked up by id, so they live in a `DashMap`. Specimens are read as an
/// ordered prefix, so they live in a `Vec` that preserves insertion order.
pub struct MemoryStore {
    biobanks: DashMap<String, Biobank>,
    specimens: RwLock<Vec<Specimen>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            biobanks: DashMap::new(),
            specimens: RwLock::new(Vec::new()),
        }
    }

    /// Builds a store and inserts every seeded document, biobanks first.
    pub async fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for biobank in seed.biobanks {
            store.insert_biobank(biobank);
        }
        for specimen in seed.specimens {
            store.insert_specimen(specimen).await;
        }
        store
    }

    /// Inserts (or replaces) a biobank and returns its id.
    /// An empty id is replaced by a fresh UUID.
    pub fn insert_biobank(&self, mut biobank: Biobank) -> String {
        if biobank.id.is_empty() {
            biobank.id = Uuid::new_v4().to_string();
        }
        let id = biobank.id.clone();
        self.biobanks.insert(id.clone(), biobank);
        id
    }

    /// Appends a specimen and returns its id.
    ///
    /// Missing ids are generated and missing searchable fields are derived from the
    /// specimen's descriptive values.
    pub async fn insert_specimen(&self, mut specimen: Specimen) -> String {
        if specimen.id.is_empty() {
            specimen.id = Uuid::new_v4().to_string();
        }
        if specimen.searchable_fields.is_empty() {
            specimen.searchable_fields = specimen.derive_searchable_fields();
        }
        if !self.biobanks.contains_key(&specimen.biobank_id) {
            tracing::warn!(
                "Specimen {} references unknown biobank {}",
                specimen.id,
                specimen.biobank_id
            );
        }

        let id = specimen.id.clone();
        self.specimens.write().await.push(specimen);
        id
    }

    pub fn get_biobank(&self, id: &str) -> Option<Biobank> {
        self.biobanks.get(id).map(|entry| entry.value().clone())
    }

    pub fn biobank_count(&self) -> usize {
        self.biobanks.len()
    }

    pub async fn specimen_count(&self) -> usize {
        self.specimens.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    async fn list_biobanks(&self) -> Result<Vec<Biobank>> {
        Ok(self
            .biobanks
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn list_specimens(&self, limit: usize) -> Result<Vec<Specimen>> {
        let specimens = self.specimens.read().await;
        Ok(specimens.iter().take(limit).cloned().collect())
    }
}

//! Seed Data Loading
//!
//! Reference collections are created once at startup from a JSON document of the form
//! `{ "biobanks": [...], "specimens": [...] }`, either read from disk or taken from the
//! demo dataset compiled into the binary.

use super::types::{Biobank, Specimen};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEMO_SEED: &str = include_str!("../../data/demo_seed.json");

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub biobanks: Vec<Biobank>,
    #[serde(default)]
    pub specimens: Vec<Specimen>,
}

pub fn parse_seed(json: &str) -> Result<SeedData> {
    let seed: SeedData = serde_json::from_str(json).context("Invalid seed document")?;
    Ok(seed)
}

pub fn load_seed_file(path: &Path) -> Result<SeedData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed = parse_seed(&json)?;

    tracing::info!(
        "Loaded seed file {} ({} biobanks, {} specimens)",
        path.display(),
        seed.biobanks.len(),
        seed.specimens.len()
    );
    Ok(seed)
}

pub fn demo_dataset() -> Result<SeedData> {
    parse_seed(DEMO_SEED)
}

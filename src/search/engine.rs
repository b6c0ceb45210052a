use super::parser::parse_query;
use super::types::{ParsedQuery, RankedResult};
use crate::storage::types::{Biobank, DocumentStore, Specimen};

use anyhow::Result;
use std::collections::HashMap;

/// Upper bound on specimens read from the store per search.
pub const SPECIMEN_FETCH_LIMIT: usize = 100;
/// Upper bound on results returned per search.
pub const MAX_RESULTS: usize = 50;

pub const UNKNOWN_BIOBANK: &str = "Unknown Biobank";

// Scores are accumulated in whole tenths so that equal scores compare equal.
const BASE_SCORE: u32 = 5;
const CATEGORY_BONUS: u32 = 1;
const TYPE_MATCH_BONUS: u32 = 2;
const DIAGNOSIS_MATCH_BONUS: u32 = 2;
const GENDER_MATCH_BONUS: u32 = 1;
const BIOBANK_MATCH_BONUS: u32 = 1;
const FIELD_MATCH_BONUS: u32 = 3;
const MAX_SCORE: u32 = 10;

/// Parses `query`, reads both collections concurrently and ranks the specimens.
///
/// Only store failures produce an `Err`; parsing and ranking cannot fail.
pub async fn search<S: DocumentStore>(
    query: &str,
    store: &S,
) -> Result<(ParsedQuery, Vec<RankedResult>)> {
    let parsed = parse_query(query);

    let (biobanks, specimens) = tokio::try_join!(
        store.list_biobanks(),
        store.list_specimens(SPECIMEN_FETCH_LIMIT)
    )?;

    tracing::debug!(
        "Fetched {} biobanks and {} specimens",
        biobanks.len(),
        specimens.len()
    );

    let results = rank_specimens(&parsed, specimens, &biobanks);
    Ok((parsed, results))
}

/// Filters, scores and orders `specimens` for an already parsed query.
///
/// The sort is stable, so specimens with equal scores keep the order they were fetched in.
pub fn rank_specimens(
    parsed: &ParsedQuery,
    specimens: Vec<Specimen>,
    biobanks: &[Biobank],
) -> Vec<RankedResult> {
    let names: HashMap<&str, &str> = biobanks
        .iter()
        .map(|b| (b.id.as_str(), b.name.as_str()))
        .collect();
    let query_lower = parsed.original_query.to_lowercase();

    let mut results: Vec<RankedResult> = specimens
        .into_iter()
        .filter(|specimen| matches_filters(specimen, parsed))
        .map(|specimen| {
            let biobank_name = names
                .get(specimen.biobank_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_BIOBANK)
                .to_string();
            let similarity = score_specimen(&specimen, &biobank_name, parsed, &query_lower);
            RankedResult {
                specimen,
                biobank_name,
                similarity,
            }
        })
        .collect();

    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.truncate(MAX_RESULTS);
    results
}

/// Conjunction over every active predicate category.
pub fn matches_filters(specimen: &Specimen, parsed: &ParsedQuery) -> bool {
    if let Some(min) = parsed.age_min
        && specimen.age_at_collection < min
    {
        return false;
    }
    if let Some(max) = parsed.age_max
        && specimen.age_at_collection > max
    {
        return false;
    }
    if let Some(gender) = parsed.gender
        && specimen.gender != gender.as_str()
    {
        return false;
    }

    if !parsed.sample_types.is_empty()
        && !parsed
            .sample_types
            .iter()
            .any(|tag| sample_type_matches(&specimen.specimen_type, tag))
    {
        return false;
    }

    if !parsed.diagnoses.is_empty() {
        let diagnosis = specimen.diagnosis.to_lowercase();
        if !parsed
            .diagnoses
            .iter()
            .any(|tag| diagnosis.contains(&tag.to_lowercase()))
        {
            return false;
        }
    }

    if !parsed.preservation_methods.is_empty()
        && !parsed
            .preservation_methods
            .iter()
            .any(|tag| specimen.preservation_method.contains(tag.as_str()))
    {
        return false;
    }

    true
}

// Case-sensitive. "Blood" also covers its fractions.
fn sample_type_matches(specimen_type: &str, tag: &str) -> bool {
    specimen_type.contains(tag)
        || (tag == "Blood" && (specimen_type.contains("Plasma") || specimen_type.contains("Serum")))
}

/// Relevance of a specimen that already passed `matches_filters`, in `[0.5, 1.0]`.
pub fn score_specimen(
    specimen: &Specimen,
    biobank_name: &str,
    parsed: &ParsedQuery,
    query_lower: &str,
) -> f64 {
    let tenths = BASE_SCORE
        + parsed.active_categories() as u32 * CATEGORY_BONUS
        + text_match_tenths(specimen, biobank_name, query_lower);
    f64::from(tenths.min(MAX_SCORE)) / 10.0
}

/// Bonus, in tenths, for the whole query text appearing in the specimen's own fields.
/// An empty query matches nothing.
pub fn text_match_tenths(specimen: &Specimen, biobank_name: &str, query_lower: &str) -> u32 {
    if query_lower.is_empty() {
        return 0;
    }

    let mut bonus = 0;
    if specimen.specimen_type.to_lowercase().contains(query_lower) {
        bonus += TYPE_MATCH_BONUS;
    }
    if specimen.diagnosis.to_lowercase().contains(query_lower) {
        bonus += DIAGNOSIS_MATCH_BONUS;
    }
    if specimen.gender.to_lowercase() == query_lower {
        bonus += GENDER_MATCH_BONUS;
    }
    if biobank_name.to_lowercase().contains(query_lower) {
        bonus += BIOBANK_MATCH_BONUS;
    }
    if specimen
        .searchable_fields
        .iter()
        .any(|field| field == query_lower)
    {
        bonus += FIELD_MATCH_BONUS;
    }
    bonus
}

use crate::storage::types::Specimen;
use serde::{Deserialize, Serialize};

/// Gender predicate extracted from a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Structured predicates extracted from a free-text query.
///
/// An empty tag list or a `None` bound means the category is inactive and does not
/// constrain the result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub gender: Option<Gender>,
    pub sample_types: Vec<String>,
    pub diagnoses: Vec<String>,
    pub preservation_methods: Vec<String>,
    pub original_query: String,
}

impl ParsedQuery {
    /// Number of predicate categories (age, gender, sample type, diagnosis,
    /// preservation) that constrain this query. Age counts once even when both
    /// bounds are set.
    pub fn active_categories(&self) -> usize {
        [
            self.age_min.is_some() || self.age_max.is_some(),
            self.gender.is_some(),
            !self.sample_types.is_empty(),
            !self.diagnoses.is_empty(),
            !self.preservation_methods.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// A specimen that survived filtering, with its resolved biobank and score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub specimen: Specimen,
    pub biobank_name: String,
    pub similarity: f64,
}

/// Response metadata. On success `query` and `semantic_conditions` are set;
/// on failure only `error` is.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub count: usize,
    #[serde(
        rename = "semanticConditions",
        skip_serializing_if = "Option::is_none"
    )]
    pub semantic_conditions: Option<ParsedQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RankedResult>,
    pub meta: SearchMeta,
}

impl SearchResponse {
    pub fn success(parsed: ParsedQuery, results: Vec<RankedResult>) -> Self {
        Self {
            meta: SearchMeta {
                query: Some(parsed.original_query.clone()),
                count: results.len(),
                semantic_conditions: Some(parsed),
                error: None,
            },
            results,
        }
    }

    pub fn failure(error: &str) -> Self {
        Self {
            results: Vec::new(),
            meta: SearchMeta {
                error: Some(error.to_string()),
                ..SearchMeta::default()
            },
        }
    }
}

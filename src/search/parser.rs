//! Query intent parsing.
//!
//! Turns free text such as `"frozen plasma from women over 60"` into a `ParsedQuery`
//! using fixed, ordered regular-expression lists. Parsing never fails; anything that
//! does not match simply leaves its predicate inactive.

use super::types::{Gender, ParsedQuery};
use regex::Regex;
use std::sync::LazyLock;

struct TagRule {
    pattern: Regex,
    tag: &'static str,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn compile_rules(rules: &[(&str, &'static str)]) -> Vec<TagRule> {
    rules
        .iter()
        .map(|(pattern, tag)| TagRule {
            pattern: compile(pattern),
            tag,
        })
        .collect()
}

static AGE_ABOVE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bage\s+(\d+)\s+and\s+(?:up|above|older)\b",
        r"\bover\s+(\d+)",
        r"\bolder\s+than\s+(\d+)",
        r"\babove\s+(\d+)",
        r"\b(\d+)\s+years?\s+or\s+older\b",
        r"\b(\d+)\s*\+",
    ])
});

static AGE_BELOW: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bunder\s+(\d+)",
        r"\bbelow\s+(\d+)",
        r"\byounger\s+than\s+(\d+)",
        r"\bless\s+than\s+(\d+)\s+years?\b",
    ])
});

static AGE_RANGE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bages?\s+(\d+)\s+to\s+(\d+)\b",
        r"\bages?\s+(\d+)\s*-\s*(\d+)\b",
        r"\bbetween\s+(\d+)\s+and\s+(\d+)\b",
    ])
});

static MALE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(?:male|males|man|men)\b"));
static FEMALE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:female|females|woman|women)\b"));

// "plasma" also requests "Blood"; "serum" requests only "Serum".
static SAMPLE_TYPES: LazyLock<Vec<TagRule>> = LazyLock::new(|| {
    compile_rules(&[
        (r"\b(?:blood|plasma)\b", "Blood"),
        (r"\bplasma\b", "Plasma"),
        (r"\bserum\b", "Serum"),
        (r"\b(?:tissues?|biops(?:y|ies))\b", "Tissue"),
        (r"\b(?:csf|cerebrospinal)\b", "CSF"),
        (r"\burine\b", "Urine"),
        (r"\bsaliva\b", "Saliva"),
        (r"\bdna\b", "DNA"),
        (r"\brna\b", "RNA"),
        (r"\bbone\s+marrow\b", "Bone Marrow"),
        (r"\b(?:stool|fecal|feces)\b", "Stool"),
    ])
});

static DIAGNOSES: LazyLock<Vec<TagRule>> = LazyLock::new(|| {
    compile_rules(&[
        (r"\b(?:cancer|tumou?rs?|malignan\w*|carcinoma|oncolog\w*)\b", "Cancer"),
        (r"\bdiabet\w*", "Diabetes"),
        (r"\balzheimer\w*", "Alzheimer"),
        (r"\bparkinson\w*", "Parkinson"),
        (r"\b(?:heart|cardiac|cardiovascular)\b", "Cardiovascular"),
        (r"\bhypertensi\w*", "Hypertension"),
        (r"\barthritis\b", "Arthritis"),
        (r"\bleuka?emia\b", "Leukemia"),
        (r"\blupus\b", "Lupus"),
        (r"\b(?:healthy|controls?)\b", "Healthy"),
    ])
});

static PRESERVATION: LazyLock<Vec<TagRule>> = LazyLock::new(|| {
    compile_rules(&[
        (r"\b(?:ffpe|formalin)\b", "FFPE"),
        (r"\bfrozen\b", "Frozen"),
    ])
});

pub fn parse_query(query: &str) -> ParsedQuery {
    let text = query.to_lowercase();

    let mut parsed = ParsedQuery {
        original_query: query.to_string(),
        ..ParsedQuery::default()
    };

    parsed.age_min = first_bound(&AGE_ABOVE, &text);
    parsed.age_max = first_bound(&AGE_BELOW, &text);

    // Range phrasing is evaluated last and replaces both bounds.
    if let Some((min, max)) = first_range(&AGE_RANGE, &text) {
        parsed.age_min = Some(min);
        parsed.age_max = Some(max);
    }

    parsed.gender = detect_gender(&text);
    parsed.sample_types = collect_tags(&SAMPLE_TYPES, &text);
    parsed.diagnoses = collect_tags(&DIAGNOSES, &text);
    parsed.preservation_methods = collect_tags(&PRESERVATION, &text);

    tracing::debug!("Parsed query {:?} into {:?}", query, parsed);
    parsed
}

fn first_bound(patterns: &[Regex], text: &str) -> Option<u32> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    })
}

fn first_range(patterns: &[Regex], text: &str) -> Option<(u32, u32)> {
    patterns.iter().find_map(|re| {
        let cap = re.captures(text)?;
        let min = cap.get(1)?.as_str().parse::<u32>().ok()?;
        let max = cap.get(2)?.as_str().parse::<u32>().ok()?;
        Some((min, max))
    })
}

fn detect_gender(text: &str) -> Option<Gender> {
    match (MALE.is_match(text), FEMALE.is_match(text)) {
        (true, false) => Some(Gender::Male),
        (false, true) => Some(Gender::Female),
        _ => None,
    }
}

fn collect_tags(rules: &[TagRule], text: &str) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.tag.to_string())
        .collect()
}

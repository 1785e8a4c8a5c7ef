use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use log::debug;
use std::collections::HashSet;

use super::normalize::{HeaderToken, normalize};

#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub total_columns: usize,
    pub matched: Vec<FieldMatch>,
    pub missing: Vec<MissingField>,
    /// Non-empty headers no expected field claimed
    pub extra: Vec<HeaderToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub expected: String,
    pub column: usize,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub expected: String,
    /// Closest unclaimed header, if any scored at all
    pub suggestion: Option<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Coverage Summary:\n\
             • Total columns: {}\n\
             • Matched fields: {}\n\
             • Missing fields: {}\n\
             • Extra columns: {}",
            self.total_columns,
            self.matched.len(),
            self.missing.len(),
            self.extra.len()
        )
    }
}

/// Check that every expected field name has a column whose normalized header equals it.
///
/// Both sides go through [`normalize`]. Empty headers are skipped. When two
/// columns normalize to the same token the leftmost one wins.
pub fn check_coverage<S: AsRef<str>>(headers: &[HeaderToken], expected: &[S]) -> CoverageReport {
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut matched = Vec::new();
    let mut unresolved = Vec::new();

    for field in expected {
        let field = field.as_ref();
        let wanted = normalize(field);
        if wanted.is_empty() {
            debug!("Skipping expected field '{}' with empty normalized form", field);
            continue;
        }

        let hit = headers
            .iter()
            .filter(|h| !h.is_empty() && !claimed.contains(&h.column))
            .find(|h| h.normalized_text == wanted);

        match hit {
            Some(header) => {
                claimed.insert(header.column);
                debug!("Matched expected '{}' to column {}", field, header.column);
                matched.push(FieldMatch {
                    expected: field.to_string(),
                    column: header.column,
                    header: header.raw_text.clone().unwrap_or_default(),
                });
            }
            None => unresolved.push((field.to_string(), wanted)),
        }
    }

    let unclaimed: Vec<&HeaderToken> = headers
        .iter()
        .filter(|h| !h.is_empty() && !claimed.contains(&h.column))
        .collect();

    let missing = unresolved
        .into_iter()
        .map(|(expected, wanted)| MissingField {
            suggestion: best_suggestion(&wanted, &unclaimed),
            expected,
        })
        .collect();

    CoverageReport {
        total_columns: headers.len(),
        matched,
        missing,
        extra: unclaimed.into_iter().cloned().collect(),
    }
}

fn best_suggestion(wanted: &str, candidates: &[&HeaderToken]) -> Option<String> {
    let matcher = SkimMatcherV2::default();
    candidates
        .iter()
        .filter_map(|h| {
            // Try both directions so abbreviations on either side still score
            let score = matcher
                .fuzzy_match(&h.normalized_text, wanted)
                .max(matcher.fuzzy_match(wanted, &h.normalized_text))?;
            Some((score, h))
        })
        .max_by_key(|(score, _)| *score)
        .and_then(|(_, h)| h.raw_text.clone())
}

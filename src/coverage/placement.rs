use tracing::debug;

use super::types::{PlacementKind, PlacementSuggestion};
use crate::constants::{FALLBACK_HEADING, MIN_PLACEMENT_TERM_CHARS};

/// Lower-cased query terms longer than three characters, first occurrence order.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > MIN_PLACEMENT_TERM_CHARS)
    {
        let word = word.to_lowercase();
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
}

/// Suggests the heading under which content for `query` should be placed.
///
/// Each heading scores the number of query terms it contains (case-insensitive
/// substring). The highest count wins and ties go to the earliest heading. With no
/// match the last heading is used, or [`FALLBACK_HEADING`] for a heading-less document.
pub fn suggest_placement(query: &str, headings: &[String]) -> PlacementSuggestion {
    let terms = query_terms(query);

    let mut best: Option<(&String, Vec<String>)> = None;
    for heading in headings {
        let lowered = heading.to_lowercase();
        let matched: Vec<String> = terms
            .iter()
            .filter(|t| lowered.contains(t.as_str()))
            .cloned()
            .collect();

        let better = match &best {
            Some((_, current)) => matched.len() > current.len(),
            None => !matched.is_empty(),
        };
        if better {
            best = Some((heading, matched));
        }
    }

    match best {
        Some((heading, matched_terms)) => {
            debug!(
                heading = %heading,
                matches = matched_terms.len(),
                "Placement matched heading"
            );
            PlacementSuggestion {
                rationale: format!(
                    "Heading \"{}\" shares {} query term(s): {}",
                    heading,
                    matched_terms.len(),
                    matched_terms.join(", ")
                ),
                heading: heading.clone(),
                kind: PlacementKind::Matched,
                matched_terms,
            }
        }
        None => {
            let (heading, rationale) = match headings.last() {
                Some(last) => {
                    let rationale = format!(
                        "No heading matches the query terms; defaulting to the last section \"{last}\""
                    );
                    (last.clone(), rationale)
                }
                None => (
                    FALLBACK_HEADING.to_string(),
                    format!("Document has no headings; defaulting to \"{FALLBACK_HEADING}\""),
                ),
            };
            PlacementSuggestion {
                heading,
                kind: PlacementKind::Default,
                matched_terms: Vec::new(),
                rationale,
            }
        }
    }
}

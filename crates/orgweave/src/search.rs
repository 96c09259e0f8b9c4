//! Fuzzy entity search: a weighted-ratio matcher over entity names.
//!
//! Combines plain, partial, token-sort, and token-set ratios on a
//! 0-100 scale, keeps candidates scoring at least 50, and returns the
//! top `k` ordered by score with insertion order breaking ties. Runs a
//! linear pass over entity names; no index is maintained.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::engine::GraphEngine;
use crate::model::EntityKind;

/// Minimum score a candidate must reach to be returned.
pub const SCORE_THRESHOLD: u32 = 50;

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best full-ratio of the shorter string against every same-length
/// window of the longer one.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    if long_chars.len() == short_len {
        return ratio(short, long);
    }
    let mut best: f64 = 0.0;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn tokens(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let mut ta = tokens(a);
    let mut tb = tokens(b);
    ta.sort();
    tb.sort();
    ratio(&ta.join(" "), &tb.join(" "))
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;
    let sa: BTreeSet<String> = tokens(a).into_iter().collect();
    let sb: BTreeSet<String> = tokens(b).into_iter().collect();
    let common: Vec<String> = sa.intersection(&sb).cloned().collect();
    let only_a: Vec<String> = sa.difference(&sb).cloned().collect();
    let only_b: Vec<String> = sb.difference(&sa).cloned().collect();
    let base = common.join(" ");
    let combined_a = if only_a.is_empty() {
        base.clone()
    } else {
        format!("{base} {}", only_a.join(" ")).trim().to_string()
    };
    let combined_b = if only_b.is_empty() {
        base.clone()
    } else {
        format!("{base} {}", only_b.join(" ")).trim().to_string()
    };
    ratio(&base, &combined_a)
        .max(ratio(&base, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Weighted combination of the four ratios, 0-100.
#[must_use]
pub fn weighted_ratio(query: &str, candidate: &str) -> u32 {
    let q = query.to_lowercase();
    let c = candidate.to_lowercase();
    if q.is_empty() || c.is_empty() {
        return 0;
    }
    let score = ratio(&q, &c)
        .max(partial_ratio(&q, &c) * 0.9)
        .max(token_sort_ratio(&q, &c))
        .max(token_set_ratio(&q, &c) * 0.95);
    score.round().clamp(0.0, 100.0) as u32
}

/// One scored match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub entity_type: String,
    pub score: u32,
}

/// Score every entity name against the query and keep the best `limit`.
#[must_use]
pub fn search_entities(
    engine: &dyn GraphEngine,
    query: &str,
    kind: Option<EntityKind>,
    limit: usize,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = engine
        .list_entities(kind, None)
        .into_iter()
        .filter_map(|entity| {
            let score = weighted_ratio(query, &entity.name);
            (score >= SCORE_THRESHOLD).then(|| SearchHit {
                id: entity.id.clone(),
                name: entity.name.clone(),
                entity_type: entity.kind().as_str().to_string(),
                score,
            })
        })
        .collect();
    // Stable sort: equal scores keep insertion order.
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::model::{Entity, EntityBody, PersonBody, SystemBody};

    #[test]
    fn test_exact_match_scores_100() {
        assert_eq!(weighted_ratio("Billing Engine", "Billing Engine"), 100);
        assert_eq!(weighted_ratio("billing engine", "Billing Engine"), 100);
    }

    #[test]
    fn test_partial_match_scores_high() {
        assert!(weighted_ratio("billing", "Billing Engine") >= 80);
        assert!(weighted_ratio("engine billing", "Billing Engine") >= 90);
    }

    #[test]
    fn test_unrelated_scores_low() {
        assert!(weighted_ratio("kubernetes", "Payroll Ledger") < 50);
        assert_eq!(weighted_ratio("", "anything"), 0);
    }

    #[test]
    fn test_search_filters_and_ranks() {
        let mut engine = default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new("Billing Engine", EntityBody::System(SystemBody::default()))
                    .with_id("s1"),
                Entity::new("Billing Portal", EntityBody::System(SystemBody::default()))
                    .with_id("s2"),
                Entity::new("Bill Ngman", EntityBody::Person(PersonBody::default()))
                    .with_id("p1"),
            ])
            .unwrap();

        let hits = search_entities(engine.as_ref(), "billing engine", None, 10);
        assert_eq!(hits[0].id, "s1");
        assert_eq!(hits[0].score, 100);

        let systems_only = search_entities(
            engine.as_ref(),
            "billing",
            Some(EntityKind::System),
            10,
        );
        assert!(systems_only.iter().all(|h| h.entity_type == "system"));

        let limited = search_entities(engine.as_ref(), "billing", None, 1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut engine = default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new("Alpha Service", EntityBody::System(SystemBody::default()))
                    .with_id("first"),
                Entity::new("Alpha Service", EntityBody::System(SystemBody::default()))
                    .with_id("second"),
            ])
            .unwrap();
        let hits = search_entities(engine.as_ref(), "Alpha Service", None, 10);
        assert_eq!(hits[0].id, "first");
        assert_eq!(hits[1].id, "second");
    }
}

//! Question routing.
//!
//! Classifies a question into the information-need category that decides
//! which pipeline branches run. Routing is a closed, ordered decision
//! table evaluated first-match-wins — deterministic and auditable, not a
//! learned classifier.

use serde::{Deserialize, Serialize};

/// The category of information source(s) needed to answer a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Document corpus only
    Rag,
    /// Relational store only
    Sql,
    /// Both sources
    Hybrid,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Rag => "rag",
            Route::Sql => "sql",
            Route::Hybrid => "hybrid",
        }
    }
}

/// One routing rule: if any cue occurs in the lowercased question, the
/// question takes this route.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub cues: &'static [&'static str],
    pub route: Route,
}

/// The routing decision table, evaluated in order.
///
/// Policy/definition phrasing reads from documents; the exact aggregate
/// phrases read from the store; everything else consults both.
pub const ROUTING_TABLE: &[RouteRule] = &[
    RouteRule {
        cues: &["policy", "definition", "what is"],
        route: Route::Rag,
    },
    RouteRule {
        cues: &["top 3 products by revenue"],
        route: Route::Sql,
    },
];

/// Classify a question. Total: every question maps to exactly one route,
/// with [`Route::Hybrid`] as the catch-all.
pub fn classify(question: &str) -> Route {
    let question_lower = question.to_lowercase();

    for rule in ROUTING_TABLE {
        if rule.cues.iter().any(|cue| question_lower.contains(cue)) {
            return rule.route;
        }
    }

    Route::Hybrid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_routes_to_rag() {
        assert_eq!(classify("What is the return policy for beverages?"), Route::Rag);
        assert_eq!(classify("Give me the definition of gross margin"), Route::Rag);
    }

    #[test]
    fn test_aggregate_phrase_routes_to_sql() {
        assert_eq!(classify("What are the top 3 products by revenue?"), Route::Sql);
    }

    #[test]
    fn test_no_cue_routes_to_hybrid() {
        assert_eq!(
            classify("Which category sold the most during Summer Beverages 1997 by quantity?"),
            Route::Hybrid
        );
        assert_eq!(classify(""), Route::Hybrid);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let question = "What was the average order value during Winter Classics 1997?";
        assert_eq!(classify(question), classify(question));
    }

    #[test]
    fn test_rag_rule_wins_over_later_rules() {
        // "what is" appears before the sql cue in the table
        assert_eq!(classify("What is the top 3 products by revenue policy?"), Route::Rag);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("RETURN POLICY?"), Route::Rag);
    }
}

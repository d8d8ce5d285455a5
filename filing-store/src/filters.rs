//! Company filter conversion to Qdrant `Filter`.
//!
//! Retrieval is constrained to records whose company field matches any of
//! the requested companies (logical OR), mirroring a `ContainsAny` filter.

use crate::record::FIELD_COMPANY;
use qdrant_client::qdrant::{Condition, FieldCondition, Filter, Match, condition::ConditionOneOf};
use tracing::debug;

/// Builds an OR filter over the company-name payload field.
///
/// Each company becomes a keyword `should` condition; Qdrant requires at
/// least one `should` clause to match when no `must` clauses are present,
/// which gives the OR semantics the retrieval contract needs.
///
/// Returns `None` for an empty company list (no constraint).
pub fn companies_filter(companies: &[String]) -> Option<Filter> {
    if companies.is_empty() {
        return None;
    }
    debug!("filters::companies_filter companies={}", companies.len());

    let should: Vec<Condition> = companies
        .iter()
        .map(|name| Condition {
            condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
                key: FIELD_COMPANY.to_string(),
                r#match: Some(Match {
                    match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Keyword(
                        name.clone(),
                    )),
                }),
                ..Default::default()
            })),
        })
        .collect();

    Some(Filter {
        should,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_means_no_filter() {
        assert!(companies_filter(&[]).is_none());
    }

    #[test]
    fn one_should_condition_per_company() {
        let f = companies_filter(&["Acme Corp".into(), "Beta Inc".into()]).unwrap();
        assert_eq!(f.should.len(), 2);
        assert!(f.must.is_empty());
        assert!(f.must_not.is_empty());
    }
}

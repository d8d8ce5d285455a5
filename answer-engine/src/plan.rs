//! Query planning: one retrieval query per company.
//!
//! A question spanning several companies retrieves poorly as-is, because
//! the single query pulls mixed passages that crowd each other out of the
//! top results. The planner fans a comparison out into one metrics query
//! per company; a single-company question passes through unmodified.

/// Financial metrics requested for every company in a comparison.
pub const DEFAULT_METRICS: [&str; 11] = [
    "Revenue",
    "Net Income",
    "Earnings Per Share (EPS)",
    "Total Assets",
    "Liabilities",
    "Equity",
    "Operating Cash Flow",
    "Capital Expenditures",
    "R&D Expenses",
    "Debt to Equity Ratio",
    "Market Cap",
];

/// A retrieval query scoped to one company.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyQuery {
    pub company_name: String,
    pub query_text: String,
}

/// Plans retrieval queries for the given question and company list.
///
/// One company (or none) yields a single query with the question text
/// unmodified. Several companies yield one templated metrics query per
/// company, each to be retrieved against that company only.
pub fn plan(query: &str, companies: &[String], metrics: Option<&[&str]>) -> Vec<CompanyQuery> {
    if companies.len() <= 1 {
        return vec![CompanyQuery {
            company_name: companies.first().cloned().unwrap_or_default(),
            query_text: query.to_string(),
        }];
    }
    comparison_queries(companies, metrics)
}

/// Builds the per-company metrics queries for a comparison question.
pub fn comparison_queries(companies: &[String], metrics: Option<&[&str]>) -> Vec<CompanyQuery> {
    let metrics_string = metrics.unwrap_or(&DEFAULT_METRICS).join("\", \"");
    companies
        .iter()
        .map(|company| CompanyQuery {
            company_name: company.clone(),
            query_text: format!("Extract the following metrics for {company}: \"{metrics_string}\"."),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn companies(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_company_keeps_the_query_unmodified() {
        let out = plan("What was revenue in 2023?", &companies(&["Acme Corp"]), None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company_name, "Acme Corp");
        assert_eq!(out[0].query_text, "What was revenue in 2023?");
    }

    #[test]
    fn comparison_yields_one_templated_query_per_company() {
        let out = plan(
            "Compare Acme and Beta",
            &companies(&["Acme Corp", "Beta Inc"]),
            None,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].company_name, "Acme Corp");
        assert_eq!(
            out[0].query_text,
            "Extract the following metrics for Acme Corp: \"Revenue\", \"Net Income\", \
             \"Earnings Per Share (EPS)\", \"Total Assets\", \"Liabilities\", \"Equity\", \
             \"Operating Cash Flow\", \"Capital Expenditures\", \"R&D Expenses\", \
             \"Debt to Equity Ratio\", \"Market Cap\"."
        );
        assert!(out[1].query_text.contains("Beta Inc"));
    }

    #[test]
    fn custom_metrics_replace_the_defaults() {
        let out = plan(
            "Compare",
            &companies(&["Acme Corp", "Beta Inc"]),
            Some(&["Revenue", "Market Cap"]),
        );
        assert_eq!(
            out[0].query_text,
            "Extract the following metrics for Acme Corp: \"Revenue\", \"Market Cap\"."
        );
    }

    #[test]
    fn empty_company_list_still_plans_one_query() {
        let out = plan("What was revenue?", &[], None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company_name, "");
        assert_eq!(out[0].query_text, "What was revenue?");
    }
}

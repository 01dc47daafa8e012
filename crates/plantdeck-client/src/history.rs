//! Historical query engine: range filters, fetch, and report export URLs.
//!
//! The history view performs a full replace of its table and chart on every
//! query; there is no incremental diffing. An empty result set is a valid
//! answer, not an error.

use plantdeck_types::HistoryRecord;

use crate::error::Result;
use crate::transport::NodeApi;

/// Optional since/until bounds for a history or report query.
///
/// Bounds are carried as the user typed them: the node validates the
/// textual format, the client only decides inclusion. Empty input means "no
/// bound".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeFilter {
    since: Option<String>,
    until: Option<String>,
}

impl RangeFilter {
    /// An unbounded filter (the initial, unfiltered query).
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from raw text inputs, keeping only non-empty bounds.
    pub fn from_inputs(since: &str, until: &str) -> Self {
        let keep = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            since: keep(since),
            until: keep(until),
        }
    }

    /// Whether neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    /// Render the query-string suffix: `""` when unbounded, otherwise
    /// `?since=..&until=..` with only the bounds that are present.
    pub fn query_string(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(since) = &self.since {
            parts.push(format!("since={}", since));
        }
        if let Some(until) = &self.until {
            parts.push(format!("until={}", until));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

/// Fetch the ordered record set matching `filter`.
///
/// The caller replaces its table and chart state wholesale with the result.
pub async fn fetch<A: NodeApi + ?Sized>(api: &A, filter: &RangeFilter) -> Result<Vec<HistoryRecord>> {
    api.history(filter).await
}

/// Construct the PDF report export URL for the same optional range.
///
/// The export itself is delegated to the external reporting collaborator
/// (opened out-of-band); this component never parses the document.
pub fn report_url(base_url: &str, filter: &RangeFilter) -> String {
    format!("{}/api/reports/pdf{}", base_url, filter.query_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNode;

    #[test]
    fn test_query_string_both_bounds() {
        let filter = RangeFilter::from_inputs("2024-01-01", "2024-01-02");
        assert_eq!(filter.query_string(), "?since=2024-01-01&until=2024-01-02");
    }

    #[test]
    fn test_query_string_single_bound() {
        assert_eq!(
            RangeFilter::from_inputs("2024-01-01", "").query_string(),
            "?since=2024-01-01"
        );
        assert_eq!(
            RangeFilter::from_inputs("", "2024-01-02").query_string(),
            "?until=2024-01-02"
        );
    }

    #[test]
    fn test_query_string_empty() {
        let filter = RangeFilter::from_inputs("", "   ");
        assert!(filter.is_empty());
        assert_eq!(filter.query_string(), "");
    }

    #[test]
    fn test_report_url() {
        let filter = RangeFilter::from_inputs("2024-01-01", "2024-01-02");
        assert_eq!(
            report_url("http://node.local", &filter),
            "http://node.local/api/reports/pdf?since=2024-01-01&until=2024-01-02"
        );
        assert_eq!(
            report_url("http://node.local", &RangeFilter::all()),
            "http://node.local/api/reports/pdf"
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_result_is_ok() {
        let node = MockNode::new();
        let items = fetch(&node, &RangeFilter::all()).await.unwrap();
        assert!(items.is_empty());
    }
}

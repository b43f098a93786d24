//! Per-request query parameters and how they combine with client defaults.

use cqlgate_proto::{BatchParameters, Consistency, QueryParameters};

/// Parameters a request may carry: keyspace, consistency and page size.
///
/// Every field is optional. `Some("")` is an explicitly set, empty keyspace
/// and is distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Keyspace the request runs in.
    pub keyspace: Option<String>,
    /// Requested consistency level.
    pub consistency: Option<Consistency>,
    /// Maximum number of rows per page.
    pub page_size: Option<i32>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyspace.
    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    /// Set the consistency level.
    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Combine client defaults with a request's own parameters.
    ///
    /// A request without parameters gets a copy of the defaults. A request
    /// with parameters keeps them as they are; only a missing keyspace is
    /// taken from the defaults. Default consistency and page size do not
    /// apply once the request carries its own parameters.
    pub fn merge(defaults: Option<&QueryParams>, request: Option<&QueryParams>) -> Option<QueryParams> {
        match (defaults, request) {
            (defaults, None) => defaults.cloned(),
            (None, Some(request)) => Some(request.clone()),
            (Some(defaults), Some(request)) => {
                let mut merged = request.clone();
                if merged.keyspace.is_none() {
                    merged.keyspace = defaults.keyspace.clone();
                }
                Some(merged)
            }
        }
    }

    /// Protocol form for a single query.
    pub fn to_query_parameters(&self) -> QueryParameters {
        QueryParameters {
            keyspace: self.keyspace.clone(),
            consistency: self.consistency,
            page_size: self.page_size,
            paging_state: None,
        }
    }

    /// Protocol form for a batch. Batches are not paged.
    pub fn to_batch_parameters(&self) -> BatchParameters {
        BatchParameters {
            keyspace: self.keyspace.clone(),
            consistency: self.consistency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn defaults() -> QueryParams {
        QueryParams::new()
            .with_keyspace("ks_default")
            .with_consistency(Consistency::Quorum)
            .with_page_size(100)
    }

    #[test]
    fn test_merge_without_request_params() {
        let d = defaults();
        assert_eq!(QueryParams::merge(Some(&d), None), Some(d));
        assert_eq!(QueryParams::merge(None, None), None);
    }

    #[test]
    fn test_merge_fills_missing_keyspace_only() {
        let request = QueryParams::new().with_consistency(Consistency::One);
        let merged = QueryParams::merge(Some(&defaults()), Some(&request)).unwrap();

        assert_eq!(merged.keyspace.as_deref(), Some("ks_default"));
        assert_eq!(merged.consistency, Some(Consistency::One));
        // Default page size is not consulted once the request has parameters.
        assert_eq!(merged.page_size, None);
    }

    #[test]
    fn test_merge_keeps_explicit_keyspace() {
        let request = QueryParams::new().with_keyspace("other");
        let merged = QueryParams::merge(Some(&defaults()), Some(&request)).unwrap();
        assert_eq!(merged.keyspace.as_deref(), Some("other"));
        assert_eq!(merged.consistency, None);

        let request = QueryParams::new().with_keyspace("");
        let merged = QueryParams::merge(Some(&defaults()), Some(&request)).unwrap();
        assert_eq!(merged.keyspace.as_deref(), Some(""));
    }

    #[test]
    fn test_merge_without_defaults() {
        let request = QueryParams::new().with_page_size(10);
        assert_eq!(
            QueryParams::merge(None, Some(&request)),
            Some(request.clone())
        );
    }

    #[test]
    fn test_protocol_forms() {
        let p = defaults();
        assert_eq!(
            p.to_query_parameters(),
            QueryParameters {
                keyspace: Some("ks_default".into()),
                consistency: Some(Consistency::Quorum),
                page_size: Some(100),
                paging_state: None,
            }
        );
        assert_eq!(
            p.to_batch_parameters(),
            BatchParameters {
                keyspace: Some("ks_default".into()),
                consistency: Some(Consistency::Quorum),
            }
        );
    }
}

//! Route parameters and query strings
//!
//! Named locations carry `params` that are substituted into `:param` segments
//! and a `query` that is serialized onto the generated path.

use std::collections::HashMap;
use url::form_urlencoded;

/// Route parameters for named route generation
///
/// # Example
///
/// ```
/// use router_link::RouteParams;
///
/// let params = RouteParams::new().with("id", "123");
///
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value as a string
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Insert a parameter, replacing any previous value
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Overlay `other` on top of these params; keys in `other` win
    pub fn merged(&self, other: &RouteParams) -> RouteParams {
        let mut params = self.params.clone();
        params.extend(other.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        RouteParams { params }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Ordered query parameters
///
/// Pairs keep insertion order so generated hrefs are stable.
///
/// # Example
///
/// ```
/// use router_link::QueryParams;
///
/// let query = QueryParams::from_query_string("page=1&tag=rust&tag=web");
///
/// assert_eq!(query.get("page"), Some("1"));
/// assert_eq!(query.get_all("tag"), vec!["rust", "web"]);
/// assert_eq!(query.to_query_string(), "page=1&tag=rust&tag=web");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create new empty query params
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string, with or without the leading `?`
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append a pair; repeated keys are kept
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Get first value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a key
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Serialize without the leading `?`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Check if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

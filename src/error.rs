//! Error types for link bindings and the reference router
//!
//! Most link edge cases (absent targets, non-anchor elements, cross-origin
//! hrefs) are handled by falling back to the browser's default behaviour and
//! never surface here.

use std::fmt;

/// Errors reported by link bindings and path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// A link was bound without an enclosing router.
    ///
    /// The binding stays inert for the rest of its life.
    NoRouterContext,

    /// A named location referenced a route that was never registered
    UnknownRouteName { name: String },

    /// A URL could not be parsed against the document location
    InvalidUrl { url: String, reason: String },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NoRouterContext => {
                write!(f, "links can only be used inside a router-enabled app")
            }
            LinkError::UnknownRouteName { name } => {
                write!(f, "Unknown route name: {}", name)
            }
            LinkError::InvalidUrl { url, reason } => {
                write!(f, "Invalid URL '{}': {}", url, reason)
            }
        }
    }
}

impl std::error::Error for LinkError {}

/// Result alias used across the crate
pub type LinkResult<T> = Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_router_display() {
        let error = LinkError::NoRouterContext;
        assert_eq!(
            error.to_string(),
            "links can only be used inside a router-enabled app"
        );
    }

    #[test]
    fn test_unknown_route_display() {
        let error = LinkError::UnknownRouteName {
            name: "home".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown route name: home");
    }

    #[test]
    fn test_invalid_url_display() {
        let error = LinkError::InvalidUrl {
            url: "http://[::1".to_string(),
            reason: "invalid IPv6 address".to_string(),
        };
        assert!(error.to_string().starts_with("Invalid URL 'http://[::1'"));
    }
}

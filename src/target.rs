//! Navigation targets
//!
//! A link points either at a plain path string or at a structured location
//! descriptor carrying flags that affect both navigation and active-class
//! computation.

use crate::params::{QueryParams, RouteParams};

/// Structured navigation target
///
/// # Example
///
/// ```
/// use router_link::LocationDescriptor;
///
/// let location = LocationDescriptor::path("/users")
///     .exact(true)
///     .active_class("selected");
///
/// assert_eq!(location.path.as_deref(), Some("/users"));
/// assert!(location.exact);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDescriptor {
    /// Target path, absolute or relative to the current route
    pub path: Option<String>,
    /// Name of a registered route
    pub name: Option<String>,
    /// Params for named route generation
    pub params: RouteParams,
    /// Query appended to the generated path
    pub query: QueryParams,
    /// Resolve relative paths by appending to the current path
    pub append: bool,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
    /// Only mark the link active on an exact match
    pub exact: bool,
    /// Per-link active class, overriding the router default
    pub active_class: Option<String>,
}

impl LocationDescriptor {
    /// Location for a path
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Location for a named route
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set a route param
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a query pair
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Set the append flag
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Set the replace flag
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Set the exact flag
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set the active class
    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = Some(class.into());
        self
    }
}

/// What a link navigates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A plain path or URL string
    Path(String),
    /// A structured location
    Location(LocationDescriptor),
}

impl NavigationTarget {
    /// The plain string, if this is a string target
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NavigationTarget::Path(path) => Some(path),
            NavigationTarget::Location(_) => None,
        }
    }

    /// The descriptor, if this is a structured target
    pub fn as_location(&self) -> Option<&LocationDescriptor> {
        match self {
            NavigationTarget::Path(_) => None,
            NavigationTarget::Location(location) => Some(location),
        }
    }

    /// Route name of a named location
    pub fn route_name(&self) -> Option<&str> {
        self.as_location()?.name.as_deref()
    }

    /// Append flag; always false for string targets
    pub fn is_append(&self) -> bool {
        self.as_location().is_some_and(|l| l.append)
    }

    /// Replace flag; always false for string targets
    pub fn is_replace(&self) -> bool {
        self.as_location().is_some_and(|l| l.replace)
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        NavigationTarget::Path(path)
    }
}

impl From<LocationDescriptor> for NavigationTarget {
    fn from(location: LocationDescriptor) -> Self {
        NavigationTarget::Location(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_target() {
        let target = NavigationTarget::from("/about");
        assert_eq!(target.as_str(), Some("/about"));
        assert!(target.as_location().is_none());
        assert!(!target.is_append());
        assert!(!target.is_replace());
        assert_eq!(target.route_name(), None);
    }

    #[test]
    fn test_named_target() {
        let target: NavigationTarget = LocationDescriptor::named("home").into();
        assert_eq!(target.route_name(), Some("home"));
        assert_eq!(target.as_str(), None);
    }

    #[test]
    fn test_descriptor_flags() {
        let target: NavigationTarget = LocationDescriptor::path("child")
            .append(true)
            .replace(true)
            .into();
        assert!(target.is_append());
        assert!(target.is_replace());
    }

    #[test]
    fn test_descriptor_builder() {
        let location = LocationDescriptor::named("user")
            .param("id", "5")
            .query("tab", "posts")
            .active_class("on");

        assert_eq!(location.params.get("id"), Some(&"5".to_string()));
        assert_eq!(location.query.get("tab"), Some("posts"));
        assert_eq!(location.active_class.as_deref(), Some("on"));
        assert!(!location.exact);
    }
}

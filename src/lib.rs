//! # Router Link
//!
//! Active navigation links for client-side routers:
//!
//! - **Href formatting** - anchors get the router's URL for their target
//!   (HTML5 paths, `#` fragments, or `#name` for named routes)
//! - **Click interception** - primary-button clicks navigate through the
//!   router instead of reloading the page; modified clicks, cross-origin
//!   targets and `target="_blank"` anchors are left to the browser
//! - **Delegation** - a link bound to a container routes clicks on its
//!   descendant anchors to each anchor's own path
//! - **Active class** - the link is marked active while the current route
//!   matches its target, exactly or as a segment-aware path prefix
//!
//! The host is abstracted behind three traits: [`RouterContext`] for the
//! router, [`Element`] for the bound element and [`Document`] for the page
//! location. [`Router`] and the [`memory`] host implement them without a
//! browser.
//!
//! # Quick Start
//!
//! ```
//! use router_link::memory::{MemoryDocument, MemoryElement};
//! use router_link::{Element, HistoryMode, LinkBinding, LocationDescriptor, Router, RouterOptions};
//! use std::rc::Rc;
//!
//! let router = Rc::new(Router::new(
//!     RouterOptions::new().mode(HistoryMode::Html5 { root: None }),
//! ));
//! let document = Rc::new(MemoryDocument::parse("https://example.com/").unwrap());
//!
//! let nav = MemoryElement::new("a");
//! let _link = LinkBinding::mount(
//!     nav.clone(),
//!     Some(router.clone()),
//!     document,
//!     LocationDescriptor::path("/users").exact(true),
//! )
//! .unwrap();
//!
//! assert_eq!(nav.attribute("href").as_deref(), Some("/users"));
//! assert!(!nav.has_class("router-link-active"));
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)

#![doc(html_root_url = "https://docs.rs/router-link/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Error handling
pub mod error;

// Path handling and matching
pub mod matcher;
pub mod origin;
pub mod params;
pub mod path;
pub mod target;

// Router integration
pub mod history;
pub mod router;

// Host abstraction
pub mod dom;
pub mod memory;

// Link bindings
pub mod link;

// Re-export main types for convenient access
pub use dom::{ClickEvent, ClickListener, Document, Element, ListenerId};
pub use error::{LinkError, LinkResult};
pub use history::{History, HistoryMode};
pub use link::{Directive, LinkBinding};
pub use matcher::{exact_match, is_active, ActivePattern};
pub use origin::{same_origin, Origin, OriginSubject};
pub use params::{QueryParams, RouteParams};
pub use router::{
    NamedRouteRegistry, RouteListener, RouteMode, Router, RouterContext, RouterOptions,
    SubscriptionId, DEFAULT_LINK_ACTIVE_CLASS,
};
pub use target::{LocationDescriptor, NavigationTarget};

/// Snapshot of the active route delivered to route listeners
///
/// # Example
///
/// ```
/// use router_link::Route;
///
/// let route = Route::new("/search?q=rust");
///
/// assert_eq!(route.path, "/search?q=rust");
/// assert_eq!(route.query.get("q"), Some("rust"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Full path including any query string
    pub path: String,
    /// Name of the route, when navigated to by name
    pub name: Option<String>,
    /// Params used to generate a named route
    pub params: RouteParams,
    /// Parsed query string
    pub query: QueryParams,
}

impl Route {
    /// Create a route for `path`, parsing its query string
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let query = path
            .split_once('?')
            .map(|(_, query)| QueryParams::from_query_string(query))
            .unwrap_or_default();

        Self {
            path,
            name: None,
            params: RouteParams::new(),
            query,
        }
    }
}

/// Navigation direction indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// Navigating forward to a new route
    Forward,
    /// Navigating back in history
    Back,
    /// Replacing the current route without affecting history direction
    Replace,
}

/// Event emitted when the route changes.
///
/// Contains information about the navigation that occurred, including
/// the source and destination paths and the direction of navigation.
#[derive(Debug, Clone)]
pub struct RouteChangeEvent {
    /// The previous path (None if this is the first navigation)
    pub from: Option<String>,
    /// The new path being navigated to
    pub to: String,
    /// The direction of navigation
    pub direction: NavigationDirection,
}

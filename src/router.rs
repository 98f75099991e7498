//! Router context consumed by link bindings
//!
//! [`RouterContext`] is everything a link needs from its router: the current
//! route, path stringification, href formatting, navigation and route-change
//! subscriptions. [`Router`] is an in-memory implementation backed by
//! [`History`], usable by headless hosts and tests.

use crate::error::{LinkError, LinkResult};
use crate::history::{History, HistoryMode};
use crate::params::RouteParams;
use crate::path::{is_absolute, resolve_path};
use crate::target::{LocationDescriptor, NavigationTarget};
use crate::{debug_log, info_log, trace_log, warn_log, Route, RouteChangeEvent};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Default class applied to active links
pub const DEFAULT_LINK_ACTIVE_CLASS: &str = "router-link-active";

/// URL style the router writes into hrefs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// `#` fragment URLs
    Hash,
    /// Real paths
    History,
}

/// Handle for a route-change subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback invoked synchronously after every route change
pub type RouteListener = Rc<dyn Fn(&Route)>;

/// What link bindings need from a router
pub trait RouterContext {
    /// The active route
    fn current_route(&self) -> Route;

    /// Path of the active route, including its query string
    fn current_path(&self) -> String {
        self.current_route().path
    }

    /// URL style used for hrefs
    fn mode(&self) -> RouteMode;

    /// Class applied to active links that set none of their own
    fn link_active_class(&self) -> String;

    /// Canonical path for a target under the current route.
    ///
    /// Depends on the current route, so callers must not cache the result
    /// across route changes. Absent or unresolvable targets give `""`.
    fn stringify_path(&self, target: Option<&NavigationTarget>) -> String;

    /// Turn a resolved path into an href
    fn format_path(&self, path: &str, append: bool) -> String;

    /// Navigate to a target
    fn go(&self, target: &NavigationTarget);

    /// Register a route-change listener
    fn subscribe(&self, listener: RouteListener) -> SubscriptionId;

    /// Cancel a subscription; unknown ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}

// ============================================================================
// NamedRouteRegistry
// ============================================================================

/// Registry for named routes
#[derive(Clone, Debug, Default)]
pub struct NamedRouteRegistry {
    /// Map of route names to path patterns
    routes: HashMap<String, String>,
}

impl NamedRouteRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named route
    pub fn register(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.routes.insert(name.into(), pattern.into());
    }

    /// Get path pattern for a named route
    pub fn get(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }

    /// Generate a path for a named route.
    ///
    /// `:param` segments are replaced from `params`; segments without a value
    /// are kept as written.
    ///
    /// ```
    /// use router_link::{NamedRouteRegistry, RouteParams};
    ///
    /// let mut registry = NamedRouteRegistry::new();
    /// registry.register("user", "/users/:id/posts");
    ///
    /// let params = RouteParams::new().with("id", "5");
    /// assert_eq!(registry.url_for("user", &params).unwrap(), "/users/5/posts");
    /// ```
    pub fn url_for(&self, name: &str, params: &RouteParams) -> LinkResult<String> {
        let pattern = self.get(name).ok_or_else(|| LinkError::UnknownRouteName {
            name: name.to_string(),
        })?;

        let path = pattern
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(key) => params.get(key).map_or(segment, String::as_str),
                None => segment,
            })
            .collect::<Vec<_>>()
            .join("/");

        Ok(path)
    }

    /// Get number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ============================================================================
// RouterOptions
// ============================================================================

/// Router configuration
///
/// # Example
///
/// ```
/// use router_link::{HistoryMode, RouterOptions};
///
/// let options = RouterOptions::new()
///     .mode(HistoryMode::html5_with_root("/app"))
///     .link_active_class("is-active")
///     .history_limit(50);
///
/// assert_eq!(options.link_active_class, "is-active");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// How paths are written into hrefs
    pub mode: HistoryMode,
    /// Default class for active links
    pub link_active_class: String,
    /// Maximum history entries (0 = unlimited)
    pub history_limit: usize,
}

impl RouterOptions {
    /// Defaults: hash mode, `router-link-active`, 1000 entries
    pub fn new() -> Self {
        Self {
            mode: HistoryMode::default(),
            link_active_class: DEFAULT_LINK_ACTIVE_CLASS.to_string(),
            history_limit: 1000,
        }
    }

    /// Set the history mode
    pub fn mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the default active class
    pub fn link_active_class(mut self, class: impl Into<String>) -> Self {
        self.link_active_class = class.into();
        self
    }

    /// Set the history size limit
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

/// In-memory router
///
/// Single-threaded: listeners run synchronously inside [`Router::go`],
/// [`Router::back`] and [`Router::forward`], after the history has been
/// updated and all internal borrows released.
pub struct Router {
    options: RouterOptions,
    history: RefCell<History>,
    named_routes: RefCell<NamedRouteRegistry>,
    listeners: RefCell<Vec<(SubscriptionId, RouteListener)>>,
    next_subscription: Cell<u64>,
}

impl Router {
    /// Create a router at `/`
    pub fn new(options: RouterOptions) -> Self {
        Self::with_initial_path(options, "/")
    }

    /// Create a router at `path`
    pub fn with_initial_path(options: RouterOptions, path: &str) -> Self {
        let history = History::with_max_size(Route::new(path), options.history_limit);
        Self {
            options,
            history: RefCell::new(history),
            named_routes: RefCell::new(NamedRouteRegistry::new()),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Router options
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Register a named route pattern like `/users/:id`
    pub fn add_named_route(&self, name: impl Into<String>, pattern: impl Into<String>) {
        self.named_routes.borrow_mut().register(name, pattern);
    }

    /// Generate a path for a named route
    pub fn url_for(&self, name: &str, params: &RouteParams) -> LinkResult<String> {
        self.named_routes.borrow().url_for(name, params)
    }

    /// Resolve a target to its canonical path, reporting unknown route names
    pub fn resolve(&self, target: &NavigationTarget) -> LinkResult<String> {
        match target {
            NavigationTarget::Path(path) => Ok(path.clone()),
            NavigationTarget::Location(location) => self.resolve_location(location),
        }
    }

    fn resolve_location(&self, location: &LocationDescriptor) -> LinkResult<String> {
        let mut path = if let Some(name) = &location.name {
            let params = self.current_route().params.merged(&location.params);
            self.url_for(name, &params)?
        } else if let Some(path) = &location.path {
            path.clone()
        } else {
            return Ok(String::new());
        };

        if !location.query.is_empty() {
            let separator = if path.contains('?') { '&' } else { '?' };
            path.push(separator);
            path.push_str(&location.query.to_query_string());
        }

        Ok(path)
    }

    /// Go back one entry
    pub fn back(&self) -> Option<RouteChangeEvent> {
        let event = self.history.borrow_mut().back()?;
        self.notify();
        Some(event)
    }

    /// Go forward one entry
    pub fn forward(&self) -> Option<RouteChangeEvent> {
        let event = self.history.borrow_mut().forward()?;
        self.notify();
        Some(event)
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.history.borrow().can_go_back()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow().iter().any(|(sid, _)| *sid == id)
    }

    fn notify(&self) {
        let route = self.current_route();
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        trace_log!(
            "Notifying {} listeners of route '{}'",
            listeners.len(),
            route.path
        );

        for (id, listener) in listeners {
            // an earlier listener may have cancelled this one
            if self.is_subscribed(id) {
                listener(&route);
            }
        }
    }
}

impl RouterContext for Router {
    fn current_route(&self) -> Route {
        self.history.borrow().current().clone()
    }

    fn mode(&self) -> RouteMode {
        if self.options.mode.is_hash() {
            RouteMode::Hash
        } else {
            RouteMode::History
        }
    }

    fn link_active_class(&self) -> String {
        self.options.link_active_class.clone()
    }

    fn stringify_path(&self, target: Option<&NavigationTarget>) -> String {
        let Some(target) = target else {
            return String::new();
        };

        self.resolve(target).unwrap_or_else(|e| {
            warn_log!("Cannot resolve link target {:?}: {}", target, e);
            String::new()
        })
    }

    fn format_path(&self, path: &str, append: bool) -> String {
        let current = self.current_path();
        self.options.mode.format_path(path, append, &current)
    }

    fn go(&self, target: &NavigationTarget) {
        let path = self.stringify_path(Some(target));
        if path.is_empty() {
            debug_log!("Ignoring navigation to empty path");
            return;
        }

        let current = self.current_path();
        let path = if is_absolute(&path) {
            path
        } else {
            resolve_path(&current, &path, target.is_append())
        };

        if path == current {
            debug_log!("Already at '{}'", path);
            return;
        }

        let mut route = Route::new(&path);
        if let Some(location) = target.as_location() {
            if location.name.is_some() {
                route.name = location.name.clone();
                route.params = self.current_route().params.merged(&location.params);
            }
        }

        let event = {
            let mut history = self.history.borrow_mut();
            if target.is_replace() {
                history.replace(route)
            } else {
                history.push(route)
            }
        };

        info_log!(
            "Navigated {:?} from {:?} to '{}'",
            event.direction,
            event.from,
            event.to
        );

        self.notify();
    }

    fn subscribe(&self, listener: RouteListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("options", &self.options)
            .field("current", &self.history.borrow().current_path())
            .field("subscribers", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::QueryParams;

    fn router() -> Router {
        let router = Router::new(RouterOptions::new());
        router.add_named_route("user", "/users/:id");
        router
    }

    #[test]
    fn test_url_for_unknown_route() {
        let err = router().url_for("missing", &RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            LinkError::UnknownRouteName {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_url_for_does_not_touch_longer_params() {
        let mut registry = NamedRouteRegistry::new();
        registry.register("file", "/files/:id/:idx");
        let params = RouteParams::new().with("id", "1").with("idx", "2");
        assert_eq!(registry.url_for("file", &params).unwrap(), "/files/1/2");
    }

    #[test]
    fn test_stringify_targets() {
        let router = router();
        assert_eq!(router.stringify_path(None), "");
        assert_eq!(router.stringify_path(Some(&"/about".into())), "/about");

        let named: NavigationTarget = LocationDescriptor::named("user").param("id", "5").into();
        assert_eq!(router.stringify_path(Some(&named)), "/users/5");

        let with_query: NavigationTarget =
            LocationDescriptor::path("/search").query("q", "rust").into();
        assert_eq!(router.stringify_path(Some(&with_query)), "/search?q=rust");

        let existing_query: NavigationTarget = LocationDescriptor::path("/search?page=2")
            .query("q", "rust")
            .into();
        assert_eq!(
            router.stringify_path(Some(&existing_query)),
            "/search?page=2&q=rust"
        );

        let empty: NavigationTarget = LocationDescriptor::default().into();
        assert_eq!(router.stringify_path(Some(&empty)), "");
    }

    #[test]
    fn test_stringify_unknown_name_is_empty() {
        let target: NavigationTarget = LocationDescriptor::named("nope").into();
        assert_eq!(router().stringify_path(Some(&target)), "");
    }

    #[test]
    fn test_named_params_merge_with_current() {
        let router = Router::new(RouterOptions::new());
        router.add_named_route("post", "/users/:id/posts/:post");
        router.go(
            &LocationDescriptor::named("post")
                .param("id", "7")
                .param("post", "1")
                .into(),
        );
        assert_eq!(router.current_path(), "/users/7/posts/1");

        let sibling: NavigationTarget =
            LocationDescriptor::named("post").param("post", "2").into();
        assert_eq!(router.stringify_path(Some(&sibling)), "/users/7/posts/2");
    }

    #[test]
    fn test_go_push_replace_and_back() {
        let router = router();
        router.go(&"/a".into());
        router.go(&"/b".into());
        router.go(&LocationDescriptor::path("/c").replace(true).into());
        assert_eq!(router.current_path(), "/c");

        router.back();
        assert_eq!(router.current_path(), "/a");
        router.forward();
        assert_eq!(router.current_path(), "/c");
    }

    #[test]
    fn test_go_relative_and_append() {
        let router = Router::with_initial_path(RouterOptions::new(), "/users/1");
        router.go(&"2".into());
        assert_eq!(router.current_path(), "/users/2");

        router.go(&LocationDescriptor::path("posts").append(true).into());
        assert_eq!(router.current_path(), "/users/2/posts");
    }

    #[test]
    fn test_go_empty_is_ignored() {
        let router = router();
        router.go(&"".into());
        assert_eq!(router.current_path(), "/");
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_go_parses_query() {
        let router = router();
        router.go(&"/search?q=rust".into());
        assert_eq!(
            router.current_route().query,
            QueryParams::from_query_string("q=rust")
        );
    }

    #[test]
    fn test_listeners_are_notified_until_unsubscribed() {
        let router = router();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = router.subscribe(Rc::new(move |route: &Route| {
            sink.borrow_mut().push(route.path.clone());
        }));

        router.go(&"/a".into());
        router.unsubscribe(id);
        router.go(&"/b".into());

        assert_eq!(*seen.borrow(), vec!["/a".to_string()]);
        assert_eq!(router.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_cancelled_mid_dispatch_is_skipped() {
        let router = Rc::new(router());
        let hits = Rc::new(Cell::new(0));

        let second = Rc::new(Cell::new(None));
        let cancel = Rc::clone(&second);
        let weak = Rc::downgrade(&router);
        router.subscribe(Rc::new(move |_: &Route| {
            if let (Some(router), Some(id)) = (weak.upgrade(), cancel.get()) {
                router.unsubscribe(id);
            }
        }));

        let counter = Rc::clone(&hits);
        let id = router.subscribe(Rc::new(move |_: &Route| {
            counter.set(counter.get() + 1);
        }));
        second.set(Some(id));

        router.go(&"/a".into());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_mode_and_format() {
        let router = Router::new(RouterOptions::new());
        assert_eq!(router.mode(), RouteMode::Hash);
        assert_eq!(router.format_path("/a", false), "#/a");

        let router = Router::new(RouterOptions::new().mode(HistoryMode::Html5 { root: None }));
        assert_eq!(router.mode(), RouteMode::History);
        assert_eq!(router.format_path("/a", false), "/a");
        assert_eq!(router.link_active_class(), DEFAULT_LINK_ACTIVE_CLASS);
    }
}

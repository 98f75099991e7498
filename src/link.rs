//! Active navigation links
//!
//! A [`LinkBinding`] attaches router behaviour to one host element:
//!
//! - keeps the element's `href` in sync with the router's formatting of the
//!   link target (anchors only),
//! - toggles an active class while the current route matches the target,
//!   exactly or as a path prefix,
//! - intercepts primary-button clicks and navigates through the router
//!   instead of reloading the page.
//!
//! A binding on a container element delegates: clicks on descendant anchors
//! navigate to that anchor's own path.
//!
//! # Example
//!
//! ```
//! use router_link::memory::{MemoryDocument, MemoryElement};
//! use router_link::{Directive, Element, LinkBinding, Router, RouterContext, RouterOptions};
//! use std::rc::Rc;
//!
//! let router = Rc::new(Router::new(RouterOptions::new()));
//! let document = Rc::new(MemoryDocument::parse("https://example.com/").unwrap());
//! let el = MemoryElement::new("a");
//!
//! let mut link = LinkBinding::new(el.clone(), Some(router.clone()), document);
//! link.bind().unwrap();
//! link.update(Some("/users".into()));
//! assert_eq!(el.attribute("href").as_deref(), Some("#/users"));
//!
//! el.click();
//! assert_eq!(router.current_path(), "/users");
//! assert!(el.has_class("router-link-active"));
//! ```

use crate::dom::{ClickEvent, ClickListener, Document, Element, ListenerId, PRIMARY_BUTTON};
use crate::error::{LinkError, LinkResult};
use crate::matcher::{is_active, ActivePattern};
use crate::origin::{same_origin, OriginSubject};
use crate::path::is_absolute;
use crate::router::{RouteListener, RouteMode, RouterContext, SubscriptionId};
use crate::target::{LocationDescriptor, NavigationTarget};
use crate::{debug_log, trace_log, warn_log, Route};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use url::Url;

/// Bind/update/unbind lifecycle driven by the host's binding system
pub trait Directive {
    /// Value delivered on every update
    type Value;

    /// Attach to the element
    fn bind(&mut self) -> LinkResult<()>;

    /// Receive a new value
    fn update(&mut self, value: Self::Value);

    /// Detach from the element; safe to call more than once
    fn unbind(&mut self);
}

/// Derived link state, owned by the binding
#[derive(Debug, Default)]
struct LinkState {
    target: Option<NavigationTarget>,
    /// Last resolved path; `None` until the first route update
    path: Option<String>,
    active_pattern: Option<ActivePattern>,
    exact: bool,
    append: bool,
    active_class: Option<String>,
    prev_active_class: Option<String>,
}

impl LinkState {
    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    fn effective_active_class(&self, router: &dyn RouterContext) -> String {
        self.active_class
            .clone()
            .filter(|class| !class.is_empty())
            .unwrap_or_else(|| router.link_active_class())
    }
}

struct Inner<E: Element> {
    el: E,
    document: Rc<dyn Document>,
    state: RefCell<LinkState>,
    /// Cleared on unbind; callbacks check it before touching the element
    live: Cell<bool>,
}

impl<E: Element> Inner<E> {
    fn on_route_update(&self, router: &dyn RouterContext, current_path: &str) {
        if !self.live.get() {
            return;
        }

        let mut state = self.state.borrow_mut();

        // the resolved path depends on the current route, so resolve every time
        let path = router.stringify_path(state.target.as_ref());
        if state.path.as_deref() != Some(path.as_str()) {
            trace_log!("Link path changed from {:?} to '{}'", state.path, path);
            state.path = Some(path);
            Self::update_active_match(&mut state);
            self.update_href(router, &state);
        }

        self.update_classes(router, &state, current_path);
    }

    fn update_active_match(state: &mut LinkState) {
        state.active_pattern = if state.exact {
            None
        } else {
            ActivePattern::new(state.path())
        };
    }

    fn update_href(&self, router: &dyn RouterContext, state: &LinkState) {
        if !self.el.is_anchor() {
            return;
        }

        let named = state
            .target
            .as_ref()
            .and_then(NavigationTarget::route_name)
            .filter(|name| !name.is_empty());
        if let Some(name) = named {
            self.el.set_attribute("href", &format!("#{}", name));
            return;
        }

        let path = state.path();
        // relative paths are left alone outside hash mode
        let formatted = router.mode() == RouteMode::Hash || is_absolute(path);
        let href = if !path.is_empty() && formatted {
            router.format_path(path, state.append)
        } else {
            path.to_string()
        };

        if href.is_empty() {
            self.el.remove_attribute("href");
        } else {
            self.el.set_attribute("href", &href);
        }
    }

    fn update_classes(&self, router: &dyn RouterContext, state: &LinkState, current_path: &str) {
        let active_class = state.effective_active_class(router);

        if let Some(prev) = &state.prev_active_class {
            if *prev != active_class {
                self.el.remove_class(prev);
            }
        }

        if is_active(
            state.path(),
            state.exact,
            state.active_pattern.as_ref(),
            current_path,
        ) {
            self.el.add_class(&active_class);
        } else {
            self.el.remove_class(&active_class);
        }
    }

    fn on_click(&self, router: &dyn RouterContext, event: &ClickEvent<E>) {
        if !self.live.get() {
            return;
        }
        // don't redirect with control keys
        if event.has_modifier() {
            trace_log!("Click ignored: modifier key held");
            return;
        }
        // another handler already took over
        if event.default_prevented() {
            trace_log!("Click ignored: default prevented");
            return;
        }
        // right or middle click
        if event.button != PRIMARY_BUTTON {
            trace_log!("Click ignored: button {}", event.button);
            return;
        }

        // released before navigating; route listeners borrow the state again
        let target = self.state.borrow().target.clone();
        let location = self.document.location();

        let go = |target: Option<&NavigationTarget>| {
            event.prevent_default();
            if let Some(target) = target {
                debug_log!("Link navigating to {:?}", target);
                router.go(target);
            }
        };

        if self.el.is_anchor() || event.target.is_same_node(&self.el) {
            if same_origin(origin_subject(&self.el).as_subject(), target.as_ref(), &location) {
                go(target.as_ref());
            } else if let Some(NavigationTarget::Path(href)) = &target {
                self.document.assign(href);
            }
            return;
        }

        // delegated: find the anchor (or the bound element) the click came through
        let Some(found) = self.find_delegate(&event.target) else {
            trace_log!("Click ignored: target is outside the bound element");
            return;
        };

        let subject = origin_subject(&found);
        let is_same_origin = same_origin(subject.as_subject(), target.as_ref(), &location);

        if !is_same_origin {
            if let Some(NavigationTarget::Path(href)) = &target {
                self.document.assign(href);
                return;
            }
        }

        match subject {
            OwnedSubject::Element | OwnedSubject::Anchor(None) => go(target.as_ref()),
            OwnedSubject::Anchor(Some(href)) if is_same_origin => {
                let Some(path) = anchor_path(&href, &location, router.mode()) else {
                    return;
                };
                let intent = LocationDescriptor {
                    path: Some(path),
                    replace: target.as_ref().is_some_and(NavigationTarget::is_replace),
                    append: target.as_ref().is_some_and(NavigationTarget::is_append),
                    ..LocationDescriptor::default()
                };
                go(Some(&NavigationTarget::Location(intent)));
            }
            OwnedSubject::Anchor(Some(_)) => {}
        }
    }

    fn find_delegate(&self, start: &E) -> Option<E> {
        let mut current = Some(start.clone());
        while let Some(node) = current {
            if node.is_anchor() || node.is_same_node(&self.el) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

/// Same-origin subject with an owned `href`
enum OwnedSubject {
    Anchor(Option<String>),
    Element,
}

impl OwnedSubject {
    fn as_subject(&self) -> OriginSubject<'_> {
        match self {
            OwnedSubject::Anchor(href) => OriginSubject::Anchor(href.as_deref()),
            OwnedSubject::Element => OriginSubject::Element,
        }
    }
}

fn origin_subject<E: Element>(el: &E) -> OwnedSubject {
    if el.is_anchor() {
        OwnedSubject::Anchor(el.attribute("href").filter(|href| !href.is_empty()))
    } else {
        OwnedSubject::Element
    }
}

/// Router path an anchor points at.
///
/// In hash mode a `#/path` (or `#!/path`) fragment is the route; otherwise the
/// resolved URL path is.
fn anchor_path(href: &str, location: &Url, mode: RouteMode) -> Option<String> {
    let url = location.join(href).ok()?;

    if mode == RouteMode::Hash {
        let fragment = url.fragment().unwrap_or_default();
        let fragment = fragment.strip_prefix('!').unwrap_or(fragment);
        if is_absolute(fragment) {
            return Some(fragment.to_string());
        }
    }

    Some(url.path().to_string())
}

/// Router link behaviour for one element
pub struct LinkBinding<E: Element> {
    inner: Rc<Inner<E>>,
    router: Option<Rc<dyn RouterContext>>,
    listener: Option<ListenerId>,
    subscription: Option<SubscriptionId>,
}

impl<E: Element> LinkBinding<E> {
    /// Create an unbound link for `el`.
    ///
    /// `router` is the enclosing router context, if any. Without one the
    /// binding stays inert.
    pub fn new(
        el: E,
        router: Option<Rc<dyn RouterContext>>,
        document: Rc<dyn Document>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                el,
                document,
                state: RefCell::new(LinkState::default()),
                live: Cell::new(false),
            }),
            router,
            listener: None,
            subscription: None,
        }
    }

    /// Create, bind and apply an initial target in one step
    pub fn mount(
        el: E,
        router: Option<Rc<dyn RouterContext>>,
        document: Rc<dyn Document>,
        target: impl Into<NavigationTarget>,
    ) -> LinkResult<Self> {
        let mut link = Self::new(el, router, document);
        link.bind()?;
        link.update(Some(target.into()));
        Ok(link)
    }

    /// The bound element
    pub fn element(&self) -> &E {
        &self.inner.el
    }

    /// Check if the link is bound and reacting to routes
    pub fn is_bound(&self) -> bool {
        self.inner.live.get()
    }

    /// Check if clicks on the element are intercepted
    pub fn intercepts_clicks(&self) -> bool {
        self.listener.is_some()
    }

    /// The current target
    pub fn target(&self) -> Option<NavigationTarget> {
        self.inner.state.borrow().target.clone()
    }

    /// Last resolved path; `None` before the first route update
    pub fn resolved_path(&self) -> Option<String> {
        self.inner.state.borrow().path.clone()
    }

    /// Source of the prefix pattern, if one is in use
    pub fn active_pattern(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .active_pattern
            .as_ref()
            .map(|p| p.as_str().to_string())
    }

    /// Re-run the route-change recompute against the router's current route
    pub fn refresh(&self) {
        if let Some(router) = &self.router {
            let route = router.current_route();
            self.inner.on_route_update(router.as_ref(), &route.path);
        }
    }

    fn is_blank_anchor(&self) -> bool {
        self.inner.el.is_anchor()
            && self.inner.el.attribute("target").as_deref() == Some("_blank")
    }
}

impl<E: Element> Directive for LinkBinding<E> {
    type Value = Option<NavigationTarget>;

    fn bind(&mut self) -> LinkResult<()> {
        let Some(router) = self.router.clone() else {
            warn_log!("{}", LinkError::NoRouterContext);
            return Err(LinkError::NoRouterContext);
        };
        if self.subscription.is_some() {
            return Ok(());
        }

        self.inner.live.set(true);

        let inner = Rc::downgrade(&self.inner);
        let weak_router = Rc::downgrade(&router);
        let on_route: RouteListener = Rc::new(move |route: &Route| {
            if let (Some(inner), Some(router)) = (inner.upgrade(), weak_router.upgrade()) {
                inner.on_route_update(router.as_ref(), &route.path);
            }
        });
        self.subscription = Some(router.subscribe(on_route));

        // the browser opens these in a new window or tab
        if self.is_blank_anchor() {
            debug_log!("Link opens in a new context; clicks are not intercepted");
            return Ok(());
        }

        let inner = Rc::downgrade(&self.inner);
        let on_click: ClickListener<E> = Rc::new(move |event: &ClickEvent<E>| {
            if let Some(inner) = inner.upgrade() {
                inner.on_click(router.as_ref(), event);
            }
        });
        self.listener = Some(self.inner.el.add_click_listener(on_click));

        debug_log!("Link bound");
        Ok(())
    }

    fn update(&mut self, value: Option<NavigationTarget>) {
        {
            let mut state = self.inner.state.borrow_mut();

            // named hrefs ignore the path, so a new name needs a new href
            let old_name = state.target.as_ref().and_then(NavigationTarget::route_name);
            let new_name = value.as_ref().and_then(NavigationTarget::route_name);
            if old_name != new_name {
                state.path = None;
            }

            if let Some(location) = value.as_ref().and_then(NavigationTarget::as_location) {
                if state.append != location.append || state.exact != location.exact {
                    // flags feed the pattern and href; force a rebuild
                    state.path = None;
                }
                state.append = location.append;
                state.exact = location.exact;
                state.prev_active_class = match &self.router {
                    Some(router) => Some(state.effective_active_class(router.as_ref())),
                    None => state.active_class.clone(),
                };
                state.active_class = location.active_class.clone();
            }

            state.target = value;
        }

        self.refresh();
    }

    fn unbind(&mut self) {
        self.inner.live.set(false);

        if let Some(id) = self.listener.take() {
            self.inner.el.remove_click_listener(id);
        }
        if let (Some(router), Some(id)) = (&self.router, self.subscription.take()) {
            router.unsubscribe(id);
            debug_log!("Link unbound");
        }
    }
}

impl<E: Element> Drop for LinkBinding<E> {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl<E: Element> fmt::Debug for LinkBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkBinding")
            .field("state", &self.inner.state.borrow())
            .field("bound", &self.inner.live.get())
            .field("listener", &self.listener)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryElement};
    use crate::router::{Router, RouterOptions};
    use crate::HistoryMode;

    fn setup(mode: HistoryMode) -> (Rc<Router>, Rc<MemoryDocument>) {
        let router = Rc::new(Router::new(RouterOptions::new().mode(mode)));
        let document = Rc::new(MemoryDocument::parse("https://example.com/").unwrap());
        (router, document)
    }

    fn html5() -> (Rc<Router>, Rc<MemoryDocument>) {
        setup(HistoryMode::Html5 { root: None })
    }

    fn link(
        el: &MemoryElement,
        router: &Rc<Router>,
        document: &Rc<MemoryDocument>,
        target: impl Into<NavigationTarget>,
    ) -> LinkBinding<MemoryElement> {
        LinkBinding::mount(el.clone(), Some(router.clone()), document.clone(), target).unwrap()
    }

    #[test]
    fn test_bind_without_router_is_inert() {
        let (_, document) = html5();
        let el = MemoryElement::new("a");
        let mut binding = LinkBinding::new(el.clone(), None, document);

        assert_eq!(binding.bind(), Err(LinkError::NoRouterContext));
        binding.update(Some("/users".into()));

        assert!(!binding.is_bound());
        assert!(!binding.intercepts_clicks());
        assert_eq!(binding.resolved_path(), None);
        assert_eq!(el.attribute("href"), None);
        assert_eq!(el.mutations(), 0);

        binding.unbind();
    }

    #[test]
    fn test_blank_anchor_is_not_intercepted() {
        let (router, document) = html5();
        let el = MemoryElement::new("a").with_attribute("target", "_blank");
        let binding = link(&el, &router, &document, "/users");

        assert!(binding.is_bound());
        assert!(!binding.intercepts_clicks());
        assert_eq!(el.listener_count(), 0);
        assert_eq!(el.attribute("href").as_deref(), Some("/users"));
    }

    #[test]
    fn test_href_for_relative_path_in_history_mode_is_raw() {
        let (router, document) = html5();
        let el = MemoryElement::new("a");
        let _binding = link(&el, &router, &document, "users");
        assert_eq!(el.attribute("href").as_deref(), Some("users"));
    }

    #[test]
    fn test_href_for_relative_path_in_hash_mode_is_formatted() {
        let (router, document) = setup(HistoryMode::Hash { hashbang: false });
        let el = MemoryElement::new("a");
        let _binding = link(&el, &router, &document, "users");
        assert_eq!(el.attribute("href").as_deref(), Some("#/users"));
    }

    #[test]
    fn test_href_append_flag() {
        let (router, document) = html5();
        router.go(&"/users/1".into());
        let el = MemoryElement::new("a");
        let _binding = link(
            &el,
            &router,
            &document,
            LocationDescriptor::path("posts").append(true),
        );
        // relative paths stay raw outside hash mode, even with append
        assert_eq!(el.attribute("href").as_deref(), Some("posts"));
    }

    #[test]
    fn test_empty_href_is_removed() {
        let (router, document) = html5();
        let el = MemoryElement::anchor("/stale");
        let _binding = link(&el, &router, &document, "");
        assert_eq!(el.attribute("href"), None);
    }

    #[test]
    fn test_non_anchor_gets_no_href() {
        let (router, document) = html5();
        let el = MemoryElement::new("li");
        let _binding = link(&el, &router, &document, "/users");
        assert_eq!(el.attribute("href"), None);
    }

    #[test]
    fn test_exact_flag_change_rebuilds_pattern() {
        let (router, document) = html5();
        router.go(&"/users/5".into());
        let el = MemoryElement::new("a");
        let mut binding = link(
            &el,
            &router,
            &document,
            LocationDescriptor::path("/users").exact(true),
        );

        assert_eq!(binding.active_pattern(), None);
        assert!(!el.has_class("router-link-active"));

        binding.update(Some(LocationDescriptor::path("/users").into()));
        assert_eq!(binding.active_pattern().as_deref(), Some("^/users(/|$)"));
        assert!(el.has_class("router-link-active"));
    }

    #[test]
    fn test_renaming_active_class_removes_previous() {
        let (router, document) = html5();
        router.go(&"/users".into());
        let el = MemoryElement::new("a");
        let mut binding = link(&el, &router, &document, LocationDescriptor::path("/users"));
        assert!(el.has_class("router-link-active"));

        binding.update(Some(LocationDescriptor::path("/users").active_class("on").into()));
        assert_eq!(el.classes(), vec!["on".to_string()]);

        binding.update(Some(
            LocationDescriptor::path("/users")
                .active_class("selected")
                .into(),
        ));
        assert_eq!(el.classes(), vec!["selected".to_string()]);
    }

    #[test]
    fn test_string_update_keeps_descriptor_flags() {
        let (router, document) = html5();
        router.go(&"/users/5".into());
        let el = MemoryElement::new("a");
        let mut binding = link(
            &el,
            &router,
            &document,
            LocationDescriptor::path("/a").exact(true),
        );

        binding.update(Some("/users".into()));
        assert_eq!(binding.active_pattern(), None);
        assert!(!el.has_class("router-link-active"));
    }

    #[test]
    fn test_route_name_change_rewrites_href_for_same_path() {
        let (router, document) = html5();
        router.add_named_route("home", "/");
        router.add_named_route("root", "/");
        let el = MemoryElement::new("a");
        let mut binding = link(&el, &router, &document, "/");
        assert_eq!(el.attribute("href").as_deref(), Some("/"));

        binding.update(Some(LocationDescriptor::named("home").into()));
        assert_eq!(el.attribute("href").as_deref(), Some("#home"));

        binding.update(Some(LocationDescriptor::named("root").into()));
        assert_eq!(el.attribute("href").as_deref(), Some("#root"));

        binding.update(Some(LocationDescriptor::path("/").into()));
        assert_eq!(el.attribute("href").as_deref(), Some("/"));
        assert_eq!(binding.resolved_path().as_deref(), Some("/"));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (router, document) = html5();
        router.go(&"/users".into());
        let el = MemoryElement::new("a");
        let binding = link(&el, &router, &document, "/users");
        let before = el.mutations();

        binding.refresh();
        binding.refresh();
        assert_eq!(el.mutations(), before);
        assert_eq!(el.classes(), vec!["router-link-active".to_string()]);
    }

    #[test]
    fn test_anchor_path_in_hash_mode_uses_fragment() {
        let location = Url::parse("https://example.com/index.html").unwrap();
        assert_eq!(
            anchor_path("#/users/5", &location, RouteMode::Hash).as_deref(),
            Some("/users/5")
        );
        assert_eq!(
            anchor_path("#!/users/5", &location, RouteMode::Hash).as_deref(),
            Some("/users/5")
        );
        assert_eq!(
            anchor_path("/users/5", &location, RouteMode::History).as_deref(),
            Some("/users/5")
        );
        assert_eq!(
            anchor_path("/users/5?tab=1", &location, RouteMode::Hash).as_deref(),
            Some("/users/5")
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (router, document) = html5();
        let el = MemoryElement::new("a");
        {
            let _binding = link(&el, &router, &document, "/users");
            assert_eq!(router.subscriber_count(), 1);
            assert_eq!(el.listener_count(), 1);
        }
        assert_eq!(router.subscriber_count(), 0);
        assert_eq!(el.listener_count(), 0);
    }
}

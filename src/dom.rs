//! Host element and document abstractions
//!
//! Link bindings never touch a concrete DOM. They drive elements through the
//! [`Element`] trait and read the page location through [`Document`], so the
//! same logic runs against a browser, a virtual DOM or the in-memory host in
//! [`crate::memory`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use url::Url;

/// Handle for a registered click listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked for clicks on an element or its descendants
pub type ClickListener<E> = Rc<dyn Fn(&ClickEvent<E>)>;

/// Element operations a link binding needs from its host
pub trait Element: Clone + 'static {
    /// Tag name, case-insensitive
    fn tag_name(&self) -> String;

    /// Check if this is an `<a>` element
    fn is_anchor(&self) -> bool {
        self.tag_name().eq_ignore_ascii_case("a")
    }

    /// Read an attribute
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute
    fn set_attribute(&self, name: &str, value: &str);

    /// Remove an attribute; no-op when absent
    fn remove_attribute(&self, name: &str);

    /// Add a class; no-op when already present
    fn add_class(&self, class: &str);

    /// Remove a class; no-op when absent
    fn remove_class(&self, class: &str);

    /// Check for a class
    fn has_class(&self, class: &str) -> bool;

    /// Parent element, if attached
    fn parent(&self) -> Option<Self>;

    /// Node identity
    fn is_same_node(&self, other: &Self) -> bool;

    /// Register a click listener
    fn add_click_listener(&self, listener: ClickListener<Self>) -> ListenerId;

    /// Remove a click listener registered on this element
    fn remove_click_listener(&self, id: ListenerId);
}

/// Page-level operations
pub trait Document {
    /// Current document location
    fn location(&self) -> Url;

    /// Full page navigation, bypassing the router
    fn assign(&self, href: &str);
}

/// Mouse button that triggered a click; `0` is the primary button
pub const PRIMARY_BUTTON: i16 = 0;

/// A click as delivered to link listeners
pub struct ClickEvent<E> {
    /// Element the click landed on
    pub target: E,
    /// Mouse button, `0` for primary
    pub button: i16,
    /// Meta (command) key held
    pub meta_key: bool,
    /// Control key held
    pub ctrl_key: bool,
    /// Shift key held
    pub shift_key: bool,
    default_prevented: Cell<bool>,
}

impl<E> ClickEvent<E> {
    /// Primary-button click without modifiers
    pub fn new(target: E) -> Self {
        Self {
            target,
            button: PRIMARY_BUTTON,
            meta_key: false,
            ctrl_key: false,
            shift_key: false,
            default_prevented: Cell::new(false),
        }
    }

    /// Set the mouse button
    pub fn button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Hold the meta key
    pub fn meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    /// Hold the control key
    pub fn ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    /// Hold the shift key
    pub fn shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    /// Check if any modifier that opens links elsewhere is held
    pub fn has_modifier(&self) -> bool {
        self.meta_key || self.ctrl_key || self.shift_key
    }

    /// Cancel the browser's default action
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Check if the default action was cancelled
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl<E> fmt::Debug for ClickEvent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickEvent")
            .field("button", &self.button)
            .field("meta_key", &self.meta_key)
            .field("ctrl_key", &self.ctrl_key)
            .field("shift_key", &self.shift_key)
            .field("default_prevented", &self.default_prevented.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_defaults() {
        let event = ClickEvent::new(());
        assert_eq!(event.button, PRIMARY_BUTTON);
        assert!(!event.has_modifier());
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_click_modifiers() {
        assert!(ClickEvent::new(()).meta().has_modifier());
        assert!(ClickEvent::new(()).ctrl().has_modifier());
        assert!(ClickEvent::new(()).shift().has_modifier());
        assert_eq!(ClickEvent::new(()).button(2).button, 2);
    }

    #[test]
    fn test_prevent_default() {
        let event = ClickEvent::new(());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}

//! In-memory host for link bindings
//!
//! A minimal element tree with attributes, class lists and bubbling click
//! dispatch, plus a document with a settable location. Useful for headless
//! hosts and for exercising bindings in tests.
//!
//! # Example
//!
//! ```
//! use router_link::memory::MemoryElement;
//! use router_link::Element;
//!
//! let nav = MemoryElement::new("nav");
//! let link = MemoryElement::new("a");
//! nav.append_child(&link);
//!
//! link.add_class("active");
//! assert!(link.has_class("active"));
//! assert!(link.parent().unwrap().is_same_node(&nav));
//! ```

use crate::dom::{ClickEvent, ClickListener, Document, Element, ListenerId};
use crate::error::{LinkError, LinkResult};
use crate::trace_log;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use url::Url;

struct Node {
    tag: String,
    attributes: RefCell<Vec<(String, String)>>,
    classes: RefCell<Vec<String>>,
    parent: RefCell<Weak<Node>>,
    listeners: RefCell<Vec<(ListenerId, ClickListener<MemoryElement>)>>,
    next_listener: Cell<u64>,
    mutations: Cell<usize>,
}

/// Reference-counted in-memory element
#[derive(Clone)]
pub struct MemoryElement {
    node: Rc<Node>,
}

impl MemoryElement {
    /// Create a detached element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Rc::new(Node {
                tag: tag.into(),
                attributes: RefCell::new(Vec::new()),
                classes: RefCell::new(Vec::new()),
                parent: RefCell::new(Weak::new()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                mutations: Cell::new(0),
            }),
        }
    }

    /// Create an anchor with an `href`
    pub fn anchor(href: &str) -> Self {
        let el = Self::new("a");
        el.set_attribute("href", href);
        el.node.mutations.set(0);
        el
    }

    /// Attach `child` under this element.
    ///
    /// The parent link is weak; the caller keeps the tree alive.
    pub fn append_child(&self, child: &MemoryElement) {
        *child.node.parent.borrow_mut() = Rc::downgrade(&self.node);
    }

    /// Builder-style attribute
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self.node.mutations.set(0);
        self
    }

    /// Classes in insertion order
    pub fn classes(&self) -> Vec<String> {
        self.node.classes.borrow().clone()
    }

    /// Number of attribute and class changes applied so far
    pub fn mutations(&self) -> usize {
        self.node.mutations.get()
    }

    /// Number of registered click listeners
    pub fn listener_count(&self) -> usize {
        self.node.listeners.borrow().len()
    }

    /// Dispatch `event` at its target and bubble it up through the ancestors
    pub fn dispatch_click(event: &ClickEvent<MemoryElement>) {
        let mut current = Some(event.target.clone());

        while let Some(el) = current {
            // listeners may add or remove listeners while running
            let listeners: Vec<_> = el
                .node
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();

            for listener in listeners {
                listener(event);
            }

            current = el.parent();
        }
    }

    /// Primary-button click on this element; returns the dispatched event
    pub fn click(&self) -> ClickEvent<MemoryElement> {
        let event = ClickEvent::new(self.clone());
        Self::dispatch_click(&event);
        event
    }

    fn touch(&self) {
        self.node.mutations.set(self.node.mutations.get() + 1);
    }
}

impl Element for MemoryElement {
    fn tag_name(&self) -> String {
        self.node.tag.to_ascii_uppercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node
            .attributes
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.node.attributes.borrow_mut();
        if let Some(pos) = attributes.iter().position(|(k, _)| k == name) {
            if attributes[pos].1 == value {
                return;
            }
            attributes[pos].1 = value.to_string();
        } else {
            attributes.push((name.to_string(), value.to_string()));
        }
        drop(attributes);
        self.touch();
    }

    fn remove_attribute(&self, name: &str) {
        let mut attributes = self.node.attributes.borrow_mut();
        let before = attributes.len();
        attributes.retain(|(k, _)| k != name);
        let changed = attributes.len() != before;
        drop(attributes);
        if changed {
            self.touch();
        }
    }

    fn add_class(&self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        self.node.classes.borrow_mut().push(class.to_string());
        self.touch();
    }

    fn remove_class(&self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        self.node.classes.borrow_mut().retain(|c| c != class);
        self.touch();
    }

    fn has_class(&self, class: &str) -> bool {
        self.node.classes.borrow().iter().any(|c| c == class)
    }

    fn parent(&self) -> Option<Self> {
        self.node
            .parent
            .borrow()
            .upgrade()
            .map(|node| MemoryElement { node })
    }

    fn is_same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    fn add_click_listener(&self, listener: ClickListener<Self>) -> ListenerId {
        let id = ListenerId(self.node.next_listener.get());
        self.node.next_listener.set(id.0 + 1);
        self.node.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_click_listener(&self, id: ListenerId) {
        self.node
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.node.tag)
            .field("attributes", &self.node.attributes.borrow())
            .field("classes", &self.node.classes.borrow())
            .finish_non_exhaustive()
    }
}

/// In-memory document that records full page navigations
#[derive(Debug)]
pub struct MemoryDocument {
    location: RefCell<Url>,
    assigned: RefCell<Vec<String>>,
}

impl MemoryDocument {
    /// Create a document at `location`
    pub fn new(location: Url) -> Self {
        Self {
            location: RefCell::new(location),
            assigned: RefCell::new(Vec::new()),
        }
    }

    /// Create a document from an absolute URL string
    pub fn parse(location: &str) -> LinkResult<Self> {
        Url::parse(location)
            .map(Self::new)
            .map_err(|e| LinkError::InvalidUrl {
                url: location.to_string(),
                reason: e.to_string(),
            })
    }

    /// Every href passed to [`Document::assign`], oldest first
    pub fn assigned(&self) -> Vec<String> {
        self.assigned.borrow().clone()
    }
}

impl Document for MemoryDocument {
    fn location(&self) -> Url {
        self.location.borrow().clone()
    }

    fn assign(&self, href: &str) {
        trace_log!("Full page navigation to '{}'", href);
        self.assigned.borrow_mut().push(href.to_string());
        let next = self.location.borrow().join(href);
        if let Ok(url) = next {
            *self.location.borrow_mut() = url;
        }
    }
}

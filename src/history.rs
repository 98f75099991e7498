//! Navigation history and URL formatting
//!
//! Two concerns live here:
//! - [`History`], the in-memory entry stack with push/replace/back/forward
//!   and a configurable size limit.
//! - [`HistoryMode`], which decides how a router path is written into an
//!   `href`: HTML5 paths under an optional root, `#` fragments, or untouched
//!   paths for abstract (non-browser) hosts.

use crate::path::{is_absolute, resolve_path};
use crate::{NavigationDirection, Route, RouteChangeEvent};

/// How router paths map onto URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    /// `#/path` fragments, or `#!/path` with `hashbang`
    Hash { hashbang: bool },
    /// Real paths, optionally mounted under `root` (like `/app`)
    Html5 { root: Option<String> },
    /// Paths are used as-is
    Abstract,
}

impl HistoryMode {
    /// HTML5 mode mounted under `root`.
    ///
    /// The root gains a leading slash and loses a trailing one; `/` and an
    /// empty root mean no root.
    pub fn html5_with_root(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        let root = if root.is_empty() {
            None
        } else if root.starts_with('/') {
            Some(root.to_string())
        } else {
            Some(format!("/{}", root))
        };
        HistoryMode::Html5 { root }
    }

    /// Check if hrefs are produced as `#` fragments
    pub fn is_hash(&self) -> bool {
        matches!(self, HistoryMode::Hash { .. })
    }

    /// Format a router path into an href.
    ///
    /// Relative paths are resolved against `current`, the current route path,
    /// honouring `append`.
    ///
    /// ```
    /// use router_link::HistoryMode;
    ///
    /// let mode = HistoryMode::html5_with_root("app");
    /// assert_eq!(mode.format_path("/users", false, "/"), "/app/users");
    ///
    /// let mode = HistoryMode::Hash { hashbang: true };
    /// assert_eq!(mode.format_path("/users", false, "/"), "#!/users");
    /// ```
    pub fn format_path(&self, path: &str, append: bool, current: &str) -> String {
        match self {
            HistoryMode::Hash { hashbang } => {
                let prefix = if *hashbang { "#!" } else { "#" };
                if is_absolute(path) {
                    format!("{}{}", prefix, path)
                } else {
                    format!("{}{}", prefix, resolve_path(current, path, append))
                }
            }
            HistoryMode::Html5 { root } => {
                if is_absolute(path) {
                    match root {
                        Some(root) => format!("{}/{}", root, path.trim_start_matches('/')),
                        None => path.to_string(),
                    }
                } else {
                    let base = match root {
                        Some(root) => format!("{}{}", root, current),
                        None => current.to_string(),
                    };
                    resolve_path(&base, path, append)
                }
            }
            HistoryMode::Abstract => path.to_string(),
        }
    }
}

impl Default for HistoryMode {
    fn default() -> Self {
        HistoryMode::Hash { hashbang: false }
    }
}

/// Navigation history stack
#[derive(Debug, Clone)]
pub struct History {
    /// History stack
    entries: Vec<Route>,
    /// Current position in history
    current: usize,
    /// Maximum history size (0 = unlimited)
    max_size: usize,
}

impl History {
    /// Create with custom max size
    pub fn with_max_size(initial: Route, max_size: usize) -> Self {
        Self {
            entries: vec![initial],
            current: 0,
            max_size,
        }
    }

    /// Get current route
    pub fn current(&self) -> &Route {
        &self.entries[self.current]
    }

    /// Get current path
    pub fn current_path(&self) -> &str {
        &self.current().path
    }

    /// Push a new route, dropping any forward history
    pub fn push(&mut self, route: Route) -> RouteChangeEvent {
        let from = Some(self.current_path().to_string());
        let to = route.path.clone();

        self.entries.truncate(self.current + 1);
        self.entries.push(route);
        self.current += 1;

        self.enforce_size_limit();

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Replace current entry
    pub fn replace(&mut self, route: Route) -> RouteChangeEvent {
        let from = Some(self.current_path().to_string());
        let to = route.path.clone();

        self.entries[self.current] = route;

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Replace,
        }
    }

    /// Go back in history
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_back() {
            return None;
        }

        let from = Some(self.current_path().to_string());
        self.current -= 1;

        Some(RouteChangeEvent {
            from,
            to: self.current_path().to_string(),
            direction: NavigationDirection::Back,
        })
    }

    /// Go forward in history
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_forward() {
            return None;
        }

        let from = Some(self.current_path().to_string());
        self.current += 1;

        Some(RouteChangeEvent {
            from,
            to: self.current_path().to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Get history length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty (never true in practice)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            // Remove oldest entries, keeping the current route reachable
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_size(Route::new("/"), 1000)
    }
}

//! Active-link matching
//!
//! A link is active when the current route matches its resolved path, either
//! exactly or as a path prefix. Query strings never take part in the
//! comparison.
//!
//! Prefix matching respects segment boundaries: `/foo` is active on `/foo`,
//! `/foo/` and `/foo/bar`, but not on `/foobar`.

use crate::error_log;
use crate::path::{strip_query, strip_trailing_slash};
use regex::Regex;

/// Compiled prefix matcher for non-exact links
#[derive(Debug, Clone)]
pub struct ActivePattern {
    regex: Regex,
}

impl ActivePattern {
    /// Compile a prefix matcher for `path`.
    ///
    /// One trailing slash is dropped and every regex metacharacter is escaped
    /// before compiling. Returns `None` for an empty path, which never matches.
    pub fn new(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }

        let prefix = strip_trailing_slash(strip_query(path));
        let source = format!("^{}(/|$)", regex::escape(prefix));

        match Regex::new(&source) {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                error_log!("Failed to compile active pattern for '{}': {}", path, e);
                None
            }
        }
    }

    /// Test a candidate route path; its query string is ignored
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(strip_query(candidate))
    }

    /// The compiled regex source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Exact comparison of a link path against the current route path.
///
/// Both sides lose their query string. The candidate may additionally carry
/// one trailing slash the link path lacks, so `/foo` is active on `/foo/`.
/// The slash is only ever stripped from the candidate: a link to `/foo/` is
/// not active on `/foo`.
pub fn exact_match(link_path: &str, candidate: &str) -> bool {
    let dest = strip_query(link_path);
    let candidate = strip_query(candidate);

    dest == candidate || (!dest.ends_with('/') && dest == strip_trailing_slash(candidate))
}

/// Decide whether a link is active for `candidate`.
///
/// `pattern` is consulted only when `exact` is false.
pub fn is_active(
    link_path: &str,
    exact: bool,
    pattern: Option<&ActivePattern>,
    candidate: &str,
) -> bool {
    if exact {
        exact_match(link_path, candidate)
    } else {
        pattern.is_some_and(|p| p.is_match(candidate))
    }
}

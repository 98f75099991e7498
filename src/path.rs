//! Path helpers shared by the matcher, the history formatters and the router

/// Check if a path is absolute (starts with `/`)
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Remove a query string (`?` and everything after it)
///
/// ```
/// use router_link::path::strip_query;
///
/// assert_eq!(strip_query("/a?x=1"), "/a");
/// assert_eq!(strip_query("/a"), "/a");
/// ```
pub fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Remove exactly one trailing slash, if present
pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Resolve `relative` against `base`.
///
/// - A query-only `relative` (`?x=1`) replaces the query of `base`.
/// - Without `append` the last segment of `base` is dropped first, like a
///   browser resolving a relative URL. With `append` it is kept unless `base`
///   ends in a slash.
/// - `.` segments are skipped and `..` segments pop one level.
///
/// ```
/// use router_link::path::resolve_path;
///
/// assert_eq!(resolve_path("/a/b", "c", false), "/a/c");
/// assert_eq!(resolve_path("/a/b", "c", true), "/a/b/c");
/// assert_eq!(resolve_path("/a/b", "../c", false), "/c");
/// ```
pub fn resolve_path(base: &str, relative: &str, append: bool) -> String {
    let base = strip_query(base);

    if relative.starts_with('?') {
        return format!("{}{}", base, relative);
    }

    let mut stack: Vec<&str> = base.split('/').collect();
    // drop the trailing segment unless appending to a non-directory path
    if !append || stack.last().map_or(true, |last| last.is_empty()) {
        stack.pop();
    }

    for segment in relative.strip_prefix('/').unwrap_or(relative).split('/') {
        match segment {
            "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }

    if stack.first() != Some(&"") {
        stack.insert(0, "");
    }

    stack.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/users?page=2"), "/users");
        assert_eq!(strip_query("/users?"), "/users");
        assert_eq!(strip_query("?only"), "");
        assert_eq!(strip_query(""), "");
    }

    #[test]
    fn test_strip_trailing_slash_removes_one() {
        assert_eq!(strip_trailing_slash("/foo/"), "/foo");
        assert_eq!(strip_trailing_slash("/foo//"), "/foo/");
        assert_eq!(strip_trailing_slash("/"), "");
        assert_eq!(strip_trailing_slash("/foo"), "/foo");
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("/a"));
        assert!(!is_absolute("a"));
        assert!(!is_absolute(""));
    }

    #[test]
    fn test_resolve_relative_sibling() {
        assert_eq!(resolve_path("/a/b", "c", false), "/a/c");
        assert_eq!(resolve_path("/a/b/", "c", false), "/a/b/c");
    }

    #[test]
    fn test_resolve_append() {
        assert_eq!(resolve_path("/a/b", "c", true), "/a/b/c");
        assert_eq!(resolve_path("/a/b/", "c", true), "/a/b/c");
    }

    #[test]
    fn test_resolve_dot_segments() {
        assert_eq!(resolve_path("/a/b/c", "./d", false), "/a/b/d");
        assert_eq!(resolve_path("/a/b/c", "../d", false), "/a/d");
        assert_eq!(resolve_path("/a", "../../x", false), "/x");
    }

    #[test]
    fn test_resolve_query_only() {
        assert_eq!(resolve_path("/a/b?x=1", "?y=2", false), "/a/b?y=2");
    }

    #[test]
    fn test_resolve_ignores_base_query() {
        assert_eq!(resolve_path("/a/b?x=1", "c", false), "/a/c");
    }

    #[test]
    fn test_resolve_absolute_relative_root() {
        assert_eq!(resolve_path("", "foo", false), "/foo");
    }
}

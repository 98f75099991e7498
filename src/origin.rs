//! Same-origin detection
//!
//! A link is same-origin when protocol, hostname and port all match the
//! document location. URLs are parsed with a stateless parser relative to the
//! document location, the way a browser resolves an anchor's `href`.

use crate::error::{LinkError, LinkResult};
use crate::target::NavigationTarget;
use url::Url;

/// Protocol, hostname and port of a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Scheme including the trailing colon, like `https:`
    pub protocol: String,
    /// Host without port
    pub hostname: String,
    /// Explicit port; empty when it is the scheme default
    pub port: String,
}

impl Origin {
    /// Origin of an absolute URL
    pub fn of(url: &Url) -> Self {
        Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// Resolve `href` against `base` and take its origin
    pub fn parse(href: &str, base: &Url) -> LinkResult<Self> {
        base.join(href)
            .map(|url| Self::of(&url))
            .map_err(|e| LinkError::InvalidUrl {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Check if `href` resolved against `location` stays on the same origin.
///
/// Unparseable hrefs are never same-origin.
pub fn is_same_origin_href(href: &str, location: &Url) -> bool {
    Origin::parse(href, location).is_ok_and(|origin| origin == Origin::of(location))
}

/// The element whose origin is being tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginSubject<'a> {
    /// An anchor with its `href` attribute, if any
    Anchor(Option<&'a str>),
    /// Any other element
    Element,
}

/// Same-origin test for a clicked element and its navigation target.
///
/// - Anchors are judged by their own `href`; an anchor without one is never
///   same-origin.
/// - Other elements with a string target are judged by that string.
/// - Other elements with a structured target stay inside the router and are
///   same-origin; with no target at all they are not.
pub fn same_origin(
    subject: OriginSubject<'_>,
    target: Option<&NavigationTarget>,
    location: &Url,
) -> bool {
    match (subject, target) {
        (OriginSubject::Anchor(href), _) => {
            href.is_some_and(|href| is_same_origin_href(href, location))
        }
        (OriginSubject::Element, Some(NavigationTarget::Path(path))) => {
            is_same_origin_href(path, location)
        }
        // deliberately intercepted: a structured target can only resolve
        // inside the router, even though the element itself has no origin
        (OriginSubject::Element, Some(NavigationTarget::Location(_))) => true,
        (OriginSubject::Element, None) => false,
    }
}

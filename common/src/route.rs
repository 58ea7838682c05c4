//! Route table shared by the browser shell and the request controller.
//!
//! Two locations exist: the entry view at `/` and the roast view at
//! `/roast/{username}`, where the username is a single percent-encoded path
//! segment. Anything else is sent back to `/`, replacing the history entry.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::identifier::{ResourceIdentifier, ValidationError};

/// Prefix of the roast view path.
pub const ROAST_PREFIX: &str = "/roast/";

/// Characters escaped in the username segment. Matches `encodeURIComponent`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A navigable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The form with nothing loaded.
    Entry,
    /// The roast view for one username.
    Roast(ResourceIdentifier),
}

impl Route {
    /// Renders the route as an absolute path.
    pub fn to_path(&self) -> String {
        match self {
            Route::Entry => "/".to_string(),
            Route::Roast(id) => {
                format!("{ROAST_PREFIX}{}", utf8_percent_encode(id.as_str(), SEGMENT))
            }
        }
    }

    /// Matches a location path against the route table.
    ///
    /// Query string and fragment are ignored. Returns `None` for paths that
    /// are not part of the table, including a roast path whose segment is
    /// blank or not valid UTF-8 once decoded.
    pub fn recognize(location: &str) -> Option<Route> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);

        if path == "/" || path.is_empty() {
            return Some(Route::Entry);
        }

        let segment = path.strip_prefix(ROAST_PREFIX)?;
        if segment.contains('/') {
            return None;
        }
        let decoded = percent_decode_str(segment).decode_utf8().ok()?;
        ResourceIdentifier::validate(&decoded).ok().map(Route::Roast)
    }

    /// The identifier carried by the route, if any.
    pub fn identifier(&self) -> Option<&ResourceIdentifier> {
        match self {
            Route::Entry => None,
            Route::Roast(id) => Some(id),
        }
    }
}

/// A request to move the browser to another location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub route: Route,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigationIntent {
    pub fn push(route: Route) -> Self {
        Self { route, replace: false }
    }

    pub fn replace(route: Route) -> Self {
        Self { route, replace: true }
    }

    pub fn path(&self) -> String {
        self.route.to_path()
    }
}

/// Validates form input and turns it into a push to the roast view.
pub fn submit(raw: &str) -> Result<NavigationIntent, ValidationError> {
    let id = ResourceIdentifier::validate(raw)?;
    Ok(NavigationIntent::push(Route::Roast(id)))
}

/// Resolves the current location.
///
/// Returns the route to render and, for locations outside the route table,
/// the redirect the shell should perform.
pub fn resolve(location: &str) -> (Route, Option<NavigationIntent>) {
    match Route::recognize(location) {
        Some(route) => (route, None),
        None => {
            log::debug!("unknown location {location:?}, redirecting to entry view");
            (Route::Entry, Some(NavigationIntent::replace(Route::Entry)))
        }
    }
}

//! Route registry and url matching.

use std::sync::{OnceLock, RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::RouteConfig;
use crate::error::{Result, RoutingError};
use crate::parameter::{ParamKind, Parameter};
use crate::route::{PathParams, Route};

/// Name of the reserved fallback route returned when nothing matches.
pub const FALLBACK_ROUTE: &str = "error404";

/// A successful match: the winning route and its extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route.
    pub route: &'a Route,
    /// Parameter values extracted from the url (empty for the fallback,
    /// which is exempt from verification).
    pub params: PathParams,
}

/// An ordered, name-keyed registry of routes.
///
/// Routes are matched in insertion order: first match wins, with no
/// specificity re-ranking. Registering a route under an existing name
/// overwrites it in place, keeping the original position.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: IndexMap<String, Route>,
}

static SHARED: OnceLock<RwLock<RouteCollection>> = OnceLock::new();

impl RouteCollection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an independent collection holding `routes`.
    pub fn with_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut collection = Self::new();
        for route in routes {
            collection.add(route);
        }
        collection
    }

    /// Returns the process-wide shared collection, created empty on
    /// first access.
    ///
    /// The lock is the only synchronization this type provides; the
    /// intended discipline is a single writer during startup and
    /// read-only matching thereafter.
    pub fn shared() -> &'static RwLock<Self> {
        Self::shared_with(std::iter::empty())
    }

    /// Returns the process-wide shared collection, seeding it with
    /// `routes` if and only if this is the first access.
    ///
    /// Later calls ignore `routes`, even when non-empty; the shared
    /// collection is never reset for the lifetime of the process. Use
    /// [`RouteCollection::new`] or [`RouteCollection::with_routes`] for
    /// an independent instance.
    pub fn shared_with(routes: impl IntoIterator<Item = Route>) -> &'static RwLock<Self> {
        SHARED.get_or_init(|| RwLock::new(Self::with_routes(routes)))
    }

    /// Adds a route, overwriting any route with the same name. Chainable.
    pub fn add(&mut self, route: Route) -> &mut Self {
        self.routes.insert(route.name.clone(), route);
        self
    }

    /// Looks a route up by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::RouteNotFound`] when no route is
    /// registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Route> {
        self.routes
            .get(name)
            .ok_or_else(|| RoutingError::RouteNotFound(name.to_string()))
    }

    /// Builds and registers routes from declarative configuration, in
    /// declaration order.
    ///
    /// A parameter with no declared `type` defaults to `"string"`;
    /// unrecognized type strings become custom patterns
    /// ([`ParamKind::Pattern`]).
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ConfigInvalid`] when an entry lacks its
    /// `route` or `controller` key.
    pub fn add_from_config(&mut self, config: RouteConfig) -> Result<&mut Self> {
        for (name, entry) in config {
            let pattern = entry.route.ok_or_else(|| RoutingError::ConfigInvalid {
                route: name.clone(),
                key: "route",
            })?;
            let controller = entry.controller.ok_or_else(|| RoutingError::ConfigInvalid {
                route: name.clone(),
                key: "controller",
            })?;

            let parameters: Vec<Parameter> = entry
                .params
                .into_iter()
                .map(|(param_name, param)| {
                    let declared = param.kind.as_deref().unwrap_or("string");
                    Parameter::new(param_name, ParamKind::classify(declared), param.mandatory)
                })
                .collect();

            self.add(Route::new(name, pattern, controller, parameters));
        }

        Ok(self)
    }

    /// Finds the first route matching `url`, in insertion order.
    ///
    /// With `redirect404` set, a miss resolves to the reserved
    /// [`FALLBACK_ROUTE`] with empty parameters; without it, a miss is
    /// `Ok(None)` and the caller decides what happens next.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::RouteNotFound`] when the fallback is
    /// requested but no `"error404"` route is registered.
    pub fn match_url(&self, url: &str, redirect404: bool) -> Result<Option<RouteMatch<'_>>> {
        for route in self.routes.values() {
            if let Some(params) = route.capture(url) {
                debug!(route = %route.name, url, "matched route");
                return Ok(Some(RouteMatch { route, params }));
            }
        }

        if !redirect404 {
            return Ok(None);
        }

        let fallback = self.get(FALLBACK_ROUTE)?;
        debug!(route = %fallback.name, url, "no route matched, using fallback");
        Ok(Some(RouteMatch {
            route: fallback,
            params: PathParams::new(),
        }))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the collection holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_routes() -> RouteCollection {
        let mut collection = RouteCollection::new();
        collection
            .add(Route::new("home", "/", "HomeController", []))
            .add(Route::new(
                "user",
                "/user/:id",
                "UserController",
                [Parameter::new("id", ParamKind::Int, true)],
            ))
            .add(Route::new(
                "error404",
                "/404",
                "ErrorController",
                [],
            ));
        collection
    }

    #[test]
    fn test_add_and_get() {
        let collection = sample_routes();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get("user").unwrap().controller, "UserController");

        let err = collection.get("missing").unwrap_err();
        assert!(matches!(err, RoutingError::RouteNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_first_match_wins() {
        let mut collection = RouteCollection::new();
        collection
            .add(Route::new(
                "first",
                "/page/:slug",
                "FirstController",
                [Parameter::new("slug", ParamKind::Str, true)],
            ))
            .add(Route::new(
                "second",
                "/page/:slug",
                "SecondController",
                [Parameter::new("slug", ParamKind::Str, true)],
            ));

        let matched = collection.match_url("/page/about", false).unwrap().unwrap();
        assert_eq!(matched.route.name, "first");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut collection = RouteCollection::new();
        collection
            .add(Route::new(
                "first",
                "/page/:slug",
                "FirstController",
                [Parameter::new("slug", ParamKind::Str, true)],
            ))
            .add(Route::new(
                "second",
                "/page/:slug",
                "SecondController",
                [Parameter::new("slug", ParamKind::Str, true)],
            ))
            .add(Route::new(
                "first",
                "/page/:slug",
                "ReplacementController",
                [Parameter::new("slug", ParamKind::Str, true)],
            ));

        assert_eq!(collection.len(), 2);
        let matched = collection.match_url("/page/about", false).unwrap().unwrap();
        assert_eq!(matched.route.name, "first");
        assert_eq!(matched.route.controller, "ReplacementController");
    }

    #[test]
    fn test_match_extracts_params() {
        let collection = sample_routes();
        let matched = collection.match_url("/user/42", true).unwrap().unwrap();
        assert_eq!(matched.route.name, "user");
        assert_eq!(matched.params.get("id"), Some("42"));
    }

    #[test]
    fn test_match_falls_back_to_error404() {
        let collection = sample_routes();
        let matched = collection.match_url("/user/abc", true).unwrap().unwrap();
        assert_eq!(matched.route.name, FALLBACK_ROUTE);
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_match_without_fallback_is_no_match() {
        let collection = sample_routes();
        assert!(collection.match_url("/user/abc", false).unwrap().is_none());
    }

    #[test]
    fn test_missing_fallback_route_is_an_error() {
        let mut collection = RouteCollection::new();
        collection.add(Route::new("home", "/", "HomeController", []));

        let err = collection.match_url("/nowhere", true).unwrap_err();
        assert!(matches!(err, RoutingError::RouteNotFound(name) if name == FALLBACK_ROUTE));
    }

    #[test]
    fn test_match_result_always_verifies() {
        let collection = sample_routes();
        for url in ["/", "/user/42", "/404", "/user/abc", "/user/42/extra"] {
            if let Some(matched) = collection.match_url(url, true).unwrap() {
                if matched.route.name != FALLBACK_ROUTE {
                    assert!(matched.route.verify(url), "match returned a non-verifying route for {url}");
                }
            }
        }
    }

    #[test]
    fn test_with_routes_preserves_order() {
        let collection = RouteCollection::with_routes([
            Route::new("a", "/a", "A", []),
            Route::new("b", "/b", "B", []),
        ]);
        let names: Vec<&str> = collection.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // The shared instance is process-wide state, so every property about
    // it lives in this single test.
    #[test]
    fn test_shared_instance_is_created_once() {
        let first = RouteCollection::shared_with([Route::new("home", "/", "HomeController", [])]);
        let second = RouteCollection::shared_with([Route::new("other", "/other", "OtherController", [])]);

        assert!(std::ptr::eq(first, second));

        let shared = first.read().unwrap();
        assert!(shared.get("home").is_ok());
        assert!(shared.get("other").is_err());

        // Independent instances never share state with the shared one.
        let independent = RouteCollection::with_routes([Route::new("other", "/other", "OtherController", [])]);
        assert!(independent.get("other").is_ok());
        assert!(shared.get("other").is_err());
    }
}

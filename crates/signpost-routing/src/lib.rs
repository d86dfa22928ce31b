//! # signpost-routing
//!
//! A url-to-controller route registry with typed path parameters.
//!
//! This crate provides:
//! - An ordered, name-keyed route registry with first-match-wins lookup
//! - Pattern matching with typed parameter extraction (`:name`
//!   placeholders validated as string, int, mixed, or a custom pattern)
//! - Declarative, serde-friendly route configuration
//! - A reserved `error404` fallback route for unmatched urls
//!
//! ## Quick Start
//!
//! ```
//! use signpost_routing::{ParamKind, Parameter, Route, RouteCollection};
//!
//! let mut routes = RouteCollection::new();
//! routes
//!     .add(Route::new("home", "/", "HomeController", []))
//!     .add(Route::new(
//!         "user",
//!         "/user/:id",
//!         "UserController",
//!         [Parameter::new("id", ParamKind::Int, true)],
//!     ))
//!     .add(Route::new("error404", "/404", "ErrorController", []));
//!
//! let matched = routes.match_url("/user/42", true).unwrap().unwrap();
//! assert_eq!(matched.route.name, "user");
//! assert_eq!(matched.route.controller, "UserController");
//! assert_eq!(matched.params.get("id"), Some("42"));
//! ```
//!
//! ## Configuration
//!
//! Routes are typically declared in config data loaded by the host
//! application:
//!
//! ```
//! use signpost_routing::{from_json, RouteCollection};
//!
//! let config = from_json(
//!     r#"{
//!         "home":     {"route": "/", "controller": "HomeController"},
//!         "user":     {"route": "/user/:id", "controller": "UserController",
//!                      "params": {"id": {"type": "int", "mandatory": true}}},
//!         "error404": {"route": "/404", "controller": "ErrorController"}
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut routes = RouteCollection::new();
//! routes.add_from_config(config).unwrap();
//!
//! // A non-numeric id does not match; the fallback route answers.
//! let matched = routes.match_url("/user/abc", true).unwrap().unwrap();
//! assert_eq!(matched.route.name, "error404");
//! ```
//!
//! ## Matching semantics
//!
//! Routes are tried in registration order and the first match wins;
//! there is no specificity scoring. Literal segments compare
//! case-sensitively. Trailing optional placeholders may be absent from
//! the url; anything else must line up segment for segment, with no
//! extra segments left over. Registering a route under an existing name
//! silently replaces it.

mod collection;
mod config;
mod error;
mod parameter;
mod route;

pub use collection::{RouteCollection, RouteMatch, FALLBACK_ROUTE};
pub use config::{from_json, ParamConfig, RouteConfig, RouteConfigEntry};
pub use error::{Result, RoutingError};
pub use parameter::{ParamKind, Parameter};
pub use route::{PathParams, PatternSegment, Route};

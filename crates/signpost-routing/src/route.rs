//! Route definition and path matching.

use std::str::FromStr;

use indexmap::IndexMap;

use crate::parameter::Parameter;

/// A segment in a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// A literal string segment.
    Literal(String),
    /// A named placeholder segment (e.g. `:id`).
    Placeholder(String),
}

/// Parameter values extracted from a matched url, in placeholder order.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: IndexMap<String, String>,
}

impl PathParams {
    /// Creates new empty path params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Gets a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over the parameters, in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of extracted values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no values were extracted.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A named mapping from a url pattern to a controller, with typed
/// extractable parameters.
///
/// Patterns are template paths whose segments are either literals or
/// `:name` placeholders:
///
/// ```
/// use signpost_routing::{ParamKind, Parameter, Route};
///
/// let route = Route::new(
///     "user",
///     "/user/:id",
///     "UserController",
///     [Parameter::new("id", ParamKind::Int, true)],
/// );
/// let params = route.capture("/user/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(!route.verify("/user/abc"));
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    /// Route name, the key within a collection.
    pub name: String,
    /// The original pattern string.
    pub pattern: String,
    /// Opaque controller identifier, passed through uninterpreted.
    pub controller: String,
    /// Declared parameters keyed by placeholder name, in declaration
    /// order.
    pub parameters: IndexMap<String, Parameter>,
    /// Segments parsed from the pattern at construction.
    segments: Vec<PatternSegment>,
}

impl Route {
    /// Creates a new route.
    ///
    /// The pattern is decomposed once here; a pattern with no
    /// placeholders is a pure literal-path match.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        controller: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Self {
        let pattern = pattern.into();
        let segments = parse_segments(&pattern);

        Self {
            name: name.into(),
            pattern,
            controller: controller.into(),
            parameters: parameters
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
            segments,
        }
    }

    /// Returns the parsed pattern segments.
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Tests whether `url` matches this route's pattern.
    pub fn verify(&self, url: &str) -> bool {
        self.capture(url).is_some()
    }

    /// Matches `url` against the pattern, extracting parameter values.
    ///
    /// Literal segments must match exactly, case-sensitively. A
    /// placeholder segment must satisfy its parameter's type; a
    /// placeholder with no declared parameter behaves as a mandatory
    /// string. Trailing optional placeholders may be absent from the
    /// url, but an optional placeholder followed by a literal or a
    /// mandatory placeholder cannot be skipped. Extra url segments
    /// beyond the pattern fail the match. A query string or fragment on
    /// `url` is ignored, as is a single trailing slash.
    pub fn capture(&self, url: &str) -> Option<PathParams> {
        let path: Vec<&str> = split_path(url).collect();
        if path.len() > self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PatternSegment::Literal(literal) => {
                    if path.get(idx).copied() != Some(literal.as_str()) {
                        return None;
                    }
                }
                PatternSegment::Placeholder(name) => match path.get(idx) {
                    Some(value) => {
                        let accepted = self
                            .parameters
                            .get(name)
                            .map_or(!value.is_empty(), |parameter| parameter.accepts(value));
                        if !accepted {
                            return None;
                        }
                        params.insert(name.as_str(), *value);
                    }
                    None => {
                        if !self.tail_optional(idx) {
                            return None;
                        }
                        // Absent optional placeholders record no value.
                    }
                },
            }
        }

        Some(params)
    }

    /// True when every pattern segment from `idx` on is an optional
    /// placeholder.
    fn tail_optional(&self, idx: usize) -> bool {
        self.segments[idx..].iter().all(|segment| match segment {
            PatternSegment::Literal(_) => false,
            PatternSegment::Placeholder(name) => self
                .parameters
                .get(name)
                .is_some_and(|parameter| !parameter.mandatory),
        })
    }
}

/// Parses a pattern into literal and placeholder segments.
fn parse_segments(pattern: &str) -> Vec<PatternSegment> {
    split_path(pattern)
        .map(|part| match part.strip_prefix(':') {
            Some(name) => PatternSegment::Placeholder(name.to_string()),
            None => PatternSegment::Literal(part.to_string()),
        })
        .collect()
}

/// Splits a url into path segments, dropping any query string or
/// fragment and empty segments.
fn split_path(url: &str) -> impl Iterator<Item = &str> {
    let path = url
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    path.split('/').filter(|s| !s.is_empty())
}

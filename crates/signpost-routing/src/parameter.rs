//! Typed path parameters.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// Classification of a parameter's declared type.
///
/// The declared string is mapped once, at construction. `"string"`,
/// `"int"` and `"mixed"` (case-sensitive) select the built-in kinds;
/// any other string is retained verbatim as a regular-expression
/// fragment that must match the whole path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Any non-empty sequence of non-separator characters.
    Str,
    /// A non-empty run of ASCII digits (a non-negative whole number).
    Int,
    /// Any segment, no shape constraint.
    Mixed,
    /// A custom regular-expression fragment matched against the whole
    /// segment.
    Pattern(String),
}

impl ParamKind {
    /// Maps a declared type string to its kind.
    ///
    /// Unrecognized strings are not rejected; they become
    /// [`ParamKind::Pattern`].
    pub fn classify(declared: &str) -> Self {
        match declared {
            "string" => Self::Str,
            "int" => Self::Int,
            "mixed" => Self::Mixed,
            other => Self::Pattern(other.to_string()),
        }
    }
}

/// A named, typed placeholder within a route pattern.
#[derive(Debug)]
pub struct Parameter {
    /// Parameter name, unique within its route.
    pub name: String,
    /// Type classification, decided once at construction.
    pub kind: ParamKind,
    /// Whether the parameter must be present in the url.
    pub mandatory: bool,
    /// Compiled form of a custom pattern, built on first use.
    compiled: OnceLock<Option<Regex>>,
}

impl Parameter {
    /// Creates a new parameter. No validation is performed on `name` or
    /// on custom pattern fragments.
    pub fn new(name: impl Into<String>, kind: ParamKind, mandatory: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            mandatory,
            compiled: OnceLock::new(),
        }
    }

    /// Tests whether a url segment satisfies this parameter's type.
    ///
    /// A custom pattern that fails to compile never accepts anything;
    /// compilation is attempted once and the result cached.
    pub fn accepts(&self, segment: &str) -> bool {
        match &self.kind {
            ParamKind::Str => !segment.is_empty(),
            ParamKind::Int => {
                !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
            }
            ParamKind::Mixed => true,
            ParamKind::Pattern(_) => self.compiled().is_some_and(|re| re.is_match(segment)),
        }
    }

    fn compiled(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| match &self.kind {
                ParamKind::Pattern(fragment) => match Regex::new(&format!("^(?:{fragment})$")) {
                    Ok(re) => Some(re),
                    Err(err) => {
                        warn!(
                            parameter = %self.name,
                            error = %err,
                            "invalid parameter pattern, segment will never match"
                        );
                        None
                    }
                },
                _ => None,
            })
            .as_ref()
    }
}

impl Clone for Parameter {
    fn clone(&self) -> Self {
        // The compiled cache is rebuilt on demand.
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            mandatory: self.mandatory,
            compiled: OnceLock::new(),
        }
    }
}

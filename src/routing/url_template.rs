//! Path templates with `{name}` placeholders, usable in both directions:
//! filling the placeholders in to build a path, and matching a path to pull
//! the placeholder values back out.

use crate::routing::error::RoutingError;
use regex::Regex;
use std::collections::BTreeMap;

/// Placeholder name → value.
pub type UrlParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Placeholder(String),
}

/// A compiled path template such as `/{features}/{settings}/q/{query}.{format}`.
///
/// # Examples
///
/// ```
/// use wunderground::UrlTemplate;
///
/// let template = UrlTemplate::compile("/station/{id}.{format}").unwrap();
/// let params = template.captures("/station/KSFO.json").unwrap();
/// assert_eq!(params["id"], "KSFO");
/// assert_eq!(params["format"], "json");
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    source: String,
    parts: Vec<Part>,
    matcher: Regex,
}

impl UrlTemplate {
    /// Compiles `template` with a single left-to-right scan.
    ///
    /// Literal runs are matched verbatim; each `{name}` placeholder (name made of
    /// ASCII letters, digits and `_`) matches one or more characters other than `/`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidPattern`] for an empty template, a `{` that does not
    /// open a valid placeholder, or a placeholder name used twice.
    pub fn compile(template: &str) -> Result<Self, RoutingError> {
        if template.is_empty() {
            return Err(RoutingError::InvalidPattern(String::new()));
        }

        let mut parts = Vec::new();
        let mut pattern = String::from("^");
        let mut rest = template;

        while !rest.is_empty() {
            if let Some(after_brace) = rest.strip_prefix('{') {
                let name = after_brace
                    .split_once('}')
                    .map(|(name, _)| name)
                    .filter(|name| is_placeholder_name(name))
                    .ok_or_else(|| RoutingError::InvalidPattern(rest.to_string()))?;

                pattern.push_str(&format!("(?P<{name}>[^/]+)"));
                parts.push(Part::Placeholder(name.to_string()));
                rest = &after_brace[name.len() + 1..];
            } else {
                let end = rest.find('{').unwrap_or(rest.len());
                let literal = &rest[..end];

                pattern.push_str(&regex::escape(literal));
                parts.push(Part::Literal(literal.to_string()));
                rest = &rest[end..];
            }
        }
        pattern.push('$');

        let matcher =
            Regex::new(&pattern).map_err(|_| RoutingError::InvalidPattern(template.to_string()))?;

        Ok(Self {
            source: template.to_string(),
            parts,
            matcher,
        })
    }

    /// The template text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Placeholder(name) => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Substitutes every placeholder with its value from `params`.
    ///
    /// Values are inserted as is. Extra entries in `params` are ignored.
    ///
    /// # Errors
    ///
    /// [`RoutingError::MissingParameter`] when a placeholder has no value.
    pub fn expand(&self, params: &UrlParams) -> Result<String, RoutingError> {
        let mut path = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Literal(literal) => path.push_str(literal),
                Part::Placeholder(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| RoutingError::MissingParameter(name.clone()))?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }

    /// Matches `path` against the whole template and returns the named captures.
    pub fn captures(&self, path: &str) -> Option<UrlParams> {
        let captures = self.matcher.captures(path)?;
        Some(
            self.matcher
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.to_string(), value.as_str().to_string()))
                })
                .collect(),
        )
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

//! Compiled path patterns.
//!
//! # Responsibilities
//! - Compile a path template into a matcher at registration time
//! - Match a request path, exposing captured parameters
//! - Match and strip path prefixes for mounted sub-routers
//!
//! # Design Decisions
//! - Template syntax is matchit's: literal segments, `{name}` parameters,
//!   `{*rest}` catch-alls
//! - One compiled matcher per route; overlap between templates is resolved
//!   by registration order in the router, not here
//! - Prefix matching is a literal starts-with check, case-sensitive; a
//!   trailing `*` on the prefix template is accepted and trimmed

use std::fmt;
use thiserror::Error;

/// Registration-time pattern failure.
///
/// Surfaced directly to the caller of the registration operation; a router
/// never holds a route whose pattern failed to compile.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The template was rejected by the pattern compiler.
    #[error("invalid path template {template:?}: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: matchit::InsertError,
    },

    /// The prefix template does not denote a path.
    #[error("invalid path prefix {template:?}: must begin with '/'")]
    InvalidPrefix { template: String },
}

/// A compiled path template for a single route.
pub struct PathPattern {
    template: String,
    matcher: matchit::Router<()>,
}

impl PathPattern {
    /// Compile a template, failing fast on malformed input.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let mut matcher = matchit::Router::new();
        matcher
            .insert(template, ())
            .map_err(|source| PatternError::InvalidTemplate {
                template: template.to_string(),
                source,
            })?;
        Ok(Self {
            template: template.to_string(),
            matcher,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a request path, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let matched = self.matcher.at(path).ok()?;
        Some(PathMatch {
            params: matched
                .params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("template", &self.template)
            .finish()
    }
}

/// Structured result of a successful path match.
///
/// Carries the parameters captured by `{name}` and `{*name}` template
/// segments, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatch {
    params: Vec<(String, String)>,
}

impl PathMatch {
    /// Look up a captured parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate captured `(name, value)` pairs in capture order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when the template captured nothing (all-literal match).
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A compiled path-prefix pattern for a mounted sub-router.
///
/// Matching is a literal leading-string comparison: the prefix does not
/// enforce a segment boundary, so registrars should mount whole segments
/// (`/api`, not `/ap`).
#[derive(Debug, Clone)]
pub struct PathPrefix {
    template: String,
    prefix: String,
}

impl PathPrefix {
    /// Compile a prefix template.
    ///
    /// A single trailing `*` is tolerated and trimmed, mirroring common
    /// wildcard-mount spellings; trailing slashes are normalized away.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let trimmed = template.trim();
        if !trimmed.starts_with('/') {
            return Err(PatternError::InvalidPrefix {
                template: template.to_string(),
            });
        }
        let prefix = trimmed
            .strip_suffix('*')
            .unwrap_or(trimmed)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            template: trimmed.to_string(),
            prefix,
        })
    }

    /// The template this prefix was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The literal prefix compared against request paths.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `path` falls under this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Strip the matched prefix, yielding the path the sub-router sees.
    /// The result is always a rooted path; stripping the whole path yields
    /// `/`.
    pub(crate) fn strip(&self, path: &str) -> String {
        let rest = &path[self.prefix.len()..];
        if rest.is_empty() {
            "/".to_string()
        } else if rest.starts_with('/') {
            rest.to_string()
        } else {
            format!("/{rest}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let pattern = PathPattern::compile("/ping").unwrap();
        assert!(pattern.matches("/ping").is_some());
        assert!(pattern.matches("/ping/pong").is_none());
        assert!(pattern.matches("/pong").is_none());
    }

    #[test]
    fn test_named_param_capture() {
        let pattern = PathPattern::compile("/users/{id}").unwrap();
        let matched = pattern.matches("/users/42").unwrap();
        assert_eq!(matched.param("id"), Some("42"));
        assert_eq!(matched.param("missing"), None);
        assert!(!matched.is_empty());

        // A missing segment is a non-match, not an empty capture.
        assert!(pattern.matches("/users").is_none());
    }

    #[test]
    fn test_catch_all_capture() {
        let pattern = PathPattern::compile("/files/{*path}").unwrap();
        let matched = pattern.matches("/files/a/b/c.txt").unwrap();
        assert_eq!(matched.param("path"), Some("a/b/c.txt"));
    }

    #[test]
    fn test_malformed_template_fails_compile() {
        let err = PathPattern::compile("/files/{*path}/tail").unwrap_err();
        assert!(matches!(err, PatternError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_prefix_match_and_strip() {
        let prefix = PathPrefix::compile("/api").unwrap();
        assert!(prefix.matches("/api/widgets"));
        assert!(prefix.matches("/api"));
        assert!(!prefix.matches("/other"));
        assert_eq!(prefix.strip("/api/widgets"), "/widgets");
        assert_eq!(prefix.strip("/api"), "/");
    }

    #[test]
    fn test_prefix_wildcard_spelling() {
        let prefix = PathPrefix::compile("/api/*").unwrap();
        assert_eq!(prefix.prefix(), "/api");
        assert_eq!(prefix.template(), "/api/*");
        assert_eq!(prefix.strip("/api/widgets"), "/widgets");
    }

    #[test]
    fn test_prefix_must_be_rooted() {
        let err = PathPrefix::compile("api").unwrap_err();
        assert!(matches!(err, PatternError::InvalidPrefix { .. }));
    }
}

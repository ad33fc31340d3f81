//! Template-variable resolution.
//!
//! Substitutes `{{name}}` placeholders against a snapshot of the active
//! environment's variables. Resolution is single-pass: resolved values are
//! never re-scanned for further placeholders, which rules out infinite
//! recursion from self-referential variables by construction.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Cached pattern for `{{variableName}}` spans. Compiled once and reused to
/// avoid repeated regex compilation overhead.
static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Failed to compile variable regex"));

/// An immutable snapshot of the active environment's variables.
///
/// The builder and executor receive a `Resolver` rather than reading the
/// shared environment store directly, so a send in flight never observes a
/// partially updated mapping.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    variables: Option<HashMap<String, String>>,
}

impl Resolver {
    /// A resolver with no active environment; every input passes through
    /// unchanged.
    pub fn empty() -> Self {
        Self { variables: None }
    }

    /// Creates a resolver over the given variables. An empty mapping behaves
    /// exactly like no active environment.
    pub fn new(variables: HashMap<String, String>) -> Self {
        if variables.is_empty() {
            Self::empty()
        } else {
            Self {
                variables: Some(variables),
            }
        }
    }

    /// Substitutes every `{{name}}` span whose trimmed name is present in
    /// the snapshot. Unknown placeholders are left literal; there is no
    /// error channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_client::variables::Resolver;
    /// use std::collections::HashMap;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("host".to_string(), "api.example.com".to_string());
    /// let resolver = Resolver::new(vars);
    ///
    /// assert_eq!(
    ///     resolver.resolve("https://{{host}}/users"),
    ///     "https://api.example.com/users"
    /// );
    /// assert_eq!(resolver.resolve("{{missing}}"), "{{missing}}");
    /// ```
    pub fn resolve(&self, text: &str) -> String {
        let Some(variables) = &self.variables else {
            return text.to_string();
        };

        // Fast path: no placeholder markers at all
        if !text.contains("{{") {
            return text.to_string();
        }

        VARIABLE_REGEX
            .replace_all(text, |caps: &Captures| {
                let name = caps[1].trim();
                match variables.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(pairs: &[(&str, &str)]) -> Resolver {
        Resolver::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_simple_substitution() {
        let r = resolver(&[("baseUrl", "https://api.example.com")]);
        assert_eq!(
            r.resolve("{{baseUrl}}/users"),
            "https://api.example.com/users"
        );
    }

    #[test]
    fn test_no_placeholders_returns_identical_text() {
        let r = resolver(&[("a", "1")]);
        assert_eq!(r.resolve("plain text"), "plain text");
        assert_eq!(r.resolve(""), "");
    }

    #[test]
    fn test_missing_variable_left_literal() {
        let r = resolver(&[("present", "yes")]);
        assert_eq!(r.resolve("{{missing}}"), "{{missing}}");
        assert_eq!(r.resolve("{{present}}-{{missing}}"), "yes-{{missing}}");
    }

    #[test]
    fn test_empty_resolver_passes_through() {
        let r = Resolver::empty();
        assert_eq!(r.resolve("{{anything}}"), "{{anything}}");
    }

    #[test]
    fn test_empty_mapping_behaves_like_no_environment() {
        let r = Resolver::new(HashMap::new());
        assert_eq!(r.resolve("{{x}}"), "{{x}}");
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let r = resolver(&[("host", "a.com")]);
        assert_eq!(
            r.resolve("{{host}}/x and {{host}}/y"),
            "a.com/x and a.com/y"
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let r = resolver(&[("token", "t0k")]);
        assert_eq!(r.resolve("Bearer {{ token }}"), "Bearer t0k");
    }

    #[test]
    fn test_single_pass_no_nested_resolution() {
        // The resolved value contains another placeholder; it must not be
        // re-scanned.
        let r = resolver(&[("a", "{{b}}"), ("b", "deep")]);
        assert_eq!(r.resolve("{{a}}"), "{{b}}");
    }

    #[test]
    fn test_self_referential_variable_terminates() {
        let r = resolver(&[("loop", "{{loop}}")]);
        assert_eq!(r.resolve("{{loop}}"), "{{loop}}");
    }

    #[test]
    fn test_multiple_distinct_variables() {
        let r = resolver(&[("host", "a.com"), ("port", "8080"), ("key", "s3cret")]);
        assert_eq!(
            r.resolve("https://{{host}}:{{port}}/api?key={{key}}"),
            "https://a.com:8080/api?key=s3cret"
        );
    }

    #[test]
    fn test_value_with_dollar_signs_inserted_verbatim() {
        let r = resolver(&[("price", "$1 and $2")]);
        assert_eq!(r.resolve("cost: {{price}}"), "cost: $1 and $2");
    }

    #[test]
    fn test_unclosed_braces_left_alone() {
        let r = resolver(&[("a", "1")]);
        assert_eq!(r.resolve("{{a"), "{{a");
        assert_eq!(r.resolve("a}}"), "a}}");
    }
}

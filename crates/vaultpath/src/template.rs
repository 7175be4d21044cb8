//! Endpoint templates for the Vault HTTP API.
//!
//! Every Vault endpoint has a canonical path shape such as
//! `/transform/role/{name}`: segments separated by `/`, where a segment is
//! either a literal or a `{name}` placeholder, and the first segment is the
//! default mount point the user may override. A template is parsed once into
//! an ordered segment list, and that one value drives both directions:
//!
//! - [`EndpointTemplate::render`] produces the concrete request path from a
//!   user-chosen mount path and the configured field values.
//! - [`EndpointTemplate::extract`] recovers the parameter values from a
//!   concrete path, capturing the mount segment under the fixed name `path`.
//!
//! # Known limitation
//!
//! Extraction matches placeholders greedily (`.+`). When a template has more
//! than one placeholder and a parameter value itself contains `/`, the split
//! between captures is decided by greedy-then-backtrack matching and can land
//! on the wrong boundary. This mirrors how mount paths with `/` in them have
//! always been matched; callers that need unambiguous captures must keep `/`
//! out of non-mount parameter values.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use crate::error::{ExtractError, FieldError, TemplateError};
use crate::fields::{self, FieldReader};

/// One parsed segment of an endpoint template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed path text, matched and emitted verbatim.
    Literal(String),
    /// A `{name}` parameter slot.
    Placeholder(String),
}

/// A parsed endpoint path shape.
///
/// Parsing keeps the original string for display and error messages, and the
/// segment list for rendering and matching. The leading `/` is implicit: the
/// segment at index 0 is the mount-point segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl EndpointTemplate {
    /// Parse a canonical endpoint path into a template.
    ///
    /// A segment of the exact form `{name}` becomes a placeholder; anything
    /// else, including segments with braces embedded mid-text, is literal.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::MissingLeadingSlash`] if the path does not start
    ///   with `/`.
    /// - [`TemplateError::MissingMountSegment`] if nothing follows the
    ///   leading `/`.
    /// - [`TemplateError::EmptyPlaceholder`] on a `{}` segment.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(TemplateError::MissingLeadingSlash {
                template: raw.to_owned(),
            });
        };
        if rest.is_empty() {
            return Err(TemplateError::MissingMountSegment {
                template: raw.to_owned(),
            });
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            match placeholder_name(part) {
                Some("") => {
                    return Err(TemplateError::EmptyPlaceholder {
                        template: raw.to_owned(),
                    });
                }
                Some(name) => segments.push(Segment::Placeholder(name.to_owned())),
                None => segments.push(Segment::Literal(part.to_owned())),
            }
        }

        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    /// The canonical path this template was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments, mount segment first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the placeholders after the mount segment, in path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().skip(1).filter_map(|seg| match seg {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render the concrete request path for this endpoint.
    ///
    /// The mount-point segment is replaced by `mount` unconditionally. Every
    /// other placeholder is resolved through `fields`; a placeholder with no
    /// configured value passes through literally as `{name}` rather than
    /// failing, so callers see exactly which parameter was missing when the
    /// remote call is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotAString`] if a configured value for a
    /// placeholder is not a string. Path parameters are always strings.
    pub fn render(&self, mount: &str, fields: &impl FieldReader) -> Result<String, FieldError> {
        let mut out = String::with_capacity(self.raw.len() + mount.len());
        for (i, segment) in self.segments.iter().enumerate() {
            out.push('/');
            if i == 0 {
                out.push_str(mount);
                continue;
            }
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match fields.get(name) {
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                    Some(value) => out.push_str(fields::expect_string(name, value)?),
                },
            }
        }

        debug!(template = %self.raw, path = %out, "rendered endpoint path");
        Ok(out)
    }

    /// Extract the parameter values from a concrete path.
    ///
    /// The mount-point segment is always captured under the fixed name
    /// `path`, whatever the template calls it; remaining placeholders capture
    /// under their own names. A leading `/` on `concrete` is accepted and
    /// ignored, so both rendered paths and stored resource identifiers match.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Compile`] if the template cannot be turned into a
    ///   matcher (illegal or duplicate placeholder name).
    /// - [`ExtractError::Mismatch`] if `concrete` does not have the
    ///   template's shape.
    pub fn extract(&self, concrete: &str) -> Result<HashMap<String, String>, ExtractError> {
        let matcher = Regex::new(&self.match_pattern())?;
        let target = concrete.strip_prefix('/').unwrap_or(concrete);

        let mismatch = || ExtractError::Mismatch {
            path: concrete.to_owned(),
            endpoint: self.raw.clone(),
        };
        let captures = matcher.captures(target).ok_or_else(mismatch)?;

        let mut params = HashMap::new();
        for name in matcher.capture_names().flatten() {
            let capture = captures.name(name).ok_or_else(mismatch)?;
            params.insert(name.to_owned(), capture.as_str().to_owned());
        }

        debug!(template = %self.raw, path = %concrete, params = params.len(), "extracted path parameters");
        Ok(params)
    }

    /// Build the anchored match pattern over the slash-stripped path.
    fn match_pattern(&self) -> String {
        let mut pattern = String::from("^");
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            if i == 0 {
                // The mount segment is always capturable, under the fixed
                // name `path`.
                pattern.push_str("(?P<path>.+)");
                continue;
            }
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Placeholder(name) => {
                    pattern.push_str("(?P<");
                    pattern.push_str(name);
                    pattern.push_str(">.+)");
                }
            }
        }
        pattern.push('$');
        pattern
    }
}

impl FromStr for EndpointTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `{name}` segments yield `Some(name)`; everything else is `None`.
/// Braces inside the name disqualify it, so `{a}{b}` stays literal.
fn placeholder_name(segment: &str) -> Option<&str> {
    let name = segment.strip_prefix('{')?.strip_suffix('}')?;
    if name.contains(['{', '}']) {
        return None;
    }
    Some(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fields::FieldMap;

    fn template(raw: &str) -> EndpointTemplate {
        EndpointTemplate::parse(raw).unwrap()
    }

    fn fields(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn parse_splits_literals_and_placeholders() {
        let tmpl = template("/transform/role/{name}");
        assert_eq!(
            tmpl.segments(),
            &[
                Segment::Literal("transform".to_owned()),
                Segment::Literal("role".to_owned()),
                Segment::Placeholder("name".to_owned()),
            ]
        );
        assert_eq!(tmpl.placeholders().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(tmpl.as_str(), "/transform/role/{name}");
    }

    #[test]
    fn parse_rejects_missing_leading_slash() {
        let err = EndpointTemplate::parse("transform/role/{name}").unwrap_err();
        assert!(matches!(err, TemplateError::MissingLeadingSlash { .. }));
    }

    #[test]
    fn parse_rejects_empty_path() {
        let err = EndpointTemplate::parse("/").unwrap_err();
        assert!(matches!(err, TemplateError::MissingMountSegment { .. }));
    }

    #[test]
    fn parse_rejects_unnamed_placeholder() {
        let err = EndpointTemplate::parse("/transform/role/{}").unwrap_err();
        assert!(matches!(err, TemplateError::EmptyPlaceholder { .. }));
    }

    #[test]
    fn parse_keeps_embedded_braces_literal() {
        let tmpl = template("/transform/role-{name}/x");
        assert_eq!(
            tmpl.segments()[1],
            Segment::Literal("role-{name}".to_owned())
        );
    }

    #[test]
    fn render_substitutes_mount_and_fields() {
        let tmpl = template("/transform/role/{name}");
        let fields = fields(&[("name", json!("my-role"))]);

        let path = tmpl.render("transform", &fields).unwrap();
        assert_eq!(path, "/transform/role/my-role");

        // The mount segment follows the user's mount path, not the default.
        let path = tmpl.render("transform-ns1", &fields).unwrap();
        assert_eq!(path, "/transform-ns1/role/my-role");
    }

    #[test]
    fn render_leaves_missing_fields_unresolved() {
        let tmpl = template("/transform/role/{name}");
        let path = tmpl.render("transform", &FieldMap::new()).unwrap();
        assert_eq!(path, "/transform/role/{name}");
    }

    #[test]
    fn render_rejects_non_string_values() {
        let tmpl = template("/transform/role/{name}");
        let fields = fields(&[("name", json!(["my-role"]))]);

        let err = tmpl.render("transform", &fields).unwrap_err();
        assert!(matches!(
            err,
            FieldError::NotAString { field, actual: "array" } if field == "name"
        ));
    }

    #[test]
    fn render_resolves_repeated_placeholders() {
        let tmpl = template("/sys/{name}/copy/{name}");
        let fields = fields(&[("name", json!("alpha"))]);
        let path = tmpl.render("sys", &fields).unwrap();
        assert_eq!(path, "/sys/alpha/copy/alpha");
    }

    #[test]
    fn render_is_pure() {
        let tmpl = template("/transform/role/{name}");
        let fields = fields(&[("name", json!("my-role"))]);
        let first = tmpl.render("transform", &fields).unwrap();
        let second = tmpl.render("transform", &fields).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn extract_captures_mount_under_fixed_name() {
        let tmpl = template("/transform/role/{name}");
        let params = tmpl.extract("transform/role/my-role").unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params["path"], "transform");
        assert_eq!(params["name"], "my-role");
    }

    #[test]
    fn extract_accepts_leading_slash() {
        let tmpl = template("/transform/role/{name}");
        let params = tmpl.extract("/transform/role/my-role").unwrap();
        assert_eq!(params["path"], "transform");
        assert_eq!(params["name"], "my-role");
    }

    #[test]
    fn extract_rejects_shape_mismatch() {
        let tmpl = template("/transform/role/{name}");
        let err = tmpl.extract("transform/roles/my-role").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not parse `transform/roles/my-role` into `/transform/role/{name}`"
        );
    }

    #[test]
    fn extract_rejects_missing_parameter_segment() {
        let tmpl = template("/transform/role/{name}");
        let err = tmpl.extract("transform/role").unwrap_err();
        assert!(matches!(err, ExtractError::Mismatch { .. }));
    }

    #[test]
    fn extract_rejects_illegal_placeholder_name() {
        let tmpl = template("/transform/role/{role-name}");
        let err = tmpl.extract("transform/role/my-role").unwrap_err();
        assert!(matches!(err, ExtractError::Compile(_)));
    }

    #[test]
    fn extract_handles_multiple_placeholders() {
        let tmpl = template("/transform/role/{name}/rotation/{version}");
        let params = tmpl.extract("transform/role/my-role/rotation/v2").unwrap();
        assert_eq!(params["path"], "transform");
        assert_eq!(params["name"], "my-role");
        assert_eq!(params["version"], "v2");
    }

    #[test]
    fn extract_mount_capture_may_span_slashes() {
        // Mount paths routinely contain `/`; the greedy mount capture takes
        // everything up to the last match of the remaining literals.
        let tmpl = template("/transform/role/{name}");
        let params = tmpl
            .extract("transform-56614161/foo7306072804/role/my-role")
            .unwrap();
        assert_eq!(params["path"], "transform-56614161/foo7306072804");
        assert_eq!(params["name"], "my-role");
    }

    #[test]
    fn extract_greedy_split_pins_slash_bearing_values() {
        // Known limitation: with a `/` in a later parameter value, the
        // greedy-then-backtrack split decides the boundary.
        let tmpl = template("/transform/role/{name}");
        let params = tmpl.extract("transform/sub/role/my/role").unwrap();
        assert_eq!(params["path"], "transform/sub");
        assert_eq!(params["name"], "my/role");
    }

    #[test]
    fn round_trip_single_placeholder() {
        let tmpl = template("/transform/role/{name}");
        let fields = fields(&[("name", json!("my-role"))]);

        let path = tmpl.render("transform-56614161", &fields).unwrap();
        let params = tmpl.extract(&path).unwrap();

        assert_eq!(params["path"], "transform-56614161");
        assert_eq!(params["name"], "my-role");
    }

    #[test]
    fn from_str_and_display_round_trip() {
        let tmpl: EndpointTemplate = "/transform/role/{name}".parse().unwrap();
        assert_eq!(tmpl.to_string(), "/transform/role/{name}");
    }
}

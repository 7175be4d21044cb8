//! Error types for `vaultpath`.
//!
//! Each error variant carries enough context to diagnose the problem without
//! a debugger: the offending template or path is always part of the message.

/// Errors from parsing an endpoint template string.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template does not begin with `/`.
    #[error("endpoint template `{template}` must begin with '/'")]
    MissingLeadingSlash { template: String },

    /// The template has no segment after the leading `/`, so there is no
    /// mount-point segment to substitute.
    #[error("endpoint template `{template}` has no mount segment")]
    MissingMountSegment { template: String },

    /// The template contains a `{}` placeholder with no name.
    #[error("endpoint template `{template}` contains a placeholder with no name")]
    EmptyPlaceholder { template: String },
}

/// Errors from extracting path parameters out of a concrete path.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The template could not be turned into a valid matcher. Reachable when
    /// a placeholder name is not a legal capture-group name (e.g. contains
    /// `-`) or when the same name appears twice.
    #[error("could not build matcher for endpoint template: {0}")]
    Compile(#[from] regex::Error),

    /// The concrete path does not have the shape the template describes.
    #[error("could not parse `{path}` into `{endpoint}`")]
    Mismatch { path: String, endpoint: String },
}

/// Errors from reading configured field values at the path boundary.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// A field referenced by a path placeholder holds a non-string value.
    /// Path parameters must be strings.
    #[error("field `{field}` must be a string to appear in a path, got {actual}")]
    NotAString { field: String, actual: &'static str },
}

//! Endpoint path templating for the Vault HTTP API.
//!
//! Vault endpoints are described by canonical path shapes like
//! `/transform/role/{name}`. This crate parses such a shape once into an
//! [`EndpointTemplate`] and uses that single value in both directions:
//! rendering the concrete request path from a user-chosen mount path plus the
//! configured field values, and extracting the parameter values back out of a
//! concrete path (the resource identifier). The mount-point segment is
//! special in both: rendering substitutes the user's mount path for it,
//! extraction captures it under the fixed name `path`.
//!
//! Everything here is pure and synchronous; no I/O, no shared state.

pub mod error;
pub mod fields;
pub mod template;
pub mod util;

pub use error::{ExtractError, FieldError, TemplateError};
pub use fields::{FieldMap, FieldReader};
pub use template::{EndpointTemplate, Segment};

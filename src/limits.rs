//! DoS prevention constants.
//!
//! These limits keep pathological documents from driving recursion or
//! allocation without bound.

/// Maximum nesting depth for widget tags. Deeper widget tags are passed
/// through as plain JSX.
pub const MAX_WIDGET_NESTING: usize = 32;

/// Maximum number of lines an ESM (`import`/`export`) statement may span.
pub const MAX_ESM_LINES: usize = 256;

/// Maximum brace depth inside a JSX expression (`{...}`).
pub const MAX_EXPRESSION_DEPTH: usize = 128;

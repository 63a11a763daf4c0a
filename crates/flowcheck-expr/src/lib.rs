//! Expression engine for flowcheck.
//!
//! Expected-result documents embed two kinds of expressions:
//!
//! - `${path.to.value}` -- replaced by the value found at that dotted path in a
//!   [`ValuesMap`]. Unresolved paths are left as literal text.
//! - `${~regex}` -- a wildcard. The fragment becomes a capturing group in a
//!   regular expression that the actual text must match in full.
//!
//! # Key Types
//!
//! - [`ValuesMap`] -- JSON-like values addressed by dotted paths
//! - [`substitute`] / [`substitute_with_fallback`] -- placeholder resolution
//! - [`WildcardPattern`] / [`WildcardOptions`] -- compiled `${~...}` matchers

pub mod error;
pub mod substitute;
pub mod values;
pub mod wildcard;

pub use error::{ExprError, ExprResult};
pub use substitute::{substitute, substitute_with_fallback, unresolved_paths};
pub use values::{get_path, render_value, ValuesMap};
pub use wildcard::{contains_wildcard, WildcardOptions, WildcardPattern, WILDCARD_MARKER};

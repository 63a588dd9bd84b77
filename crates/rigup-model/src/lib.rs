//! Typed records at the GPU-marketplace boundary.
//!
//! Marketplace responses cross into the rest of the toolkit through the
//! types in this crate: deserialization validates required fields up
//! front so a malformed listing fails fast with a schema error instead
//! of a missing-key panic deep inside a polling loop. Unknown wire
//! fields are ignored; unknown lifecycle states are preserved verbatim.

mod domain;
pub use domain::*;

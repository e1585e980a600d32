//! Provide the pure, shared vocabulary behind accessor resolution.
//!
//! This crate is intentionally small and dependency-free. It holds deterministic helpers that both the
//! resolution engine (`introspect`) and the build-time metadata generator (`introspect_derive`) use, so
//! accessor names computed at compile time and at lookup time can never drift apart.
//!
//! ## Notes
//!
//! - No IO, no global state, no descriptor types: only strings, identifiers and `const` tables.
//! - Current scope: naming-convention transforms ([`naming`]), accessor prefixes and kinds
//!   ([`conventions`]), and the abstract-collection binding table ([`capabilities`]).

pub mod capabilities;
pub mod conventions;
pub mod naming;

pub use capabilities::{Capability, DefaultImpl};
pub use conventions::AccessorKind;

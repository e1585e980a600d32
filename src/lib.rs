#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! Convention-based accessor resolution.
//!
//! Given an object and a logical property name (typically a database column name), `introspect` locates
//! the getter or setter implementing that property under the `get`/`is`/`set` naming convention, invokes
//! it, and reports the type metadata generic-aware callers such as ORM mappers need.
//!
//! Type metadata is generated at build time: `#[derive(Reflect)]` describes a struct and its fields,
//! `#[introspect]` on an inherent `impl` block describes its methods under their accessor names
//! (`fn get_first_name` is exposed as `getFirstName`).
//!
//! ## Panic Policy
//!
//! - **Library code**: `Result` or `Option` with `?` / `ok_or` / `map_err`; `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! use introspect::{Reflect, Value, introspect};
//!
//! #[derive(Debug, Default, Reflect)]
//! struct Person {
//!     first_name: String,
//! }
//!
//! #[introspect]
//! impl Person {
//!     pub fn get_first_name(&self) -> &str {
//!         &self.first_name
//!     }
//!
//!     pub fn set_first_name(&mut self, name: String) {
//!         self.first_name = name;
//!     }
//! }
//!
//! let mut person = Person::default();
//! introspect::set(&mut person, "firstName", Value::new(String::from("Ada"))).unwrap();
//! let name = introspect::get(&person, "firstName").unwrap();
//! assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("Ada"));
//! ```

// Generated code refers to `::introspect`, including inside this crate's own tests.
extern crate self as introspect;

pub mod collections;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod generics;
pub mod predicate;
pub mod types;
pub mod value;

pub use introspect_core::{capabilities, conventions, naming};
pub use introspect_core::{AccessorKind, Capability, DefaultImpl};
pub use introspect_derive::{Reflect, introspect};

pub use config::{MethodSource, ResolverConfig};
pub use descriptor::{DeclaredFields, FieldDescriptor, Introspect, Invoker, MethodDescriptor};
pub use engine::{
    Accessors, derive_name, find_accessor, find_accessor_matching, find_accessor_normalized, get,
    instantiate_or_default, property_names, set,
};
pub use errors::{AccessError, AccessorInvocationError, InvokeError};
pub use predicate::Predicate;
pub use types::{CollectionOf, ListOf, MapOf, Reflect, SetOf, TypeKind, TypeRef};
pub use value::Value;

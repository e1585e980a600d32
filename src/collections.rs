//! Collection type factory: concrete instantiation with an insertion-ordered default fallback.
//!
//! Abstract types cannot be constructed. When a type declares a collection capability, the binding table in
//! [`introspect_core::capabilities`] names an insertion-ordered default family, and the type's realizer turns
//! that family into a concrete [`TypeRef`] carrying the same type arguments.

use introspect_core::capabilities;

use crate::errors::AccessError;
use crate::types::TypeRef;
use crate::value::Value;

/// Construct `ty` directly through its zero-argument constructor.
///
/// ## Errors
/// - [`AccessError::NotConstructible`] for abstract types and types without a constructor.
pub fn new_instance(ty: &TypeRef) -> Result<Value, AccessError> {
    match ty.constructor() {
        Some(construct) if !ty.is_abstract() => Ok(construct()),
        _ => Err(AccessError::NotConstructible {
            type_name: ty.to_string(),
        }),
    }
}

/// Map a type to the insertion-ordered default implementation of its collection capability.
///
/// Capabilities are checked in the order Set, Sequence, Collection, Map.
///
/// ## Errors
/// - [`AccessError::UnsupportedCapability`] when no binding covers the type.
/// - [`AccessError::Unrealizable`] when a binding exists but the metadata has no realizer for it.
pub fn resolve_default_implementation(ty: &TypeRef) -> Result<TypeRef, AccessError> {
    let Some(default) = capabilities::default_for(&ty.capabilities()) else {
        return Err(AccessError::UnsupportedCapability {
            type_name: ty.to_string(),
        });
    };
    ty.realizer()
        .and_then(|realize| realize(default))
        .ok_or_else(|| AccessError::Unrealizable {
            type_name: ty.to_string(),
            default,
        })
}

/// Construct `ty`, falling back once to its default implementation when direct construction fails.
///
/// ## Errors
/// - Whatever [`resolve_default_implementation`] reports, or [`AccessError::NotConstructible`] when the
///   resolved default cannot be constructed either.
pub fn instantiate(ty: &TypeRef) -> Result<Value, AccessError> {
    match new_instance(ty) {
        Ok(value) => Ok(value),
        Err(direct) => {
            tracing::debug!(type_name = %ty, error = %direct, "direct construction failed, using default implementation");
            let fallback = resolve_default_implementation(ty)?;
            new_instance(&fallback)
        }
    }
}

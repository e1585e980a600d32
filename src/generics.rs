//! Type-argument extraction for generic-aware callers.
//!
//! ## Notes
//! - Return-type extraction is **strict**: a non-parameterized return type is an error.
//! - Parameter and field extraction are **lenient**: non-parameterized types yield nothing.

use crate::descriptor::{FieldDescriptor, MethodDescriptor};
use crate::errors::AccessError;
use crate::types::TypeRef;

/// Type arguments of a method's return type (`Vec<String>` yields `[String]`).
///
/// ## Errors
/// - [`AccessError::MalformedGenerics`] when the return type carries no type arguments.
pub fn return_type_arguments(method: &MethodDescriptor) -> Result<&[TypeRef], AccessError> {
    let return_type = method.return_type();
    if !return_type.is_parameterized() {
        return Err(AccessError::MalformedGenerics {
            method: method.name().to_string(),
            return_type: return_type.to_string(),
        });
    }
    Ok(return_type.args())
}

/// Type arguments of every parameterized parameter, in parameter order.
///
/// Non-parameterized parameters are skipped without a placeholder, so group `i` does not necessarily
/// belong to parameter `i`.
pub fn parameter_type_arguments(method: &MethodDescriptor) -> Vec<&[TypeRef]> {
    method
        .parameters()
        .iter()
        .filter(|p| p.is_parameterized())
        .map(TypeRef::args)
        .collect()
}

/// Type arguments of a field's declared type; empty when it is not parameterized.
pub fn field_type_arguments(field: &FieldDescriptor) -> &[TypeRef] {
    field.declared_type().args()
}

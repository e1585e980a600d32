//! Error taxonomy for accessor resolution, invocation and instantiation.
//!
//! - [`AccessError::NoMatchingAccessor`] is an expected outcome (optional properties) and stays distinct from
//!   invocation failures.
//! - [`InvokeError`] is what an invocation handle reports; the engine always wraps it into an
//!   [`AccessorInvocationError`] carrying the object, method, property and (for setters) value details.

use std::error::Error as StdError;
use std::fmt;

use introspect_core::capabilities::DefaultImpl;
use introspect_core::conventions::AccessorKind;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the accessor engine and the collection factory.
#[derive(Debug, Error, Diagnostic)]
pub enum AccessError {
    #[error("no {kind} matching property `{property}` on type `{type_name}`")]
    #[diagnostic(
        code(introspect::no_matching_accessor),
        help("accessors match on the name after their `get`/`is`/`set` prefix; only the first character of the property is case-normalized")
    )]
    NoMatchingAccessor {
        kind: AccessorKind,
        type_name: String,
        property: String,
    },

    #[error(transparent)]
    #[diagnostic(code(introspect::accessor_invocation))]
    Invocation(#[from] Box<AccessorInvocationError>),

    #[error("abstract type `{type_name}` has no default implementation")]
    #[diagnostic(
        code(introspect::unsupported_capability),
        help("only Set, Sequence, Collection and Map capabilities are bound to default implementations")
    )]
    UnsupportedCapability { type_name: String },

    #[error("type `{type_name}` binds to `{default}` but its metadata cannot realize it")]
    #[diagnostic(
        code(introspect::unrealizable),
        help("derive the metadata through `Reflect` so the type arguments are known at build time")
    )]
    Unrealizable { type_name: String, default: DefaultImpl },

    #[error("return type `{return_type}` of `{method}` is not parameterized")]
    #[diagnostic(code(introspect::malformed_generics))]
    MalformedGenerics { method: String, return_type: String },

    #[error("type `{type_name}` has no zero-argument constructor")]
    #[diagnostic(code(introspect::not_constructible))]
    NotConstructible { type_name: String },
}

impl AccessError {
    /// Whether this is the recoverable "no accessor found" outcome.
    pub fn is_no_matching_accessor(&self) -> bool {
        matches!(self, AccessError::NoMatchingAccessor { .. })
    }
}

impl From<AccessorInvocationError> for AccessError {
    fn from(err: AccessorInvocationError) -> Self {
        AccessError::Invocation(Box::new(err))
    }
}

/// Failure reported by an invocation handle.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("receiver is not a `{expected}`")]
    ReceiverMismatch { expected: &'static str },

    #[error("argument of type `{actual}` does not match parameter type `{expected}`")]
    ArgumentMismatch { expected: &'static str, actual: &'static str },

    #[error("`{method}` cannot be invoked as a {shape}")]
    UnsupportedShape { method: String, shape: &'static str },

    #[error("{0}")]
    Failed(#[source] Box<dyn StdError + Send + Sync>),
}

impl InvokeError {
    /// Wrap an error returned by the accessor itself.
    pub fn failed(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        InvokeError::Failed(err.into())
    }
}

/// A resolved accessor could not be invoked.
#[derive(Debug, Diagnostic)]
#[diagnostic(code(introspect::accessor_invocation))]
pub struct AccessorInvocationError {
    pub kind: AccessorKind,
    /// `Debug` rendering of the target object.
    pub object: String,
    pub method: String,
    pub property: String,
    /// `Debug` rendering of the supplied value (setters only).
    pub value: Option<String>,
    /// Runtime type of the supplied value, spelled like `expected_type` (setters only).
    pub value_type: Option<String>,
    /// Parameter type the setter declares (setters only).
    pub expected_type: Option<String>,
    pub cause: InvokeError,
}

impl AccessorInvocationError {
    pub(crate) fn getter(object: String, method: &str, property: &str, cause: InvokeError) -> Self {
        Self {
            kind: AccessorKind::Getter,
            object,
            method: method.to_string(),
            property: property.to_string(),
            value: None,
            value_type: None,
            expected_type: None,
            cause,
        }
    }

    pub(crate) fn setter(
        object: String,
        method: &str,
        property: &str,
        value: String,
        value_type: String,
        expected_type: Option<String>,
        cause: InvokeError,
    ) -> Self {
        Self {
            kind: AccessorKind::Setter,
            object,
            method: method.to_string(),
            property: property.to_string(),
            value: Some(value),
            value_type: Some(value_type),
            expected_type,
            cause,
        }
    }
}

impl fmt::Display for AccessorInvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.kind {
            AccessorKind::Getter => "get",
            AccessorKind::Setter => "set",
        };
        write!(
            f,
            "failed to {action} property `{}` via `{}` on {}",
            self.property, self.method, self.object
        )?;
        if let (Some(value), Some(value_type)) = (&self.value, &self.value_type) {
            write!(f, "; value: {value}, value type: `{value_type}`")?;
            if let Some(expected) = &self.expected_type {
                write!(f, ", expected type: `{expected}`")?;
            }
        }
        write!(f, ": {}", self.cause)
    }
}

impl StdError for AccessorInvocationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}

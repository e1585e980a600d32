//! Method and field descriptors: the metadata provider the engine consumes.
//!
//! The `Introspect` trait plays the role of a runtime's reflective method listing. Its implementations are
//! generated at build time by the `#[introspect]` attribute (or written by hand), so resolution works on
//! precomputed metadata instead of live structural reflection.
//!
//! # Examples
//!
//! ```
//! use introspect::{introspect, Introspect, Reflect};
//!
//! #[derive(Debug, Default, Reflect)]
//! struct Person {
//!     name: String,
//! }
//!
//! #[introspect]
//! impl Person {
//!     pub fn get_name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     pub fn set_name(&mut self, name: String) {
//!         self.name = name;
//!     }
//! }
//!
//! let names: Vec<String> = Person::declared_methods().iter().map(|m| m.name().to_string()).collect();
//! assert_eq!(names, ["getName", "setName"]);
//! ```

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;

use introspect_core::conventions::{BASE_CLASS_METHOD, BASE_TO_STRING_METHOD};

use crate::errors::InvokeError;
use crate::types::{Reflect, TypeRef};
use crate::value::Value;

/// Invocation handle of a zero-argument operation on a shared receiver.
pub type ReadFn = fn(&dyn Any) -> Result<Value, InvokeError>;

/// Invocation handle of a one-argument operation on an exclusive receiver.
pub type WriteFn = fn(&mut dyn Any, Value) -> Result<(), InvokeError>;

/// How a described operation can be invoked.
#[derive(Clone, Copy)]
pub enum Invoker {
    Read(ReadFn),
    Write(WriteFn),
    /// Described for matching purposes only (e.g. multi-argument operations).
    Unsupported,
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Invoker::Read(_) => "Read",
            Invoker::Write(_) => "Write",
            Invoker::Unsupported => "Unsupported",
        })
    }
}

/// Read-only view of one exposed operation.
#[derive(Clone)]
pub struct MethodDescriptor {
    name: Cow<'static, str>,
    parameters: Vec<TypeRef>,
    return_type: TypeRef,
    declaring_type: TypeRef,
    invoker: Invoker,
}

impl MethodDescriptor {
    /// Describe an operation with no parameters, a unit return type and no invocation handle.
    pub fn new(name: impl Into<Cow<'static, str>>, declaring_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: TypeRef::unit(),
            declaring_type,
            invoker: Invoker::Unsupported,
        }
    }

    pub fn with_parameter(mut self, ty: TypeRef) -> Self {
        self.parameters.push(ty);
        self
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    pub fn with_invoker(mut self, invoker: Invoker) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }

    pub fn invoker(&self) -> Invoker {
        self.invoker
    }

    pub fn is_declared_on_base_object(&self) -> bool {
        self.declaring_type.is_base_object()
    }

    /// Invoke a zero-argument operation.
    pub fn invoke_read(&self, target: &dyn Any) -> Result<Value, InvokeError> {
        match self.invoker {
            Invoker::Read(read) => read(target),
            Invoker::Write(_) | Invoker::Unsupported => Err(self.unsupported("getter")),
        }
    }

    /// Invoke a one-argument operation.
    pub fn invoke_write(&self, target: &mut dyn Any, value: Value) -> Result<(), InvokeError> {
        match self.invoker {
            Invoker::Write(write) => write(target, value),
            Invoker::Read(_) | Invoker::Unsupported => Err(self.unsupported("setter")),
        }
    }

    fn unsupported(&self, shape: &'static str) -> InvokeError {
        InvokeError::UnsupportedShape {
            method: self.name.to_string(),
            shape,
        }
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.declaring_type, self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("signature", &format_args!("{self}"))
            .field("invoker", &self.invoker)
            .finish()
    }
}

/// Read-only view of one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    declared_type: TypeRef,
    declaring_type: TypeRef,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, declared_type: TypeRef, declaring_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            declaring_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    pub fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }
}

/// Provide the operations a type exposes.
///
/// Typically generated with `#[introspect]` on an inherent `impl` block.
pub trait Introspect: Reflect + fmt::Debug {
    /// Operations declared directly on this type, in declaration order.
    fn declared_methods() -> Vec<MethodDescriptor>;

    /// Every exposed operation: the declared ones followed by the base-object ones.
    fn methods() -> Vec<MethodDescriptor>
    where
        Self: Sized,
    {
        let mut methods = Self::declared_methods();
        methods.extend(base_object_methods::<Self>());
        methods
    }
}

/// Provide the fields a type declares. Generated by `#[derive(Reflect)]` on structs.
pub trait DeclaredFields: Reflect {
    fn declared_fields() -> Vec<FieldDescriptor>;
}

/// Operations every introspected type inherits from the base object type.
///
/// They are part of the exposed method set but never match an accessor lookup.
pub fn base_object_methods<T: Reflect + fmt::Debug>() -> Vec<MethodDescriptor> {
    vec![
        MethodDescriptor::new(BASE_CLASS_METHOD, TypeRef::base_object())
            .returning(TypeRef::of::<String>())
            .with_invoker(Invoker::Read(read_class_name::<T>)),
        MethodDescriptor::new(BASE_TO_STRING_METHOD, TypeRef::base_object())
            .returning(TypeRef::of::<String>())
            .with_invoker(Invoker::Read(read_debug_string::<T>)),
    ]
}

fn read_class_name<T: Reflect>(_: &dyn Any) -> Result<Value, InvokeError> {
    Ok(Value::new(T::type_ref().name().to_string()))
}

fn read_debug_string<T: Reflect + fmt::Debug>(target: &dyn Any) -> Result<Value, InvokeError> {
    let this = receiver::<T>(target)?;
    Ok(Value::new(format!("{this:?}")))
}

/// Borrow the receiver of an invocation as a `T`.
pub fn receiver<T: Any>(target: &dyn Any) -> Result<&T, InvokeError> {
    target
        .downcast_ref::<T>()
        .ok_or(InvokeError::ReceiverMismatch { expected: type_name::<T>() })
}

/// Mutably borrow the receiver of an invocation as a `T`.
pub fn receiver_mut<T: Any>(target: &mut dyn Any) -> Result<&mut T, InvokeError> {
    target
        .downcast_mut::<T>()
        .ok_or(InvokeError::ReceiverMismatch { expected: type_name::<T>() })
}

/// Take an invocation argument as a `T`.
pub fn argument<T: Any>(value: Value) -> Result<T, InvokeError> {
    value.downcast::<T>().map_err(|rejected| InvokeError::ArgumentMismatch {
        expected: type_name::<T>(),
        actual: rejected.type_name(),
    })
}

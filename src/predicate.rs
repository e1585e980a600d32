//! Composable capability predicates over method metadata.
//!
//! A [`Predicate`] is a small tagged tree evaluated by [`Predicate::test`]. Leaves classify a
//! [`MethodDescriptor`]; `And`/`Or`/`Not` compose them. Every leaf rejects methods declared on the base
//! object type before running its own test, so `getClass`-style operations never match.

use std::fmt;
use std::ops::Not;
use std::sync::Arc;

use introspect_core::conventions::{AccessorKind, BOOLEAN_PREFIX, GETTER_PREFIX, SETTER_PREFIX};

use crate::descriptor::MethodDescriptor;
use crate::types::TypeRef;

type CustomTest = Arc<dyn Fn(&MethodDescriptor) -> bool + Send + Sync>;

/// A boolean test over a [`MethodDescriptor`].
///
/// ## Examples
/// ```rust
/// use introspect::{MethodDescriptor, Predicate, TypeRef};
///
/// let get_name = MethodDescriptor::new("getName", TypeRef::concrete("app::Person"))
///     .returning(TypeRef::of::<String>());
///
/// let string_getter = Predicate::IsGetter.and(Predicate::has_return_type(TypeRef::of::<String>()));
/// assert!(string_getter.test(&get_name));
/// assert!(!(!string_getter).test(&get_name));
/// ```
#[derive(Clone)]
pub enum Predicate {
    /// Zero parameters, non-unit return, named `get…` (or `is…` when returning `bool`).
    IsGetter,
    /// One parameter, unit return, named `set…` or `is…`.
    IsSetter,
    /// Exactly one parameter whose type (or first type argument, when `generic`) is assignable to `ty`.
    HasParameterType { ty: TypeRef, generic: bool },
    /// Return type assignable to the given type.
    HasReturnType(TypeRef),
    Custom(CustomTest),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// The accessor-kind leaf: [`Predicate::IsGetter`] or [`Predicate::IsSetter`].
    pub fn for_kind(kind: AccessorKind) -> Self {
        match kind {
            AccessorKind::Getter => Predicate::IsGetter,
            AccessorKind::Setter => Predicate::IsSetter,
        }
    }

    /// A caller-defined leaf. Base-object methods are still excluded before `test` runs.
    pub fn custom(test: impl Fn(&MethodDescriptor) -> bool + Send + Sync + 'static) -> Self {
        Predicate::Custom(Arc::new(test))
    }

    pub fn has_parameter_type(ty: TypeRef) -> Self {
        Predicate::HasParameterType { ty, generic: false }
    }

    /// Match single-parameter methods whose parameter's first type argument is assignable to `ty`.
    pub fn has_generic_parameter_type(ty: TypeRef) -> Self {
        Predicate::HasParameterType { ty, generic: true }
    }

    pub fn has_return_type(ty: TypeRef) -> Self {
        Predicate::HasReturnType(ty)
    }

    /// Both must hold. `other` is not evaluated when `self` fails.
    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Either must hold. `other` is not evaluated when `self` holds.
    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Evaluate against one method.
    pub fn test(&self, method: &MethodDescriptor) -> bool {
        match self {
            Predicate::And(left, right) => left.test(method) && right.test(method),
            Predicate::Or(left, right) => left.test(method) || right.test(method),
            Predicate::Not(inner) => !inner.test(method),
            leaf => !method.is_declared_on_base_object() && leaf.test_leaf(method),
        }
    }

    fn test_leaf(&self, method: &MethodDescriptor) -> bool {
        match self {
            Predicate::IsGetter => is_getter(method),
            Predicate::IsSetter => is_setter(method),
            Predicate::HasParameterType { ty, generic } => has_parameter_type(method, ty, *generic),
            Predicate::HasReturnType(ty) => method.return_type().is_assignable_to(ty),
            Predicate::Custom(test) => test(method),
            Predicate::And(..) | Predicate::Or(..) | Predicate::Not(..) => self.test(method),
        }
    }
}

fn is_getter(method: &MethodDescriptor) -> bool {
    let name = method.name();
    let return_type = method.return_type();
    method.parameter_count() == 0
        && !return_type.is_unit()
        && (name.starts_with(GETTER_PREFIX) || (name.starts_with(BOOLEAN_PREFIX) && return_type.is_boolean()))
}

fn is_setter(method: &MethodDescriptor) -> bool {
    let name = method.name();
    method.parameter_count() == 1
        && method.return_type().is_unit()
        && (name.starts_with(SETTER_PREFIX) || name.starts_with(BOOLEAN_PREFIX))
}

fn has_parameter_type(method: &MethodDescriptor, ty: &TypeRef, generic: bool) -> bool {
    let [parameter] = method.parameters() else {
        return false;
    };
    if !generic {
        return parameter.is_assignable_to(ty);
    }
    // First type argument of the first parameterized parameter.
    method
        .parameters()
        .iter()
        .find(|p| p.is_parameterized())
        .and_then(|p| p.args().first())
        .is_some_and(|arg| arg.is_assignable_to(ty))
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::IsGetter => f.write_str("IsGetter"),
            Predicate::IsSetter => f.write_str("IsSetter"),
            Predicate::HasParameterType { ty, generic } => f
                .debug_struct("HasParameterType")
                .field("ty", &format_args!("{ty}"))
                .field("generic", generic)
                .finish(),
            Predicate::HasReturnType(ty) => write!(f, "HasReturnType({ty})"),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
            Predicate::And(left, right) => f.debug_tuple("And").field(left).field(right).finish(),
            Predicate::Or(left, right) => f.debug_tuple("Or").field(left).field(right).finish(),
            Predicate::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

impl From<AccessorKind> for Predicate {
    fn from(kind: AccessorKind) -> Self {
        Predicate::for_kind(kind)
    }
}

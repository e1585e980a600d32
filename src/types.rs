//! Runtime type metadata.
//!
//! A [`TypeRef`] is the engine's view of a type: what it is called, whether it is concrete or abstract,
//! which collection capabilities it promises, its type arguments, and (when available) how to construct
//! it. Type metadata is produced at build time through the [`Reflect`] trait, implemented here for the
//! standard scalar and collection types and generated for user types by `#[derive(Reflect)]`.
//!
//! ## Notes
//! - **Identity** is the raw type path with type arguments erased (`alloc::vec::Vec`), so `Vec<i32>` and
//!   `Vec<String>` are the same raw type. Type arguments are only consulted by the generic introspector.
//! - **Abstract types** have no constructor. They are either interface-like markers ([`SetOf`], [`ListOf`],
//!   [`CollectionOf`], [`MapOf`]) or hand-built with [`TypeRef::abstract_type`].

use std::any::type_name;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};
use introspect_core::capabilities::{Capability, DefaultImpl};
use introspect_core::conventions::BASE_OBJECT_TYPE_NAME;

use crate::value::Value;

/// Zero-argument constructor handle.
pub type Constructor = fn() -> Value;

/// Build-time monomorphized hook that realizes a default implementation family with this type's
/// type arguments (e.g. `InsertionOrderedSet` for `SetOf<String>` yields `IndexSet<String>`).
pub type Realizer = fn(DefaultImpl) -> Option<TypeRef>;

/// Classify a [`TypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// The empty return type (`()`).
    Unit,
    /// The universal base object type every introspected type inherits operations from.
    BaseObject,
    /// A type that can have instances.
    Concrete,
    /// An interface-like type; instances only exist through a concrete type.
    Abstract,
}

/// Describe a type at runtime.
#[derive(Clone)]
pub struct TypeRef {
    path: &'static str,
    kind: TypeKind,
    capabilities: &'static [Capability],
    args: Vec<TypeRef>,
    constructor: Option<Constructor>,
    realizer: Option<Realizer>,
}

impl TypeRef {
    fn with_kind(path: &'static str, kind: TypeKind) -> Self {
        Self {
            path,
            kind,
            capabilities: &[],
            args: Vec::new(),
            constructor: None,
            realizer: None,
        }
    }

    /// The unit type, returned by setters.
    pub fn unit() -> Self {
        Self::with_kind("()", TypeKind::Unit)
    }

    /// The universal base object type.
    pub fn base_object() -> Self {
        Self::with_kind(BASE_OBJECT_TYPE_NAME, TypeKind::BaseObject)
    }

    /// A concrete type identified by its raw path.
    pub fn concrete(path: &'static str) -> Self {
        Self::with_kind(path, TypeKind::Concrete)
    }

    /// An abstract (interface-like) type identified by its raw path.
    pub fn abstract_type(path: &'static str) -> Self {
        Self::with_kind(path, TypeKind::Abstract)
    }

    /// The metadata of `T`.
    pub fn of<T: Reflect + ?Sized>() -> Self {
        T::type_ref()
    }

    pub fn with_capabilities(mut self, capabilities: &'static [Capability]) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_arg(mut self, arg: TypeRef) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = TypeRef>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn with_realizer(mut self, realizer: Realizer) -> Self {
        self.realizer = Some(realizer);
        self
    }

    /// Raw path, type arguments erased (`alloc::vec::Vec`).
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Short name: the last path segment (`Vec`).
    pub fn name(&self) -> &'static str {
        match self.path.rfind("::") {
            Some(i) => &self.path[i + 2..],
            None => self.path,
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Type arguments, in declaration order. Empty for non-parameterized types.
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.kind == TypeKind::Unit
    }

    pub fn is_base_object(&self) -> bool {
        self.kind == TypeKind::BaseObject
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == TypeKind::Abstract
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == TypeKind::Concrete && self.path == "bool"
    }

    /// Capabilities as declared, without implied ones.
    pub fn declared_capabilities(&self) -> &'static [Capability] {
        self.capabilities
    }

    /// Declared capabilities plus everything they imply (`Set` implies `Collection`).
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut out: Vec<Capability> = Vec::with_capacity(self.capabilities.len() * 2);
        for &capability in self.capabilities {
            for &c in std::iter::once(&capability).chain(capability.implied()) {
                if !out.contains(&c) {
                    out.push(c);
                }
            }
        }
        out
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .iter()
            .any(|&c| c == capability || c.implied().contains(&capability))
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    pub fn realizer(&self) -> Option<Realizer> {
        self.realizer
    }

    /// Check whether a value of this type can be used where `target` is expected.
    ///
    /// ## Notes
    /// - Every non-unit type is assignable to the base object type; unit only to unit.
    /// - Concrete targets compare raw paths (type arguments erased).
    /// - Abstract targets accept the same raw path, or any type carrying every capability the target
    ///   declares. An abstract target without capabilities only accepts itself.
    pub fn is_assignable_to(&self, target: &TypeRef) -> bool {
        match target.kind {
            TypeKind::BaseObject => !self.is_unit(),
            TypeKind::Unit => self.is_unit(),
            TypeKind::Concrete => self.kind == TypeKind::Concrete && self.path == target.path,
            TypeKind::Abstract => {
                if self.path == target.path {
                    return true;
                }
                !target.capabilities.is_empty() && target.capabilities.iter().all(|&c| self.has_capability(c))
            }
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.kind == other.kind
            && self.capabilities == other.capabilities
            && self.args == other.args
    }
}

impl Eq for TypeRef {}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("capabilities", &self.capabilities)
            .field("args", &self.args)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/// Return the raw path of `T`, with type arguments erased.
///
/// ## Examples
/// ```rust
/// use introspect::types::raw_type_path;
///
/// assert_eq!(raw_type_path::<Vec<u8>>(), "alloc::vec::Vec");
/// assert_eq!(raw_type_path::<bool>(), "bool");
/// ```
pub fn raw_type_path<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    match full.find('<') {
        Some(i) => &full[..i],
        None => full,
    }
}

/// Shorten every path inside a `std::any::type_name` rendering to its last segment, the way
/// [`TypeRef`]'s `Display` does.
///
/// ## Examples
/// ```rust
/// use introspect::types::short_type_name;
///
/// assert_eq!(short_type_name("alloc::vec::Vec<alloc::string::String>"), "Vec<String>");
/// assert_eq!(short_type_name("&str"), "&str");
/// ```
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut rest = full;
    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("::") {
            out.truncate(segment_start);
            rest = tail;
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Construct `T::default()` as a [`Value`]. Used as the [`Constructor`] of `Default` types.
pub fn construct_default<T: Default + fmt::Debug + 'static>() -> Value {
    Value::new(T::default())
}

/// Provide build-time metadata for a type.
///
/// Implemented for the standard scalar and collection types; derive it for your own types with
/// `#[derive(Reflect)]`.
pub trait Reflect: 'static {
    fn type_ref() -> TypeRef;
}

impl Reflect for () {
    fn type_ref() -> TypeRef {
        TypeRef::unit()
    }
}

macro_rules! reflect_scalars {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::concrete(raw_type_path::<$ty>()).with_constructor(construct_default::<$ty>)
                }
            }
        )*
    };
}

reflect_scalars!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String, &'static str,
);

impl<T: Reflect + fmt::Debug> Reflect for Option<T> {
    fn type_ref() -> TypeRef {
        TypeRef::concrete(raw_type_path::<Self>())
            .with_arg(T::type_ref())
            .with_constructor(construct_default::<Self>)
    }
}

fn realize_elements<T: Reflect + fmt::Debug>(default: DefaultImpl) -> Option<TypeRef> {
    match default {
        DefaultImpl::InsertionOrderedSet => Some(IndexSet::<T>::type_ref()),
        DefaultImpl::InsertionOrderedSequence => Some(Vec::<T>::type_ref()),
        DefaultImpl::InsertionOrderedMap => None,
    }
}

fn realize_entries<K: Reflect + fmt::Debug, V: Reflect + fmt::Debug>(default: DefaultImpl) -> Option<TypeRef> {
    match default {
        DefaultImpl::InsertionOrderedMap => Some(IndexMap::<K, V>::type_ref()),
        DefaultImpl::InsertionOrderedSet | DefaultImpl::InsertionOrderedSequence => None,
    }
}

macro_rules! reflect_element_collections {
    ($($coll:ident => $caps:expr),* $(,)?) => {
        $(
            impl<T: Reflect + fmt::Debug> Reflect for $coll<T> {
                fn type_ref() -> TypeRef {
                    TypeRef::concrete(raw_type_path::<Self>())
                        .with_capabilities($caps)
                        .with_arg(T::type_ref())
                        .with_constructor(construct_default::<Self>)
                        .with_realizer(realize_elements::<T>)
                }
            }
        )*
    };
}

reflect_element_collections!(
    Vec => &[Capability::Sequence],
    VecDeque => &[Capability::Sequence],
    HashSet => &[Capability::Set],
    BTreeSet => &[Capability::Set],
    IndexSet => &[Capability::Set],
);

macro_rules! reflect_entry_collections {
    ($($coll:ident),* $(,)?) => {
        $(
            impl<K: Reflect + fmt::Debug, V: Reflect + fmt::Debug> Reflect for $coll<K, V> {
                fn type_ref() -> TypeRef {
                    TypeRef::concrete(raw_type_path::<Self>())
                        .with_capabilities(&[Capability::Map])
                        .with_args([K::type_ref(), V::type_ref()])
                        .with_constructor(construct_default::<Self>)
                        .with_realizer(realize_entries::<K, V>)
                }
            }
        )*
    };
}

reflect_entry_collections!(HashMap, BTreeMap, IndexMap);

/// Abstract group of `T` elements; binds to `Vec<T>`.
pub struct CollectionOf<T>(PhantomData<fn() -> T>);

/// Abstract set of unique `T` elements; binds to `IndexSet<T>`.
pub struct SetOf<T>(PhantomData<fn() -> T>);

/// Abstract ordered, indexable sequence of `T`; binds to `Vec<T>`.
pub struct ListOf<T>(PhantomData<fn() -> T>);

/// Abstract mapping from `K` to `V`; binds to `IndexMap<K, V>`.
pub struct MapOf<K, V>(PhantomData<fn() -> (K, V)>);

macro_rules! reflect_abstract_elements {
    ($($marker:ident => $caps:expr),* $(,)?) => {
        $(
            impl<T: Reflect + fmt::Debug> Reflect for $marker<T> {
                fn type_ref() -> TypeRef {
                    TypeRef::abstract_type(raw_type_path::<Self>())
                        .with_capabilities($caps)
                        .with_arg(T::type_ref())
                        .with_realizer(realize_elements::<T>)
                }
            }
        )*
    };
}

reflect_abstract_elements!(
    CollectionOf => &[Capability::Collection],
    SetOf => &[Capability::Set],
    ListOf => &[Capability::Sequence],
);

impl<K: Reflect + fmt::Debug, V: Reflect + fmt::Debug> Reflect for MapOf<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::abstract_type(raw_type_path::<Self>())
            .with_capabilities(&[Capability::Map])
            .with_args([K::type_ref(), V::type_ref()])
            .with_realizer(realize_entries::<K, V>)
    }
}

//! Abstract collection capability vocabulary and its default-implementation binding table.
//!
//! An abstract container type (an interface-like type with no constructor of its own) is described by
//! the capabilities it promises: a set, an ordered sequence, a generic collection or a key-to-value map.
//! [`COLLECTION_BINDINGS`] maps each capability to the single concrete default honoring it.
//!
//! ## Notes
//! - Every default is **insertion-ordered**, so values synthesized from an abstract type iterate in the
//!   order they were populated.
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Binding order matters: [`default_for`] walks the table top to bottom, so a type that is both a
//!   `Set` and a `Collection` binds to the set default.
//!
//! ## Examples
//! ```rust
//! use introspect_core::capabilities::{self, Capability, DefaultImpl};
//!
//! assert_eq!(capabilities::from_str("Set"), Some(Capability::Set));
//! assert_eq!(capabilities::default_for(&[Capability::Map]), Some(DefaultImpl::InsertionOrderedMap));
//! assert_eq!(capabilities::default_for(&[]), None);
//! ```

/// Stable identifier for an abstract container capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Any group of elements.
    Collection,
    /// Unique elements.
    Set,
    /// Indexable, ordered elements.
    Sequence,
    /// Unique keys mapped to values.
    Map,
}

impl Capability {
    /// Return the capabilities this one implies (`Set` and `Sequence` are both collections).
    pub fn implied(self) -> &'static [Capability] {
        match self {
            Capability::Set | Capability::Sequence => &[Capability::Collection],
            Capability::Collection | Capability::Map => &[],
        }
    }
}

/// Identify the concrete default implementation family a capability binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultImpl {
    /// `indexmap::IndexSet`
    InsertionOrderedSet,
    /// `Vec`
    InsertionOrderedSequence,
    /// `indexmap::IndexMap`
    InsertionOrderedMap,
}

impl DefaultImpl {
    /// Return the short type name of the concrete default.
    pub fn type_name(self) -> &'static str {
        match self {
            DefaultImpl::InsertionOrderedSet => "IndexSet",
            DefaultImpl::InsertionOrderedSequence => "Vec",
            DefaultImpl::InsertionOrderedMap => "IndexMap",
        }
    }
}

impl core::fmt::Display for DefaultImpl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One row of the binding table.
#[derive(Debug, Clone, Copy)]
pub struct CollectionBinding {
    pub capability: Capability,
    pub canonical: &'static str,
    pub default: DefaultImpl,
    pub description: &'static str,
}

/// Binding table from abstract capability to concrete default, in lookup order.
pub const COLLECTION_BINDINGS: &[CollectionBinding] = &[
    binding(
        Capability::Set,
        "Set",
        DefaultImpl::InsertionOrderedSet,
        "Unique elements, iterated in insertion order.",
    ),
    binding(
        Capability::Sequence,
        "Sequence",
        DefaultImpl::InsertionOrderedSequence,
        "Indexable elements, iterated in insertion order.",
    ),
    binding(
        Capability::Collection,
        "Collection",
        DefaultImpl::InsertionOrderedSequence,
        "Any collection without a more specific capability falls back to a sequence.",
    ),
    binding(
        Capability::Map,
        "Map",
        DefaultImpl::InsertionOrderedMap,
        "Unique keys, iterated in insertion order.",
    ),
];

/// Resolve a capability spelling to a [`Capability`].
pub fn from_str(name: &str) -> Option<Capability> {
    COLLECTION_BINDINGS.iter().find(|b| b.canonical == name).map(|b| b.capability)
}

/// Return the canonical spelling of a capability.
pub fn as_str(capability: Capability) -> &'static str {
    match binding_for(capability) {
        Some(b) => b.canonical,
        None => "?",
    }
}

/// Return the binding row of a capability.
pub fn binding_for(capability: Capability) -> Option<&'static CollectionBinding> {
    COLLECTION_BINDINGS.iter().find(|b| b.capability == capability)
}

/// Choose the default implementation for a type declaring `capabilities`.
///
/// ## Parameters
/// - `capabilities`: the capability set of the abstract type, including implied capabilities.
///
/// ## Returns
/// - `Some(DefaultImpl)`: the first binding (in table order) whose capability is declared.
/// - `None`: no binding covers the type.
pub fn default_for(capabilities: &[Capability]) -> Option<DefaultImpl> {
    COLLECTION_BINDINGS
        .iter()
        .find(|b| capabilities.contains(&b.capability))
        .map(|b| b.default)
}

const fn binding(
    capability: Capability,
    canonical: &'static str,
    default: DefaultImpl,
    description: &'static str,
) -> CollectionBinding {
    CollectionBinding {
        capability,
        canonical,
        default,
        description,
    }
}

//! Accessor naming conventions (well-known prefixes and identifiers).

use crate::naming;

/// Prefix of a getter: `getName`.
pub const GETTER_PREFIX: &str = "get";

/// Prefix of a boolean getter: `isAlive`. Also accepted on setters.
pub const BOOLEAN_PREFIX: &str = "is";

/// Prefix of a setter: `setName`.
pub const SETTER_PREFIX: &str = "set";

/// Name of the universal base object type every introspected type inherits operations from.
pub const BASE_OBJECT_TYPE_NAME: &str = "Object";

/// Base-object operation returning the runtime type name.
pub const BASE_CLASS_METHOD: &str = "getClass";

/// Base-object operation returning the debug rendering of the receiver.
pub const BASE_TO_STRING_METHOD: &str = "toString";

/// Distinguish the two accessor kinds the engine resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    /// Return the lower-case spelling used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessorKind::Getter => "getter",
            AccessorKind::Setter => "setter",
        }
    }

    /// Return the prefixes a method name of this kind may start with, in matching order.
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            AccessorKind::Getter => &[GETTER_PREFIX, BOOLEAN_PREFIX],
            AccessorKind::Setter => &[SETTER_PREFIX, BOOLEAN_PREFIX],
        }
    }
}

impl core::fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the accessor prefix `method_name` starts with for `kind`, if any.
///
/// ## Examples
/// ```rust
/// use introspect_core::conventions::{accessor_prefix, AccessorKind};
///
/// assert_eq!(accessor_prefix(AccessorKind::Getter, "isAlive"), Some("is"));
/// assert_eq!(accessor_prefix(AccessorKind::Setter, "setName"), Some("set"));
/// assert_eq!(accessor_prefix(AccessorKind::Getter, "setName"), None);
/// ```
pub fn accessor_prefix(kind: AccessorKind, method_name: &str) -> Option<&'static str> {
    kind.prefixes().iter().copied().find(|p| method_name.starts_with(p))
}

/// Reconstruct the logical property name from an accessor method name.
///
/// The prefix is stripped and the first remaining character lower-cased: `getFirstName` yields
/// `firstName`, `isAlive` yields `alive`.
///
/// ## Returns
/// - `None` if `method_name` carries no prefix of `kind`, or nothing remains after it.
pub fn property_name(kind: AccessorKind, method_name: &str) -> Option<String> {
    let prefix = accessor_prefix(kind, method_name)?;
    let rest = &method_name[prefix.len()..];
    if rest.is_empty() {
        return None;
    }
    Some(naming::uncapitalize(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getter_prefixes_prefer_get_over_is() {
        assert_eq!(AccessorKind::Getter.prefixes(), &["get", "is"]);
        assert_eq!(AccessorKind::Setter.prefixes(), &["set", "is"]);
    }

    #[test]
    fn property_name_strips_the_matching_prefix() {
        assert_eq!(property_name(AccessorKind::Getter, "getFirstName").as_deref(), Some("firstName"));
        assert_eq!(property_name(AccessorKind::Getter, "isAlive").as_deref(), Some("alive"));
        assert_eq!(property_name(AccessorKind::Setter, "isAlive").as_deref(), Some("alive"));
        assert_eq!(property_name(AccessorKind::Setter, "setURL").as_deref(), Some("uRL"));
    }

    #[test]
    fn property_name_rejects_bare_prefixes_and_foreign_names() {
        assert_eq!(property_name(AccessorKind::Getter, "get"), None);
        assert_eq!(property_name(AccessorKind::Getter, "toString"), None);
        assert_eq!(property_name(AccessorKind::Setter, "getName"), None);
    }

    #[test]
    fn kinds_display_in_lower_case() {
        assert_eq!(AccessorKind::Getter.to_string(), "getter");
        assert_eq!(AccessorKind::Setter.to_string(), "setter");
    }
}

//! Accessor resolution: locate the getter or setter implementing a logical property and invoke it.
//!
//! A property name matches an accessor when, after upper-casing the property's first character, it equals
//! the accessor name's suffix from its first upper-case character: `alive` matches `isAlive`, `firstName`
//! matches `getFirstName`. The rest of the name is compared verbatim.
//!
//! ## Notes
//! - The first match in method-set order wins; duplicates are not detected.
//! - A missing accessor is `None` from the `find_*` functions and [`AccessError::NoMatchingAccessor`] from
//!   `get`/`set`. Failures while invoking a resolved accessor are always wrapped into an
//!   [`AccessorInvocationError`].
//! - Nothing is cached: every call scans a freshly produced method set.

use std::any::type_name;
use std::fmt;

use introspect_core::conventions::{self, AccessorKind};
use introspect_core::naming;

use crate::collections;
use crate::config::{MethodSource, ResolverConfig};
use crate::descriptor::{Introspect, MethodDescriptor};
use crate::errors::{AccessError, AccessorInvocationError};
use crate::predicate::Predicate;
use crate::types::{Reflect, TypeRef, short_type_name};
use crate::value::Value;

/// Find the accessor of `kind` implementing `property`.
///
/// ## Examples
/// ```rust
/// use introspect::{AccessorKind, MethodDescriptor, TypeRef, find_accessor};
///
/// let person = TypeRef::concrete("app::Person");
/// let methods = [MethodDescriptor::new("isAlive", person).returning(TypeRef::of::<bool>())];
///
/// let found = find_accessor(AccessorKind::Getter, &methods, "alive");
/// assert_eq!(found.map(|m| m.name()), Some("isAlive"));
/// assert!(find_accessor(AccessorKind::Getter, &methods, "nonexistent").is_none());
/// ```
pub fn find_accessor<'m>(
    kind: AccessorKind,
    methods: &'m [MethodDescriptor],
    property: &str,
) -> Option<&'m MethodDescriptor> {
    find_accessor_matching(&Predicate::for_kind(kind), methods, property)
}

/// Find the first method passing `predicate` whose accessor suffix matches `property`.
pub fn find_accessor_matching<'m>(
    predicate: &Predicate,
    methods: &'m [MethodDescriptor],
    property: &str,
) -> Option<&'m MethodDescriptor> {
    let wanted = naming::capitalize(property);
    methods.iter().find(|method| {
        if method.is_declared_on_base_object() || !predicate.test(method) {
            tracing::trace!(method = method.name(), "skipped: not a candidate");
            return false;
        }
        match naming::accessor_suffix(method.name()) {
            Some(suffix) => suffix == wanted,
            None => {
                tracing::trace!(method = method.name(), "skipped: no upper-case suffix");
                false
            }
        }
    })
}

/// Like [`find_accessor`], after removing every `_` from `property` (`first_name` becomes `firstname`).
pub fn find_accessor_normalized<'m>(
    kind: AccessorKind,
    methods: &'m [MethodDescriptor],
    property: &str,
) -> Option<&'m MethodDescriptor> {
    Accessors::new().find_accessor_normalized(kind, methods, property)
}

/// Reconstruct the property name an accessor implements, or `fallback` when `method` is not an accessor of
/// `kind` (or is declared on the base object type).
///
/// ## Examples
/// ```rust
/// use introspect::{AccessorKind, MethodDescriptor, TypeRef, derive_name};
///
/// let person = TypeRef::concrete("app::Person");
/// let getter = MethodDescriptor::new("getFirstName", person).returning(TypeRef::of::<String>());
///
/// assert_eq!(derive_name(AccessorKind::Getter, &getter, "?"), "firstName");
/// assert_eq!(derive_name(AccessorKind::Setter, &getter, "?"), "?");
/// ```
pub fn derive_name(kind: AccessorKind, method: &MethodDescriptor, fallback: &str) -> String {
    accessor_property(kind, method).unwrap_or_else(|| fallback.to_string())
}

/// Property names of every accessor of `kind` in `methods`, in method-set order.
pub fn property_names(kind: AccessorKind, methods: &[MethodDescriptor]) -> Vec<String> {
    methods.iter().filter_map(|method| accessor_property(kind, method)).collect()
}

fn accessor_property(kind: AccessorKind, method: &MethodDescriptor) -> Option<String> {
    if method.is_declared_on_base_object() || !Predicate::for_kind(kind).test(method) {
        return None;
    }
    conventions::property_name(kind, method.name())
}

/// Read `property` from `object` with the default configuration.
pub fn get<T: Introspect>(object: &T, property: &str) -> Result<Value, AccessError> {
    Accessors::new().get(object, property)
}

/// Write `value` to `property` of `object` with the default configuration.
pub fn set<T: Introspect>(object: &mut T, property: &str, value: Value) -> Result<(), AccessError> {
    Accessors::new().set(object, property, value)
}

/// Construct `ty`, falling back to its insertion-ordered default implementation.
pub fn instantiate_or_default(ty: &TypeRef) -> Result<Value, AccessError> {
    Accessors::new().instantiate_or_default(ty)
}

/// A configured accessor resolver.
///
/// Stateless apart from its [`ResolverConfig`]; cheap to clone and safe to share between threads.
///
/// ## Examples
/// ```rust
/// use introspect::{Accessors, ResolverConfig, Value, introspect, Reflect};
///
/// #[derive(Debug, Default, Reflect)]
/// struct Person {
///     alive: bool,
/// }
///
/// #[introspect]
/// impl Person {
///     pub fn is_alive(&self) -> bool {
///         self.alive
///     }
///
///     pub fn set_alive(&mut self, alive: bool) {
///         self.alive = alive;
///     }
/// }
///
/// let accessors = Accessors::with_config(ResolverConfig::new().with_separators(['_', '-']));
/// let mut person = Person::default();
/// accessors.set(&mut person, "alive", Value::new(true)).unwrap();
/// assert_eq!(accessors.get(&person, "alive").unwrap().downcast_ref::<bool>(), Some(&true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Accessors {
    config: ResolverConfig,
}

impl Accessors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// See [`find_accessor`].
    pub fn find_accessor<'m>(
        &self,
        kind: AccessorKind,
        methods: &'m [MethodDescriptor],
        property: &str,
    ) -> Option<&'m MethodDescriptor> {
        find_accessor(kind, methods, property)
    }

    /// Like [`Accessors::find_accessor`], after removing the configured separators from `property`.
    pub fn find_accessor_normalized<'m>(
        &self,
        kind: AccessorKind,
        methods: &'m [MethodDescriptor],
        property: &str,
    ) -> Option<&'m MethodDescriptor> {
        let normalized = naming::strip_chars(property, &self.config.separators);
        find_accessor(kind, methods, &normalized)
    }

    /// See [`derive_name`].
    pub fn derive_name(&self, kind: AccessorKind, method: &MethodDescriptor, fallback: &str) -> String {
        derive_name(kind, method, fallback)
    }

    /// See [`property_names`].
    pub fn property_names(&self, kind: AccessorKind, methods: &[MethodDescriptor]) -> Vec<String> {
        property_names(kind, methods)
    }

    /// Read `property` from `object` through its getter.
    ///
    /// ## Errors
    /// - [`AccessError::NoMatchingAccessor`] when no getter implements `property`.
    /// - [`AccessError::Invocation`] when the getter fails.
    pub fn get<T: Introspect>(&self, object: &T, property: &str) -> Result<Value, AccessError> {
        let methods = self.method_set::<T>();
        self.get_in(object, &methods, property)
    }

    /// Read `property` from `object` through a getter taken from `methods`.
    #[tracing::instrument(skip_all, fields(property = %property, type_name = type_name::<T>()))]
    pub fn get_in<T: Reflect + fmt::Debug>(
        &self,
        object: &T,
        methods: &[MethodDescriptor],
        property: &str,
    ) -> Result<Value, AccessError> {
        let Some(method) = find_accessor(AccessorKind::Getter, methods, property) else {
            tracing::debug!("no getter matched");
            return Err(no_matching_accessor::<T>(AccessorKind::Getter, property));
        };
        tracing::debug!(method = method.name(), "resolved getter");
        method.invoke_read(object).map_err(|cause| {
            AccessorInvocationError::getter(format!("{object:?}"), method.name(), property, cause).into()
        })
    }

    /// Write `value` to `property` of `object` through its setter.
    ///
    /// ## Errors
    /// - [`AccessError::NoMatchingAccessor`] when no setter implements `property`.
    /// - [`AccessError::Invocation`] when the setter rejects `value` or fails.
    pub fn set<T: Introspect>(&self, object: &mut T, property: &str, value: Value) -> Result<(), AccessError> {
        let methods = self.method_set::<T>();
        self.set_in(object, &methods, property, value)
    }

    /// Write `value` to `property` of `object` through a setter taken from `methods`.
    #[tracing::instrument(skip_all, fields(property = %property, type_name = type_name::<T>()))]
    pub fn set_in<T: Reflect + fmt::Debug>(
        &self,
        object: &mut T,
        methods: &[MethodDescriptor],
        property: &str,
        value: Value,
    ) -> Result<(), AccessError> {
        let Some(method) = find_accessor(AccessorKind::Setter, methods, property) else {
            tracing::debug!("no setter matched");
            return Err(no_matching_accessor::<T>(AccessorKind::Setter, property));
        };
        tracing::debug!(method = method.name(), value_type = value.type_name(), "resolved setter");

        // The value is consumed by the call, so its description is taken up front.
        let value_description = format!("{value:?}");
        let value_type = short_type_name(value.type_name());
        method.invoke_write(object, value).map_err(|cause| {
            AccessorInvocationError::setter(
                format!("{object:?}"),
                method.name(),
                property,
                value_description,
                value_type,
                method.parameters().first().map(TypeRef::to_string),
                cause,
            )
            .into()
        })
    }

    /// Construct `ty`; when direct construction fails and the fallback is enabled, construct its
    /// insertion-ordered default implementation instead.
    pub fn instantiate_or_default(&self, ty: &TypeRef) -> Result<Value, AccessError> {
        if self.config.fallback_to_default_impl {
            collections::instantiate(ty)
        } else {
            collections::new_instance(ty)
        }
    }

    fn method_set<T: Introspect>(&self) -> Vec<MethodDescriptor> {
        match self.config.method_source {
            MethodSource::Exposed => T::methods(),
            MethodSource::Declared => T::declared_methods(),
        }
    }
}

fn no_matching_accessor<T: Reflect>(kind: AccessorKind, property: &str) -> AccessError {
    AccessError::NoMatchingAccessor {
        kind,
        type_name: T::type_ref().to_string(),
        property: property.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::descriptor::{Invoker, argument, receiver, receiver_mut};
    use crate::errors::InvokeError;

    #[derive(Debug, Default)]
    struct Person {
        first_name: String,
        alive: bool,
    }

    impl Reflect for Person {
        fn type_ref() -> TypeRef {
            TypeRef::concrete("app::Person")
        }
    }

    fn read_first_name(target: &dyn Any) -> Result<Value, InvokeError> {
        Ok(Value::new(receiver::<Person>(target)?.first_name.clone()))
    }

    fn write_first_name(target: &mut dyn Any, value: Value) -> Result<(), InvokeError> {
        let name = argument::<String>(value)?;
        if name.is_empty() {
            return Err(InvokeError::failed("name must not be empty"));
        }
        receiver_mut::<Person>(target)?.first_name = name;
        Ok(())
    }

    fn read_alive(target: &dyn Any) -> Result<Value, InvokeError> {
        Ok(Value::new(receiver::<Person>(target)?.alive))
    }

    impl Introspect for Person {
        fn declared_methods() -> Vec<MethodDescriptor> {
            vec![
                MethodDescriptor::new("getFirstName", Self::type_ref())
                    .returning(TypeRef::of::<String>())
                    .with_invoker(Invoker::Read(read_first_name)),
                MethodDescriptor::new("setFirstName", Self::type_ref())
                    .with_parameter(TypeRef::of::<String>())
                    .with_invoker(Invoker::Write(write_first_name)),
                MethodDescriptor::new("isAlive", Self::type_ref())
                    .returning(TypeRef::of::<bool>())
                    .with_invoker(Invoker::Read(read_alive)),
                MethodDescriptor::new("describe", Self::type_ref()).returning(TypeRef::of::<String>()),
            ]
        }
    }

    #[test]
    fn boolean_getter_is_found_by_property() {
        let methods = Person::methods();
        let found = find_accessor(AccessorKind::Getter, &methods, "alive");
        assert_eq!(found.map(MethodDescriptor::name), Some("isAlive"));
    }

    #[test]
    fn missing_property_is_none() {
        let methods = Person::methods();
        assert!(find_accessor(AccessorKind::Getter, &methods, "nonexistent").is_none());
        assert!(find_accessor(AccessorKind::Getter, &methods, "").is_none());
        assert!(find_accessor(AccessorKind::Getter, &methods, "class").is_none());
    }

    #[test]
    fn matching_is_case_sensitive_after_the_first_character() {
        let methods = Person::methods();
        assert!(find_accessor(AccessorKind::Getter, &methods, "FirstName").is_some());
        assert!(find_accessor(AccessorKind::Getter, &methods, "firstname").is_none());
    }

    #[test]
    fn normalized_lookup_strips_separators() {
        let methods = [MethodDescriptor::new("getFirstname", Person::type_ref()).returning(TypeRef::of::<String>())];
        assert!(find_accessor_normalized(AccessorKind::Getter, &methods, "first_name").is_some());

        let dashed = Accessors::with_config(ResolverConfig::new().with_separators(['-']));
        assert!(dashed.find_accessor_normalized(AccessorKind::Getter, &methods, "first-name").is_some());
        assert!(dashed.find_accessor_normalized(AccessorKind::Getter, &methods, "first_name").is_none());
    }

    #[test]
    fn custom_predicate_narrows_the_scan() {
        let methods = Person::methods();
        let string_getter = Predicate::IsGetter.and(Predicate::has_return_type(TypeRef::of::<String>()));
        assert!(find_accessor_matching(&string_getter, &methods, "firstName").is_some());
        assert!(find_accessor_matching(&string_getter, &methods, "alive").is_none());
    }

    #[test]
    fn derived_names_strip_the_actual_prefix() {
        let methods = Person::methods();
        assert_eq!(property_names(AccessorKind::Getter, &methods), ["firstName", "alive"]);
        assert_eq!(property_names(AccessorKind::Setter, &methods), ["firstName"]);
        assert_eq!(derive_name(AccessorKind::Getter, &methods[3], "none"), "none");
        assert_eq!(derive_name(AccessorKind::Getter, &methods[4], "none"), "none");
    }

    #[test]
    fn get_set_round_trip() {
        let mut person = Person::default();
        set(&mut person, "firstName", Value::new("Ada".to_string())).expect("setter accepts a String");
        let value = get(&person, "firstName").expect("getter succeeds");
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("Ada"));
    }

    #[test]
    fn missing_setter_names_type_and_property() {
        let mut person = Person::default();
        let err = set(&mut person, "alive", Value::new(true)).unwrap_err();
        assert!(err.is_no_matching_accessor());
        insta::assert_snapshot!(err.to_string(), @"no setter matching property `alive` on type `Person`");
    }

    #[test]
    fn setter_failures_are_wrapped_with_details() {
        let mut person = Person::default();
        let err = set(&mut person, "firstName", Value::new(String::new())).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r#"failed to set property `firstName` via `setFirstName` on Person { first_name: "", alive: false }; value: "", value type: `String`, expected type: `String`: name must not be empty"#
        );
    }

    #[test]
    fn declared_method_source_skips_base_object_methods() {
        let declared = Accessors::with_config(ResolverConfig::new().with_method_source(MethodSource::Declared));
        assert_eq!(declared.method_set::<Person>().len(), 4);
        assert_eq!(Accessors::new().method_set::<Person>().len(), 6);
        assert!(declared.get(&Person::default(), "alive").is_ok());
    }

    #[test]
    fn fallback_can_be_disabled() {
        let ty = TypeRef::of::<crate::types::SetOf<u8>>();
        assert!(instantiate_or_default(&ty).is_ok());

        let strict = Accessors::with_config(ResolverConfig::new().with_fallback_to_default_impl(false));
        assert!(matches!(
            strict.instantiate_or_default(&ty),
            Err(AccessError::NotConstructible { .. })
        ));
    }
}

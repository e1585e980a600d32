//! End-to-end accessor resolution over build-time generated metadata.

use std::error::Error as _;

use indexmap::IndexSet;
use introspect::generics::{field_type_arguments, return_type_arguments};
use introspect::{
    AccessError, AccessorKind, Accessors, DeclaredFields, Introspect, InvokeError, Predicate, Reflect, ResolverConfig,
    SetOf, TypeRef, Value, derive_name, find_accessor, find_accessor_matching, find_accessor_normalized, get,
    instantiate_or_default, introspect, property_names, set,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug, thiserror::Error)]
#[error("age {0} is out of range")]
struct AgeOutOfRange(u32);

#[derive(Debug, thiserror::Error)]
#[error("no email on record")]
struct NoEmail;

#[derive(Debug, Default, Reflect)]
#[reflect(constructible)]
struct Person {
    first_name: String,
    lastname: String,
    age: u32,
    alive: bool,
    #[reflect(declared = SetOf<String>)]
    nicknames: IndexSet<String>,
}

#[introspect]
impl Person {
    pub fn get_first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, name: &str) {
        self.first_name = name.to_string();
    }

    pub fn get_lastname(&self) -> String {
        self.lastname.clone()
    }

    pub fn get_age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) -> Result<(), AgeOutOfRange> {
        if age > 150 {
            return Err(AgeOutOfRange(age));
        }
        self.age = age;
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    #[introspect(name = "getNicknames")]
    pub fn nicknames(&self) -> IndexSet<String> {
        self.nicknames.clone()
    }

    pub fn set_nicknames(&mut self, nicknames: IndexSet<String>) {
        self.nicknames = nicknames;
    }

    pub fn get_email(&self) -> Result<String, NoEmail> {
        Err(NoEmail)
    }

    pub fn greet(&self, other: &str) -> String {
        format!("{} greets {other}", self.first_name)
    }

    #[introspect(skip)]
    pub fn reset(&mut self) {
        *self = Person::default();
    }
}

fn ada() -> Person {
    Person {
        first_name: "Ada".to_string(),
        alive: true,
        ..Person::default()
    }
}

#[test]
fn boolean_getter_resolves_from_property_name() {
    let methods = Person::methods();
    let found = find_accessor(AccessorKind::Getter, &methods, "alive").expect("isAlive should match");
    assert_eq!(found.name(), "isAlive");
    assert_eq!(found.return_type(), &TypeRef::of::<bool>());
}

#[test]
fn nonexistent_property_is_none() {
    let methods = Person::methods();
    assert!(find_accessor(AccessorKind::Getter, &methods, "nonexistent").is_none());
    assert!(find_accessor(AccessorKind::Setter, &methods, "email").is_none());
    assert!(find_accessor(AccessorKind::Getter, &methods, "class").is_none());
}

#[test]
fn skipped_methods_are_not_described() {
    let names: Vec<String> = Person::declared_methods().iter().map(|m| m.name().to_string()).collect();
    assert!(!names.iter().any(|n| n == "reset"));
    assert_eq!(names.first().map(String::as_str), Some("getFirstName"));

    let mut person = ada();
    person.reset();
    assert_eq!(person.first_name, "");
}

#[test]
fn get_set_get_round_trips() {
    init_tracing();
    let mut person = ada();

    let before = get(&person, "firstName").expect("getter");
    assert_eq!(before.downcast_ref::<String>().map(String::as_str), Some("Ada"));

    set(&mut person, "firstName", Value::new("Grace".to_string())).expect("setter");
    let after = get(&person, "firstName").expect("getter");
    assert_eq!(after.downcast_ref::<String>().map(String::as_str), Some("Grace"));

    set(&mut person, "alive", Value::new(false)).expect("boolean setter");
    assert_eq!(get(&person, "alive").expect("isAlive").downcast::<bool>().ok(), Some(false));
}

#[test]
fn missing_getter_names_type_and_property() {
    init_tracing();
    let err = get(&ada(), "nonexistent").unwrap_err();
    assert!(err.is_no_matching_accessor());
    insta::assert_snapshot!(err.to_string(), @"no getter matching property `nonexistent` on type `Person`");
}

#[test]
fn setter_type_mismatch_reports_value_and_expected_type() {
    init_tracing();
    let mut person = Person::default();
    let err = set(&mut person, "age", Value::new("old")).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"failed to set property `age` via `setAge` on Person { first_name: "", lastname: "", age: 0, alive: false, nicknames: {} }; value: "old", value type: `&str`, expected type: `u32`: argument of type `&str` does not match parameter type `u32`"#
    );
    assert_eq!(person.age, 0);
}

#[test]
fn failing_setter_is_wrapped_with_its_cause() {
    init_tracing();
    let mut person = Person::default();
    let err = set(&mut person, "age", Value::new(200_u32)).unwrap_err();

    let AccessError::Invocation(details) = &err else {
        panic!("expected an invocation error, got {err:?}");
    };
    assert_eq!(details.kind, AccessorKind::Setter);
    assert_eq!(details.method, "setAge");
    assert_eq!(details.value.as_deref(), Some("200"));
    assert_eq!(details.expected_type.as_deref(), Some("u32"));
    assert!(matches!(details.cause, InvokeError::Failed(_)));
    assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("age 200 is out of range"));
}

#[test]
fn failing_getter_is_wrapped() {
    let err = get(&ada(), "email").unwrap_err();
    let AccessError::Invocation(details) = &err else {
        panic!("expected an invocation error, got {err:?}");
    };
    assert_eq!(details.kind, AccessorKind::Getter);
    assert_eq!(details.method, "getEmail");
    assert_eq!(details.property, "email");
    assert!(details.value.is_none());
    assert!(err.to_string().ends_with(": no email on record"), "{err}");
}

#[test]
fn normalized_lookup_removes_underscores_only() {
    let methods = Person::methods();
    let lastname = find_accessor_normalized(AccessorKind::Getter, &methods, "last_name");
    assert_eq!(lastname.map(|m| m.name()), Some("getLastname"));

    // Only the first character is case-normalized, so `firstname` does not match `getFirstName`.
    assert!(find_accessor_normalized(AccessorKind::Getter, &methods, "first_name").is_none());
    assert!(find_accessor(AccessorKind::Getter, &methods, "first_name").is_none());
}

#[test]
fn configured_separators_drive_normalization() {
    let methods = Person::methods();
    let accessors = Accessors::with_config(ResolverConfig::new().with_separators(['-', '.']));
    assert!(accessors.find_accessor_normalized(AccessorKind::Getter, &methods, "last-name").is_some());
    assert!(accessors.find_accessor_normalized(AccessorKind::Getter, &methods, "last_name").is_none());
}

#[test]
fn renamed_and_multi_argument_methods_are_described() {
    let methods = Person::methods();
    let nicknames = find_accessor(AccessorKind::Getter, &methods, "nicknames").expect("renamed getter");
    assert_eq!(nicknames.return_type(), &TypeRef::of::<IndexSet<String>>());

    let greet = methods.iter().find(|m| m.name() == "greet").expect("greet is described");
    assert_eq!(greet.parameters(), [TypeRef::of::<String>()]);
    assert!(matches!(
        greet.invoke_read(&ada()),
        Err(InvokeError::UnsupportedShape { shape: "getter", .. })
    ));
}

#[test]
fn property_names_follow_method_order() {
    let methods = Person::methods();
    assert_eq!(
        property_names(AccessorKind::Getter, &methods),
        ["firstName", "lastname", "age", "alive", "nicknames", "email"]
    );
    assert_eq!(
        property_names(AccessorKind::Setter, &methods),
        ["firstName", "age", "alive", "nicknames"]
    );

    let greet = methods.iter().find(|m| m.name() == "greet").expect("greet");
    assert_eq!(derive_name(AccessorKind::Getter, greet, "greeting"), "greeting");
}

#[test]
fn custom_predicates_compose_with_resolution() {
    let methods = Person::methods();
    let string_setter = Predicate::IsSetter.and(Predicate::has_parameter_type(TypeRef::of::<String>()));
    assert!(find_accessor_matching(&string_setter, &methods, "firstName").is_some());
    assert!(find_accessor_matching(&string_setter, &methods, "age").is_none());

    let set_typed = Predicate::IsSetter.and(Predicate::has_generic_parameter_type(TypeRef::of::<String>()));
    let found = find_accessor_matching(&set_typed, &methods, "nicknames").expect("generic parameter match");
    assert_eq!(found.name(), "setNicknames");
}

#[test]
fn abstract_field_types_are_instantiated_with_defaults() {
    init_tracing();
    let fields = Person::declared_fields();
    let nicknames = fields.iter().find(|f| f.name() == "nicknames").expect("nicknames field");
    assert!(nicknames.declared_type().is_abstract());
    assert_eq!(field_type_arguments(nicknames), [TypeRef::of::<String>()]);

    let mut value = instantiate_or_default(nicknames.declared_type()).expect("SetOf binds to IndexSet");
    let set_value = value.downcast_mut::<IndexSet<String>>().expect("IndexSet<String>");
    set_value.insert("Countess".to_string());
    set_value.insert("Enchantress".to_string());

    let mut person = ada();
    set(&mut person, "nicknames", value).expect("setter accepts the instantiated default");
    let nicknames: Vec<&str> = person.nicknames.iter().map(String::as_str).collect();
    assert_eq!(nicknames, ["Countess", "Enchantress"]);
}

#[test]
fn return_type_arguments_are_strict() {
    let methods = Person::methods();
    let nicknames = find_accessor(AccessorKind::Getter, &methods, "nicknames").expect("getter");
    assert_eq!(return_type_arguments(nicknames).expect("parameterized"), [TypeRef::of::<String>()]);

    let age = find_accessor(AccessorKind::Getter, &methods, "age").expect("getter");
    assert!(matches!(
        return_type_arguments(age),
        Err(AccessError::MalformedGenerics { .. })
    ));
}

#[test]
fn constructible_types_instantiate_directly() {
    let value = instantiate_or_default(&Person::type_ref()).expect("Person derives Default");
    assert_eq!(value.downcast_ref::<Person>().map(|p| p.age), Some(0));
}

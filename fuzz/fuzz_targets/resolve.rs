#![no_main]

use introspect::naming::{capitalize, strip_chars, uncapitalize};
use introspect::{AccessorKind, MethodDescriptor, TypeRef, find_accessor, find_accessor_normalized};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Split into a method name and a property name
        let (method_name, property) = s.split_once('\n').unwrap_or((s, s));

        let _ = capitalize(uncapitalize(property).as_str());
        let stripped = strip_chars(property, &['_', '-']);
        assert!(!stripped.contains('_') && !stripped.contains('-'));

        let owner = TypeRef::concrete("fuzz::Row");
        let methods = [
            MethodDescriptor::new(method_name.to_string(), owner.clone()).returning(TypeRef::of::<String>()),
            MethodDescriptor::new(method_name.to_string(), owner).with_parameter(TypeRef::of::<String>()),
        ];
        let _ = find_accessor(AccessorKind::Getter, &methods, property);
        let _ = find_accessor_normalized(AccessorKind::Setter, &methods, property);
    }
});

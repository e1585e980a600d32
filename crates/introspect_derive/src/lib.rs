//! Build-time metadata generation for `introspect`.
//!
//! These macros replace runtime reflection with metadata computed at compile time:
//! - `Reflect` (derive): implements `introspect::Reflect` and `introspect::DeclaredFields`
//! - `introspect` (attribute on an inherent `impl` block): implements `introspect::Introspect`, describing
//!   each method under its accessor name with an invocation handle

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod methods;
mod reflect;

/// Generates type and field metadata for a struct or enum.
///
/// Attributes:
/// - `#[reflect(constructible)]` on the type: register `Default::default` as its zero-argument constructor
///   (requires `Default + Debug`)
/// - `#[reflect(declared = Type)]` on a field: describe the field with `Type` instead of its Rust type,
///   e.g. an abstract `SetOf<String>` for an `IndexSet<String>` field
/// - `#[reflect(skip)]` on a field: leave it out of `declared_fields()`
///
/// Generic types are rejected; implement `Reflect` by hand for those.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Default, Reflect)]
/// #[reflect(constructible)]
/// struct Person {
///     name: String,
///     #[reflect(declared = SetOf<String>)]
///     tags: IndexSet<String>,
/// }
///
/// // Generates:
/// impl Reflect for Person {
///     fn type_ref() -> TypeRef {
///         TypeRef::concrete(raw_type_path::<Self>()).with_constructor(construct_default::<Self>)
///     }
/// }
/// impl DeclaredFields for Person {
///     fn declared_fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("name", <String as Reflect>::type_ref(), <Self as Reflect>::type_ref()),
///             FieldDescriptor::new("tags", <SetOf<String> as Reflect>::type_ref(), <Self as Reflect>::type_ref()),
///         ]
///     }
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generates the method metadata of an inherent `impl` block.
///
/// Every method is exposed under the lower camel case form of its identifier (`get_first_name` becomes
/// `getFirstName`) unless renamed with `#[introspect(name = "...")]`; `#[introspect(skip)]` leaves a
/// method out. Both attributes are removed from the emitted `impl` block.
///
/// Invocation handles are generated for two shapes:
/// - `&self` with no arguments: a read handle. `&U` results are returned as `U::Owned`, `Result<R, E>`
///   results unwrap `R` and report `E` as an invocation failure.
/// - `&self` / `&mut self` with one argument and a `()` or `Result<(), E>` result: a write handle. `&U`
///   arguments are accepted as `U::Owned`.
///
/// Other methods are still described (for matching and type queries) without a handle. Methods that
/// cannot be described are left out: generic, `async` or `unsafe` methods, associated functions,
/// by-value receivers, `&mut` arguments or results, `impl Trait` in the signature, and types that
/// keep a non-`'static` borrow below the top level (`Option<&str>`, `Vec<&str>`, `Cow<'a, str>`).
///
/// # Example
/// ```ignore
/// #[introspect]
/// impl Person {
///     pub fn get_name(&self) -> &str {
///         &self.name
///     }
///
///     pub fn set_name(&mut self, name: &str) {
///         self.name = name.to_string();
///     }
///
///     #[introspect(skip)]
///     pub fn reset(&mut self) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn introspect(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemImpl);
    methods::expand(attr.into(), item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

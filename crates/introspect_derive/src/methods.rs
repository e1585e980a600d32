//! `#[introspect]` expansion: method descriptors with invocation handles.

use introspect_core::naming::snake_to_lower_camel;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, FnArg, GenericArgument, ImplItem, ItemImpl, LitStr, PathArguments, ReturnType, Signature, Type};

pub(crate) fn expand(attr: TokenStream2, mut item: ItemImpl) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(attr, "`#[introspect]` takes no arguments"));
    }
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`#[introspect]` applies to inherent impl blocks only",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "`#[introspect]` does not support generic impl blocks",
        ));
    }

    let mut descriptors = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = MethodAttrs::take(&mut method.attrs)?;
        if attrs.skip {
            continue;
        }
        let name = attrs
            .name
            .unwrap_or_else(|| snake_to_lower_camel(&method.sig.ident.unraw().to_string()));
        if let Some(descriptor) = describe(&name, &method.sig) {
            descriptors.push(descriptor);
        }
    }

    let self_ty = &item.self_ty;
    Ok(quote! {
        #item

        impl ::introspect::descriptor::Introspect for #self_ty {
            fn declared_methods() -> ::std::vec::Vec<::introspect::descriptor::MethodDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

#[derive(Default)]
struct MethodAttrs {
    skip: bool,
    name: Option<String>,
}

impl MethodAttrs {
    /// Parse and remove every `#[introspect(...)]` attribute.
    fn take(attrs: &mut Vec<Attribute>) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("introspect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    return Ok(());
                }
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "accessor name must not be empty"));
                    }
                    out.name = Some(lit.value());
                    return Ok(());
                }
                Err(meta.error("unsupported `introspect` attribute; expected `skip` or `name = \"...\"`"))
            })?;
        }
        attrs.retain(|a| !a.path().is_ident("introspect"));
        Ok(out)
    }
}

/// How a parameter or result crosses the `Value` boundary.
enum Passing {
    Unit,
    Owned(Type),
    /// `&U`, carried as `<U as ToOwned>::Owned`.
    Borrowed(Type),
}

impl Passing {
    fn from_type(ty: &Type) -> Option<Self> {
        if contains_impl_trait(ty) {
            return None;
        }
        match ty {
            Type::Tuple(tuple) if tuple.elems.is_empty() => Some(Passing::Unit),
            Type::Reference(reference) if reference.mutability.is_some() => None,
            Type::Reference(reference) if borrows(&reference.elem) => None,
            Type::Reference(reference) => Some(Passing::Borrowed((*reference.elem).clone())),
            Type::Paren(inner) => Passing::from_type(&inner.elem),
            other if borrows(other) => None,
            other => Some(Passing::Owned(other.clone())),
        }
    }

    /// The owned type stored in a `Value`.
    fn owned(&self) -> TokenStream2 {
        match self {
            Passing::Unit => quote!(()),
            Passing::Owned(ty) => quote!(#ty),
            Passing::Borrowed(ty) => quote!(<#ty as ::std::borrow::ToOwned>::Owned),
        }
    }

    fn type_ref(&self) -> TokenStream2 {
        match self {
            Passing::Unit => quote!(::introspect::types::TypeRef::unit()),
            _ => {
                let owned = self.owned();
                quote!(<#owned as ::introspect::types::Reflect>::type_ref())
            }
        }
    }

    /// Turn an owned argument into what the method takes.
    fn pass(&self, arg: TokenStream2) -> TokenStream2 {
        match self {
            Passing::Borrowed(ty) => quote!(::std::borrow::Borrow::<#ty>::borrow(&#arg)),
            Passing::Unit | Passing::Owned(_) => arg,
        }
    }

    /// Turn the result of `call` into a `Value`.
    fn wrap(&self, call: TokenStream2) -> TokenStream2 {
        match self {
            Passing::Unit => quote!({ #call; ::introspect::value::Value::unit() }),
            Passing::Owned(_) => quote!(::introspect::value::Value::new(#call)),
            Passing::Borrowed(_) => {
                quote!(::introspect::value::Value::new(::std::borrow::ToOwned::to_owned(#call)))
            }
        }
    }
}

struct Output {
    passing: Passing,
    fallible: bool,
}

impl Output {
    fn from_return(output: &ReturnType) -> Option<Self> {
        let ReturnType::Type(_, ty) = output else {
            return Some(Output {
                passing: Passing::Unit,
                fallible: false,
            });
        };
        match result_ok_type(ty) {
            Some(ok) => Some(Output {
                passing: Passing::from_type(ok)?,
                fallible: true,
            }),
            None => Some(Output {
                passing: Passing::from_type(ty)?,
                fallible: false,
            }),
        }
    }

    /// `call`, with a `Result` error turned into an invocation failure.
    fn unwrap_call(&self, call: TokenStream2) -> TokenStream2 {
        if self.fallible {
            quote!(#call.map_err(|err| ::introspect::errors::InvokeError::failed(err))?)
        } else {
            call
        }
    }
}

fn describe(name: &str, sig: &Signature) -> Option<TokenStream2> {
    if sig.asyncness.is_some() || sig.unsafety.is_some() || !sig.generics.params.is_empty() {
        return None;
    }
    let mut inputs = sig.inputs.iter();
    let Some(FnArg::Receiver(receiver)) = inputs.next() else {
        return None;
    };
    if receiver.reference.is_none() || receiver.colon_token.is_some() {
        return None;
    }
    let mutable = receiver.mutability.is_some();

    let mut params = Vec::new();
    for input in inputs {
        let FnArg::Typed(typed) = input else {
            return None;
        };
        params.push(Passing::from_type(&typed.ty)?);
    }
    let output = Output::from_return(&sig.output)?;

    let ident = &sig.ident;
    let param_types = params.iter().map(Passing::type_ref);
    let return_type = output.passing.type_ref();

    let invoker = match params.as_slice() {
        [] if !mutable => {
            let value = output.passing.wrap(output.unwrap_call(quote!(this.#ident())));
            quote! {
                ::introspect::descriptor::Invoker::Read(
                    |target: &dyn ::core::any::Any| -> ::core::result::Result<
                        ::introspect::value::Value,
                        ::introspect::errors::InvokeError,
                    > {
                        let this = ::introspect::descriptor::receiver::<Self>(target)?;
                        ::core::result::Result::Ok(#value)
                    },
                )
            }
        }
        [param] if matches!(output.passing, Passing::Unit) => {
            let owned = param.owned();
            let arg = param.pass(quote!(arg));
            let call = output.unwrap_call(quote!(this.#ident(#arg)));
            quote! {
                ::introspect::descriptor::Invoker::Write(
                    |target: &mut dyn ::core::any::Any,
                     value: ::introspect::value::Value|
                     -> ::core::result::Result<(), ::introspect::errors::InvokeError> {
                        let this = ::introspect::descriptor::receiver_mut::<Self>(target)?;
                        let arg = ::introspect::descriptor::argument::<#owned>(value)?;
                        #call;
                        ::core::result::Result::Ok(())
                    },
                )
            }
        }
        _ => quote!(::introspect::descriptor::Invoker::Unsupported),
    };

    Some(quote! {
        ::introspect::descriptor::MethodDescriptor::new(#name, <Self as ::introspect::types::Reflect>::type_ref())
            #(.with_parameter(#param_types))*
            .returning(#return_type)
            .with_invoker(#invoker)
    })
}

/// `R` when `ty` is spelled `Result<R, ..>` (any path ending in `Result`).
fn result_ok_type(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let last = path.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// True if `ty` holds a non-`'static` borrow (`Option<&str>`, `Cow<'a, str>`), which cannot live in a `Value`.
fn borrows(ty: &Type) -> bool {
    let transient = |lifetime: &syn::Lifetime| lifetime.ident != "static";
    match ty {
        Type::Reference(reference) => reference.lifetime.as_ref().is_none_or(transient) || borrows(&reference.elem),
        Type::Paren(inner) => borrows(&inner.elem),
        Type::Group(inner) => borrows(&inner.elem),
        Type::Slice(slice) => borrows(&slice.elem),
        Type::Array(array) => borrows(&array.elem),
        Type::Tuple(tuple) => tuple.elems.iter().any(borrows),
        Type::TraitObject(object) => object.bounds.iter().any(|bound| match bound {
            syn::TypeParamBound::Lifetime(lifetime) => transient(lifetime),
            _ => false,
        }),
        Type::Path(path) => path.path.segments.iter().any(|segment| match &segment.arguments {
            PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
                GenericArgument::Lifetime(lifetime) => transient(lifetime),
                GenericArgument::Type(ty) => borrows(ty),
                _ => false,
            }),
            _ => false,
        }),
        _ => false,
    }
}

fn contains_impl_trait(ty: &Type) -> bool {
    match ty {
        Type::ImplTrait(_) => true,
        Type::Reference(reference) => contains_impl_trait(&reference.elem),
        Type::Paren(inner) => contains_impl_trait(&inner.elem),
        Type::Group(inner) => contains_impl_trait(&inner.elem),
        Type::Slice(slice) => contains_impl_trait(&slice.elem),
        Type::Array(array) => contains_impl_trait(&array.elem),
        Type::Tuple(tuple) => tuple.elems.iter().any(contains_impl_trait),
        Type::Path(path) => path.path.segments.iter().any(|segment| match &segment.arguments {
            PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
                GenericArgument::Type(ty) => contains_impl_trait(ty),
                _ => false,
            }),
            _ => false,
        }),
        _ => false,
    }
}

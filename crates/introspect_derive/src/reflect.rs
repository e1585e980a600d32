//! `#[derive(Reflect)]` expansion.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, Type};

#[derive(Default)]
struct ContainerAttrs {
    constructible: bool,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("constructible") {
                    out.constructible = true;
                    return Ok(());
                }
                Err(meta.error("unsupported `reflect` attribute; expected `constructible`"))
            })?;
        }
        Ok(out)
    }
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    declared: Option<Type>,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    return Ok(());
                }
                if meta.path.is_ident("declared") {
                    out.declared = Some(meta.value()?.parse()?);
                    return Ok(());
                }
                Err(meta.error("unsupported `reflect` field attribute; expected `skip` or `declared = Type`"))
            })?;
        }
        Ok(out)
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`#[derive(Reflect)]` does not support generic types; implement `Reflect` by hand",
        ));
    }
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => declared_fields(&data.fields)?,
        Data::Enum(_) => Vec::new(),
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "`#[derive(Reflect)]` does not support unions",
            ));
        }
    };
    let field_names = fields.iter().map(|(name, _)| name);
    let field_types = fields.iter().map(|(_, ty)| ty);

    let constructor = container
        .constructible
        .then(|| quote!(.with_constructor(::introspect::types::construct_default::<Self>)));

    Ok(quote! {
        impl ::introspect::types::Reflect for #name {
            fn type_ref() -> ::introspect::types::TypeRef {
                ::introspect::types::TypeRef::concrete(::introspect::types::raw_type_path::<Self>())
                    #constructor
            }
        }

        impl ::introspect::descriptor::DeclaredFields for #name {
            fn declared_fields() -> ::std::vec::Vec<::introspect::descriptor::FieldDescriptor> {
                ::std::vec![
                    #(
                        ::introspect::descriptor::FieldDescriptor::new(
                            #field_names,
                            <#field_types as ::introspect::types::Reflect>::type_ref(),
                            <Self as ::introspect::types::Reflect>::type_ref(),
                        )
                    ),*
                ]
            }
        }
    })
}

fn declared_fields(fields: &Fields) -> syn::Result<Vec<(String, Type)>> {
    let mut out = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let name = match &field.ident {
            Some(ident) => ident.unraw().to_string(),
            None => index.to_string(),
        };
        out.push((name, attrs.declared.unwrap_or_else(|| field.ty.clone())));
    }
    Ok(out)
}

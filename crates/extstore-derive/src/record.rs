use crate::attrs::{FieldArgs, SchemaArgs, has_attr};
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Visibility, ext::IdentExt};

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(errors) => errors,
    }
}

///
/// PersistedField
///

struct PersistedField<'a> {
    ident: &'a syn::Ident,
    name: String,
}

fn expand(input: &DeriveInput) -> Result<TokenStream, TokenStream> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(compile_error(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(compile_error(
            ident,
            "Record can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(compile_error(
            &data.fields,
            "Record can only be derived for structs with named fields",
        ));
    };

    // no #[schema] means no type-level metadata; building the schema fails at runtime
    let annotations = if has_attr(&input.attrs, "schema") {
        let args = SchemaArgs::from_derive_input(input).map_err(|err| err.write_errors())?;
        let attr = args.schema_attr().map_err(|err| err.to_compile_error())?;

        vec![quote!(::extstore::metadata::Annotation::Schema(#attr))]
    } else {
        Vec::new()
    };

    let mut properties = Vec::new();
    let mut persisted = Vec::new();

    for field in &named.named {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let name = field_ident.unraw().to_string();
        let marked = has_attr(&field.attrs, "field");
        let public = matches!(field.vis, Visibility::Public(_));

        if marked && !public {
            return Err(compile_error(
                field_ident,
                "#[field] can only mark `pub` fields",
            ));
        }
        if !public {
            continue;
        }

        if marked {
            let args = FieldArgs::parse(field).map_err(|err| err.write_errors())?;
            let attr = args.field_attr().map_err(|err| err.to_compile_error())?;

            properties.push(quote! {
                ::extstore::reflect::Property::new(
                    #name,
                    <#ty as ::extstore::traits::Storable>::type_info(),
                    ::std::vec![::extstore::metadata::Annotation::Field(#attr)],
                )
            });
            persisted.push(PersistedField {
                ident: field_ident,
                name,
            });
        } else {
            properties.push(quote! {
                ::extstore::reflect::Property::new(
                    #name,
                    ::extstore::reflect::TypeInfo::opaque(::core::any::type_name::<#ty>()),
                    ::std::vec::Vec::new(),
                )
            });
        }
    }

    let read_arms = persisted.iter().map(|PersistedField { ident, name }| {
        quote! {
            #name => ::extstore::traits::Storable::to_value(&self.#ident, cx),
        }
    });
    let write_arms = persisted.iter().map(|PersistedField { ident, name }| {
        quote! {
            #name => {
                self.#ident = ::extstore::traits::Storable::from_value(value, cx)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    // a record without persisted fields never touches the context or value
    let allow_unused = persisted
        .is_empty()
        .then(|| quote!(#[allow(unused_variables)]));

    Ok(quote! {
        impl ::extstore::traits::Record for #ident {
            fn record_type() -> ::extstore::reflect::TypeInfo {
                ::extstore::reflect::TypeInfo::declared(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#annotations),*],
                )
            }

            fn properties() -> ::std::vec::Vec<::extstore::reflect::Property> {
                ::std::vec![#(#properties),*]
            }

            #allow_unused
            fn read_property(
                &self,
                name: &str,
                cx: &mut ::extstore::convert::Context<'_>,
            ) -> ::core::result::Result<
                ::core::option::Option<::extstore::value::Value>,
                ::extstore::error::Error,
            > {
                match name {
                    #(#read_arms)*
                    _ => ::core::result::Result::Err(::extstore::error::Error::unknown_property(
                        ::core::any::type_name::<Self>(),
                        name,
                    )),
                }
            }

            #allow_unused
            fn write_property(
                &mut self,
                name: &str,
                value: ::extstore::value::Value,
                cx: &mut ::extstore::convert::Context<'_>,
            ) -> ::core::result::Result<(), ::extstore::error::Error> {
                match name {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(::extstore::error::Error::unknown_property(
                        ::core::any::type_name::<Self>(),
                        name,
                    )),
                }
            }
        }

        impl ::extstore::traits::Storable for #ident {
            fn type_info() -> ::extstore::reflect::TypeInfo {
                <Self as ::extstore::traits::Record>::record_type()
            }

            fn to_value(
                &self,
                cx: &mut ::extstore::convert::Context<'_>,
            ) -> ::core::result::Result<
                ::core::option::Option<::extstore::value::Value>,
                ::extstore::error::Error,
            > {
                cx.serialize_nested(self).map(::core::option::Option::Some)
            }

            fn from_value(
                value: ::extstore::value::Value,
                cx: &mut ::extstore::convert::Context<'_>,
            ) -> ::core::result::Result<Self, ::extstore::error::Error> {
                cx.deserialize_nested(value)
            }
        }
    })
}

fn compile_error(tokens: impl quote::ToTokens, message: &str) -> TokenStream {
    Error::new_spanned(tokens, message).to_compile_error()
}

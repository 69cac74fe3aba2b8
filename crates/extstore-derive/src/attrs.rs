use darling::{FromDeriveInput, FromField, util::SpannedValue};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, Error, Meta, ext::IdentExt};
use ulid::Ulid;

const UNIT_CATEGORIES: [&str; 8] = [
    "Length",
    "Area",
    "Volume",
    "Angle",
    "Mass",
    "Force",
    "Temperature",
    "Number",
];

const ACCESS_LEVELS: [&str; 3] = ["Public", "Vendor", "Application"];

///
/// SchemaArgs
///
/// `#[schema(...)]` on the record type.
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(schema), supports(struct_named))]
pub struct SchemaArgs {
    pub ident: syn::Ident,

    #[darling(default)]
    pub guid: Option<SpannedValue<String>>,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub documentation: Option<String>,

    #[darling(default)]
    pub application: Option<SpannedValue<String>>,

    #[darling(default)]
    pub vendor: Option<String>,

    #[darling(default)]
    pub read_access: Option<SpannedValue<String>>,

    #[darling(default)]
    pub write_access: Option<SpannedValue<String>>,
}

impl SchemaArgs {
    /// Tokens constructing the `SchemaAttr` these args describe.
    pub fn schema_attr(&self) -> Result<TokenStream, Error> {
        let guid = self.guid.as_ref().ok_or_else(|| {
            Error::new(self.ident.span(), "#[schema] requires a `guid = \"...\"` argument")
        })?;
        let id = parse_ulid(guid, "guid")?;

        let name = self
            .name
            .clone()
            .unwrap_or_else(|| self.ident.unraw().to_string());
        let documentation = opt_string(self.documentation.as_deref());
        let vendor = opt_string(self.vendor.as_deref());
        let application = match &self.application {
            Some(raw) => {
                let raw = parse_ulid(raw, "application")?;
                quote!(::core::option::Option::Some(::extstore::types::Guid(#raw)))
            }
            None => quote!(::core::option::Option::None),
        };
        let read_access = access_level(self.read_access.as_ref())?;
        let write_access = access_level(self.write_access.as_ref())?;

        Ok(quote! {
            ::extstore::metadata::SchemaAttr {
                id: ::extstore::types::SchemaId::from_u128(#id),
                name: ::std::string::String::from(#name),
                documentation: #documentation,
                application_id: #application,
                vendor_id: #vendor,
                read_access: #read_access,
                write_access: #write_access,
            }
        })
    }
}

///
/// FieldArgs
///
/// `#[field(...)]` on a persisted property.
///

#[derive(Debug, Default, FromField)]
#[darling(default, attributes(field))]
pub struct FieldArgs {
    pub documentation: Option<String>,
    pub unit: Option<SpannedValue<String>>,
}

impl FieldArgs {
    /// Parse field args; a bare `#[field]` takes every default.
    pub fn parse(field: &syn::Field) -> Result<Self, darling::Error> {
        let has_list = field
            .attrs
            .iter()
            .any(|attr| attr.path().is_ident("field") && matches!(attr.meta, Meta::List(_)));

        if has_list {
            Self::from_field(field)
        } else {
            Ok(Self::default())
        }
    }

    pub fn field_attr(&self) -> Result<TokenStream, Error> {
        let documentation = opt_string(self.documentation.as_deref());
        let unit = match &self.unit {
            Some(unit) => {
                let variant = known_variant(unit, &UNIT_CATEGORIES, "unit category")?;
                quote!(::core::option::Option::Some(::extstore::units::UnitCategory::#variant))
            }
            None => quote!(::core::option::Option::None),
        };

        Ok(quote! {
            ::extstore::metadata::FieldAttr {
                documentation: #documentation,
                unit: #unit,
            }
        })
    }
}

pub fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn parse_ulid(raw: &SpannedValue<String>, arg: &str) -> Result<u128, Error> {
    Ulid::from_string(raw.as_str())
        .map(|ulid| ulid.0)
        .map_err(|err| Error::new(raw.span(), format!("invalid `{arg}` ULID '{}': {err}", raw.as_str())))
}

fn access_level(raw: Option<&SpannedValue<String>>) -> Result<TokenStream, Error> {
    let variant = match raw {
        Some(raw) => known_variant(raw, &ACCESS_LEVELS, "access level")?,
        None => syn::Ident::new("Public", Span::call_site()),
    };

    Ok(quote!(::extstore::types::AccessLevel::#variant))
}

// Case-insensitive match against a fixed variant list.
fn known_variant(
    raw: &SpannedValue<String>,
    known: &[&str],
    what: &str,
) -> Result<syn::Ident, Error> {
    known
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(raw.as_str()))
        .map(|candidate| syn::Ident::new(candidate, raw.span()))
        .ok_or_else(|| {
            Error::new(
                raw.span(),
                format!(
                    "unknown {what} '{}', expected one of: {}",
                    raw.as_str(),
                    known.join(", ")
                ),
            )
        })
}

fn opt_string(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote!(::core::option::Option::Some(::std::string::String::from(#value))),
        None => quote!(::core::option::Option::None),
    }
}

use proc_macro::TokenStream;

mod attrs;
mod record;

/// Derive `Record` and `Storable` for a struct with named fields.
///
/// ```ignore
/// #[derive(Default, Record)]
/// #[schema(guid = "01J9ZK5M0Q3W6T2Y8R4E1HBVXC", name = "Beam", read_access = "Public")]
/// pub struct Beam {
///     #[field(unit = "Length", documentation = "clear span")]
///     pub span: f64,
///
///     #[field]
///     pub tags: Vec<String>,
///
///     pub scratch: u64, // visible to reflection, never persisted
/// }
/// ```
#[proc_macro_derive(Record, attributes(schema, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}

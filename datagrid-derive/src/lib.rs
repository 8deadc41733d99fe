mod macros;

use proc_macro::TokenStream;

/// Derive `datagrid::Record` for a struct with named fields.
///
/// Each field is exposed under its own name, or under the name given by
/// `#[record(rename = "...")]`. Fields marked `#[record(skip)]` are not
/// exposed. Exposed fields must be `Clone + Into<datagrid::Value>`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    macros::record::expand(input.into()).into()
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse2, parse_quote};

/// Field options parsed from `#[record(...)]`.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}

/// Derive macro for the Record trait.
///
/// Generates a `match` from key to a cloned field converted into a `Value`.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Record)] requires a struct with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "#[derive(Record)] can only be used on structs",
            )
            .to_compile_error();
        }
    };

    let mut arms = Vec::new();
    let mut bounds = Vec::new();
    for field in fields {
        let options = match parse_field_options(&field.attrs) {
            Ok(options) => options,
            Err(e) => return e.to_compile_error(),
        };
        if options.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = options
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        let ty = &field.ty;
        arms.push(quote! {
            #key => ::core::option::Option::Some(
                datagrid::Value::from(::core::clone::Clone::clone(&self.#ident))
            ),
        });
        bounds.push(ty.clone());
    }

    let name = &input.ident;
    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in &bounds {
            where_clause.predicates.push(parse_quote! {
                #ty: ::core::clone::Clone
            });
            where_clause.predicates.push(parse_quote! {
                datagrid::Value: ::core::convert::From<#ty>
            });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics datagrid::Record for #name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::core::option::Option<datagrid::Value> {
                match key {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Meta, Result,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_columns(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Columns` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Columns` may only be derived on structs with named fields.",
        ))?
    };

    let columns = fields
        .named
        .iter()
        .map(ColumnMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();

    for column in &columns {
        if !seen.insert(column.name.value()) {
            Err(Error::new(
                column.name.span(),
                "Column names must be unique.",
            ))?
        }
    }

    let names = columns.iter().map(|c| &c.name);
    let fields = columns.iter().map(|c| &c.field);

    let name = &input.ident;

    let expanded = quote! {
        impl Columns for #name {
            const COLUMNS: &'static [&'static str] = &[#(#names),*];

            fn visit(&self, f: &mut dyn FnMut(&dyn ::core::fmt::Display)) {
                #(f(&self.#fields);)*
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct ColumnMetadata {
    field: Ident,
    name: LitStr,
}

impl ColumnMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(ident) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("column")) else {
            return Ok(None);
        };

        let name = match &attr.meta {
            Meta::Path(_) => LitStr::new(&ident.to_string(), ident.span()),
            Meta::List(list) => list.parse_args::<ColumnAttribute>()?.name,
            Meta::NameValue(_) => Err(Error::new_spanned(
                attr,
                "Expected `#[column]` or `#[column(\"name\")]`.",
            ))?,
        };

        Ok(Some(Self { field: ident, name }))
    }
}

#[derive(Debug)]
struct ColumnAttribute {
    name: LitStr,
}

impl Parse for ColumnAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<LitStr>()?;
        Ok(Self { name })
    }
}

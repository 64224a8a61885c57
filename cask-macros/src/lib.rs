mod column_consts;
mod decode_column;
mod decode_table;

use column_consts::column_consts;
use decode_table::decode_table;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Implements `cask::Table` and declares one `cask::Column` constant per field.
#[proc_macro_derive(Table, attributes(cask))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let table = decode_table(parse_macro_input!(input as ItemStruct));
    let name = &table.item.ident;
    let keyspace = &table.keyspace;
    let table_name = &table.name;
    let columns = column_consts(&table);
    let column_defs = table.columns.iter().map(|c| {
        let column_name = &c.name;
        let column_type = &c.column_type;
        let primary_key = &c.primary_key;
        quote! {
            let table = match table.column(#column_name, #column_type, #primary_key) {
                Ok(v) => v,
                Err(e) => panic!("{:#}", e),
            };
        }
    });
    let views = table.views.iter().map(|(key, indexes)| {
        let view_columns = indexes.iter().map(|i| &table.columns[*i].name);
        quote! {
            let table = match table.view(#key, [#(#view_columns),*]) {
                Ok(v) => v,
                Err(e) => panic!("{:#}", e),
            };
        }
    });
    let row = table.columns.iter().map(|c| {
        let ident = &c.ident;
        quote! {
            (
                #name::#ident,
                ::cask::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)),
            )
        }
    });
    quote! {
        #columns
        impl ::cask::Table for #name {
            fn table_def() -> &'static ::cask::TableDef {
                static TABLE: ::std::sync::LazyLock<::cask::TableDef> =
                    ::std::sync::LazyLock::new(|| {
                        let table = ::cask::TableDef::new(#keyspace, #table_name);
                        #(#column_defs)*
                        #(#views)*
                        table
                    });
                &TABLE
            }

            fn row(&self) -> ::cask::Row {
                vec![#(#row),*]
            }
        }
    }
    .into()
}

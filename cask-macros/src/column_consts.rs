use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::quote;

/// `pub const field: Column` for every field, so that `User::id.eq(..)` reads like the schema.
pub(crate) fn column_consts(table: &TableMetadata) -> TokenStream {
    let struct_name = &table.item.ident;
    let keyspace = &table.keyspace;
    let table_name = &table.name;
    let columns = table.columns.iter().map(|c| {
        let ident = &c.ident;
        let name = &c.name;
        let column_type = &c.column_type;
        quote! {
            #[allow(non_upper_case_globals)]
            pub const #ident: ::cask::Column =
                ::cask::Column::new(#keyspace, #table_name, #name, #column_type);
        }
    });
    quote! {
        impl #struct_name {
            #(#columns)*
        }
    }
}

use cask_core::{ColumnType, PrimaryKeyType, decode_type};
use quote::ToTokens;
use syn::{Field, Ident, LitStr, parse::ParseBuffer};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) column_type: ColumnType,
    pub(crate) primary_key: PrimaryKeyType,
}

pub fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut name = ident.to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut column_type = None;
    let mut primary_key = PrimaryKeyType::None;
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("cask") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `cask`, use it like: `#[cask(attribute = value, ...)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[cask(name = \"my_column\")]`");
                    };
                    name = v.value();
                } else if arg.path.is_ident("type") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `type`, use it like: `#[cask(type = \"ascii\")]`");
                    };
                    match v.value().parse::<ColumnType>() {
                        Ok(v) => column_type = Some(v),
                        Err(e) => panic!("{e:#}"),
                    }
                } else if arg.path.is_ident("partition_key") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `partition_key`, use it like: `#[cask(partition_key)]`");
                    };
                    primary_key = PrimaryKeyType::PartitionKey;
                } else if arg.path.is_ident("clustering_key") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `clustering_key`, use it like: `#[cask(clustering_key)]`");
                    };
                    primary_key = PrimaryKeyType::ClusteringKey;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside cask macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    let column_type = column_type
        .or_else(|| decode_type(&field.ty))
        .unwrap_or_else(|| {
            panic!(
                "Cannot map `{}` to a CQL type, specify it like: `#[cask(type = \"text\")]`",
                field.ty.to_token_stream()
            )
        });
    ColumnMetadata {
        ident,
        name,
        column_type,
        primary_key,
    }
}

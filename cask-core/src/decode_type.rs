use crate::{ColumnType, matches_path};
use syn::{GenericArgument, PathArguments, Type, TypePath, TypeReference, TypeSlice};

/// Column type of a Rust field type, `None` when the type has no CQL counterpart.
///
/// Wrappers (`Option`, `Box`, `Rc`, `Arc`, `Cow`) are transparent, byte slices map to `blob`.
pub fn decode_type(ty: &Type) -> Option<ColumnType> {
    let column_type = 'column_type: {
        match ty {
            Type::Path(TypePath { path, .. }) => {
                if let Some(ident) = path.get_ident() {
                    if ident == "bool" {
                        break 'column_type ColumnType::Boolean;
                    } else if ident == "i8" {
                        break 'column_type ColumnType::TinyInt;
                    } else if ident == "i16" {
                        break 'column_type ColumnType::SmallInt;
                    } else if ident == "i32" {
                        break 'column_type ColumnType::Int;
                    } else if ident == "i64" {
                        break 'column_type ColumnType::BigInt;
                    } else if ident == "i128" {
                        break 'column_type ColumnType::Varint;
                    } else if ident == "f32" {
                        break 'column_type ColumnType::Float;
                    } else if ident == "f64" {
                        break 'column_type ColumnType::Double;
                    } else if ident == "str" {
                        break 'column_type ColumnType::Text;
                    }
                }
                if matches_path(path, &["std", "string", "String"]) {
                    break 'column_type ColumnType::Text;
                } else if matches_path(path, &["rust_decimal", "Decimal"]) {
                    break 'column_type ColumnType::Decimal;
                } else if matches_path(path, &["uuid", "Uuid"]) {
                    break 'column_type ColumnType::Uuid;
                } else if matches_path(path, &["time", "Date"]) {
                    break 'column_type ColumnType::Date;
                } else if matches_path(path, &["time", "Time"]) {
                    break 'column_type ColumnType::Time;
                } else if matches_path(path, &["time", "OffsetDateTime"])
                    || matches_path(path, &["time", "PrimitiveDateTime"])
                {
                    break 'column_type ColumnType::Timestamp;
                } else if matches_path(path, &["std", "net", "IpAddr"]) {
                    break 'column_type ColumnType::Inet;
                } else if matches_path(path, &["std", "time", "Duration"])
                    || matches_path(path, &["time", "Duration"])
                {
                    break 'column_type ColumnType::Duration;
                }
                let is_cow = matches_path(path, &["std", "borrow", "Cow"]);
                let is_wrapper = is_cow
                    || matches_path(path, &["std", "option", "Option"])
                    || matches_path(path, &["std", "boxed", "Box"])
                    || matches_path(path, &["std", "rc", "Rc"])
                    || matches_path(path, &["std", "sync", "Arc"]);
                if !is_wrapper {
                    return None;
                }
                let PathArguments::AngleBracketed(bracketed) = &path.segments.last()?.arguments
                else {
                    return None;
                };
                let inner = bracketed
                    .args
                    .iter()
                    .filter_map(|v| match v {
                        GenericArgument::Type(v) => Some(v),
                        _ => None,
                    })
                    .next()?;
                break 'column_type decode_type(inner)?;
            }
            Type::Reference(TypeReference { elem, .. }) => {
                break 'column_type decode_type(elem)?;
            }
            Type::Slice(TypeSlice { elem, .. }) => {
                match elem.as_ref() {
                    Type::Path(TypePath { path, .. }) if path.is_ident("u8") => {
                        break 'column_type ColumnType::Blob;
                    }
                    _ => return None,
                }
            }
            _ => return None,
        }
    };
    Some(column_type)
}

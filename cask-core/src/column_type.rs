use crate::{Error, Result, Value};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Declared scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    Ascii,
    Text,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Varint,
    Counter,
    Float,
    Double,
    Decimal,
    Blob,
    Date,
    Time,
    Timestamp,
    Uuid,
    TimeUuid,
    Inet,
    Duration,
}

/// Field group of the secondary cache schema a column is exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheFieldType {
    Text,
    Numeric,
    Tag,
}

impl ColumnType {
    pub fn cql_name(&self) -> &'static str {
        match self {
            ColumnType::Ascii => "ascii",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::TinyInt => "tinyint",
            ColumnType::SmallInt => "smallint",
            ColumnType::Int => "int",
            ColumnType::BigInt => "bigint",
            ColumnType::Varint => "varint",
            ColumnType::Counter => "counter",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Decimal => "decimal",
            ColumnType::Blob => "blob",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Uuid => "uuid",
            ColumnType::TimeUuid => "timeuuid",
            ColumnType::Inet => "inet",
            ColumnType::Duration => "duration",
        }
    }

    /// Typed NULL of this column type.
    pub fn empty_value(&self) -> Value {
        match self {
            ColumnType::Ascii => Value::Ascii(None),
            ColumnType::Text => Value::Text(None),
            ColumnType::Boolean => Value::Boolean(None),
            ColumnType::TinyInt => Value::TinyInt(None),
            ColumnType::SmallInt => Value::SmallInt(None),
            ColumnType::Int => Value::Int(None),
            ColumnType::BigInt => Value::BigInt(None),
            ColumnType::Varint => Value::Varint(None),
            ColumnType::Counter => Value::Counter(None),
            ColumnType::Float => Value::Float(None),
            ColumnType::Double => Value::Double(None),
            ColumnType::Decimal => Value::Decimal(None),
            ColumnType::Blob => Value::Blob(None),
            ColumnType::Date => Value::Date(None),
            ColumnType::Time => Value::Time(None),
            ColumnType::Timestamp => Value::Timestamp(None),
            ColumnType::Uuid => Value::Uuid(None),
            ColumnType::TimeUuid => Value::TimeUuid(None),
            ColumnType::Inet => Value::Inet(None),
            ColumnType::Duration => Value::Duration(None),
        }
    }

    /// Inclusive range of integer columns.
    pub fn integer_bounds(&self) -> Option<(i128, i128)> {
        Some(match self {
            ColumnType::TinyInt => (i8::MIN as _, i8::MAX as _),
            ColumnType::SmallInt => (i16::MIN as _, i16::MAX as _),
            ColumnType::Int => (i32::MIN as _, i32::MAX as _),
            ColumnType::BigInt | ColumnType::Counter => (i64::MIN as _, i64::MAX as _),
            ColumnType::Varint => (i128::MIN, i128::MAX),
            _ => return None,
        })
    }

    /// Convert `value` into the representation this column binds, `None` when incompatible.
    ///
    /// Integers are accepted by any integer column whose range contains them, text by ascii
    /// columns when it is pure ASCII, version 1 uuids by timeuuid columns and floats by double
    /// columns. NULL is always accepted.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        if matches!(value, Value::Null) {
            return Some(Value::Null);
        }
        let found = value.column_type()?;
        if found == *self {
            return Some(value);
        }
        if let Some((min, max)) = self.integer_bounds() {
            found.integer_bounds()?;
            let Some(v) = value.as_i128() else {
                return Some(self.empty_value());
            };
            if v < min || v > max {
                return None;
            }
            return Some(match self {
                ColumnType::TinyInt => Value::TinyInt(Some(v as _)),
                ColumnType::SmallInt => Value::SmallInt(Some(v as _)),
                ColumnType::Int => Value::Int(Some(v as _)),
                ColumnType::BigInt => Value::BigInt(Some(v as _)),
                ColumnType::Counter => Value::Counter(Some(v as _)),
                _ => Value::Varint(Some(v)),
            });
        }
        match (self, value) {
            (ColumnType::Text, Value::Ascii(v)) => Some(Value::Text(v)),
            (ColumnType::Ascii, Value::Text(v)) if v.as_ref().is_none_or(|v| v.is_ascii()) => {
                Some(Value::Ascii(v))
            }
            (ColumnType::Double, Value::Float(v)) => Some(Value::Double(v.map(f64::from))),
            (ColumnType::Uuid, Value::TimeUuid(v)) => Some(Value::Uuid(v)),
            (ColumnType::TimeUuid, Value::Uuid(v)) if v.is_none_or(|v| v.get_version_num() == 1) => {
                Some(Value::TimeUuid(v))
            }
            _ => None,
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.coerce(value.clone()).is_some()
    }

    pub fn cache_field_type(&self) -> CacheFieldType {
        match self {
            ColumnType::Ascii | ColumnType::Text => CacheFieldType::Text,
            ColumnType::TinyInt
            | ColumnType::SmallInt
            | ColumnType::Int
            | ColumnType::BigInt
            | ColumnType::Varint
            | ColumnType::Counter
            | ColumnType::Float
            | ColumnType::Double
            | ColumnType::Decimal
            | ColumnType::Date
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::Duration => CacheFieldType::Numeric,
            ColumnType::Boolean
            | ColumnType::Blob
            | ColumnType::Uuid
            | ColumnType::TimeUuid
            | ColumnType::Inet => CacheFieldType::Tag,
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.cql_name())
    }
}

impl FromStr for ColumnType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => ColumnType::Ascii,
            "text" | "varchar" => ColumnType::Text,
            "boolean" => ColumnType::Boolean,
            "tinyint" => ColumnType::TinyInt,
            "smallint" => ColumnType::SmallInt,
            "int" => ColumnType::Int,
            "bigint" => ColumnType::BigInt,
            "varint" => ColumnType::Varint,
            "counter" => ColumnType::Counter,
            "float" => ColumnType::Float,
            "double" => ColumnType::Double,
            "decimal" => ColumnType::Decimal,
            "blob" => ColumnType::Blob,
            "date" => ColumnType::Date,
            "time" => ColumnType::Time,
            "timestamp" => ColumnType::Timestamp,
            "uuid" => ColumnType::Uuid,
            "timeuuid" => ColumnType::TimeUuid,
            "inet" => ColumnType::Inet,
            "duration" => ColumnType::Duration,
            _ => return Err(Error::msg(format!("Unknown column type `{s}`"))),
        })
    }
}

impl ToTokens for ColumnType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        use ColumnType::*;
        tokens.append_all(match self {
            Ascii => quote!(::cask::ColumnType::Ascii),
            Text => quote!(::cask::ColumnType::Text),
            Boolean => quote!(::cask::ColumnType::Boolean),
            TinyInt => quote!(::cask::ColumnType::TinyInt),
            SmallInt => quote!(::cask::ColumnType::SmallInt),
            Int => quote!(::cask::ColumnType::Int),
            BigInt => quote!(::cask::ColumnType::BigInt),
            Varint => quote!(::cask::ColumnType::Varint),
            Counter => quote!(::cask::ColumnType::Counter),
            Float => quote!(::cask::ColumnType::Float),
            Double => quote!(::cask::ColumnType::Double),
            Decimal => quote!(::cask::ColumnType::Decimal),
            Blob => quote!(::cask::ColumnType::Blob),
            Date => quote!(::cask::ColumnType::Date),
            Time => quote!(::cask::ColumnType::Time),
            Timestamp => quote!(::cask::ColumnType::Timestamp),
            Uuid => quote!(::cask::ColumnType::Uuid),
            TimeUuid => quote!(::cask::ColumnType::TimeUuid),
            Inet => quote!(::cask::ColumnType::Inet),
            Duration => quote!(::cask::ColumnType::Duration),
        });
    }
}

impl Display for CacheFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CacheFieldType::Text => "TEXT",
            CacheFieldType::Numeric => "NUMERIC",
            CacheFieldType::Tag => "TAG",
        })
    }
}

use crate::{ColumnType, CqlWriter, DefaultCqlWriter, writer::Context};
use rust_decimal::Decimal;
use std::{
    fmt::{self, Display, Formatter},
    net::IpAddr,
};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

/// Dynamically typed CQL value, used for bound parameters.
///
/// The payload is optional: `Value::Int(None)` is a typed NULL, `Value::Null` is an untyped one.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    TinyInt(Option<i8>),
    SmallInt(Option<i16>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Varint(Option<i128>),
    Counter(Option<i64>),
    Float(Option<f32>),
    Double(Option<f64>),
    Decimal(Option<Decimal>),
    Ascii(Option<String>),
    Text(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    TimeUuid(Option<Uuid>),
    Inet(Option<IpAddr>),
    Duration(Option<time::Duration>),
    /// Values bound to an `IN` predicate.
    List(Option<Vec<Value>>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::TinyInt(v) => v.is_none(),
            Value::SmallInt(v) => v.is_none(),
            Value::Int(v) => v.is_none(),
            Value::BigInt(v) | Value::Counter(v) => v.is_none(),
            Value::Varint(v) => v.is_none(),
            Value::Float(v) => v.is_none(),
            Value::Double(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Ascii(v) | Value::Text(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::Uuid(v) | Value::TimeUuid(v) => v.is_none(),
            Value::Inet(v) => v.is_none(),
            Value::Duration(v) => v.is_none(),
            Value::List(v) => v.is_none(),
        }
    }

    /// Scalar type of the value, `None` for untyped NULL and lists.
    pub fn column_type(&self) -> Option<ColumnType> {
        Some(match self {
            Value::Null | Value::List(..) => return None,
            Value::Boolean(..) => ColumnType::Boolean,
            Value::TinyInt(..) => ColumnType::TinyInt,
            Value::SmallInt(..) => ColumnType::SmallInt,
            Value::Int(..) => ColumnType::Int,
            Value::BigInt(..) => ColumnType::BigInt,
            Value::Varint(..) => ColumnType::Varint,
            Value::Counter(..) => ColumnType::Counter,
            Value::Float(..) => ColumnType::Float,
            Value::Double(..) => ColumnType::Double,
            Value::Decimal(..) => ColumnType::Decimal,
            Value::Ascii(..) => ColumnType::Ascii,
            Value::Text(..) => ColumnType::Text,
            Value::Blob(..) => ColumnType::Blob,
            Value::Date(..) => ColumnType::Date,
            Value::Time(..) => ColumnType::Time,
            Value::Timestamp(..) => ColumnType::Timestamp,
            Value::Uuid(..) => ColumnType::Uuid,
            Value::TimeUuid(..) => ColumnType::TimeUuid,
            Value::Inet(..) => ColumnType::Inet,
            Value::Duration(..) => ColumnType::Duration,
        })
    }

    /// Integer payload widened to `i128`, if the value is a non null integer.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::TinyInt(Some(v)) => Some(*v as _),
            Value::SmallInt(Some(v)) => Some(*v as _),
            Value::Int(Some(v)) => Some(*v as _),
            Value::BigInt(Some(v)) | Value::Counter(Some(v)) => Some(*v as _),
            Value::Varint(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Human readable type, used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::List(Some(values)) => match values.iter().find_map(Value::column_type) {
                Some(inner) => format!("list<{inner}>"),
                None => "list".into(),
            },
            Value::List(None) => "list".into(),
            v => v
                .column_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".into()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        DefaultCqlWriter.write_value(&mut Context::default(), &mut out, self);
        f.write_str(&out)
    }
}

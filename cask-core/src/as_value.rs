use crate::Value;
use rust_decimal::Decimal;
use std::{borrow::Cow, net::IpAddr, rc::Rc, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion of native Rust types into the dynamically typed [`Value`] bound as a parameter.
///
/// # Implementing `AsValue` for custom types
/// Newtypes usually forward to the wrapped type:
/// ```rust
/// use cask_core::{AsValue, Value};
/// struct Email(String);
/// impl AsValue for Email {
///     fn as_empty_value() -> Value {
///         String::as_empty_value()
///     }
///     fn as_value(self) -> Value {
///         self.0.as_value()
///     }
/// }
/// assert_eq!(Email("a@b.c".into()).as_value(), Value::Text(Some("a@b.c".into())));
/// ```
pub trait AsValue {
    /// Typed NULL for this type, used for absent optional data.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
        }
    };
}
impl_as_value!(bool, Value::Boolean);
impl_as_value!(i8, Value::TinyInt);
impl_as_value!(i16, Value::SmallInt);
impl_as_value!(i32, Value::Int);
impl_as_value!(i64, Value::BigInt);
impl_as_value!(i128, Value::Varint);
impl_as_value!(f32, Value::Float);
impl_as_value!(f64, Value::Double);
impl_as_value!(Decimal, Value::Decimal);
impl_as_value!(String, Value::Text);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(OffsetDateTime, Value::Timestamp);
impl_as_value!(Uuid, Value::Uuid);
impl_as_value!(IpAddr, Value::Inet);
impl_as_value!(time::Duration, Value::Duration);

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Text(None)
    }
    fn as_value(self) -> Value {
        Value::Text(Some(self.into()))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_empty_value() -> Value {
        Value::Text(None)
    }
    fn as_value(self) -> Value {
        Value::Text(Some(self.into_owned()))
    }
}

impl AsValue for &[u8] {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into()))
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    /// Timestamps without offset are considered UTC.
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self.assume_utc()))
    }
}

impl AsValue for std::time::Duration {
    fn as_empty_value() -> Value {
        Value::Duration(None)
    }
    fn as_value(self) -> Value {
        Value::Duration(time::Duration::try_from(self).ok())
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None)
    }
    fn as_value(self) -> Value {
        Value::List(Some(self.into_iter().map(AsValue::as_value).collect()))
    }
}

impl<T: AsValue, const N: usize> AsValue for [T; N] {
    fn as_empty_value() -> Value {
        Value::List(None)
    }
    fn as_value(self) -> Value {
        Value::List(Some(self.into_iter().map(AsValue::as_value).collect()))
    }
}

macro_rules! impl_as_value_wrapper {
    ($wrapper:ident) => {
        impl<T: AsValue + Clone> AsValue for $wrapper<T> {
            fn as_empty_value() -> Value {
                T::as_empty_value()
            }
            fn as_value(self) -> Value {
                (*self).clone().as_value()
            }
        }
    };
}
impl_as_value_wrapper!(Box);
impl_as_value_wrapper!(Rc);
impl_as_value_wrapper!(Arc);

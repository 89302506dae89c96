//! Coercion of dynamic [`Value`]s into statically typed fields.
//!
//! Rules, first success wins:
//!
//! 1. Timestamp fields accept a timestamp as-is, or text in RFC 3339 form.
//!    Unparseable text falls through to the remaining rules.
//! 2. Direct conversion following ordinary numeric and textual
//!    representation rules. Integers never truncate: an out-of-range value is
//!    a conversion error.
//! 3. `Option<T>` and `Box<T>` fields dereference a [`Value::Ref`] source or
//!    convert the value itself into a fresh `T`.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use uuid::Uuid;

use crate::{error::ConversionError, value::Value};

/// A type a record value can be coerced into.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ConversionError>;

    /// Name reported as the target type in conversion errors.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

fn mismatch<T: FromValue>(value: &Value) -> ConversionError {
    ConversionError::new(value.type_name(), T::type_name())
}

/// Parses the single date-time text format used for timestamps.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Timestamp(ts) => Ok(*ts),
            Value::Text(text) => parse_timestamp(text).ok_or_else(|| mismatch::<Self>(value)),
            _ => Err(mismatch::<Self>(value)),
        }
    }

    fn type_name() -> &'static str {
        "DateTime<FixedOffset>"
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        DateTime::<FixedOffset>::from_value(value)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| mismatch::<Self>(value))
    }

    fn type_name() -> &'static str {
        "DateTime<Utc>"
    }
}

macro_rules! integer_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    let converted = match value {
                        Value::Int(i) => <$ty>::try_from(*i).ok(),
                        Value::UInt(u) => <$ty>::try_from(*u).ok(),
                        Value::Float(f) => integral_float(*f).and_then(|i| <$ty>::try_from(i).ok()),
                        Value::Decimal(d) if d.fract().is_zero() => d.to_i128().and_then(|i| <$ty>::try_from(i).ok()),
                        _ => None,
                    };
                    converted.ok_or_else(|| mismatch::<Self>(value))
                }

                fn type_name() -> &'static str {
                    stringify!($ty)
                }
            }
        )*
    };
}

integer_from_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn integral_float(value: f64) -> Option<i128> {
    // i128 covers every f64 that can land in a 64-bit integer.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1.7e38 {
        Some(value as i128)
    } else {
        None
    }
}

macro_rules! float_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(i) => Ok(*i as $ty),
                        Value::UInt(u) => Ok(*u as $ty),
                        Value::Float(f) => Ok(*f as $ty),
                        Value::Decimal(d) => d
                            .to_f64()
                            .map(|f| f as $ty)
                            .ok_or_else(|| mismatch::<Self>(value)),
                        _ => Err(mismatch::<Self>(value)),
                    }
                }

                fn type_name() -> &'static str {
                    stringify!($ty)
                }
            }
        )*
    };
}

float_from_value!(f32, f64);

impl FromValue for Decimal {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let converted = match value {
            Value::Decimal(d) => Some(*d),
            Value::Int(i) => Some(Decimal::from(*i)),
            Value::UInt(u) => Some(Decimal::from(*u)),
            Value::Float(f) => Decimal::from_f64_retain(*f),
            _ => None,
        };
        converted.ok_or_else(|| mismatch::<Self>(value))
    }

    fn type_name() -> &'static str {
        "Decimal"
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch::<Self>(value)),
        }
    }

    fn type_name() -> &'static str {
        "bool"
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Bytes(bytes) => {
                String::from_utf8(bytes.clone()).map_err(|_| mismatch::<Self>(value))
            }
            _ => Err(mismatch::<Self>(value)),
        }
    }

    fn type_name() -> &'static str {
        "String"
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            Value::Text(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(mismatch::<Self>(value)),
        }
    }

    fn type_name() -> &'static str {
        "Vec<u8>"
    }
}

impl FromValue for Uuid {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Guid(g) => Ok(*g),
            _ => Err(mismatch::<Self>(value)),
        }
    }

    fn type_name() -> &'static str {
        "Uuid"
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }

    fn type_name() -> &'static str {
        "Value"
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Ref(inner) if inner.is_null() => Ok(None),
            Value::Ref(inner) => T::from_value(inner).map(Some),
            other => T::from_value(other).map(Some),
        }
        .map_err(|err| ConversionError::new(value.type_name(), err.target_type))
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Ref(inner) => T::from_value(inner).map(Box::new),
            other => T::from_value(other).map(Box::new),
        }
        .map_err(|err| ConversionError::new(value.type_name(), err.target_type))
    }
}

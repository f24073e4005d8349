//! Borrowed field values.
//!
//! Accessors hand back a [`Value`] for a named field. For JSON records the
//! conversion is [`Value::from_json`]; arrays, objects and `null` become
//! [`Value::None`] since nothing filters or sorts on them.

use std::cmp::Ordering;

/// A scalar borrowed from a record, or the absence of one.
///
/// ```
/// use appdir_seeker::{Number, Value};
///
/// struct Listing {
///     name: String,
///     chain_id: u64,
/// }
///
/// fn accessor<'a>(listing: &'a Listing, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&listing.name),
///         "chainId" => Value::Number(Number::U64(listing.chain_id)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    Bool(bool),
    None,
}

impl<'a> Value<'a> {
    pub fn from_json(json: &'a serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::String(s) => Value::String(s),
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Number::from_json(n).map_or(Value::None, Value::Number),
            Json::Null | Json::Array(_) | Json::Object(_) => Value::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_number(&self) -> Option<Number> {
        if let Value::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }
}

/// A JSON number in the most exact form that holds it.
///
/// Block heights and chain ids stay integers so they never lose precision
/// through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    U64(u64),
    I64(i64),
    F64(f64),
}

impl Number {
    pub fn from_json(n: &serde_json::Number) -> Option<Self> {
        n.as_u64()
            .map(Number::U64)
            .or_else(|| n.as_i64().map(Number::I64))
            .or_else(|| n.as_f64().map(Number::F64))
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::U64(n) => n as f64,
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Numeric order across representations. `None` means a NaN was involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        use Number::*;

        match (self, other) {
            (U64(a), U64(b)) => Some(a.cmp(&b)),
            (I64(a), I64(b)) => Some(a.cmp(&b)),
            (U64(a), I64(b)) => Some(match u64::try_from(b) {
                Ok(b) => a.cmp(&b),
                Err(_) => Ordering::Greater,
            }),
            (I64(_), U64(_)) => other.compare(self).map(Ordering::reverse),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n.into())
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n.into())
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

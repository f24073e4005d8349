//! Equality predicates over record fields.

use crate::value::{Number, Value};

/// Keeps records whose `field` equals `expected`.
///
/// Equality is kind-sensitive: the string `"10"` never equals the number
/// `10`, and a missing field equals nothing. Numbers compare by value
/// across integer and float representations.
///
/// ```
/// use appdir_seeker::{Clause, Number, Value};
///
/// let on_optimism = Clause::eq("chainId", 10u64);
/// assert!(on_optimism.matches(&Value::Number(Number::F64(10.0))));
/// assert!(!on_optimism.matches(&Value::String("10")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub field: String,
    pub expected: ClauseValue,
}

impl Clause {
    pub fn eq(field: impl Into<String>, expected: impl Into<ClauseValue>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn matches(&self, actual: &Value<'_>) -> bool {
        match (&self.expected, actual) {
            (ClauseValue::Number(want), Value::Number(got)) => got.compare(*want).is_some_and(|o| o.is_eq()),
            (ClauseValue::String(want), Value::String(got)) => want == got,
            (ClauseValue::Bool(want), Value::Bool(got)) => want == got,
            _ => false,
        }
    }
}

/// The owned right-hand side of a [`Clause`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    String(String),
    Number(Number),
    Bool(bool),
}

macro_rules! clause_value_from {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for ClauseValue {
                fn from(v: $ty) -> Self {
                    ClauseValue::$variant($conv(v))
                }
            }
        )*
    };
}

clause_value_from! {
    String => String(std::convert::identity),
    &str => String(str::to_owned),
    bool => Bool(std::convert::identity),
    Number => Number(std::convert::identity),
    u64 => Number(Number::U64),
    i64 => Number(Number::I64),
    f64 => Number(Number::F64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_match_by_value() {
        let clause = Clause::eq("chainId", 10u64);
        assert!(clause.matches(&Value::Number(Number::U64(10))));
        assert!(clause.matches(&Value::Number(Number::I64(10))));
        assert!(clause.matches(&Value::Number(Number::F64(10.0))));
        assert!(!clause.matches(&Value::Number(Number::U64(1))));
    }

    #[test]
    fn kinds_never_cross() {
        assert!(!Clause::eq("chainId", 10u64).matches(&Value::String("10")));
        assert!(!Clause::eq("name", "true").matches(&Value::Bool(true)));
        assert!(!Clause::eq("flag", true).matches(&Value::Number(Number::U64(1))));
    }

    #[test]
    fn missing_field_matches_nothing() {
        assert!(!Clause::eq("chainId", 1u64).matches(&Value::None));
    }

    #[test]
    fn strings_are_case_sensitive() {
        let clause = Clause::eq("applicationRef", String::from("1:0xA:0"));
        assert!(clause.matches(&Value::String("1:0xA:0")));
        assert!(!clause.matches(&Value::String("1:0xa:0")));
    }

    #[test]
    fn nan_matches_nothing() {
        let clause = Clause::eq("score", f64::NAN);
        assert!(!clause.matches(&Value::Number(Number::F64(f64::NAN))));
    }
}

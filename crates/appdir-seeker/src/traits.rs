//! Field access for queryable records.

use crate::value::Value;

/// Trait for types that can be queried by field name.
///
/// # Example
///
/// ```
/// use appdir_seeker::{Number, Query, Seekable, Value};
///
/// struct Round {
///     chain_id: u64,
/// }
///
/// impl Seekable for Round {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "chainId" => Value::Number(Number::U64(self.chain_id)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let rounds = vec![Round { chain_id: 1 }, Round { chain_id: 10 }];
/// let query = Query::new().and_eq("chainId", 10u64);
/// assert_eq!(query.arrange(&rounds, Round::accessor).len(), 1);
/// ```
pub trait Seekable {
    /// Returns the value of a field for comparison.
    ///
    /// Unknown fields return [`Value::None`].
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Returns an accessor function suitable for [`crate::Query::arrange`].
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(field)
    }
}

impl Seekable for serde_json::Map<String, serde_json::Value> {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, Value::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn json_object_fields() {
        let record = json!({ "chainId": 10, "name": "Gitcoin" });
        let record = record.as_object().unwrap();

        assert_eq!(
            record.seeker_field_value("chainId"),
            Value::Number(Number::U64(10))
        );
        assert_eq!(record.seeker_field_value("name"), Value::String("Gitcoin"));
        assert!(record.seeker_field_value("missing").is_none());
    }
}

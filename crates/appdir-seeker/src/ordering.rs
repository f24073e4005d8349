//! Sort keys and direction.
//!
//! Sorting is always stable: [`compare_by_orderings`] reports `Equal` for
//! tied keys and the caller sorts with `sort_by`, so ties keep their
//! snapshot positions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Which way a sort key runs. Serialized as `"asc"` / `"desc"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Orients a natural-order comparison; `Desc` negates it.
    pub fn apply(self, natural: Ordering) -> Ordering {
        if self == Dir::Desc {
            natural.reverse()
        } else {
            natural
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key: a field name and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Desc)
    }

    /// Oriented comparison of two values of this key's field.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        compare_values(a, b).map(|natural| self.dir.apply(natural))
    }
}

/// Natural order between two field values.
///
/// Absent values sort after present ones. Values of different kinds, or a
/// NaN, have no order and yield `None`.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    use Value::*;

    match (a, b) {
        (None, None) => Some(Ordering::Equal),
        (None, _) => Some(Ordering::Greater),
        (_, None) => Some(Ordering::Less),
        (Number(x), Number(y)) => x.compare(*y),
        (String(x), String(y)) => Some(x.cmp(y)),
        (Bool(x), Bool(y)) => Some(x.cmp(y)),
        _ => Option::None,
    }
}

/// Lexicographic comparison over several sort keys.
///
/// Later keys only break ties left by earlier ones. A key whose values
/// cannot be ordered is skipped.
pub fn compare_by_orderings<T, F>(a: &T, b: &T, orderings: &[OrderBy], accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    orderings
        .iter()
        .filter_map(|key| key.compare(&accessor(a, &key.field), &accessor(b, &key.field)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

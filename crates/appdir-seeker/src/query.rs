//! Query builder and executor.
//!
//! A [`Query`] runs the shaping pipeline over a borrowed snapshot:
//! filter first, then order, then (optionally) slice one page. The snapshot
//! itself is never modified.

use std::num::NonZeroUsize;

use crate::clause::{Clause, ClauseValue};
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::paginate::{paginate, Page};
use crate::shuffle::shuffle_in_place;
use crate::value::Value;

/// How matching items are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Keep the order of the snapshot.
    #[default]
    Snapshot,
    /// Stable sort by one or more fields.
    Fields(Vec<OrderBy>),
    /// Seeded pseudo-random permutation.
    Shuffle(u64),
}

/// A query for filtering and ordering collections.
///
/// All clauses must match for an item to be kept. Field ordering and the
/// seeded shuffle are mutually exclusive; whichever was configured last wins.
///
/// # Example
///
/// ```
/// use appdir_seeker::{Query, Value, Number};
/// use serde_json::json;
///
/// let snapshot = vec![
///     json!({ "applicationRef": "1:0xa:0", "chainId": 1, "createdAtBlock": 30 }),
///     json!({ "applicationRef": "10:0xb:0", "chainId": 10, "createdAtBlock": 20 }),
///     json!({ "applicationRef": "10:0xb:1", "chainId": 10, "createdAtBlock": 10 }),
/// ];
///
/// fn accessor<'a>(record: &'a serde_json::Value, field: &str) -> Value<'a> {
///     record.get(field).map_or(Value::None, Value::from_json)
/// }
///
/// let query = Query::new()
///     .and_eq("chainId", 10u64)
///     .order_asc("createdAtBlock");
///
/// let results = query.arrange(&snapshot, accessor);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0]["applicationRef"], "10:0xb:1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    clauses: Vec<Clause>,
    arrangement: Arrangement,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items and keeps snapshot order.
    pub fn new() -> Self {
        Query::default()
    }

    /// Adds a clause. All clauses must match for an item to be kept.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Shorthand for `and(Clause::eq(field, value))`.
    pub fn and_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(Clause::eq(field, value))
    }

    /// Adds a field ordering, appending to any existing field orderings.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        match &mut self.arrangement {
            Arrangement::Fields(orderings) => orderings.push(OrderBy::new(field, dir)),
            other => *other = Arrangement::Fields(vec![OrderBy::new(field, dir)]),
        }
        self
    }

    /// Adds an ascending ordering clause.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Adds a descending ordering clause.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Replaces any ordering with a seeded shuffle.
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.arrangement = Arrangement::Shuffle(seed);
        self
    }

    /// Returns the clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the configured arrangement.
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Returns `true` if this query has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Tests if a single item matches every clause.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.clauses
            .iter()
            .all(|clause| clause.matches(&accessor(item, &clause.field)))
    }

    /// Filters then orders a slice, returning references to matching items.
    pub fn arrange<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let mut results: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect();

        match &self.arrangement {
            Arrangement::Snapshot => {}
            // `sort_by` is stable: ties keep snapshot order.
            Arrangement::Fields(orderings) => {
                results.sort_by(|a, b| compare_by_orderings(*a, *b, orderings, &accessor))
            }
            Arrangement::Shuffle(seed) => shuffle_in_place(&mut results, *seed),
        }

        results
    }

    /// Filters, orders and clones matching items.
    pub fn arrange_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.arrange(items, accessor).into_iter().cloned().collect()
    }

    /// Filters, orders, then slices out one page.
    ///
    /// Page counts are taken from the filtered item count.
    pub fn page<T, F>(&self, items: &[T], accessor: F, page: usize, page_size: NonZeroUsize) -> Page<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let arranged = self.arrange(items, accessor);
        let page = paginate(&arranged, page, page_size);
        Page {
            items: page.items.into_iter().cloned().collect(),
            pagination: page.pagination,
        }
    }

    /// Counts the number of matching items.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[derive(Debug, Clone, PartialEq)]
    struct Listing {
        name: &'static str,
        chain_id: u64,
        block: u64,
    }

    fn accessor<'a>(listing: &'a Listing, field: &str) -> Value<'a> {
        match field {
            "name" => Value::String(listing.name),
            "chainId" => Value::Number(Number::U64(listing.chain_id)),
            "createdAtBlock" => Value::Number(Number::U64(listing.block)),
            _ => Value::None,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            Listing { name: "A", chain_id: 1, block: 30 },
            Listing { name: "B", chain_id: 10, block: 10 },
            Listing { name: "C", chain_id: 10, block: 30 },
            Listing { name: "D", chain_id: 1, block: 10 },
            Listing { name: "E", chain_id: 10, block: 20 },
        ]
    }

    fn names(results: &[&Listing]) -> Vec<&'static str> {
        results.iter().map(|l| l.name).collect()
    }

    #[test]
    fn empty_query_keeps_snapshot_order() {
        let items = sample();
        let results = Query::new().arrange(&items, accessor);
        assert_eq!(names(&results), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn filter_by_chain() {
        let items = sample();
        let results = Query::new().and_eq("chainId", 10u64).arrange(&items, accessor);
        assert_eq!(names(&results), vec!["B", "C", "E"]);
    }

    #[test]
    fn stable_sort_keeps_ties_in_snapshot_order() {
        let items = sample();
        let results = Query::new().order_asc("createdAtBlock").arrange(&items, accessor);
        assert_eq!(names(&results), vec!["B", "D", "E", "A", "C"]);

        let results = Query::new().order_desc("createdAtBlock").arrange(&items, accessor);
        assert_eq!(names(&results), vec!["A", "C", "E", "B", "D"]);
    }

    #[test]
    fn filter_then_sort() {
        let items = sample();
        let results = Query::new()
            .and_eq("chainId", 1u64)
            .order_asc("createdAtBlock")
            .arrange(&items, accessor);
        assert_eq!(names(&results), vec!["D", "A"]);
    }

    #[test]
    fn shuffle_is_reproducible() {
        let items = sample();
        let query = Query::new().shuffled(42);
        let first = names(&query.arrange(&items, accessor));
        for _ in 0..10 {
            assert_eq!(names(&query.arrange(&items, accessor)), first);
        }
    }

    #[test]
    fn shuffle_replaces_field_ordering() {
        let query = Query::new().order_asc("createdAtBlock").shuffled(3);
        assert_eq!(query.arrangement(), &Arrangement::Shuffle(3));

        let query = query.order_desc("createdAtBlock");
        assert_eq!(
            query.arrangement(),
            &Arrangement::Fields(vec![OrderBy::desc("createdAtBlock")])
        );
    }

    #[test]
    fn page_counts_filtered_items() {
        let items = sample();
        let size = NonZeroUsize::new(2).unwrap();
        let page = Query::new()
            .and_eq("chainId", 10u64)
            .page(&items, accessor, 1, size);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "E");
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn count_and_is_empty() {
        let items = sample();
        assert!(Query::new().is_empty());

        let query = Query::new().and_eq("chainId", 1u64);
        assert!(!query.is_empty());
        assert_eq!(query.count(&items, accessor), 2);
        assert_eq!(query.clauses().len(), 1);
    }

    #[test]
    fn arrange_cloned_does_not_touch_input() {
        let items = sample();
        let before = items.clone();
        let results = Query::new().shuffled(9).arrange_cloned(&items, accessor);
        assert_eq!(results.len(), items.len());
        assert_eq!(items, before);
    }
}

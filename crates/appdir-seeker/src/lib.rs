//! Seeker - client-side shaping of record snapshots.
//!
//! The remote directory service only knows how to return everything, so
//! every listing is shaped locally. This crate holds that shaping pipeline,
//! independent of any transport:
//!
//! - Field access through the [`Seekable`] trait or a plain accessor function
//! - Equality clauses, all of which must match
//! - Stable multi-field ordering, ascending or descending
//! - A seeded, reproducible shuffle
//! - Page slicing with page-count metadata
//!
//! # Quick Start
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use appdir_seeker::{Query, Seekable};
//! use serde_json::{json, Map, Value};
//!
//! let snapshot: Vec<Map<String, Value>> = vec![
//!     json!({ "applicationRef": "1:0xa:0", "chainId": 1, "contributorCount": 4 }),
//!     json!({ "applicationRef": "10:0xb:0", "chainId": 10, "contributorCount": 9 }),
//!     json!({ "applicationRef": "10:0xb:1", "chainId": 10, "contributorCount": 2 }),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let page = Query::new()
//!     .and_eq("chainId", 10u64)
//!     .order_desc("contributorCount")
//!     .page(&snapshot, Map::<String, Value>::accessor, 0, NonZeroUsize::new(1).unwrap());
//!
//! assert_eq!(page.items[0]["applicationRef"], "10:0xb:0");
//! assert_eq!(page.pagination.total_items, 2);
//! assert_eq!(page.pagination.total_pages, 2);
//! ```
//!
//! # Pipeline Semantics
//!
//! ```text
//! snapshot ─▶ keep items matching every clause
//!          ─▶ order (snapshot order | stable field sort | seeded shuffle)
//!          ─▶ slice [page * size, (page + 1) * size)
//! ```
//!
//! Page counts come from the filtered count. A page past the end yields an
//! empty slice, never an error.

mod clause;
mod ordering;
mod paginate;
mod query;
mod shuffle;
mod traits;
mod value;

pub use clause::{Clause, ClauseValue};
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use paginate::{paginate, Page, Pagination};
pub use query::{Arrangement, Query};
pub use shuffle::{shuffle, shuffle_in_place};
pub use traits::Seekable;
pub use value::{Number, Value};

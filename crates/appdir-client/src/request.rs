//! Query requests and their results.
//!
//! Requests are closed sum types tagged by `type`, matching the JSON the
//! surrounding applications send:
//!
//! ```json
//! { "type": "applications-paginated", "page": 0,
//!   "filter": { "type": "chain", "chainId": 10 },
//!   "order": { "type": "createdAtBlock", "direction": "desc" } }
//! ```

use appdir_seeker::{Dir, Pagination, Query};
use serde::{Deserialize, Serialize};

use crate::model::{ApplicationRef, ApplicationSummary, SearchResult, CHAIN_ID_FIELD};

/// A query against the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QueryRequest {
    /// Free-text search, optionally paged.
    #[serde(rename_all = "camelCase")]
    ApplicationsSearch {
        query_string: String,
        #[serde(default)]
        page: usize,
    },
    /// Explicit lookup by reference.
    ApplicationsByRefs { refs: Vec<ApplicationRef> },
    /// Filtered, ordered, paged listing.
    ApplicationsPaginated {
        #[serde(default)]
        page: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Filter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<Order>,
    },
}

/// Predicate applied to a listing before ordering and paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    /// Keep applications on one chain.
    #[serde(rename_all = "camelCase")]
    Chain { chain_id: u64 },
}

impl Filter {
    /// Adds this filter's clauses to a query.
    pub fn apply(self, query: Query) -> Query {
        match self {
            Filter::Chain { chain_id } => query.and_eq(CHAIN_ID_FIELD, chain_id),
        }
    }
}

/// Numeric summary fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAtBlock,
    ContributorCount,
}

impl SortField {
    /// Name of the summary field.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAtBlock => "createdAtBlock",
            SortField::ContributorCount => "contributorCount",
        }
    }
}

/// Integer seed for a random ordering.
///
/// Any JSON integer is accepted. Negative seeds drive the generator with
/// their two's-complement bits and serialize back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Unsigned(u64),
    Signed(i64),
}

impl Seed {
    /// The 64 bits handed to the shuffle generator.
    pub fn to_bits(self) -> u64 {
        match self {
            Seed::Unsigned(v) => v,
            Seed::Signed(v) => v as u64,
        }
    }
}

impl From<u64> for Seed {
    fn from(v: u64) -> Self {
        Seed::Unsigned(v)
    }
}

impl From<u32> for Seed {
    fn from(v: u32) -> Self {
        Seed::Unsigned(v.into())
    }
}

impl From<i64> for Seed {
    fn from(v: i64) -> Self {
        u64::try_from(v).map_or(Seed::Signed(v), Seed::Unsigned)
    }
}

impl From<i32> for Seed {
    fn from(v: i32) -> Self {
        i64::from(v).into()
    }
}

/// Ordering applied to a listing after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrderRepr", into = "OrderRepr")]
pub enum Order {
    /// Seeded, reproducible shuffle.
    Random { seed: Seed },
    /// Stable sort on a numeric field.
    Field { field: SortField, direction: Dir },
}

impl Order {
    pub fn random(seed: impl Into<Seed>) -> Self {
        Order::Random { seed: seed.into() }
    }

    pub fn asc(field: SortField) -> Self {
        Order::Field {
            field,
            direction: Dir::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Order::Field {
            field,
            direction: Dir::Desc,
        }
    }

    /// Sets this ordering on a query.
    pub fn apply(self, query: Query) -> Query {
        match self {
            Order::Random { seed } => query.shuffled(seed.to_bits()),
            Order::Field { field, direction } => query.order_by(field.as_str(), direction),
        }
    }
}

// Wire form: the sort field doubles as the `type` tag.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum OrderRepr {
    Random { seed: Seed },
    CreatedAtBlock { direction: Dir },
    ContributorCount { direction: Dir },
}

impl From<OrderRepr> for Order {
    fn from(repr: OrderRepr) -> Self {
        match repr {
            OrderRepr::Random { seed } => Order::Random { seed },
            OrderRepr::CreatedAtBlock { direction } => Order::Field {
                field: SortField::CreatedAtBlock,
                direction,
            },
            OrderRepr::ContributorCount { direction } => Order::Field {
                field: SortField::ContributorCount,
                direction,
            },
        }
    }
}

impl From<Order> for OrderRepr {
    fn from(order: Order) -> Self {
        match order {
            Order::Random { seed } => OrderRepr::Random { seed },
            Order::Field {
                field: SortField::CreatedAtBlock,
                direction,
            } => OrderRepr::CreatedAtBlock { direction },
            Order::Field {
                field: SortField::ContributorCount,
                direction,
            } => OrderRepr::ContributorCount { direction },
        }
    }
}

/// Result of an `applications-search` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    /// Present only when the client has a page size configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Result of an `applications-by-refs` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<ApplicationSummary>,
}

/// Result of an `applications-paginated` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationsPage {
    pub applications: Vec<ApplicationSummary>,
    pub pagination: Pagination,
}

/// Result of [`crate::DirectoryClient::query`]; the variant mirrors the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    ApplicationsSearch(SearchResponse),
    ApplicationsByRefs(ApplicationsResponse),
    ApplicationsPaginated(ApplicationsPage),
}

impl QueryResult {
    /// Application summaries, for the listing variants.
    pub fn applications(&self) -> Option<&[ApplicationSummary]> {
        match self {
            QueryResult::ApplicationsSearch(_) => None,
            QueryResult::ApplicationsByRefs(r) => Some(&r.applications),
            QueryResult::ApplicationsPaginated(p) => Some(&p.applications),
        }
    }

    /// Search hits, for the search variant.
    pub fn search_results(&self) -> Option<&[SearchResult]> {
        match self {
            QueryResult::ApplicationsSearch(s) => Some(&s.results),
            _ => None,
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            QueryResult::ApplicationsSearch(s) => s.pagination.as_ref(),
            QueryResult::ApplicationsByRefs(_) => None,
            QueryResult::ApplicationsPaginated(p) => Some(&p.pagination),
        }
    }
}

//! Query client for a grants application directory.
//!
//! The directory service exposes two read-only endpoints: `GET /search?q=`
//! and `GET /applications`. Neither filters, sorts, or pages on the server,
//! so this crate fetches a full snapshot per query and shapes it locally
//! with [`appdir_seeker`].
//!
//! Three queries are supported, as variants of [`QueryRequest`]:
//!
//! - `applications-search`: ranked hits, paged only if a page size is configured
//! - `applications-by-refs`: the summaries whose refs were asked for, in snapshot order
//! - `applications-paginated`: optional chain filter, optional ordering, one page
//!
//! HTTP is injected through the [`Fetch`] trait. Any async closure
//! `Fn(HttpRequest) -> Future<Output = Result<HttpResponse, BoxError>>` is a
//! transport, and [`MockFetch`] scripts responses for tests.
//!
//! ```
//! use appdir_client::{ClientConfig, DirectoryClient, HttpResponse, MockFetch};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fetch = MockFetch::always(HttpResponse::json(&json!({
//!     "results": [
//!         { "meta": { "searchType": "fulltext" }, "data": { "applicationRef": "1:0xa:0" } }
//!     ]
//! })));
//! let config = ClientConfig::new("https://dir.example").with_page_size(10);
//! let client = DirectoryClient::new(fetch, config).unwrap();
//!
//! let response = client.search("open source", 0).await.unwrap();
//! assert_eq!(response.results.len(), 1);
//! assert_eq!(response.pagination.unwrap().total_pages, 1);
//! # }
//! ```

mod adapter;
mod client;
mod config;
mod error;
mod model;
mod request;
mod transport;

pub use adapter::JsonAdapter;
pub use client::DirectoryClient;
pub use config::{BodyMode, ClientConfig, PaginationConfig, ENV_PREFIX};
pub use error::{ConfigError, QueryError};
pub use model::{ApplicationRef, ApplicationSummary, SearchMeta, SearchResult, SearchType, CHAIN_ID_FIELD};
pub use request::{
    ApplicationsPage, ApplicationsResponse, Filter, Order, QueryRequest, QueryResult,
    Seed, SearchResponse, SortField,
};
pub use transport::{BoxError, Fetch, HttpRequest, HttpResponse, MockFetch};

pub use appdir_seeker::{Dir, Pagination};

//! The query router.
//!
//! Every query makes one round trip for a full snapshot and then shapes it
//! locally; the service offers no server-side filtering, ordering or paging.
//! Nothing is cached between calls, so concurrent queries on one client
//! share no mutable state.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use appdir_seeker::{paginate, Query, Seekable};
use tracing::debug;

use crate::adapter::JsonAdapter;
use crate::config::ClientConfig;
use crate::error::{ConfigError, QueryError};
use crate::model::{ApplicationRef, ApplicationSummary, SearchResult};
use crate::request::{
    ApplicationsPage, ApplicationsResponse, Filter, Order, QueryRequest, QueryResult,
    SearchResponse,
};
use crate::transport::Fetch;

const SEARCH_PATH: &str = "/search";
const APPLICATIONS_PATH: &str = "/applications";

/// Client for the application directory.
///
/// # Example
///
/// ```
/// use appdir_client::{
///     ApplicationRef, ClientConfig, DirectoryClient, HttpResponse, MockFetch, QueryRequest,
/// };
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetch = MockFetch::always(HttpResponse::json(&json!({
///     "applicationSummaries": [
///         { "applicationRef": "1:0xa:0", "chainId": 1 },
///         { "applicationRef": "10:0xb:0", "chainId": 10 },
///     ]
/// })));
/// let client = DirectoryClient::new(fetch, ClientConfig::new("https://dir.example")).unwrap();
///
/// let result = client
///     .query(QueryRequest::ApplicationsByRefs {
///         refs: vec![ApplicationRef::from("10:0xb:0")],
///     })
///     .await
///     .unwrap();
/// assert_eq!(result.applications().unwrap().len(), 1);
/// # }
/// ```
pub struct DirectoryClient {
    adapter: JsonAdapter,
    page_size: Option<NonZeroUsize>,
}

impl DirectoryClient {
    /// Creates a client over `fetch`, validating `config` first.
    pub fn new(fetch: impl Fetch + 'static, config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_shared_fetch(Arc::new(fetch), config)
    }

    /// Creates a client over a transport shared with other owners.
    pub fn with_shared_fetch(fetch: Arc<dyn Fetch>, config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            adapter: JsonAdapter::new(fetch, &config),
            page_size: config.page_size()?,
        })
    }

    /// The configured page size, if any.
    pub fn page_size(&self) -> Option<NonZeroUsize> {
        self.page_size
    }

    /// Runs a query, dispatching on its variant.
    pub async fn query(&self, request: QueryRequest) -> Result<QueryResult, QueryError> {
        match request {
            QueryRequest::ApplicationsSearch { query_string, page } => self
                .search(&query_string, page)
                .await
                .map(QueryResult::ApplicationsSearch),
            QueryRequest::ApplicationsByRefs { refs } => self
                .applications_by_refs(&refs)
                .await
                .map(QueryResult::ApplicationsByRefs),
            QueryRequest::ApplicationsPaginated {
                page,
                filter,
                order,
            } => self
                .applications_paginated(page, filter, order)
                .await
                .map(QueryResult::ApplicationsPaginated),
        }
    }

    /// Full-text/semantic search.
    ///
    /// Results keep the service's ranking. They are paged only when the
    /// client was configured with a page size; otherwise `page` is ignored.
    pub async fn search(&self, query_string: &str, page: usize) -> Result<SearchResponse, QueryError> {
        let results: Vec<SearchResult> = self
            .adapter
            .get_field(SEARCH_PATH, &[("q", query_string)], "results")
            .await?;

        let response = match self.page_size {
            Some(page_size) => {
                let page = paginate(&results, page, page_size);
                SearchResponse {
                    results: page.items,
                    pagination: Some(page.pagination),
                }
            }
            None => SearchResponse {
                results,
                pagination: None,
            },
        };

        debug!(
            returned = response.results.len(),
            paged = response.pagination.is_some(),
            "search shaped"
        );
        Ok(response)
    }

    /// Summaries whose ref is in `refs`, in snapshot order.
    pub async fn applications_by_refs(
        &self,
        refs: &[ApplicationRef],
    ) -> Result<ApplicationsResponse, QueryError> {
        let snapshot = self.fetch_summaries().await?;
        let wanted: HashSet<&ApplicationRef> = refs.iter().collect();

        let applications: Vec<ApplicationSummary> = snapshot
            .into_iter()
            .filter(|summary| wanted.contains(&summary.application_ref))
            .collect();

        debug!(
            requested = refs.len(),
            found = applications.len(),
            "ref lookup shaped"
        );
        Ok(ApplicationsResponse { applications })
    }

    /// One page of the listing after filtering and ordering.
    ///
    /// Fails with [`QueryError::PaginationNotConfigured`] before any request
    /// is made if the client has no page size.
    pub async fn applications_paginated(
        &self,
        page: usize,
        filter: Option<Filter>,
        order: Option<Order>,
    ) -> Result<ApplicationsPage, QueryError> {
        let page_size = self.page_size.ok_or(QueryError::PaginationNotConfigured)?;
        let snapshot = self.fetch_summaries().await?;

        let shaped = shaping_query(filter, order).page(
            &snapshot,
            ApplicationSummary::accessor,
            page,
            page_size,
        );

        debug!(
            snapshot = snapshot.len(),
            matched = shaped.pagination.total_items,
            returned = shaped.items.len(),
            page,
            "listing shaped"
        );
        Ok(ApplicationsPage {
            applications: shaped.items,
            pagination: shaped.pagination,
        })
    }

    async fn fetch_summaries(&self) -> Result<Vec<ApplicationSummary>, QueryError> {
        self.adapter
            .get_field(APPLICATIONS_PATH, &[], "applicationSummaries")
            .await
    }
}

fn shaping_query(filter: Option<Filter>, order: Option<Order>) -> Query {
    let query = Query::new();
    let query = match filter {
        Some(filter) => filter.apply(query),
        None => query,
    };
    match order {
        Some(order) => order.apply(query),
        None => query,
    }
}

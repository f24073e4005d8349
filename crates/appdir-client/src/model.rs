//! Records returned by the directory service.
//!
//! Summaries are open records: one required key plus whatever metadata the
//! service attaches. Only the fields a query names are ever interpreted.

use std::fmt;

use appdir_seeker::{Seekable, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Field carrying the numeric chain id.
pub const CHAIN_ID_FIELD: &str = "chainId";

/// Opaque identifier of one application (`chain:round:index`).
///
/// Never parsed; only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationRef(String);

impl ApplicationRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApplicationRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One application as listed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub application_ref: ApplicationRef,
    /// Every other field, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

impl ApplicationSummary {
    pub fn new(application_ref: impl Into<ApplicationRef>) -> Self {
        Self {
            application_ref: application_ref.into(),
            fields: Map::new(),
        }
    }

    /// Adds a metadata field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Raw value of a metadata field.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.field(CHAIN_ID_FIELD).and_then(serde_json::Value::as_u64)
    }
}

impl Seekable for ApplicationSummary {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "applicationRef" => Value::String(self.application_ref.as_str()),
            _ => self.fields.seeker_field_value(field),
        }
    }
}

/// How the service matched a search hit.
///
/// Tags other than the two known ones are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Fulltext,
    Semantic,
    #[serde(untagged)]
    Other(String),
}

/// Match metadata attached to a search hit.
///
/// Nothing here is interpreted by the client; a missing or unfamiliar tag
/// never fails a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
    /// Scores and other service-specific keys.
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

/// One search hit, in the order the service ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub meta: SearchMeta,
    pub data: ApplicationSummary,
}

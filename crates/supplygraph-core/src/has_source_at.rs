//! HasSourceAt: links a package to the source location it was built from

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::id::NodeId;
use crate::package::{Package, PackageSpec};
use crate::source::{Source, SourceSpec};

/// Normalize a timestamp to UTC.
///
/// `known_since` is stored and compared in UTC only, so two inputs naming the
/// same instant with different offsets are equal.
pub fn normalize_time<Tz: TimeZone>(time: &DateTime<Tz>) -> DateTime<Utc> {
    time.with_timezone(&Utc)
}

/// Attributes of a HasSourceAt link supplied on ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasSourceAtInputSpec {
    pub known_since: DateTime<FixedOffset>,
    pub justification: String,
    pub origin: String,
    pub collector: String,
}

impl HasSourceAtInputSpec {
    pub fn new(
        known_since: DateTime<FixedOffset>,
        justification: impl Into<String>,
        origin: impl Into<String>,
        collector: impl Into<String>,
    ) -> Self {
        Self {
            known_since,
            justification: justification.into(),
            origin: origin.into(),
            collector: collector.into(),
        }
    }
}

/// Query filter for HasSourceAt links.
///
/// With `id` set the query is a direct lookup and the attribute filters are
/// ignored. Otherwise every `Some` attribute must match exactly; `None` is a
/// wildcard. `Some("")` only matches an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasSourceAtSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Nested filter on the package endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageSpec>,

    /// Nested filter on the source endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_since: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector: Option<String>,
}

impl HasSourceAtSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter for a direct lookup by node ID
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: PackageSpec) -> Self {
        self.package = Some(package);
        self
    }

    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_known_since(mut self, known_since: DateTime<FixedOffset>) -> Self {
        self.known_since = Some(known_since);
        self
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_collector(mut self, collector: impl Into<String>) -> Self {
        self.collector = Some(collector.into());
        self
    }

    /// Check a link's own attributes against this filter.
    ///
    /// Endpoint sub-filters are not considered here.
    pub fn matches_attributes(
        &self,
        justification: &str,
        origin: &str,
        collector: &str,
        known_since: &DateTime<Utc>,
    ) -> bool {
        field_matches(self.justification.as_deref(), justification)
            && field_matches(self.origin.as_deref(), origin)
            && field_matches(self.collector.as_deref(), collector)
            && self
                .known_since
                .map_or(true, |t| normalize_time(&t) == *known_since)
    }
}

fn field_matches(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |f| f == value)
}

/// A materialized HasSourceAt link with both endpoints resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasSourceAt {
    pub id: NodeId,
    pub package: Package,
    pub source: Source,
    pub known_since: DateTime<Utc>,
    pub justification: String,
    pub origin: String,
    pub collector: String,
}

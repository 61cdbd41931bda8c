//! Node variants held by the index

use chrono::{DateTime, Utc};
use supplygraph_core::{normalize_time, HasSourceAtInputSpec, NodeId, PackageQualifier};

/// A node that records the HasSourceAt links referencing it.
///
/// The list is append-only and is only written by link ingestion.
pub trait HasSourceAtEndpoint {
    fn has_source_at_links(&self) -> &[NodeId];

    fn push_has_source_at_link(&mut self, link: NodeId);
}

/// Package name: `type`, `namespace` and `name` shared by all versions
#[derive(Debug, Clone)]
pub struct PackageNameNode {
    pub id: NodeId,
    pub package_type: String,
    pub namespace: Option<String>,
    pub name: String,
    pub versions: Vec<NodeId>,
    pub has_source_at: Vec<NodeId>,
}

/// One version (with qualifiers and subpath) of a package name
#[derive(Debug, Clone)]
pub struct PackageVersionNode {
    pub id: NodeId,
    pub parent: NodeId,
    pub version: Option<String>,
    /// Sorted by key
    pub qualifiers: Vec<PackageQualifier>,
    pub subpath: Option<String>,
    pub has_source_at: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SourceNameNode {
    pub id: NodeId,
    pub source_type: String,
    pub namespace: String,
    pub name: String,
    pub tag: Option<String>,
    pub commit: Option<String>,
    pub has_source_at: Vec<NodeId>,
}

/// Stored HasSourceAt link. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct HasSourceAtLink {
    pub id: NodeId,
    pub package_id: NodeId,
    pub source_id: NodeId,
    /// Always UTC
    pub known_since: DateTime<Utc>,
    pub justification: String,
    pub origin: String,
    pub collector: String,
}

impl HasSourceAtLink {
    /// Whether this link has the same six defining fields as a candidate
    pub fn is_same_link(
        &self,
        package_id: NodeId,
        source_id: NodeId,
        input: &HasSourceAtInputSpec,
    ) -> bool {
        self.package_id == package_id
            && self.source_id == source_id
            && self.justification == input.justification
            && self.origin == input.origin
            && self.collector == input.collector
            && self.known_since == normalize_time(&input.known_since)
    }
}

macro_rules! has_source_at_endpoint {
    ($($node:ty),+) => {
        $(
            impl HasSourceAtEndpoint for $node {
                fn has_source_at_links(&self) -> &[NodeId] {
                    &self.has_source_at
                }

                fn push_has_source_at_link(&mut self, link: NodeId) {
                    self.has_source_at.push(link);
                }
            }
        )+
    };
}

has_source_at_endpoint!(PackageNameNode, PackageVersionNode, SourceNameNode);

//! The graph store: node index plus per-relation collections
//!
//! `Store` is plain single-threaded state. Callers that share it must provide
//! exclusive access for writes; [`crate::MemoryStorage`] wraps it in a single
//! lock.

use std::collections::HashMap;

use supplygraph_core::{NodeId, SourceInputSpec};

use crate::index::NodeIndex;

/// `(type, namespace, name)` of a package name node
pub(crate) type PackageKey = (String, Option<String>, String);

#[derive(Debug, Default)]
pub struct Store {
    pub(crate) index: NodeIndex,

    /// Package name nodes by their identifying fields
    pub(crate) package_names: HashMap<PackageKey, NodeId>,

    /// Source nodes by their identifying fields
    pub(crate) source_names: HashMap<SourceInputSpec, NodeId>,

    /// Every HasSourceAt link in insertion order
    pub(crate) has_sources: Vec<NodeId>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Number of HasSourceAt links stored
    pub fn has_source_at_count(&self) -> usize {
        self.has_sources.len()
    }
}

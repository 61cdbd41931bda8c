//! Node index shared by every node kind
//!
//! One identifier space covers packages, sources and links. Identifiers are
//! handed out by a monotonic allocator starting at 1 and are never reused;
//! the index has no removal path.

use std::collections::BTreeMap;

use supplygraph_core::{Error, NodeId, Result};

use crate::nodes::{
    HasSourceAtEndpoint, HasSourceAtLink, PackageNameNode, PackageVersionNode, SourceNameNode,
};

/// Any node stored in the index
#[derive(Debug, Clone)]
pub enum Node {
    PackageName(PackageNameNode),
    PackageVersion(PackageVersionNode),
    SourceName(SourceNameNode),
    HasSourceAt(HasSourceAtLink),
}

impl Node {
    /// Kind name used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Node::PackageName(_) => PackageNameNode::KIND,
            Node::PackageVersion(_) => PackageVersionNode::KIND,
            Node::SourceName(_) => SourceNameNode::KIND,
            Node::HasSourceAt(_) => HasSourceAtLink::KIND,
        }
    }

    /// The HasSourceAt backlink capability, if this node has one
    pub fn as_has_source_at_endpoint(&self) -> Option<&dyn HasSourceAtEndpoint> {
        match self {
            Node::PackageName(n) => Some(n),
            Node::PackageVersion(n) => Some(n),
            Node::SourceName(n) => Some(n),
            Node::HasSourceAt(_) => None,
        }
    }

    pub fn as_has_source_at_endpoint_mut(&mut self) -> Option<&mut dyn HasSourceAtEndpoint> {
        match self {
            Node::PackageName(n) => Some(n),
            Node::PackageVersion(n) => Some(n),
            Node::SourceName(n) => Some(n),
            Node::HasSourceAt(_) => None,
        }
    }
}

/// A concrete node type that can be looked up by ID
pub trait NodeVariant: Sized {
    const KIND: &'static str;

    fn from_node(node: &Node) -> Option<&Self>;

    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;
}

macro_rules! node_variant {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl NodeVariant for $ty {
            const KIND: &'static str = $kind;

            fn from_node(node: &Node) -> Option<&Self> {
                match node {
                    Node::$variant(n) => Some(n),
                    _ => None,
                }
            }

            fn from_node_mut(node: &mut Node) -> Option<&mut Self> {
                match node {
                    Node::$variant(n) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

node_variant!(PackageNameNode, PackageName, "package name");
node_variant!(PackageVersionNode, PackageVersion, "package version");
node_variant!(SourceNameNode, SourceName, "source name");
node_variant!(HasSourceAtLink, HasSourceAt, "hasSourceAt");

const ENDPOINT_KIND: &str = "package or source";

/// Mapping from node IDs to nodes, plus the ID allocator
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: BTreeMap<NodeId, Node>,
    last_id: u32,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh identifier
    pub fn allocate(&mut self) -> Result<NodeId> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| Error::Storage("node ID space exhausted".to_string()))?;
        self.last_id = next;
        Ok(NodeId(next))
    }

    /// Store a node under an ID obtained from [`NodeIndex::allocate`]
    pub fn insert(&mut self, id: NodeId, node: Node) {
        debug_assert!(id.0 <= self.last_id, "inserting unallocated ID {}", id);
        let previous = self.nodes.insert(id, node);
        debug_assert!(previous.is_none(), "node ID {} reused", id);
    }

    pub fn lookup(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::NotFound(id))
    }

    pub fn lookup_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::NotFound(id))
    }

    /// Look up a node expecting a specific variant
    pub fn get<T: NodeVariant>(&self, id: NodeId) -> Result<&T> {
        let node = self.lookup(id)?;
        T::from_node(node).ok_or_else(|| Error::TypeMismatch {
            id,
            expected: T::KIND,
            found: node.kind(),
        })
    }

    pub fn get_mut<T: NodeVariant>(&mut self, id: NodeId) -> Result<&mut T> {
        let node = self.lookup_mut(id)?;
        let found = node.kind();
        T::from_node_mut(node).ok_or(Error::TypeMismatch {
            id,
            expected: T::KIND,
            found,
        })
    }

    /// Look up a node that carries HasSourceAt backlinks
    pub fn has_source_at_endpoint(&self, id: NodeId) -> Result<&dyn HasSourceAtEndpoint> {
        let node = self.lookup(id)?;
        node.as_has_source_at_endpoint()
            .ok_or_else(|| Error::TypeMismatch {
                id,
                expected: ENDPOINT_KIND,
                found: node.kind(),
            })
    }

    pub fn has_source_at_endpoint_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut dyn HasSourceAtEndpoint> {
        let node = self.lookup_mut(id)?;
        let found = node.kind();
        node.as_has_source_at_endpoint_mut()
            .ok_or(Error::TypeMismatch {
                id,
                expected: ENDPOINT_KIND,
                found,
            })
    }

    /// All nodes of one variant, in ID order
    pub fn iter<'a, T: NodeVariant + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.nodes.values().filter_map(T::from_node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

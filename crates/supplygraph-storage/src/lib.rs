//! SupplyGraph Storage - Storage backends for the supply-chain graph
//!
//! The graph lives in a [`Store`]: one [`NodeIndex`] shared by every node
//! kind plus the collections each relation needs. [`MemoryStorage`] puts a
//! store behind a lock and implements
//! [`SupplyChainGraph`](supplygraph_core::SupplyChainGraph).

pub mod has_source_at;
pub mod index;
pub mod memory;
pub mod nodes;
pub mod package;
pub mod source;
pub mod store;

pub use index::{Node, NodeIndex, NodeVariant};
pub use memory::MemoryStorage;
pub use nodes::{
    HasSourceAtEndpoint, HasSourceAtLink, PackageNameNode, PackageVersionNode, SourceNameNode,
};
pub use store::Store;

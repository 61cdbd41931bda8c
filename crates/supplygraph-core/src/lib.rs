//! SupplyGraph Core - Types for the software supply-chain graph
//!
//! This crate provides the identifiers, input specs, filters, response
//! records and the graph trait shared by storage backends and frontends.

pub mod artifact;
pub mod error;
pub mod graph;
pub mod has_source_at;
pub mod id;
pub mod package;
pub mod source;
pub mod validation;

pub use artifact::{ArtifactInputSpec, ArtifactSpec};
pub use error::{Error, Result};
pub use graph::SupplyChainGraph;
pub use has_source_at::{normalize_time, HasSourceAt, HasSourceAtInputSpec, HasSourceAtSpec};
pub use id::NodeId;
pub use package::{
    MatchFlags, Package, PackageInputSpec, PackageQualifier, PackageSpec, PackageVersion,
    PkgMatchType,
};
pub use source::{Source, SourceInputSpec, SourceSpec};
pub use validation::{validate_filter, validate_input, OneOf, Selection};

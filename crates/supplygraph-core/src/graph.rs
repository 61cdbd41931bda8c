//! Supply-chain graph trait definition

use crate::error::{Error, Result};
use crate::has_source_at::{HasSourceAt, HasSourceAtInputSpec, HasSourceAtSpec};
use crate::package::{MatchFlags, Package, PackageInputSpec, PackageSpec};
use crate::source::{Source, SourceInputSpec, SourceSpec};
use async_trait::async_trait;

/// Main trait for supply-chain graph operations
///
/// All storage backends implement this trait.
#[async_trait]
pub trait SupplyChainGraph: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Package Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Ingest a package, returning its version-level record
    async fn ingest_package(&self, package: &PackageInputSpec) -> Result<Package>;

    /// List package versions matching a filter
    async fn packages(&self, filter: Option<&PackageSpec>) -> Result<Vec<Package>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Source Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Ingest a source location
    async fn ingest_source(&self, source: &SourceInputSpec) -> Result<Source>;

    /// List sources matching a filter
    async fn sources(&self, filter: Option<&SourceSpec>) -> Result<Vec<Source>>;

    // ─────────────────────────────────────────────────────────────────────────
    // HasSourceAt Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Link a package to a source location.
    ///
    /// Both endpoints must already exist. Ingesting the same link twice
    /// returns the existing link.
    async fn ingest_has_source_at(
        &self,
        package: &PackageInputSpec,
        match_flags: MatchFlags,
        source: &SourceInputSpec,
        has_source_at: &HasSourceAtInputSpec,
    ) -> Result<HasSourceAt>;

    /// Ingest several links, pairing the slices by position
    async fn ingest_has_source_ats(
        &self,
        packages: &[PackageInputSpec],
        match_flags: MatchFlags,
        sources: &[SourceInputSpec],
        has_source_ats: &[HasSourceAtInputSpec],
    ) -> Result<Vec<HasSourceAt>> {
        if packages.len() != sources.len() || packages.len() != has_source_ats.len() {
            return Err(Error::Validation(format!(
                "uneven hasSourceAt batch: {} packages, {} sources, {} attributes",
                packages.len(),
                sources.len(),
                has_source_ats.len()
            )));
        }

        let mut ingested = Vec::with_capacity(packages.len());
        for ((package, source), has_source_at) in packages.iter().zip(sources).zip(has_source_ats) {
            ingested.push(
                self.ingest_has_source_at(package, match_flags, source, has_source_at)
                    .await?,
            );
        }
        Ok(ingested)
    }

    /// Query links, either by ID or by scanning with attribute filters
    async fn has_source_at(&self, filter: Option<&HasSourceAtSpec>) -> Result<Vec<HasSourceAt>>;
}

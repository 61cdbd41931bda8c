//! In-memory storage backend

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use supplygraph_core::{
    Error, HasSourceAt, HasSourceAtInputSpec, HasSourceAtSpec, MatchFlags, Package,
    PackageInputSpec, PackageSpec, Result, Source, SourceInputSpec, SourceSpec,
    SupplyChainGraph,
};

use crate::store::Store;

/// In-memory storage backend
///
/// The whole store sits behind one lock: ingestion holds the write lock for
/// the full operation, queries share the read lock.
pub struct MemoryStorage {
    store: RwLock<Store>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|e| Error::Storage(format!("Lock error: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|e| Error::Storage(format!("Lock error: {}", e)))
    }

    /// Number of HasSourceAt links stored
    pub fn has_source_at_count(&self) -> Result<usize> {
        Ok(self.read()?.has_source_at_count())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupplyChainGraph for MemoryStorage {
    // Package operations

    async fn ingest_package(&self, package: &PackageInputSpec) -> Result<Package> {
        self.write()?.ingest_package(package)
    }

    async fn packages(&self, filter: Option<&PackageSpec>) -> Result<Vec<Package>> {
        self.read()?.packages(filter)
    }

    // Source operations

    async fn ingest_source(&self, source: &SourceInputSpec) -> Result<Source> {
        self.write()?.ingest_source(source)
    }

    async fn sources(&self, filter: Option<&SourceSpec>) -> Result<Vec<Source>> {
        self.read()?.sources(filter)
    }

    // HasSourceAt operations

    async fn ingest_has_source_at(
        &self,
        package: &PackageInputSpec,
        match_flags: MatchFlags,
        source: &SourceInputSpec,
        has_source_at: &HasSourceAtInputSpec,
    ) -> Result<HasSourceAt> {
        self.write()?
            .ingest_has_source_at(package, match_flags, source, has_source_at)
    }

    async fn has_source_at(&self, filter: Option<&HasSourceAtSpec>) -> Result<Vec<HasSourceAt>> {
        self.read()?.has_source_at(filter)
    }
}

//! Graph document loading

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use supplygraph_core::{
    HasSourceAt, HasSourceAtInputSpec, MatchFlags, PackageInputSpec, SourceInputSpec,
    SupplyChainGraph,
};

/// A JSON document describing packages, sources and the links between them
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default)]
    pub packages: Vec<PackageInputSpec>,

    #[serde(default)]
    pub sources: Vec<SourceInputSpec>,

    #[serde(default)]
    pub has_source_at: Vec<HasSourceAtEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasSourceAtEntry {
    pub package: PackageInputSpec,

    #[serde(default)]
    pub match_flags: MatchFlags,

    pub source: SourceInputSpec,

    #[serde(flatten)]
    pub attributes: HasSourceAtInputSpec,
}

/// What ingesting a document produced
#[derive(Debug)]
pub struct IngestSummary {
    pub packages: usize,
    pub sources: usize,
    /// One link per document entry, duplicates included
    pub links: Vec<HasSourceAt>,
}

pub fn load_document(path: &Path) -> anyhow::Result<GraphDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("Invalid graph document {}", path.display()))?;
    Ok(document)
}

/// Ingest a document: packages and sources first, then the links
pub async fn ingest_document<G>(
    graph: &G,
    document: &GraphDocument,
) -> anyhow::Result<IngestSummary>
where
    G: SupplyChainGraph + ?Sized,
{
    for package in &document.packages {
        graph.ingest_package(package).await?;
    }
    for source in &document.sources {
        graph.ingest_source(source).await?;
    }

    let mut links = Vec::with_capacity(document.has_source_at.len());
    for (i, entry) in document.has_source_at.iter().enumerate() {
        let link = graph
            .ingest_has_source_at(
                &entry.package,
                entry.match_flags,
                &entry.source,
                &entry.attributes,
            )
            .await
            .with_context(|| format!("hasSourceAt entry {}", i))?;
        links.push(link);
    }

    tracing::info!(
        "Ingested {} packages, {} sources, {} hasSourceAt entries",
        document.packages.len(),
        document.sources.len(),
        links.len()
    );

    Ok(IngestSummary {
        packages: document.packages.len(),
        sources: document.sources.len(),
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplygraph_core::PkgMatchType;
    use supplygraph_storage::MemoryStorage;

    const DOC: &str = r#"{
        "packages": [{"type": "pypi", "name": "requests", "version": "2.31.0"}],
        "sources": [{"type": "git", "namespace": "github.com/psf", "name": "requests", "tag": "v2.31.0"}],
        "hasSourceAt": [
            {
                "package": {"type": "pypi", "name": "requests", "version": "2.31.0"},
                "source": {"type": "git", "namespace": "github.com/psf", "name": "requests", "tag": "v2.31.0"},
                "knownSince": "2023-05-22T09:30:00Z",
                "justification": "built from tag",
                "origin": "o1",
                "collector": "c1"
            },
            {
                "package": {"type": "pypi", "name": "requests"},
                "matchFlags": {"pkg": "ALL_VERSIONS"},
                "source": {"type": "git", "namespace": "github.com/psf", "name": "requests", "tag": "v2.31.0"},
                "knownSince": "2023-05-22T10:30:00+01:00",
                "justification": "built from tag",
                "origin": "o1",
                "collector": "c1"
            }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let document: GraphDocument = serde_json::from_str(DOC).unwrap();
        assert_eq!(document.packages.len(), 1);
        assert_eq!(document.has_source_at.len(), 2);
        assert_eq!(document.has_source_at[0].match_flags.pkg, PkgMatchType::SpecificVersion);
        assert_eq!(document.has_source_at[1].match_flags.pkg, PkgMatchType::AllVersions);
        assert_eq!(document.has_source_at[0].attributes.justification, "built from tag");
    }

    #[tokio::test]
    async fn test_ingest_document() {
        let document: GraphDocument = serde_json::from_str(DOC).unwrap();
        let storage = MemoryStorage::new();

        let summary = ingest_document(&storage, &document).await.unwrap();
        assert_eq!(summary.packages, 1);
        assert_eq!(summary.sources, 1);
        assert_eq!(summary.links.len(), 2);
        assert_ne!(summary.links[0].id, summary.links[1].id);
        assert_eq!(storage.has_source_at_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ingest_document_missing_source() {
        let mut document: GraphDocument = serde_json::from_str(DOC).unwrap();
        document.sources.clear();
        let storage = MemoryStorage::new();

        let err = ingest_document(&storage, &document).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Source not found"));
    }
}

//! HasSourceAt ingestion, deduplication and queries

use supplygraph_core::{
    normalize_time, Error, HasSourceAt, HasSourceAtInputSpec, HasSourceAtSpec, MatchFlags,
    NodeId, PackageInputSpec, Result, SourceInputSpec,
};
use tracing::{debug, trace};

use crate::index::Node;
use crate::nodes::HasSourceAtLink;
use crate::store::Store;

impl Store {
    /// Link a package to a source location.
    ///
    /// Both endpoints must have been ingested already. An identical link
    /// (same endpoints, justification, origin, collector and instant) is
    /// returned instead of being stored twice.
    pub fn ingest_has_source_at(
        &mut self,
        package: &PackageInputSpec,
        match_flags: MatchFlags,
        source: &SourceInputSpec,
        has_source_at: &HasSourceAtInputSpec,
    ) -> Result<HasSourceAt> {
        let source_id = self.resolve_source_id(source)?;
        let package_id = self.resolve_package_id(package, match_flags)?;

        let link_id = match self.find_duplicate(package_id, source_id, has_source_at)? {
            Some(id) => {
                debug!("hasSourceAt {} already links {} to {}", id, package, source);
                id
            }
            None => {
                let id = self.insert_has_source_at(package_id, source_id, has_source_at)?;
                debug!("Ingested hasSourceAt {} linking {} to {}", id, package, source);
                id
            }
        };

        let link = self.index.get::<HasSourceAtLink>(link_id)?;
        self.build_has_source_at(link, None)
    }

    /// Look for an existing link with the same six defining fields.
    ///
    /// Only the shorter of the two endpoint backlink lists is scanned.
    fn find_duplicate(
        &self,
        package_id: NodeId,
        source_id: NodeId,
        input: &HasSourceAtInputSpec,
    ) -> Result<Option<NodeId>> {
        let package_links = self
            .index
            .lookup(package_id)?
            .as_has_source_at_endpoint()
            .map(|n| n.has_source_at_links());
        let source_links = self
            .index
            .lookup(source_id)?
            .as_has_source_at_endpoint()
            .map(|n| n.has_source_at_links());

        let candidates = dedup_candidates(package_links, source_links, &self.has_sources);
        for &id in candidates {
            let link = self.index.get::<HasSourceAtLink>(id)?;
            if link.is_same_link(package_id, source_id, input) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn insert_has_source_at(
        &mut self,
        package_id: NodeId,
        source_id: NodeId,
        input: &HasSourceAtInputSpec,
    ) -> Result<NodeId> {
        // Check both backlink targets before touching anything
        self.index.has_source_at_endpoint(package_id)?;
        self.index.has_source_at_endpoint(source_id)?;

        let id = self.index.allocate()?;
        self.index.insert(
            id,
            Node::HasSourceAt(HasSourceAtLink {
                id,
                package_id,
                source_id,
                known_since: normalize_time(&input.known_since),
                justification: input.justification.clone(),
                origin: input.origin.clone(),
                collector: input.collector.clone(),
            }),
        );
        self.has_sources.push(id);

        self.index
            .has_source_at_endpoint_mut(package_id)?
            .push_has_source_at_link(id);
        self.index
            .has_source_at_endpoint_mut(source_id)?
            .push_has_source_at_link(id);
        Ok(id)
    }

    /// Query links.
    ///
    /// A filter with an `id` is a direct lookup: a malformed, unknown or
    /// non-link ID is an error, as is an endpoint that fails the nested
    /// filters. Otherwise every link is scanned in insertion order and links
    /// whose endpoints fail the nested filters are left out.
    pub fn has_source_at(&self, filter: Option<&HasSourceAtSpec>) -> Result<Vec<HasSourceAt>> {
        if let Some(id) = filter.and_then(|f| f.id.as_deref()) {
            let id: NodeId = id.parse()?;
            let link = self.index.get::<HasSourceAtLink>(id)?;
            return Ok(vec![self.build_has_source_at(link, filter)?]);
        }

        let mut out = Vec::new();
        for &id in &self.has_sources {
            let link = self.index.get::<HasSourceAtLink>(id)?;
            if let Some(filter) = filter {
                if !filter.matches_attributes(
                    &link.justification,
                    &link.origin,
                    &link.collector,
                    &link.known_since,
                ) {
                    continue;
                }
            }
            if let Some(found) = self.try_build_has_source_at(link, filter)? {
                out.push(found);
            }
        }
        Ok(out)
    }

    /// Materialize a link, failing if either endpoint does not resolve
    fn build_has_source_at(
        &self,
        link: &HasSourceAtLink,
        filter: Option<&HasSourceAtSpec>,
    ) -> Result<HasSourceAt> {
        let package = self
            .build_package_response(link.package_id, filter.and_then(|f| f.package.as_ref()))?
            .ok_or(Error::MissingEndpoint {
                link: link.id,
                endpoint: "package",
            })?;
        let source = self
            .build_source_response(link.source_id, filter.and_then(|f| f.source.as_ref()))?
            .ok_or(Error::MissingEndpoint {
                link: link.id,
                endpoint: "source",
            })?;

        Ok(HasSourceAt {
            id: link.id,
            package,
            source,
            known_since: link.known_since,
            justification: link.justification.clone(),
            origin: link.origin.clone(),
            collector: link.collector.clone(),
        })
    }

    /// Like `build_has_source_at`, but an unresolved endpoint yields `None`
    fn try_build_has_source_at(
        &self,
        link: &HasSourceAtLink,
        filter: Option<&HasSourceAtSpec>,
    ) -> Result<Option<HasSourceAt>> {
        match self.build_has_source_at(link, filter) {
            Ok(found) => Ok(Some(found)),
            Err(Error::MissingEndpoint { link, endpoint }) => {
                trace!("Skipping hasSourceAt {}: {} filtered out", link, endpoint);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Pick the backlink list to scan for duplicates.
///
/// The shorter endpoint list wins, the package list on a tie. Without any
/// endpoint list every link is a candidate.
fn dedup_candidates<'a>(
    package_links: Option<&'a [NodeId]>,
    source_links: Option<&'a [NodeId]>,
    all: &'a [NodeId],
) -> &'a [NodeId] {
    match (package_links, source_links) {
        (Some(p), Some(s)) if p.len() > s.len() => s,
        (Some(p), _) => p,
        (None, Some(s)) => s,
        (None, None) => all,
    }
}

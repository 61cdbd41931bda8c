//! Source ingestion and resolution

use supplygraph_core::{Error, NodeId, Result, Source, SourceInputSpec, SourceSpec};
use tracing::debug;

use crate::index::Node;
use crate::nodes::SourceNameNode;
use crate::store::Store;

impl Store {
    /// Ingest a source location, reusing an existing node
    pub fn ingest_source(&mut self, spec: &SourceInputSpec) -> Result<Source> {
        let existing = self.source_names.get(spec).copied();
        let id = match existing {
            Some(id) => id,
            None => {
                let id = self.index.allocate()?;
                self.index.insert(
                    id,
                    Node::SourceName(SourceNameNode {
                        id,
                        source_type: spec.source_type.clone(),
                        namespace: spec.namespace.clone(),
                        name: spec.name.clone(),
                        tag: spec.tag.clone(),
                        commit: spec.commit.clone(),
                        has_source_at: Vec::new(),
                    }),
                );
                self.source_names.insert(spec.clone(), id);
                debug!("Ingested source {} as node {}", spec, id);
                id
            }
        };
        self.source_record(id)
    }

    pub fn resolve_source_id(&self, spec: &SourceInputSpec) -> Result<NodeId> {
        self.source_names
            .get(spec)
            .copied()
            .ok_or_else(|| Error::SourceNotFound(spec.to_string()))
    }

    pub fn source_record(&self, id: NodeId) -> Result<Source> {
        let node = self.index.get::<SourceNameNode>(id)?;
        Ok(Source {
            id: node.id,
            source_type: node.source_type.clone(),
            namespace: node.namespace.clone(),
            name: node.name.clone(),
            tag: node.tag.clone(),
            commit: node.commit.clone(),
        })
    }

    /// Materialize a source node, returning `None` if it fails the filter
    pub fn build_source_response(
        &self,
        id: NodeId,
        filter: Option<&SourceSpec>,
    ) -> Result<Option<Source>> {
        let source = self.source_record(id)?;
        match filter {
            Some(filter) if !source_matches(&source, filter)? => Ok(None),
            _ => Ok(Some(source)),
        }
    }

    /// All sources passing the filter, in ingestion order
    pub fn sources(&self, filter: Option<&SourceSpec>) -> Result<Vec<Source>> {
        let mut out = Vec::new();
        for node in self.index.iter::<SourceNameNode>() {
            if let Some(source) = self.build_source_response(node.id, filter)? {
                out.push(source);
            }
        }
        Ok(out)
    }
}

fn source_matches(source: &Source, filter: &SourceSpec) -> Result<bool> {
    if let Some(id) = &filter.id {
        if id.parse::<NodeId>()? != source.id {
            return Ok(false);
        }
    }
    let eq = |want: &Option<String>, value: &str| want.as_deref().map_or(true, |w| w == value);
    let eq_opt = |want: &Option<String>, value: &Option<String>| {
        want.as_ref().map_or(true, |w| value.as_ref() == Some(w))
    };
    Ok(eq(&filter.source_type, &source.source_type)
        && eq(&filter.namespace, &source.namespace)
        && eq(&filter.name, &source.name)
        && eq_opt(&filter.tag, &source.tag)
        && eq_opt(&filter.commit, &source.commit))
}

//! Package ingestion and resolution

use supplygraph_core::{
    Error, MatchFlags, NodeId, Package, PackageInputSpec, PackageQualifier, PackageSpec,
    PackageVersion, PkgMatchType, Result,
};
use tracing::debug;

use crate::index::Node;
use crate::nodes::{PackageNameNode, PackageVersionNode};
use crate::store::{PackageKey, Store};

fn package_key(spec: &PackageInputSpec) -> PackageKey {
    (
        spec.package_type.clone(),
        spec.namespace.clone(),
        spec.name.clone(),
    )
}

fn field_matches(filter: Option<&str>, value: Option<&str>) -> bool {
    filter.map_or(true, |f| value == Some(f))
}

impl Store {
    /// Ingest a package name and version, reusing existing nodes
    pub fn ingest_package(&mut self, spec: &PackageInputSpec) -> Result<Package> {
        let key = package_key(spec);
        let existing = self.package_names.get(&key).copied();
        let name_id = match existing {
            Some(id) => id,
            None => {
                let id = self.index.allocate()?;
                self.index.insert(
                    id,
                    Node::PackageName(PackageNameNode {
                        id,
                        package_type: spec.package_type.clone(),
                        namespace: spec.namespace.clone(),
                        name: spec.name.clone(),
                        versions: Vec::new(),
                        has_source_at: Vec::new(),
                    }),
                );
                self.package_names.insert(key, id);
                id
            }
        };

        let qualifiers = spec.sorted_qualifiers();
        let version_id = match self.find_version(name_id, spec, &qualifiers)? {
            Some(id) => id,
            None => {
                let id = self.index.allocate()?;
                self.index.insert(
                    id,
                    Node::PackageVersion(PackageVersionNode {
                        id,
                        parent: name_id,
                        version: spec.version.clone(),
                        qualifiers,
                        subpath: spec.subpath.clone(),
                        has_source_at: Vec::new(),
                    }),
                );
                self.index
                    .get_mut::<PackageNameNode>(name_id)?
                    .versions
                    .push(id);
                debug!("Ingested package {} as node {}", spec, id);
                id
            }
        };

        self.package_record(version_id)
    }

    /// Find the node a package spec refers to under the given match flags
    pub fn resolve_package_id(&self, spec: &PackageInputSpec, flags: MatchFlags) -> Result<NodeId> {
        let name_id = self
            .package_names
            .get(&package_key(spec))
            .copied()
            .ok_or_else(|| Error::PackageNotFound(spec.to_string()))?;

        match flags.pkg {
            PkgMatchType::AllVersions => Ok(name_id),
            PkgMatchType::SpecificVersion => self
                .find_version(name_id, spec, &spec.sorted_qualifiers())?
                .ok_or_else(|| Error::PackageNotFound(spec.to_string())),
        }
    }

    fn find_version(
        &self,
        name_id: NodeId,
        spec: &PackageInputSpec,
        qualifiers: &[PackageQualifier],
    ) -> Result<Option<NodeId>> {
        let name = self.index.get::<PackageNameNode>(name_id)?;
        for &id in &name.versions {
            let version = self.index.get::<PackageVersionNode>(id)?;
            if version.version == spec.version
                && version.qualifiers.as_slice() == qualifiers
                && version.subpath == spec.subpath
            {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Materialize a package name or version node
    pub fn package_record(&self, id: NodeId) -> Result<Package> {
        let node = self.index.lookup(id)?;
        match node {
            Node::PackageName(name) => Ok(Package {
                id: name.id,
                package_type: name.package_type.clone(),
                namespace: name.namespace.clone(),
                name: name.name.clone(),
                version: None,
            }),
            Node::PackageVersion(version) => {
                let name = self.index.get::<PackageNameNode>(version.parent)?;
                Ok(Package {
                    id: name.id,
                    package_type: name.package_type.clone(),
                    namespace: name.namespace.clone(),
                    name: name.name.clone(),
                    version: Some(PackageVersion {
                        id: version.id,
                        version: version.version.clone(),
                        qualifiers: version.qualifiers.clone(),
                        subpath: version.subpath.clone(),
                    }),
                })
            }
            other => Err(Error::TypeMismatch {
                id,
                expected: "package name or version",
                found: other.kind(),
            }),
        }
    }

    /// Materialize a package node, returning `None` if it fails the filter
    pub fn build_package_response(
        &self,
        id: NodeId,
        filter: Option<&PackageSpec>,
    ) -> Result<Option<Package>> {
        let package = self.package_record(id)?;
        match filter {
            Some(filter) if !package_matches(&package, filter)? => Ok(None),
            _ => Ok(Some(package)),
        }
    }

    /// All package versions passing the filter, in ingestion order
    pub fn packages(&self, filter: Option<&PackageSpec>) -> Result<Vec<Package>> {
        let mut out = Vec::new();
        for version in self.index.iter::<PackageVersionNode>() {
            if let Some(package) = self.build_package_response(version.id, filter)? {
                out.push(package);
            }
        }
        Ok(out)
    }
}

fn package_matches(package: &Package, filter: &PackageSpec) -> Result<bool> {
    if let Some(id) = &filter.id {
        if id.parse::<NodeId>()? != package.node_id() {
            return Ok(false);
        }
    }
    let version = package.version.as_ref();
    Ok(
        field_matches(filter.package_type.as_deref(), Some(package.package_type.as_str()))
            && field_matches(filter.namespace.as_deref(), package.namespace.as_deref())
            && field_matches(filter.name.as_deref(), Some(package.name.as_str()))
            && field_matches(
                filter.version.as_deref(),
                version.and_then(|v| v.version.as_deref()),
            )
            && field_matches(
                filter.subpath.as_deref(),
                version.and_then(|v| v.subpath.as_deref()),
            ),
    )
}

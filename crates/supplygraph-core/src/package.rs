//! Package input specs, filters and response records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// A single `key=value` package qualifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageQualifier {
    pub key: String,
    pub value: String,
}

impl PackageQualifier {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Identifies a package (and optionally one of its versions) on ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInputSpec {
    #[serde(rename = "type")]
    pub package_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<PackageQualifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

impl PackageInputSpec {
    pub fn new(package_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            namespace: None,
            name: name.into(),
            version: None,
            qualifiers: Vec::new(),
            subpath: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers.push(PackageQualifier::new(key, value));
        self
    }

    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = Some(subpath.into());
        self
    }

    /// Qualifiers in canonical (sorted) order
    pub fn sorted_qualifiers(&self) -> Vec<PackageQualifier> {
        let mut qualifiers = self.qualifiers.clone();
        qualifiers.sort();
        qualifiers
    }
}

impl fmt::Display for PackageInputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}/", self.package_type)?;
        if let Some(ns) = &self.namespace {
            write!(f, "{}/", ns)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{}", version)?;
        }
        if !self.qualifiers.is_empty() {
            let pairs: Vec<String> = self
                .sorted_qualifiers()
                .iter()
                .map(|q| format!("{}={}", q.key, q.value))
                .collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        if let Some(subpath) = &self.subpath {
            write!(f, "#{}", subpath)?;
        }
        Ok(())
    }
}

/// Whether a package spec refers to the package name or one exact version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PkgMatchType {
    /// Link against the package name, covering every version
    AllVersions,
    /// Link against the version matching version, qualifiers and subpath
    #[default]
    SpecificVersion,
}

/// Match options applied when resolving a package on ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchFlags {
    pub pkg: PkgMatchType,
}

impl MatchFlags {
    pub fn all_versions() -> Self {
        Self {
            pkg: PkgMatchType::AllVersions,
        }
    }

    pub fn specific_version() -> Self {
        Self {
            pkg: PkgMatchType::SpecificVersion,
        }
    }
}

/// Optional filter applied when materializing a package endpoint.
///
/// Every field that is `Some` must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

impl PackageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = Some(subpath.into());
        self
    }
}

/// A materialized package endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// ID of the package name node
    pub id: NodeId,

    #[serde(rename = "type")]
    pub package_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    /// Present when the endpoint is a specific version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<PackageVersion>,
}

impl Package {
    /// ID of the node this record was built from (version node if present)
    pub fn node_id(&self) -> NodeId {
        self.version.as_ref().map(|v| v.id).unwrap_or(self.id)
    }
}

/// Version details of a materialized package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    pub id: NodeId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<PackageQualifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_input_display() {
        let pkg = PackageInputSpec::new("deb", "openssl")
            .with_namespace("debian")
            .with_version("3.0.11")
            .with_qualifier("distro", "bookworm")
            .with_qualifier("arch", "amd64");

        assert_eq!(
            pkg.to_string(),
            "pkg:deb/debian/openssl@3.0.11?arch=amd64&distro=bookworm"
        );
    }

    #[test]
    fn test_sorted_qualifiers() {
        let pkg = PackageInputSpec::new("npm", "left-pad")
            .with_qualifier("z", "1")
            .with_qualifier("a", "2");

        let keys: Vec<_> = pkg.sorted_qualifiers().into_iter().map(|q| q.key).collect();
        assert_eq!(keys, vec!["a", "z"]);
    }

    #[test]
    fn test_package_input_deserialize() {
        let json = r#"{"type":"pypi","name":"requests","version":"2.31.0"}"#;
        let pkg: PackageInputSpec = serde_json::from_str(json).unwrap();
        assert_eq!(pkg.package_type, "pypi");
        assert_eq!(pkg.version.as_deref(), Some("2.31.0"));
        assert!(pkg.namespace.is_none());
        assert!(pkg.qualifiers.is_empty());
    }

    #[test]
    fn test_match_flags_serde() {
        let flags: MatchFlags = serde_json::from_str(r#"{"pkg":"ALL_VERSIONS"}"#).unwrap();
        assert_eq!(flags, MatchFlags::all_versions());
        assert_eq!(MatchFlags::default(), MatchFlags::specific_version());
    }

    #[test]
    fn test_package_node_id() {
        let name_level = Package {
            id: NodeId(3),
            package_type: "npm".into(),
            namespace: None,
            name: "react".into(),
            version: None,
        };
        assert_eq!(name_level.node_id(), NodeId(3));

        let version_level = Package {
            version: Some(PackageVersion {
                id: NodeId(4),
                version: Some("18.2.0".into()),
                qualifiers: vec![],
                subpath: None,
            }),
            ..name_level
        };
        assert_eq!(version_level.node_id(), NodeId(4));
    }
}

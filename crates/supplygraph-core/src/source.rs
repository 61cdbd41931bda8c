//! Source location input specs, filters and response records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Identifies a source repository location on ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInputSpec {
    /// Repository kind, e.g. `git`
    #[serde(rename = "type")]
    pub source_type: String,

    /// Host and path prefix, e.g. `github.com/guacsec`
    pub namespace: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl SourceInputSpec {
    pub fn new(
        source_type: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            namespace: namespace.into(),
            name: name.into(),
            tag: None,
            commit: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}

impl fmt::Display for SourceInputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}/{}", self.source_type, self.namespace, self.name)?;
        if let Some(tag) = &self.tag {
            write!(f, "@{}", tag)?;
        }
        if let Some(commit) = &self.commit {
            write!(f, "#{}", commit)?;
        }
        Ok(())
    }
}

/// Optional filter applied when materializing a source endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl SourceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
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

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}

/// A materialized source endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub source_type: String,

    pub namespace: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        let src = SourceInputSpec::new("git", "github.com/guacsec", "guac").with_tag("v0.1.0");
        assert_eq!(src.to_string(), "git+github.com/guacsec/guac@v0.1.0");

        let src = SourceInputSpec::new("git", "github.com/guacsec", "guac").with_commit("abc123");
        assert_eq!(src.to_string(), "git+github.com/guacsec/guac#abc123");
    }

    #[test]
    fn test_source_spec_builder() {
        let spec = SourceSpec::new().with_name("guac").with_tag("v1");
        assert_eq!(spec.name.as_deref(), Some("guac"));
        assert_eq!(spec.tag.as_deref(), Some("v1"));
        assert!(spec.id.is_none());
        assert!(spec.commit.is_none());
    }
}

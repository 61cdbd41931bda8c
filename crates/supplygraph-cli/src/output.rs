//! Output formatting utilities

use serde::Serialize;
use supplygraph_core::{HasSourceAt, Package, Source};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Serialize data as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn package_label(package: &Package) -> String {
    let mut label = format!("pkg:{}/", package.package_type);
    if let Some(ns) = &package.namespace {
        label.push_str(ns);
        label.push('/');
    }
    label.push_str(&package.name);
    if let Some(version) = package.version.as_ref().and_then(|v| v.version.as_deref()) {
        label.push('@');
        label.push_str(version);
    }
    label
}

pub fn source_label(source: &Source) -> String {
    let mut label = format!("{}+{}/{}", source.source_type, source.namespace, source.name);
    if let Some(tag) = &source.tag {
        label.push('@');
        label.push_str(tag);
    }
    if let Some(commit) = &source.commit {
        label.push('#');
        label.push_str(commit);
    }
    label
}

/// One-line human readable form of a link
pub fn has_source_at_line(link: &HasSourceAt) -> String {
    format!(
        "[{}] {} -> {} (justification: {}, origin: {}, collector: {}, since: {})",
        link.id,
        package_label(&link.package),
        source_label(&link.source),
        link.justification,
        link.origin,
        link.collector,
        link.known_since.to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use supplygraph_core::{NodeId, PackageVersion};

    fn link() -> HasSourceAt {
        HasSourceAt {
            id: NodeId(4),
            package: Package {
                id: NodeId(1),
                package_type: "golang".into(),
                namespace: Some("github.com/guacsec".into()),
                name: "guac".into(),
                version: Some(PackageVersion {
                    id: NodeId(2),
                    version: Some("v0.1.0".into()),
                    qualifiers: vec![],
                    subpath: None,
                }),
            },
            source: Source {
                id: NodeId(3),
                source_type: "git".into(),
                namespace: "github.com/guacsec".into(),
                name: "guac".into(),
                tag: Some("v0.1.0".into()),
                commit: None,
            },
            known_since: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
            justification: "built from tag".into(),
            origin: "o1".into(),
            collector: "c1".into(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from("whatever"), OutputFormat::Text);
    }

    #[test]
    fn test_has_source_at_line() {
        assert_eq!(
            has_source_at_line(&link()),
            "[4] pkg:golang/github.com/guacsec/guac@v0.1.0 -> git+github.com/guacsec/guac@v0.1.0 \
             (justification: built from tag, origin: o1, collector: c1, since: 2023-05-01T12:00:00+00:00)"
        );
    }

    #[test]
    fn test_to_json_uses_string_ids() {
        let json = to_json(&link()).unwrap();
        assert!(json.contains("\"id\": \"4\""));
        assert!(json.contains("\"knownSince\": \"2023-05-01T12:00:00Z\""));
    }
}

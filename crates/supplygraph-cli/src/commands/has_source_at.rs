//! HasSourceAt commands

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::Args;
use supplygraph_core::{HasSourceAt, HasSourceAtSpec, PackageSpec, SourceSpec, SupplyChainGraph};

use crate::commands::io::{ingest_document, load_document};
use crate::output::{has_source_at_line, to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct IngestArgs {
    /// Graph document (JSON)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Graph document (JSON) to load before querying
    pub file: PathBuf,

    /// Look up a single link by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Filter by justification (exact match)
    #[arg(long)]
    pub justification: Option<String>,

    /// Filter by origin (exact match)
    #[arg(long)]
    pub origin: Option<String>,

    /// Filter by collector (exact match)
    #[arg(long)]
    pub collector: Option<String>,

    /// Filter by known-since timestamp (RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    pub known_since: Option<DateTime<FixedOffset>>,

    /// Filter by package type
    #[arg(long)]
    pub package_type: Option<String>,

    /// Filter by package name
    #[arg(long)]
    pub package_name: Option<String>,

    /// Filter by package version
    #[arg(long)]
    pub package_version: Option<String>,

    /// Filter by source name
    #[arg(long)]
    pub source_name: Option<String>,

    /// Filter by source tag
    #[arg(long)]
    pub source_tag: Option<String>,

    /// Filter by source commit
    #[arg(long)]
    pub source_commit: Option<String>,
}

fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
}

impl QueryArgs {
    /// Build the query filter from the command-line flags
    pub fn to_spec(&self) -> HasSourceAtSpec {
        let package = PackageSpec {
            package_type: self.package_type.clone(),
            name: self.package_name.clone(),
            version: self.package_version.clone(),
            ..Default::default()
        };
        let source = SourceSpec {
            name: self.source_name.clone(),
            tag: self.source_tag.clone(),
            commit: self.source_commit.clone(),
            ..Default::default()
        };

        HasSourceAtSpec {
            id: self.id.clone(),
            package: (package != PackageSpec::default()).then_some(package),
            source: (source != SourceSpec::default()).then_some(source),
            known_since: self.known_since,
            justification: self.justification.clone(),
            origin: self.origin.clone(),
            collector: self.collector.clone(),
        }
    }
}

pub async fn run_ingest(args: &IngestArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Ingesting {:?}", args.file);

    let document = load_document(&args.file)?;
    let summary = ingest_document(&*ctx.storage, &document).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&summary.links)?),
        OutputFormat::Text => {
            println!(
                "Ingested {} packages, {} sources and {} hasSourceAt links ({} stored)",
                summary.packages,
                summary.sources,
                summary.links.len(),
                ctx.storage.has_source_at_count()?
            );
            for link in &summary.links {
                println!("  {}", has_source_at_line(link));
            }
        }
    }
    Ok(())
}

pub async fn run_query(args: &QueryArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let document = load_document(&args.file)?;
    ingest_document(&*ctx.storage, &document).await?;

    let spec = args.to_spec();
    tracing::debug!("Querying hasSourceAt with {:?}", spec);
    let links = ctx.storage.has_source_at(Some(&spec)).await?;
    tracing::info!("Found {} hasSourceAt links", links.len());

    print_links(&links, ctx.format)
}

fn print_links(links: &[HasSourceAt], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(&links)?),
        OutputFormat::Text if links.is_empty() => println!("No hasSourceAt links found"),
        OutputFormat::Text => {
            println!("hasSourceAt links ({} found):", links.len());
            for link in links {
                println!("  {}", has_source_at_line(link));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> QueryArgs {
        QueryArgs {
            file: PathBuf::from("graph.json"),
            id: None,
            justification: None,
            origin: None,
            collector: None,
            known_since: None,
            package_type: None,
            package_name: None,
            package_version: None,
            source_name: None,
            source_tag: None,
            source_commit: None,
        }
    }

    #[test]
    fn test_empty_args_give_empty_spec() {
        assert_eq!(args().to_spec(), HasSourceAtSpec::default());
    }

    #[test]
    fn test_nested_filters_only_when_set() {
        let mut a = args();
        a.package_name = Some("requests".into());
        a.justification = Some("built from tag".into());

        let spec = a.to_spec();
        assert_eq!(spec.package.unwrap().name.as_deref(), Some("requests"));
        assert!(spec.source.is_none());
        assert_eq!(spec.justification.as_deref(), Some("built from tag"));
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2023-05-22T09:30:00+01:00").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }
}

//! Exactly-one-of checks for tagged inputs and filters
//!
//! Several inputs of the wider graph are unions encoded as a struct of
//! optional alternatives. On ingestion exactly one alternative must be set.
//! On query a filter may be absent or leave every alternative unset, but it
//! may never set more than one.

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactInputSpec, ArtifactSpec};
use crate::error::{Error, Result};
use crate::package::{PackageInputSpec, PackageSpec};
use crate::source::{SourceInputSpec, SourceSpec};

/// A struct of optional alternatives of which at most one may be set
pub trait OneOf {
    /// Alternatives in human-readable form, used in error messages
    const ALTERNATIVES: &'static str;

    /// Names of the alternatives that are set, in declaration order
    fn selected(&self) -> Vec<&'static str>;
}

/// Outcome of validating an optional query filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No filter, or a filter with no alternative set
    Unspecified,
    /// Exactly one alternative set
    One(&'static str),
}

/// Require exactly one alternative on an ingestion input.
///
/// `path` names the input in the error message. Returns the selected
/// alternative.
pub fn validate_input<T: OneOf>(input: &T, path: &str) -> Result<&'static str> {
    match input.selected().as_slice() {
        [one] => Ok(*one),
        _ => Err(Error::CardinalityViolation {
            expected: T::ALTERNATIVES,
            path: path.to_string(),
        }),
    }
}

/// Check an optional query filter, rejecting only multiple alternatives
pub fn validate_filter<T: OneOf>(filter: Option<&T>) -> Result<Selection> {
    let Some(filter) = filter else {
        return Ok(Selection::Unspecified);
    };
    match filter.selected().as_slice() {
        [] => Ok(Selection::Unspecified),
        [one] => Ok(Selection::One(*one)),
        _ => Err(Error::CardinalityViolation {
            expected: T::ALTERNATIVES,
            path: "filter".to_string(),
        }),
    }
}

macro_rules! one_of {
    ($ty:ident, $alternatives:literal, { $($field:ident),+ $(,)? }) => {
        impl OneOf for $ty {
            const ALTERNATIVES: &'static str = $alternatives;

            fn selected(&self) -> Vec<&'static str> {
                let mut set = Vec::new();
                $(
                    if self.$field.is_some() {
                        set.push(stringify!($field));
                    }
                )+
                set
            }
        }
    };
}

/// Vulnerability identifier: OSV, GHSA or CVE
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghsa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
}

one_of!(VulnerabilityId, "osv, ghsa, or cve", { osv, ghsa, cve });

/// Vulnerability identifier restricted to CVE or GHSA
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CveOrGhsa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghsa: Option<String>,
}

one_of!(CveOrGhsa, "cve or ghsa", { cve, ghsa });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSourceOrArtifactInput {
    pub package: Option<PackageInputSpec>,
    pub source: Option<SourceInputSpec>,
    pub artifact: Option<ArtifactInputSpec>,
}

one_of!(PackageSourceOrArtifactInput, "package, source, or artifact", { package, source, artifact });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSourceOrArtifactSpec {
    pub package: Option<PackageSpec>,
    pub source: Option<SourceSpec>,
    pub artifact: Option<ArtifactSpec>,
}

one_of!(PackageSourceOrArtifactSpec, "package, source, or artifact", { package, source, artifact });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOrSourceInput {
    pub package: Option<PackageInputSpec>,
    pub source: Option<SourceInputSpec>,
}

one_of!(PackageOrSourceInput, "package or source", { package, source });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOrSourceSpec {
    pub package: Option<PackageSpec>,
    pub source: Option<SourceSpec>,
}

one_of!(PackageOrSourceSpec, "package or source", { package, source });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOrArtifactInput {
    pub package: Option<PackageInputSpec>,
    pub artifact: Option<ArtifactInputSpec>,
}

one_of!(PackageOrArtifactInput, "package or artifact", { package, artifact });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOrArtifactSpec {
    pub package: Option<PackageSpec>,
    pub artifact: Option<ArtifactSpec>,
}

one_of!(PackageOrArtifactSpec, "package or artifact", { package, artifact });

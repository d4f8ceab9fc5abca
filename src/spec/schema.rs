//! Specification document types for the deployment composer.
//!
//! This module defines the structs that map to `workspec.yaml` and
//! `component.yaml` files. These types are declarative: they are decoded from
//! disk, handed to the resolver, and discarded. Unknown fields in source
//! documents are ignored (forward-compatible, lossy).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Well-known file name marking a workspec document.
pub const WORKSPEC_MARKER: &str = "workspec.yaml";

/// Well-known file name marking a component document.
pub const COMPONENT_MARKER: &str = "component.yaml";

/// Metadata envelope shared by every specification document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    /// Resource base name; must be unique within a namespace.
    pub name: String,
}

/// A decoded `component.yaml` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    /// API version marker (informational).
    #[serde(default)]
    pub api_version: String,
    /// Document kind marker (informational).
    #[serde(default)]
    pub kind: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Component specification body.
    pub spec: ComponentSpec,
}

/// The `spec` body of a component document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// How this component is deployed.
    pub component_type: ComponentType,
    /// Helm chart reference, consulted only for `helm` components.
    #[serde(default)]
    pub helm_info: HelmInfo,
    /// Container image reference, consulted only for `image` components.
    #[serde(default)]
    pub image_info: ImageInfo,
    /// Network exposure description.
    #[serde(default)]
    pub rest_schema: RestSchema,
    /// Names of components this one depends on. Decoded for completeness;
    /// the resolver does not consult it for ordering or gating.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Deployment mechanism of a component.
///
/// Unknown values survive decoding so the resolver can report the offending
/// string; resolution of an unknown type is a fatal error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// Deployed by installing a Helm chart.
    Helm,
    /// Deployed as a container image workload.
    Image,
    /// Any other declared type, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Helm chart reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HelmInfo {
    /// Chart name, or a fully-qualified locator such as an OCI reference.
    #[serde(default)]
    pub chart_name: String,
    /// Chart repository URL; may be empty when `chart_name` is fully
    /// qualified.
    #[serde(default)]
    pub chart_repo: String,
    /// Chart version to install.
    #[serde(default)]
    pub chart_version: String,
}

/// Container image reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Image to run; required for `image` components.
    #[serde(default)]
    pub image_name: String,
}

/// Network exposure description for a component.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestSchema {
    /// Container port to expose; `0` means no network exposure.
    #[serde(default)]
    pub port: u16,
    /// Declared route entries. Decoded for completeness; synthesis uses the
    /// fixed smoke-test path instead.
    #[serde(default)]
    pub entries: Vec<String>,
}

/// A decoded `workspec.yaml` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspecDoc {
    /// API version marker (informational).
    #[serde(default)]
    pub api_version: String,
    /// Document kind marker (informational).
    #[serde(default)]
    pub kind: String,
    /// Document metadata; the name doubles as the routing prefix for every
    /// component installed under this workspec.
    pub metadata: Metadata,
    /// Workspec specification body.
    pub spec: WorkspecSpec,
}

/// The `spec` body of a workspec document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspecSpec {
    /// Ordered component sources, processed in document order.
    #[serde(default)]
    pub component_list: Vec<ComponentListEntry>,
}

/// One entry of a workspec's component list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentListEntry {
    /// Source kind of the entry.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Path to walk, relative to the installation root.
    pub path: PathBuf,
}

/// Source kind of a component-list entry.
///
/// Only `directory` is installable; other kinds are logged and skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Walk the entry's path for component files.
    Directory,
    /// Any other declared kind, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

impl ComponentDoc {
    /// Returns the component's base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

impl WorkspecDoc {
    /// Returns the workspec name, which is also the routing prefix shared by
    /// all of its components.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.metadata.name
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Helm => write!(f, "helm"),
            Self::Image => write!(f, "image"),
            Self::Other(other) => write!(f, "{other}"),
        }
    }
}

//! Specification handling for the deployment composer.
//!
//! This module covers everything between the filesystem and the resolver:
//! - Typed schema for `workspec.yaml` and `component.yaml` documents
//! - Loading and decoding documents from disk
//! - Lazy marker-file directory traversal

mod schema;
mod loader;
mod walker;

pub use schema::{
    COMPONENT_MARKER, ComponentDoc, ComponentListEntry, ComponentSpec, ComponentType, EntryKind,
    HelmInfo, ImageInfo, Metadata, RestSchema, WORKSPEC_MARKER, WorkspecDoc, WorkspecSpec,
};
pub use loader::SpecLoader;
pub use walker::walk_markers;

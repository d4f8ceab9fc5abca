//! Manifest-rendering backend.
//!
//! Runs the same pipeline as a live installation but collects every
//! declaration as a manifest instead of contacting a cluster. Powers the
//! `render` dry-run command and the orchestrator tests.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::error::{OnedevxError, Result};
use crate::synth::{
    HelmRelease, RoutingRule, ServiceDecl, StripPrefix, Workload, namespace_manifest,
};

use super::api::Backend;

/// One rendered manifest with its identifying coordinates.
#[derive(Debug, Clone)]
pub struct RenderedManifest {
    /// Resource kind.
    pub kind: String,
    /// Resource name.
    pub name: String,
    /// The manifest document.
    pub manifest: Value,
}

/// Backend collecting declarations as manifests.
#[derive(Debug, Default)]
pub struct RenderBackend {
    manifests: Mutex<Vec<RenderedManifest>>,
}

impl RenderBackend {
    /// Creates a new render backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the collected manifests, in the order they were applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection lock was poisoned.
    pub fn into_manifests(self) -> Result<Vec<RenderedManifest>> {
        self.manifests
            .into_inner()
            .map_err(|e| OnedevxError::internal(format!("Manifest collection poisoned: {e}")))
    }

    /// Records one manifest.
    fn record(&self, kind: &str, name: &str, manifest: Value) -> Result<()> {
        let mut manifests = self
            .manifests
            .lock()
            .map_err(|e| OnedevxError::internal(format!("Manifest collection poisoned: {e}")))?;
        manifests.push(RenderedManifest {
            kind: kind.to_string(),
            name: name.to_string(),
            manifest,
        });
        Ok(())
    }
}

#[async_trait]
impl Backend for RenderBackend {
    async fn create_namespace(&self, name: &str) -> Result<()> {
        self.record("Namespace", name, namespace_manifest(name))
    }

    async fn install_helm_chart(&self, release: &HelmRelease) -> Result<()> {
        self.record("HelmRelease", &release.name, release.to_manifest())
    }

    async fn create_workload(&self, workload: &Workload) -> Result<()> {
        self.record("Deployment", &workload.name, workload.to_manifest())
    }

    async fn create_service(&self, service: &ServiceDecl) -> Result<()> {
        self.record("Service", &service.name, service.to_manifest())
    }

    async fn create_routing_middleware(&self, middleware: &StripPrefix) -> Result<()> {
        self.record("Middleware", &middleware.name, middleware.to_manifest())
    }

    async fn create_routing_rule(&self, rule: &RoutingRule) -> Result<()> {
        self.record("IngressRoute", &rule.name, rule.to_manifest())
    }

    fn backend_type(&self) -> &'static str {
        "render"
    }
}

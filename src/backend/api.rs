//! Backend trait definition.
//!
//! The composer emits declarations through this interface; whatever sits
//! behind it owns convergence, idempotency, and deduplication by name.

use async_trait::async_trait;

use crate::error::Result;
use crate::synth::{HelmRelease, ResourceDecl, RoutingRule, ServiceDecl, StripPrefix, Workload};

/// Trait for resource-provisioning backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Creates a namespace.
    async fn create_namespace(&self, name: &str) -> Result<()>;

    /// Installs a Helm chart release.
    async fn install_helm_chart(&self, release: &HelmRelease) -> Result<()>;

    /// Creates a container workload.
    async fn create_workload(&self, workload: &Workload) -> Result<()>;

    /// Creates a network service.
    async fn create_service(&self, service: &ServiceDecl) -> Result<()>;

    /// Creates a routing middleware.
    async fn create_routing_middleware(&self, middleware: &StripPrefix) -> Result<()>;

    /// Creates a routing rule.
    async fn create_routing_rule(&self, rule: &RoutingRule) -> Result<()>;

    /// Gets the backend type name.
    fn backend_type(&self) -> &'static str;
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn create_namespace(&self, name: &str) -> Result<()> {
        (**self).create_namespace(name).await
    }

    async fn install_helm_chart(&self, release: &HelmRelease) -> Result<()> {
        (**self).install_helm_chart(release).await
    }

    async fn create_workload(&self, workload: &Workload) -> Result<()> {
        (**self).create_workload(workload).await
    }

    async fn create_service(&self, service: &ServiceDecl) -> Result<()> {
        (**self).create_service(service).await
    }

    async fn create_routing_middleware(&self, middleware: &StripPrefix) -> Result<()> {
        (**self).create_routing_middleware(middleware).await
    }

    async fn create_routing_rule(&self, rule: &RoutingRule) -> Result<()> {
        (**self).create_routing_rule(rule).await
    }

    fn backend_type(&self) -> &'static str {
        (**self).backend_type()
    }
}

/// Applies one resource declaration through the backend.
///
/// # Errors
///
/// Returns any error surfaced by the backend, unmodified.
pub async fn apply(backend: &dyn Backend, declaration: &ResourceDecl) -> Result<()> {
    match declaration {
        ResourceDecl::HelmRelease(release) => backend.install_helm_chart(release).await,
        ResourceDecl::Workload(workload) => backend.create_workload(workload).await,
        ResourceDecl::Service(service) => backend.create_service(service).await,
        ResourceDecl::Middleware(middleware) => backend.create_routing_middleware(middleware).await,
        ResourceDecl::RoutingRule(rule) => backend.create_routing_rule(rule).await,
    }
}

//! Cluster API backend implementation.
//!
//! This is a thin declaration shipper: every synthesized resource is posted
//! to the cluster's resource API as a manifest. The cluster owns
//! reconciliation and upserts by name; a name conflict is therefore reported
//! as already-existing, not as a failure.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{BackendError, OnedevxError, Result, SpecError};
use crate::synth::{
    HelmRelease, RoutingRule, ServiceDecl, StripPrefix, Workload, namespace_manifest,
};

use super::api::Backend;
use super::helm::HelmRunner;

/// Environment variable holding the cluster API server URL.
pub const API_SERVER_ENV: &str = "ONEDEVX_API_SERVER";

/// Environment variable holding the cluster API bearer token.
pub const API_TOKEN_ENV: &str = "ONEDEVX_API_TOKEN";

/// Environment variable accepting self-signed cluster certificates when set
/// to `true`.
pub const INSECURE_TLS_ENV: &str = "ONEDEVX_INSECURE_TLS";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend posting resource manifests to the cluster API.
#[derive(Debug)]
pub struct ClusterBackend {
    /// HTTP client with the bearer token attached.
    client: Client,
    /// Cluster API server base URL.
    server: String,
    /// Helm chart installer.
    helm: HelmRunner,
}

impl ClusterBackend {
    /// Creates a new cluster backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(server: &str, token: &str, insecure_tls: bool) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| BackendError::network(format!("Invalid API token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(headers)
            .danger_accept_invalid_certs(insecure_tls)
            .build()
            .map_err(|e| BackendError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            server: server.trim_end_matches('/').to_string(),
            helm: HelmRunner::new(),
        })
    }

    /// Creates a cluster backend from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL or token variables are missing.
    pub fn from_env() -> Result<Self> {
        let server = require_env(API_SERVER_ENV)?;
        let token = require_env(API_TOKEN_ENV)?;
        let insecure_tls = std::env::var(INSECURE_TLS_ENV)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or_default();

        Self::new(&server, &token, insecure_tls)
    }

    /// Posts one manifest to a collection path.
    ///
    /// HTTP 409 means a resource of that name already exists; the cluster
    /// upserts by name, so the declaration is considered delivered.
    async fn post_manifest(
        &self,
        path: &str,
        manifest: &Value,
        kind: &str,
        name: &str,
    ) -> Result<()> {
        let url = format!("{}{path}", self.server);
        debug!("POST {url} ({kind}/{name})");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(manifest)
            .send()
            .await
            .map_err(|e| BackendError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            warn!("{kind} '{name}' already exists, leaving it to the cluster");
            return Ok(());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OnedevxError::Backend(BackendError::api_error(
                status.as_u16(),
                body,
            )));
        }

        info!("Created {kind}: {name}");
        Ok(())
    }
}

#[async_trait]
impl Backend for ClusterBackend {
    async fn create_namespace(&self, name: &str) -> Result<()> {
        self.post_manifest(
            "/api/v1/namespaces",
            &namespace_manifest(name),
            "Namespace",
            name,
        )
        .await
    }

    async fn install_helm_chart(&self, release: &HelmRelease) -> Result<()> {
        self.helm.install(release).await
    }

    async fn create_workload(&self, workload: &Workload) -> Result<()> {
        let path = format!(
            "/apis/apps/v1/namespaces/{}/deployments",
            workload.namespace
        );
        self.post_manifest(&path, &workload.to_manifest(), "Deployment", &workload.name)
            .await
    }

    async fn create_service(&self, service: &ServiceDecl) -> Result<()> {
        let path = format!("/api/v1/namespaces/{}/services", service.namespace);
        self.post_manifest(&path, &service.to_manifest(), "Service", &service.name)
            .await
    }

    async fn create_routing_middleware(&self, middleware: &StripPrefix) -> Result<()> {
        let path = format!(
            "/apis/traefik.io/v1alpha1/namespaces/{}/middlewares",
            middleware.namespace
        );
        self.post_manifest(
            &path,
            &middleware.to_manifest(),
            "Middleware",
            &middleware.name,
        )
        .await
    }

    async fn create_routing_rule(&self, rule: &RoutingRule) -> Result<()> {
        let path = format!(
            "/apis/traefik.io/v1alpha1/namespaces/{}/ingressroutes",
            rule.namespace
        );
        self.post_manifest(&path, &rule.to_manifest(), "IngressRoute", &rule.name)
            .await
    }

    fn backend_type(&self) -> &'static str {
        "cluster"
    }
}

/// Reads a required environment variable.
fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        OnedevxError::Spec(SpecError::MissingEnvVar {
            name: name.to_string(),
        })
    })
}

//! Resource declarations emitted by synthesis.
//!
//! These types carry everything the backend needs to create a live resource.
//! They are declarations only: the composer never diffs or reconciles them,
//! it hands them to the backend in synthesis order.

use serde_json::{Value, json};
use std::collections::HashMap;

/// Name prefix applied to namespaces and workloads managed by the composer.
pub const MANAGED_PREFIX: &str = "onedevx";

/// Label key used to select a component's pods.
pub const COMPONENT_LABEL: &str = "onedevxComponent";

/// Port exposed by every synthesized network service.
pub const SERVICE_PORT: u16 = 80;

/// Fixed smoke-test path segment matched by synthesized routing rules.
pub const SMOKE_TEST_PATH: &str = "ping";

/// Routing entry point attached to synthesized rules.
const ROUTING_ENTRY_POINT: &str = "web";

/// One resource declaration produced for a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceDecl {
    /// A Helm chart release.
    HelmRelease(HelmRelease),
    /// A container workload (Deployment).
    Workload(Workload),
    /// A network service in front of a workload.
    Service(ServiceDecl),
    /// A path-stripping routing middleware.
    Middleware(StripPrefix),
    /// A routing rule forwarding the smoke-test path to a service.
    RoutingRule(RoutingRule),
}

/// Declaration of a Helm chart release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmRelease {
    /// Release name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Chart name or fully-qualified chart locator.
    pub chart: String,
    /// Chart repository URL; empty when `chart` is fully qualified.
    pub repo: String,
    /// Chart version.
    pub version: String,
}

/// Declaration of a container workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Workload name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Name of the single container.
    pub container_name: String,
    /// Container image.
    pub image: String,
    /// Replica count.
    pub replicas: u32,
    /// Pod labels, also used as the selector.
    pub labels: HashMap<String, String>,
}

/// Declaration of a network service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDecl {
    /// Service name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Exposed port.
    pub port: u16,
    /// Container port traffic is forwarded to.
    pub target_port: u16,
    /// Pod selector.
    pub selector: HashMap<String, String>,
}

/// Declaration of a path-stripping routing middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripPrefix {
    /// Middleware name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Path prefix removed from inbound requests, e.g. `/payments`.
    pub prefix: String,
}

/// Declaration of a routing rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    /// Rule name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Matched request path, e.g. `/payments/ping`.
    pub match_path: String,
    /// Name of the middleware applied before forwarding.
    pub middleware: String,
    /// Name of the service traffic is forwarded to.
    pub service: String,
    /// Port on the service traffic is forwarded to.
    pub service_port: u16,
}

impl ResourceDecl {
    /// Returns the declaration's resource kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HelmRelease(_) => "HelmRelease",
            Self::Workload(_) => "Deployment",
            Self::Service(_) => "Service",
            Self::Middleware(_) => "Middleware",
            Self::RoutingRule(_) => "IngressRoute",
        }
    }

    /// Returns the declaration's resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::HelmRelease(r) => &r.name,
            Self::Workload(w) => &w.name,
            Self::Service(s) => &s.name,
            Self::Middleware(m) => &m.name,
            Self::RoutingRule(r) => &r.name,
        }
    }

    /// Returns the declaration's target namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::HelmRelease(r) => &r.namespace,
            Self::Workload(w) => &w.namespace,
            Self::Service(s) => &s.namespace,
            Self::Middleware(m) => &m.namespace,
            Self::RoutingRule(r) => &r.namespace,
        }
    }

    /// Renders the declaration as a cluster manifest.
    ///
    /// Helm releases render as an `onedevx.dev/v1` document for inspection;
    /// they are installed through the chart mechanism, not applied as
    /// manifests.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        match self {
            Self::HelmRelease(r) => r.to_manifest(),
            Self::Workload(w) => w.to_manifest(),
            Self::Service(s) => s.to_manifest(),
            Self::Middleware(m) => m.to_manifest(),
            Self::RoutingRule(r) => r.to_manifest(),
        }
    }
}

/// Renders a namespace manifest.
#[must_use]
pub fn namespace_manifest(name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": { "name": name },
    })
}

impl HelmRelease {
    /// Renders the release as an inspection manifest.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        json!({
            "apiVersion": "onedevx.dev/v1",
            "kind": "HelmRelease",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
            },
            "spec": {
                "chart": self.chart,
                "repo": self.repo,
                "version": self.version,
            },
        })
    }
}

impl Workload {
    /// Renders the workload as a Deployment manifest.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
            },
            "spec": {
                "replicas": self.replicas,
                "selector": { "matchLabels": self.labels },
                "template": {
                    "metadata": { "labels": self.labels },
                    "spec": {
                        "containers": [{
                            "name": self.container_name,
                            "image": self.image,
                        }],
                    },
                },
            },
        })
    }
}

impl ServiceDecl {
    /// Renders the service manifest.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
            },
            "spec": {
                "ports": [{
                    "port": self.port,
                    "targetPort": self.target_port,
                    "protocol": "TCP",
                }],
                "selector": self.selector,
            },
        })
    }
}

impl StripPrefix {
    /// Renders the strip-prefix middleware manifest.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        json!({
            "apiVersion": "traefik.io/v1alpha1",
            "kind": "Middleware",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
            },
            "spec": {
                "stripPrefix": {
                    "prefixes": [self.prefix],
                },
            },
        })
    }
}

impl RoutingRule {
    /// Renders the routing rule manifest.
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        json!({
            "apiVersion": "traefik.io/v1alpha1",
            "kind": "IngressRoute",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
                "annotations": {
                    "traefik.ingress.kubernetes.io/router.middlewares":
                        format!("{}-{}@kubernetescrd", self.namespace, self.middleware),
                },
            },
            "spec": {
                "entryPoints": [ROUTING_ENTRY_POINT],
                "routes": [{
                    "kind": "Rule",
                    "match": format!("Path(`{}`)", self.match_path),
                    "middlewares": [{
                        "name": self.middleware,
                        "namespace": self.namespace,
                    }],
                    "services": [{
                        "kind": "Service",
                        "name": self.service,
                        "port": self.service_port,
                    }],
                }],
            },
        })
    }
}

//! Component resolution and resource synthesis.
//!
//! Resolution dispatches on the declared component type and produces the set
//! of resource declarations for that component. Synthesis is pure: it reads
//! the decoded document plus the namespace and routing prefix threaded down
//! from the owning workspec, and performs no I/O.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{OnedevxError, Result, SpecError};
use crate::spec::{ComponentDoc, ComponentType};

use super::resources::{
    COMPONENT_LABEL, HelmRelease, MANAGED_PREFIX, ResourceDecl, RoutingRule, SERVICE_PORT,
    SMOKE_TEST_PATH, ServiceDecl, StripPrefix, Workload,
};

/// Resolves component documents into resource declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentResolver;

impl ComponentResolver {
    /// Creates a new component resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a component into the resource declarations to create.
    ///
    /// `prefix` is the owning workspec's name; every component under one
    /// workspec shares that routing prefix.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown component type or a missing image
    /// reference. Both are fatal to the run; no declarations are emitted.
    pub fn resolve(
        &self,
        namespace: &str,
        prefix: &str,
        doc: &ComponentDoc,
    ) -> Result<Vec<ResourceDecl>> {
        debug!(
            "Resolving component '{}' (type: {})",
            doc.name(),
            doc.spec.component_type
        );

        match &doc.spec.component_type {
            ComponentType::Helm => Ok(Self::synthesize_helm(namespace, doc)),
            ComponentType::Image => Self::synthesize_image(namespace, prefix, doc),
            ComponentType::Other(other) => {
                Err(OnedevxError::Spec(SpecError::unsupported(other.clone())))
            }
        }
    }

    /// Synthesizes the declarations for a Helm component.
    ///
    /// A chart install only; routing for chart-deployed workloads is left to
    /// the chart itself.
    fn synthesize_helm(namespace: &str, doc: &ComponentDoc) -> Vec<ResourceDecl> {
        let helm = &doc.spec.helm_info;
        vec![ResourceDecl::HelmRelease(HelmRelease {
            name: doc.name().to_string(),
            namespace: namespace.to_string(),
            chart: helm.chart_name.clone(),
            repo: helm.chart_repo.clone(),
            version: helm.chart_version.clone(),
        })]
    }

    /// Synthesizes the declarations for an image component.
    ///
    /// Always a single-replica workload. Components declaring a port also
    /// get a service, a prefix-stripping middleware, and a routing rule for
    /// the smoke-test path; port `0` marks a headless workload with no
    /// network surface.
    fn synthesize_image(
        namespace: &str,
        prefix: &str,
        doc: &ComponentDoc,
    ) -> Result<Vec<ResourceDecl>> {
        let name = doc.name();
        let image = &doc.spec.image_info.image_name;
        if image.is_empty() {
            return Err(OnedevxError::Spec(SpecError::MissingField {
                component: name.to_string(),
                field: String::from("imageInfo.imageName"),
            }));
        }

        let labels = HashMap::from([(String::from(COMPONENT_LABEL), name.to_string())]);

        let mut declarations = vec![ResourceDecl::Workload(Workload {
            name: format!("{MANAGED_PREFIX}-{name}"),
            namespace: namespace.to_string(),
            container_name: name.to_string(),
            image: image.clone(),
            replicas: 1,
            labels: labels.clone(),
        })];

        let port = doc.spec.rest_schema.port;
        if port != 0 {
            declarations.push(ResourceDecl::Service(ServiceDecl {
                name: name.to_string(),
                namespace: namespace.to_string(),
                port: SERVICE_PORT,
                target_port: port,
                selector: labels,
            }));
            declarations.push(ResourceDecl::Middleware(StripPrefix {
                name: name.to_string(),
                namespace: namespace.to_string(),
                prefix: format!("/{prefix}"),
            }));
            declarations.push(ResourceDecl::RoutingRule(RoutingRule {
                name: name.to_string(),
                namespace: namespace.to_string(),
                match_path: format!("/{prefix}/{SMOKE_TEST_PATH}"),
                middleware: name.to_string(),
                service: name.to_string(),
                service_port: SERVICE_PORT,
            }));
        }

        Ok(declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ComponentSpec, HelmInfo, ImageInfo, Metadata, RestSchema};

    fn image_component(name: &str, image: &str, port: u16) -> ComponentDoc {
        ComponentDoc {
            api_version: String::from("onedevx.dev/v1"),
            kind: String::from("Component"),
            metadata: Metadata {
                name: name.to_string(),
            },
            spec: ComponentSpec {
                component_type: ComponentType::Image,
                helm_info: HelmInfo::default(),
                image_info: ImageInfo {
                    image_name: image.to_string(),
                },
                rest_schema: RestSchema {
                    port,
                    entries: Vec::new(),
                },
                dependencies: Vec::new(),
            },
        }
    }

    fn helm_component(name: &str, chart: &str, repo: &str, version: &str) -> ComponentDoc {
        ComponentDoc {
            api_version: String::from("onedevx.dev/v1"),
            kind: String::from("Component"),
            metadata: Metadata {
                name: name.to_string(),
            },
            spec: ComponentSpec {
                component_type: ComponentType::Helm,
                helm_info: HelmInfo {
                    chart_name: chart.to_string(),
                    chart_repo: repo.to_string(),
                    chart_version: version.to_string(),
                },
                image_info: ImageInfo::default(),
                rest_schema: RestSchema::default(),
                dependencies: Vec::new(),
            },
        }
    }

    #[test]
    fn test_headless_image_produces_only_workload() {
        let resolver = ComponentResolver::new();
        let doc = image_component("batch", "acme/batch:1", 0);

        let decls = resolver.resolve("onedevx-dev", "jobs", &doc).unwrap();
        assert_eq!(decls.len(), 1);
        let ResourceDecl::Workload(workload) = &decls[0] else {
            panic!("expected a workload declaration");
        };
        assert_eq!(workload.name, "onedevx-batch");
        assert_eq!(workload.replicas, 1);
        assert_eq!(workload.container_name, "batch");
        assert_eq!(workload.labels[COMPONENT_LABEL], "batch");
    }

    #[test]
    fn test_exposed_image_produces_full_routing_surface() {
        let resolver = ComponentResolver::new();
        let doc = image_component("api", "acme/api:2", 8080);

        let decls = resolver.resolve("onedevx-prod", "payments", &doc).unwrap();
        assert_eq!(decls.len(), 4);

        let ResourceDecl::Service(service) = &decls[1] else {
            panic!("expected a service declaration");
        };
        assert_eq!(service.port, 80);
        assert_eq!(service.target_port, 8080);
        assert_eq!(service.selector[COMPONENT_LABEL], "api");

        let ResourceDecl::Middleware(middleware) = &decls[2] else {
            panic!("expected a middleware declaration");
        };
        assert_eq!(middleware.prefix, "/payments");

        let ResourceDecl::RoutingRule(rule) = &decls[3] else {
            panic!("expected a routing rule declaration");
        };
        // The routing prefix comes from the workspec, never the component.
        assert_eq!(rule.match_path, "/payments/ping");
        assert_eq!(rule.middleware, "api");
        assert_eq!(rule.service, "api");
        assert_eq!(rule.service_port, 80);
    }

    #[test]
    fn test_helm_produces_single_release() {
        let resolver = ComponentResolver::new();
        let doc = helm_component("redis", "redis", "https://charts.bitnami.com/bitnami", "19.0.1");

        let decls = resolver.resolve("onedevx-dev", "cache", &doc).unwrap();
        assert_eq!(decls.len(), 1);
        let ResourceDecl::HelmRelease(release) = &decls[0] else {
            panic!("expected a helm release declaration");
        };
        assert_eq!(release.name, "redis");
        assert_eq!(release.namespace, "onedevx-dev");
        assert_eq!(release.repo, "https://charts.bitnami.com/bitnami");
    }

    #[test]
    fn test_helm_with_empty_repo_is_preserved() {
        let resolver = ComponentResolver::new();
        let doc = helm_component("redis", "oci://registry-1.docker.io/bitnamicharts/redis", "", "19.0.1");

        let decls = resolver.resolve("onedevx-dev", "cache", &doc).unwrap();
        let ResourceDecl::HelmRelease(release) = &decls[0] else {
            panic!("expected a helm release declaration");
        };
        assert!(release.repo.is_empty());
    }

    #[test]
    fn test_unknown_type_is_fatal_with_no_declarations() {
        let resolver = ComponentResolver::new();
        let mut doc = image_component("api", "acme/api:2", 8080);
        doc.spec.component_type = ComponentType::Other(String::from("kustomize"));

        let result = resolver.resolve("onedevx-dev", "payments", &doc);
        let Err(OnedevxError::Spec(SpecError::UnsupportedComponentType { component_type })) =
            result
        else {
            panic!("expected an unsupported component type error");
        };
        assert_eq!(component_type, "kustomize");
    }

    #[test]
    fn test_missing_image_name_is_rejected() {
        let resolver = ComponentResolver::new();
        let doc = image_component("api", "", 8080);

        let result = resolver.resolve("onedevx-dev", "payments", &doc);
        assert!(matches!(
            result,
            Err(OnedevxError::Spec(SpecError::MissingField { .. }))
        ));
    }
}

//! Workspec installation orchestrator.
//!
//! Drives a full installation run: create the stack namespace, walk the
//! specification tree for workspecs, and install every component they
//! reference, threading the namespace and the workspec's name (the routing
//! prefix) down the call chain. The run is strictly sequential with no
//! retry; the first error aborts it.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::backend::{Backend, apply};
use crate::error::Result;
use crate::spec::{COMPONENT_MARKER, EntryKind, SpecLoader, WORKSPEC_MARKER, walk_markers};
use crate::synth::{ComponentResolver, MANAGED_PREFIX, ResourceDecl};

/// One resource applied during an installation run.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedResource {
    /// Resource kind.
    pub kind: &'static str,
    /// Resource name.
    pub name: String,
    /// Namespace the resource was created in.
    pub namespace: String,
}

/// Summary of a completed installation run.
#[derive(Debug, Clone, Serialize)]
pub struct InstallSummary {
    /// Namespace everything was installed into.
    pub namespace: String,
    /// Number of workspecs processed.
    pub workspecs: usize,
    /// Number of components installed.
    pub components: usize,
    /// Resources applied, in application order.
    pub resources: Vec<AppliedResource>,
}

/// Orchestrator for installation runs.
pub struct Installer<'a> {
    /// Backend declarations are applied through.
    backend: &'a dyn Backend,
    /// Specification loader.
    loader: SpecLoader,
    /// Component resolver.
    resolver: ComponentResolver,
}

impl<'a> Installer<'a> {
    /// Creates a new installer.
    #[must_use]
    pub const fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            loader: SpecLoader::new(),
            resolver: ComponentResolver::new(),
        }
    }

    /// Runs a full installation of the specification tree under `root` into
    /// the `onedevx-<stack>` namespace.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; namespace creation failure,
    /// malformed specification files, unsupported component types, and
    /// backend failures all abort the run.
    pub async fn run(&self, stack: &str, root: &Path) -> Result<InstallSummary> {
        let namespace = format!("{MANAGED_PREFIX}-{stack}");
        info!(
            "Installing stack '{stack}' into namespace '{namespace}' (backend: {})",
            self.backend.backend_type()
        );

        // Nothing can proceed without the namespace.
        self.backend.create_namespace(&namespace).await?;

        let mut summary = InstallSummary {
            namespace: namespace.clone(),
            workspecs: 0,
            components: 0,
            resources: vec![AppliedResource {
                kind: "Namespace",
                name: namespace.clone(),
                namespace: namespace.clone(),
            }],
        };

        for workspec_path in walk_markers(root, WORKSPEC_MARKER) {
            let workspec_path = workspec_path?;
            self.install_workspec(&namespace, root, &workspec_path, &mut summary)
                .await?;
        }

        info!(
            "Installed {} component(s) across {} workspec(s)",
            summary.components, summary.workspecs
        );
        Ok(summary)
    }

    /// Installs every component referenced by one workspec.
    async fn install_workspec(
        &self,
        namespace: &str,
        root: &Path,
        path: &Path,
        summary: &mut InstallSummary,
    ) -> Result<()> {
        info!("Processing workspec: {}", path.display());
        let workspec = self.loader.load_workspec(path)?;
        summary.workspecs += 1;

        for entry in &workspec.spec.component_list {
            match &entry.kind {
                EntryKind::Directory => {
                    let dir = resolve_entry_path(root, &entry.path);
                    info!("Processing component directory: {}", dir.display());
                    for component_path in walk_markers(&dir, COMPONENT_MARKER) {
                        let component_path = component_path?;
                        self.install_component(
                            namespace,
                            workspec.prefix(),
                            &component_path,
                            summary,
                        )
                        .await?;
                    }
                }
                EntryKind::Other(kind) => {
                    warn!(
                        "Component list entry type not supported: {kind} ({}), skipping",
                        entry.path.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Loads, resolves, and applies one component.
    async fn install_component(
        &self,
        namespace: &str,
        prefix: &str,
        path: &Path,
        summary: &mut InstallSummary,
    ) -> Result<()> {
        info!("Processing component: {}", path.display());
        let component = self.loader.load_component(path)?;

        let declarations = self.resolver.resolve(namespace, prefix, &component)?;
        for declaration in &declarations {
            apply(self.backend, declaration).await?;
            summary.record(declaration);
        }

        summary.components += 1;
        Ok(())
    }
}

impl InstallSummary {
    /// Records one applied declaration.
    fn record(&mut self, declaration: &ResourceDecl) {
        self.resources.push(AppliedResource {
            kind: declaration.kind(),
            name: declaration.name().to_string(),
            namespace: declaration.namespace().to_string(),
        });
    }

    /// Returns the number of applied resources, the namespace included.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

/// Resolves a component-list entry path against the installation root.
fn resolve_entry_path(root: &Path, entry: &Path) -> PathBuf {
    if entry.is_absolute() {
        entry.to_path_buf()
    } else {
        root.join(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, RenderBackend};
    use crate::error::{BackendError, OnedevxError, SpecError};
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn image_component_yaml(name: &str, port: u16) -> String {
        format!(
            "apiVersion: onedevx.dev/v1\nkind: Component\nmetadata:\n  name: {name}\nspec:\n  componentType: image\n  imageInfo:\n    imageName: acme/{name}:1\n  restSchema:\n    port: {port}\n"
        )
    }

    fn workspec_yaml(name: &str, entries: &[(&str, &str)]) -> String {
        let mut yaml = format!(
            "apiVersion: onedevx.dev/v1\nkind: Workspec\nmetadata:\n  name: {name}\nspec:\n  componentList:\n"
        );
        for (kind, path) in entries {
            yaml.push_str(&format!("    - type: {kind}\n      path: {path}\n"));
        }
        yaml
    }

    #[tokio::test]
    async fn test_scenario_image_and_helm_under_one_workspec() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("w1/workspec.yaml"),
            &workspec_yaml("w1", &[("directory", "d1")]),
        );
        write(
            &root.join("d1/c1/component.yaml"),
            &image_component_yaml("c1", 8080),
        );
        write(
            &root.join("d1/c2/component.yaml"),
            "metadata:\n  name: c2\nspec:\n  componentType: helm\n  helmInfo:\n    chartName: redis\n    chartRepo: https://charts.bitnami.com/bitnami\n    chartVersion: 19.0.1\n",
        );

        let backend = RenderBackend::new();
        let installer = Installer::new(&backend);
        let summary = installer.run("dev", root).await.unwrap();

        assert_eq!(summary.namespace, "onedevx-dev");
        assert_eq!(summary.workspecs, 1);
        assert_eq!(summary.components, 2);
        // Namespace + (workload, service, middleware, rule) + helm release.
        assert_eq!(summary.resource_count(), 6);

        let manifests = backend.into_manifests().unwrap();
        let rule = manifests
            .iter()
            .find(|m| m.kind == "IngressRoute")
            .expect("routing rule rendered");
        // The prefix is the workspec name, never the component name.
        assert_eq!(
            rule.manifest["spec"]["routes"][0]["match"],
            "Path(`/w1/ping`)"
        );
        assert!(manifests.iter().any(|m| m.kind == "Deployment" && m.name == "onedevx-c1"));
        assert!(manifests.iter().any(|m| m.kind == "HelmRelease" && m.name == "c2"));
    }

    #[tokio::test]
    async fn test_nested_directories_install_every_component() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("workspec.yaml"),
            &workspec_yaml("deep", &[("directory", "components")]),
        );
        write(
            &root.join("components/a/component.yaml"),
            &image_component_yaml("a", 0),
        );
        write(
            &root.join("components/a/b/component.yaml"),
            &image_component_yaml("b", 0),
        );
        write(
            &root.join("components/c/d/e/component.yaml"),
            &image_component_yaml("e", 0),
        );

        let backend = RenderBackend::new();
        let installer = Installer::new(&backend);
        let summary = installer.run("dev", root).await.unwrap();

        assert_eq!(summary.components, 3);
        let manifests = backend.into_manifests().unwrap();
        let workloads = manifests.iter().filter(|m| m.kind == "Deployment").count();
        assert_eq!(workloads, 3);
        // Headless components get no network surface.
        assert!(!manifests.iter().any(|m| m.kind == "Service"));
    }

    #[tokio::test]
    async fn test_unsupported_entry_kind_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("workspec.yaml"),
            &workspec_yaml("w1", &[("git", "ignored"), ("directory", "d1")]),
        );
        write(
            &root.join("d1/c1/component.yaml"),
            &image_component_yaml("c1", 0),
        );

        let backend = RenderBackend::new();
        let installer = Installer::new(&backend);
        let summary = installer.run("dev", root).await.unwrap();

        // The git entry is skipped; the directory entry after it still lands.
        assert_eq!(summary.components, 1);
    }

    #[tokio::test]
    async fn test_unknown_component_type_aborts_run() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("workspec.yaml"),
            &workspec_yaml("w1", &[("directory", "d1")]),
        );
        write(
            &root.join("d1/c1/component.yaml"),
            "metadata:\n  name: c1\nspec:\n  componentType: kustomize\n",
        );

        let backend = RenderBackend::new();
        let installer = Installer::new(&backend);
        let result = installer.run("dev", root).await;

        assert!(matches!(
            result,
            Err(OnedevxError::Spec(
                SpecError::UnsupportedComponentType { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_malformed_component_aborts_run() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("workspec.yaml"),
            &workspec_yaml("w1", &[("directory", "d1")]),
        );
        write(&root.join("d1/c1/component.yaml"), "spec: [broken");

        let backend = RenderBackend::new();
        let installer = Installer::new(&backend);
        let result = installer.run("dev", root).await;

        assert!(matches!(
            result,
            Err(OnedevxError::Spec(SpecError::ParseError { .. }))
        ));
    }

    #[tokio::test]
    async fn test_namespace_failure_is_fatal_before_any_walk() {
        let dir = TempDir::new().unwrap();

        let mut backend = MockBackend::new();
        backend
            .expect_create_namespace()
            .times(1)
            .returning(|_| Err(OnedevxError::Backend(BackendError::api_error(403, "denied"))));
        backend.expect_backend_type().return_const("mock");

        let installer = Installer::new(&backend);
        let result = installer.run("dev", dir.path()).await;

        assert!(matches!(
            result,
            Err(OnedevxError::Backend(BackendError::ApiRequestFailed {
                status: 403,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_unmodified() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("workspec.yaml"),
            &workspec_yaml("w1", &[("directory", "d1")]),
        );
        write(
            &root.join("d1/c1/component.yaml"),
            &image_component_yaml("c1", 0),
        );

        let mut backend = MockBackend::new();
        backend.expect_backend_type().return_const("mock");
        backend
            .expect_create_namespace()
            .times(1)
            .returning(|_| Ok(()));
        backend
            .expect_create_workload()
            .times(1)
            .returning(|_| Err(OnedevxError::Backend(BackendError::api_error(500, "boom"))));

        let installer = Installer::new(&backend);
        let result = installer.run("dev", root).await;

        assert!(matches!(
            result,
            Err(OnedevxError::Backend(BackendError::ApiRequestFailed {
                status: 500,
                ..
            }))
        ));
    }

    #[test]
    fn test_entry_paths_resolve_against_root() {
        let root = Path::new("/specs");
        assert_eq!(
            resolve_entry_path(root, Path::new("d1")),
            PathBuf::from("/specs/d1")
        );
        assert_eq!(
            resolve_entry_path(root, Path::new("/abs/d1")),
            PathBuf::from("/abs/d1")
        );
    }
}

//! Specification loader.
//!
//! Reads workspec and component documents from disk and decodes them into
//! the typed records in [`super::schema`]. A document either decodes fully or
//! the load fails; there is no partial decode.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::error::{OnedevxError, Result, SpecError};

use super::schema::{ComponentDoc, WorkspecDoc};

/// Loader for specification documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecLoader;

impl SpecLoader {
    /// Creates a new specification loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a component document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load_component(&self, path: impl AsRef<Path>) -> Result<ComponentDoc> {
        self.load(path.as_ref())
    }

    /// Loads a workspec document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load_workspec(&self, path: impl AsRef<Path>) -> Result<WorkspecDoc> {
        self.load(path.as_ref())
    }

    /// Parses a component document from YAML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not match the component schema.
    pub fn parse_component(&self, content: &str, source: Option<&Path>) -> Result<ComponentDoc> {
        Self::parse_yaml(content, source)
    }

    /// Parses a workspec document from YAML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not match the workspec schema.
    pub fn parse_workspec(&self, content: &str, source: Option<&Path>) -> Result<WorkspecDoc> {
        Self::parse_yaml(content, source)
    }

    /// Loads and decodes a document of type `T` from a file.
    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        debug!("Loading specification: {}", path.display());

        if !path.exists() {
            return Err(OnedevxError::Spec(SpecError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            OnedevxError::Spec(SpecError::ReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;

        Self::parse_yaml(&content, Some(path))
    }

    /// Decodes YAML content into a document of type `T`.
    fn parse_yaml<T: DeserializeOwned>(content: &str, source: Option<&Path>) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            OnedevxError::Spec(SpecError::parse(format!("YAML parse error: {e}"), location))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::schema::{ComponentType, EntryKind};
    use std::path::PathBuf;

    #[test]
    fn test_parse_component_image() {
        let yaml = r"
apiVersion: onedevx.dev/v1
kind: Component
metadata:
  name: api
spec:
  componentType: image
  imageInfo:
    imageName: ghcr.io/acme/api:latest
  restSchema:
    port: 8080
";
        let loader = SpecLoader::new();
        let doc = loader.parse_component(yaml, None).unwrap();
        assert_eq!(doc.name(), "api");
        assert_eq!(doc.spec.component_type, ComponentType::Image);
        assert_eq!(doc.spec.image_info.image_name, "ghcr.io/acme/api:latest");
        assert_eq!(doc.spec.rest_schema.port, 8080);
        assert!(doc.spec.dependencies.is_empty());
    }

    #[test]
    fn test_parse_component_helm_without_repo() {
        let yaml = r"
metadata:
  name: redis
spec:
  componentType: helm
  helmInfo:
    chartName: oci://registry-1.docker.io/bitnamicharts/redis
    chartVersion: 19.0.1
";
        let loader = SpecLoader::new();
        let doc = loader.parse_component(yaml, None).unwrap();
        assert_eq!(doc.spec.component_type, ComponentType::Helm);
        assert!(doc.spec.helm_info.chart_repo.is_empty());
        assert_eq!(doc.spec.helm_info.chart_version, "19.0.1");
    }

    #[test]
    fn test_parse_workspec() {
        let yaml = r"
apiVersion: onedevx.dev/v1
kind: Workspec
metadata:
  name: payments
spec:
  componentList:
    - type: directory
      path: payments/components
    - type: git
      path: ignored
";
        let loader = SpecLoader::new();
        let ws = loader.parse_workspec(yaml, None).unwrap();
        assert_eq!(ws.prefix(), "payments");
        assert_eq!(ws.spec.component_list.len(), 2);
        assert_eq!(ws.spec.component_list[0].kind, EntryKind::Directory);
        assert_eq!(
            ws.spec.component_list[0].path,
            PathBuf::from("payments/components")
        );
        assert_eq!(
            ws.spec.component_list[1].kind,
            EntryKind::Other(String::from("git"))
        );
    }

    #[test]
    fn test_parse_malformed_component_fails() {
        let loader = SpecLoader::new();
        let result = loader.parse_component("metadata: [not, a, mapping]", None);
        assert!(matches!(
            result,
            Err(OnedevxError::Spec(SpecError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let loader = SpecLoader::new();
        let result = loader.load_component("/nonexistent/component.yaml");
        assert!(matches!(
            result,
            Err(OnedevxError::Spec(SpecError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_load_component_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("component.yaml");
        std::fs::write(
            &path,
            "metadata:\n  name: worker\nspec:\n  componentType: image\n  imageInfo:\n    imageName: acme/worker:1\n",
        )
        .unwrap();

        let loader = SpecLoader::new();
        let doc = loader.load_component(&path).unwrap();
        assert_eq!(doc.name(), "worker");
        assert_eq!(doc.spec.rest_schema.port, 0);
    }
}

//! Helm chart installation.
//!
//! Chart resolution and installation are delegated entirely to the `helm`
//! CLI; the composer only shapes the invocation and maps failures into typed
//! errors.

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{BackendError, OnedevxError, Result};
use crate::synth::HelmRelease;

/// Installs Helm chart releases through the `helm` CLI.
#[derive(Debug, Clone)]
pub struct HelmRunner {
    /// Helm binary to invoke.
    binary: String,
}

impl Default for HelmRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl HelmRunner {
    /// Creates a new helm runner using the `helm` binary on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: String::from("helm"),
        }
    }

    /// Creates a helm runner using a specific binary.
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Installs a chart release into its target namespace.
    ///
    /// `--repo` is omitted when the release carries no repository, which is
    /// the case for fully-qualified chart locators such as OCI references.
    ///
    /// # Errors
    ///
    /// Returns an error if the helm process cannot be spawned or exits with
    /// a non-zero status.
    pub async fn install(&self, release: &HelmRelease) -> Result<()> {
        let args = Self::install_args(release);
        debug!("Running: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                OnedevxError::Backend(BackendError::ChartInstallFailed {
                    release: release.name.clone(),
                    message: format!("Failed to run {}: {e}", self.binary),
                })
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(OnedevxError::Backend(BackendError::ChartInstallFailed {
                release: release.name.clone(),
                message: stderr,
            }));
        }

        info!(
            "Installed chart release: {} ({} {})",
            release.name, release.chart, release.version
        );
        Ok(())
    }

    /// Builds the argument list for installing a release.
    fn install_args(release: &HelmRelease) -> Vec<String> {
        let mut args = vec![
            String::from("upgrade"),
            String::from("--install"),
            release.name.clone(),
            release.chart.clone(),
            String::from("--namespace"),
            release.namespace.clone(),
            String::from("--version"),
            release.version.clone(),
        ];

        if !release.repo.is_empty() {
            args.push(String::from("--repo"));
            args.push(release.repo.clone());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(repo: &str) -> HelmRelease {
        HelmRelease {
            name: String::from("redis"),
            namespace: String::from("onedevx-dev"),
            chart: String::from("redis"),
            repo: repo.to_string(),
            version: String::from("19.0.1"),
        }
    }

    #[test]
    fn test_install_args_with_repo() {
        let args = HelmRunner::install_args(&release("https://charts.bitnami.com/bitnami"));
        assert_eq!(
            args,
            vec![
                "upgrade",
                "--install",
                "redis",
                "redis",
                "--namespace",
                "onedevx-dev",
                "--version",
                "19.0.1",
                "--repo",
                "https://charts.bitnami.com/bitnami",
            ]
        );
    }

    #[test]
    fn test_install_args_without_repo() {
        let args = HelmRunner::install_args(&release(""));
        assert!(!args.contains(&String::from("--repo")));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_chart_install_failure() {
        let runner = HelmRunner::with_binary("/nonexistent/helm-binary");
        let result = runner.install(&release("")).await;
        assert!(matches!(
            result,
            Err(OnedevxError::Backend(BackendError::ChartInstallFailed { .. }))
        ));
    }
}

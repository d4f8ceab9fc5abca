//! Resource-provisioning backends.
//!
//! The composer only emits declarations; everything behind the [`Backend`]
//! trait owns convergence and idempotency. Two implementations ship:
//! a cluster API backend for live installations and a manifest-rendering
//! backend for dry runs.

mod api;
mod cluster;
mod helm;
mod render;

pub use api::{Backend, apply};
pub use cluster::{API_SERVER_ENV, API_TOKEN_ENV, ClusterBackend, INSECURE_TLS_ENV};
pub use helm::HelmRunner;
pub use render::{RenderBackend, RenderedManifest};

#[cfg(test)]
pub use api::MockBackend;

//! Resource synthesis for resolved components.
//!
//! Turns decoded component documents into typed resource declarations:
//! - Declaration types and their cluster manifest rendering
//! - The resolver dispatching on component type

mod resources;
mod component;

pub use resources::{
    COMPONENT_LABEL, HelmRelease, MANAGED_PREFIX, ResourceDecl, RoutingRule, SERVICE_PORT,
    SMOKE_TEST_PATH, ServiceDecl, StripPrefix, Workload, namespace_manifest,
};
pub use component::ComponentResolver;

// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # onedevx
//!
//! A declarative deployment composer for component-based application stacks.
//!
//! ## Overview
//!
//! onedevx reads a tree of specification files describing logical application
//! components (container images or Helm charts) grouped into workspecs, and
//! translates them into the matching set of cluster resources:
//!
//! - A namespace per deployment stack
//! - A workload per component, plus a service, a prefix-stripping routing
//!   middleware, and a smoke-test routing rule for components that expose a
//!   port
//! - A Helm chart release per chart-based component
//!
//! ## Architecture
//!
//! The pipeline is a strictly sequential walk:
//!
//! 1. **Orchestrator** creates the `onedevx-<stack>` namespace and walks the
//!    tree for `workspec.yaml` files
//! 2. Each workspec's `directory` entries are walked for `component.yaml`
//!    files, with the namespace and the workspec name (the routing prefix)
//!    threaded down
//! 3. The **resolver** dispatches on component type and synthesizes resource
//!    declarations
//! 4. Declarations are shipped through the **backend** seam; the cluster owns
//!    convergence and deduplicates by name
//!
//! The first error anywhere aborts the run; there is no partial-apply mode.
//!
//! ## Modules
//!
//! - [`spec`]: schema, loading, and traversal of specification files
//! - [`synth`]: resource declarations and component resolution
//! - [`backend`]: the provisioning seam (cluster API, helm, dry-run render)
//! - [`installer`]: the installation orchestrator
//! - [`cli`]: command-line interface
//!
//! ## Example
//!
//! ```yaml
//! # workspec.yaml
//! apiVersion: onedevx.dev/v1
//! kind: Workspec
//! metadata:
//!   name: payments
//! spec:
//!   componentList:
//!     - type: directory
//!       path: payments/components
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod backend;
pub mod cli;
pub mod error;
pub mod installer;
pub mod spec;
pub mod synth;

// ============================================================================
// Re-exports
// ============================================================================

pub use backend::{Backend, ClusterBackend, HelmRunner, RenderBackend};
pub use cli::{Cli, Commands, OutputFormat, OutputFormatter};
pub use error::{OnedevxError, Result};
pub use installer::{AppliedResource, InstallSummary, Installer};
pub use spec::{ComponentDoc, ComponentType, SpecLoader, WorkspecDoc};
pub use synth::{ComponentResolver, ResourceDecl};

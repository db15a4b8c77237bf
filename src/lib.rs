//! # nxconverge - Declarative NX-OS Resource Reconciliation
//!
//! nxconverge converges the configuration of a Cisco NX-OS switch towards a
//! declared desired state. Each managed entity type (BGP instance, BGP
//! neighbor, route-map entry, AAA login methods, VTP, TACACS+ server,
//! interface) is described by a static schema table; a single generic adapter
//! reads the live state through a device facade, computes the delta and
//! writes only what differs.
//!
//! ## Core Concepts
//!
//! - **Resource kinds**: schema tables of key fields, properties, composite
//!   groups and cross-property rules
//! - **Identity**: the composite key of an instance, parsed from a title
//! - **Facade**: the device access layer (enumerate, get, set, create, destroy)
//! - **Manifest**: the declared desired state, validated before anything runs
//! - **Reconciliation**: lookup, ensure, delta, composite groups, scalars
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           CLI Interface                             │
//! │               (apply / check / validate / show / kinds)             │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                    │
//!                                    ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Manifest  ──►  Catalog                            │
//! │        (validation, title parsing, per-resource isolation)          │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                    │
//!          ┌─────────────────────────┼─────────────────────────┐
//!          ▼                         ▼                         ▼
//! ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────────┐
//! │ Schema Registry │   │ Reconcile Adapter   │   │ Instance Enumerator │
//! │  (kind tables)  │   │ (delta + setters)   │   │  (canonical reads)  │
//! └─────────────────┘   └─────────────────────┘   └─────────────────────┘
//!                                    │
//!                                    ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Device Facade                               │
//! │                 (MemoryDevice, or a real device SDK)                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use nxconverge::prelude::*;
//!
//! let device = MemoryDevice::new(Platform::N9k);
//! let manifest = Manifest::from_yaml_str(
//!     "resources:\n  - type: cisco_bgp\n    title: \"42\"\n    router_id: 1.1.1.1\n",
//! )
//! .unwrap();
//!
//! let catalog = Catalog::compile(&manifest, SchemaRegistry::builtin(), None).unwrap();
//! let summary = catalog.apply(&device, &ReconcileOptions::new());
//! assert_eq!(summary.changed, 1);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::catalog::{ApplySummary, Catalog, ResourceOutcome};
    pub use crate::enumerate::{enumerate, CurrentState};
    pub use crate::error::{Error, Result};
    pub use crate::facade::{Entity, Facade, FacadeCall, FacadeError, MemoryDevice};
    pub use crate::identity::{parse_title, Identity};
    pub use crate::manifest::{DesiredState, Ensure, Manifest, ResourceDecl};
    pub use crate::platform::Platform;
    pub use crate::reconcile::{reconcile, Action, ReconcileOptions, ReconcileReport};
    pub use crate::schema::{ResourceKind, SchemaRegistry};
    pub use crate::value::{Desired, PropertyValue};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases.
pub mod error;

/// Property values and the `default` sentinel.
pub mod value;

/// Nexus hardware families.
pub mod platform;

/// Resource kind tables and the schema registry.
pub mod schema;

/// Composite identities and title parsing.
pub mod identity;

// ============================================================================
// Device Access
// ============================================================================

/// Device facade traits and the in-memory device.
pub mod facade;

/// Instance enumeration.
pub mod enumerate;

// ============================================================================
// Reconciliation
// ============================================================================

/// The per-instance reconciliation state machine.
pub mod reconcile;

/// Manifest parsing and desired-state validation.
pub mod manifest;

/// Whole-manifest application with per-resource failure isolation.
pub mod catalog;

/// Layered configuration (files and environment).
pub mod config;

pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

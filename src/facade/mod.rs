//! Device facade
//!
//! The reconciliation engine never talks to a switch directly. It goes through
//! the [`Facade`] trait, which enumerates instances of a kind, hands out
//! [`Entity`] handles and answers default-value queries. Every property read
//! or write on a handle maps to one device interaction.
//!
//! [`MemoryDevice`] is the in-process implementation used by the CLI (backed
//! by a snapshot file) and by the test suite (with a call log and fault
//! injection).

pub mod memory;

pub use memory::{DeviceSnapshot, EntityRecord, MemoryDevice};

use crate::identity::Identity;
use crate::platform::Platform;
use crate::schema::CompositeGroup;
use crate::value::PropertyValue;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by a device facade.
///
/// These are surfaced to the user unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacadeError {
    /// The device could not be reached.
    #[error("Device connection failed: {0}")]
    Connection(String),

    /// The device refused a command.
    #[error("Device rejected '{command}': {message}")]
    Rejected {
        /// Command or setter that was refused
        command: String,
        /// Device error text
        message: String,
    },

    /// The addressed entity does not exist.
    #[error("{kind} '{identity}' not found on device")]
    NotFound {
        /// Resource kind name
        kind: String,
        /// Identity display form
        identity: String,
    },

    /// The device does not implement the operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl FacadeError {
    pub fn rejected(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, identity: &Identity) -> Self {
        Self::NotFound {
            kind: kind.into(),
            identity: identity.to_string(),
        }
    }
}

/// Result type for facade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

/// Access to one device
pub trait Facade {
    /// Hardware family of the device.
    fn platform(&self) -> Platform;

    /// Identities of every configured instance of `kind`.
    fn instances(&self, kind: &str) -> FacadeResult<Vec<Identity>>;

    /// Handle on an existing instance.
    fn entity(&self, kind: &str, identity: &Identity) -> FacadeResult<Box<dyn Entity + '_>>;

    /// Create an instance with every property unconfigured.
    fn instantiate(&self, kind: &str, identity: &Identity)
        -> FacadeResult<Box<dyn Entity + '_>>;

    /// The device's default for a property; `None` means unconfigured.
    fn default_value(&self, kind: &str, property: &str) -> FacadeResult<Option<PropertyValue>>;
}

/// Handle on one configured instance
pub trait Entity {
    fn identity(&self) -> &Identity;

    /// Read a property; `None` means unconfigured.
    fn get(&self, property: &str) -> FacadeResult<Option<PropertyValue>>;

    /// Write one independent property. `None` removes the configuration.
    fn set(&mut self, property: &str, value: Option<PropertyValue>) -> FacadeResult<()>;

    /// Write all members of a composite group in one call.
    fn set_group(
        &mut self,
        group: &CompositeGroup,
        values: &[(&str, Option<PropertyValue>)],
    ) -> FacadeResult<()>;

    /// Remove the instance from the device.
    fn destroy(self: Box<Self>) -> FacadeResult<()>;
}

/// One recorded facade interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum FacadeCall {
    Instances {
        kind: String,
    },
    Get {
        kind: String,
        identity: String,
        property: String,
    },
    DefaultValue {
        kind: String,
        property: String,
    },
    Create {
        kind: String,
        identity: String,
    },
    Destroy {
        kind: String,
        identity: String,
    },
    Set {
        kind: String,
        identity: String,
        property: String,
        value: Option<PropertyValue>,
    },
    SetGroup {
        kind: String,
        identity: String,
        setter: String,
        values: Vec<(String, Option<PropertyValue>)>,
    },
}

impl FacadeCall {
    /// Whether the call changes device state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            FacadeCall::Create { .. }
                | FacadeCall::Destroy { .. }
                | FacadeCall::Set { .. }
                | FacadeCall::SetGroup { .. }
        )
    }

    /// Setter name for `Set` and `SetGroup` calls.
    pub fn setter(&self) -> Option<&str> {
        match self {
            FacadeCall::Set { property, .. } => Some(property),
            FacadeCall::SetGroup { setter, .. } => Some(setter),
            _ => None,
        }
    }
}

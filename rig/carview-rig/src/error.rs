//! Error types for the wheel rig.

use std::fmt;

use crate::wheel::WheelRole;

/// Result type for rig operations.
pub type Result<T> = std::result::Result<T, RigError>;

/// Errors that can occur while configuring the wheel rig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigError {
    /// Axis name was not one of `x`, `y` or `z`.
    UnknownAxis {
        /// The rejected input.
        input: String,
    },
    /// A rest orientation was already captured for this role.
    AlreadyCaptured {
        /// The role that was captured twice.
        role: WheelRole,
        /// Identifier of the wheel that holds the slot.
        existing: String,
    },
    /// Node name does not follow the wheel naming convention.
    UnknownWheelNode {
        /// The node name that was looked up.
        name: String,
    },
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAxis { input } => {
                write!(f, "unknown axis '{input}', expected one of x, y, z")
            }
            Self::AlreadyCaptured { role, existing } => {
                write!(
                    f,
                    "rest orientation for {role} already captured from '{existing}'"
                )
            }
            Self::UnknownWheelNode { name } => {
                write!(f, "node '{name}' is not a wheel node")
            }
        }
    }
}

impl std::error::Error for RigError {}

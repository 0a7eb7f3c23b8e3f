//! Wheel roles and captured rest orientations.
//!
//! The rig holds one slot per [`WheelRole`], filled once when the vehicle
//! mesh finishes loading. The per-frame path indexes slots by role and never
//! matches node names.

use std::fmt;

use glam::Quat;

use crate::error::{Result, RigError};

/// Position of a wheel on the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelRole {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelRole {
    /// All roles, in slot order.
    pub const ALL: [WheelRole; 4] = [
        WheelRole::FrontLeft,
        WheelRole::FrontRight,
        WheelRole::RearLeft,
        WheelRole::RearRight,
    ];

    /// Slot index in a [`WheelRig`].
    pub fn index(self) -> usize {
        match self {
            WheelRole::FrontLeft => 0,
            WheelRole::FrontRight => 1,
            WheelRole::RearLeft => 2,
            WheelRole::RearRight => 3,
        }
    }

    /// Whether this wheel is on the steered axle.
    pub fn is_front(self) -> bool {
        matches!(self, WheelRole::FrontLeft | WheelRole::FrontRight)
    }

    /// Whether this wheel's rest pose is mirrored relative to its axle partner,
    /// so a shared steering command must be sign-flipped.
    pub fn is_mirrored(self) -> bool {
        self == WheelRole::FrontRight
    }

    /// Scene node name for this role.
    pub fn node_name(self) -> &'static str {
        match self {
            WheelRole::FrontLeft => "wheel_front_left",
            WheelRole::FrontRight => "wheel_front_right",
            WheelRole::RearLeft => "wheel_rear_left",
            WheelRole::RearRight => "wheel_rear_right",
        }
    }

    /// Role for a scene node name, if it follows the naming convention.
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.node_name() == name)
    }
}

impl fmt::Display for WheelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WheelRole::FrontLeft => "front left",
            WheelRole::FrontRight => "front right",
            WheelRole::RearLeft => "rear left",
            WheelRole::RearRight => "rear right",
        };
        f.write_str(label)
    }
}

/// A wheel's authored pose, captured once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelRestState {
    /// Stable identifier (the scene node name).
    pub wheel_id: String,
    /// Rotation from the wheel's neutral pose to its as-authored pose.
    pub rest_orientation: Quat,
    /// Where the wheel sits on the vehicle.
    pub role: WheelRole,
}

/// Fixed set of wheels, one slot per role.
#[derive(Debug, Clone, Default)]
pub struct WheelRig {
    slots: [Option<WheelRestState>; 4],
}

impl WheelRig {
    /// Empty rig with no captured wheels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wheel's rest orientation.
    ///
    /// Each role can be captured once. A second capture would read back an
    /// orientation the solver has already modified, so it is rejected and the
    /// original rest state is kept.
    pub fn capture(
        &mut self,
        role: WheelRole,
        wheel_id: impl Into<String>,
        rest_orientation: Quat,
    ) -> Result<&WheelRestState> {
        let slot = &mut self.slots[role.index()];
        if let Some(existing) = slot.as_ref() {
            return Err(RigError::AlreadyCaptured {
                role,
                existing: existing.wheel_id.clone(),
            });
        }

        let wheel_id = wheel_id.into();
        tracing::debug!("Captured rest orientation for {role} from '{wheel_id}'");
        Ok(slot.insert(WheelRestState {
            wheel_id,
            rest_orientation,
            role,
        }))
    }

    /// Capture a wheel by node name, inferring its role.
    pub fn capture_named(&mut self, name: &str, rest_orientation: Quat) -> Result<WheelRole> {
        let role = WheelRole::from_node_name(name).ok_or_else(|| RigError::UnknownWheelNode {
            name: name.to_string(),
        })?;
        self.capture(role, name, rest_orientation)?;
        Ok(role)
    }

    /// Rest state for a role, if captured.
    pub fn get(&self, role: WheelRole) -> Option<&WheelRestState> {
        self.slots[role.index()].as_ref()
    }

    /// Captured wheels in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &WheelRestState> {
        self.slots.iter().flatten()
    }

    /// Roles with no captured wheel.
    pub fn missing(&self) -> Vec<WheelRole> {
        WheelRole::ALL
            .into_iter()
            .filter(|role| self.slots[role.index()].is_none())
            .collect()
    }

    /// Number of captured wheels.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether no wheel has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether all four roles are captured.
    pub fn is_complete(&self) -> bool {
        self.len() == WheelRole::ALL.len()
    }
}

//! Coordinate axis selection and the operator-facing axis configuration.

use std::{fmt, str::FromStr};

use glam::Vec3;

use crate::error::{Result, RigError};

/// A single coordinate axis.
///
/// There is no "none" value; an axis configuration always names an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// All axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Index of this axis (0 = X, 1 = Y, 2 = Z).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for a raw index.
    ///
    /// An index outside `0..3` is a programming error and panics.
    pub fn from_index(index: usize) -> Self {
        assert!(index < 3, "axis index {index} out of range");
        Self::ALL[index]
    }

    /// Short uppercase label.
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Axis {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(RigError::UnknownAxis {
                input: other.to_string(),
            }),
        }
    }
}

/// Default roll step in radians per frame.
pub const DEFAULT_ROLL_SPEED: f32 = 0.05;

/// Operator-adjustable axis and override parameters.
///
/// Every field takes effect on the next frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    /// Axis the front wheels steer about, in wheel-local space.
    pub steering_axis: Axis,
    /// Axis every wheel spins about, in wheel-local space.
    pub roll_axis: Axis,
    /// Added to the controller's steering angle before mirroring (radians).
    pub manual_steering_offset: f32,
    /// Roll step added each frame (radians per frame).
    pub manual_roll_speed: f32,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            steering_axis: Axis::Y,
            roll_axis: Axis::X,
            manual_steering_offset: 0.0,
            manual_roll_speed: DEFAULT_ROLL_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_unit_vectors() {
        assert_eq!(Axis::X.unit(), Vec3::X);
        assert_eq!(Axis::Y.unit(), Vec3::Y);
        assert_eq!(Axis::Z.unit(), Vec3::Z);
        for axis in Axis::ALL {
            assert_eq!(axis.unit().length(), 1.0);
            assert_eq!(Axis::from_index(axis.index()), axis);
        }
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(" Y ".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert!(matches!(
            "w".parse::<Axis>(),
            Err(RigError::UnknownAxis { input }) if input == "w"
        ));
        assert!("".parse::<Axis>().is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_axis_from_index_out_of_range() {
        let _ = Axis::from_index(3);
    }

    #[test]
    fn test_default_config() {
        let config = AxisConfig::default();
        assert_eq!(config.steering_axis, Axis::Y);
        assert_eq!(config.roll_axis, Axis::X);
        assert_eq!(config.manual_steering_offset, 0.0);
        assert_eq!(config.manual_roll_speed, DEFAULT_ROLL_SPEED);
    }
}

//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use bevy::prelude::*;
use carview_rig::{Axis, AxisConfig, DEFAULT_ROLL_SPEED};

/// Default vehicle model, relative to the asset folder.
pub const DEFAULT_MODEL: &str = "models/car.glb";

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Path of the glTF model to load, relative to the asset folder.
    pub model: String,
    /// Initial axis configuration for the wheel rig.
    pub axes: AxisConfig,
    /// Whether rates scale with elapsed time rather than rendered frames.
    pub time_scaled: bool,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            axes: AxisConfig::default(),
            time_scaled: true,
        }
    }
}

/// Parse an axis name (`x`, `y` or `z`).
#[cfg_attr(target_family = "wasm", allow(dead_code))]
fn parse_axis(s: &str) -> Result<Axis, String> {
    s.parse::<Axis>().map_err(|e| e.to_string())
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "Interactive 3D vehicle viewer")]
    struct CliArgs {
        /// glTF model to load, relative to the asset folder.
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Wheel-local axis the front wheels steer about (x, y or z).
        #[arg(long, value_parser = parse_axis, default_value = "y")]
        steering_axis: Axis,

        /// Wheel-local axis the wheels roll about (x, y or z).
        #[arg(long, value_parser = parse_axis, default_value = "x")]
        roll_axis: Axis,

        /// Constant steering offset in radians, added before mirroring.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        steering_offset: f32,

        /// Roll step in radians per reference frame.
        #[arg(long, default_value_t = DEFAULT_ROLL_SPEED, allow_hyphen_values = true)]
        roll_speed: f32,

        /// Advance steering and roll once per rendered frame instead of by elapsed time.
        #[arg(long)]
        per_frame: bool,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        LaunchParams {
            model: args.model,
            axes: AxisConfig {
                steering_axis: args.steering_axis,
                roll_axis: args.roll_axis,
                manual_steering_offset: args.steering_offset,
                manual_roll_speed: args.roll_speed,
            },
            time_scaled: !args.per_frame,
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}

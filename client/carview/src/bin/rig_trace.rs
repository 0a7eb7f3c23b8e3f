//! Headless trace of the wheel rig.
//!
//! Runs the steering and roll model for a scripted key sequence and writes one
//! CSV row per frame to stdout: the held keys, the steering and roll angles,
//! and each wheel's orientation quaternion. Useful for checking axis choices
//! and tuning constants without opening a window.
//!
//! ```text
//! rig-trace --script left:10,none:5,right:20 --roll-axis z > trace.csv
//! ```

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::io::{BufWriter, Write};

    use carview_rig::{
        Axis, AxisConfig, DEFAULT_ROLL_SPEED, FrameStep, RigState, SteerInput, SteerKey,
        SteeringController, WheelRig, WheelRole, compute_all, tick,
    };
    use clap::Parser;
    use glam::Quat;

    /// Held keys for a run of frames.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) struct Segment {
        pub input: SteerInput,
        pub frames: u32,
    }

    /// Parse one `keys:frames` script segment.
    ///
    /// Keys are `left`, `right`, `both` or `none`.
    pub(crate) fn parse_segment(s: &str) -> Result<Segment, String> {
        let (keys, frames) = s
            .split_once(':')
            .ok_or_else(|| format!("expected keys:frames, got '{s}'"))?;
        let input = match keys.trim() {
            "left" => SteerInput::new(true, false),
            "right" => SteerInput::new(false, true),
            "both" => SteerInput::new(true, true),
            "none" => SteerInput::new(false, false),
            other => return Err(format!("unknown keys '{other}'")),
        };
        let frames = frames
            .trim()
            .parse()
            .map_err(|e| format!("invalid frame count '{frames}': {e}"))?;
        Ok(Segment { input, frames })
    }

    fn parse_axis(s: &str) -> Result<Axis, String> {
        s.parse::<Axis>().map_err(|e| e.to_string())
    }

    #[derive(Parser)]
    #[command(about = "Trace the wheel rig for a scripted key sequence as CSV")]
    struct CliArgs {
        /// Comma-separated `keys:frames` segments, e.g. `left:10,none:5`.
        #[arg(
            long,
            value_delimiter = ',',
            value_parser = parse_segment,
            default_value = "left:10,none:5"
        )]
        script: Vec<Segment>,

        /// Wheel-local axis the front wheels steer about (x, y or z).
        #[arg(long, value_parser = parse_axis, default_value = "y")]
        steering_axis: Axis,

        /// Wheel-local axis the wheels roll about (x, y or z).
        #[arg(long, value_parser = parse_axis, default_value = "x")]
        roll_axis: Axis,

        /// Constant steering offset in radians.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        steering_offset: f32,

        /// Roll step in radians per frame.
        #[arg(long, default_value_t = DEFAULT_ROLL_SPEED, allow_hyphen_values = true)]
        roll_speed: f32,

        /// Treat each frame as this many seconds of elapsed time instead of
        /// one fixed step.
        #[arg(long)]
        dt: Option<f32>,

        /// Give the right-hand wheels a half-turn rest orientation about the
        /// steering axis, as mirrored wheel meshes usually have.
        #[arg(long)]
        mirrored: bool,
    }

    /// Rest orientations for a synthetic vehicle.
    pub(crate) fn synthetic_rig(steering_axis: Axis, mirrored: bool) -> WheelRig {
        let mut rig = WheelRig::new();
        for role in WheelRole::ALL {
            let right = matches!(role, WheelRole::FrontRight | WheelRole::RearRight);
            let rest = if mirrored && right {
                Quat::from_axis_angle(steering_axis.unit(), std::f32::consts::PI)
            } else {
                Quat::IDENTITY
            };
            // Each role is captured exactly once into a fresh rig.
            if let Err(e) = rig.capture(role, role.node_name(), rest) {
                tracing::warn!("{e}");
            }
        }
        rig
    }

    fn csv_header() -> String {
        let mut header = String::from("frame,left,right,steer,roll");
        for role in WheelRole::ALL {
            let name = role.node_name();
            for component in ["x", "y", "z", "w"] {
                header.push_str(&format!(",{name}_{component}"));
            }
        }
        header
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();

        let args = CliArgs::parse();
        let config = AxisConfig {
            steering_axis: args.steering_axis,
            roll_axis: args.roll_axis,
            manual_steering_offset: args.steering_offset,
            manual_roll_speed: args.roll_speed,
        };
        let step = args.dt.map_or(FrameStep::PerFrame, FrameStep::Elapsed);
        let controller = SteeringController::default();
        let rig = synthetic_rig(config.steering_axis, args.mirrored);

        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        writeln!(out, "{}", csv_header())?;

        let mut state = RigState::default();
        let mut frame = 0_u64;
        for segment in &args.script {
            for _ in 0..segment.frames {
                state = tick(state, &segment.input, &config, &controller, step);
                frame += 1;

                write!(
                    out,
                    "{frame},{},{},{:.6},{:.6}",
                    u8::from(segment.input.is_held(SteerKey::Left)),
                    u8::from(segment.input.is_held(SteerKey::Right)),
                    state.steering_angle,
                    state.roll_angle()
                )?;
                let wheels =
                    compute_all(rig.iter(), state.steering_angle, &config, state.roll_angle());
                for wheel in wheels {
                    let q = wheel.orientation;
                    write!(out, ",{:.6},{:.6},{:.6},{:.6}", q.x, q.y, q.z, q.w)?;
                }
                writeln!(out)?;
            }
        }
        out.flush()?;

        tracing::info!(
            "Traced {frame} frame(s); final steer {:.4} rad, roll {:.4} rad",
            state.steering_angle,
            state.roll_angle()
        );
        Ok(())
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_family = "wasm")]
fn main() {}

//! Mini Golf - a turn-based, top-down miniature golf simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (course geometry, hazards, strokes, turns, scoring)
//! - `settings`: Round configuration loaded from JSON
//!
//! Rendering and input widgets live outside this crate. The simulation exposes
//! state (ball positions, shapes, messages, scorecard) and accepts primitive
//! commands (aim, power, take shot, advance hole).

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Authoring canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Ball radius (inflates tree containment)
    pub const BALL_RADIUS: f32 = 5.0;
    /// Cup radius for the sink check
    pub const HOLE_RADIUS: f32 = 10.0;
    /// A ball that dies within this distance of the cup edge still drops
    pub const LIP_TOLERANCE: f32 = 2.0;

    /// Distance travelled per simulation step
    pub const STEP_LENGTH: f32 = 2.0;
    /// Power units to canvas units
    pub const DISTANCE_SCALE: f32 = 3.0;
    pub const MIN_POWER: f32 = 1.0;
    pub const MAX_POWER: f32 = 100.0;
    /// Remaining power (power units) above which the ball skips over the cup
    pub const SINK_POWER_THRESHOLD: f32 = 10.0;

    /// Max deviation of a flattened curve from the authored one
    pub const FLATTEN_TOLERANCE: f32 = 0.5;
    /// Subdivision depth cap for curve flattening
    pub const FLATTEN_MAX_DEPTH: u32 = 16;

    /// Max per-axis offset for balls placed at the tee
    pub const TEE_SCATTER: f32 = 8.0;

    pub const MAX_PLAYERS: usize = 4;
    pub const MAX_HOLES: usize = 18;
    /// Authored course table length
    pub const COURSE_COUNT: usize = 9;
}

/// Clamp an aim angle to [0, 360] degrees
#[inline]
pub fn clamp_angle(degrees: f32) -> f32 {
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.clamp(0.0, 360.0)
}

/// Clamp shot power to [MIN_POWER, MAX_POWER]
#[inline]
pub fn clamp_power(power: f32) -> f32 {
    if power.is_nan() {
        return consts::MIN_POWER;
    }
    power.clamp(consts::MIN_POWER, consts::MAX_POWER)
}

/// Unit direction for an aim angle.
///
/// 0 degrees points up the screen (negative y) and angles increase clockwise,
/// so 90 is right and 180 is down.
#[inline]
pub fn aim_direction(degrees: f32) -> Vec2 {
    let rad = (degrees - 90.0).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Aim angle (degrees in [0, 360)) that points from `from` toward `to`
#[inline]
pub fn aim_angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    let deg = d.x.atan2(-d.y).to_degrees();
    if deg < 0.0 { deg + 360.0 } else { deg }
}

// Game configuration constants
// These are mirrored by the client renderer - must match exactly!

use core::ops::Range;

/// Maximum distance between a click and the ball for the click to count as a catch.
/// The comparison is inclusive.
pub const ACCEPTANCE_THRESHOLD: f64 = 20.0;

/// Probability that a new session uses the free-fall ("drop") variant.
pub const FREE_FALL_PROBABILITY: f64 = 0.5;

/// Projectile gravity (units/s²)
pub const PROJECTILE_GRAVITY: Range<f64> = 200.0..400.0;

/// Projectile launch speed (units/s)
pub const PROJECTILE_INITIAL_SPEED: Range<f64> = 200.0..300.0;

/// Projectile launch angle (radians)
pub const PROJECTILE_LAUNCH_ANGLE: Range<f64> = 0.7..1.3;

/// Horizontal drag coefficient (1/s)
pub const PROJECTILE_DRAG_COEFFICIENT: Range<f64> = 0.1..0.15;

/// Free-fall gravity (units/s²)
pub const FREE_FALL_GRAVITY: Range<f64> = 150.0..250.0;

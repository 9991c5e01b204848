use rand::Rng;

use crate::constants::*;
use crate::Motion;

/// Draw a fresh set of session parameters.
///
/// Picks the variant with a fixed weight, then samples every parameter
/// uniformly within its half-open range.
pub fn sample_motion<R: Rng>(rng: &mut R) -> Motion {
    if rng.random_bool(FREE_FALL_PROBABILITY) {
        Motion::FreeFall {
            gravity: rng.random_range(FREE_FALL_GRAVITY),
        }
    } else {
        Motion::ProjectileWithDrag {
            gravity: rng.random_range(PROJECTILE_GRAVITY),
            initial_speed: rng.random_range(PROJECTILE_INITIAL_SPEED),
            launch_angle: rng.random_range(PROJECTILE_LAUNCH_ANGLE),
            drag_coefficient: rng.random_range(PROJECTILE_DRAG_COEFFICIENT),
        }
    }
}

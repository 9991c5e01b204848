use crate::constants::ACCEPTANCE_THRESHOLD;
use crate::{Click, Motion};

/// Ball position in game units. `y` grows upward from the launch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }
}

/// Outcome of comparing a click against the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTest {
    pub position: Position,
    pub distance: f64,
    pub valid: bool,
}

/// Ball position `t` seconds after launch.
///
/// Horizontal drag is the linear attenuation `1 - k*t` the client renders,
/// not an exponential model. Both sides must evaluate the same formula.
pub fn predict_position(motion: &Motion, t: f64) -> Position {
    match *motion {
        Motion::ProjectileWithDrag {
            gravity,
            initial_speed,
            launch_angle,
            drag_coefficient,
        } => {
            let vx = initial_speed * launch_angle.cos();
            let vy = initial_speed * launch_angle.sin();
            Position {
                x: vx * t * (1.0 - drag_coefficient * t),
                y: vy * t - 0.5 * gravity * t * t,
            }
        }
        Motion::FreeFall { gravity } => Position {
            x: 0.0,
            y: -0.5 * gravity * t * t,
        },
    }
}

/// Check a click against the model position at the click's elapsed time.
pub fn hit_test(motion: &Motion, click: &Click) -> HitTest {
    let position = predict_position(motion, click.elapsed);
    let distance = position.distance_to(click.x, click.y);
    HitTest {
        position,
        distance,
        valid: distance <= ACCEPTANCE_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 0.01;

    fn projectile() -> Motion {
        Motion::ProjectileWithDrag {
            gravity: 300.0,
            initial_speed: 250.0,
            launch_angle: 1.0,
            drag_coefficient: 0.12,
        }
    }

    #[test]
    fn projectile_position_at_one_second() {
        let p = predict_position(&projectile(), 1.0);
        // vx = 135.076, vy = 210.368
        assert!((p.x - 118.867).abs() < EPS, "x = {}", p.x);
        assert!((p.y - 60.368).abs() < EPS, "y = {}", p.y);
    }

    #[test]
    fn projectile_starts_at_origin() {
        assert_eq!(predict_position(&projectile(), 0.0), Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn drag_is_linear_in_time() {
        // At t = 1/k the horizontal term collapses back to zero.
        let p = predict_position(&projectile(), 1.0 / 0.12);
        assert!(p.x.abs() < 1e-9, "x = {}", p.x);
    }

    #[test]
    fn free_fall_position_at_one_second() {
        let p = predict_position(&Motion::FreeFall { gravity: 200.0 }, 1.0);
        assert_eq!(p, Position { x: 0.0, y: -100.0 });
    }

    #[test]
    fn click_on_the_ball_is_valid() {
        let click = Click { x: 118.87, y: 60.37, elapsed: 1.0 };
        let hit = hit_test(&projectile(), &click);
        assert!(hit.valid);
        assert!(hit.distance < 0.01);
    }

    #[test]
    fn far_click_is_invalid() {
        let hit = hit_test(&projectile(), &Click { x: 400.0, y: 400.0, elapsed: 1.0 });
        assert!(!hit.valid);
        assert!(hit.distance > ACCEPTANCE_THRESHOLD);
    }

    #[test]
    fn threshold_is_inclusive() {
        let motion = Motion::FreeFall { gravity: 200.0 };
        let on_edge = hit_test(&motion, &Click { x: 20.0, y: -100.0, elapsed: 1.0 });
        assert_eq!(on_edge.distance, 20.0);
        assert!(on_edge.valid);

        let past_edge = hit_test(&motion, &Click { x: 20.5, y: -100.0, elapsed: 1.0 });
        assert!(!past_edge.valid);
    }

    proptest! {
        #[test]
        fn free_fall_never_moves_horizontally(gravity in 150.0f64..250.0, t in 0.0f64..60.0) {
            let p = predict_position(&Motion::FreeFall { gravity }, t);
            prop_assert_eq!(p.x, 0.0);
        }

        #[test]
        fn prediction_is_deterministic(
            gravity in 200.0f64..400.0,
            speed in 200.0f64..300.0,
            angle in 0.7f64..1.3,
            drag in 0.1f64..0.15,
            t in 0.0f64..10.0,
        ) {
            let motion = Motion::ProjectileWithDrag {
                gravity,
                initial_speed: speed,
                launch_angle: angle,
                drag_coefficient: drag,
            };
            prop_assert_eq!(predict_position(&motion, t), predict_position(&motion, t));
        }
    }
}

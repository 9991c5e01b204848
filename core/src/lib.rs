//! Shared types for the catch minigame: motion variants, the session record
//! exchanged with clients, the trajectory model and parameter sampling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constants;
pub mod params;
pub mod trajectory;

pub use params::sample_motion;
pub use trajectory::{hit_test, predict_position, HitTest, Position};

/// Motion variant, using the names the client protocol already speaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Ball launched at an angle with linear horizontal drag
    #[serde(rename = "bounce")]
    ProjectileWithDrag,
    /// Ball dropped straight down
    #[serde(rename = "drop")]
    FreeFall,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::ProjectileWithDrag => write!(f, "bounce"),
            GameMode::FreeFall => write!(f, "drop"),
        }
    }
}

/// Physics parameters of a session, tagged by variant.
///
/// Each variant only carries the values its formula reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    ProjectileWithDrag {
        gravity: f64,
        initial_speed: f64,
        launch_angle: f64,
        drag_coefficient: f64,
    },
    FreeFall {
        gravity: f64,
    },
}

impl Motion {
    pub fn mode(&self) -> GameMode {
        match self {
            Motion::ProjectileWithDrag { .. } => GameMode::ProjectileWithDrag,
            Motion::FreeFall { .. } => GameMode::FreeFall,
        }
    }

    pub fn gravity(&self) -> f64 {
        match *self {
            Motion::ProjectileWithDrag { gravity, .. } | Motion::FreeFall { gravity } => gravity,
        }
    }
}

/// A click submitted by the player, `elapsed` seconds after the round started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub x: f64,
    pub y: f64,
    pub elapsed: f64,
}

/// Full parameter record of a session, as handed to the client.
///
/// The renderer needs every sampled value to replay the same trajectory, so
/// the layout is flat and unused values are zero for free-fall sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    #[serde(rename = "session_id")]
    pub id: String,
    #[serde(rename = "game_mode")]
    pub mode: GameMode,
    pub gravity: f64,
    #[serde(rename = "velocity")]
    pub initial_speed: f64,
    #[serde(rename = "angle")]
    pub launch_angle: f64,
    #[serde(rename = "friction")]
    pub drag_coefficient: f64,
    /// Creation time, Unix nanoseconds on the wire
    #[serde(rename = "startTime", with = "chrono::serde::ts_nanoseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub catch_count: u64,
}

/// Errors from rebuilding a [`Motion`] out of a flat record.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl SessionRecord {
    pub fn new(id: String, motion: &Motion, created_at: DateTime<Utc>, catch_count: u64) -> Self {
        let (initial_speed, launch_angle, drag_coefficient) = match *motion {
            Motion::ProjectileWithDrag {
                initial_speed,
                launch_angle,
                drag_coefficient,
                ..
            } => (initial_speed, launch_angle, drag_coefficient),
            Motion::FreeFall { .. } => (0.0, 0.0, 0.0),
        };

        Self {
            id,
            mode: motion.mode(),
            gravity: motion.gravity(),
            initial_speed,
            launch_angle,
            drag_coefficient,
            created_at,
            catch_count,
        }
    }

    /// Rebuild the tagged motion from the flat record.
    ///
    /// Fields that do not apply to the record's mode are ignored.
    pub fn motion(&self) -> Result<Motion, RecordError> {
        let gravity = checked("gravity", self.gravity)?;
        match self.mode {
            GameMode::ProjectileWithDrag => Ok(Motion::ProjectileWithDrag {
                gravity,
                initial_speed: checked("velocity", self.initial_speed)?,
                launch_angle: finite("angle", self.launch_angle)?,
                drag_coefficient: checked("friction", self.drag_coefficient)?,
            }),
            GameMode::FreeFall => Ok(Motion::FreeFall { gravity }),
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::InvalidParameter { name, value })
    }
}

fn checked(name: &'static str, value: f64) -> Result<f64, RecordError> {
    match finite(name, value)? {
        v if v >= 0.0 => Ok(v),
        _ => Err(RecordError::InvalidParameter { name, value }),
    }
}

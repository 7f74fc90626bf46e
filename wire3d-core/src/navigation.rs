/// Discrete camera motion in the camera's own view-reference frame
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::SceneError;
use crate::projection::View;
use crate::transform::Transform;

/// Distance travelled by one move command
pub const MOVE_STEP: f64 = 1.0;
/// Angle turned by one rotate command (radians)
pub const ROTATE_STEP: f64 = 2.0 * std::f64::consts::PI / 180.0;

/// Navigation commands accepted by [`navigate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    RotateLeft,
    RotateRight,
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
}

impl Navigation {
    pub const ALL: [Navigation; 6] = [
        Navigation::RotateLeft,
        Navigation::RotateRight,
        Navigation::MoveLeft,
        Navigation::MoveRight,
        Navigation::MoveForward,
        Navigation::MoveBackward,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Navigation::RotateLeft => "rotateLeft",
            Navigation::RotateRight => "rotateRight",
            Navigation::MoveLeft => "moveLeft",
            Navigation::MoveRight => "moveRight",
            Navigation::MoveForward => "moveForward",
            Navigation::MoveBackward => "moveBackward",
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Navigation {
    type Err = String;

    /// Accepts `rotateLeft`, `rotate-left` and `rotate_left` spellings, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Navigation::ALL
            .into_iter()
            .find(|cmd| cmd.name().to_ascii_lowercase() == key)
            .ok_or_else(|| format!("unknown navigation command `{}`", s))
    }
}

/// Apply one navigation step to `view`.
///
/// The frame is derived before anything is written, so a degenerate camera
/// returns [`SceneError::DegenerateCamera`] and leaves `view` unchanged.
pub fn navigate(view: &mut View, command: Navigation) -> Result<(), SceneError> {
    let frame = view.frame()?;

    match command {
        Navigation::MoveForward => translate(view, -frame.n * MOVE_STEP),
        Navigation::MoveBackward => translate(view, frame.n * MOVE_STEP),
        Navigation::MoveLeft => translate(view, -frame.u * MOVE_STEP),
        Navigation::MoveRight => translate(view, frame.u * MOVE_STEP),
        Navigation::RotateLeft => {
            let m = rotation_about_axis(&view.eye, &frame.v, ROTATE_STEP);
            view.look_at = m.transform_point(&view.look_at);
        }
        Navigation::RotateRight => {
            let m = rotation_about_axis(&view.eye, &frame.v, -ROTATE_STEP);
            view.look_at = m.transform_point(&view.look_at);
        }
    }

    Ok(())
}

fn translate(view: &mut View, offset: Vector3<f64>) {
    view.eye += offset;
    view.look_at += offset;
}

/// Rotation by `angle` about the line through `origin` along the unit vector `axis`
fn rotation_about_axis(origin: &Point3<f64>, axis: &Vector3<f64>, angle: f64) -> Matrix4<f64> {
    // Rotate about y so the axis lies in the y-z plane
    let xz = (axis.x * axis.x + axis.z * axis.z).sqrt();
    let to_yz = if xz == 0.0 {
        Transform::identity()
    } else {
        Transform::rotation_y((-axis.x).atan2(axis.z))
    };
    let from_yz = if xz == 0.0 {
        Transform::identity()
    } else {
        Transform::rotation_y(-(-axis.x).atan2(axis.z))
    };

    // Then about x so it lies along z
    let tilt = axis.y.atan2(xz);
    let to_z = Transform::rotation_x(tilt);
    let from_z = Transform::rotation_x(-tilt);

    let to_origin = Transform::translation(-origin.x, -origin.y, -origin.z);
    let back = Transform::translation(origin.x, origin.y, origin.z);

    back * from_yz * from_z * Transform::rotation_z(angle) * to_z * to_yz * to_origin
}

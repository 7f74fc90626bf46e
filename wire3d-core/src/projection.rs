/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::SceneError;
use crate::transform::Transform;

/// Below this length `up × n` is treated as zero
const DEGENERATE_EPSILON: f64 = 1e-9;

/// View window and depth range, in view-reference coordinates.
///
/// `near` and `far` are positive distances from the eye along the viewing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVolume {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ClipVolume {
    pub fn new(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, SceneError> {
        let clip = Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        };
        clip.validate()?;
        Ok(clip)
    }

    /// Build from the `[left, right, bottom, top, near, far]` layout of scene files
    pub fn from_array(values: [f64; 6]) -> Result<Self, SceneError> {
        let [left, right, bottom, top, near, far] = values;
        Self::new(left, right, bottom, top, near, far)
    }

    fn validate(&self) -> Result<(), SceneError> {
        let values = [self.left, self.right, self.bottom, self.top, self.near, self.far];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::InvalidClipVolume("values must be finite".to_string()));
        }
        if self.left >= self.right {
            return Err(SceneError::InvalidClipVolume(format!(
                "left ({}) must be less than right ({})",
                self.left, self.right
            )));
        }
        if self.bottom >= self.top {
            return Err(SceneError::InvalidClipVolume(format!(
                "bottom ({}) must be less than top ({})",
                self.bottom, self.top
            )));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(SceneError::InvalidClipVolume(format!(
                "expected 0 < near < far, got near = {}, far = {}",
                self.near, self.far
            )));
        }
        Ok(())
    }

    /// Near plane position in the canonical volume
    pub fn z_min(&self) -> f64 {
        -self.near / self.far
    }
}

/// View-reference coordinate frame `(u, v, n)` of a camera
#[derive(Debug, Clone, Copy)]
pub struct ViewFrame {
    /// Points to the right of the view
    pub u: Vector3<f64>,
    /// Camera-local vertical axis
    pub v: Vector3<f64>,
    /// Points from the look-at point back toward the eye
    pub n: Vector3<f64>,
}

impl ViewFrame {
    pub fn new(
        eye: &Point3<f64>,
        look_at: &Point3<f64>,
        up: &Vector3<f64>,
    ) -> Result<Self, SceneError> {
        let n = (eye - look_at)
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or(SceneError::DegenerateCamera)?;
        let u = up
            .cross(&n)
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or(SceneError::DegenerateCamera)?;
        let v = n.cross(&u);
        Ok(Self { u, v, n })
    }
}

/// Perspective camera: centre of projection, reference point, up direction and clip volume
#[derive(Debug, Clone)]
pub struct View {
    /// Centre of projection (PRP)
    pub eye: Point3<f64>,
    /// Scene reference point (SRP)
    pub look_at: Point3<f64>,
    pub up: Vector3<f64>,
    pub clip: ClipVolume,
}

impl View {
    /// Create a view, rejecting camera geometry with no usable frame
    pub fn new(
        eye: Point3<f64>,
        look_at: Point3<f64>,
        up: Vector3<f64>,
        clip: ClipVolume,
    ) -> Result<Self, SceneError> {
        ViewFrame::new(&eye, &look_at, &up)?;
        Ok(Self {
            eye,
            look_at,
            up,
            clip,
        })
    }

    /// Current view-reference frame, derived fresh from the camera state
    pub fn frame(&self) -> Result<ViewFrame, SceneError> {
        ViewFrame::new(&self.eye, &self.look_at, &self.up)
    }

    /// Nper for this camera
    pub fn perspective_matrix(&self) -> Result<Matrix4<f64>, SceneError> {
        Transform::perspective(&self.eye, &self.look_at, &self.up, &self.clip)
    }
}

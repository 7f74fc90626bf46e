/// 4x4 transformation matrices for the perspective pipeline
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::error::SceneError;
use crate::projection::{ClipVolume, ViewFrame};

/// Transform builder for 3D transformations
///
/// All matrices act on column vectors, so `a * b` applies `b` first.
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Create a translation matrix
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz))
    }

    /// Create a scale matrix
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Right-handed rotation about the x-axis (radians)
    pub fn rotation_x(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation about the y-axis (radians)
    pub fn rotation_y(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation about the z-axis (radians)
    pub fn rotation_z(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Shear parallel to the xy-plane: `x += shx·z`, `y += shy·z`
    pub fn shear_xy(shx: f64, shy: f64) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, shx, 0.0,
            0.0, 1.0, shy, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Conjugate `m` so that it acts about `pivot` instead of the origin
    pub fn about_pivot(pivot: &Point3<f64>, m: &Matrix4<f64>) -> Matrix4<f64> {
        Self::translation(pivot.x, pivot.y, pivot.z)
            * m
            * Self::translation(-pivot.x, -pivot.y, -pivot.z)
    }

    /// Perspective normalization matrix (Nper).
    ///
    /// Maps the view frustum described by `clip` onto the canonical volume
    /// `|x| <= -z`, `|y| <= -z`, `-near/far >= z >= -1`.
    pub fn perspective(
        eye: &Point3<f64>,
        look_at: &Point3<f64>,
        up: &Vector3<f64>,
        clip: &ClipVolume,
    ) -> Result<Matrix4<f64>, SceneError> {
        let frame = ViewFrame::new(eye, look_at, up)?;

        let translate = Self::translation(-eye.x, -eye.y, -eye.z);

        let (u, v, n) = (frame.u, frame.v, frame.n);
        let rotate = Matrix4::new(
            u.x, u.y, u.z, 0.0,
            v.x, v.y, v.z, 0.0,
            n.x, n.y, n.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        // Centre of the window; the eye sits at the origin here
        let cw = Vector3::new(
            (clip.left + clip.right) / 2.0,
            (clip.bottom + clip.top) / 2.0,
            -clip.near,
        );
        let shear = Self::shear_xy(-cw.x / cw.z, -cw.y / cw.z);

        let scale = Self::scale(
            2.0 * clip.near / ((clip.right - clip.left) * clip.far),
            2.0 * clip.near / ((clip.top - clip.bottom) * clip.far),
            1.0 / clip.far,
        );

        Ok(scale * shear * rotate * translate)
    }

    /// Project the canonical volume onto the `z = -1` plane (Mper)
    pub fn perspective_to_plane() -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Map `[-1, 1]²` onto a `width`×`height` raster whose origin is the top-left corner
    pub fn viewport(width: u32, height: u32) -> Matrix4<f64> {
        let hw = width as f64 / 2.0;
        let hh = height as f64 / 2.0;
        Matrix4::new(
            hw, 0.0, 0.0, hw,
            0.0, -hh, 0.0, hh,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Convert from homogeneous to cartesian x/y, leaving `w = 1`
    pub fn homogeneous_divide(v: &Vector4<f64>) -> Vector4<f64> {
        Vector4::new(v.x / v.w, v.y / v.w, v.z, 1.0)
    }
}

/// Time-driven model rotation and the frame clock that feeds it
use std::f64::consts::TAU;
use std::time::Duration;

use nalgebra::{Matrix4, Point3};
use serde::Deserialize;

use crate::scene::Scene;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[serde(alias = "X")]
    X,
    #[serde(alias = "Y")]
    Y,
    #[serde(alias = "Z")]
    Z,
}

/// Continuous spin of a model about an axis through its pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub axis: Axis,
    /// Revolutions per second
    pub rps: f64,
    pub pivot: Point3<f64>,
}

impl Animation {
    /// Local transform after `elapsed` seconds
    pub fn transform_at(&self, elapsed: f64) -> Matrix4<f64> {
        let angle = TAU * self.rps * elapsed;
        let rotation = match self.axis {
            Axis::X => Transform::rotation_x(angle),
            Axis::Y => Transform::rotation_y(angle),
            Axis::Z => Transform::rotation_z(angle),
        };
        Transform::about_pivot(&self.pivot, &rotation)
    }
}

/// Recompute the local transform of every animated model
pub fn update_transforms(scene: &mut Scene, elapsed: f64) {
    for model in &mut scene.models {
        if let Some(animation) = &model.animation {
            model.local_transform = animation.transform_at(elapsed);
        }
    }
}

/// Converts the driver's monotonic timestamps into animation time
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds from the first tick to `timestamp`; the first call defines time zero
    pub fn tick(&mut self, timestamp: Duration) -> f64 {
        let start = *self.start.get_or_insert(timestamp);
        timestamp.saturating_sub(start).as_secs_f64()
    }

    /// Forget the start time so the next tick restarts at zero
    pub fn reset(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Model, Shape};
    use crate::primitives;
    use crate::projection::{ClipVolume, View};
    use nalgebra::{Vector3, Vector4};

    fn close(a: &Vector4<f64>, b: &Vector4<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    fn spinning(axis: Axis, rps: f64) -> Animation {
        Animation {
            axis,
            rps,
            pivot: Point3::new(0.0, 0.0, -10.0),
        }
    }

    #[test]
    fn test_transform_at_zero_is_identity() {
        let m = spinning(Axis::Y, 0.5).transform_at(0.0);
        assert!((m - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_quarter_turn_about_pivot() {
        // 0.25 rps for one second is a quarter revolution
        let m = spinning(Axis::Y, 0.25).transform_at(1.0);
        let p = Vector4::new(1.0, 0.0, -10.0, 1.0);
        assert!(close(&(m * p), &Vector4::new(0.0, 0.0, -11.0, 1.0)));
        let pivot = Vector4::new(0.0, 0.0, -10.0, 1.0);
        assert!(close(&(m * pivot), &pivot));
    }

    #[test]
    fn test_full_revolution_returns_home() {
        let m = spinning(Axis::X, 2.0).transform_at(0.5);
        assert!((m - Matrix4::identity()).norm() < 1e-9);
    }

    #[test]
    fn test_update_transforms_skips_static_models() {
        let center = Point3::new(0.0, 0.0, -10.0);
        let spinning_cube = Model::new(Shape::Cube, primitives::cube(&center, 1.0, 1.0, 1.0))
            .with_animation(Some(spinning(Axis::Z, 1.0)));
        let still_cube = Model::new(Shape::Cube, primitives::cube(&center, 1.0, 1.0, 1.0));

        let view = View::new(
            Point3::origin(),
            Point3::new(0.0, 0.0, -1.0),
            Vector3::y(),
            ClipVolume::new(-1.0, 1.0, -1.0, 1.0, 1.0, 20.0).unwrap(),
        )
        .unwrap();
        let mut scene = Scene::new(view, vec![spinning_cube, still_cube]);

        update_transforms(&mut scene, 0.125);
        assert!((scene.models[0].local_transform - Matrix4::identity()).norm() > 0.1);
        assert_eq!(scene.models[1].local_transform, Matrix4::identity());
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Duration::from_millis(1000)), 0.0);
        assert!((clock.tick(Duration::from_millis(1250)) - 0.25).abs() < 1e-12);
        assert!((clock.tick(Duration::from_millis(1500)) - 0.5).abs() < 1e-12);

        // A timestamp before the start clamps to zero
        assert_eq!(clock.tick(Duration::from_millis(500)), 0.0);

        clock.reset();
        assert_eq!(clock.tick(Duration::from_millis(4000)), 0.0);
        assert!((clock.tick(Duration::from_millis(5000)) - 1.0).abs() < 1e-12);
    }
}

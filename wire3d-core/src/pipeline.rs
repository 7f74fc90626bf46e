/// Per-frame geometry pipeline: canonical volume, clipping, projection, viewport
use log::trace;
use nalgebra::{Matrix4, Point2, Vector4};

use crate::clip::{clip_line, Segment};
use crate::error::SceneError;
use crate::scene::Scene;
use crate::transform::Transform;

/// Anything that can draw a straight line in pixel coordinates
pub trait LineSurface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
}

/// A visible line, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

/// Every line that survived clipping for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<Line2>,
}

impl Frame {
    pub fn draw<S: LineSurface + ?Sized>(&self, surface: &mut S) {
        for line in &self.lines {
            surface.draw_line(line.start.x, line.start.y, line.end.x, line.end.y);
        }
    }
}

/// Canonical volume point to pixel position
fn to_screen(mper: &Matrix4<f64>, viewport: &Matrix4<f64>, p: &Vector4<f64>) -> Point2<f64> {
    let projected = Transform::homogeneous_divide(&(mper * p));
    let pixel = viewport * projected;
    Point2::new(pixel.x, pixel.y)
}

/// Produce the lines of `scene` for a `width`×`height` raster.
///
/// Fails only if the camera frame is degenerate.
pub fn render_frame(scene: &Scene, width: u32, height: u32) -> Result<Frame, SceneError> {
    let nper = scene.view.perspective_matrix()?;
    let mper = Transform::perspective_to_plane();
    let viewport = Transform::viewport(width, height);
    let z_min = scene.view.clip.z_min();

    let mut frame = Frame {
        width,
        height,
        lines: Vec::new(),
    };

    for model in scene.models.iter().filter(|m| m.is_drawable()) {
        let to_canonical = nper * model.local_transform;
        let canonical: Vec<Vector4<f64>> = model
            .wireframe
            .vertices
            .iter()
            .map(|v| to_canonical * v)
            .collect();

        let mut visible = 0;
        for (a, b) in model.wireframe.segments() {
            let (Some(&p0), Some(&p1)) = (canonical.get(a), canonical.get(b)) else {
                continue;
            };
            if let Some(clipped) = clip_line(&Segment::new(p0, p1), z_min) {
                frame.lines.push(Line2 {
                    start: to_screen(&mper, &viewport, &clipped.p0),
                    end: to_screen(&mper, &viewport, &clipped.p1),
                });
                visible += 1;
            }
        }
        trace!(
            "{}: {} of {} segments visible",
            model.shape.name(),
            visible,
            model.wireframe.segment_count()
        );
    }

    Ok(frame)
}

/// Render `scene` at the surface's size and draw it
pub fn draw_scene<S: LineSurface + ?Sized>(
    scene: &Scene,
    surface: &mut S,
) -> Result<(), SceneError> {
    let (width, height) = surface.size();
    render_frame(scene, width, height)?.draw(surface);
    Ok(())
}

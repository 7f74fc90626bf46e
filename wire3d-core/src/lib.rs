/// wire3d Core Library - Perspective wireframe geometry pipeline
///
/// This library provides the windowing-free core of the renderer: scene
/// loading, camera navigation, model animation, view-volume clipping and
/// projection of wireframe edges to 2D lines.

pub mod animation;
pub mod clip;
pub mod error;
pub mod geometry;
pub mod navigation;
pub mod pipeline;
pub mod primitives;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use animation::{update_transforms, Animation, Axis, FrameClock};
pub use clip::{clip_line, outcode, Segment};
pub use error::SceneError;
pub use geometry::{Model, Shape, Wireframe};
pub use navigation::{navigate, Navigation};
pub use pipeline::{draw_scene, render_frame, Frame, Line2, LineSurface};
pub use projection::{ClipVolume, View, ViewFrame};
pub use scene::{Scene, SceneDescription};
pub use transform::Transform;

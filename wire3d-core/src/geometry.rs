/// Wireframe models of a scene
use nalgebra::{Matrix4, Point3, Vector4};

use crate::animation::Animation;
use crate::error::SceneError;

/// Vertices and polylines of a wireframe.
///
/// Each polyline is a sequence of vertex indices; consecutive indices form a
/// segment, and a closed polyline repeats its first index at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    pub vertices: Vec<Vector4<f64>>,
    pub edges: Vec<Vec<usize>>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Append a vertex at `(x, y, z)` with `w = 1` and return its index
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.vertices.push(Vector4::new(x, y, z, 1.0));
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, polyline: Vec<usize>) {
        self.edges.push(polyline);
    }

    /// Number of segments across all polylines
    pub fn segment_count(&self) -> usize {
        self.edges.iter().map(|e| e.len().saturating_sub(1)).sum()
    }

    /// Iterate every `(start, end)` index pair of every polyline
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .flat_map(|polyline| polyline.windows(2).map(|pair| (pair[0], pair[1])))
    }

    /// Check that every edge index refers to an existing vertex
    pub fn validate(&self) -> Result<(), SceneError> {
        let count = self.vertices.len();
        match self.edges.iter().flatten().find(|&&i| i >= count) {
            Some(&index) => Err(SceneError::InvalidEdge {
                model: 0,
                index,
                count,
            }),
            None => Ok(()),
        }
    }
}

/// Which kind of model a scene entry described
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Generic,
    Cube,
    Cone,
    Cylinder,
    Sphere,
    /// A model type this renderer does not know; kept verbatim, never drawn
    Passthrough {
        type_name: String,
        center: Point3<f64>,
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

impl Shape {
    pub fn name(&self) -> &str {
        match self {
            Shape::Generic => "generic",
            Shape::Cube => "cube",
            Shape::Cone => "cone",
            Shape::Cylinder => "cylinder",
            Shape::Sphere => "sphere",
            Shape::Passthrough { type_name, .. } => type_name,
        }
    }
}

/// A model in the scene: its shape tag, geometry and local transform
#[derive(Debug, Clone)]
pub struct Model {
    pub shape: Shape,
    pub wireframe: Wireframe,
    /// Identity unless the model is animated
    pub local_transform: Matrix4<f64>,
    pub animation: Option<Animation>,
}

impl Model {
    pub fn new(shape: Shape, wireframe: Wireframe) -> Self {
        Self {
            shape,
            wireframe,
            local_transform: Matrix4::identity(),
            animation: None,
        }
    }

    pub fn with_animation(mut self, animation: Option<Animation>) -> Self {
        self.animation = animation;
        self
    }

    /// Whether the render pipeline draws this model
    pub fn is_drawable(&self) -> bool {
        !matches!(self.shape, Shape::Passthrough { .. })
    }
}

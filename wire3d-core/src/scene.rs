/// Scene description parsing and construction of the live scene
use std::fs;
use std::path::Path;

use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::animation::{Animation, Axis};
use crate::error::SceneError;
use crate::geometry::{Model, Shape, Wireframe};
use crate::primitives;
use crate::projection::{ClipVolume, View};

/// The camera and every model to draw
#[derive(Debug, Clone)]
pub struct Scene {
    pub view: View,
    pub models: Vec<Model>,
}

impl Scene {
    pub fn new(view: View, models: Vec<Model>) -> Self {
        Self { view, models }
    }

    /// Parse and build a scene from its JSON description
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let description: SceneDescription = serde_json::from_str(text)?;
        description.build()
    }

    /// Read a scene description file and build it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        debug!("Loading scene file: {:?}", path);
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// `view` block of a scene description
#[derive(Debug, Clone, Deserialize)]
pub struct ViewDescription {
    pub prp: [f64; 3],
    pub srp: [f64; 3],
    pub vup: [f64; 3],
    /// `[left, right, bottom, top, near, far]`
    pub clip: [f64; 6],
}

impl ViewDescription {
    pub fn build(&self) -> Result<View, SceneError> {
        View::new(
            Point3::from(self.prp),
            Point3::from(self.srp),
            Vector3::from(self.vup),
            ClipVolume::from_array(self.clip)?,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct AnimationDescription {
    axis: Axis,
    rps: f64,
}

#[derive(Debug, Deserialize)]
struct GenericDescription {
    vertices: Vec<[f64; 3]>,
    edges: Vec<Vec<usize>>,
    center: Option<[f64; 3]>,
    animation: Option<AnimationDescription>,
}

#[derive(Debug, Deserialize)]
struct CubeDescription {
    center: [f64; 3],
    width: f64,
    height: f64,
    depth: f64,
    animation: Option<AnimationDescription>,
}

/// Shared layout of cones and cylinders
#[derive(Debug, Deserialize)]
struct RadialDescription {
    center: [f64; 3],
    radius: f64,
    height: f64,
    sides: usize,
    animation: Option<AnimationDescription>,
}

#[derive(Debug, Deserialize)]
struct SphereDescription {
    center: [f64; 3],
    radius: f64,
    slices: usize,
    stacks: usize,
    animation: Option<AnimationDescription>,
}

/// Raw scene file contents.
///
/// Models are kept as JSON values until [`SceneDescription::build`] so that
/// unknown model types can be carried through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    pub view: ViewDescription,
    pub models: Vec<Value>,
}

impl SceneDescription {
    /// Build the complete scene; any invalid model fails the whole build
    pub fn build(&self) -> Result<Scene, SceneError> {
        let view = self.view.build()?;
        let models = self
            .models
            .iter()
            .enumerate()
            .map(|(index, value)| build_model(value).map_err(|e| e.for_model(index)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built scene with {} models", models.len());
        Ok(Scene::new(view, models))
    }
}

fn parse<T: DeserializeOwned>(value: &Value) -> Result<T, SceneError> {
    Ok(T::deserialize(value)?)
}

fn animation(
    description: Option<AnimationDescription>,
    pivot: Option<[f64; 3]>,
) -> Result<Option<Animation>, SceneError> {
    match (description, pivot) {
        (None, _) => Ok(None),
        (Some(a), Some(pivot)) => Ok(Some(Animation {
            axis: a.axis,
            rps: a.rps,
            pivot: Point3::from(pivot),
        })),
        (Some(_), None) => Err(SceneError::MissingField {
            model: 0,
            field: "center",
        }),
    }
}

fn build_model(value: &Value) -> Result<Model, SceneError> {
    let object = value.as_object().ok_or_else(|| SceneError::InvalidParameter {
        model: 0,
        reason: "model entry must be an object".to_string(),
    })?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SceneError::MissingField {
            model: 0,
            field: "type",
        })?;

    let model = match type_name {
        "generic" => {
            let d: GenericDescription = parse(value)?;
            let mut wireframe = Wireframe::with_capacity(d.vertices.len(), d.edges.len());
            for [x, y, z] in d.vertices {
                wireframe.add_vertex(x, y, z);
            }
            wireframe.edges = d.edges;
            wireframe.validate()?;
            Model::new(Shape::Generic, wireframe).with_animation(animation(d.animation, d.center)?)
        }
        "cube" => {
            let d: CubeDescription = parse(value)?;
            let wireframe = primitives::cube(&Point3::from(d.center), d.width, d.height, d.depth);
            Model::new(Shape::Cube, wireframe)
                .with_animation(animation(d.animation, Some(d.center))?)
        }
        "cone" => {
            let d: RadialDescription = parse(value)?;
            let wireframe = primitives::cone(&Point3::from(d.center), d.radius, d.height, d.sides)?;
            Model::new(Shape::Cone, wireframe)
                .with_animation(animation(d.animation, Some(d.center))?)
        }
        "cylinder" => {
            let d: RadialDescription = parse(value)?;
            let wireframe =
                primitives::cylinder(&Point3::from(d.center), d.radius, d.height, d.sides)?;
            Model::new(Shape::Cylinder, wireframe)
                .with_animation(animation(d.animation, Some(d.center))?)
        }
        "sphere" => {
            let d: SphereDescription = parse(value)?;
            let wireframe =
                primitives::sphere(&Point3::from(d.center), d.radius, d.slices, d.stacks)?;
            Model::new(Shape::Sphere, wireframe)
                .with_animation(animation(d.animation, Some(d.center))?)
        }
        other => passthrough(other, object)?,
    };

    Ok(model)
}

/// Keep an unrecognised model: its centre plus every other field, verbatim
fn passthrough(type_name: &str, object: &Map<String, Value>) -> Result<Model, SceneError> {
    let center: [f64; 3] = parse(object.get("center").ok_or(SceneError::MissingField {
        model: 0,
        field: "center",
    })?)?;
    let fields: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "center")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    warn!("Model type `{}` is not drawn; keeping it as passthrough", type_name);
    let shape = Shape::Passthrough {
        type_name: type_name.to_string(),
        center: Point3::from(center),
        fields,
    };
    Ok(Model::new(shape, Wireframe::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_models(models: Value) -> String {
        json!({
            "view": {
                "prp": [0, 10, -5],
                "srp": [0, 10, -40],
                "vup": [0, 1, 0],
                "clip": [-12, 6, -12, 6, 10, 100]
            },
            "models": models
        })
        .to_string()
    }

    #[test]
    fn test_build_every_model_type() {
        let text = with_models(json!([
            { "type": "generic", "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0]], "edges": [[0, 1, 2, 0]] },
            { "type": "cube", "center": [0, 0, -10], "width": 5, "height": 5, "depth": 5 },
            { "type": "cone", "center": [0, 0, -20], "radius": 2, "height": 4, "sides": 8 },
            { "type": "cylinder", "center": [5, 0, -20], "radius": 2, "height": 4, "sides": 6 },
            { "type": "sphere", "center": [-5, 0, -20], "radius": 2, "slices": 8, "stacks": 6 }
        ]));
        let scene = Scene::from_json(&text).unwrap();
        let shapes: Vec<_> = scene.models.iter().map(|m| m.shape.name().to_string()).collect();
        assert_eq!(shapes, ["generic", "cube", "cone", "cylinder", "sphere"]);
        assert_eq!(scene.models[0].wireframe.vertices.len(), 3);
        assert_eq!(scene.models[1].wireframe.vertices.len(), 8);
        assert_eq!(scene.models[2].wireframe.vertices.len(), 9);
        assert_eq!(scene.models[3].wireframe.vertices.len(), 12);
        assert_eq!(scene.models[4].wireframe.vertices.len(), 42);
        assert_eq!(scene.view.eye, Point3::new(0.0, 10.0, -5.0));
        assert_eq!(scene.view.clip.far, 100.0);
    }

    #[test]
    fn test_animation_uses_center_as_pivot() {
        let text = with_models(json!([
            { "type": "cube", "center": [1, 2, 3], "width": 1, "height": 1, "depth": 1,
              "animation": { "axis": "y", "rps": 0.5 } }
        ]));
        let scene = Scene::from_json(&text).unwrap();
        let a = scene.models[0].animation.unwrap();
        assert_eq!(a.axis, Axis::Y);
        assert_eq!(a.rps, 0.5);
        assert_eq!(a.pivot, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_animated_generic_requires_center() {
        let text = with_models(json!([
            { "type": "generic", "vertices": [[0, 0, 0], [1, 0, 0]], "edges": [[0, 1]],
              "animation": { "axis": "x", "rps": 1 } }
        ]));
        assert!(matches!(
            Scene::from_json(&text),
            Err(SceneError::MissingField { model: 0, field: "center" })
        ));
    }

    #[test]
    fn test_passthrough_keeps_fields() {
        let text = with_models(json!([
            { "type": "torus", "center": [0, 1, 2], "major": 3, "minor": [1, 2] }
        ]));
        let scene = Scene::from_json(&text).unwrap();
        let model = &scene.models[0];
        assert!(!model.is_drawable());
        match &model.shape {
            Shape::Passthrough { type_name, center, fields } => {
                assert_eq!(type_name, "torus");
                assert_eq!(*center, Point3::new(0.0, 1.0, 2.0));
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["minor"], json!([1, 2]));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_passthrough_without_center_is_malformed() {
        let text = with_models(json!([{ "type": "torus", "major": 3 }]));
        assert!(matches!(
            Scene::from_json(&text),
            Err(SceneError::MissingField { field: "center", .. })
        ));
    }

    #[test]
    fn test_invalid_generator_parameters_fail_the_load() {
        let text = with_models(json!([
            { "type": "cube", "center": [0, 0, 0], "width": 1, "height": 1, "depth": 1 },
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "slices": 2, "stacks": 4 }
        ]));
        assert!(matches!(
            Scene::from_json(&text),
            Err(SceneError::InvalidParameter { model: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_descriptions() {
        // Clip array with the wrong arity
        let bad_clip = r#"{ "view": { "prp": [0,0,5], "srp": [0,0,0], "vup": [0,1,0],
            "clip": [-1, 1, -1, 1, 1] }, "models": [] }"#;
        assert!(matches!(Scene::from_json(bad_clip), Err(SceneError::Json(_))));

        // near > far
        let inverted = r#"{ "view": { "prp": [0,0,5], "srp": [0,0,0], "vup": [0,1,0],
            "clip": [-1, 1, -1, 1, 10, 1] }, "models": [] }"#;
        assert!(matches!(
            Scene::from_json(inverted),
            Err(SceneError::InvalidClipVolume(_))
        ));

        // Up parallel to the view direction
        let parallel = r#"{ "view": { "prp": [0,0,5], "srp": [0,0,0], "vup": [0,0,1],
            "clip": [-1, 1, -1, 1, 1, 10] }, "models": [] }"#;
        assert!(matches!(Scene::from_json(parallel), Err(SceneError::DegenerateCamera)));

        // Missing vertices on a generic model
        let text = with_models(json!([{ "type": "generic", "edges": [[0, 1]] }]));
        assert!(matches!(Scene::from_json(&text), Err(SceneError::Json(_))));

        // Edge index out of range
        let text = with_models(json!([
            { "type": "generic", "vertices": [[0, 0, 0]], "edges": [[0, 4]] }
        ]));
        assert!(matches!(
            Scene::from_json(&text),
            Err(SceneError::InvalidEdge { model: 0, index: 4, count: 1 })
        ));

        // Model without a type
        let text = with_models(json!([{ "center": [0, 0, 0] }]));
        assert!(matches!(
            Scene::from_json(&text),
            Err(SceneError::MissingField { field: "type", .. })
        ));
    }
}

/// Errors raised while loading a scene or deriving the camera frame

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model {model}: missing required field `{field}`")]
    MissingField { model: usize, field: &'static str },
    #[error("invalid clip volume: {0}")]
    InvalidClipVolume(String),
    #[error("degenerate camera: up vector is parallel to the viewing direction")]
    DegenerateCamera,
    #[error("model {model}: edge references vertex {index} but only {count} vertices exist")]
    InvalidEdge {
        model: usize,
        index: usize,
        count: usize,
    },
    #[error("model {model}: {reason}")]
    InvalidParameter { model: usize, reason: String },
}

impl SceneError {
    /// Attach the index of the model being built to a generator error
    pub(crate) fn for_model(self, index: usize) -> Self {
        match self {
            SceneError::MissingField { field, .. } => {
                SceneError::MissingField { model: index, field }
            }
            SceneError::InvalidEdge { index: vertex, count, .. } => SceneError::InvalidEdge {
                model: index,
                index: vertex,
                count,
            },
            SceneError::InvalidParameter { reason, .. } => {
                SceneError::InvalidParameter { model: index, reason }
            }
            other => other,
        }
    }
}

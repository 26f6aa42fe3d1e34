use crate::foundation::ids::ProjectorId;

/// Result alias used across the crate.
pub type ProjectorResult<T> = Result<T, ProjectorError>;

/// Errors raised while building, updating or loading projectors.
#[derive(thiserror::Error, Debug)]
pub enum ProjectorError {
    /// A value lies outside its hard domain.
    #[error("validation error: {0}")]
    Validation(String),

    /// An expected node, socket or link is missing from an emitter graph.
    #[error("graph structure error: {0}")]
    Structure(String),

    /// No projector with this id exists in the scene.
    #[error("unknown projector: {0}")]
    UnknownProjector(ProjectorId),

    /// Reading an image resource failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Settings or events could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProjectorError {
    /// Build a [`ProjectorError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ProjectorError::Structure`].
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`ProjectorError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for graph structure failures, the ones a rebuild can repair.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure(_))
    }
}

impl From<serde_json::Error> for ProjectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

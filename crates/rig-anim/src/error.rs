use std::io;
use thiserror::Error;

/// Error types for rig construction, clip playback and configuration loading
#[derive(Error, Debug)]
pub enum RigError {
    /// Bone table references an undefined parent, contains a cycle, or has no single root
    #[error("Malformed topology: {0}")]
    MalformedTopology(String),

    /// No bone with the given name exists in the skeleton
    #[error("Bone not found: {0}")]
    BoneNotFound(String),

    /// The archetype's clip library has no clip with the given name
    #[error("Clip '{clip}' not found in archetype '{archetype}'")]
    ClipNotFound { archetype: String, clip: String },

    /// Clip data failed validation (duration, keyframe order, values)
    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },

    /// No archetype registered under the given name
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    /// Two archetypes in one configuration share a name
    #[error("Duplicate archetype: {0}")]
    DuplicateArchetype(String),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Configuration file extension is not one we can read
    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),
}

impl RigError {
    /// Whether playback can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BoneNotFound(_) | Self::ClipNotFound { .. })
    }
}

/// Result type using RigError
pub type Result<T> = std::result::Result<T, RigError>;

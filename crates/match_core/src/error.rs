use thiserror::Error;

/// Errors raised while preparing a simulation (teams, configuration, templates).
///
/// The simulation itself has no error path: once inputs are accepted a match always
/// runs to the final whistle.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid team: {0}")]
    InvalidTeam(#[from] validator::ValidationErrors),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Input errors the caller can fix by editing a file and retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::Json(_) | CoreError::Yaml(_) => true,
            CoreError::InvalidConfig(_) => true,
            CoreError::InvalidTeam(_) => false,
            CoreError::UnknownPreset(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

use std::path::PathBuf;

use crate::answers::Field;

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Recovered by asking the same field again.
    #[error("{0} must not be empty")]
    Validation(Field),

    #[error("template '{template}' references '{name}', which has no value")]
    MissingVariable { template: &'static str, name: String },

    #[error("failed to render template '{template}': {message}")]
    Render {
        template: &'static str,
        message: String,
    },

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("license generation failed: {0}")]
    Delegator(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("invalid answer store {path}: {message}")]
    Store { path: PathBuf, message: String },
}

impl ScaffoldError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<inquire::InquireError> for ScaffoldError {
    fn from(value: inquire::InquireError) -> Self {
        ScaffoldError::Prompt(value.to_string())
    }
}

use thiserror::Error;

/// Core pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Missing metadata for {platform}: {message}")]
    MissingMetadata { platform: String, message: String },

    #[error("Assembly error: {platform} - {message}")]
    Assembly { platform: String, message: String },
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn missing_metadata(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingMetadata {
            platform: platform.into(),
            message: message.into(),
        }
    }

    pub fn assembly(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assembly {
            platform: platform.into(),
            message: message.into(),
        }
    }
}

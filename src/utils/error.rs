use thiserror::Error;

#[derive(Error, Debug)]
pub enum FortuneError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "assets")]
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl FortuneError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FortuneError::IoError(e) => format!("File system problem: {}", e),
            FortuneError::SerializationError(e) => format!("Invalid JSON: {}", e),
            #[cfg(feature = "assets")]
            FortuneError::ImageError(e) => format!("Could not encode image: {}", e),
            FortuneError::ConfigError { message } => format!("Configuration problem: {}", message),
            FortuneError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            FortuneError::ServerError { message } => format!("Server could not start: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FortuneError::IoError(_) => "Check that the path exists and is writable",
            FortuneError::SerializationError(_) => "Send a JSON object such as {\"colors\": [...]}",
            #[cfg(feature = "assets")]
            FortuneError::ImageError(_) => "Check the output directory and available disk space",
            FortuneError::ConfigError { .. } => "Make sure the config file exists and is valid TOML",
            FortuneError::InvalidConfigValueError { .. } => "Fix the value in the config file or on the command line",
            FortuneError::ServerError { .. } => "Check that the port is free or pick another with --port",
        }
    }
}

pub type Result<T> = std::result::Result<T, FortuneError>;

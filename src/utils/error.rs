use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatronError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PatronError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            PatronError::IoError(e) => format!("Console or file access failed: {}", e),
            PatronError::InvalidConfigValueError { field, reason, .. } => {
                format!("Option '{}' is not usable: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PatronError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("Invalid save slot {0} (expected 1-3)")]
    InvalidSlot(u8),

    #[error("Save file for slot {0} not found")]
    SaveNotFound(u8),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Save data is corrupted or incompatible: {0}")]
    CorruptSave(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SimError {
    /// Failures reading or writing the save medium itself
    pub fn is_file_error(&self) -> bool {
        matches!(self, SimError::File(_) | SimError::SaveNotFound(_))
    }

    /// Failures decoding or validating save contents
    pub fn is_data_error(&self) -> bool {
        matches!(self, SimError::Serde(_) | SimError::CorruptSave(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

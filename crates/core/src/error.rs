#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] mpi_types::TextError),
    #[error("invalid person UUID: {0}")]
    Uuid(#[from] mpi_uuid::UuidError),
    #[error("failed to serialize patient record: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("translation error: {0}")]
    Translation(String),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;

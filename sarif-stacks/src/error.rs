use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid capture payload: {0}")]
    InvalidPayload(serde_json::Error),
    #[error("Serialization failed: {0}")]
    Serialization(serde_json::Error),
}

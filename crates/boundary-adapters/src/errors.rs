//! Errores de los steps de ejemplo. Nunca llegan al usuario: el boundary los
//! convierte en códigos de outcome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RescuetimeError {
    #[error("api key is empty")]
    MissingApiKey,
    #[error("api returned error: {0}")]
    Api(String),
    #[error("response has no rows")]
    MissingRows,
    #[error("row {index} is malformed")]
    MalformedRow {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("io error reading response: {0}")]
    Io(#[from] std::io::Error),
    #[error("response is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

//! Errores del núcleo.
//!
//! - `BoundaryError`: errores de configuración al ensamblar un pipeline o un
//!   registry. Se devuelven en tiempo de construcción, nunca desde `run`.
//! - `StepFailure`: fallos que el propio runner atribuye a un step (panic,
//!   timeout, decode/encode del layer tipado).
//! - `StepError`: tipo de error opaco que devuelve cualquier step.

use std::time::Duration;

use thiserror::Error;

/// Error opaco devuelto por la transformación de un step.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resultado de ejecutar la transformación de un step.
pub type StepResult<T> = Result<T, StepError>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BoundaryError {
    #[error("pipeline must contain at least one step")] EmptyPipeline,
    #[error("duplicate step name: {0}")] DuplicateStep(String),
    #[error("resolver registry has no default outcome")] MissingDefault,
    #[error("boundary has no resolver registry")] MissingResolver,
    #[error("resolver rule references unknown step: {0}")] UnknownStep(String),
    #[error("invalid configuration value for {key}: {value}")] InvalidConfig { key: String, value: String },
}

/// Fallos generados por la maquinaria del runner en nombre de un step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepFailure {
    #[error("input decode failed: {0}")] InputDecode(String),
    #[error("output encode failed: {0}")] OutputEncode(String),
    #[error("step panicked: {0}")] Panicked(String),
    #[error("step timed out after {0:?}")] TimedOut(Duration),
    #[error("step task aborted: {0}")] Aborted(String),
}

/// Error reportado por un `LogSink`. El runner lo descarta tras registrarlo.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink unavailable: {0}")] Unavailable(String),
    #[error("payload serialization failed: {0}")] Serialize(#[from] serde_json::Error),
}

/// Extrae un mensaje legible de un payload de panic.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

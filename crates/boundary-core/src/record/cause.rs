use std::error::Error;

use serde::{Deserialize, Serialize};

/// Origen del fallo dentro del step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseKind {
    /// El step devolvió `Err`.
    Error,
    /// El step entró en panic.
    Panic,
    /// El step superó el límite de tiempo configurado.
    Timeout,
}

/// Fallo subyacente: mensaje y traza acotada.
///
/// La traza es la cadena `source()` del error, del más externo al más
/// interno, recortada a `max_frames`. Invariante: `trace.len() <= max_frames`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    kind: CauseKind,
    message: String,
    trace: Vec<String>,
    truncated: bool,
}

impl Cause {
    pub fn capture(kind: CauseKind, err: &(dyn Error + 'static), max_frames: usize) -> Self {
        let mut chain = std::iter::successors(Some(err), |&e| e.source()).map(|e| e.to_string());
        let trace: Vec<String> = chain.by_ref().take(max_frames).collect();
        let truncated = chain.next().is_some();
        Self { kind,
               message: err.to_string(),
               trace,
               truncated }
    }

    pub fn kind(&self) -> CauseKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// `true` si la cadena tenía más frames que el máximo configurado.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

use std::sync::{Mutex, MutexGuard};

use super::{DiagnosticPayload, LogSink};
use crate::errors::SinkError;

/// Sink en memoria: acumula payloads en orden de escritura.
#[derive(Debug, Default)]
pub struct InMemorySink {
    inner: Mutex<Vec<DiagnosticPayload>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    // Un panic de otro hilo con el lock tomado no invalida los payloads ya guardados.
    fn lock(&self) -> MutexGuard<'_, Vec<DiagnosticPayload>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn payloads(&self) -> Vec<DiagnosticPayload> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl LogSink for InMemorySink {
    fn write(&self, payload: &DiagnosticPayload) -> Result<(), SinkError> {
        self.lock().push(payload.clone());
        Ok(())
    }
}

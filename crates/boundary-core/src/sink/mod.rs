//! Contrato del sink de diagnóstico y sinks incluidos.
//!
//! El runner escribe exactamente un `DiagnosticPayload` por invocación
//! fallida y ninguno en invocaciones exitosas. Los errores (y panics) del sink
//! se descartan: nunca alteran el `RunResult`.

mod log_facade;
mod memory;
mod payload;

pub use log_facade::LogFacadeSink;
pub use memory::InMemorySink;
pub use payload::DiagnosticPayload;

use crate::errors::SinkError;

/// Destino de los payloads de diagnóstico.
pub trait LogSink: Send + Sync {
    fn write(&self, payload: &DiagnosticPayload) -> Result<(), SinkError>;
}

/// Sink que descarta todo.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _payload: &DiagnosticPayload) -> Result<(), SinkError> {
        Ok(())
    }
}

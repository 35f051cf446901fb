use super::{DiagnosticPayload, LogSink};
use crate::constants::DEFAULT_LOG_TARGET;
use crate::errors::SinkError;

/// Sink que emite el payload como JSON a través del facade `log`.
///
/// El backend concreto (env_logger, etc.) lo instala la aplicación.
#[derive(Debug, Clone)]
pub struct LogFacadeSink {
    target: String,
}

impl LogFacadeSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogFacadeSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TARGET)
    }
}

impl LogSink for LogFacadeSink {
    fn write(&self, payload: &DiagnosticPayload) -> Result<(), SinkError> {
        let json = serde_json::to_string(payload)?;
        log::error!(target: self.target.as_str(), "step '{}' failed -> {}: {}", payload.failing_step, payload.outcome, json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Cause, CauseKind, ErrorRecord};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn writes_without_a_logger_installed() {
        let err = std::io::Error::other("socket closed");
        let record = ErrorRecord::new(Uuid::new_v4(), 2, "fetch", json!("https://x"), Cause::capture(CauseKind::Error, &err, 5));
        let payload = DiagnosticPayload::from_record(&record, "hash", "service_unavailable".into());
        assert!(LogFacadeSink::default().write(&payload).is_ok());
        assert_eq!(LogFacadeSink::default().target(), "boundary");
    }
}

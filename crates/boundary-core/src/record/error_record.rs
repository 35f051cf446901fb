use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::Cause;

/// Snapshot inmutable de un fallo dentro de una invocación.
///
/// El runner crea exactamente uno por invocación fallida; lo consumen el
/// `ResolverRegistry` y el sink, y se descarta al devolver el `RunResult`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    run_id: Uuid,
    failing_step: String,
    step_index: usize,
    input_at_failure: Value, // valor que recibió el step fallido
    cause: Cause,
    timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    pub fn new(run_id: Uuid, step_index: usize, failing_step: impl Into<String>, input_at_failure: Value, cause: Cause) -> Self {
        Self { run_id,
               failing_step: failing_step.into(),
               step_index,
               input_at_failure,
               cause,
               timestamp: Utc::now() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn failing_step(&self) -> &str {
        &self.failing_step
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn input_at_failure(&self) -> &Value {
        &self.input_at_failure
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

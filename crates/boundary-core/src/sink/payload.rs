use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hashing::digest_value;
use crate::record::{Cause, ErrorRecord};
use crate::resolver::OutcomeCode;

/// Payload estructurado que recibe el sink.
///
/// El input del step fallido viaja sólo como digest (`input_digest`), no en
/// crudo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticPayload {
    pub run_id: Uuid,
    pub pipeline: String, // definition_hash del pipeline
    pub failing_step: String,
    pub step_index: usize,
    pub cause: Cause,
    pub outcome: OutcomeCode,
    pub input_digest: String,
    pub timestamp: DateTime<Utc>,
}

impl DiagnosticPayload {
    pub fn from_record(record: &ErrorRecord, pipeline: &str, outcome: OutcomeCode) -> Self {
        Self { run_id: record.run_id(),
               pipeline: pipeline.to_string(),
               failing_step: record.failing_step().to_string(),
               step_index: record.step_index(),
               cause: record.cause().clone(),
               outcome,
               input_digest: digest_value(record.input_at_failure()),
               timestamp: record.timestamp() }
    }
}

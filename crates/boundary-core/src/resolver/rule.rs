use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use super::{Outcome, OutcomeCode};
use crate::errors::panic_message;
use crate::record::{Cause, ErrorRecord};

/// Predicado sobre `(input_at_failure, cause)`.
pub type Guard = Arc<dyn Fn(&Value, &Cause) -> bool + Send + Sync>;

/// Regla de resolución para un step.
#[derive(Clone)]
pub struct ResolverRule {
    step_name: String,
    guard: Option<Guard>,
    outcome: Outcome,
}

impl ResolverRule {
    pub fn new(step_name: impl Into<String>, guard: Option<Guard>, outcome: Outcome) -> Self {
        Self { step_name: step_name.into(),
               guard,
               outcome }
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Evalúa el guard. Una regla sin guard siempre aplica; un guard que entra
    /// en panic cuenta como "no aplica".
    pub(crate) fn matches(&self, record: &ErrorRecord) -> bool {
        let Some(guard) = &self.guard else {
            return true;
        };
        match panic::catch_unwind(AssertUnwindSafe(|| guard(record.input_at_failure(), record.cause()))) {
            Ok(hit) => hit,
            Err(payload) => {
                log::warn!("guard for step '{}' panicked, treated as non-match: {}",
                           self.step_name,
                           panic_message(payload.as_ref()));
                false
            }
        }
    }

    /// Produce el código. `None` si un outcome calculado entra en panic.
    pub(crate) fn produce(&self, record: &ErrorRecord) -> Option<OutcomeCode> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.outcome.produce(record))) {
            Ok(code) => Some(code),
            Err(payload) => {
                log::warn!("outcome function for step '{}' panicked, rule skipped: {}",
                           self.step_name,
                           panic_message(payload.as_ref()));
                None
            }
        }
    }
}

impl fmt::Debug for ResolverRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRule")
         .field("step_name", &self.step_name)
         .field("guarded", &self.is_guarded())
         .field("outcome", &self.outcome)
         .finish()
    }
}

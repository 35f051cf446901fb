//! Runner síncrono.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::failure::FailureHandler;
use super::{BoundaryBuilder, RunResult};
use crate::config::BoundaryConfig;
use crate::errors::{panic_message, StepFailure};
use crate::record::{Cause, CauseKind, ErrorRecord};
use crate::resolver::ResolverRegistry;
use crate::step::Pipeline;

/// Ejecuta un `Pipeline` dentro de un boundary.
///
/// Recorre los steps en orden, encadenando outputs. El primer fallo (un `Err`
/// o un panic) detiene la iteración: se construye el `ErrorRecord`, se
/// resuelve el outcome, se escribe un único payload en el sink y se devuelve
/// `RunResult::Failed`. El caller nunca ve el error crudo.
///
/// Clonar es barato; toda la configuración es compartida y de sólo lectura,
/// así que un mismo `Boundary` puede atender invocaciones concurrentes.
#[derive(Clone)]
pub struct Boundary {
    pipeline: Arc<Pipeline>,
    failures: FailureHandler,
}

impl Boundary {
    pub fn builder(pipeline: Pipeline) -> BoundaryBuilder<Pipeline> {
        BoundaryBuilder::new(pipeline)
    }

    pub(crate) fn from_parts(pipeline: Pipeline, failures: FailureHandler) -> Self {
        Self { pipeline: Arc::new(pipeline),
               failures }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn resolver(&self) -> &ResolverRegistry {
        &self.failures.resolver
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.failures.config
    }

    pub fn run(&self, input: Value) -> RunResult {
        let run_id = Uuid::new_v4();
        let max_frames = self.failures.config.max_trace_frames;
        log::debug!("run {run_id} started on pipeline {}", self.pipeline.definition_hash());

        let mut current = input;
        for (index, step) in self.pipeline.steps().iter().enumerate() {
            log::debug!("run {run_id}: step '{}' (#{index}) started", step.name());
            let attempt = panic::catch_unwind(AssertUnwindSafe(|| step.transform(&current)));
            let cause = match attempt {
                Ok(Ok(next)) => {
                    current = next;
                    continue;
                }
                Ok(Err(err)) => {
                    let err: &(dyn Error + 'static) = &*err;
                    Cause::capture(CauseKind::Error, err, max_frames)
                }
                Err(payload) => {
                    let failure = StepFailure::Panicked(panic_message(payload.as_ref()));
                    Cause::capture(CauseKind::Panic, &failure, max_frames)
                }
            };
            let record = ErrorRecord::new(run_id, index, step.name(), current, cause);
            return self.failures.handle(self.pipeline.definition_hash(), record);
        }

        log::debug!("run {run_id} succeeded");
        RunResult::Succeeded(current)
    }
}

impl std::fmt::Debug for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boundary")
         .field("pipeline", &self.pipeline)
         .field("resolver", &self.failures.resolver)
         .field("config", &self.failures.config)
         .finish_non_exhaustive()
    }
}

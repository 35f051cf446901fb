//! Runner asíncrono (tokio).
//!
//! Mismo contrato que `Boundary`: orden estricto, fail-fast, una escritura al
//! sink por fallo. Cada step corre en su propia task para capturar panics vía
//! `JoinError`; con `step_timeout_ms` configurado, un step que excede el
//! límite se aborta y su fallo es de tipo `timeout`.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::builder::StepSequence;
use super::failure::FailureHandler;
use super::{BoundaryBuilder, RunResult};
use crate::config::BoundaryConfig;
use crate::errors::{panic_message, BoundaryError, StepFailure, StepResult};
use crate::record::{Cause, CauseKind, ErrorRecord};
use crate::step::pipeline::definition_hash_for;
use crate::step::{Pipeline, Step};

/// Step asíncrono. Mismas reglas que `Step`: sin estado mutable compartido.
#[async_trait]
pub trait AsyncStep: Send + Sync {
    fn name(&self) -> &str;

    async fn transform(&self, input: Value) -> StepResult<Value>;
}

/// Adapta un `Step` síncrono: corre en el pool bloqueante de tokio.
///
/// Si la task externa se aborta por timeout, el hilo bloqueante termina su
/// trabajo igualmente; su resultado se descarta.
#[derive(Clone)]
pub struct BlockingStep {
    inner: Arc<dyn Step>,
}

impl BlockingStep {
    pub fn new(inner: Arc<dyn Step>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AsyncStep for BlockingStep {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn transform(&self, input: Value) -> StepResult<Value> {
        let inner = Arc::clone(&self.inner);
        match tokio::task::spawn_blocking(move || inner.transform(&input)).await {
            Ok(res) => res,
            Err(join) if join.is_panic() => std::panic::resume_unwind(join.into_panic()),
            Err(join) => Err(StepFailure::Aborted(join.to_string()).into()),
        }
    }
}

/// Equivalente asíncrono de `Pipeline`.
#[derive(Clone)]
pub struct AsyncPipeline {
    steps: Arc<[Arc<dyn AsyncStep>]>,
    definition_hash: String,
}

impl AsyncPipeline {
    pub fn new(steps: Vec<Arc<dyn AsyncStep>>) -> Result<Self, BoundaryError> {
        let definition_hash = definition_hash_for(steps.iter().map(|s| s.name()))?;
        Ok(Self { steps: steps.into(),
                  definition_hash })
    }

    /// Envuelve cada step síncrono en un `BlockingStep`. El hash de
    /// definición se conserva: los diagnósticos de ambos runners coinciden.
    pub fn from_blocking(pipeline: &Pipeline) -> Self {
        let steps: Vec<Arc<dyn AsyncStep>> = pipeline.steps()
                                                     .iter()
                                                     .map(|s| Arc::new(BlockingStep::new(Arc::clone(s))) as Arc<dyn AsyncStep>)
                                                     .collect();
        Self { steps: steps.into(),
               definition_hash: pipeline.definition_hash().to_string() }
    }

    pub fn steps(&self) -> &[Arc<dyn AsyncStep>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

impl From<Pipeline> for AsyncPipeline {
    fn from(pipeline: Pipeline) -> Self {
        Self::from_blocking(&pipeline)
    }
}

impl StepSequence for AsyncPipeline {
    fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn definition_hash(&self) -> &str {
        AsyncPipeline::definition_hash(self)
    }
}

impl fmt::Debug for AsyncPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPipeline")
         .field("steps", &self.step_names())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

#[derive(Clone)]
pub struct AsyncBoundary {
    pipeline: Arc<AsyncPipeline>,
    failures: FailureHandler,
}

impl AsyncBoundary {
    pub fn builder(pipeline: AsyncPipeline) -> BoundaryBuilder<AsyncPipeline> {
        BoundaryBuilder::new(pipeline)
    }

    pub(crate) fn from_parts(pipeline: AsyncPipeline, failures: FailureHandler) -> Self {
        Self { pipeline: Arc::new(pipeline),
               failures }
    }

    pub fn pipeline(&self) -> &AsyncPipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.failures.config
    }

    /// Debe llamarse dentro de un runtime tokio.
    pub async fn run(&self, input: Value) -> RunResult {
        let run_id = Uuid::new_v4();
        let limit = self.failures.config.step_timeout();
        let max_frames = self.failures.config.max_trace_frames;
        log::debug!("async run {run_id} started on pipeline {}", self.pipeline.definition_hash);

        let mut current = input;
        for (index, step) in self.pipeline.steps().iter().enumerate() {
            log::debug!("async run {run_id}: step '{}' (#{index}) started", step.name());
            let task = {
                let step = Arc::clone(step);
                let input = current.clone();
                tokio::spawn(async move { step.transform(input).await })
            };
            match await_step(task, limit, max_frames).await {
                Ok(next) => current = next,
                Err(cause) => {
                    let record = ErrorRecord::new(run_id, index, step.name(), current, cause);
                    return self.failures.handle(&self.pipeline.definition_hash, record);
                }
            }
        }

        log::debug!("async run {run_id} succeeded");
        RunResult::Succeeded(current)
    }
}

async fn await_step(mut task: JoinHandle<StepResult<Value>>, limit: Option<Duration>, max_frames: usize) -> Result<Value, Cause> {
    let joined = match limit {
        Some(limit) => match tokio::time::timeout(limit, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                task.abort();
                return Err(Cause::capture(CauseKind::Timeout, &StepFailure::TimedOut(limit), max_frames));
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let err: &(dyn Error + 'static) = &*err;
            Err(Cause::capture(CauseKind::Error, err, max_frames))
        }
        Err(join) if join.is_panic() => {
            let failure = StepFailure::Panicked(panic_message(join.into_panic().as_ref()));
            Err(Cause::capture(CauseKind::Panic, &failure, max_frames))
        }
        Err(join) => Err(Cause::capture(CauseKind::Error, &StepFailure::Aborted(join.to_string()), max_frames)),
    }
}

impl fmt::Debug for AsyncBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncBoundary")
         .field("pipeline", &self.pipeline)
         .field("config", &self.failures.config)
         .finish_non_exhaustive()
    }
}

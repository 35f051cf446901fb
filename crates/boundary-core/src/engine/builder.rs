//! Builder compartido por `Boundary` y `AsyncBoundary`.
//!
//! Valida la configuración en tiempo de construcción:
//! - sin registry -> `BoundaryError::MissingResolver`;
//! - regla que nombra un step ausente del pipeline -> `BoundaryError::UnknownStep`.
//!
//! Si no se declara sink, se usa `LogFacadeSink` con el `log_target` de la
//! configuración.

use std::sync::Arc;

use super::failure::FailureHandler;
use super::{AsyncBoundary, AsyncPipeline, Boundary};
use crate::config::BoundaryConfig;
use crate::errors::BoundaryError;
use crate::resolver::ResolverRegistry;
use crate::sink::{LogFacadeSink, LogSink};
use crate::step::Pipeline;

/// Secuencia de steps que un builder sabe validar.
pub trait StepSequence {
    fn step_names(&self) -> Vec<&str>;
    fn definition_hash(&self) -> &str;
}

impl StepSequence for Pipeline {
    fn step_names(&self) -> Vec<&str> {
        Pipeline::step_names(self)
    }

    fn definition_hash(&self) -> &str {
        Pipeline::definition_hash(self)
    }
}

pub struct BoundaryBuilder<P> {
    pipeline: P,
    resolver: Option<Arc<ResolverRegistry>>,
    sink: Option<Arc<dyn LogSink>>,
    config: BoundaryConfig,
}

impl<P: StepSequence> BoundaryBuilder<P> {
    pub(crate) fn new(pipeline: P) -> Self {
        Self { pipeline,
               resolver: None,
               sink: None,
               config: BoundaryConfig::default() }
    }

    pub fn resolver(mut self, registry: ResolverRegistry) -> Self {
        self.resolver = Some(Arc::new(registry));
        self
    }

    /// Variante para compartir un mismo registry entre varios boundaries.
    pub fn shared_resolver(mut self, registry: Arc<ResolverRegistry>) -> Self {
        self.resolver = Some(registry);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: BoundaryConfig) -> Self {
        self.config = config;
        self
    }

    fn validate(self) -> Result<(P, FailureHandler), BoundaryError> {
        let resolver = self.resolver.ok_or(BoundaryError::MissingResolver)?;
        let names = self.pipeline.step_names();
        if let Some(unknown) = resolver.steps().find(|s| !names.contains(s)) {
            return Err(BoundaryError::UnknownStep(unknown.to_string()));
        }
        let sink = self.sink
                       .unwrap_or_else(|| Arc::new(LogFacadeSink::new(self.config.log_target.clone())) as Arc<dyn LogSink>);
        let handler = FailureHandler { resolver,
                                       sink,
                                       config: Arc::new(self.config) };
        Ok((self.pipeline, handler))
    }
}

impl BoundaryBuilder<Pipeline> {
    pub fn build(self) -> Result<Boundary, BoundaryError> {
        let (pipeline, failures) = self.validate()?;
        Ok(Boundary::from_parts(pipeline, failures))
    }
}

impl BoundaryBuilder<AsyncPipeline> {
    pub fn build(self) -> Result<AsyncBoundary, BoundaryError> {
        let (pipeline, failures) = self.validate()?;
        Ok(AsyncBoundary::from_parts(pipeline, failures))
    }
}

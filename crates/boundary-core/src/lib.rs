//! boundary-core: pipeline secuencial con boundary de errores.
//!
//! Un `Boundary` ejecuta una secuencia ordenada de steps con nombre. El
//! primer fallo corta la secuencia, se captura en un `ErrorRecord` inmutable y
//! se resuelve contra un `ResolverRegistry` a un `OutcomeCode` opaco. El
//! detalle de diagnóstico va a un `LogSink`; el caller sólo recibe un
//! `RunResult`.
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod record;
pub mod resolver;
pub mod sink;
pub mod step;

pub use config::{init_dotenv, BoundaryConfig};
pub use engine::{install_quiet_panic_hook, AsyncBoundary, AsyncPipeline, AsyncStep, BlockingStep, Boundary, BoundaryBuilder, RunResult};
pub use errors::{BoundaryError, SinkError, StepError, StepFailure, StepResult};
pub use record::{Cause, CauseKind, ErrorRecord};
pub use resolver::{Outcome, OutcomeCode, RegistryBuilder, Resolution, ResolutionSource, ResolverRegistry, ResolverRule};
pub use sink::{DiagnosticPayload, InMemorySink, LogFacadeSink, LogSink, NullSink};
pub use step::{from_fn, FnStep, Pipe, Pipeline, SameAs, Step, TypedStep};

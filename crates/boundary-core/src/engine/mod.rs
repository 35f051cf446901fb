//! Runners del boundary.
//!
//! Provee el runner síncrono (`Boundary`), el asíncrono (`AsyncBoundary`),
//! el builder compartido y el `RunResult` uniforme que ambos devuelven.

pub mod async_runner;
pub mod builder;
mod failure;
pub mod panic_hook;
pub mod result;
pub mod runner;

pub use async_runner::{AsyncBoundary, AsyncPipeline, AsyncStep, BlockingStep};
pub use builder::{BoundaryBuilder, StepSequence};
pub use panic_hook::install_quiet_panic_hook;
pub use result::RunResult;
pub use runner::Boundary;

//! boundary-flow
//!
//! Fachada del workspace:
//! - `boundary_core`: steps, pipeline, registry de outcomes, runners y sinks.
//! - `boundary_adapters`: la secuencia de ejemplo contra Rescuetime, fetchers
//!   y el catálogo de mensajes.
//! - `scenarios`: corridas de demostración usadas por `main.rs`.

pub mod scenarios;

pub use boundary_adapters as adapters;
pub use boundary_core as base;

pub use boundary_core::{AsyncBoundary, Boundary, BoundaryConfig, BoundaryError, InMemorySink, LogFacadeSink, LogSink, OutcomeCode,
                        Pipeline, ResolverRegistry, RunResult};
pub use scenarios::{run_scenarios, Scenario, ScenarioReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_exposes_both_layers() {
        let registry = adapters::rescuetime_registry().unwrap();
        assert_eq!(registry.default_outcome(), &OutcomeCode::from(adapters::outcomes::DEFAULT));
        assert_eq!(base::constants::DEFAULT_MAX_TRACE_FRAMES, BoundaryConfig::default().max_trace_frames);
    }
}

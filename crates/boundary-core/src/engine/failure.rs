//! Tramo común a ambos runners desde que existe un `ErrorRecord`: resolver,
//! escribir en el sink y devolver `RunResult::Failed`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::BoundaryConfig;
use crate::errors::panic_message;
use crate::record::ErrorRecord;
use crate::resolver::ResolverRegistry;
use crate::sink::{DiagnosticPayload, LogSink};

use super::RunResult;

#[derive(Clone)]
pub(crate) struct FailureHandler {
    pub(crate) resolver: Arc<ResolverRegistry>,
    pub(crate) sink: Arc<dyn LogSink>,
    pub(crate) config: Arc<BoundaryConfig>,
}

impl FailureHandler {
    pub(crate) fn handle(&self, pipeline: &str, record: ErrorRecord) -> RunResult {
        let resolution = self.resolver.resolve(&record);
        log::debug!("run {} failed at step '{}' (#{}), resolved to '{}' via {:?}",
                    record.run_id(),
                    record.failing_step(),
                    record.step_index(),
                    resolution.code,
                    resolution.source);

        let payload = DiagnosticPayload::from_record(&record, pipeline, resolution.code.clone());
        self.emit(&payload);
        RunResult::Failed(resolution.code)
    }

    // Fire-and-forget: ni un Err ni un panic del sink salen de aquí.
    fn emit(&self, payload: &DiagnosticPayload) {
        match panic::catch_unwind(AssertUnwindSafe(|| self.sink.write(payload))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("diagnostic sink rejected payload for run {}: {e}", payload.run_id),
            Err(p) => log::warn!("diagnostic sink panicked for run {}: {}", payload.run_id, panic_message(p.as_ref())),
        }
    }
}

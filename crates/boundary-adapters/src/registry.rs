//! Registry estándar y ensamblado del boundary de ejemplo.

use std::sync::Arc;

use boundary_core::{AsyncBoundary, AsyncPipeline, Boundary, BoundaryConfig, BoundaryError, LogSink, Pipe, Pipeline, ResolverRegistry,
                    TypedStep};
use serde_json::Value;

use crate::fetcher::Fetcher;
use crate::steps::{BuildUrl, Fetch, ParseDate, ParseRows};

/// Códigos de outcome que produce el registry estándar.
pub mod outcomes {
    pub const INVALID_DATE: &str = "invalid_date";
    pub const MISSING_API_KEY: &str = "missing_api_key";
    pub const INVALID_API_KEY: &str = "invalid_api_key";
    pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
    pub const DEFAULT: &str = "default";
}

/// Mensaje que la API devuelve cuando la key no existe.
pub const KEY_NOT_FOUND: &str = "# key not found";

/// Reglas:
/// - `parse_date` -> `invalid_date`
/// - `build_url` -> `missing_api_key`
/// - `fetch` -> `service_unavailable`
/// - `parse_rows`, si la respuesta trae `error == "# key not found"` -> `invalid_api_key`
/// - cualquier otro fallo -> `default`
pub fn rescuetime_registry() -> Result<ResolverRegistry, BoundaryError> {
    ResolverRegistry::builder().on(ParseDate::NAME, outcomes::INVALID_DATE)
                               .on(BuildUrl::NAME, outcomes::MISSING_API_KEY)
                               .on(Fetch::NAME, outcomes::SERVICE_UNAVAILABLE)
                               .guarded(ParseRows::NAME,
                                        |input: &Value, _| input.get("error").and_then(Value::as_str) == Some(KEY_NOT_FOUND),
                                        outcomes::INVALID_API_KEY)
                               .default_outcome(outcomes::DEFAULT)
                               .build()
}

/// `parse_date -> build_url -> fetch -> parse_rows`
pub fn rescuetime_pipeline(api_key: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Result<Pipeline, BoundaryError> {
    Pipe::new(ParseDate).then(BuildUrl::new(api_key.into()))
                        .then(Fetch::new(fetcher))
                        .then(ParseRows)
                        .build()
}

pub fn rescuetime_boundary(api_key: impl Into<String>,
                           fetcher: Arc<dyn Fetcher>,
                           sink: Arc<dyn LogSink>,
                           config: BoundaryConfig)
                           -> Result<Boundary, BoundaryError> {
    Boundary::builder(rescuetime_pipeline(api_key, fetcher)?).resolver(rescuetime_registry()?)
                                                              .sink(sink)
                                                              .config(config)
                                                              .build()
}

/// Misma secuencia sobre el runner async. Con `step_timeout_ms` en la
/// configuración, un `fetch` lento termina como fallo de `fetch`.
pub fn rescuetime_async_boundary(api_key: impl Into<String>,
                                 fetcher: Arc<dyn Fetcher>,
                                 sink: Arc<dyn LogSink>,
                                 config: BoundaryConfig)
                                 -> Result<AsyncBoundary, BoundaryError> {
    let pipeline = AsyncPipeline::from(rescuetime_pipeline(api_key, fetcher)?);
    AsyncBoundary::builder(pipeline).resolver(rescuetime_registry()?)
                                    .sink(sink)
                                    .config(config)
                                    .build()
}

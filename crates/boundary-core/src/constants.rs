//! Constantes del núcleo.
//!
//! `PIPELINE_FORMAT_VERSION` entra en el hash de definición de cada
//! `Pipeline`: si cambia, cambian todos los `definition_hash` aunque la
//! secuencia de steps sea la misma.

/// Versión lógica del formato de definición de pipelines.
pub const PIPELINE_FORMAT_VERSION: &str = "B1.0";

/// Cantidad máxima de frames de diagnóstico por defecto en un `Cause`.
pub const DEFAULT_MAX_TRACE_FRAMES: usize = 5;

/// Target por defecto del facade `log` para los payloads de diagnóstico.
pub const DEFAULT_LOG_TARGET: &str = "boundary";

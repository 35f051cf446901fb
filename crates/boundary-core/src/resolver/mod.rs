//! Resolución de fallos a códigos de outcome.
//!
//! Rol en el flujo:
//! - El runner construye un `ErrorRecord` y consulta el `ResolverRegistry`.
//! - Las reglas se agrupan por step y mantienen su orden de registro.
//! - El registry siempre tiene un outcome por defecto: un registry sin
//!   default no se puede construir (`BoundaryError::MissingDefault`).

mod outcome;
mod registry;
mod rule;

pub use outcome::{Outcome, OutcomeCode, OutcomeFn};
pub use registry::{RegistryBuilder, Resolution, ResolutionSource, ResolverRegistry};
pub use rule::{Guard, ResolverRule};

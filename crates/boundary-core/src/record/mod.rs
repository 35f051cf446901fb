//! Captura inmutable de un fallo: `Cause` y `ErrorRecord`.

mod cause;
mod error_record;

pub use cause::{Cause, CauseKind};
pub use error_record::ErrorRecord;

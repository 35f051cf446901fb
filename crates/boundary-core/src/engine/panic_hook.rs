//! Hook de panic para binarios.
//!
//! `catch_unwind` convierte el panic de un step en un fallo resuelto, pero el
//! hook por defecto ya imprimió `thread '..' panicked at ..` en stderr. Los
//! binarios que muestran sólo mensajes localizados instalan este hook: el
//! detalle va al facade `log` y nunca a la terminal del usuario.

use std::panic;

use crate::constants::DEFAULT_LOG_TARGET;

/// Reemplaza el hook global. Llamar una vez al inicio del binario.
pub fn install_quiet_panic_hook() {
    panic::set_hook(Box::new(|info| {
        log::debug!(target: DEFAULT_LOG_TARGET, "captured panic: {info}");
    }));
}

//! Configuración del runner desde variables de entorno.
//! Convención: prefijo `BOUNDARY_`; el archivo `.env` se carga una sola vez.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_TARGET, DEFAULT_MAX_TRACE_FRAMES};
use crate::errors::BoundaryError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const ENV_MAX_TRACE_FRAMES: &str = "BOUNDARY_MAX_TRACE_FRAMES";
pub const ENV_STEP_TIMEOUT_MS: &str = "BOUNDARY_STEP_TIMEOUT_MS";
pub const ENV_LOG_TARGET: &str = "BOUNDARY_LOG_TARGET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Máximo de frames en la traza de un `Cause`.
    pub max_trace_frames: usize,
    /// Límite por step en el runner async. `None` = sin límite.
    pub step_timeout_ms: Option<u64>,
    /// Target del facade `log` usado por `LogFacadeSink`.
    pub log_target: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self { max_trace_frames: DEFAULT_MAX_TRACE_FRAMES,
               step_timeout_ms: None,
               log_target: DEFAULT_LOG_TARGET.to_string() }
    }
}

impl BoundaryConfig {
    pub fn from_env() -> Result<Self, BoundaryError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        Ok(Self { max_trace_frames: parse_var(ENV_MAX_TRACE_FRAMES)?.unwrap_or(defaults.max_trace_frames),
                  step_timeout_ms: parse_var(ENV_STEP_TIMEOUT_MS)?,
                  log_target: env::var(ENV_LOG_TARGET).ok()
                                                      .filter(|t| !t.trim().is_empty())
                                                      .unwrap_or(defaults.log_target) })
    }

    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_max_trace_frames(mut self, frames: usize) -> Self {
        self.max_trace_frames = frames;
        self
    }

    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, BoundaryError> {
    match env::var(key) {
        Ok(raw) => raw.trim()
                      .parse()
                      .map(Some)
                      .map_err(|_| BoundaryError::InvalidConfig { key: key.to_string(),
                                                                  value: raw }),
        Err(_) => Ok(None),
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = BoundaryConfig::default();
        assert_eq!(cfg.max_trace_frames, 5);
        assert_eq!(cfg.step_timeout(), None);
        assert_eq!(cfg.log_target, "boundary");
    }

    #[test]
    fn builder_helpers() {
        let cfg = BoundaryConfig::default().with_max_trace_frames(2)
                                           .with_step_timeout(Duration::from_millis(250));
        assert_eq!(cfg.max_trace_frames, 2);
        assert_eq!(cfg.step_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn huge_timeout_saturates() {
        let cfg = BoundaryConfig::default().with_step_timeout(Duration::MAX);
        assert_eq!(cfg.step_timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: BoundaryConfig = serde_json::from_str(r#"{"step_timeout_ms": 100}"#).unwrap();
        assert_eq!(cfg.max_trace_frames, 5);
        assert_eq!(cfg.step_timeout_ms, Some(100));
    }

    // Un único test toca el entorno para no competir con otros hilos.
    #[test]
    fn from_env_reads_and_validates_variables() {
        env::set_var(ENV_MAX_TRACE_FRAMES, "3");
        env::set_var(ENV_STEP_TIMEOUT_MS, "1500");
        env::set_var(ENV_LOG_TARGET, "pipeline.diag");
        let cfg = BoundaryConfig::from_env().unwrap();
        assert_eq!(cfg.max_trace_frames, 3);
        assert_eq!(cfg.step_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(cfg.log_target, "pipeline.diag");

        env::set_var(ENV_MAX_TRACE_FRAMES, "many");
        let err = BoundaryConfig::from_env().unwrap_err();
        assert_eq!(err,
                   BoundaryError::InvalidConfig { key: ENV_MAX_TRACE_FRAMES.into(),
                                                  value: "many".into() });

        env::remove_var(ENV_MAX_TRACE_FRAMES);
        env::remove_var(ENV_STEP_TIMEOUT_MS);
        env::remove_var(ENV_LOG_TARGET);
    }
}

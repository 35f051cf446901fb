//! Contrato de acceso a la API externa.
//!
//! El step `fetch` sólo conoce `Fetcher::fetch(url) -> JSON`. No se incluye
//! un cliente HTTP real: `CannedFetcher` responde desde memoria y
//! `FileFetcher` lee una respuesta guardada en disco.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::errors::FetchError;

pub trait Fetcher: Send + Sync + fmt::Debug {
    fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Respuesta fija (o fallo fijo). Registra las URLs pedidas.
#[derive(Debug)]
pub struct CannedFetcher {
    response: Result<Value, String>,
    requested: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn ok(response: Value) -> Self {
        Self { response: Ok(response),
               requested: Mutex::new(Vec::new()) }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { response: Err(reason.into()),
               requested: Mutex::new(Vec::new()) }
    }

    fn requests(&self) -> MutexGuard<'_, Vec<String>> {
        self.requested.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().clone()
    }
}

impl Fetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.requests().push(url.to_string());
        self.response.clone().map_err(FetchError::Unavailable)
    }
}

/// Lee la respuesta desde un archivo JSON, ignorando la URL.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        log::debug!("serving {url} from {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

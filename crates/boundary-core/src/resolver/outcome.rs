use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::ErrorRecord;

/// Identificador opaco para la capa de presentación (lookup i18n).
///
/// Nunca contiene el mensaje del error ni su traza.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeCode(String);

impl OutcomeCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutcomeCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OutcomeCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for OutcomeCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Función que deriva un código a partir del fallo.
pub type OutcomeFn = Arc<dyn Fn(&ErrorRecord) -> OutcomeCode + Send + Sync>;

/// Lo que produce una regla cuando aplica.
#[derive(Clone)]
pub enum Outcome {
    Code(OutcomeCode),
    Computed(OutcomeFn),
}

impl Outcome {
    pub(crate) fn produce(&self, record: &ErrorRecord) -> OutcomeCode {
        match self {
            Outcome::Code(code) => code.clone(),
            Outcome::Computed(f) => f(record),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Code(code) => f.debug_tuple("Code").field(code).finish(),
            Outcome::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<OutcomeCode> for Outcome {
    fn from(code: OutcomeCode) -> Self {
        Outcome::Code(code)
    }
}

//! Capa de presentación: código de outcome -> mensaje para el usuario.
//!
//! Sólo el `OutcomeCode` cruza desde el núcleo; nunca el error ni la traza.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use boundary_core::OutcomeCode;
use once_cell::sync::Lazy;

use crate::registry::outcomes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Es,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLang(pub String);

impl FromStr for Lang {
    type Err = UnsupportedLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            other => Err(UnsupportedLang(other.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Lang::En => "en",
                        Lang::Es => "es",
                    })
    }
}

static MESSAGES: Lazy<HashMap<(Lang, &'static str), &'static str>> = Lazy::new(|| {
    HashMap::from([((Lang::En, outcomes::INVALID_DATE), "The date is not valid. Use YYYY-MM-DD."),
                   ((Lang::Es, outcomes::INVALID_DATE), "La fecha no es válida. Usa AAAA-MM-DD."),
                   ((Lang::En, outcomes::MISSING_API_KEY), "An API key is required."),
                   ((Lang::Es, outcomes::MISSING_API_KEY), "Se requiere una API key."),
                   ((Lang::En, outcomes::INVALID_API_KEY), "The API key was rejected."),
                   ((Lang::Es, outcomes::INVALID_API_KEY), "La API key fue rechazada."),
                   ((Lang::En, outcomes::SERVICE_UNAVAILABLE), "The service is unavailable. Try again later."),
                   ((Lang::Es, outcomes::SERVICE_UNAVAILABLE), "El servicio no está disponible. Intenta más tarde."),
                   ((Lang::En, outcomes::DEFAULT), "Something went wrong."),
                   ((Lang::Es, outcomes::DEFAULT), "Algo salió mal.")])
});

/// Catálogo de mensajes por idioma. Un código desconocido cae al mensaje de
/// `default` del mismo idioma.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    lang: Lang,
}

impl MessageCatalog {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn contains(&self, code: &OutcomeCode) -> bool {
        MESSAGES.contains_key(&(self.lang, code.as_str()))
    }

    pub fn message(&self, code: &OutcomeCode) -> &'static str {
        MESSAGES.get(&(self.lang, code.as_str()))
                .or_else(|| MESSAGES.get(&(self.lang, outcomes::DEFAULT)))
                .copied()
                .unwrap_or("error")
    }
}

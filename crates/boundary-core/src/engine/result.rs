use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::resolver::OutcomeCode;

/// Resultado uniforme de una invocación.
///
/// Estados terminales del runner: `Running -> Succeeded | Failed`. Al ser un
/// enum, nunca hay valor y outcome a la vez, ni ninguno de los dos.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunResult {
    /// Todos los steps terminaron; contiene el output del último.
    Succeeded(Value),
    /// Un step falló; contiene el código resuelto para presentación.
    Failed(OutcomeCode),
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Succeeded(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            RunResult::Succeeded(v) => Some(v),
            RunResult::Failed(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<&OutcomeCode> {
        match self {
            RunResult::Succeeded(_) => None,
            RunResult::Failed(code) => Some(code),
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            RunResult::Succeeded(v) => Some(v),
            RunResult::Failed(_) => None,
        }
    }

    /// Decodifica el valor final a un tipo concreto. `None` si la invocación
    /// falló.
    pub fn value_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.value().map(|v| serde_json::from_value(v.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_are_exclusive() {
        let ok = RunResult::Succeeded(json!([1, 2]));
        let failed = RunResult::Failed("invalid_date".into());
        assert!(ok.is_success() && ok.outcome().is_none());
        assert!(!failed.is_success() && failed.value().is_none());
        assert_eq!(failed.outcome().map(OutcomeCode::as_str), Some("invalid_date"));
        assert_eq!(ok.value_as::<Vec<u8>>().unwrap().unwrap(), vec![1, 2]);
        assert!(failed.value_as::<Vec<u8>>().is_none());
    }
}

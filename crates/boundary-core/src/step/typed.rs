use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Step;
use crate::errors::{StepFailure, StepResult};

/// Interfaz de alto nivel para definir Steps con tipos fuertes.
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador de
/// abajo decodifica el input desde JSON y codifica el output. Si el decode o
/// el encode fallan, el fallo se atribuye a este step.
pub trait TypedStep: Send + Sync {
    /// Tipo esperado como input.
    type Input: DeserializeOwned;
    /// Tipo producido como output.
    type Output: Serialize;

    /// Nombre estable del step dentro del pipeline.
    const NAME: &'static str;

    fn run_typed(&self, input: Self::Input) -> StepResult<Self::Output>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStep` implementa `Step` neutro.
// -------------------------------------------------------------
impl<T> Step for T where T: TypedStep
{
    fn name(&self) -> &str {
        T::NAME
    }

    fn transform(&self, input: &Value) -> StepResult<Value> {
        let typed_in = <T::Input as Deserialize>::deserialize(input).map_err(|e| StepFailure::InputDecode(e.to_string()))?;
        let out = self.run_typed(typed_in)?;
        let encoded = serde_json::to_value(out).map_err(|e| StepFailure::OutputEncode(e.to_string()))?;
        Ok(encoded)
    }
}

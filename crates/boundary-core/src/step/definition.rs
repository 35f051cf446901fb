use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::StepResult;

/// Trait que define un Step neutro.
///
/// Implementaciones deben ser puras respecto a su input y no guardar estado
/// mutable entre invocaciones: un mismo step puede ejecutarse en paralelo
/// desde varias invocaciones del pipeline.
pub trait Step: Send + Sync {
    /// Nombre estable y único dentro del pipeline.
    fn name(&self) -> &str;

    /// Transforma el valor recibido. Un `Err` (o un panic) es un fallo de
    /// este step.
    fn transform(&self, input: &Value) -> StepResult<Value>;
}

/// Step construido a partir de una closure.
pub struct FnStep<F> {
    name: String,
    f: F,
}

impl<F> FnStep<F> where F: Fn(&Value) -> StepResult<Value> + Send + Sync
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(),
               f }
    }
}

impl<F> Step for FnStep<F> where F: Fn(&Value) -> StepResult<Value> + Send + Sync
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, input: &Value) -> StepResult<Value> {
        (self.f)(input)
    }
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Atajo: closure -> `Arc<dyn Step>` listo para `Pipeline::new`.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn Step>
    where F: Fn(&Value) -> StepResult<Value> + Send + Sync + 'static
{
    Arc::new(FnStep::new(name, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fn_step_runs_closure() {
        let double = from_fn("double", |v| Ok(json!(v.as_i64().unwrap_or(0) * 2)));
        assert_eq!(double.name(), "double");
        assert_eq!(double.transform(&json!(21)).unwrap(), json!(42));
    }
}

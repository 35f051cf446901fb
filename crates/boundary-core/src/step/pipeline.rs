use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::json;

use super::{Step, TypedStep};
use crate::constants::PIPELINE_FORMAT_VERSION;
use crate::errors::BoundaryError;
use crate::hashing::digest_value;

/// Secuencia inmutable, no vacía, de steps con nombres únicos.
///
/// Es configuración compartida: se clona barato (`Arc`) y puede ser usada por
/// muchas invocaciones concurrentes.
#[derive(Clone)]
pub struct Pipeline {
    steps: Arc<[Arc<dyn Step>]>,
    definition_hash: String,
}

impl Pipeline {
    /// Valida nombres (no vacío, sin duplicados) y calcula el hash de definición.
    pub fn new(steps: Vec<Arc<dyn Step>>) -> Result<Self, BoundaryError> {
        let definition_hash = definition_hash_for(steps.iter().map(|s| s.name()))?;
        Ok(Self { steps: steps.into(),
                  definition_hash })
    }

    pub fn steps(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
         .field("steps", &self.step_names())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Valida una secuencia de nombres y devuelve su hash de definición.
///
/// El hash cubre la versión de formato y el orden de los nombres, así dos
/// pipelines con los mismos steps en distinto orden no se confunden en los
/// diagnósticos.
pub(crate) fn definition_hash_for<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<String, BoundaryError> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for name in names {
        if !seen.insert(name) {
            return Err(BoundaryError::DuplicateStep(name.to_string()));
        }
        ordered.push(name);
    }
    if ordered.is_empty() {
        return Err(BoundaryError::EmptyPipeline);
    }
    Ok(digest_value(&json!({
        "format": PIPELINE_FORMAT_VERSION,
        "steps": ordered,
    })))
}

/// Marker trait to assert two types are the same at compile time.
/// Implemented only for identical types (T: SameAs<T> for all T).
pub trait SameAs<T> {}
impl<T> SameAs<T> for T {}

/// Typed pipeline builder that enforces at compile time that the next step's
/// input matches the previous step's output.
///
/// Usage:
///   let pipeline = Pipe::new(ParseDate).then(BuildUrl::new(key)).build()?;
pub struct Pipe<S: TypedStep + 'static> {
    steps: Vec<Arc<dyn Step>>,
    _out: PhantomData<fn() -> S::Output>,
}

impl<S: TypedStep + 'static> Pipe<S> {
    pub fn new(step: S) -> Self {
        Self { steps: vec![Arc::new(step)],
               _out: PhantomData }
    }

    /// Append a new step, enforcing N::Input == S::Output at compile time.
    pub fn then<N>(mut self, next: N) -> Pipe<N>
        where N: TypedStep + 'static,
              N::Input: SameAs<S::Output>
    {
        self.steps.push(Arc::new(next));
        Pipe::<N> { steps: self.steps,
                    _out: PhantomData }
    }

    /// Build the pipeline. Duplicate names are still rejected here since the
    /// type system only checks adjacency.
    pub fn build(self) -> Result<Pipeline, BoundaryError> {
        Pipeline::new(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::from_fn;
    use serde_json::Value;

    fn identity(name: &str) -> Arc<dyn Step> {
        from_fn(name.to_string(), |v: &Value| Ok(v.clone()))
    }

    #[test]
    fn empty_pipeline_is_rejected() {
        assert_eq!(Pipeline::new(vec![]).unwrap_err(), BoundaryError::EmptyPipeline);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Pipeline::new(vec![identity("a"), identity("b"), identity("a")]).unwrap_err();
        assert_eq!(err, BoundaryError::DuplicateStep("a".into()));
    }

    #[test]
    fn definition_hash_depends_on_order() {
        let ab = Pipeline::new(vec![identity("a"), identity("b")]).unwrap();
        let ba = Pipeline::new(vec![identity("b"), identity("a")]).unwrap();
        let ab_again = Pipeline::new(vec![identity("a"), identity("b")]).unwrap();
        assert_ne!(ab.definition_hash(), ba.definition_hash());
        assert_eq!(ab.definition_hash(), ab_again.definition_hash());
        assert_eq!(ab.step_names(), vec!["a", "b"]);
    }

    struct Parse;
    impl TypedStep for Parse {
        type Input = String;
        type Output = i64;
        const NAME: &'static str = "parse";
        fn run_typed(&self, input: String) -> crate::errors::StepResult<i64> {
            Ok(input.trim().parse()?)
        }
    }

    struct Square;
    impl TypedStep for Square {
        type Input = i64;
        type Output = i64;
        const NAME: &'static str = "square";
        fn run_typed(&self, input: i64) -> crate::errors::StepResult<i64> {
            Ok(input * input)
        }
    }

    #[test]
    fn pipe_builds_typed_sequence() {
        let pipeline = Pipe::new(Parse).then(Square).build().unwrap();
        assert_eq!(pipeline.step_names(), vec!["parse", "square"]);
    }
}

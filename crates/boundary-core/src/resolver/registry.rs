use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::{Guard, Outcome, OutcomeCode, ResolverRule};
use crate::errors::BoundaryError;
use crate::record::{Cause, ErrorRecord};

/// Qué regla produjo el código. Los índices son posiciones dentro de las
/// reglas registradas para el step fallido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Guarded { index: usize },
    Unguarded { index: usize },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: OutcomeCode,
    pub source: ResolutionSource,
}

/// Mapa inmutable `step -> reglas` con un outcome por defecto.
///
/// Orden de resolución para un step fallido:
/// 1. reglas con guard que evalúa `true`, en orden de registro;
/// 2. la primera regla sin guard;
/// 3. el default del registry.
#[derive(Debug, Clone)]
pub struct ResolverRegistry {
    rules: IndexMap<String, Vec<ResolverRule>>,
    default: OutcomeCode,
}

impl ResolverRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry sin reglas: todo fallo resuelve al default.
    pub fn with_default(code: impl Into<OutcomeCode>) -> Self {
        Self { rules: IndexMap::new(),
               default: code.into() }
    }

    pub fn default_outcome(&self) -> &OutcomeCode {
        &self.default
    }

    /// Steps con al menos una regla, en orden de primer registro.
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rules_for(&self, step: &str) -> &[ResolverRule] {
        self.rules.get(step).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn resolve(&self, record: &ErrorRecord) -> Resolution {
        let rules = self.rules_for(record.failing_step());

        for (index, rule) in rules.iter().enumerate().filter(|(_, r)| r.is_guarded()) {
            if rule.matches(record) {
                if let Some(code) = rule.produce(record) {
                    return Resolution { code,
                                        source: ResolutionSource::Guarded { index } };
                }
            }
        }

        for (index, rule) in rules.iter().enumerate().filter(|(_, r)| !r.is_guarded()) {
            if let Some(code) = rule.produce(record) {
                return Resolution { code,
                                    source: ResolutionSource::Unguarded { index } };
            }
        }

        Resolution { code: self.default.clone(),
                     source: ResolutionSource::Default }
    }
}

/// Builder del registry. `build` falla si no se declaró un default.
#[derive(Default)]
pub struct RegistryBuilder {
    rules: IndexMap<String, Vec<ResolverRule>>,
    default: Option<OutcomeCode>,
}

impl RegistryBuilder {
    fn push(mut self, rule: ResolverRule) -> Self {
        self.rules.entry(rule.step_name().to_string()).or_default().push(rule);
        self
    }

    /// Regla incondicional con código fijo.
    pub fn on(self, step: impl Into<String>, code: impl Into<OutcomeCode>) -> Self {
        self.push(ResolverRule::new(step, None, Outcome::Code(code.into())))
    }

    /// Regla incondicional con código calculado a partir del fallo.
    pub fn on_with<F>(self, step: impl Into<String>, f: F) -> Self
        where F: Fn(&ErrorRecord) -> OutcomeCode + Send + Sync + 'static
    {
        self.push(ResolverRule::new(step, None, Outcome::Computed(Arc::new(f))))
    }

    /// Regla con guard sobre `(input_at_failure, cause)`.
    pub fn guarded<G>(self, step: impl Into<String>, guard: G, code: impl Into<OutcomeCode>) -> Self
        where G: Fn(&Value, &Cause) -> bool + Send + Sync + 'static
    {
        let guard: Guard = Arc::new(guard);
        self.push(ResolverRule::new(step, Some(guard), Outcome::Code(code.into())))
    }

    pub fn guarded_with<G, F>(self, step: impl Into<String>, guard: G, f: F) -> Self
        where G: Fn(&Value, &Cause) -> bool + Send + Sync + 'static,
              F: Fn(&ErrorRecord) -> OutcomeCode + Send + Sync + 'static
    {
        let guard: Guard = Arc::new(guard);
        self.push(ResolverRule::new(step, Some(guard), Outcome::Computed(Arc::new(f))))
    }

    pub fn default_outcome(mut self, code: impl Into<OutcomeCode>) -> Self {
        self.default = Some(code.into());
        self
    }

    pub fn build(self) -> Result<ResolverRegistry, BoundaryError> {
        let default = self.default.ok_or(BoundaryError::MissingDefault)?;
        Ok(ResolverRegistry { rules: self.rules,
                              default })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CauseKind;
    use serde_json::json;
    use uuid::Uuid;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Msg(&'static str);

    fn record(step: &str, input: Value) -> ErrorRecord {
        let cause = Cause::capture(CauseKind::Error, &Msg("boom"), 5);
        ErrorRecord::new(Uuid::new_v4(), 0, step, input, cause)
    }

    #[test]
    fn missing_default_is_a_build_error() {
        let err = ResolverRegistry::builder().on("x", "code").build().unwrap_err();
        assert_eq!(err, BoundaryError::MissingDefault);
    }

    #[test]
    fn empty_registry_falls_back_to_default() {
        let reg = ResolverRegistry::with_default("default");
        let res = reg.resolve(&record("anything", json!(null)));
        assert_eq!(res.code, "default");
        assert_eq!(res.source, ResolutionSource::Default);
    }

    #[test]
    fn guarded_rule_wins_over_unguarded_regardless_of_order() {
        let unguarded_first = ResolverRegistry::builder().on("x", "plain")
                                                         .guarded("x", |_, _| true, "guarded")
                                                         .default_outcome("default")
                                                         .build()
                                                         .unwrap();
        let guarded_first = ResolverRegistry::builder().guarded("x", |_, _| true, "guarded")
                                                       .on("x", "plain")
                                                       .default_outcome("default")
                                                       .build()
                                                       .unwrap();
        let r = record("x", json!({}));
        assert_eq!(unguarded_first.resolve(&r).code, "guarded");
        assert_eq!(unguarded_first.resolve(&r).source, ResolutionSource::Guarded { index: 1 });
        assert_eq!(guarded_first.resolve(&r).code, "guarded");
    }

    #[test]
    fn false_guard_falls_through_to_unguarded() {
        let reg = ResolverRegistry::builder().on("x", "plain")
                                             .guarded("x", |_, _| false, "guarded")
                                             .default_outcome("default")
                                             .build()
                                             .unwrap();
        let res = reg.resolve(&record("x", json!({})));
        assert_eq!(res.code, "plain");
        assert_eq!(res.source, ResolutionSource::Unguarded { index: 0 });
    }

    #[test]
    fn first_true_guard_in_registration_order_wins() {
        let a_then_b = ResolverRegistry::builder().guarded("x", |_, _| true, "a")
                                                  .guarded("x", |_, _| true, "b")
                                                  .default_outcome("default")
                                                  .build()
                                                  .unwrap();
        let b_then_a = ResolverRegistry::builder().guarded("x", |_, _| true, "b")
                                                  .guarded("x", |_, _| true, "a")
                                                  .default_outcome("default")
                                                  .build()
                                                  .unwrap();
        let r = record("x", json!({}));
        assert_eq!(a_then_b.resolve(&r).code, "a");
        assert_eq!(b_then_a.resolve(&r).code, "b");
    }

    #[test]
    fn guard_sees_input_at_failure() {
        let reg = ResolverRegistry::builder().guarded("parse_rows",
                                                      |input, _| input.get("error").and_then(Value::as_str) == Some("# key not found"),
                                                      "invalid_api_key")
                                             .default_outcome("default")
                                             .build()
                                             .unwrap();
        assert_eq!(reg.resolve(&record("parse_rows", json!({"error": "# key not found"}))).code, "invalid_api_key");
        assert_eq!(reg.resolve(&record("parse_rows", json!({}))).code, "default");
    }

    #[test]
    fn panicking_guard_is_a_non_match() {
        let reg = ResolverRegistry::builder().guarded("x", |_, _| panic!("guard exploded"), "never")
                                             .on("x", "plain")
                                             .default_outcome("default")
                                             .build()
                                             .unwrap();
        assert_eq!(reg.resolve(&record("x", json!({}))).code, "plain");
    }

    #[test]
    fn rules_for_other_steps_do_not_apply() {
        let reg = ResolverRegistry::builder().on("y", "y_failed").default_outcome("default").build().unwrap();
        assert_eq!(reg.resolve(&record("x", json!({}))).code, "default");
        assert_eq!(reg.steps().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn computed_outcome_reads_the_record() {
        let reg = ResolverRegistry::builder().on_with("x", |r| OutcomeCode::new(format!("{}_failed", r.failing_step())))
                                             .default_outcome("default")
                                             .build()
                                             .unwrap();
        assert_eq!(reg.resolve(&record("x", json!({}))).code, "x_failed");
    }

    #[test]
    fn panicking_outcome_function_is_skipped() {
        let reg = ResolverRegistry::builder().on_with("x", |_| panic!("no code"))
                                             .default_outcome("default")
                                             .build()
                                             .unwrap();
        let res = reg.resolve(&record("x", json!({})));
        assert_eq!(res.code, "default");
        assert_eq!(res.source, ResolutionSource::Default);
    }
}

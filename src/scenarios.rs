//! Escenarios de demostración sobre la secuencia de ejemplo.
//!
//! Cada escenario fija el input y la respuesta que devuelve el fetcher; el
//! reporte sólo contiene lo que vería un caller: valor u outcome y el mensaje
//! localizado.

use std::sync::Arc;

use boundary_adapters::{rescuetime_pipeline, rescuetime_registry, CannedFetcher, Lang, MessageCatalog};
use boundary_core::{Boundary, BoundaryConfig, BoundaryError, LogSink, RunResult};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub input: Value,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub result: RunResult,
    pub message: Option<String>,
}

impl Scenario {
    /// Los cuatro caminos de la secuencia: éxito, fecha inválida, key
    /// rechazada y respuesta vacía.
    pub fn standard() -> Vec<Scenario> {
        let ok = json!({
            "row_headers": ["Rank", "Time Spent (seconds)", "Number of People", "Activity", "Category", "Productivity"],
            "rows": [[1, 3600, 1, "terminal", "Systems Operations", 2], [2, 900, 1, "docs.rs", "Reference & Learning", 2]]
        });
        vec![Scenario { name: "rows",
                        input: json!("2024-03-01"),
                        response: ok.clone() },
             Scenario { name: "invalid_date",
                        input: json!("not-a-date"),
                        response: ok },
             Scenario { name: "invalid_api_key",
                        input: json!("2024-03-01"),
                        response: json!({"error": "# key not found"}) },
             Scenario { name: "empty_response",
                        input: json!("2024-03-01"),
                        response: json!({}) }]
    }
}

pub fn run_scenarios(scenarios: &[Scenario],
                     api_key: &str,
                     sink: Arc<dyn LogSink>,
                     config: &BoundaryConfig,
                     lang: Lang)
                     -> Result<Vec<ScenarioReport>, BoundaryError> {
    let catalog = MessageCatalog::new(lang);
    // Un único registry para todos los escenarios.
    let registry = Arc::new(rescuetime_registry()?);
    scenarios.iter()
             .map(|scenario| -> Result<ScenarioReport, BoundaryError> {
                 let fetcher = Arc::new(CannedFetcher::ok(scenario.response.clone()));
                 let boundary = Boundary::builder(rescuetime_pipeline(api_key, fetcher)?).shared_resolver(Arc::clone(&registry))
                                                                                         .sink(Arc::clone(&sink))
                                                                                         .config(config.clone())
                                                                                         .build()?;
                 let result = boundary.run(scenario.input.clone());
                 let message = result.outcome().map(|code| catalog.message(code).to_string());
                 Ok(ScenarioReport { name: scenario.name.to_string(),
                                     result,
                                     message })
             })
             .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_core::InMemorySink;

    #[test]
    fn standard_scenarios_cover_success_and_each_failure_route() {
        let sink = Arc::new(InMemorySink::new());
        let reports = run_scenarios(&Scenario::standard(), "K3Y", sink.clone(), &BoundaryConfig::default(), Lang::En).unwrap();
        let outcomes: Vec<Option<&str>> = reports.iter().map(|r| r.result.outcome().map(|c| c.as_str())).collect();
        assert_eq!(outcomes, vec![None, Some("invalid_date"), Some("invalid_api_key"), Some("default")]);
        assert!(reports[0].message.is_none());
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn scenarios_share_one_registry_and_honor_config() {
        let sink = Arc::new(InMemorySink::new());
        let config = BoundaryConfig::default().with_max_trace_frames(1);
        let reports = run_scenarios(&Scenario::standard()[1..], "K3Y", sink.clone(), &config, Lang::Es).unwrap();
        assert_eq!(reports[0].message.as_deref(), Some("La fecha no es válida. Usa AAAA-MM-DD."));
        assert!(sink.payloads().iter().all(|p| p.cause.trace().len() <= 1));
    }
}

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use boundary_flow::adapters::{outcomes, rescuetime_boundary, CannedFetcher, Lang, MessageCatalog};
use boundary_flow::base::{AsyncPipeline, AsyncStep, CauseKind, ResolutionSource, StepResult};
use boundary_flow::{AsyncBoundary, BoundaryConfig, InMemorySink, ResolverRegistry, RunResult};
use rayon::prelude::*;
use serde_json::{json, Value};
use uuid::Uuid;

fn response(rows: usize) -> Value {
    let rows: Vec<Value> = (0..rows).map(|i| json!([i + 1, 60 * (i + 1), 1, format!("app-{i}"), null, 0])).collect();
    json!({ "rows": rows })
}

#[test]
fn one_boundary_serves_parallel_callers() {
    let sink = Arc::new(InMemorySink::new());
    let boundary = rescuetime_boundary("K3Y", Arc::new(CannedFetcher::ok(response(4))), sink.clone(), BoundaryConfig::default()).unwrap();

    let results: Vec<RunResult> = (0..64).into_par_iter()
                                         .map(|i| {
                                             let input = if i % 4 == 0 { json!("bad date") } else { json!(format!("2024-01-{:02}", i % 28 + 1)) };
                                             boundary.run(input)
                                         })
                                         .collect();

    for (i, result) in results.iter().enumerate() {
        if i % 4 == 0 {
            assert_eq!(result, &RunResult::Failed(outcomes::INVALID_DATE.into()));
        } else {
            assert_eq!(result.value().and_then(Value::as_array).map(Vec::len), Some(4));
        }
    }
    let run_ids: HashSet<Uuid> = sink.payloads().iter().map(|p| p.run_id).collect();
    assert_eq!(run_ids.len(), 16);
}

#[test]
fn guarded_rules_resolve_by_guard_then_registration() {
    let pipeline = boundary_flow::Pipeline::new(vec![boundary_flow::base::from_fn("x", |_: &Value| Err("x failed".into()))]).unwrap();
    let run = |registry: ResolverRegistry, input: Value| {
        boundary_flow::Boundary::builder(pipeline.clone()).resolver(registry)
                                                          .sink(Arc::new(InMemorySink::new()))
                                                          .build()
                                                          .unwrap()
                                                          .run(input)
    };
    let is_flagged = |input: &Value, _: &boundary_flow::base::Cause| input.get("flag") == Some(&json!(true));
    let unguarded_then_guarded = || {
        ResolverRegistry::builder().on("x", "plain")
                                   .guarded("x", is_flagged, "flagged")
                                   .default_outcome("default")
                                   .build()
                                   .unwrap()
    };

    assert_eq!(run(unguarded_then_guarded(), json!({"flag": false})), RunResult::Failed("plain".into()));
    assert_eq!(run(unguarded_then_guarded(), json!({"flag": true})), RunResult::Failed("flagged".into()));

    let two_guards = ResolverRegistry::builder().guarded("x", |_, _| true, "first")
                                                .guarded("x", |_, _| true, "second")
                                                .default_outcome("default")
                                                .build()
                                                .unwrap();
    let record = boundary_flow::base::ErrorRecord::new(Uuid::new_v4(),
                                                       0,
                                                       "x",
                                                       json!({}),
                                                       boundary_flow::base::Cause::capture(CauseKind::Error,
                                                                                           &boundary_flow::BoundaryError::EmptyPipeline,
                                                                                           5));
    let resolution = two_guards.resolve(&record);
    assert_eq!(resolution.code, "first");
    assert_eq!(resolution.source, ResolutionSource::Guarded { index: 0 });
    assert_eq!(run(two_guards, json!({})), RunResult::Failed("first".into()));
}

struct Lookup;

#[async_trait]
impl AsyncStep for Lookup {
    fn name(&self) -> &str {
        "lookup"
    }

    async fn transform(&self, input: Value) -> StepResult<Value> {
        match input.as_str() {
            Some("known") => Ok(json!({"id": 1})),
            _ => Err(format!("no entry for {input}").into()),
        }
    }
}

#[tokio::test]
async fn async_steps_and_presentation_compose() {
    let sink = Arc::new(InMemorySink::new());
    let registry = ResolverRegistry::builder().on("lookup", outcomes::SERVICE_UNAVAILABLE).default_outcome(outcomes::DEFAULT).build().unwrap();
    let boundary = AsyncBoundary::builder(AsyncPipeline::new(vec![Arc::new(Lookup) as Arc<dyn AsyncStep>]).unwrap()).resolver(registry)
                                                                                                  .sink(sink.clone())
                                                                                                  .build()
                                                                                                  .unwrap();

    assert_eq!(boundary.run(json!("known")).await, RunResult::Succeeded(json!({"id": 1})));
    let failed = boundary.run(json!("unknown")).await;
    let code = failed.outcome().unwrap();
    assert_eq!(MessageCatalog::new(Lang::Es).message(code), "El servicio no está disponible. Intenta más tarde.");
    assert_eq!(sink.payloads()[0].cause.message(), "no entry for \"unknown\"");
}

#[test]
fn async_boundary_can_be_driven_from_sync_code() {
    let boundary = boundary_flow::adapters::rescuetime_async_boundary("K3Y",
                                                                      Arc::new(CannedFetcher::ok(response(2))),
                                                                      Arc::new(InMemorySink::new()),
                                                                      BoundaryConfig::default()).unwrap();
    let result = tokio_test::block_on(boundary.run(json!("2024-02-02")));
    assert_eq!(result.value().and_then(Value::as_array).map(Vec::len), Some(2));
}

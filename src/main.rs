use std::sync::Arc;

use boundary_flow::adapters::{rescuetime_async_boundary, CannedFetcher, Lang};
use boundary_flow::base::{from_fn, init_dotenv, install_quiet_panic_hook};
use boundary_flow::{run_scenarios, Boundary, BoundaryConfig, InMemorySink, LogFacadeSink, Pipeline, ResolverRegistry, Scenario};
use serde_json::{json, Value};

/// Secuencia aritmética mínima: `[add1, add2, times3]` sobre 1 -> 12.
fn run_arithmetic() -> Result<(), boundary_flow::BoundaryError> {
    let pipeline = Pipeline::new(vec![from_fn("add1", |v: &Value| Ok(json!(v.as_i64().unwrap_or_default() + 1))),
                                      from_fn("add2", |v: &Value| Ok(json!(v.as_i64().unwrap_or_default() + 2))),
                                      from_fn("times3", |v: &Value| Ok(json!(v.as_i64().unwrap_or_default() * 3)))])?;
    let boundary = Boundary::builder(pipeline).resolver(ResolverRegistry::with_default("default")).build()?;
    println!("[arithmetic] {:?}", boundary.run(json!(1)));
    Ok(())
}

fn main() {
    // Cargar .env antes del logger para que RUST_LOG aplique
    init_dotenv();
    env_logger::init();
    install_quiet_panic_hook();
    let config = match BoundaryConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[boundary-demo] config error: {e}");
            std::process::exit(4);
        }
    };
    log::info!("demo config: {config:?}");

    if let Err(e) = run_arithmetic() {
        eprintln!("[arithmetic] {e}");
    }

    let sink = Arc::new(InMemorySink::new());
    let lang = std::env::var("BOUNDARY_LANG").ok().and_then(|l| l.parse().ok()).unwrap_or(Lang::En);
    match run_scenarios(&Scenario::standard(), "demo-key", sink.clone(), &config, lang) {
        Ok(reports) => {
            for report in reports {
                match serde_json::to_string(&report) {
                    Ok(line) => println!("[scenario] {line}"),
                    Err(e) => eprintln!("[scenario] {e}"),
                }
            }
        }
        Err(e) => eprintln!("[scenario] {e}"),
    }
    for payload in sink.payloads() {
        println!("[diagnostic] step={} outcome={} cause={}", payload.failing_step, payload.outcome, payload.cause.message());
    }

    // Mismo flujo sobre el runner async.
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[async] runtime error: {e}");
            std::process::exit(5);
        }
    };
    let fetcher = Arc::new(CannedFetcher::unavailable("connection refused"));
    match rescuetime_async_boundary("demo-key", fetcher, Arc::new(LogFacadeSink::new(config.log_target.clone())), config) {
        Ok(boundary) => println!("[async] {:?}", rt.block_on(boundary.run(json!("2024-03-01")))),
        Err(e) => eprintln!("[async] {e}"),
    }
}

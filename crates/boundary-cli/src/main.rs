use std::process::exit;
use std::sync::Arc;

use boundary_adapters::{rescuetime_boundary, FileFetcher, Lang, MessageCatalog};
use boundary_core::{init_dotenv, install_quiet_panic_hook, BoundaryConfig, LogFacadeSink, RunResult};

const USAGE: &str = "Uso: boundary-cli rows --date <YYYY-MM-DD> --key <KEY> --response <FILE> [--lang en|es]";

const EXIT_FAILED: i32 = 2;
const EXIT_USAGE: i32 = 4;

#[derive(Debug, PartialEq)]
struct RowsArgs {
    date: String,
    key: String,
    response: String,
    lang: Lang,
}

/// `rows --date <D> --key <K> --response <FILE> [--lang en|es]`
fn parse_rows_args(args: &[String]) -> Result<RowsArgs, String> {
    let mut date: Option<String> = None;
    let mut key: Option<String> = None;
    let mut response: Option<String> = None;
    let mut lang = Lang::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1).cloned().ok_or_else(|| format!("falta valor para {flag}"))?;
        match flag {
            "--date" => date = Some(value),
            "--key" => key = Some(value),
            "--response" => response = Some(value),
            "--lang" => lang = value.parse().map_err(|e| format!("{e}"))?,
            other => return Err(format!("argumento desconocido: {other}")),
        }
        i += 2;
    }
    match (date, key, response) {
        (Some(date), Some(key), Some(response)) => Ok(RowsArgs { date,
                                                                  key,
                                                                  response,
                                                                  lang }),
        _ => Err("faltan --date, --key o --response".to_string()),
    }
}

fn run_rows(args: RowsArgs) -> i32 {
    let config = match BoundaryConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[boundary rows] config error: {e}");
            return EXIT_USAGE;
        }
    };
    let sink = Arc::new(LogFacadeSink::new(config.log_target.clone()));
    let boundary = match rescuetime_boundary(args.key, Arc::new(FileFetcher::new(&args.response)), sink, config) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("[boundary rows] {e}");
            return EXIT_USAGE;
        }
    };
    log::info!("running pipeline {} for {}", boundary.pipeline().definition_hash(), args.date);

    match boundary.run(serde_json::Value::String(args.date)) {
        RunResult::Succeeded(rows) => {
            match serde_json::to_string_pretty(&rows) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("[boundary rows] {e}");
                    return EXIT_FAILED;
                }
            }
            0
        }
        RunResult::Failed(code) => {
            eprintln!("{}", MessageCatalog::new(args.lang).message(&code));
            EXIT_FAILED
        }
    }
}

fn main() {
    // Cargar .env si existe (BOUNDARY_*, RUST_LOG)
    init_dotenv();
    env_logger::init();
    // El usuario sólo ve el mensaje localizado; el panic de un step va al log
    install_quiet_panic_hook();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] != "rows" {
        eprintln!("{USAGE}");
        exit(EXIT_USAGE);
    }
    match parse_rows_args(&args[2..]) {
        Ok(rows) => exit(run_rows(rows)),
        Err(msg) => {
            eprintln!("[boundary rows] {msg}");
            eprintln!("{USAGE}");
            exit(EXIT_USAGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let parsed = parse_rows_args(&args(&["--date", "2024-03-01", "--key", "K", "--response", "r.json", "--lang", "es"])).unwrap();
        assert_eq!(parsed,
                   RowsArgs { date: "2024-03-01".into(),
                              key: "K".into(),
                              response: "r.json".into(),
                              lang: Lang::Es });
    }

    #[test]
    fn lang_defaults_to_english() {
        let parsed = parse_rows_args(&args(&["--response", "r.json", "--key", "K", "--date", "x"])).unwrap();
        assert_eq!(parsed.lang, Lang::En);
    }

    #[test]
    fn rejects_incomplete_or_unknown_arguments() {
        assert!(parse_rows_args(&args(&["--date", "2024-03-01"])).is_err());
        assert!(parse_rows_args(&args(&["--date"])).is_err());
        assert!(parse_rows_args(&args(&["--date", "d", "--key", "k", "--response", "r", "--verbose", "1"])).is_err());
        assert!(parse_rows_args(&args(&["--date", "d", "--key", "k", "--response", "r", "--lang", "fr"])).is_err());
    }
}

//! One-shot metric query against the configured engine.
//!
//! Prints one JSON object per result row. Exits non-zero on unresolved
//! group-bys or engine failure.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use semgate_core::protocol::engine::QueryResult;
use semgate_gateway::config;
use semgate_gateway::engine;
use semgate_gateway::obs::ApiMetrics;
use semgate_gateway::service::{self, QueryError};

#[derive(Debug, Parser)]
#[command(name = "semgate-query", about = "Run a single metric query")]
struct Args {
    /// Gateway config file (defaults to $SEMGATE_CONFIG, then semgate.yaml).
    #[arg(long)]
    config: Option<String>,

    /// Metric names, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    metrics: Vec<String>,

    /// Group-by names or aliases, comma separated.
    #[arg(long = "group-by", value_delimiter = ',')]
    group_by: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let path = args.config.unwrap_or_else(config::config_path);

    let engine = match config::load_from_file(&path).and_then(|cfg| engine::build(&cfg.engine)) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(config = %path, error = %e, "startup failed");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let obs = ApiMetrics::default();
    let res = service::run_query(engine.as_ref(), args.metrics, &args.group_by, &obs).await;
    let code = exit_status(&res);
    match res {
        Ok(result) => {
            for record in result.into_records() {
                println!("{}", serde_json::Value::Object(record));
            }
        }
        Err(QueryError::Unresolved(m)) => {
            for (raw, candidates) in m {
                tracing::error!(group_by = %raw, candidates = ?candidates, "could not resolve group_by");
            }
        }
        Err(QueryError::Engine(e)) => {
            tracing::error!(error = %e, "query failed");
        }
    }
    ExitCode::from(code)
}

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_UNRESOLVED: u8 = 2;

/// 0 on success, 2 when group-bys did not resolve, 1 for engine failures.
fn exit_status(res: &Result<QueryResult, QueryError>) -> u8 {
    match res {
        Ok(_) => EXIT_OK,
        Err(QueryError::Unresolved(_)) => EXIT_UNRESOLVED,
        Err(QueryError::Engine(_)) => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use semgate_gateway::engine::EngineError;

    use super::*;

    #[test]
    fn exit_status_per_outcome() {
        assert_eq!(exit_status(&Ok(QueryResult::default())), EXIT_OK);

        let mut unresolved = BTreeMap::new();
        unresolved.insert("id".to_string(), vec!["a__id".to_string(), "c__id".to_string()]);
        assert_eq!(exit_status(&Err(QueryError::Unresolved(unresolved))), EXIT_UNRESOLVED);

        let down = QueryError::Engine(EngineError::Connectivity("connection refused".into()));
        assert_eq!(exit_status(&Err(down)), EXIT_FAILURE);

        let failed = QueryError::Engine(EngineError::Failed("unknown metric: nope".into()));
        assert_eq!(exit_status(&Err(failed)), EXIT_FAILURE);
    }
}

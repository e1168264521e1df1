//! Wires command line, configuration, client and dump runner together.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use dhubdump_core::api::{
    acquire_token, parse_requests, AppConfig, CliError, DatahubClient, DumpRequest, DumpRunner,
    ExecutionOpts, ExecutionResult,
};
use dhubdump_plugins::factory::build_client;

use crate::commands::cli::Args;

/// Folds the command line into the loaded configuration. Flags win.
pub fn apply_args(cfg: &mut AppConfig, args: &Args) {
    cfg.api.secret = Some(args.secret.clone());
    if let Some(id) = &args.client_id {
        cfg.api.client_id = Some(id.clone());
    }
    if let Some(ms) = args.time_between {
        cfg.dump.time_between_ms = ms;
    }
    if args.verbose {
        cfg.api.verbose = true;
        cfg.logging.level = "debug".to_string();
    }
}

pub fn output_root(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[tracing::instrument(name = "cli.run_app", skip(args, cfg))]
pub async fn run_app(args: Args, cfg: AppConfig) -> Result<i32, CliError> {
    let requests = parse_requests(&args.specs)?;
    let client = build_client(&cfg.api).map_err(|e| CliError::Config(e.to_string()))?;

    if requests.contains(&DumpRequest::Token) {
        let token = acquire_token(client.as_ref()).await?;
        println!("{token}");
        return Ok(0);
    }

    let opts = ExecutionOpts::new(output_root(&args.output))
        .with_time_between(Duration::from_millis(cfg.dump.time_between_ms))
        .with_progress_bar(args.progress);
    let result = run_dump(client, &cfg, &requests, opts).await?;
    print_summary(&result);
    Ok(0)
}

async fn run_dump(
    client: Arc<dyn DatahubClient>,
    cfg: &AppConfig,
    requests: &[DumpRequest],
    opts: ExecutionOpts,
) -> Result<ExecutionResult, CliError> {
    let result = DumpRunner::new(client)
        .run(&cfg.dump, requests, opts, Utc::now())
        .await?;
    Ok(result)
}

fn print_summary(result: &ExecutionResult) {
    eprintln!(
        "dump {} finished: {} tasks, {} files, {} failed, {:.1}s{}",
        result.run_id,
        result.total_tasks,
        result.completed - result.failed,
        result.failed,
        result.duration_ms as f64 / 1000.0,
        if result.report_written {
            ""
        } else {
            " (report not written)"
        }
    );
}

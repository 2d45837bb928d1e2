//! signup-form - submit registration payloads from the command line

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Cmd};
use signup_form::config::{FormConfig, SinkKind};
use signup_form::{FormController, FormPolicy, FormValues, LocalStore, RemoteSink, SubmissionSink};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signup_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Cli::parse();
    let config = FormConfig::load()?;

    let result = match args.into_cmd() {
        Cmd::Submit { payload } => submit(&config, payload).await,
        Cmd::List => list(&config).await,
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:?}");
            std::process::exit(1);
        }
    }
}

fn local_store(config: &FormConfig) -> Result<LocalStore> {
    let path = config
        .storage_path
        .clone()
        .or_else(LocalStore::default_path)
        .ok_or_else(|| anyhow!("no data directory available for the local store"))?;
    Ok(LocalStore::new(path))
}

fn remote_sink(config: &FormConfig) -> Result<RemoteSink> {
    RemoteSink::new(&config.endpoint(), config.timeout()).context("Failed to build HTTP client")
}

fn read_payload(source: Option<PathBuf>) -> Result<FormValues> {
    let content = match source {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let payload: serde_json::Value =
        serde_json::from_str(&content).context("Payload is not valid JSON")?;
    Ok(FormValues::from_json(&payload)?)
}

async fn submit(config: &FormConfig, source: Option<PathBuf>) -> Result<bool> {
    let values = read_payload(source)?;
    let policy = config.policy();

    match config.sink_kind() {
        SinkKind::Local => submit_with(local_store(config)?, policy, values).await,
        SinkKind::Remote => submit_with(remote_sink(config)?, policy, values).await,
    }
}

async fn submit_with<S: SubmissionSink>(
    sink: S,
    policy: FormPolicy,
    values: FormValues,
) -> Result<bool> {
    let mut controller = FormController::with_policy(sink, policy);
    let outcome = controller.submit_values(values).await;
    println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    Ok(outcome.is_ok())
}

async fn list(config: &FormConfig) -> Result<bool> {
    let records = match config.sink_kind() {
        SinkKind::Local => local_store(config)?.load().await?,
        SinkKind::Remote => remote_sink(config)?.load().await?,
    };
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(true)
}

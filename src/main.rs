//! llm-router - route one generation request through the configured providers
//!
//! Loads `config/router.yaml` (or `--config`), sends the prompt through the
//! fallback chain and prints the normalized response as JSON.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use llm_router::utils::logging::init_tracing;
use llm_router::{Config, GenerationRequest, Router};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "llm-router", version, about = "Route a prompt through prioritized LLM providers")]
struct Cli {
    /// Router configuration file
    #[arg(short, long, env = "LLM_ROUTER_CONFIG", default_value = "config/router.yaml")]
    config: PathBuf,

    /// Only try this provider id
    #[arg(short, long)]
    provider: Option<String>,

    /// Pin the model
    #[arg(short, long)]
    model: Option<String>,

    #[arg(long)]
    system: Option<String>,

    #[arg(long)]
    max_tokens: Option<u32>,

    #[arg(long)]
    temperature: Option<f32>,

    /// Skip providers whose estimated cost exceeds this many cents
    #[arg(long)]
    max_cost_cents: Option<u64>,

    /// JSON Schema file the response must satisfy
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Probe every provider and print their health instead of generating
    #[arg(long)]
    health: bool,

    /// Prompt text
    #[arg(required_unless_present = "health")]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_file(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config.logging)?;

    let router = Router::from_config(&config)?;
    info!(providers = ?router.registry().ids(), "router ready");

    if cli.health {
        let health = router.health_check().await;
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let request = build_request(&cli).await?;
    let response = router.generate(request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn build_request(cli: &Cli) -> anyhow::Result<GenerationRequest> {
    let prompt = cli.prompt.clone().unwrap_or_default();
    let mut request = GenerationRequest::prompt(prompt);
    request.provider = cli.provider.clone();
    request.model = cli.model.clone();
    request.system_prompt = cli.system.clone();
    request.max_tokens = cli.max_tokens;
    request.temperature = cli.temperature;
    request.max_cost_cents = cli.max_cost_cents;

    if let Some(path) = &cli.schema {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading schema {}", path.display()))?;
        let schema: serde_json::Value =
            serde_json::from_str(&raw).with_context(|| format!("parsing schema {}", path.display()))?;
        request.schema = Some(schema);
    }

    Ok(request)
}

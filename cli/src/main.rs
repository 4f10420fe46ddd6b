//! CLI entrypoint for ijma
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use ijma_application::ports::retrieval::PassageRetriever;
use ijma_application::{RunEnhancementInput, RunEnhancementUseCase};
use ijma_domain::{StandardId, TriggerScenario};
use ijma_infrastructure::{
    ConfigLoader, FileCorpusRetriever, OpenAiChatGateway, RetryingGateway, panel_from_names,
};
use ijma_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting ijma");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    // CLI flags override file configuration
    let mut params = config.deliberation.to_params();
    if let Some(max_rounds) = cli.max_rounds {
        params = params.with_max_rounds(max_rounds);
    }
    if let Some(threshold) = cli.threshold {
        params = params.with_consensus_threshold(threshold);
    }

    // === Dependency Injection ===
    // Gateway with retry on transient failures
    let api_key = std::env::var(&config.gateway.api_key_env).ok();
    let gateway = Arc::new(OpenAiChatGateway::new(
        &config.gateway.base_url,
        &config.gateway.model,
        api_key,
    ));
    let gateway = Arc::new(RetryingGateway::new(gateway, config.gateway.max_retries));

    // Passage retriever over the standards corpus, if one is configured
    let corpus_dir = cli.corpus.clone().or(config.retrieval.corpus_dir.clone());
    let retriever: Arc<dyn PassageRetriever> = match &corpus_dir {
        Some(dir) => Arc::new(FileCorpusRetriever::from_dir(dir)?),
        None => Arc::new(FileCorpusRetriever::empty()),
    };

    // Expert panel
    let enabled = if cli.expert.is_empty() {
        &config.experts.enabled
    } else {
        &cli.expert
    };
    let experts = panel_from_names(&gateway, enabled);
    if experts.is_empty() {
        bail!("No known expert domains in {:?}", enabled);
    }

    // Build input
    let Some(standard_id) = StandardId::try_new(&*cli.standard) else {
        bail!("Standard id cannot be empty");
    };
    let Some(scenario) = TriggerScenario::try_new(&*cli.scenario) else {
        bail!("Trigger scenario cannot be empty");
    };
    let mut input = RunEnhancementInput::new(standard_id, scenario)
        .with_params(params)
        .with_review_passages(config.retrieval.top_k);
    if cli.cross_impact {
        input = input.with_cross_standard_analysis();
    }

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|          ijma - Standards Enhancement Orchestrator         |");
        println!("+============================================================+");
        println!();
        println!("Standard: FAS {}", cli.standard);
        println!("Scenario: {}", cli.scenario);
        println!(
            "Experts:  {}",
            experts
                .iter()
                .map(|e| e.name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    // Create use case with injected collaborators
    let use_case = RunEnhancementUseCase::new(gateway, retriever, experts);

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Proposal => ConsoleFormatter::format_proposal_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    if !result.is_completed() {
        std::process::exit(1);
    }

    Ok(())
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for enhancement results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with all phases
    Full,
    /// Only the final proposal text
    Proposal,
    /// JSON output
    Json,
}

/// CLI arguments for ijma
#[derive(Parser, Debug)]
#[command(name = "ijma")]
#[command(author, version, about = "Multi-expert enhancement of Islamic finance standards")]
#[command(long_about = r#"
Ijma orchestrates a panel of domain experts to enhance a financial standard
against a trigger scenario.

The process runs in phases:
1. Review: retrieve relevant standard passages and analyze the scenario
2. Proposal: draft an initial enhancement proposal
3. Deliberation: experts critique the proposal in rounds until consensus
4. Validation: check the final proposal for compliance and consistency
5. Cross-impact: optional analysis of effects on related standards

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./ijma.toml         Project-level config
3. ~/.config/ijma/config.toml   Global config

Example:
  ijma --standard 28 "Deferred payment murabaha executed via a digital platform"
  ijma --standard 17 --cross-impact --max-rounds 5 "Sukuk issued against leased assets"
"#)]
pub struct Cli {
    /// The trigger scenario motivating the enhancement
    pub scenario: String,

    /// Identifier of the standard to enhance
    #[arg(short, long, value_name = "ID")]
    pub standard: String,

    /// Maximum number of deliberation rounds
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Consensus threshold in [0.0, 1.0]
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Run the cross-standard impact analysis phase
    #[arg(long)]
    pub cross_impact: bool,

    /// Directory of standard texts to retrieve passages from
    #[arg(long, value_name = "DIR")]
    pub corpus: Option<PathBuf>,

    /// Expert domains to consult (can be specified multiple times)
    #[arg(short, long, value_name = "DOMAIN")]
    pub expert: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

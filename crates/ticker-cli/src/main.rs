//! Command-line interface for ticker-insight
//!
//! Every command goes through the same tool registry an agent would use.
//!
//! # Usage
//!
//! ```bash
//! export ALPHA_VANTAGE_API_KEY="your-key"
//!
//! ticker-insight ask "Why did Tesla stock drop today?"
//! ticker-insight change NVDA --timeframe 1week
//! ticker-insight --json call ticker_news '{"ticker": "PLTR"}'
//! ticker-insight repl
//! ```

mod render;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::process::ExitCode;
use ticker_insight::InsightConfig;
use ticker_insight::tools::tool_registry_from_config;
use ticker_tools::{ToolRegistry, ToolStatus, status_of};
use ticker_utils::LogFormat;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ticker-insight", version)]
#[command(about = "Ask about a stock in plain English", long_about = None)]
struct Cli {
    /// Print raw tool responses as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Identify the ticker a question is about
    Identify {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Current price
    Price { ticker: String },
    /// Price change over a timeframe
    Change {
        ticker: String,
        /// 1day, 1week or 1month
        #[arg(short, long, default_value = "1day")]
        timeframe: String,
    },
    /// Latest news with sentiment
    News { ticker: String },
    /// Combined price and news analysis
    Analyze { ticker: String },
    /// Identify the ticker in a question, then analyze it
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List the available tools
    Tools,
    /// Invoke a tool by name with JSON arguments
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Interactive session
    Repl,
}

impl Command {
    /// Tool name and arguments for commands that map onto a single tool
    fn tool_call(&self) -> Result<Option<(String, Value)>> {
        let call = match self {
            Self::Identify { query } => ("identify_ticker".to_string(), json!({ "query": query.join(" ") })),
            Self::Price { ticker } => ("ticker_price".to_string(), json!({ "ticker": ticker })),
            Self::Change { ticker, timeframe } => (
                "ticker_price_change".to_string(),
                json!({ "ticker": ticker, "timeframe": timeframe }),
            ),
            Self::News { ticker } => ("ticker_news".to_string(), json!({ "ticker": ticker })),
            Self::Analyze { ticker } => ("ticker_analysis".to_string(), json!({ "ticker": ticker })),
            Self::Call { tool, args } => {
                let params: Value = serde_json::from_str(args)
                    .with_context(|| format!("arguments for {tool} must be JSON"))?;
                (tool.clone(), params)
            }
            Self::Ask { .. } | Self::Tools | Self::Repl => return Ok(None),
        };
        Ok(Some(call))
    }
}

/// Resolve the ticker in `query` and analyze it
///
/// Returns the identification response when no ticker is found.
pub(crate) async fn ask(registry: &ToolRegistry, query: &str) -> Result<Value> {
    let identified = registry
        .execute("identify_ticker", json!({ "query": query }))
        .await?;

    if status_of(&identified) != Some(ToolStatus::Success) {
        return Ok(identified);
    }

    info!(ticker = %identified["ticker"], "identified ticker");
    Ok(registry
        .execute("ticker_analysis", json!({ "ticker": identified["ticker"] }))
        .await?)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = InsightConfig::from_env().context("invalid provider configuration")?;
    let registry = tool_registry_from_config(&config)?;

    let response = match &cli.command {
        Command::Tools => {
            println!("{}", render::tool_list(&registry.definitions(), cli.json)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Repl => {
            repl::run(&registry, cli.json).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Ask { query } => ask(&registry, &query.join(" ")).await?,
        command => match command.tool_call()? {
            Some((tool, params)) => {
                info!(%tool, "running tool");
                registry.execute(&tool, params).await?
            }
            None => return Ok(ExitCode::SUCCESS),
        },
    };

    let output = render::response(&response, cli.json)?;
    if status_of(&response) == Some(ToolStatus::Success) {
        println!("{output}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{output}");
        Ok(ExitCode::FAILURE)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    ticker_utils::init_tracing("warn,ticker_insight=info", format);

    run(cli).await
}

//! stocksage interactive shell
//!
//! Ask about stock prices and indicators in plain English.
//!
//! # Usage
//!
//! ```bash
//! # Put the key in ./api_key, or export it
//! export OPENAI_API_KEY="sk-..."
//!
//! cargo run --bin stocksage
//! ```

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stocksage::{Conversation, PriceChart, Reply, SageConfig, StockBot, YahooFinanceClient};
use stocksage_llm::providers::OpenAIProvider;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stocksage")]
#[command(about = "Ask about stock prices and indicators in natural language", long_about = None)]
struct Args {
    /// File holding the API key (defaults to ./api_key, then OPENAI_API_KEY)
    #[arg(long)]
    api_key_file: Option<PathBuf>,

    /// Chat model
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long)]
    api_base: Option<String>,

    /// Where plot requests write the chart image
    #[arg(long)]
    chart_path: Option<PathBuf>,

    /// Completion request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Print the message history after every turn
    #[arg(long)]
    show_history: bool,
}

fn print_banner(config: &SageConfig) {
    println!("stocksage");
    println!("  model: {}", config.model);
    println!("  api base: {}", config.api_base);
    println!();
    println!("Ask things like \"What's Apple's RSI?\" or \"plot MSFT\".");
    println!("/history prints the conversation, /exit quits.");
    println!();
}

fn load_config(args: &Args) -> stocksage::Result<SageConfig> {
    let mut builder = SageConfig::builder().with_env();

    if let Some(path) = &args.api_key_file {
        builder = builder.api_key_file(path);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }
    if let Some(base) = &args.api_base {
        builder = builder.api_base(base);
    }
    if let Some(path) = &args.chart_path {
        builder = builder.chart_path(path);
    }
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(temperature) = args.temperature {
        builder = builder.temperature(temperature);
    }

    builder.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocksage_utils::init_tracing_with_default("warn,stocksage=info");

    let args = Args::parse();
    let config = load_config(&args)?;

    print_banner(&config);

    let provider = Arc::new(OpenAIProvider::with_config(config.openai_config())?);
    let bot = StockBot::new(
        provider,
        Arc::new(YahooFinanceClient::new(config.lookback_days)),
        Arc::new(PriceChart::new(&config.chart_path)),
        &config,
    );
    info!(model = bot.model(), "Ready");

    let mut conversation = Conversation::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("your input: ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        }

        match input.trim() {
            "/exit" => break,
            "/history" => {
                println!("{}\n", conversation.to_pretty_json());
                continue;
            }
            _ => {}
        }

        match bot.handle_turn(&mut conversation, &input).await {
            Ok(Reply::Empty) => continue,
            Ok(reply) => println!("{reply}\n"),
            Err(e) => eprintln!("error: {e}\n"),
        }

        if args.show_history {
            println!("{}\n", conversation.to_pretty_json());
        }
    }

    Ok(())
}

//! Interactive terminal for finsight
//!
//! This binary is the "external collaborator" of the core: it owns the
//! session's selection state and turns user commands into engine calls.
//! Everything it prints comes back from the engine as a value or a display
//! string; nothing here can fail mid-session.

use anyhow::Context;
use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use finsight_core::{AnalysisKind, AnalysisResult, NewsBatch, NewsRecord};
use finsight_llm::{ApiKind, LlmConfig};
use finsight_news::{Analyst, FeedConfig};
use finsight_prompt::Language;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(about = "Browse live financial news and request AI analysis", version)]
struct Args {
    /// Prompt and message language (zh | en)
    #[arg(long, default_value = "zh")]
    lang: String,

    /// Model identifier sent to the provider (overrides FINSIGHT_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Cache TTL in seconds (overrides FINSIGHT_NEWS_TTL)
    #[arg(long)]
    ttl: Option<u64>,

    /// Endpoint flavor (chat | responses, overrides FINSIGHT_API_KIND)
    #[arg(long)]
    api_kind: Option<String>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut feed_config = FeedConfig::from_env().with_language(Language::from_code(&args.lang));
    if let Some(ttl) = args.ttl {
        feed_config = feed_config.with_cache_ttl(Duration::from_secs(ttl));
    }

    let mut llm_config = LlmConfig::from_env();
    if let Some(model) = args.model {
        llm_config = llm_config.with_model(model);
    }
    if let Some(kind) = &args.api_kind {
        llm_config = llm_config.with_api_kind(ApiKind::from_code(kind));
    }

    let analyst = Analyst::new(feed_config, llm_config).context("engine construction failed")?;
    tracing::debug!("analyst engine ready");

    let batch = analyst.news().await;
    print_batch(&batch);
    print_help();

    // Selection state lives here, not in the engine.
    let mut selected: usize = 0;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("list" | "l") => print_batch(&analyst.news().await),
            Some("refresh" | "r") => {
                println!("fetching a fresh batch...");
                print_batch(&analyst.refresh().await);
                selected = 0;
            }
            Some("show" | "s") => {
                let index = parts
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(selected);
                match analyst.select(index).await {
                    Some(record) => {
                        selected = index;
                        print_record(index, &record);
                    }
                    None => println!("no record at index {index}; try `list`"),
                }
            }
            Some("analyze" | "a") => {
                let first = parts.next();
                let second = parts.next();
                // `analyze 3 concept` or `analyze concept` (current selection)
                let (index, kind_str) = match (first.and_then(|n| n.parse::<usize>().ok()), second)
                {
                    (Some(index), Some(kind)) => (index, kind),
                    _ => (selected, first.unwrap_or("")),
                };
                match kind_str.parse::<AnalysisKind>() {
                    Ok(kind) => {
                        println!("analyzing record {index} ({kind})...");
                        let result = analyst.request_analysis(index, kind).await;
                        print_result(&result);
                        selected = index;
                    }
                    Err(_) => {
                        println!(
                            "unknown analysis kind; one of: {}",
                            kind_list()
                        );
                    }
                }
            }
            Some("history" | "h") => print_history(&analyst.history().await),
            Some("help" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some(other) => println!("unknown command '{other}'; try `help`"),
        }
        prompt()?;
    }

    println!("bye");
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    print!("finsight> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn kind_list() -> String {
    AnalysisKind::ALL
        .iter()
        .map(|k| k.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_help() {
    println!("commands:");
    println!("  list                 show the current news batch");
    println!("  show <n>             select a record and print its detail");
    println!("  analyze [n] <kind>   request analysis ({})", kind_list());
    println!("  refresh              bypass the cache and refetch");
    println!("  history              analyses from this session");
    println!("  quit                 leave");
}

fn print_batch(batch: &NewsBatch) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Date", "Time", "Title"]);
    for (index, record) in batch.records.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            record.published_date.clone(),
            record.published_time.clone(),
            record.title.clone(),
        ]);
    }
    println!("{table}");
    println!("source: {}", batch.source);
    if batch.is_degraded {
        println!("note: live sources unavailable, showing offline seed data");
    }
}

fn print_record(index: usize, record: &NewsRecord) {
    println!("[{index}] {}", record.title);
    println!(
        "    {} {}",
        record.published_date, record.published_time
    );
    if let Some(body) = &record.body {
        println!("    {body}");
    }
}

fn print_result(result: &AnalysisResult) {
    println!("--- {} | {} ---", result.kind, result.source_title);
    println!("{}", result.text);
    println!("---");
}

fn print_history(history: &[AnalysisResult]) {
    if history.is_empty() {
        println!("no analyses yet this session");
        return;
    }
    for (index, result) in history.iter().enumerate() {
        println!(
            "{index}. [{}] {} ({})",
            result.kind,
            result.source_title,
            result.timestamp.format("%H:%M:%S")
        );
    }
}

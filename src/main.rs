//! pdfsumma CLI - LLM-powered PDF summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use dialoguer::Select;
use pdfsumma::export::{ExportFormat, ReportHeader};
use pdfsumma::stats::{format_elapsed, format_file_size, TextProfile};
use pdfsumma::{
    export, logging, Client, Config, Document, Error, Generator, Length, Statistics,
    StrategyKind, Summarizer, SummaryRequest,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Characters of extracted text shown before summarising
const PREVIEW_CHARS: usize = 2000;

#[derive(Parser)]
#[command(name = "pdfsumma")]
#[command(author, version, about = "Summarise PDF documents with an LLM", long_about = None)]
struct Cli {
    /// Path to a pdfsumma.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a PDF file
    Summarise {
        /// PDF file to summarise
        pdf: PathBuf,
        /// Summary style (prompted for when omitted on a terminal)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyKind>,
        /// Summary length, used by extractive and abstractive summaries
        #[arg(short, long, value_enum, default_value_t = Length::Medium)]
        length: Length,
        /// Model to use (must be in the configured model list)
        #[arg(short, long)]
        model: Option<String>,
        /// Instructions for the custom strategy
        #[arg(long)]
        instructions: Option<String>,
        /// Write a report to this file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format (defaults to the --output extension, then txt)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Show extracted text and its profile instead of summarising
        #[arg(long)]
        raw: bool,
        /// Do not print summary statistics
        #[arg(long)]
        no_stats: bool,
    },
    /// List available models
    Models {
        /// Also check that the provider is reachable
        #[arg(long)]
        check: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Summarise {
            pdf,
            strategy,
            length,
            model,
            instructions,
            output,
            format,
            raw,
            no_stats,
        } => {
            if raw {
                let document = extract(&pdf)?;
                print_raw(&document);
                return Ok(());
            }

            let config = load_config(cli.config.as_deref())?;
            config.validate().map_err(Error::from)?;
            let client = Client::from_config(&config).map_err(Error::from)?;

            let document = extract(&pdf)?;
            print_document_info(&pdf, &document);

            let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
            let kind = match strategy {
                Some(kind) => kind,
                None if interactive => pick_strategy()?,
                None => StrategyKind::Extractive,
            };
            let instructions = match (kind, instructions) {
                (StrategyKind::Custom, None) if interactive => Some(edit_instructions()?),
                (_, instructions) => instructions,
            };
            let Some(strategy) = kind.into_strategy(instructions) else {
                bail!("the custom strategy needs --instructions");
            };

            let model = match model {
                Some(model) => model,
                None if interactive => pick_model(&config)?,
                None => config.default_model().map_err(Error::from)?.to_string(),
            };
            config.check_model(&model).map_err(Error::from)?;

            let request = SummaryRequest::new(strategy, length, model);
            println!(
                "Sending to {} ({}, {})...\n",
                request.model.cyan(),
                request.strategy.label(),
                request.length
            );

            let started = Instant::now();
            let result = Summarizer::with_config(&client, &config)
                .run(document.text(), &request)
                .await?;
            let elapsed = started.elapsed().as_secs_f64();
            let generated_at = chrono::Local::now();

            println!(
                "{}",
                format!("✅ Summary generated in {}", format_elapsed(elapsed)).green()
            );

            if !no_stats {
                print_statistics(&result.statistics(document.text()));
            }

            println!("\n{}", format!("=== {} ===", result.strategy.label()).bold());
            println!("{}\n", result.text);

            if let Some(output) = output {
                let format = ExportFormat::resolve(format, &output);
                let path = export::output_path(&output, &generated_at, format);
                let source = pdf
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| pdf.display().to_string());
                let header = ReportHeader {
                    source_filename: &source,
                    strategy_label: result.strategy.label(),
                    model: &result.model,
                };
                let bytes = export::render_as(format, &result.text, &header, &generated_at)?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("💾 Saved to {}", path.display());
            }

            println!(
                "{}",
                format!(
                    "🤖 Generated using {} | 📅 {}",
                    result.model,
                    generated_at.format("%B %d, %Y at %I:%M %p")
                )
                .dimmed()
            );
        }
        Commands::Models { check } => {
            let config = load_config(cli.config.as_deref())?;
            let default = config.default_model().map_err(Error::from)?.to_string();

            println!("Models for {}:\n", config.agent.provider.to_string().bold());
            for model in &config.agent.models {
                if *model == default {
                    println!("  • {} {}", model, "(default)".dimmed());
                } else {
                    println!("  • {}", model);
                }
            }

            if check {
                let client = Client::from_config(&config).map_err(Error::from)?;
                if client.check_connection().await {
                    println!("\n{}", format!("✅ {} reachable", config.agent.provider).green());
                } else {
                    bail!("{} API is not reachable, check your API key", config.agent.provider);
                }
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pdfsumma", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load config; failures here end the session
fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    Ok(Config::load(path)?)
}

fn extract(pdf: &Path) -> Result<Document, Error> {
    println!("📖 Extracting text from {}...", pdf.display());
    Ok(Document::from_path(pdf)?)
}

fn print_raw(document: &Document) {
    println!("{}", document.text());
    print_profile(&document.profile());
    println!("📑 Pages: {}", document.page_count());
}

fn print_document_info(pdf: &Path, document: &Document) {
    let name = pdf
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = std::fs::metadata(pdf)
        .map(|meta| format!("  💾 {}", format_file_size(meta.len())))
        .unwrap_or_default();
    println!(
        "📄 {}  📑 {} pages{}",
        export::truncate_filename(&name, 40).bold(),
        document.page_count(),
        size
    );
    let preview = document.preview(PREVIEW_CHARS);
    let ellipsis = if preview.len() < document.text().len() { "..." } else { "" };
    println!("\n{}{}\n", preview.trim_end().dimmed(), ellipsis);
    print_profile(&document.profile());
    println!();
}

fn print_profile(profile: &TextProfile) {
    println!(
        "📊 {} words · {} characters · {} sentences · {} paragraphs · {} read",
        profile.words,
        profile.chars,
        profile.sentences,
        profile.paragraphs,
        profile.reading_time()
    );
}

fn print_statistics(stats: &Statistics) {
    println!("\n📊 Summary Statistics:");
    println!("  Original words: {}", stats.original_words);
    println!("  Summary words:  {}", stats.summary_words);
    println!("  Compression:    {:.1}%", stats.compression_ratio);
    println!("  Words removed:  {}", stats.reduction_words);
}

fn pick_strategy() -> anyhow::Result<StrategyKind> {
    let labels: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.label()).collect();
    let index = Select::new()
        .with_prompt("Summarization type")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(StrategyKind::ALL[index])
}

fn pick_model(config: &Config) -> anyhow::Result<String> {
    let default = config.default_model().map_err(Error::from)?;
    let models = &config.agent.models;
    let index = Select::new()
        .with_prompt("Model")
        .items(models)
        .default(models.iter().position(|m| m == default).unwrap_or(0))
        .interact()?;
    Ok(models[index].clone())
}

/// Open $EDITOR for custom instructions, dropping `#` comment lines
fn edit_instructions() -> anyhow::Result<String> {
    let template = "# Write your summarization instructions below.\n\
                    # Lines starting with '#' are ignored.\n";
    let edited = edit::edit(template)?;
    let instructions = edited
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(instructions.trim().to_string())
}

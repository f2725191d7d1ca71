//! SNA CLI - Command-line interface
//!
//! Usage:
//!   sna analyze [TEXT] [--file PATH]
//!   sna ask --question Q [TEXT] [--file PATH]
//!   sna check
//!
//! Author: hephaex@gmail.com

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sna_analysis::build_service;
use sna_classifier::TextClassifier;
use sna_core::{telemetry::init_tracing, AnalysisReport, AppConfig, SnaError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sna")]
#[command(about = "Smart News Analyze CLI")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "SNA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify, summarize and extract entities from an article
    Analyze {
        #[command(flatten)]
        input: ArticleInput,
    },
    /// Ask a question about an article
    Ask {
        /// Question about the article
        #[arg(short, long)]
        question: String,
        #[command(flatten)]
        input: ArticleInput,
    },
    /// Load both classifier artifacts and report their shape
    Check,
}

#[derive(Args)]
struct ArticleInput {
    /// Article text
    text: Option<String>,
    /// Read the article from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl ArticleInput {
    fn read(&self) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (_, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            (Some(text), None) => Ok(text.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Invalid configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Analyze { input } => {
            let text = input.read()?;
            tracing::debug!(chars = text.len(), "Running analyze");
            let service = build_service(&config).context("Model files not found or unreadable")?;

            match service.analyze(&text).await {
                Ok(report) => print!("{}", render_report(&report)),
                Err(SnaError::EmptyInput(field)) => {
                    tracing::warn!(?field, "Blank input");
                    eprintln!("{}", field.warning());
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Ask { question, input } => {
            let text = input.read()?;
            tracing::debug!(chars = text.len(), question = %question, "Running ask");
            let service = build_service(&config).context("Model files not found or unreadable")?;

            match service.get_answer(&text, &question).await {
                Ok(answer) => println!("{answer}"),
                Err(SnaError::EmptyInput(field)) => {
                    tracing::warn!(?field, "Blank input");
                    eprintln!("{}", field.warning());
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Check => {
            let models = &config.models;
            let classifier = TextClassifier::load(&models.vectorizer_path, &models.classifier_path)
                .context("Model files not found or unreadable")?;

            tracing::info!("Artifacts are consistent");
            println!("Vectorizer: {}", models.vectorizer_path.display());
            println!("Classifier: {}", models.classifier_path.display());
            println!("Vocabulary size: {}", classifier.vectorizer().n_features());
            println!("Classes: {}", classifier.classifier().classes().len());
        }
    }

    Ok(())
}

/// Same sections as the web page, as plain text
fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("## Classification\n");
    out.push_str(&format!("{}\n", report.classification));

    if let Some(summary) = &report.summary {
        out.push_str("\n## Summarization\n");
        out.push_str(&format!("{}\n", summary.text));
    }

    out.push_str("\n## Named Entity Recognition (NER)\n");
    for entity in &report.entities {
        out.push_str(&format!("{entity}\n"));
    }

    out
}

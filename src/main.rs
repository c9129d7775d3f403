use anyhow::{Context as _, Result};
use clap::Parser;
use nullability_annotations::app::config::AnalysisConfig;
use nullability_annotations::app::engine::AnalysisEngine;
use nullability_annotations::cli::{self, Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries results only; logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let engine = AnalysisEngine::load_from_json(&cli.semantic_json, config).with_context(|| {
        format!("Failed to load semantic data: {}", cli.semantic_json.display())
    })?;

    match cli.command {
        Commands::Analyze { format, matching } => cli::run_analyze(&engine, format, matching),
        Commands::Fixes { diagnostic_id } => cli::list_fixes(&engine, &diagnostic_id),
        Commands::Fix {
            diagnostic_id,
            annotation,
            write,
        } => cli::apply_fix(&engine, &diagnostic_id, annotation, write),
        Commands::FixAll {
            file,
            annotation,
            write,
        } => cli::apply_fix_all(&engine, &file, annotation, write),
        Commands::Graph => cli::dump_graph(&engine),
    }
}

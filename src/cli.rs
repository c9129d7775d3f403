use crate::app::dto::{AnalyzeRequest, FixResponse};
use crate::app::engine::AnalysisEngine;
use crate::domain::annotation::AnnotationKind;
use crate::domain::policy::MatchingKind;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// nnlint: nullability annotation checker over exported compiler symbol data
#[derive(Parser, Debug)]
#[command(name = "nnlint")]
#[command(about = "Flag reference-typed members lacking [NotNull]/[CanBeNull] and insert the annotation")]
#[command(version)]
pub struct Cli {
    /// Analysis configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Semantic data JSON exported by the host compiler
    pub semantic_json: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report members missing a nullability annotation
    Analyze {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Parameter matching across hierarchy levels (overrides the config file)
        #[arg(long, value_enum)]
        matching: Option<MatchingArg>,
    },
    /// List the code actions offered for a diagnostic
    Fixes {
        /// Diagnostic ID (e.g., "MethodReturnAttribute-src/Foo.cs:12:19")
        diagnostic_id: String,
    },
    /// Apply one code action
    Fix {
        diagnostic_id: String,
        #[arg(long, value_enum)]
        annotation: AnnotationArg,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Annotate every diagnostic in one file
    FixAll {
        /// File path relative to the project root, as reported in diagnostics
        file: String,
        #[arg(long, value_enum)]
        annotation: AnnotationArg,
        #[arg(long)]
        write: bool,
    },
    /// Dump the hierarchy graph as JSON
    Graph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchingArg {
    Positional,
    ByName,
}

impl From<MatchingArg> for MatchingKind {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Positional => MatchingKind::Positional,
            MatchingArg::ByName => MatchingKind::ByName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnnotationArg {
    NotNull,
    CanBeNull,
}

impl From<AnnotationArg> for AnnotationKind {
    fn from(arg: AnnotationArg) -> Self {
        match arg {
            AnnotationArg::NotNull => AnnotationKind::NotNull,
            AnnotationArg::CanBeNull => AnnotationKind::CanBeNull,
        }
    }
}

pub fn run_analyze(
    engine: &AnalysisEngine,
    format: OutputFormat,
    matching: Option<MatchingArg>,
) -> Result<()> {
    let response = engine.analyze(
        AnalyzeRequest {
            parameter_matching: matching.map(Into::into),
        },
        &CancellationToken::new(),
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => {
            for diagnostic in &response.diagnostics {
                println!("{}", diagnostic);
            }
            eprintln!(
                "{} diagnostic(s) in {} member(s)",
                response.diagnostics.len(),
                response.analyzed_members
            );
        }
    }
    Ok(())
}

pub fn list_fixes(engine: &AnalysisEngine, diagnostic_id: &str) -> Result<()> {
    let response = engine.fixes(diagnostic_id)?;
    println!("{}", response.diagnostic);
    for (i, fix) in response.fixes.iter().enumerate() {
        println!("{}. {}", i + 1, fix.title);
    }
    Ok(())
}

pub fn apply_fix(
    engine: &AnalysisEngine,
    diagnostic_id: &str,
    annotation: AnnotationArg,
    write: bool,
) -> Result<()> {
    let response = engine.apply_fix(diagnostic_id, annotation.into())?;
    emit_fix(engine, &response, write)
}

pub fn apply_fix_all(
    engine: &AnalysisEngine,
    file: &str,
    annotation: AnnotationArg,
    write: bool,
) -> Result<()> {
    let response = engine.fix_all(file, annotation.into())?;
    emit_fix(engine, &response, write)
}

pub fn dump_graph(engine: &AnalysisEngine) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&engine.graph_summary())?);
    Ok(())
}

fn emit_fix(engine: &AnalysisEngine, response: &FixResponse, write: bool) -> Result<()> {
    if write {
        let path = engine.write_fix(response)?;
        eprintln!("Applied {} edit(s) to {}", response.edits.len(), path.display());
    } else {
        print!("{}", response.fixed_source);
    }
    Ok(())
}

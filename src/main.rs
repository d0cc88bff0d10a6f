//! Coverage CLI entrypoint.
//!
//! `coverage <input.json>` analyses one document and prints a coverage report as JSON.

use std::path::PathBuf;

use anyhow::Context;
use mimalloc::MiMalloc;

use coverage::{AnalysisInput, Analyzer, Config};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: coverage <input.json>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context(USAGE)?;

    let config = Config::from_env()?;
    let input = AnalysisInput::from_path(&path)?;

    tracing::info!(
        path = %path.display(),
        chunks = input.request.chunks.len(),
        queries = input.request.queries.len(),
        local = input.embeddings.is_some(),
        backend_url = %config.backend_url,
        "Analysing document"
    );

    let analyzer = Analyzer::new(&config)?;
    let report = analyzer.analyze(&input).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(
        coverage_percent = report.summary.coverage_percent,
        gaps = report.summary.gaps,
        "Analysis complete"
    );
    Ok(())
}

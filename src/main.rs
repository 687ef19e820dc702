//! sembed CLI: rank the lines of a corpus file against a query.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use serde::Serialize;

use sembed::{Config, Embedding, EmbeddingService};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: sembed [--info] <corpus-file> <query...>";

#[derive(Debug, Serialize)]
struct RankedLine<'a> {
    rank: usize,
    index: usize,
    score: f64,
    text: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let service = EmbeddingService::load(&config)?.into_shared();

    let mut args = std::env::args().skip(1).peekable();
    if args.peek().is_some_and(|arg| arg == "--info") {
        println!("{}", service.model_info());
        return Ok(());
    }

    let Some(corpus_path) = args.next() else {
        bail!(USAGE);
    };
    let query = args.collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        bail!(USAGE);
    }

    let corpus = tokio::fs::read_to_string(&corpus_path)
        .await
        .with_context(|| format!("failed to read corpus file {}", corpus_path))?;
    let lines: Vec<&str> = corpus
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    tracing::info!(
        corpus = %corpus_path,
        lines = lines.len(),
        optimization_threshold = service.optimization_threshold(),
        "Encoding corpus"
    );

    let started = Instant::now();
    let embeddings = encode_corpus(&service, &lines, config.language.clone()).await?;
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Corpus encoded"
    );

    let results = service.search(
        &query,
        &embeddings,
        config.min_similarity,
        config.language.as_deref(),
    )?;

    let ranked: Vec<RankedLine<'_>> = results
        .iter()
        .enumerate()
        .map(|(rank, result)| RankedLine {
            rank: rank + 1,
            index: result.index,
            score: result.score,
            text: lines[result.index],
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

/// Encodes each line on the blocking pool; results keep corpus order.
async fn encode_corpus(
    service: &Arc<EmbeddingService>,
    lines: &[&str],
    language: Option<String>,
) -> anyhow::Result<Vec<Embedding>> {
    let handles: Vec<_> = lines
        .iter()
        .map(|line| {
            let service = Arc::clone(service);
            let line = line.to_string();
            let language = language.clone();
            tokio::task::spawn_blocking(move || service.encode(&line, language.as_deref()))
        })
        .collect();

    let mut embeddings = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        let embedding = handle
            .await
            .context("encoder task panicked")?
            .with_context(|| format!("failed to encode corpus line {}", index + 1))?;
        embeddings.push(embedding);
    }

    Ok(embeddings)
}

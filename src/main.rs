//! Dependency Graph - Command Line Driver
//!
//! Reads text (or CoNLL-U with `DEPGRAPH_MODEL=conllu`) from a file or stdin
//! and prints every unit with its dependents as JSON. `DEPGRAPH_NORMALIZE`
//! applies to raw text only and is rejected together with CoNLL-U.

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depgraph::{BuilderConfig, Dependent, Document, DocumentBuilder};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "depgraph=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = BuilderConfig::from_env();

    info!("Starting depgraph v{}", env!("CARGO_PKG_VERSION"));
    info!(model = %config.model, granularity = %config.granularity, "Loading parser");

    let builder = DocumentBuilder::from_config(&config)?;

    let text = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };

    let document = builder.build_default(&text)?;
    println!("{}", serde_json::to_string_pretty(&render(&document)?)?);

    Ok(())
}

/// Render each sentence's units with their resolved dependents.
fn render(document: &Document) -> Result<Value> {
    let mut sentences = Vec::with_capacity(document.len());

    for sentence in document.sentences() {
        let mut units = Vec::with_capacity(sentence.len());
        for unit in sentence.units() {
            let dependents = sentence.resolve_dependents(unit)?;
            units.push(json!({
                "position": unit.position(),
                "text": unit.text(),
                "left": side(&dependents.left),
                "right": side(&dependents.right),
            }));
        }
        sentences.push(json!({
            "position": sentence.position(),
            "text": sentence.text(),
            "units": units,
        }));
    }

    Ok(json!({
        "id": document.id,
        "model": document.model,
        "granularity": document.granularity,
        "created_at": document.created_at,
        "sentences": sentences,
    }))
}

fn side(deps: &[Dependent<'_>]) -> Vec<Value> {
    deps.iter()
        .map(|d| {
            json!({
                "position": d.unit.position(),
                "text": d.unit.text(),
                "label": d.label,
            })
        })
        .collect()
}

// Copyright (C) 2026 Microcosm Labs
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use config::{Args, TtmConfig};
use ton_trace_mermaid::diagram::{RenderOptions, render_mermaid};
use ton_trace_mermaid::{input, logging};

fn main() -> Result<()> {
    let args = Args::parse_args();
    if dotenv::from_filename(&args.env_file).is_err() && args.env_file != ".env" {
        eprintln!("Warning: could not load env file '{}'", args.env_file);
    }

    let config = TtmConfig::from_env()?;
    logging::init(&config.log.level, config.log.json, config.log.strip_ansi)?;

    let trace = input::load_trace(&args.trace)?;
    let registry = match &args.registry {
        Some(path) => input::load_registry(path)?,
        None => Default::default(),
    };
    let names = match &args.names {
        Some(path) => input::load_names(path)?,
        None => Default::default(),
    };

    let mut options = RenderOptions::from_config(&config.render);
    if args.full_addresses {
        options.short_addresses = false;
    }

    tracing::info!(
        transactions = trace.transactions.len(),
        short_addresses = options.short_addresses,
        "Rendering trace"
    );
    let diagram = render_mermaid(&trace, &names, &registry, &options);

    match &args.output {
        Some(path) => std::fs::write(path, &diagram)
            .with_context(|| format!("Failed to write diagram to {}", path.display()))?,
        None => print!("{diagram}"),
    }

    Ok(())
}

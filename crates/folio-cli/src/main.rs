// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — themed document factory
//
// Entry point. Initialises logging, loads the factory configuration, and runs
// the requested inspection or preview command.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::FactoryConfig;
use folio_document::{DocumentFactory, HtmlPreviewEngineFactory, JinjaTemplateFactory};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let config = FactoryConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!(themes = config.themes.len(), "Folio starting");

    let factory = DocumentFactory::from_config(
        &config,
        HtmlPreviewEngineFactory::new(),
        JinjaTemplateFactory::new(),
    )
    .context("Invalid theme configuration")?;

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Commands::Themes => commands::themes(&factory, &mut stdout),
        Commands::Resolve(args) => commands::resolve(&factory, args, &mut stdout),
        Commands::Assets(args) => commands::assets(&factory, args, &mut stdout),
        Commands::Preview(args) => commands::preview(&factory, args, &mut stdout),
    }
}

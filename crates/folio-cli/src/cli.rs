// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Factory configuration file (JSON)
    #[arg(short, long, global = true, env = "FOLIO_CONFIG", default_value = "folio.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists registered themes
    Themes,
    /// Prints the resolved render options for a theme
    Resolve(ResolveArgs),
    /// Prints where a theme's template and stylesheet are found
    Assets(AssetsArgs),
    /// Renders a theme to a standalone HTML preview
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    pub theme: String,
    /// Per-call option overrides as JSON, e.g. '{"imageDpi": 300}'
    #[arg(long = "set", value_name = "JSON")]
    pub overrides: Option<String>,
}

#[derive(Args, Debug)]
pub struct AssetsArgs {
    pub theme: String,
    /// Template variant (defaults to the configured default variant)
    #[arg(long)]
    pub variant: Option<String>,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    pub theme: String,
    #[arg(long)]
    pub variant: Option<String>,
    /// JSON file with template parameters
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
    /// Per-call option overrides as JSON
    #[arg(long = "set", value_name = "JSON")]
    pub overrides: Option<String>,
    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preview() {
        let cli = Cli::try_parse_from([
            "folio",
            "--config",
            "themes.json",
            "preview",
            "invoice",
            "--variant",
            "summary",
            "--set",
            r#"{"imageDpi": 300}"#,
            "-o",
            "out.html",
        ])
        .expect("valid arguments");

        assert_eq!(cli.config, PathBuf::from("themes.json"));
        match cli.command {
            Commands::Preview(args) => {
                assert_eq!(args.theme, "invoice");
                assert_eq!(args.variant.as_deref(), Some("summary"));
                assert_eq!(args.overrides.as_deref(), Some(r#"{"imageDpi": 300}"#));
                assert_eq!(args.output, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn resolve_requires_theme() {
        assert!(Cli::try_parse_from(["folio", "resolve"]).is_err());
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations. Each writes its report to `out`.

use std::io::Write;

use anyhow::{Context, Result};
use folio_core::OptionsOverride;
use folio_document::{DocumentFactory, HtmlPreviewEngineFactory, JinjaTemplateFactory};

use crate::cli::{AssetsArgs, PreviewArgs, ResolveArgs};

pub type PreviewFactory = DocumentFactory<HtmlPreviewEngineFactory, JinjaTemplateFactory>;

fn parse_overrides(json: Option<&str>) -> Result<OptionsOverride> {
    match json {
        Some(json) => OptionsOverride::from_json_str(json).with_context(|| "Invalid --set options"),
        None => Ok(OptionsOverride::default()),
    }
}

pub fn themes<W: Write>(factory: &PreviewFactory, out: &mut W) -> Result<()> {
    let registry = factory.registry();
    if registry.is_empty() {
        writeln!(out, "No themes configured.")?;
        return Ok(());
    }
    for name in registry.names() {
        let options = registry.resolve(name)?;
        writeln!(
            out,
            "{name}\t{}\t{} dpi\t{}",
            options.page_size, options.image_dpi, options.encoding
        )?;
    }
    Ok(())
}

pub fn resolve<W: Write>(factory: &PreviewFactory, args: &ResolveArgs, out: &mut W) -> Result<()> {
    let overrides = parse_overrides(args.overrides.as_deref())?;
    let options = factory.render_options(&args.theme, &overrides)?;
    serde_json::to_writer_pretty(&mut *out, &options)?;
    writeln!(out)?;
    Ok(())
}

pub fn assets<W: Write>(factory: &PreviewFactory, args: &AssetsArgs, out: &mut W) -> Result<()> {
    // surface unknown themes the same way document creation would
    factory.registry().resolve(&args.theme)?;
    let assets = factory.assets(&args.theme, args.variant.as_deref())?;

    writeln!(out, "Theme dir:   {}", assets.theme_dir.display())?;
    writeln!(out, "Template:    {}", assets.template_path.display())?;
    match &assets.stylesheet_path {
        Some(path) => writeln!(out, "Stylesheet:  {}", path.display())?,
        None => writeln!(out, "Stylesheet:  (none)")?,
    }
    Ok(())
}

pub fn preview<W: Write>(factory: &PreviewFactory, args: &PreviewArgs, out: &mut W) -> Result<()> {
    let overrides = parse_overrides(args.overrides.as_deref())?;
    let mut document = factory.create_document(&args.theme, args.variant.as_deref(), &overrides)?;

    if let Some(path) = &args.data {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        document.set_params(&data)?;
    }

    match &args.output {
        Some(path) => {
            document
                .save(path)
                .with_context(|| format!("Failed to render preview to {}", path.display()))?;
            writeln!(out, "Preview written to {}", path.display())?;
        }
        None => {
            document.write_to(out).with_context(|| "Failed to render preview")?;
        }
    }
    Ok(())
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render engine abstraction.
//
// Folio never rasterises anything itself. An engine takes styled HTML and
// produces the finished document; these traits are the only surface the
// factory and documents rely on.

pub mod preview;

use std::path::{Path, PathBuf};

use folio_core::error::Result;
use folio_core::{FontData, FontRegistration, Margin, Options, PageSize};
use serde_json::{Map, Value};

/// Everything an engine is constructed with.
///
/// Every field is filled from the resolved options and the factory's font
/// registration, so engine output never depends on the engine's own defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub page_size: PageSize,
    pub margin: Margin,
    pub image_dpi: u32,
    pub encoding: String,
    pub font_dirs: Vec<PathBuf>,
    pub font_data: FontData,
    pub default_font: Option<String>,
    /// Engine-specific settings from the `extra` option.
    pub extra: Map<String, Value>,
}

impl EngineConfig {
    /// Combine resolved options with font registration and engine built-ins.
    pub fn build(
        options: &Options,
        fonts: &FontRegistration,
        builtin_font_dirs: &[PathBuf],
        builtin_font_data: &FontData,
    ) -> Self {
        Self {
            page_size: options.page_size,
            margin: options.margin,
            image_dpi: options.image_dpi,
            encoding: options.encoding.clone(),
            font_dirs: fonts.font_dirs(builtin_font_dirs),
            font_data: fonts.font_data(builtin_font_data, &options.fonts),
            default_font: fonts.default_font.clone(),
            extra: options.extra.clone(),
        }
    }
}

/// A stateful renderer for one document.
///
/// Styles must be ingested before the HTML they apply to. `finalize` consumes
/// the engine, so an engine produces at most one document.
pub trait RenderEngine {
    /// Directory relative asset references (images, fonts) resolve against.
    fn set_base_path(&mut self, path: &Path);

    /// Fail on malformed or missing images instead of skipping them.
    fn set_show_image_errors(&mut self, enabled: bool);

    /// Register document-level CSS.
    fn ingest_style(&mut self, css: &str) -> Result<()>;

    /// Append HTML body content.
    fn ingest_html(&mut self, html: &str) -> Result<()>;

    /// Produce the finished document.
    fn finalize(self) -> Result<Vec<u8>>;
}

/// Builds engines and reports the fonts an engine ships with.
pub trait EngineFactory {
    type Engine: RenderEngine;

    /// Font directories the engine searches by default.
    fn builtin_font_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Font families the engine knows by default.
    fn builtin_font_data(&self) -> FontData {
        FontData::new()
    }

    fn create_engine(&self, config: EngineConfig) -> Result<Self::Engine>;
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTML preview engine — assembles the styled markup a PDF engine would receive
// into one standalone HTML file. Used to inspect themes without a PDF backend.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::FontData;
use kuchiki::traits::TendrilSink;
use minijinja::HtmlEscape;
use tracing::{debug, instrument};

use super::{EngineConfig, EngineFactory, RenderEngine};

/// One ingestion call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    Style(String),
    Html(String),
}

/// Engine that records everything it is given and emits an HTML page with an
/// `@page` rule built from its configuration.
#[derive(Debug, Clone)]
pub struct HtmlPreviewEngine {
    config: EngineConfig,
    base_path: Option<PathBuf>,
    show_image_errors: bool,
    ingested: Vec<Ingested>,
}

impl HtmlPreviewEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            base_path: None,
            show_image_errors: false,
            ingested: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn show_image_errors(&self) -> bool {
        self.show_image_errors
    }

    /// Ingestion calls so far, oldest first.
    pub fn ingested(&self) -> &[Ingested] {
        &self.ingested
    }

    fn check_images(&self, html: &str) -> Result<()> {
        for src in image_sources(html) {
            if src.is_empty() || src.starts_with("data:") || src.contains("://") {
                continue;
            }
            let path = match &self.base_path {
                Some(base) => base.join(&src),
                None => PathBuf::from(&src),
            };
            if !path.is_file() {
                return Err(FolioError::Engine(format!(
                    "image not found: {src} (looked at {})",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    fn page_rule(&self) -> String {
        let m = &self.config.margin;
        format!(
            "@page {{ size: {}; margin: {}mm {}mm {}mm {}mm; }}",
            self.config.page_size.css_size(),
            m.top,
            m.right,
            m.bottom,
            m.left
        )
    }
}

impl RenderEngine for HtmlPreviewEngine {
    fn set_base_path(&mut self, path: &Path) {
        self.base_path = Some(path.to_path_buf());
    }

    fn set_show_image_errors(&mut self, enabled: bool) {
        self.show_image_errors = enabled;
    }

    fn ingest_style(&mut self, css: &str) -> Result<()> {
        self.ingested.push(Ingested::Style(css.to_string()));
        Ok(())
    }

    fn ingest_html(&mut self, html: &str) -> Result<()> {
        if self.show_image_errors {
            self.check_images(html)?;
        }
        self.ingested.push(Ingested::Html(html.to_string()));
        Ok(())
    }

    #[instrument(skip(self), fields(chunks = self.ingested.len()))]
    fn finalize(self) -> Result<Vec<u8>> {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        let _ = writeln!(out, "<meta charset=\"{}\">", HtmlEscape(&self.config.encoding));
        if let Some(base) = &self.base_path {
            let href = format!("{}/", base.display());
            let _ = writeln!(out, "<base href=\"{}\">", HtmlEscape(&href));
        }
        out.push_str("<style>\n");
        let _ = writeln!(out, "{}", self.page_rule());
        if let Some(font) = &self.config.default_font {
            let _ = writeln!(out, "body {{ font-family: \"{font}\"; }}");
        }
        for item in &self.ingested {
            if let Ingested::Style(css) = item {
                let _ = writeln!(out, "{css}");
            }
        }
        out.push_str("</style>\n</head>\n<body>\n");
        for item in &self.ingested {
            if let Ingested::Html(html) = item {
                let _ = writeln!(out, "{html}");
            }
        }
        out.push_str("</body>\n</html>\n");

        debug!(bytes = out.len(), "Preview document assembled");
        Ok(out.into_bytes())
    }
}

/// `src` attribute values of every `<img>` element, in document order.
fn image_sources(html: &str) -> Vec<String> {
    let document = kuchiki::parse_html().one(html);
    let Ok(images) = document.select("img[src]") else {
        return Vec::new();
    };
    images
        .map(|img| {
            let attrs = img.attributes.borrow();
            attrs.get("src").unwrap_or("").trim().to_string()
        })
        .collect()
}

/// Builds [`HtmlPreviewEngine`]s, optionally advertising built-in fonts.
#[derive(Debug, Clone, Default)]
pub struct HtmlPreviewEngineFactory {
    font_dirs: Vec<PathBuf>,
    font_data: FontData,
}

impl HtmlPreviewEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_fonts(font_dirs: Vec<PathBuf>, font_data: FontData) -> Self {
        Self {
            font_dirs,
            font_data,
        }
    }
}

impl EngineFactory for HtmlPreviewEngineFactory {
    type Engine = HtmlPreviewEngine;

    fn builtin_font_dirs(&self) -> Vec<PathBuf> {
        self.font_dirs.clone()
    }

    fn builtin_font_data(&self) -> FontData {
        self.font_data.clone()
    }

    fn create_engine(&self, config: EngineConfig) -> Result<HtmlPreviewEngine> {
        Ok(HtmlPreviewEngine::new(config))
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document factory — resolves a theme, layers call overrides on top, builds a
// render engine, loads the theme's stylesheet, and binds its template.

use std::path::{Path, PathBuf};

use folio_core::config::DEFAULT_VARIANT;
use folio_core::error::Result;
use folio_core::{FactoryConfig, FontRegistration, Merge, Options, OptionsOverride};
use tracing::{debug, info, instrument};

use crate::assets::{ThemeAssets, normalize_root};
use crate::document::Document;
use crate::engine::{EngineConfig, EngineFactory, RenderEngine};
use crate::registry::ThemeRegistry;
use crate::template::{Template, TemplateFactory};

/// Creates [`Document`]s from registered themes.
///
/// Every call builds its own engine and its own merged options, so a factory
/// shared between threads never mixes one call's overrides into another.
#[derive(Debug)]
pub struct DocumentFactory<E, T> {
    template_root: PathBuf,
    registry: ThemeRegistry,
    fonts: FontRegistration,
    engines: E,
    templates: T,
    default_variant: String,
}

impl<E: EngineFactory, T: TemplateFactory> DocumentFactory<E, T> {
    /// Create a factory over `template_root`, which holds one directory per theme.
    pub fn new(
        template_root: impl AsRef<Path>,
        registry: ThemeRegistry,
        fonts: FontRegistration,
        engines: E,
        templates: T,
    ) -> Self {
        Self {
            template_root: normalize_root(template_root.as_ref()),
            registry,
            fonts,
            engines,
            templates,
            default_variant: DEFAULT_VARIANT.to_string(),
        }
    }

    /// Create a factory with every theme, default, and font from `config`.
    pub fn from_config(config: &FactoryConfig, engines: E, templates: T) -> Result<Self> {
        Ok(Self::new(
            &config.template_dir,
            ThemeRegistry::from_config(config)?,
            config.fonts(),
            engines,
            templates,
        )
        .with_default_variant(config.default_variant.clone()))
    }

    /// Variant used by [`create`](Self::create) and when no variant is given.
    pub fn with_default_variant(mut self, variant: impl Into<String>) -> Self {
        self.default_variant = variant.into();
        self
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn fonts(&self) -> &FontRegistration {
        &self.fonts
    }

    pub fn default_variant(&self) -> &str {
        &self.default_variant
    }

    /// Theme options with `overrides` layered on top.
    pub fn render_options(&self, theme: &str, overrides: &OptionsOverride) -> Result<Options> {
        let options = self.registry.resolve(theme)?;
        overrides.validate()?;
        Ok(options.merge(overrides))
    }

    /// Engine configuration for fully resolved options.
    pub fn engine_config(&self, options: &Options) -> EngineConfig {
        EngineConfig::build(
            options,
            &self.fonts,
            &self.engines.builtin_font_dirs(),
            &self.engines.builtin_font_data(),
        )
    }

    /// Asset locations for a theme variant (default variant when `None`).
    pub fn assets(&self, theme: &str, variant: Option<&str>) -> Result<ThemeAssets> {
        let variant = variant.unwrap_or(&self.default_variant);
        ThemeAssets::resolve(&self.template_root, theme, variant)
    }

    /// Document for `theme` with the default variant and no overrides.
    pub fn create(&self, theme: &str) -> Result<Document<E::Engine, T::Template>> {
        self.create_document(theme, None, &OptionsOverride::default())
    }

    /// Build a document for `theme`.
    ///
    /// Fails with `UnknownTheme` if the theme was never registered. The
    /// stylesheet, when the theme has one, reaches the engine before any HTML.
    #[instrument(skip(self, overrides))]
    pub fn create_document(
        &self,
        theme: &str,
        variant: Option<&str>,
        overrides: &OptionsOverride,
    ) -> Result<Document<E::Engine, T::Template>> {
        let options = self.render_options(theme, overrides)?;

        let mut engine = self.engines.create_engine(self.engine_config(&options))?;
        engine.set_show_image_errors(true);

        let assets = self.assets(theme, variant)?;
        engine.set_base_path(&assets.theme_dir);

        match assets.read_stylesheet()? {
            Some(css) => {
                debug!(bytes = css.len(), "Ingesting theme stylesheet");
                engine.ingest_style(&css)?;
            }
            None => debug!(theme_dir = %assets.theme_dir.display(), "Theme has no stylesheet"),
        }

        let mut template = self.templates.create_template()?;
        template.set_file(&assets.template_path);
        template.set_dir(&assets.theme_dir);

        info!(
            template = %assets.template_path.display(),
            page_size = %options.page_size,
            image_dpi = options.image_dpi,
            "Document created"
        );
        Ok(Document::new(engine, template))
    }
}

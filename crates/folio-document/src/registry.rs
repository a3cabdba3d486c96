// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Theme registry — named option sets, each merged over the global defaults.

use std::collections::HashMap;

use folio_core::error::{FolioError, Result};
use folio_core::{FactoryConfig, Merge, Options, OptionsOverride};
use tracing::{debug, warn};

/// Registered themes and the defaults they were merged over.
///
/// Build the registry, register every theme, then hand it to a
/// [`DocumentFactory`](crate::DocumentFactory). The factory only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    defaults: Options,
    themes: HashMap<String, Options>,
}

impl ThemeRegistry {
    /// Create an empty registry whose themes merge over `defaults`.
    pub fn new(defaults: Options) -> Self {
        Self {
            defaults,
            themes: HashMap::new(),
        }
    }

    /// Create a registry from an override layer on top of the built-in defaults.
    pub fn with_defaults(overrides: &OptionsOverride) -> Result<Self> {
        overrides.validate()?;
        Ok(Self::new(Options::default().merge(overrides)))
    }

    /// Build a registry holding every theme in `config`.
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        let mut registry = Self::with_defaults(&config.defaults)?;
        for (name, setup) in &config.themes {
            registry.register(name.clone(), setup)?;
        }
        Ok(registry)
    }

    /// Register a theme. The merge with the current defaults happens now, so
    /// later calls to [`set_defaults`](Self::set_defaults) leave it unchanged.
    ///
    /// Registering an existing name replaces the earlier theme. A setup that
    /// fails validation is rejected and leaves the registry as it was.
    pub fn register(&mut self, name: impl Into<String>, setup: &OptionsOverride) -> Result<()> {
        let name = name.into();
        setup.validate()?;
        let options = self.defaults.merge(setup);
        if self.themes.insert(name.clone(), options).is_some() {
            warn!(theme = %name, "Theme registered twice, replacing earlier setup");
        } else {
            debug!(theme = %name, "Registered theme");
        }
        Ok(())
    }

    /// Fully merged options for a registered theme.
    pub fn resolve(&self, name: &str) -> Result<&Options> {
        self.themes
            .get(name)
            .ok_or_else(|| FolioError::UnknownTheme(name.to_string()))
    }

    /// Replace the defaults used for themes registered from now on.
    pub fn set_defaults(&mut self, defaults: Options) {
        self.defaults = defaults;
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

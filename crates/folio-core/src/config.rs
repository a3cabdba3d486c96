// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Factory configuration, loaded once at start-up.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{FolioError, Result};
use crate::fonts::{FontData, FontRegistration};
use crate::options::OptionsOverride;

/// Template variant used when a caller does not name one.
pub const DEFAULT_VARIANT: &str = "default";

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}

/// Everything needed to build a document factory: where themes live, the
/// global option defaults, each theme's overrides, and font registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FactoryConfig {
    /// Root directory holding one sub-directory per theme.
    pub template_dir: PathBuf,
    /// Layered over the built-in option defaults.
    #[serde(default)]
    pub defaults: OptionsOverride,
    /// Theme name to theme-specific overrides.
    #[serde(default)]
    pub themes: BTreeMap<String, OptionsOverride>,
    #[serde(default)]
    pub custom_fonts: FontData,
    #[serde(default)]
    pub custom_font_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub default_font: Option<String>,
    #[serde(default = "default_variant")]
    pub default_variant: String,
}

impl FactoryConfig {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            defaults: OptionsOverride::default(),
            themes: BTreeMap::new(),
            custom_fonts: FontData::new(),
            custom_font_dirs: Vec::new(),
            default_font: None,
            default_variant: default_variant(),
        }
    }

    /// Add or replace a theme.
    pub fn with_theme(mut self, name: impl Into<String>, setup: OptionsOverride) -> Self {
        self.themes.insert(name.into(), setup);
        self
    }

    /// Parse a JSON configuration document. Paths are taken as written.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| FolioError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    ///
    /// Relative `templateDir` and `customFontDirs` entries are resolved against
    /// the directory containing the file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|err| FolioError::asset(path, err))?;
        let mut config = Self::from_json_str(&contents)?;

        if let Some(base) = path.parent() {
            config.template_dir = anchor(base, &config.template_dir);
            config.custom_font_dirs = config
                .custom_font_dirs
                .iter()
                .map(|dir| anchor(base, dir))
                .collect();
        }

        debug!(
            template_dir = %config.template_dir.display(),
            themes = config.themes.len(),
            "Loaded factory configuration"
        );
        Ok(config)
    }

    /// Check every option layer and the variant name.
    pub fn validate(&self) -> Result<()> {
        self.defaults.validate()?;
        for (name, setup) in &self.themes {
            if name.trim().is_empty() {
                return Err(FolioError::Config("theme names must not be empty".into()));
            }
            setup
                .validate()
                .map_err(|err| FolioError::Config(format!("theme '{name}': {err}")))?;
        }
        if self.default_variant.trim().is_empty() {
            return Err(FolioError::Config("defaultVariant must not be empty".into()));
        }
        Ok(())
    }

    /// Font data for the factory, fixed for its lifetime.
    pub fn fonts(&self) -> FontRegistration {
        FontRegistration {
            custom_fonts: self.custom_fonts.clone(),
            custom_font_dirs: self.custom_font_dirs.clone(),
            default_font: self.default_font.clone(),
        }
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

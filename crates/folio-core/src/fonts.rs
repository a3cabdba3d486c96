// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font registration data handed to render engines.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::merge::Merge;

/// Font files for one family, keyed the way PDF engines expect them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontFiles {
    #[serde(rename = "R", default, skip_serializing_if = "Option::is_none")]
    pub regular: Option<String>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(rename = "I", default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<String>,
    #[serde(rename = "BI", default, skip_serializing_if = "Option::is_none")]
    pub bold_italic: Option<String>,
}

impl FontFiles {
    /// A family with only a regular face.
    pub fn regular(file: impl Into<String>) -> Self {
        Self {
            regular: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn with_bold(mut self, file: impl Into<String>) -> Self {
        self.bold = Some(file.into());
        self
    }

    pub fn with_italic(mut self, file: impl Into<String>) -> Self {
        self.italic = Some(file.into());
        self
    }

    pub fn with_bold_italic(mut self, file: impl Into<String>) -> Self {
        self.bold_italic = Some(file.into());
        self
    }
}

impl Merge for FontFiles {
    fn merge(&self, overrides: &FontFiles) -> FontFiles {
        FontFiles {
            regular: overrides.regular.clone().or_else(|| self.regular.clone()),
            bold: overrides.bold.clone().or_else(|| self.bold.clone()),
            italic: overrides.italic.clone().or_else(|| self.italic.clone()),
            bold_italic: overrides
                .bold_italic
                .clone()
                .or_else(|| self.bold_italic.clone()),
        }
    }
}

/// Family name to font files.
pub type FontData = BTreeMap<String, FontFiles>;

/// Fonts configured for the whole factory. Fixed once the factory exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRegistration {
    #[serde(default)]
    pub custom_fonts: FontData,
    #[serde(default)]
    pub custom_font_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub default_font: Option<String>,
}

impl FontRegistration {
    /// Engine font directories followed by the custom ones.
    ///
    /// Built-in directories come first so custom directories extend the search
    /// path instead of hiding the engine's own fonts.
    pub fn font_dirs(&self, builtin: &[PathBuf]) -> Vec<PathBuf> {
        builtin
            .iter()
            .chain(self.custom_font_dirs.iter())
            .cloned()
            .collect()
    }

    /// Layer font data: engine built-ins, then custom fonts, then the fonts named
    /// in the resolved theme options. A later layer replaces a family whole.
    pub fn font_data(&self, builtin: &FontData, theme_fonts: &FontData) -> FontData {
        let mut data = builtin.clone();
        data.extend(self.custom_fonts.clone());
        data.extend(theme_fonts.clone());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> FontRegistration {
        FontRegistration {
            custom_fonts: FontData::from([
                ("dejavusans".to_string(), FontFiles::regular("Custom.ttf")),
                ("brand".to_string(), FontFiles::regular("Brand-Regular.ttf")),
            ]),
            custom_font_dirs: vec![PathBuf::from("/app/fonts")],
            default_font: Some("brand".into()),
        }
    }

    #[test]
    fn builtin_dirs_come_first() {
        let dirs = registration().font_dirs(&[PathBuf::from("/engine/ttfonts")]);
        assert_eq!(
            dirs,
            vec![PathBuf::from("/engine/ttfonts"), PathBuf::from("/app/fonts")]
        );
    }

    #[test]
    fn custom_fonts_win_on_collision() {
        let builtin = FontData::from([
            (
                "dejavusans".to_string(),
                FontFiles::regular("DejaVuSans.ttf").with_bold("DejaVuSans-Bold.ttf"),
            ),
            ("freeserif".to_string(), FontFiles::regular("FreeSerif.ttf")),
        ]);
        let data = registration().font_data(&builtin, &FontData::new());

        // replaced whole, including the bold face
        assert_eq!(data["dejavusans"], FontFiles::regular("Custom.ttf"));
        assert_eq!(data["freeserif"], FontFiles::regular("FreeSerif.ttf"));
        assert_eq!(data["brand"], FontFiles::regular("Brand-Regular.ttf"));
    }

    #[test]
    fn theme_fonts_layer_last() {
        let theme = FontData::from([("brand".to_string(), FontFiles::regular("Theme.ttf"))]);
        let data = registration().font_data(&FontData::new(), &theme);
        assert_eq!(data["brand"], FontFiles::regular("Theme.ttf"));
    }

    #[test]
    fn font_files_merge_per_face() {
        let base = FontFiles::regular("A.ttf").with_bold("A-Bold.ttf");
        let merged = base.merge(&FontFiles {
            bold: Some("B-Bold.ttf".into()),
            italic: Some("B-It.ttf".into()),
            ..FontFiles::default()
        });
        assert_eq!(merged.regular.as_deref(), Some("A.ttf"));
        assert_eq!(merged.bold.as_deref(), Some("B-Bold.ttf"));
        assert_eq!(merged.italic.as_deref(), Some("B-It.ttf"));
        assert_eq!(merged.bold_italic, None);
    }

    #[test]
    fn font_files_use_engine_keys() {
        let json = serde_json::to_value(FontFiles::regular("X.ttf").with_bold_italic("X-BI.ttf"))
            .expect("serialize");
        assert_eq!(json, serde_json::json!({"R": "X.ttf", "BI": "X-BI.ttf"}));
    }
}

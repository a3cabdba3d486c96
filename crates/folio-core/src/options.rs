// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render option types: page size, margins, fonts, encoding, and their
// partial (override) counterparts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FolioError, Result};
use crate::fonts::{FontData, FontFiles};
use crate::merge::{Merge, merge_maps, merge_objects};

/// Standard paper formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperFormat {
    /// Portrait dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A3 => (297, 420),
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A3 => f.write_str("A3"),
            Self::A4 => f.write_str("A4"),
            Self::A5 => f.write_str("A5"),
            Self::Letter => f.write_str("Letter"),
            Self::Legal => f.write_str("Legal"),
            Self::Tabloid => f.write_str("Tabloid"),
            Self::Custom {
                width_mm,
                height_mm,
            } => write!(f, "{width_mm}x{height_mm}"),
        }
    }
}

impl FromStr for PaperFormat {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        let format = match s.to_ascii_lowercase().as_str() {
            "a3" => Self::A3,
            "a4" => Self::A4,
            "a5" => Self::A5,
            "letter" => Self::Letter,
            "legal" => Self::Legal,
            "tabloid" => Self::Tabloid,
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| FolioError::InvalidPageSize(s.to_string()))?;
                let parse = |v: &str| {
                    v.trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|mm| *mm > 0)
                        .ok_or_else(|| FolioError::InvalidPageSize(s.to_string()))
                };
                Self::Custom {
                    width_mm: parse(w)?,
                    height_mm: parse(h)?,
                }
            }
        };
        Ok(format)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page format plus orientation.
///
/// The string form follows PDF engine conventions: `A4`, `A4-L`, `Letter-P`,
/// or a custom `210x297` size in millimetres with the same optional suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageSize {
    pub format: PaperFormat,
    pub orientation: Orientation,
}

impl PageSize {
    pub fn new(format: PaperFormat, orientation: Orientation) -> Self {
        Self {
            format,
            orientation,
        }
    }

    pub fn portrait(format: PaperFormat) -> Self {
        Self::new(format, Orientation::Portrait)
    }

    pub fn landscape(format: PaperFormat) -> Self {
        Self::new(format, Orientation::Landscape)
    }

    /// Oriented dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        let (w, h) = self.format.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Value for a CSS `@page { size: ... }` declaration.
    pub fn css_size(&self) -> String {
        let (w, h) = self.dimensions_mm();
        format!("{w}mm {h}mm")
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::portrait(PaperFormat::A4)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.orientation {
            Orientation::Portrait => write!(f, "{}", self.format),
            Orientation::Landscape => write!(f, "{}-L", self.format),
        }
    }
}

impl FromStr for PageSize {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (format, orientation) = match trimmed.rsplit_once('-') {
            Some((format, "L" | "l")) => (format, Orientation::Landscape),
            Some((format, "P" | "p")) => (format, Orientation::Portrait),
            Some(_) => return Err(FolioError::InvalidPageSize(s.to_string())),
            None => (trimmed, Orientation::Portrait),
        };
        let format = format
            .parse::<PaperFormat>()
            .map_err(|_| FolioError::InvalidPageSize(s.to_string()))?;
        Ok(Self::new(format, orientation))
    }
}

impl TryFrom<String> for PageSize {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PageSize> for String {
    fn from(value: PageSize) -> Self {
        value.to_string()
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margin {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margin {
    pub fn uniform(mm: f32) -> Self {
        Self {
            left: mm,
            right: mm,
            top: mm,
            bottom: mm,
        }
    }
}

/// Margin edges to replace; unset edges keep their base value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
}

impl MarginOverride {
    fn edges(&self) -> [Option<f32>; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

impl From<Margin> for MarginOverride {
    fn from(m: Margin) -> Self {
        Self {
            left: Some(m.left),
            right: Some(m.right),
            top: Some(m.top),
            bottom: Some(m.bottom),
        }
    }
}

impl Merge<MarginOverride> for Margin {
    fn merge(&self, overrides: &MarginOverride) -> Margin {
        Margin {
            left: overrides.left.unwrap_or(self.left),
            right: overrides.right.unwrap_or(self.right),
            top: overrides.top.unwrap_or(self.top),
            bottom: overrides.bottom.unwrap_or(self.bottom),
        }
    }
}

/// Complete render options for a theme or a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub encoding: String,
    pub fonts: FontData,
    pub image_dpi: u32,
    pub page_size: PageSize,
    pub margin: Margin,
    /// Engine-specific settings passed through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            fonts: FontData::new(),
            image_dpi: 120,
            page_size: PageSize::default(),
            margin: Margin::default(),
            extra: Map::new(),
        }
    }
}

impl Merge<OptionsOverride> for Options {
    fn merge(&self, overrides: &OptionsOverride) -> Options {
        Options {
            encoding: overrides
                .encoding
                .clone()
                .unwrap_or_else(|| self.encoding.clone()),
            fonts: match &overrides.fonts {
                Some(fonts) => merge_maps(&self.fonts, fonts),
                None => self.fonts.clone(),
            },
            image_dpi: overrides.image_dpi.unwrap_or(self.image_dpi),
            page_size: overrides.page_size.unwrap_or(self.page_size),
            margin: match &overrides.margin {
                Some(margin) => self.margin.merge(margin),
                None => self.margin,
            },
            extra: match &overrides.extra {
                Some(extra) => merge_objects(&self.extra, extra),
                None => self.extra.clone(),
            },
        }
    }
}

/// A partial [`Options`] layer: theme setup or per-call overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct OptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_dpi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<MarginOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl OptionsOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate an override layer from JSON.
    pub fn from_value(value: Value) -> Result<Self> {
        let overrides: Self = serde_json::from_value(value)
            .map_err(|err| FolioError::InvalidOptions(err.to_string()))?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Parse and validate an override layer from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| FolioError::InvalidOptions(err.to_string()))?;
        Self::from_value(value)
    }

    /// Reject values no engine can honour.
    pub fn validate(&self) -> Result<()> {
        if let Some(encoding) = &self.encoding {
            if encoding.trim().is_empty() {
                return Err(FolioError::InvalidOptions("encoding must not be empty".into()));
            }
        }
        if self.image_dpi == Some(0) {
            return Err(FolioError::InvalidOptions("imageDpi must be positive".into()));
        }
        if let Some(margin) = &self.margin {
            if margin
                .edges()
                .into_iter()
                .flatten()
                .any(|mm| !mm.is_finite() || mm < 0.0)
            {
                return Err(FolioError::InvalidOptions(
                    "margins must be finite and non-negative".into(),
                ));
            }
        }
        Ok(())
    }

    /// True when merging this layer would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn image_dpi(mut self, dpi: u32) -> Self {
        self.image_dpi = Some(dpi);
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin.into());
        self
    }

    pub fn margin_left(mut self, mm: f32) -> Self {
        self.margin.get_or_insert_with(MarginOverride::default).left = Some(mm);
        self
    }

    pub fn margin_right(mut self, mm: f32) -> Self {
        self.margin.get_or_insert_with(MarginOverride::default).right = Some(mm);
        self
    }

    pub fn margin_top(mut self, mm: f32) -> Self {
        self.margin.get_or_insert_with(MarginOverride::default).top = Some(mm);
        self
    }

    pub fn margin_bottom(mut self, mm: f32) -> Self {
        self.margin.get_or_insert_with(MarginOverride::default).bottom = Some(mm);
        self
    }

    pub fn font(mut self, family: impl Into<String>, files: FontFiles) -> Self {
        self.fonts
            .get_or_insert_with(FontData::new)
            .insert(family.into(), files);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Theme asset resolution — where a theme's template and stylesheet live.

use std::path::{Component, Path, PathBuf};

use folio_core::error::{FolioError, Result};

/// File name of the optional per-theme stylesheet.
pub const STYLESHEET_FILE: &str = "style.css";

/// Resolved file-system locations for one theme variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAssets {
    pub theme_dir: PathBuf,
    pub template_path: PathBuf,
    /// Set only when `style.css` exists in the theme directory.
    pub stylesheet_path: Option<PathBuf>,
}

impl ThemeAssets {
    /// `template_root/theme` and `template_root/theme/variant`, plus the
    /// stylesheet if the theme ships one.
    ///
    /// Theme and variant must be plain relative paths; anything that would
    /// leave `template_root` or the theme directory is a `Config` error.
    pub fn resolve(template_root: &Path, theme: &str, variant: &str) -> Result<Self> {
        check_segment("theme", theme)?;
        check_segment("variant", variant)?;

        let theme_dir = template_root.join(theme);
        let template_path = theme_dir.join(variant);
        let stylesheet = theme_dir.join(STYLESHEET_FILE);
        let stylesheet_path = stylesheet.is_file().then_some(stylesheet);
        Ok(Self {
            theme_dir,
            template_path,
            stylesheet_path,
        })
    }

    /// Stylesheet contents, or `None` when the theme has no stylesheet.
    pub fn read_stylesheet(&self) -> Result<Option<String>> {
        self.stylesheet_path
            .as_ref()
            .map(|path| std::fs::read_to_string(path).map_err(|err| FolioError::asset(path, err)))
            .transpose()
    }
}

fn check_segment(kind: &str, value: &str) -> Result<()> {
    let path = Path::new(value);
    let contained = path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if contained {
        Ok(())
    } else {
        Err(FolioError::Config(format!(
            "{kind} '{value}' must be a relative path without '..'"
        )))
    }
}

/// Strip trailing separators so `root/theme` joins the same way whether or
/// not the configured root ended in a slash.
pub fn normalize_root(root: &Path) -> PathBuf {
    root.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_paths_without_stylesheet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let assets = ThemeAssets::resolve(dir.path(), "invoice", "default").unwrap();

        assert_eq!(assets.theme_dir, dir.path().join("invoice"));
        assert_eq!(assets.template_path, dir.path().join("invoice").join("default"));
        assert_eq!(assets.stylesheet_path, None);
        assert_eq!(assets.read_stylesheet().unwrap(), None);
    }

    #[test]
    fn finds_stylesheet_when_present() {
        let dir = tempfile::tempdir().expect("tempdir");
        let theme_dir = dir.path().join("invoice");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join(STYLESHEET_FILE), "body { margin: 0 }").unwrap();

        let assets = ThemeAssets::resolve(dir.path(), "invoice", "summary.html").unwrap();
        assert_eq!(assets.stylesheet_path, Some(theme_dir.join(STYLESHEET_FILE)));
        assert_eq!(
            assets.read_stylesheet().unwrap().as_deref(),
            Some("body { margin: 0 }")
        );
        assert_eq!(assets.template_path, theme_dir.join("summary.html"));
    }

    #[test]
    fn stylesheet_directory_is_not_a_stylesheet() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("invoice").join(STYLESHEET_FILE)).unwrap();

        let assets = ThemeAssets::resolve(dir.path(), "invoice", "default").unwrap();
        assert_eq!(assets.stylesheet_path, None);
    }

    #[test]
    fn variant_stays_inside_theme_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        for variant in ["/etc/hostname", "../report/default", "a/../../b", "", "."] {
            let err = ThemeAssets::resolve(dir.path(), "invoice", variant).unwrap_err();
            assert!(matches!(err, FolioError::Config(_)), "{variant:?}: {err}");
        }
        let assets = ThemeAssets::resolve(dir.path(), "invoice", "parts/summary").unwrap();
        assert_eq!(
            assets.template_path,
            dir.path().join("invoice").join("parts").join("summary")
        );
    }

    #[test]
    fn theme_name_cannot_leave_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(ThemeAssets::resolve(dir.path(), "../elsewhere", "default").is_err());
    }

    #[test]
    fn trailing_separator_is_dropped() {
        assert_eq!(
            normalize_root(Path::new("/srv/themes/")),
            PathBuf::from("/srv/themes")
        );
        assert_eq!(
            normalize_root(Path::new("/srv/themes/")).join("invoice"),
            Path::new("/srv/themes").join("invoice")
        );
    }
}

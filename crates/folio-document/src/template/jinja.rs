// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MiniJinja-backed templates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_core::error::{FolioError, Result};
use minijinja::{AutoEscape, Environment};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Template, TemplateFactory};

/// Creates [`JinjaTemplate`]s sharing a set of global values.
///
/// Globals are how a host injects its own context (site name, base URLs,
/// a translator's strings) once, instead of per document.
#[derive(Debug, Clone, Default)]
pub struct JinjaTemplateFactory {
    globals: Arc<BTreeMap<String, Value>>,
}

impl JinjaTemplateFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value visible to every template this factory creates.
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        Arc::make_mut(&mut self.globals).insert(name.into(), value);
        self
    }
}

impl TemplateFactory for JinjaTemplateFactory {
    type Template = JinjaTemplate;

    fn create_template(&self) -> Result<JinjaTemplate> {
        Ok(JinjaTemplate {
            file: None,
            dir: None,
            globals: Arc::clone(&self.globals),
        })
    }
}

/// A Jinja template file.
///
/// Output is HTML-escaped. `{% include %}` and `{% extends %}` resolve against
/// the bound directory, which is also exposed to the template as `dir`.
#[derive(Debug, Clone)]
pub struct JinjaTemplate {
    file: Option<PathBuf>,
    dir: Option<PathBuf>,
    globals: Arc<BTreeMap<String, Value>>,
}

impl Template for JinjaTemplate {
    fn set_file(&mut self, path: &Path) {
        self.file = Some(path.to_path_buf());
    }

    fn set_dir(&mut self, dir: &Path) {
        self.dir = Some(dir.to_path_buf());
    }

    fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    #[instrument(skip_all, fields(file = ?self.file))]
    fn render(&self, context: &Value) -> Result<String> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| FolioError::Template("no template file bound".into()))?;
        let source = std::fs::read_to_string(file).map_err(|err| FolioError::asset(file, err))?;

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        for (name, value) in self.globals.iter() {
            env.add_global(name.clone(), minijinja::Value::from_serialize(value));
        }
        if let Some(dir) = &self.dir {
            env.set_loader(minijinja::path_loader(dir));
            env.add_global("dir", dir.display().to_string());
        }

        let name = file.display().to_string();
        let html = env
            .render_named_str(&name, &source, context)
            .map_err(|err| FolioError::Template(format!("{name}: {err}")))?;

        debug!(bytes = html.len(), "Template rendered");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn theme_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("default"),
            "{% include \"header.html\" %}<p>{{ customer }}</p>",
        )
        .unwrap();
        std::fs::write(dir.path().join("header.html"), "<h1>{{ company }}</h1>").unwrap();
        dir
    }

    fn bound(dir: &Path, factory: &JinjaTemplateFactory) -> JinjaTemplate {
        let mut template = factory.create_template().unwrap();
        template.set_file(&dir.join("default"));
        template.set_dir(dir);
        template
    }

    #[test]
    fn renders_with_includes_and_globals() {
        let dir = theme_dir();
        let factory = JinjaTemplateFactory::new().with_global("company", json!("Acme"));
        let template = bound(dir.path(), &factory);

        let html = template.render(&json!({"customer": "Jo"})).unwrap();
        assert_eq!(html, "<h1>Acme</h1><p>Jo</p>");
    }

    #[test]
    fn escapes_html() {
        let dir = theme_dir();
        let template = bound(dir.path(), &JinjaTemplateFactory::new());
        let html = template
            .render(&json!({"customer": "<script>", "company": "A&B"}))
            .unwrap();
        assert!(html.contains("&lt;script&gt;"), "{html}");
        assert!(html.contains("A&amp;B"), "{html}");
    }

    #[test]
    fn exposes_theme_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("default"), "{{ dir }}").unwrap();
        let template = bound(dir.path(), &JinjaTemplateFactory::new());
        let html = template.render(&json!({})).unwrap();
        // escaping may rewrite `/`, so compare the final path segment only
        let last = dir.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(html.contains(&last), "{html}");
    }

    #[test]
    fn unbound_template_fails() {
        let template = JinjaTemplateFactory::new().create_template().unwrap();
        let err = template.render(&json!({})).unwrap_err();
        assert!(matches!(err, FolioError::Template(_)), "{err}");
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let template = bound(dir.path(), &JinjaTemplateFactory::new());
        let err = template.render(&json!({})).unwrap_err();
        assert!(matches!(err, FolioError::Asset { .. }), "{err}");
    }

    #[test]
    fn syntax_error_is_a_template_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("default"), "{% if %}").unwrap();
        let template = bound(dir.path(), &JinjaTemplateFactory::new());
        let err = template.render(&json!({})).unwrap_err();
        assert!(matches!(err, FolioError::Template(_)), "{err}");
    }

    #[test]
    fn factory_creates_unbound_templates() {
        let template = JinjaTemplateFactory::new().create_template().unwrap();
        assert!(template.file().is_none());
        assert!(template.dir().is_none());
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template collaborator traits.

pub mod jinja;

use std::path::Path;

use folio_core::error::Result;
use serde_json::Value;

/// A template bound to a file, rendered to HTML with a data context.
pub trait Template {
    /// Template file to render.
    fn set_file(&mut self, path: &Path);

    /// Directory the template resolves its own includes against.
    fn set_dir(&mut self, dir: &Path);

    fn file(&self) -> Option<&Path>;

    fn dir(&self) -> Option<&Path>;

    /// Render the bound file with `context`.
    fn render(&self, context: &Value) -> Result<String>;
}

/// Creates fresh, unbound templates.
///
/// Takes no request or presenter context: anything a hosting environment
/// needs is given to the factory when it is constructed.
pub trait TemplateFactory {
    type Template: Template;

    fn create_template(&self) -> Result<Self::Template>;
}

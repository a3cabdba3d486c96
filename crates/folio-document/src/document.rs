// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document — a configured engine paired with a bound, not yet rendered template.

use std::io::Write;
use std::path::Path;

use folio_core::error::{FolioError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::engine::RenderEngine;
use crate::template::Template;

/// A document ready to be filled with data and rendered once.
///
/// The engine belongs to this document alone and is consumed by the first
/// successful hand-off of template output; later render calls fail with
/// [`FolioError::AlreadyRendered`].
#[derive(Debug)]
pub struct Document<E, T> {
    engine: Option<E>,
    template: T,
    params: Map<String, Value>,
}

impl<E: RenderEngine, T: Template> Document<E, T> {
    pub fn new(engine: E, template: T) -> Self {
        Self {
            engine: Some(engine),
            template,
            params: Map::new(),
        }
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut T {
        &mut self.template
    }

    /// The engine, until the document has been rendered.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn is_rendered(&self) -> bool {
        self.engine.is_none()
    }

    /// Template parameters collected so far.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Set one template parameter, replacing any earlier value.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set every field of a serializable struct or map as a parameter.
    pub fn set_params<S: Serialize>(&mut self, data: &S) -> Result<&mut Self> {
        match serde_json::to_value(data)? {
            Value::Object(fields) => {
                self.params.extend(fields);
                Ok(self)
            }
            other => Err(FolioError::Template(format!(
                "template parameters must serialize to an object, got {other}"
            ))),
        }
    }

    /// Template output without touching the engine.
    pub fn render_html(&self) -> Result<String> {
        self.template.render(&Value::Object(self.params.clone()))
    }

    /// Render the template, feed it to the engine, and return the finished bytes.
    ///
    /// If the template fails the engine is left untouched and the document can
    /// be rendered again; once the engine has been given HTML it is spent.
    #[instrument(skip(self))]
    pub fn render(&mut self) -> Result<Vec<u8>> {
        if self.engine.is_none() {
            return Err(FolioError::AlreadyRendered);
        }
        let html = self.render_html()?;
        let mut engine = self.engine.take().ok_or(FolioError::AlreadyRendered)?;
        engine.ingest_html(&html)?;
        let bytes = engine.finalize()?;
        info!(bytes = bytes.len(), "Document rendered");
        Ok(bytes)
    }

    /// Render into `writer`, returning the number of bytes written.
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> Result<usize> {
        let bytes = self.render()?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Render and write the result to `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

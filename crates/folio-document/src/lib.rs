// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document — Themed document creation for Folio.
//
// Provides the theme registry (global defaults merged with per-theme options),
// theme asset resolution, the document factory that wires a render engine and a
// template together, and the collaborator traits for both. A MiniJinja template
// factory and an HTML preview engine are included as ready-made collaborators.

pub mod assets;
pub mod document;
pub mod engine;
pub mod factory;
pub mod registry;
pub mod template;

// Re-export the primary structs so callers can use `folio_document::DocumentFactory` etc.
pub use assets::ThemeAssets;
pub use document::Document;
pub use engine::preview::{HtmlPreviewEngine, HtmlPreviewEngineFactory};
pub use engine::{EngineConfig, EngineFactory, RenderEngine};
pub use factory::DocumentFactory;
pub use registry::ThemeRegistry;
pub use template::jinja::{JinjaTemplate, JinjaTemplateFactory};
pub use template::{Template, TemplateFactory};

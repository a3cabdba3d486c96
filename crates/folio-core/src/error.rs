// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Configuration errors --
    #[error("theme '{0}' isn't registered")]
    UnknownTheme(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("configuration error: {0}")]
    Config(String),

    // -- Asset errors --
    #[error("failed to read {}: {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Rendering errors --
    #[error("render engine error: {0}")]
    Engine(String),

    #[error("document has already been rendered")]
    AlreadyRendered,
}

/// Which tier of the error taxonomy an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Deployment or configuration mistake (unknown theme, bad options).
    Configuration,
    /// Theme files could not be read or the template failed.
    Asset,
    /// Raised by the render engine or by misuse of a rendered document.
    Rendering,
}

impl FolioError {
    /// Classify this error. None of the classes are retryable: failures are
    /// deterministic for the same inputs.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownTheme(_)
            | Self::InvalidOptions(_)
            | Self::InvalidPageSize(_)
            | Self::Config(_) => ErrorClass::Configuration,
            Self::Asset { .. } | Self::Template(_) | Self::Io(_) | Self::Serialization(_) => {
                ErrorClass::Asset
            }
            Self::Engine(_) | Self::AlreadyRendered => ErrorClass::Rendering,
        }
    }

    /// Shorthand for an [`FolioError::Asset`] error carrying the offending path.
    pub fn asset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Asset {
            path: path.into(),
            source,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;

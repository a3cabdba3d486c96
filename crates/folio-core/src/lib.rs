// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — Core option types, merging, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod fonts;
pub mod merge;
pub mod options;

pub use config::FactoryConfig;
pub use error::{ErrorClass, FolioError, Result};
pub use fonts::{FontData, FontFiles, FontRegistration};
pub use merge::{Merge, merge_maps, merge_objects, merge_values};
pub use options::*;

//! Export surfaces for a generated outline.
//!
//! This module contains submodules responsible for turning a generated
//! outline into the artifacts the user takes away:
//!
//! # Submodules
//!
//! - [`text`]: Clipboard-ready plain-text rendering of the raw outline
//! - [`pdf`]: Paginated PDF document built from the parsed sections
//! - [`json`]: JSON dump of the full [`crate::models::OutlineDocument`]
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── pauta_<slug>.pdf
//! └── pauta_<slug>.json
//! ```
//!
//! Export failures never abort the wizard: PDF and JSON failures are
//! logged and reported as a console notice, clipboard failures surface a
//! synchronous alert.

pub mod json;
pub mod pdf;
pub mod text;

//! Data models for episode metadata and generated outlines.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Specialization`]: The fixed set of design disciplines a guest can belong to
//! - [`EpisodeForm`]: Mutable form state, filled field-by-field by the wizard
//! - [`EpisodeInputs`]: The immutable record frozen at submission
//! - [`Section`]: One titled block of a parsed outline
//! - [`OutlineDocument`]: The JSON-export shape bundling inputs, sections and raw text
//!
//! An outline is only ever requested from a frozen [`EpisodeInputs`], which
//! guarantees all free-text fields are non-empty by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A design discipline from the Escuela de Diseño catalogue.
///
/// The set is fixed; the wizard offers these as a numbered menu and falls
/// back to [`Specialization::Grafico`] when the user accepts the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialization {
    Grafico,
    Industrial,
    Interaccion,
    Indumentaria,
}

impl Specialization {
    /// All disciplines, in menu order.
    pub const ALL: [Specialization; 4] = [
        Specialization::Grafico,
        Specialization::Industrial,
        Specialization::Interaccion,
        Specialization::Indumentaria,
    ];

    /// The human-readable Spanish label used in prompts and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Specialization::Grafico => "Diseño Gráfico",
            Specialization::Industrial => "Diseño Industrial",
            Specialization::Interaccion => "Diseño de Interacción",
            Specialization::Indumentaria => "Diseño de Indumentaria",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable form state for one wizard session.
///
/// Fields are filled one at a time by the interactive driver. The form
/// gates stage advancement ([`EpisodeForm::stage1_complete`]) and
/// submission ([`EpisodeForm::is_complete`]), and produces the immutable
/// [`EpisodeInputs`] record via [`EpisodeForm::freeze`].
#[derive(Debug, Clone, Default)]
pub struct EpisodeForm {
    /// The guest's discipline; `None` until chosen.
    pub specialization: Option<Specialization>,
    /// Host name (stage 1).
    pub host_name: String,
    /// The department or role the host represents (stage 1).
    pub host_role: String,
    /// Guest name (stage 1).
    pub guest_name: String,
    /// The guest's best-known work, their "hit" (stage 1).
    pub guest_hit: String,
    /// Episode title (stage 2).
    pub episode_title: String,
    /// First thematic section name (stage 2).
    pub section1: String,
    /// Second thematic section name (stage 2).
    pub section2: String,
    /// Third thematic section name (stage 2).
    pub section3: String,
}

impl EpisodeForm {
    /// Whether the identity fields collected in stage 1 are all non-empty.
    ///
    /// Stage 2 (episode title and section names) is only reachable once
    /// this holds.
    pub fn stage1_complete(&self) -> bool {
        !self.host_name.trim().is_empty()
            && !self.host_role.trim().is_empty()
            && !self.guest_name.trim().is_empty()
            && !self.guest_hit.trim().is_empty()
    }

    /// Whether every free-text field is non-empty and a discipline is chosen.
    pub fn is_complete(&self) -> bool {
        self.stage1_complete()
            && self.specialization.is_some()
            && !self.episode_title.trim().is_empty()
            && !self.section1.trim().is_empty()
            && !self.section2.trim().is_empty()
            && !self.section3.trim().is_empty()
    }

    /// Freeze the form into an immutable [`EpisodeInputs`] record.
    ///
    /// Returns `None` unless [`EpisodeForm::is_complete`] holds, so a
    /// frozen record always carries nine non-empty values.
    pub fn freeze(&self) -> Option<EpisodeInputs> {
        if !self.is_complete() {
            return None;
        }
        Some(EpisodeInputs {
            specialization: self.specialization?.label().to_string(),
            host_name: self.host_name.trim().to_string(),
            host_role: self.host_role.trim().to_string(),
            guest_name: self.guest_name.trim().to_string(),
            guest_hit: self.guest_hit.trim().to_string(),
            episode_title: self.episode_title.trim().to_string(),
            section1: self.section1.trim().to_string(),
            section2: self.section2.trim().to_string(),
            section3: self.section3.trim().to_string(),
        })
    }
}

/// The episode metadata record, immutable once produced.
///
/// Only [`EpisodeForm::freeze`] constructs this, so every field is
/// guaranteed non-empty. The record drives prompt construction and is
/// embedded verbatim in the JSON export.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EpisodeInputs {
    pub specialization: String,
    pub host_name: String,
    pub host_role: String,
    pub guest_name: String,
    pub guest_hit: String,
    pub episode_title: String,
    pub section1: String,
    pub section2: String,
    pub section3: String,
}

/// One titled block of a parsed outline with its discussion prompts.
///
/// Sections are derived from the raw outline text on every render; they
/// are never mutated or persisted independently. A section with no items
/// is valid and round-trips through rendering and export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    /// The section heading, bold markers already stripped.
    pub title: String,
    /// Discussion prompts in appearance order, numbering stripped.
    pub items: Vec<String>,
}

/// The full outline document written by the JSON exporter.
#[derive(Debug, Deserialize, Serialize)]
pub struct OutlineDocument {
    /// Generation date in `YYYY-MM-DD` format.
    pub generated_on: String,
    /// The frozen episode metadata the outline was generated from.
    pub episode: EpisodeInputs,
    /// Sections derived from the raw outline text at export time.
    pub sections: Vec<Section>,
    /// The generation service's response, verbatim.
    pub raw_outline: String,
}

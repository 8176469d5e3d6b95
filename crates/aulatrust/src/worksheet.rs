//! Worksheet section state for the UD3 trust-models unit.
//!
//! This module defines the per-session structured record that on-screen (or
//! file-based) form input is collected into: the S1 rating matrix, the S2
//! validation protocol, and the debate essay. The state is transient; it only
//! becomes durable when assembled into a document and written to the store.

use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three trust models compared throughout the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustModel {
    /// Institutional trust (trusted third parties, public authority).
    Institutional,
    /// Social trust (reputation, community norms).
    Social,
    /// Algorithmic trust (consensus rules, cryptography).
    Algorithmic,
}

impl TrustModel {
    /// All models, in the column order used by stored documents.
    pub const ALL: [Self; 3] = [Self::Institutional, Self::Social, Self::Algorithmic];

    /// Column label as it appears in stored documents.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Institutional => "Institucional",
            Self::Social => "Social",
            Self::Algorithmic => "Algorítmica",
        }
    }
}

impl std::fmt::Display for TrustModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the S1 comparative matrix: a legal function rated against
/// each trust model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// The legal function being rated.
    pub criterion: String,
    /// Ratings per model, in [`TrustModel::ALL`] order. The UI suggests a
    /// 1-5 scale but values are not constrained.
    pub scores: [i64; 3],
}

impl MatrixRow {
    /// Create a row from a label and three scores.
    #[must_use]
    pub fn new(criterion: impl Into<String>, scores: [i64; 3]) -> Self {
        Self {
            criterion: criterion.into(),
            scores,
        }
    }
}

/// State of the S1 comparative-matrix section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixState {
    /// Rated rows. Starts from the five standard legal functions; rows may
    /// be added or removed.
    pub rows: Vec<MatrixRow>,
    /// Free-text commentary (5-7 lines suggested).
    pub comment: String,
}

impl Default for MatrixState {
    fn default() -> Self {
        Self {
            rows: vec![
                MatrixRow::new("Identidad/Autenticidad", [5, 3, 3]),
                MatrixRow::new("Integridad del registro", [4, 2, 5]),
                MatrixRow::new("Trazabilidad/Historial", [3, 2, 5]),
                MatrixRow::new("Publicidad/Oponibilidad", [5, 3, 3]),
                MatrixRow::new("Gobernanza/Actualización", [4, 3, 4]),
            ],
            comment: String::new(),
        }
    }
}

impl MatrixState {
    /// Aggregate score per model (the profile behind the original's chart).
    #[must_use]
    pub fn totals(&self) -> [i64; 3] {
        let mut totals = [0i64; 3];
        for row in &self.rows {
            for (total, score) in totals.iter_mut().zip(row.scores.iter()) {
                *total += score;
            }
        }
        totals
    }
}

/// Per-model selections (protocol steps or flagged risks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelChoices {
    /// Choices for the institutional model.
    pub institutional: Vec<String>,
    /// Choices for the social model.
    pub social: Vec<String>,
    /// Choices for the algorithmic model.
    pub algorithmic: Vec<String>,
}

impl ModelChoices {
    /// Selections for one model.
    #[must_use]
    pub fn get(&self, model: TrustModel) -> &[String] {
        match model {
            TrustModel::Institutional => &self.institutional,
            TrustModel::Social => &self.social,
            TrustModel::Algorithmic => &self.algorithmic,
        }
    }
}

/// Typical validation-protocol steps for one trust model.
#[must_use]
pub fn step_catalog(model: TrustModel) -> &'static [&'static str] {
    match model {
        TrustModel::Institutional => &[
            "Identificación presencial/administrativa",
            "Revisión formal (legal/registral)",
            "Firma/fe pública",
            "Asiento y publicidad formal",
            "Recurso/impugnación",
        ],
        TrustModel::Social => &[
            "Verificación por pares/comunidad",
            "Historial/reputación del actor",
            "Garantías/escrow comunitario",
            "Moderación/mediación",
            "Sanción social/listas negras",
        ],
        TrustModel::Algorithmic => &[
            "Preparar transacción y firmar",
            "Propagar a la red",
            "Incluir en bloque (consenso)",
            "Confirmaciones/finalidad",
            "Ejecución automática (smart contract)",
        ],
    }
}

/// Typical risks for one trust model.
#[must_use]
pub fn risk_catalog(model: TrustModel) -> &'static [&'static str] {
    match model {
        TrustModel::Institutional => &["error humano", "corrupción", "retrasos/procedimiento"],
        TrustModel::Social => &["colusión", "astroturfing", "sesgos/comunidades cerradas"],
        TrustModel::Algorithmic => &[
            "bug/contrato",
            "clave comprometida",
            "captura de gobernanza",
        ],
    }
}

/// State of the S2 validation-protocol section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolState {
    /// The framing case this protocol is designed for.
    pub case: String,
    /// Selected validation steps per model.
    pub steps: ModelChoices,
    /// Flagged risks per model.
    pub risks: ModelChoices,
    /// Free-text synthesis of the hybrid protocol (6-8 lines suggested).
    pub synthesis: String,
}

impl Default for ProtocolState {
    fn default() -> Self {
        // Mirrors the original form defaults: first case, first three steps
        // of each catalog preselected, no risks flagged.
        let first3 = |model| {
            step_catalog(model)
                .iter()
                .take(3)
                .map(ToString::to_string)
                .collect()
        };
        Self {
            case: "Registro Civil".to_string(),
            steps: ModelChoices {
                institutional: first3(TrustModel::Institutional),
                social: first3(TrustModel::Social),
                algorithmic: first3(TrustModel::Algorithmic),
            },
            risks: ModelChoices::default(),
            synthesis: String::new(),
        }
    }
}

/// Initial stance in the "¿Code is Law?" debate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Yes, blockchain is a new form of law.
    Yes,
    /// No, it is not.
    No,
    /// It depends on the normative framing.
    #[default]
    Depends,
}

impl Stance {
    /// Label as it appears in stored documents.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Sí",
            Self::No => "No",
            Self::Depends => "Depende",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State of the debate-essay section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateState {
    /// Initial stance.
    pub stance: Stance,
    /// Thesis (1-2 sentences).
    pub thesis: String,
    /// Three supporting arguments.
    pub arguments: [String; 3],
    /// Counterargument to the chosen stance.
    pub counter: String,
    /// Final nuance / conditions.
    pub nuance: String,
}

/// The full per-session worksheet state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetState {
    /// S1 comparative matrix.
    pub matrix: MatrixState,
    /// S2 validation protocol.
    pub protocol: ProtocolState,
    /// Debate essay.
    pub debate: DebateState,
}

impl WorksheetState {
    /// Load worksheet state from a TOML file, merging it over the defaults.
    ///
    /// A partial file is fine: omitted sections and fields keep their
    /// default values, matching the original form's prefilled widgets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()
            .map_err(|err| Error::StateLoad(Box::new(err)))
    }

    /// Render the default state as a TOML template for students to edit.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (it should not for the
    /// default state).
    pub fn template() -> Result<String> {
        // figment only reads TOML, so the template goes through serde_json's
        // data model and is emitted manually per section.
        let state = Self::default();
        let json = serde_json::to_value(&state)?;
        Ok(toml_from_json(&json))
    }
}

/// A non-empty array whose elements are all tables.
///
/// An empty array is treated as a scalar so it renders as `[]` instead of
/// disappearing from the output.
fn is_table_array(items: &[serde_json::Value]) -> bool {
    !items.is_empty() && items.iter().all(serde_json::Value::is_object)
}

/// Minimal JSON-to-TOML rendering for the state template.
///
/// Only handles the shapes present in [`WorksheetState`]: tables of strings,
/// string arrays, integer arrays, and arrays of row tables.
fn toml_from_json(value: &serde_json::Value) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let Some(root) = value.as_object() else {
        return out;
    };
    for (section, body) in root {
        let _ = writeln!(out, "[{section}]");
        if let Some(table) = body.as_object() {
            for (key, field) in table {
                match field {
                    serde_json::Value::Array(items) if is_table_array(items) => {
                        // Arrays of tables are emitted after scalar keys.
                    }
                    serde_json::Value::Object(_) => {}
                    _ => {
                        // Includes empty arrays: `key = []` keeps the field
                        // explicit so it round-trips as empty, not default.
                        let _ = writeln!(out, "{key} = {field}");
                    }
                }
            }
            for (key, field) in table {
                if let Some(sub) = field.as_object() {
                    let _ = writeln!(out, "\n[{section}.{key}]");
                    for (k, v) in sub {
                        let _ = writeln!(out, "{k} = {v}");
                    }
                } else if let Some(items) = field.as_array() {
                    if is_table_array(items) {
                        for item in items {
                            let _ = writeln!(out, "\n[[{section}.{key}]]");
                            if let Some(row) = item.as_object() {
                                for (k, v) in row {
                                    let _ = writeln!(out, "{k} = {v}");
                                }
                            }
                        }
                    }
                }
            }
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_rows() {
        let matrix = MatrixState::default();
        assert_eq!(matrix.rows.len(), 5);
        assert_eq!(matrix.rows[0].criterion, "Identidad/Autenticidad");
        assert_eq!(matrix.rows[0].scores, [5, 3, 3]);
        assert!(matrix.comment.is_empty());
    }

    #[test]
    fn test_matrix_totals() {
        let matrix = MatrixState::default();
        assert_eq!(matrix.totals(), [21, 13, 20]);
    }

    #[test]
    fn test_matrix_totals_empty() {
        let matrix = MatrixState {
            rows: Vec::new(),
            comment: String::new(),
        };
        assert_eq!(matrix.totals(), [0, 0, 0]);
    }

    #[test]
    fn test_step_catalogs_have_five_entries() {
        for model in TrustModel::ALL {
            assert_eq!(step_catalog(model).len(), 5, "{model}");
            assert_eq!(risk_catalog(model).len(), 3, "{model}");
        }
    }

    #[test]
    fn test_protocol_default_preselects_three_steps() {
        let protocol = ProtocolState::default();
        assert_eq!(protocol.case, "Registro Civil");
        for model in TrustModel::ALL {
            assert_eq!(protocol.steps.get(model).len(), 3);
            assert!(protocol.risks.get(model).is_empty());
        }
        assert_eq!(
            protocol.steps.get(TrustModel::Algorithmic)[0],
            "Preparar transacción y firmar"
        );
    }

    #[test]
    fn test_stance_labels() {
        assert_eq!(Stance::Yes.label(), "Sí");
        assert_eq!(Stance::No.label(), "No");
        assert_eq!(Stance::default().label(), "Depende");
    }

    #[test]
    fn test_model_labels() {
        assert_eq!(TrustModel::Institutional.to_string(), "Institucional");
        assert_eq!(TrustModel::Algorithmic.to_string(), "Algorítmica");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let state = WorksheetState::load("/nonexistent/worksheet.toml").unwrap();
        assert_eq!(state, WorksheetState::default());
    }

    #[test]
    fn test_load_partial_file_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worksheet.toml");
        std::fs::write(
            &path,
            "[matrix]\ncomment = \"La integridad favorece lo algorítmico.\"\n\n[debate]\nstance = \"yes\"\n",
        )
        .unwrap();

        let state = WorksheetState::load(&path).unwrap();
        assert_eq!(state.matrix.comment, "La integridad favorece lo algorítmico.");
        assert_eq!(state.matrix.rows, MatrixState::default().rows);
        assert_eq!(state.debate.stance, Stance::Yes);
        assert_eq!(state.protocol, ProtocolState::default());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worksheet.toml");
        std::fs::write(&path, "[matrix\nbroken").unwrap();
        assert!(WorksheetState::load(&path).is_err());
    }

    #[test]
    fn test_rendered_state_keeps_empty_row_set() {
        let mut state = WorksheetState::default();
        state.matrix.rows.clear();

        let json = serde_json::to_value(&state).unwrap();
        let rendered = toml_from_json(&json);
        assert!(rendered.contains("rows = []"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worksheet.toml");
        std::fs::write(&path, rendered).unwrap();

        // An explicitly empty row set stays empty instead of reverting to
        // the five default rows.
        let back = WorksheetState::load(&path).unwrap();
        assert!(back.matrix.rows.is_empty());
    }

    #[test]
    fn test_template_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.toml");
        std::fs::write(&path, WorksheetState::template().unwrap()).unwrap();

        let state = WorksheetState::load(&path).unwrap();
        assert_eq!(state, WorksheetState::default());
    }
}

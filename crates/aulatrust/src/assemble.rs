//! Submission assembly.
//!
//! Pure, deterministic transformation from a worksheet section state plus a
//! creation timestamp into a markdown document body. No I/O happens here;
//! given the same snapshot and timestamp the output is byte-identical.
//!
//! Empty free-text fields and empty selections render as an explicit `—`
//! placeholder so the document structure is stable regardless of how much of
//! the worksheet was completed.

use std::fmt::Write;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::Folder;
use crate::worksheet::{DebateState, MatrixState, ProtocolState, TrustModel};

/// Placeholder written for empty fields and empty selections.
pub const PLACEHOLDER: &str = "—";

/// Timestamp format embedded in document names and bodies.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The worksheet sections that produce documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// S1 — comparative trust matrix.
    Matrix,
    /// S2 — validation protocol.
    Protocol,
    /// Debate essay.
    Debate,
    /// Reading guide (stored under materials).
    Reading,
}

impl Section {
    /// File-name prefix for documents of this section.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Matrix => "UD3_S1",
            Self::Protocol => "UD3_S2",
            Self::Debate => "UD3_Debate",
            Self::Reading => "UD3_lecturas",
        }
    }

    /// The folder documents of this section are stored in.
    #[must_use]
    pub fn folder(&self) -> Folder {
        match self {
            Self::Reading => Folder::Materials,
            _ => Folder::Submissions,
        }
    }

    /// Document name for this section at the given timestamp:
    /// `<prefix>_<YYYYMMDD_HHMMSS>.md`.
    #[must_use]
    pub fn document_name(&self, timestamp: &str) -> String {
        format!("{}_{timestamp}.md", self.prefix())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matrix => write!(f, "S1"),
            Self::Protocol => write!(f, "S2"),
            Self::Debate => write!(f, "Debate"),
            Self::Reading => write!(f, "Lecturas"),
        }
    }
}

/// Parse a stored document name into its section prefix and creation time.
///
/// # Errors
///
/// Returns [`Error::InvalidDocumentName`] if the name does not follow the
/// `<Prefix>_<YYYYMMDD_HHMMSS>.md` convention.
pub fn parse_document_name(name: &str) -> Result<(String, NaiveDateTime)> {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    let re = NAME_RE
        .get_or_init(|| Regex::new(r"^(.+)_(\d{8}_\d{6})\.md$").expect("Invalid name pattern"));

    let caps = re.captures(name).ok_or_else(|| Error::InvalidDocumentName {
        name: name.to_string(),
    })?;
    let stamp = NaiveDateTime::parse_from_str(&caps[2], TIMESTAMP_FORMAT).map_err(|_| {
        Error::InvalidDocumentName {
            name: name.to_string(),
        }
    })?;
    Ok((caps[1].to_string(), stamp))
}

/// A field's text, or the placeholder when blank.
fn text_or_placeholder(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() {
        PLACEHOLDER
    } else {
        text
    }
}

/// A comma-joined selection, or the placeholder when nothing is selected.
fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

/// Assemble the S1 comparative-matrix document body.
#[must_use]
pub fn matrix_body(state: &MatrixState, timestamp: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "# UD3 — Entrega S1 (Comparativa de confianza)\n");
    let _ = writeln!(body, "**Fecha:** {timestamp}\n");
    let _ = writeln!(body, "## Matriz (suma de puntuaciones)\n");

    // Delimited encoding of the rating table, one row per legal function.
    let _ = writeln!(body, "Función,Institucional,Social,Algorítmica");
    for row in &state.rows {
        let _ = writeln!(
            body,
            "{},{},{},{}",
            row.criterion, row.scores[0], row.scores[1], row.scores[2]
        );
    }

    let _ = writeln!(body, "\n## Comentario\n");
    let _ = writeln!(body, "{}", text_or_placeholder(&state.comment));
    body
}

/// Assemble the S2 validation-protocol document body.
#[must_use]
pub fn protocol_body(state: &ProtocolState, timestamp: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "# UD3 — Entrega S2 (Protocolo de validación)\n");
    let _ = writeln!(body, "**Fecha:** {timestamp}\n");
    let _ = writeln!(body, "**Caso:** {}\n", text_or_placeholder(&state.case));

    let _ = writeln!(body, "## Pasos seleccionados\n");
    for model in TrustModel::ALL {
        let _ = writeln!(
            body,
            "- {model}: {}",
            join_or_placeholder(state.steps.get(model))
        );
    }

    let _ = writeln!(body, "\n## Riesgos señalados\n");
    for model in TrustModel::ALL {
        let _ = writeln!(
            body,
            "- {model}: {}",
            join_or_placeholder(state.risks.get(model))
        );
    }

    let _ = writeln!(body, "\n## Síntesis\n");
    let _ = writeln!(body, "{}", text_or_placeholder(&state.synthesis));
    body
}

/// Assemble the debate-essay document body.
#[must_use]
pub fn debate_body(state: &DebateState, timestamp: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "# UD3 — Debate: ¿Blockchain = nueva forma de Derecho?\n");
    let _ = writeln!(body, "**Fecha:** {timestamp}\n");
    let _ = writeln!(body, "**Postura inicial:** {}\n", state.stance);

    let _ = writeln!(body, "## Tesis\n");
    let _ = writeln!(body, "{}\n", text_or_placeholder(&state.thesis));

    let _ = writeln!(body, "## Argumentos\n");
    for argument in &state.arguments {
        let _ = writeln!(body, "- {}", text_or_placeholder(argument));
    }

    let _ = writeln!(body, "\n## Contraargumento\n");
    let _ = writeln!(body, "{}\n", text_or_placeholder(&state.counter));

    let _ = writeln!(body, "## Matiz final\n");
    let _ = writeln!(body, "{}", text_or_placeholder(&state.nuance));
    body
}

/// Assemble the reading-guide document body.
///
/// The guide is fixed didactic content; it carries no timestamp in its body
/// (the creation time lives in the file name, as in the original handout).
#[must_use]
pub fn reading_guide_body() -> String {
    "# Guía de lectura — UD3

## De Filippi (2018): Blockchain and the Law
- Ejes: gobernanza del protocolo, lex cryptographica, encaje con ordenamiento.
- Foco UD3: cambio de paradigma en validación (institucional/social → algorítmica) y límites.

## Preguntas guía
1) ¿Qué funciones jurídicas pasa a ejecutar el código?
2) ¿Cómo se distribuye la responsabilidad en redes sin TTP?
3) ¿Qué requiere la oponibilidad/efectos frente a terceros?
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::{MatrixRow, Stance, WorksheetState};

    const TS: &str = "20250101_120000";

    #[test]
    fn test_section_document_names() {
        assert_eq!(
            Section::Matrix.document_name(TS),
            "UD3_S1_20250101_120000.md"
        );
        assert_eq!(
            Section::Debate.document_name(TS),
            "UD3_Debate_20250101_120000.md"
        );
        assert_eq!(
            Section::Reading.document_name(TS),
            "UD3_lecturas_20250101_120000.md"
        );
    }

    #[test]
    fn test_section_folders() {
        assert_eq!(Section::Matrix.folder(), Folder::Submissions);
        assert_eq!(Section::Protocol.folder(), Folder::Submissions);
        assert_eq!(Section::Debate.folder(), Folder::Submissions);
        assert_eq!(Section::Reading.folder(), Folder::Materials);
    }

    #[test]
    fn test_parse_document_name() {
        let (prefix, stamp) = parse_document_name("UD3_S1_20250101_120000.md").unwrap();
        assert_eq!(prefix, "UD3_S1");
        assert_eq!(
            stamp.format(TIMESTAMP_FORMAT).to_string(),
            "20250101_120000"
        );
    }

    #[test]
    fn test_parse_document_name_rejects_strays() {
        assert!(parse_document_name("notas.md").is_err());
        assert!(parse_document_name("UD3_S1_2025_bad.md").is_err());
        assert!(parse_document_name("UD3_S1_20250101_120000.txt").is_err());
        // Calendar-impossible stamps fail the chrono parse.
        assert!(parse_document_name("UD3_S1_20251399_256161.md").is_err());
    }

    #[test]
    fn test_matrix_body_is_deterministic() {
        let state = WorksheetState::default().matrix;
        assert_eq!(matrix_body(&state, TS), matrix_body(&state, TS));
    }

    #[test]
    fn test_matrix_body_structure() {
        let state = MatrixState {
            rows: vec![MatrixRow::new("Identidad/Autenticidad", [5, 3, 3])],
            comment: String::new(),
        };
        let body = matrix_body(&state, TS);

        assert!(body.starts_with("# UD3 — Entrega S1 (Comparativa de confianza)\n"));
        assert!(body.contains("**Fecha:** 20250101_120000"));
        assert!(body.contains("Función,Institucional,Social,Algorítmica\n"));
        assert!(body.contains("Identidad/Autenticidad,5,3,3\n"));
        // Empty comment renders the placeholder, not an omitted section.
        assert!(body.contains("## Comentario\n\n—\n"));
    }

    #[test]
    fn test_matrix_body_keeps_comment_text() {
        let state = MatrixState {
            comment: "  La integridad favorece lo algorítmico.  ".to_string(),
            ..MatrixState::default()
        };
        let body = matrix_body(&state, TS);
        assert!(body.ends_with("## Comentario\n\nLa integridad favorece lo algorítmico.\n"));
    }

    #[test]
    fn test_protocol_body_structure() {
        let state = ProtocolState::default();
        let body = protocol_body(&state, TS);

        assert!(body.starts_with("# UD3 — Entrega S2 (Protocolo de validación)\n"));
        assert!(body.contains("**Caso:** Registro Civil"));
        assert!(body.contains(
            "- Institucional: Identificación presencial/administrativa, \
             Revisión formal (legal/registral), Firma/fe pública"
        ));
        // No risks flagged by default: every risk line is a placeholder.
        assert!(body.contains("## Riesgos señalados\n\n- Institucional: —\n- Social: —\n- Algorítmica: —\n"));
        assert!(body.ends_with("## Síntesis\n\n—\n"));
    }

    #[test]
    fn test_debate_body_structure() {
        let state = DebateState {
            stance: Stance::No,
            thesis: "El código carece de jurisdicción.".to_string(),
            arguments: [
                "Sin legitimidad democrática.".to_string(),
                String::new(),
                String::new(),
            ],
            counter: String::new(),
            nuance: String::new(),
        };
        let body = debate_body(&state, TS);

        assert!(body.contains("**Postura inicial:** No"));
        assert!(body.contains("## Tesis\n\nEl código carece de jurisdicción.\n"));
        assert!(body.contains("- Sin legitimidad democrática.\n- —\n- —\n"));
        assert!(body.contains("## Contraargumento\n\n—\n"));
        assert!(body.ends_with("## Matiz final\n\n—\n"));
    }

    #[test]
    fn test_reading_guide_is_fixed() {
        let body = reading_guide_body();
        assert!(body.starts_with("# Guía de lectura — UD3\n"));
        assert!(body.contains("lex cryptographica"));
        assert_eq!(body, reading_guide_body());
    }
}

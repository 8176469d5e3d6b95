//! Case-reference lookup table.
//!
//! A small, immutable set of framing cases (case name → description) used by
//! the theory and protocol sections. The table is loaded once at startup
//! from an optional CSV file and falls back to a built-in default set when
//! the file is absent or malformed. Loading never fails: a broken file is a
//! warning, not an error.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

/// One framing case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    /// Case name, used as the lookup key.
    pub name: String,
    /// Short description of the case.
    pub description: String,
}

/// Immutable case-reference table.
///
/// Built once at startup and passed by reference wherever needed; there is
/// no process-wide singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseTable {
    cases: Vec<Case>,
}

impl CaseTable {
    /// The built-in default cases.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            cases: vec![
                Case {
                    name: "Registro Civil".to_string(),
                    description: "Actos de estado civil bajo fe pública y procedimiento legal."
                        .to_string(),
                },
                Case {
                    name: "Marketplace entre particulares".to_string(),
                    description: "Transacciones P2P basadas en reputación y reseñas.".to_string(),
                },
                Case {
                    name: "Cadena de suministros (food trust)".to_string(),
                    description:
                        "Trazabilidad de origen y transformación con registros compartidos."
                            .to_string(),
                },
                Case {
                    name: "DAO de inversión".to_string(),
                    description: "Decisiones por voto on-chain y tesorería multifirma.".to_string(),
                },
            ],
        }
    }

    /// Load the table from a two-column CSV (`caso,descripcion`).
    ///
    /// An optional header row is tolerated. Absence of the file, an I/O
    /// failure, a malformed row, or an empty file all fall back to
    /// [`CaseTable::builtin`]; this function never returns an error.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match parse_csv(&raw) {
                Some(cases) => {
                    debug!("Loaded {} cases from {}", cases.len(), path.display());
                    Self { cases }
                }
                None => {
                    warn!(
                        "Case file {} is malformed, using built-in cases",
                        path.display()
                    );
                    Self::builtin()
                }
            },
            Err(err) => {
                debug!(
                    "Case file {} not readable ({err}), using built-in cases",
                    path.display()
                );
                Self::builtin()
            }
        }
    }

    /// Look up a case description by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// All case names, in file order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name.as_str()).collect()
    }

    /// All cases, in file order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the table is empty (never true for the built-in table).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Parse the two-column case CSV.
///
/// Each data line is split on the first comma; fields may be wrapped in
/// double quotes. Returns `None` when any line has fewer than two columns
/// or no data rows remain.
fn parse_csv(raw: &str) -> Option<Vec<Case>> {
    let mut cases = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, description) = line.split_once(',')?;
        let name = unquote(name);
        let description = unquote(description);
        // Header row, if present, is only accepted as the first line.
        if idx == 0 && name.eq_ignore_ascii_case("caso") {
            continue;
        }
        if name.is_empty() {
            return None;
        }
        cases.push(Case {
            name: name.to_string(),
            description: description.to_string(),
        });
    }
    if cases.is_empty() {
        None
    } else {
        Some(cases)
    }
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_four_cases() {
        let table = CaseTable::builtin();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.names(),
            vec![
                "Registro Civil",
                "Marketplace entre particulares",
                "Cadena de suministros (food trust)",
                "DAO de inversión"
            ]
        );
    }

    #[test]
    fn test_builtin_lookup() {
        let table = CaseTable::builtin();
        let case = table.get("DAO de inversión").unwrap();
        assert_eq!(
            case.description,
            "Decisiones por voto on-chain y tesorería multifirma."
        );
        assert!(table.get("Caso inexistente").is_none());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let table = CaseTable::load("/nonexistent/trust_cases.csv");
        assert_eq!(table, CaseTable::builtin());
    }

    #[test]
    fn test_load_csv_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trust_cases.csv");
        std::fs::write(
            &path,
            "caso,descripcion\nNotariado digital,Actos con firma electrónica cualificada.\n",
        )
        .unwrap();

        let table = CaseTable::load(&path);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("Notariado digital").unwrap().description,
            "Actos con firma electrónica cualificada."
        );
    }

    #[test]
    fn test_load_csv_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trust_cases.csv");
        std::fs::write(&path, "Subastas públicas,Adjudicación con publicidad formal.\n").unwrap();

        let table = CaseTable::load(&path);
        assert_eq!(table.names(), vec!["Subastas públicas"]);
    }

    #[test]
    fn test_load_quoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trust_cases.csv");
        std::fs::write(
            &path,
            "caso,descripcion\n\"Registro mercantil\",\"Inscripción, con calificación previa.\"\n",
        )
        .unwrap();

        let table = CaseTable::load(&path);
        let case = table.get("Registro mercantil").unwrap();
        assert_eq!(case.description, "Inscripción, con calificación previa.");
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trust_cases.csv");
        std::fs::write(&path, "una sola columna sin separador\n").unwrap();

        assert_eq!(CaseTable::load(&path), CaseTable::builtin());
    }

    #[test]
    fn test_load_empty_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trust_cases.csv");
        std::fs::write(&path, "").unwrap();

        assert_eq!(CaseTable::load(&path), CaseTable::builtin());
    }
}

//! Worksheet controller.
//!
//! Orchestrates the submission lifecycle: stamps the clock, hands the
//! section state to the matching assembler, writes the result through the
//! document store, and exposes the browse/export/delete operations the
//! deliverables view needs. Rendering of the worksheet itself is the host's
//! concern; nothing here produces UI.

use chrono::Local;
use tracing::debug;

use crate::assemble::{self, Section, TIMESTAMP_FORMAT};
use crate::cases::CaseTable;
use crate::config::Config;
use crate::error::Result;
use crate::store::{DocumentStore, Folder};
use crate::worksheet::WorksheetState;

/// Content type for single-document downloads.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// Content type for folder archives.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// A document created by a save action, returned for immediate re-download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    /// Folder the document was stored in.
    pub folder: Folder,
    /// File name under that folder.
    pub name: String,
    /// The stored body.
    pub body: String,
}

/// A downloadable byte stream with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name for the download.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: &'static str,
    /// The payload.
    pub bytes: Vec<u8>,
}

/// The worksheet's non-UI orchestration layer.
#[derive(Debug, Clone)]
pub struct Worksheet {
    store: DocumentStore,
    cases: CaseTable,
}

impl Worksheet {
    /// Build a worksheet from configuration.
    ///
    /// Loads the case table once; a missing or broken case file silently
    /// falls back to the built-in cases.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            store: DocumentStore::new(config.base_dir()),
            cases: CaseTable::load(config.cases_path()),
        }
    }

    /// The underlying document store.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The case-reference table.
    #[must_use]
    pub fn cases(&self) -> &CaseTable {
        &self.cases
    }

    /// Save a section of the worksheet, stamping the process-local clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written. The caller
    /// surfaces this as an inline notice; it is never fatal.
    pub fn save(&self, section: Section, state: &WorksheetState) -> Result<SavedDocument> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.save_at(section, state, &stamp)
    }

    /// Save a section with an explicit timestamp.
    ///
    /// Two saves of the same section within the same second target the same
    /// file name; the last write wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_at(
        &self,
        section: Section,
        state: &WorksheetState,
        timestamp: &str,
    ) -> Result<SavedDocument> {
        let body = match section {
            Section::Matrix => assemble::matrix_body(&state.matrix, timestamp),
            Section::Protocol => assemble::protocol_body(&state.protocol, timestamp),
            Section::Debate => assemble::debate_body(&state.debate, timestamp),
            Section::Reading => assemble::reading_guide_body(),
        };

        let folder = section.folder();
        let name = section.document_name(timestamp);
        debug!("Saving {section} as {folder}/{name}");
        self.store.write(folder, &name, &body)?;

        Ok(SavedDocument { folder, name, body })
    }

    /// Delete all submissions, gated on an explicit confirmation.
    ///
    /// With `confirmed == false` nothing is touched and 0 is returned; the
    /// UI gates this on the student acknowledging they downloaded their
    /// work. The deletion is best effort and irreversible.
    #[must_use]
    pub fn delete_all_submissions(&self, confirmed: bool) -> usize {
        if !confirmed {
            debug!("Bulk delete requested without confirmation, ignoring");
            return 0;
        }
        self.store.delete_all(Folder::Submissions)
    }

    /// Prepare a single document for download.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is absent or unreadable.
    pub fn export_document(&self, folder: Folder, name: &str) -> Result<Download> {
        let text = self.store.read(folder, name)?;
        Ok(Download {
            filename: name.to_string(),
            content_type: MARKDOWN_CONTENT_TYPE,
            bytes: text.into_bytes(),
        })
    }

    /// Prepare a folder's bulk archive for download.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be assembled.
    pub fn export_archive(&self, folder: Folder) -> Result<Download> {
        let bytes = self.store.archive(folder)?;
        Ok(Download {
            filename: folder.archive_name().to_string(),
            content_type: ZIP_CONTENT_TYPE,
            bytes,
        })
    }
}

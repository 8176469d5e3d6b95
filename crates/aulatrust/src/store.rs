//! Document store.
//!
//! Filesystem-backed storage for the worksheet's durable text documents.
//! Two flat folders live under a base directory: `entregas` for student
//! submissions and `materiales` for reading guides. Only files with the
//! `.md` extension are recognized as documents; anything else in the folders
//! is ignored and never touched.
//!
//! There is no locking: each write targets a freshly timestamp-named file,
//! so concurrent sessions tolerate each other and same-second collisions
//! resolve to last-write-wins.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Recognized document extension.
pub const DOCUMENT_EXTENSION: &str = "md";

/// The two durable document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    /// Student submissions (`entregas`).
    Submissions,
    /// Reading guides and other handouts (`materiales`).
    Materials,
}

impl Folder {
    /// On-disk directory name. Part of the storage contract; matches the
    /// layout the course server already uses.
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Submissions => "entregas",
            Self::Materials => "materiales",
        }
    }

    /// Default file name for this folder's bulk archive.
    #[must_use]
    pub fn archive_name(&self) -> &'static str {
        match self {
            Self::Submissions => "entregas_ud3.zip",
            Self::Materials => "materiales_ud3.zip",
        }
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Filesystem-backed document store.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Base directory holding the document folders.
    base: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at the given base directory.
    ///
    /// Nothing is created eagerly; folders appear on first write.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Absolute-or-relative path of a folder under the base directory.
    #[must_use]
    pub fn folder_path(&self, folder: Folder) -> PathBuf {
        self.base.join(folder.dir_name())
    }

    /// Path of a named document inside a folder.
    #[must_use]
    pub fn document_path(&self, folder: Folder, name: &str) -> PathBuf {
        self.folder_path(folder).join(name)
    }

    /// List recognized documents in a folder, lexicographically sorted.
    ///
    /// An absent or unreadable folder yields an empty list, never an error.
    #[must_use]
    pub fn list(&self, folder: Folder) -> Vec<String> {
        let dir = self.folder_path(folder);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            debug!("Folder {} absent, listing nothing", dir.display());
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_document(name))
            .collect();
        names.sort();
        names
    }

    /// Read a document's text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] when the document is absent and
    /// [`Error::DocumentRead`] on any other read failure.
    pub fn read(&self, folder: Folder, name: &str) -> Result<String> {
        let path = self.document_path(folder, name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::document_not_found(folder.dir_name(), name)
            } else {
                Error::DocumentRead { path, source }
            }
        })
    }

    /// Write a document, creating the folder if needed.
    ///
    /// Overwrites silently if the name already exists (last write wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created or the write fails.
    /// Failures are reported to the caller and not retried.
    pub fn write(&self, folder: Folder, name: &str, text: &str) -> Result<()> {
        let dir = self.folder_path(folder);
        std::fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreate {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(name);
        std::fs::write(&path, text).map_err(|source| Error::DocumentWrite {
            path: path.clone(),
            source,
        })?;
        info!("Stored document {}", path.display());
        Ok(())
    }

    /// Delete every recognized document in a folder, best effort.
    ///
    /// Returns the number of documents actually removed. An individual
    /// removal failure is logged and skipped rather than aborting the
    /// operation. Non-document files are left untouched.
    #[must_use]
    pub fn delete_all(&self, folder: Folder) -> usize {
        let mut removed = 0;
        for name in self.list(folder) {
            let path = self.document_path(folder, &name);
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(err) => warn!("Could not remove {}: {err}", path.display()),
            }
        }
        info!("Removed {removed} document(s) from {folder}");
        removed
    }

    /// Build an in-memory deflate ZIP of every recognized document in a
    /// folder, each entry named by its file name. An empty folder yields a
    /// valid empty archive.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be read or the archive cannot
    /// be assembled.
    pub fn archive(&self, folder: Folder) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for name in self.list(folder) {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            let text = self.read(folder, &name)?;
            writer.start_file(name.as_str(), options)?;
            writer.write_all(text.as_bytes()).map_err(|source| {
                Error::DocumentRead {
                    path: self.document_path(folder, &name),
                    source,
                }
            })?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Whether a file name is a recognized document.
fn is_document(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
}

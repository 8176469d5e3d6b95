//! `aulatrust` - Submission lifecycle manager for the UD3 trust-models worksheet
//!
//! This library provides the non-UI core of an educational worksheet on
//! distributed trust models (institutional, social, algorithmic): structured
//! section state, deterministic assembly of submission documents, a
//! filesystem-backed document store, and the controller that wires them
//! together for save, export, archive, and bulk-delete actions.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assemble;
pub mod cases;
pub mod cli;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod logging;
pub mod store;
pub mod worksheet;

pub use assemble::Section;
pub use cases::CaseTable;
pub use config::Config;
pub use controller::{Download, SavedDocument, Worksheet};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::{DocumentStore, Folder};
pub use worksheet::WorksheetState;

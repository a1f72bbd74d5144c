//! Template module - business logic for generating finished .pptx decks
//! from placeholder templates.
//!
//! The engine performs literal token substitution over the slide parts of a
//! deck (`{{COMPANY_NAME}}`, `{{DATE_LONG}}`, `{{LOGO}}`) and optionally
//! stores a logo image into the archive's media area.

pub mod common;
pub mod engine;
pub mod validation;


pub use engine::{generate, process};

use thiserror::Error;

use crate::archive::ArchiveError;

/// Errors that can occur during template processing.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("slide substitution task failed: {0}")]
    TaskJoin(String),
}

/// Substitution values for one request. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct TemplateParams {
    pub company_name: String,
    pub date_long: String,
    pub logo: Option<Vec<u8>>,
}

/// Result of a successful deck generation.
#[derive(Debug)]
pub struct GeneratedDeck {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub date_long: String,
}

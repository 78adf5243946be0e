//! Error types for the editor

use thiserror::Error;

/// Internal edit failures.
///
/// These never escape a public reducer operation: the reducer converts
/// `SectionLocked` into a policy rejection surfaced on the save status,
/// and everything else into a silent no-op (treated as a race between the
/// UI and the state, not a fault).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Content item not found: {0}")]
    ItemNotFound(String),

    #[error("Line not found: {0}")]
    LineNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Section is locked: {0}")]
    SectionLocked(String),

    #[error("Item is not a {0} item")]
    WrongItemKind(&'static str),
}

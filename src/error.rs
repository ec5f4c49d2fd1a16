//! Error types for hdoc operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, expanding or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid entity reference: {0}")]
    Entity(#[from] quick_xml::escape::EscapeError),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("reference to undefined term `{tag}-{term}`")]
    UndefinedReference { tag: String, term: String },

    #[error("`{tag}-{term}` is referenced inside its own definition")]
    RecursiveReference { tag: String, term: String },
}

pub type Result<T> = std::result::Result<T, Error>;

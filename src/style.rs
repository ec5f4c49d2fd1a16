//! Style documents.
//!
//! A style document is an (X)HTML template that will eventually carry the
//! house styles applied to expanded output. For now it is only loaded and
//! validated; the source document is written out unchanged by it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dom::{self, ArenaDom};
use crate::error::{Error, Result};

/// Style document used when none is given on the command line.
pub const DEFAULT_STYLE_PATH: &str = "data/styles/default.html";

/// A parsed style document.
#[derive(Debug)]
pub struct StyleDocument {
    path: PathBuf,
    dom: ArenaDom,
}

impl StyleDocument {
    /// Read and parse a style document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dom = dom::parse_xml(&dom::decode_source(&bytes))?;
        debug!(path = %path.display(), nodes = dom.len(), "loaded style document");
        Ok(Self {
            path: path.to_path_buf(),
            dom,
        })
    }

    /// Load the style for a run.
    ///
    /// An explicit path must load. Without one the default path is tried and
    /// a missing file only produces a warning.
    pub fn resolve(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        let default = Path::new(DEFAULT_STYLE_PATH);
        if !default.exists() {
            warn!(path = DEFAULT_STYLE_PATH, "default style document not found, continuing without it");
            return Ok(None);
        }
        Self::load(default).map(Some)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// Local name of the root element, if the document has one.
    pub fn root_tag(&self) -> Option<&str> {
        self.dom
            .root_element()
            .and_then(|root| self.dom.local_name(root))
    }
}

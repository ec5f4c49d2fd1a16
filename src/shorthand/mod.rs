//! Definition and reference expansion for `dfn` and `abbr` shorthand.
//!
//! A marker element with content defines a term. A later empty marker with the
//! same tag and term is a reference and gets a copy of the defined content:
//!
//! ```text
//! <dfn>Widget</dfn> ... <dfn w="Widget"/>
//!   => <dfn id="dfn-Widget">Widget</dfn> ... <a href="#dfn-Widget" class="dfn">Widget</a>
//!
//! <abbr title="HTML">HyperText Markup Language</abbr> ... <abbr w="HyperText Markup Language"/>
//!   => ... <abbr title="HTML">HyperText Markup Language</abbr>
//! ```
//!
//! The term of a marker is its normalized inner text unless the term
//! attribute (`w` by default) supplies one. Only unqualified elements are
//! markers; `svg:dfn` and foreign-content `dfn` are left alone.

pub mod attrs;
mod classify;
mod registry;
mod resolve;
pub mod text;

pub use classify::{Classification, Marker, classify};
pub use registry::{Registry, TermKey};
pub use resolve::{ExpandReport, expand};

/// Knobs for the expansion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Attribute carrying an explicit term; removed from the output.
    pub term_attribute: String,
    /// Tag that `dfn` references are renamed to.
    pub link_tag: String,
    /// Class token added to rewritten `dfn` references.
    pub link_class: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            term_attribute: "w".to_string(),
            link_tag: "a".to_string(),
            link_class: "dfn".to_string(),
        }
    }
}

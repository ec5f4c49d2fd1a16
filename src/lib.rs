//! # hdoc
//!
//! A small HTML shorthand preprocessor. Write a term once inside `<dfn>` or
//! `<abbr>`, then refer to it with an empty marker; hdoc fills the reference in.
//!
//! ## Quick Start
//!
//! ```
//! use hdoc::{ExpandOptions, Syntax, process};
//!
//! let source = r#"<p><dfn>Widget</dfn> ... every <dfn w="Widget"/> ships boxed.</p>"#;
//! let output = process(source, Syntax::Xml, &ExpandOptions::default()).unwrap();
//!
//! assert_eq!(
//!     output,
//!     r##"<p><dfn id="dfn-Widget">Widget</dfn> ... every <a href="#dfn-Widget" class="dfn">Widget</a> ships boxed.</p>"##
//! );
//! ```
//!
//! ## Markers
//!
//! - A `dfn` or `abbr` element with content is a **definition**. Its term is
//!   the whitespace-normalized text, or the `w` attribute when present.
//!   Definitions of `dfn` get an `id` such as `dfn-Widget`.
//! - An empty `dfn` or `abbr` is a **reference** to the definition with the
//!   same tag and term. `dfn` references become `<a href="#id" class="dfn">`
//!   links, `abbr` references copy the definition's `title`.
//! - A reference to a term that has not been defined yet is an error.
//!
//! Lower-level access is available through [`dom`] (parsing and
//! serialization) and [`shorthand`] (the expansion pass itself).

pub mod dom;
pub mod error;
pub mod shorthand;
pub mod style;
pub(crate) mod util;

pub use error::{Error, Result};
pub use shorthand::{ExpandOptions, ExpandReport, expand};
pub use dom::Syntax;
pub use style::StyleDocument;

use tracing::info;

/// Parse a document.
pub fn parse(source: &str, syntax: Syntax) -> Result<dom::ArenaDom> {
    match syntax {
        Syntax::Xml => dom::parse_xml(source),
        Syntax::Html => Ok(dom::parse_html(source)),
    }
}

/// Parse, expand and serialize a document.
///
/// Nothing is returned unless the whole pass succeeds.
pub fn process(source: &str, syntax: Syntax, options: &ExpandOptions) -> Result<String> {
    let mut document = parse(source, syntax)?;
    let report = expand(&mut document, options)?;
    info!(
        definitions = report.definitions,
        references = report.references,
        "expanded shorthand"
    );
    Ok(dom::to_string(&document, syntax))
}

//! Frontend-agnostic parser traits

use crate::ast::Declaration;
use anyhow::Result;

/// Frontend-agnostic parser interface
///
/// Each supported language must implement this trait to parse one
/// translation unit into a ParsedUnit representation. Any frontend able to
/// report, per declaration, body-presence, an unqualified name, and a
/// physical line span can be substituted without touching extraction logic.
pub trait LanguageParser {
    /// Parse source code into a translation unit
    ///
    /// # Arguments
    ///
    /// * `source` - The source code to parse
    /// * `filename` - The name of the file being parsed (for error messages)
    ///
    /// # Returns
    ///
    /// A boxed ParsedUnit trait object that can enumerate declarations
    fn parse(&self, source: &str, filename: &str) -> Result<Box<dyn ParsedUnit>>;
}

/// Parsed translation unit interface
///
/// Represents one parsed source file whose declarations can be enumerated.
/// This abstraction allows different frontends to produce a common
/// representation.
pub trait ParsedUnit {
    /// Enumerate every function-like declaration in this unit
    ///
    /// Returns declarations in depth-first traversal order from the
    /// translation-unit root. Declarations nested in namespaces, classes,
    /// or templates are all in scope; prototypes are included with
    /// `has_body == false` so that the extractor's filter, not the
    /// traversal, decides what is recorded.
    fn declarations(&self) -> Vec<Declaration>;
}

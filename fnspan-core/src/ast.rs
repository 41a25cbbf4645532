//! Declaration adapter layer between providers and the extractor
//!
//! Global invariants enforced:
//! - Providers yield declarations in depth-first traversal order
//! - Formatting, comments, and whitespace must not affect results

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// Stable abstraction for a function-like declaration in the syntax tree
///
/// A provider yields one of these for every function-like declaration it
/// reaches, whether or not a body is attached. The extractor's filter, not
/// the provider's traversal, decides which of them become records.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Declared identifier, unqualified. `None` when the provider cannot
    /// resolve one (unnamed or synthetic declarations).
    pub name: Option<String>,
    /// Whether a body is attached (definition vs. prototype)
    pub has_body: bool,
    /// Extent of the declaration, first token to last token
    pub span: SourceSpan,
}

impl Declaration {
    /// A declaration qualifies for a record iff it is a definition
    pub fn is_definition(&self) -> bool {
        self.has_body
    }
}

/// One extracted function definition
///
/// Constructed transiently when a definition is visited, serialized
/// immediately by the sink, then discarded. There is no identity beyond the
/// serialized text and no update or deletion path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FunctionRecord {
    /// Identifier as spelled in source, without qualification or parameter
    /// types. Empty for unnamed declarations.
    pub name: String,
    /// 1-based physical line of the definition's first token
    pub start_line: u32,
    /// 1-based physical line of the definition's last token
    pub end_line: u32,
}

impl FunctionRecord {
    /// Build a record from a qualifying declaration
    pub fn from_declaration(decl: &Declaration) -> Self {
        FunctionRecord {
            name: decl.name.clone().unwrap_or_default(),
            start_line: decl.span.start_line,
            end_line: decl.span.end_line,
        }
    }
}

//! C++ language provider using tree-sitter
//!
//! Handles member functions (inline and out-of-line), namespaces,
//! templates, overloads, destructors, and operators. Names are always the
//! unqualified spelling: `Widget::draw` is surfaced as `draw`.

use crate::ast::Declaration;
use crate::language::declarator::{declared_name, find_function_declarator};
use crate::parser::{LanguageParser, ParsedUnit};
use crate::span::SourceSpan;
use anyhow::{Context, Result};
use tree_sitter::{Node, Parser, Tree};

/// C++ parser using tree-sitter
pub struct CppParser;

impl CppParser {
    /// Create a new C++ parser
    pub fn new() -> Result<Self> {
        // Just validate that we can create a parser
        let mut parser = Parser::new();
        let language = tree_sitter_cpp::LANGUAGE;
        parser
            .set_language(&language.into())
            .context("Failed to set C++ language for parser")?;
        Ok(CppParser)
    }
}

impl Default for CppParser {
    fn default() -> Self {
        Self::new().expect("Failed to create C++ parser")
    }
}

impl LanguageParser for CppParser {
    fn parse(&self, source: &str, filename: &str) -> Result<Box<dyn ParsedUnit>> {
        let mut parser = Parser::new();
        let language = tree_sitter_cpp::LANGUAGE;
        parser
            .set_language(&language.into())
            .context("Failed to set C++ language")?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse C++ file: {}", filename))?;

        Ok(Box::new(CppUnit {
            tree,
            source: source.to_string(),
        }))
    }
}

/// Parsed C++ translation unit
struct CppUnit {
    tree: Tree,
    source: String,
}

impl ParsedUnit for CppUnit {
    fn declarations(&self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        collect_declarations(self.tree.root_node(), &self.source, &mut declarations);
        declarations
    }
}

/// Depth-first walk collecting every function-like declaration
///
/// `function_definition` nodes carry a body. Prototypes appear as
/// `declaration` nodes at namespace scope and as `field_declaration` nodes
/// inside a class body; both are surfaced with `has_body == false`.
/// Recursion reaches definitions nested in namespaces, classes, and
/// template declarations.
fn collect_declarations(node: Node, source: &str, declarations: &mut Vec<Declaration>) {
    match node.kind() {
        "function_definition" => {
            if let Some(decl) = definition_declaration(node, source) {
                declarations.push(decl);
            }
        }
        "declaration" | "field_declaration" => {
            prototype_declarations(node, source, declarations);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_declarations(child, source, declarations);
    }
}

/// Build the Declaration for a `function_definition` node
///
/// The span covers the definition itself; for an inline member function
/// that is the method alone, never the enclosing class.
fn definition_declaration(node: Node, source: &str) -> Option<Declaration> {
    let declarator = node.child_by_field_name("declarator")?;
    let name = find_function_declarator(declarator).and_then(|fd| declared_name(fd, source));

    Some(Declaration {
        name,
        has_body: true,
        span: SourceSpan::from(node),
    })
}

/// Surface prototypes found under a `declaration` or `field_declaration`
///
/// Member-function declarations inside a class body and free-function
/// prototypes both land here. Function-pointer declarators resolve to no
/// name and are skipped.
fn prototype_declarations(node: Node, source: &str, declarations: &mut Vec<Declaration>) {
    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        let Some(fd) = find_function_declarator(declarator) else {
            continue;
        };
        let Some(name) = declared_name(fd, source) else {
            continue;
        };
        declarations.push(Declaration {
            name: Some(name),
            has_body: false,
            span: SourceSpan::from(node),
        });
    }
}

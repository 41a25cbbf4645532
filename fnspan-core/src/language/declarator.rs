//! Declarator chain helpers shared by the C and C++ providers
//!
//! In the C family a declarator can wrap the function declarator in
//! several layers (`int *f()`, `int &f()` in C++, `int Foo::f()`), and the
//! declared identifier sits at the bottom of that chain. These helpers
//! unwrap the chain uniformly for both grammars; the C++-only node kinds
//! never occur in C trees and cost nothing there.

use tree_sitter::Node;

/// Locate the `function_declarator` under a declaration's declarator field
///
/// Unwraps pointer and reference declarators (pointer or reference return
/// types). A parenthesized declarator is deliberately not unwrapped: that
/// shape declares a function pointer variable, not a function.
pub fn find_function_declarator(mut node: Node) -> Option<Node> {
    loop {
        match node.kind() {
            "function_declarator" => return Some(node),
            "pointer_declarator" | "reference_declarator" => {
                // The C grammar exposes the inner declarator as a field; the
                // C++ reference declarator does not, so fall back to the
                // last named child.
                node = node.child_by_field_name("declarator").or_else(|| {
                    let mut cursor = node.walk();
                    node.named_children(&mut cursor).last()
                })?;
            }
            _ => return None,
        }
    }
}

/// Resolve the unqualified declared name from a `function_declarator`
///
/// Overloads keep their shared identifier (parameter types are not part of
/// the name); qualified names (`Foo::bar`) reduce to their rightmost
/// segment; destructors and operators keep their spelled form (`~Foo`,
/// `operator+`). Returns `None` for declarator shapes that do not declare
/// a named function (e.g. a parenthesized function-pointer declarator).
pub fn declared_name(function_declarator: Node, source: &str) -> Option<String> {
    let declarator = function_declarator.child_by_field_name("declarator")?;
    resolve_identifier(declarator, source)
}

fn resolve_identifier(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" | "field_identifier" | "destructor_name" | "operator_name"
        | "operator_cast" => node_text(node, source),
        // Foo::bar or Outer::Inner::f: take the rightmost segment
        "qualified_identifier" => resolve_identifier(node.child_by_field_name("name")?, source),
        // f<int> in an explicit specialization
        "template_function" => resolve_identifier(node.child_by_field_name("name")?, source),
        _ => None,
    }
}

/// UTF-8 text of a node
pub fn node_text(node: Node, source: &str) -> Option<String> {
    source
        .get(node.start_byte()..node.end_byte())
        .map(|s| s.to_string())
}

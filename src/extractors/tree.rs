// Tree Traversal Utilities
//
// Small null-returning helpers over tree-sitter nodes, shared by every
// tree-based extractor. Grammars expose two access styles: stable named
// fields for core structure, and variable-arity children for modifiers and
// attributes. Wrapping both behind Option-returning lookups means extractors
// never need defensive error handling around tree navigation; a missing
// construct is just `None`.

use tree_sitter::Node;

/// Copy a node's source text out as an owned string.
///
/// Byte-sliced with lossy UTF-8 recovery so a mis-encoded file degrades to
/// replacement characters instead of aborting extraction.
pub fn node_text(node: Node, source: &str) -> String {
    let bytes = source.as_bytes();
    let start = node.start_byte();
    let end = node.end_byte();
    if start < bytes.len() && end <= bytes.len() {
        String::from_utf8_lossy(&bytes[start..end]).to_string()
    } else {
        String::new()
    }
}

/// First named child of the given kind, if any.
pub fn find_child<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

/// All named children of the given kind.
pub fn find_children<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Text of a grammar-defined field, if the field is present.
pub fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source))
}

/// Whether any child (named or anonymous) has the given kind.
///
/// Keyword modifiers (`async`, `static`, `readonly`, `*`, ...) appear as
/// anonymous tokens rather than named fields in most grammars, so this scans
/// every child.
pub fn has_child(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == kind)
}

/// 1-indexed start line.
pub fn start_line(node: Node) -> u32 {
    (node.start_position().row + 1) as u32
}

/// 1-indexed end line.
pub fn end_line(node: Node) -> u32 {
    (node.end_position().row + 1) as u32
}

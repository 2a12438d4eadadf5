//! TypeScript/JavaScript symbol extractor
//!
//! Tree-based extraction for the TypeScript/JavaScript family (TS, TSX, JS,
//! JSX). The architecture is organized into specialized modules:
//!
//! - **functions**: function declarations, const-assigned functions, parameters
//! - **classes**: classes, interfaces, enums, members and heritage
//! - **imports_exports**: import forms and the branch-heavy export handling
//!
//! Dispatch switches on each program child's node kind. Anything the grammar
//! produces that we do not recognize is skipped; a missing field is an
//! omission, never an error.

mod classes;
mod functions;
mod imports_exports;

use crate::extractors::base::{ExportInfo, ExtractorResult, ParseError};
use crate::extractors::tree::{find_child, node_text, start_line};
use crate::extractors::{LanguageExtractor, ParserType};
use tree_sitter::{Node, Tree};

pub struct TypeScriptExtractor;

impl LanguageExtractor for TypeScriptExtractor {
    fn parser_type(&self) -> ParserType {
        ParserType::TreeSitter
    }

    fn extract(&self, tree: &Tree, source: &str) -> ExtractorResult {
        let mut builder = TsBuilder::new(source);
        builder.walk_program(tree.root_node());
        builder.result
    }
}

/// Per-call accumulation state. Built fresh inside every `extract()` call,
/// never shared, so extraction stays safely repeatable.
pub(super) struct TsBuilder<'s> {
    source: &'s str,
    pub(super) result: ExtractorResult,
}

impl<'s> TsBuilder<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            result: ExtractorResult::empty(),
        }
    }

    pub(super) fn text(&self, node: Node) -> String {
        node_text(node, self.source)
    }

    pub(super) fn source(&self) -> &'s str {
        self.source
    }

    fn walk_program(&mut self, root: Node) {
        let mut cursor = root.walk();
        let children: Vec<Node> = root.named_children(&mut cursor).collect();
        for node in children {
            match node.kind() {
                "function_declaration" | "generator_function_declaration" => {
                    if let Some(func) = functions::function_symbol(self, node, node, None) {
                        self.result.functions.push(func);
                    }
                }
                "class_declaration" | "abstract_class_declaration" => {
                    if let Some(class) = classes::class_symbol(self, node, node) {
                        self.result.classes.push(class);
                    }
                }
                "interface_declaration" => {
                    if let Some(iface) = classes::interface_symbol(self, node, node) {
                        self.result.classes.push(iface);
                    }
                }
                "enum_declaration" => {
                    if let Some(en) = classes::enum_symbol(self, node, node) {
                        self.result.classes.push(en);
                    }
                }
                "lexical_declaration" | "variable_declaration" => {
                    functions::declared_functions(self, node);
                }
                "import_statement" => {
                    let import = imports_exports::import_info(self, node);
                    self.result.imports.push(import);
                }
                "export_statement" => {
                    imports_exports::handle_export(self, node);
                }
                "ERROR" => {
                    let snippet: String = self.text(node).chars().take(40).collect();
                    self.result.parse_errors.push(ParseError {
                        line: start_line(node),
                        message: format!("syntax error near '{snippet}'"),
                    });
                }
                _ => {}
            }
        }
    }

    /// Append an export, mirroring re-exporting entries into `re_exports` so
    /// the subset invariant holds on every path.
    pub(super) fn push_export(&mut self, info: ExportInfo) {
        if info.is_re_export {
            self.result.re_exports.push(info.clone());
        }
        self.result.exports.push(info);
    }

    /// Docstring from the nearest preceding comment sibling.
    ///
    /// For const-assigned functions the caller anchors this at the outer
    /// declaration node: a JSDoc block precedes the `const`/`export` line,
    /// not the arrow-function expression itself.
    pub(super) fn docstring_before(&self, node: Node) -> Option<String> {
        let prev = node.prev_sibling()?;
        if prev.kind() != "comment" {
            return None;
        }
        let text = self.text(prev);
        if text.starts_with("/*") {
            return Some(clean_comment(&text));
        }
        // Contiguous run of line comments, collected upward.
        let mut run = vec![text];
        let mut current = prev;
        while let Some(earlier) = current.prev_sibling() {
            if earlier.kind() != "comment" {
                break;
            }
            let earlier_text = self.text(earlier);
            if !earlier_text.starts_with("//") {
                break;
            }
            if earlier.end_position().row + 1 != current.start_position().row {
                break;
            }
            run.push(earlier_text);
            current = earlier;
        }
        run.reverse();
        let joined = run.join("\n");
        Some(clean_comment(&joined))
    }
}

/// Strip comment syntax: JSDoc fences, `*` continuations, `//` markers.
pub(super) fn clean_comment(raw: &str) -> String {
    let body = raw
        .trim()
        .trim_start_matches("/**")
        .trim_start_matches("/*")
        .trim_end_matches("*/");
    body.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("//").unwrap_or(line);
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full recursive scan for JSX anywhere in a subtree. A component may
/// conditionally return JSX deep inside its body, so a single-level check
/// misses real components.
pub(super) fn contains_jsx(node: Node) -> bool {
    if matches!(
        node.kind(),
        "jsx_element" | "jsx_self_closing_element" | "jsx_fragment"
    ) {
        return true;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if contains_jsx(child) {
            return true;
        }
    }
    false
}

/// Raw annotation text with the leading colon/arrow stripped.
pub(super) fn strip_annotation(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("=>")
        .trim_start_matches(':')
        .trim()
        .to_string()
}

pub(super) fn trim_quotes(raw: &str) -> String {
    raw.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}

/// Type parameter texts from a declaration's `type_parameters` field.
pub(super) fn type_parameters(builder: &TsBuilder, node: Node) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "type_parameter")
        .map(|c| builder.text(c))
        .collect()
}

/// Decorator nodes attached to a declaration, as their source text.
pub(super) fn decorators_of(builder: &TsBuilder, node: Node) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .map(|c| builder.text(c))
        .collect()
}

/// Some grammar versions wrap heritage in a `class_heritage` node, others
/// hang the clauses directly off the declaration. Resolve either shape.
pub(super) fn heritage_clauses<'t>(node: Node<'t>) -> (Option<Node<'t>>, Option<Node<'t>>) {
    if let Some(heritage) = find_child(node, "class_heritage") {
        let extends = find_child(heritage, "extends_clause");
        let implements = find_child(heritage, "implements_clause");
        if extends.is_some() || implements.is_some() {
            (extends, implements)
        } else {
            // JS grammar: class_heritage directly wraps the superclass expression
            (Some(heritage), None)
        }
    } else {
        (
            find_child(node, "extends_clause"),
            find_child(node, "implements_clause"),
        )
    }
}

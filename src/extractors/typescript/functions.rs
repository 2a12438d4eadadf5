//! Function and parameter extraction
//!
//! One building path serves plain declarations, generator declarations,
//! const-assigned arrow functions, and function expressions. Callers pass the
//! anchor node that docstring lookup should scan from; for const-assigned
//! functions that is the outer declaration, not the inner expression.

use crate::extractors::base::{FunctionSymbol, Parameter, Visibility};
use crate::extractors::tree::{end_line, field_text, has_child, start_line};
use crate::extractors::typescript::{contains_jsx, strip_annotation, type_parameters, TsBuilder};
use tracing::debug;
use tree_sitter::Node;

/// Build a [`FunctionSymbol`] from a function-shaped node.
///
/// `name` overrides the node's own name field (used when the name lives on a
/// surrounding variable declarator). Returns `None` when no name can be
/// resolved at all.
pub(super) fn function_symbol(
    builder: &mut TsBuilder,
    node: Node,
    anchor: Node,
    name: Option<String>,
) -> Option<FunctionSymbol> {
    let name = name.or_else(|| field_text(node, "name", builder_source(builder)))?;

    let mut func = FunctionSymbol::new(name, start_line(anchor), end_line(node));
    func.parameters = parameters(builder, node);
    func.return_type = field_text(node, "return_type", builder_source(builder))
        .map(|raw| strip_annotation(&raw));
    func.type_parameters = type_parameters(builder, node);
    func.is_async = has_child(node, "async");
    func.is_generator =
        has_child(node, "*") || node.kind() == "generator_function_declaration";
    func.visibility = Visibility::Public;
    func.docstring = builder.docstring_before(anchor);
    if contains_jsx(node) {
        func.decorators.push("@component".to_string());
    }
    Some(func)
}

/// Extract function-valued declarators from a `const`/`let`/`var` statement.
///
/// `const f = (...) => ...` and function-expression assignments route through
/// the same building path as declarations, anchored at the outer statement.
pub(super) fn declared_functions(builder: &mut TsBuilder, node: Node) {
    for (name, value) in function_declarators(builder, node) {
        if let Some(func) = function_symbol(builder, value, node, Some(name)) {
            builder.result.functions.push(func);
        }
    }
}

/// Declarators in a variable statement whose value is function-shaped.
pub(super) fn function_declarators<'t>(
    builder: &TsBuilder,
    node: Node<'t>,
) -> Vec<(String, Node<'t>)> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(value) = declarator.child_by_field_name("value") else {
            continue;
        };
        if !matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function" | "generator_function"
        ) {
            continue;
        }
        if let Some(name) = field_text(declarator, "name", builder_source(builder)) {
            out.push((name, value));
        }
    }
    out
}

/// Extract the parameter list of a function-shaped node.
///
/// Handles required/optional/rest parameters and destructuring patterns. A
/// pattern that cannot resolve to an identifiable name is dropped, not
/// defaulted.
pub(super) fn parameters(builder: &TsBuilder, node: Node) -> Vec<Parameter> {
    // Arrow functions with a single bare identifier use the `parameter` field.
    if let Some(single) = node.child_by_field_name("parameter") {
        return match pattern_name(builder, single) {
            Some((name, is_rest)) => vec![Parameter {
                name,
                param_type: None,
                default_value: None,
                is_rest,
            }],
            None => Vec::new(),
        };
    }

    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        let param = match child.kind() {
            // TypeScript grammar wraps every parameter
            "required_parameter" | "optional_parameter" => {
                let pattern = child.child_by_field_name("pattern");
                let resolved = pattern.and_then(|p| pattern_name(builder, p));
                match resolved {
                    Some((name, is_rest)) => Some(Parameter {
                        name,
                        param_type: field_text(child, "type", builder_source(builder))
                            .map(|raw| strip_annotation(&raw)),
                        default_value: field_text(child, "value", builder_source(builder)),
                        is_rest,
                    }),
                    None => {
                        debug!(kind = child.kind(), "dropping unnamed parameter pattern");
                        None
                    }
                }
            }
            // JavaScript grammar exposes patterns directly
            "identifier" => Some(Parameter::plain(builder.text(child))),
            "assignment_pattern" => {
                let left = child.child_by_field_name("left");
                left.and_then(|l| pattern_name(builder, l))
                    .map(|(name, is_rest)| Parameter {
                        name,
                        param_type: None,
                        default_value: field_text(child, "right", builder_source(builder)),
                        is_rest,
                    })
            }
            "rest_pattern" | "object_pattern" | "array_pattern" => {
                pattern_name(builder, child).map(|(name, is_rest)| Parameter {
                    name,
                    param_type: None,
                    default_value: None,
                    is_rest,
                })
            }
            _ => None,
        };
        if let Some(param) = param {
            out.push(param);
        }
    }
    out
}

/// Resolve a binding pattern to a recordable name. Destructuring patterns
/// keep their source text as the name; anything unrecognizable yields `None`.
fn pattern_name(builder: &TsBuilder, pattern: Node) -> Option<(String, bool)> {
    match pattern.kind() {
        "identifier" | "this" => Some((builder.text(pattern), false)),
        "rest_pattern" => {
            let inner = pattern.named_child(0)?;
            Some((builder.text(inner), true))
        }
        "object_pattern" | "array_pattern" => Some((builder.text(pattern), false)),
        _ => None,
    }
}

fn builder_source<'s>(builder: &TsBuilder<'s>) -> &'s str {
    builder.source()
}

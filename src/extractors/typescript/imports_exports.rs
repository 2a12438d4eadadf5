//! Import and export statement extraction
//!
//! Import specifiers distinguish default, namespace, and named forms. Export
//! handling is the most branch-heavy logic in the extractor; the branch order
//! is load-bearing: wildcard re-exports first, then named clauses, then
//! default exports, then direct declarations, then a final fallback scan.
//! Every re-exporting path appends to both `exports` and `re_exports`.

use crate::extractors::base::{
    ConstantSymbol, ExportInfo, ExportKind, ImportInfo, ImportSpecifier,
};
use crate::extractors::base::truncate_value;
use crate::extractors::tree::{field_text, find_child, has_child, start_line};
use crate::extractors::typescript::{classes, functions, strip_annotation, trim_quotes, TsBuilder};
use tracing::debug;
use tree_sitter::Node;

pub(super) fn import_info(builder: &mut TsBuilder, node: Node) -> ImportInfo {
    let source = field_text(node, "source", builder.source())
        .map(|raw| trim_quotes(&raw))
        .unwrap_or_default();
    let mut specifiers = Vec::new();

    if let Some(clause) = find_child(node, "import_clause") {
        let mut cursor = clause.walk();
        let children: Vec<Node> = clause.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "identifier" => {
                    specifiers.push(ImportSpecifier {
                        name: builder.text(child),
                        alias: None,
                        is_default: true,
                        is_namespace: false,
                    });
                }
                "namespace_import" => {
                    if let Some(name) = find_child(child, "identifier") {
                        specifiers.push(ImportSpecifier {
                            name: builder.text(name),
                            alias: None,
                            is_default: false,
                            is_namespace: true,
                        });
                    }
                }
                "named_imports" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        if let Some(name) = field_text(spec, "name", builder.source()) {
                            specifiers.push(ImportSpecifier {
                                name,
                                alias: field_text(spec, "alias", builder.source()),
                                is_default: false,
                                is_namespace: false,
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    ImportInfo {
        source,
        specifiers,
        is_type_only: has_child(node, "type"),
        line: start_line(node),
    }
}

pub(super) fn handle_export(builder: &mut TsBuilder, node: Node) {
    let line = start_line(node);
    let source = field_text(node, "source", builder.source()).map(|raw| trim_quotes(&raw));
    let is_type_only = has_child(node, "type");

    // export * as ns from './x'
    if let Some(ns) = find_child(node, "namespace_export") {
        let name = find_child(ns, "identifier")
            .map(|n| builder.text(n))
            .unwrap_or_else(|| "*".to_string());
        builder.push_export(ExportInfo {
            name,
            kind: ExportKind::Namespace,
            is_re_export: true,
            source,
            is_type_only,
            line,
        });
        return;
    }

    // export * from './x'
    if has_child(node, "*") && source.is_some() {
        builder.push_export(ExportInfo {
            name: "*".to_string(),
            kind: ExportKind::Namespace,
            is_re_export: true,
            source,
            is_type_only,
            line,
        });
        return;
    }

    // export { a, b as c }, local or re-exporting
    if let Some(clause) = find_child(node, "export_clause") {
        let mut cursor = clause.walk();
        let specs: Vec<Node> = clause.named_children(&mut cursor).collect();
        for spec in specs {
            if spec.kind() != "export_specifier" {
                continue;
            }
            let Some(name) = field_text(spec, "name", builder.source()) else {
                continue;
            };
            let exported = field_text(spec, "alias", builder.source()).unwrap_or(name);
            if source.is_some() {
                builder.push_export(ExportInfo {
                    name: exported,
                    kind: ExportKind::ReExport,
                    is_re_export: true,
                    source: source.clone(),
                    is_type_only,
                    line,
                });
            } else {
                builder.push_export(ExportInfo {
                    name: exported,
                    kind: if is_type_only {
                        ExportKind::Type
                    } else {
                        ExportKind::Variable
                    },
                    is_re_export: false,
                    source: None,
                    is_type_only,
                    line,
                });
            }
        }
        return;
    }

    // export default: a declaration or an expression value
    if has_child(node, "default") {
        if let Some(decl) = node.child_by_field_name("declaration") {
            export_default_declaration(builder, node, decl, line);
        } else if let Some(value) = node.child_by_field_name("value") {
            if matches!(
                value.kind(),
                "arrow_function" | "function_expression" | "function" | "generator_function"
            ) {
                if let Some(func) =
                    functions::function_symbol(builder, value, node, Some("default".to_string()))
                {
                    builder.result.functions.push(func);
                }
            }
            builder.push_export(ExportInfo {
                name: "default".to_string(),
                kind: ExportKind::Default,
                is_re_export: false,
                source: None,
                is_type_only: false,
                line,
            });
        }
        return;
    }

    // export <declaration>
    if let Some(decl) = node.child_by_field_name("declaration") {
        export_declaration(builder, node, decl, line);
        return;
    }

    // Fallback: anything named hanging off the statement
    let mut cursor = node.walk();
    let leftovers: Vec<Node> = node.named_children(&mut cursor).collect();
    for child in leftovers {
        if let Some(name) = field_text(child, "name", builder.source()) {
            builder.push_export(ExportInfo {
                name,
                kind: ExportKind::Variable,
                is_re_export: false,
                source: None,
                is_type_only,
                line,
            });
            return;
        }
    }
    debug!(line, "export statement with no recognizable shape");
}

fn export_default_declaration(builder: &mut TsBuilder, anchor: Node, decl: Node, line: u32) {
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(func) = functions::function_symbol(builder, decl, anchor, None) {
                builder.result.functions.push(func);
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(class) = classes::class_symbol(builder, decl, anchor) {
                builder.result.classes.push(class);
            }
        }
        _ => {}
    }
    builder.push_export(ExportInfo {
        name: "default".to_string(),
        kind: ExportKind::Default,
        is_re_export: false,
        source: None,
        is_type_only: false,
        line,
    });
}

fn export_declaration(builder: &mut TsBuilder, anchor: Node, decl: Node, line: u32) {
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(func) = functions::function_symbol(builder, decl, anchor, None) {
                let name = func.name.clone();
                builder.result.functions.push(func);
                builder.push_export(ExportInfo {
                    name,
                    kind: ExportKind::Function,
                    is_re_export: false,
                    source: None,
                    is_type_only: false,
                    line,
                });
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(class) = classes::class_symbol(builder, decl, anchor) {
                let name = class.name.clone();
                builder.result.classes.push(class);
                builder.push_export(ExportInfo {
                    name,
                    kind: ExportKind::Class,
                    is_re_export: false,
                    source: None,
                    is_type_only: false,
                    line,
                });
            }
        }
        "interface_declaration" => {
            if let Some(iface) = classes::interface_symbol(builder, decl, anchor) {
                let name = iface.name.clone();
                builder.result.classes.push(iface);
                // Exports derived from an interface are always type-only
                builder.push_export(ExportInfo {
                    name,
                    kind: ExportKind::Interface,
                    is_re_export: false,
                    source: None,
                    is_type_only: true,
                    line,
                });
            }
        }
        "enum_declaration" => {
            if let Some(en) = classes::enum_symbol(builder, decl, anchor) {
                let name = en.name.clone();
                builder.result.classes.push(en);
                builder.push_export(ExportInfo {
                    name,
                    kind: ExportKind::Enum,
                    is_re_export: false,
                    source: None,
                    is_type_only: false,
                    line,
                });
            }
        }
        "type_alias_declaration" => {
            if let Some(name) = field_text(decl, "name", builder.source()) {
                builder.push_export(ExportInfo {
                    name,
                    kind: ExportKind::Type,
                    is_re_export: false,
                    source: None,
                    is_type_only: true,
                    line,
                });
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            export_variable_declaration(builder, anchor, decl, line);
        }
        _ => {
            debug!(kind = decl.kind(), line, "unhandled exported declaration");
        }
    }
}

/// `export const ...`: function-valued declarators become functions; other
/// `const` declarators become constants. Only exported consts are tracked as
/// constants; non-exported consts, `let`, and `var` never are.
fn export_variable_declaration(builder: &mut TsBuilder, anchor: Node, decl: Node, line: u32) {
    let is_const = has_child(decl, "const");
    let function_valued = functions::function_declarators(builder, decl);

    for (name, value) in &function_valued {
        if let Some(func) =
            functions::function_symbol(builder, *value, anchor, Some(name.clone()))
        {
            builder.result.functions.push(func);
        }
        builder.push_export(ExportInfo {
            name: name.clone(),
            kind: ExportKind::Function,
            is_re_export: false,
            source: None,
            is_type_only: false,
            line,
        });
    }

    let mut cursor = decl.walk();
    let declarators: Vec<Node> = decl.named_children(&mut cursor).collect();
    for declarator in declarators {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name) = field_text(declarator, "name", builder.source()) else {
            continue;
        };
        if function_valued.iter().any(|(n, _)| *n == name) {
            continue;
        }
        if is_const {
            builder.result.constants.push(ConstantSymbol {
                name: name.clone(),
                value_type: field_text(declarator, "type", builder.source())
                    .map(|raw| strip_annotation(&raw)),
                value: field_text(declarator, "value", builder.source())
                    .map(|raw| truncate_value(&raw)),
                is_exported: true,
                docstring: builder.docstring_before(anchor),
                line: start_line(declarator),
            });
        }
        builder.push_export(ExportInfo {
            name,
            kind: ExportKind::Variable,
            is_re_export: false,
            source: None,
            is_type_only: false,
            line,
        });
    }
}

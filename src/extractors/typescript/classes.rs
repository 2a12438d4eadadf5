//! Class, interface, and enum extraction
//!
//! Interfaces and enums reuse the class record shape with a different kind
//! discriminant. Heritage is resolved through both grammar shapes (a
//! `class_heritage` wrapper or direct clause children); members split into
//! methods and fields by node kind.

use crate::extractors::base::{ClassKind, ClassSymbol, Field, FunctionSymbol, Visibility};
use crate::extractors::tree::{end_line, field_text, find_child, has_child, start_line};
use crate::extractors::typescript::{
    decorators_of, functions, heritage_clauses, strip_annotation, type_parameters, TsBuilder,
};
use tree_sitter::Node;

pub(super) fn class_symbol(
    builder: &mut TsBuilder,
    node: Node,
    anchor: Node,
) -> Option<ClassSymbol> {
    let name = field_text(node, "name", builder.source())?;

    let mut class = ClassSymbol::new(name, ClassKind::Class, start_line(anchor), end_line(node));
    class.type_parameters = type_parameters(builder, node);
    // decorators on an exported class hang off the export statement
    class.decorators = decorators_of(builder, anchor);
    if anchor.id() != node.id() {
        class.decorators.extend(decorators_of(builder, node));
    }
    class.docstring = builder.docstring_before(anchor);
    if node.kind() == "abstract_class_declaration" || has_child(node, "abstract") {
        class.decorators.push("@abstract".to_string());
    }

    let (extends, implements) = heritage_clauses(node);
    if let Some(clause) = extends {
        class.extends = heritage_names(builder, clause);
    }
    if let Some(clause) = implements {
        class.implements = heritage_names(builder, clause);
    }

    if let Some(body) = node.child_by_field_name("body") {
        extract_members(builder, body, &mut class);
    }
    Some(class)
}

pub(super) fn interface_symbol(
    builder: &mut TsBuilder,
    node: Node,
    anchor: Node,
) -> Option<ClassSymbol> {
    let name = field_text(node, "name", builder.source())?;

    let mut iface =
        ClassSymbol::new(name, ClassKind::Interface, start_line(anchor), end_line(node));
    iface.type_parameters = type_parameters(builder, node);
    iface.docstring = builder.docstring_before(anchor);

    // TS grammars have used both clause kinds for interface extension
    let extends = find_child(node, "extends_type_clause").or_else(|| find_child(node, "extends_clause"));
    if let Some(clause) = extends {
        iface.extends = heritage_names(builder, clause);
    }

    if let Some(body) = node.child_by_field_name("body") {
        extract_members(builder, body, &mut iface);
    }
    Some(iface)
}

pub(super) fn enum_symbol(
    builder: &mut TsBuilder,
    node: Node,
    anchor: Node,
) -> Option<ClassSymbol> {
    let name = field_text(node, "name", builder.source())?;

    let mut en = ClassSymbol::new(name, ClassKind::Enum, start_line(anchor), end_line(node));
    en.docstring = builder.docstring_before(anchor);

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let member_name = match member.kind() {
                "enum_assignment" => field_text(member, "name", builder.source()),
                "property_identifier" | "string" => Some(builder.text(member)),
                _ => None,
            };
            if let Some(member_name) = member_name {
                en.fields.push(Field {
                    name: member_name,
                    field_type: None,
                    visibility: Visibility::Public,
                    is_static: false,
                    is_readonly: true,
                });
            }
        }
    }
    Some(en)
}

/// Split a class-like body into methods and fields by member kind.
fn extract_members(builder: &mut TsBuilder, body: Node, class: &mut ClassSymbol) {
    let mut cursor = body.walk();
    let members: Vec<Node> = body.named_children(&mut cursor).collect();
    for member in members {
        match member.kind() {
            "method_definition" | "method_signature" => {
                if let Some(method) = method_symbol(builder, member, false) {
                    class.methods.push(method);
                }
            }
            "abstract_method_signature" => {
                if let Some(method) = method_symbol(builder, member, true) {
                    class.methods.push(method);
                }
            }
            "public_field_definition" | "field_definition" | "property_signature" => {
                if let Some(field) = field_symbol(builder, member) {
                    class.fields.push(field);
                }
            }
            _ => {}
        }
    }
}

/// Build a method symbol, folding modifiers into synthetic decorator markers
/// and disambiguating accessor pairs by renaming to `"get x"` / `"set x"`.
fn method_symbol(builder: &mut TsBuilder, node: Node, is_abstract: bool) -> Option<FunctionSymbol> {
    let name_node = node.child_by_field_name("name")?;
    let mut name = builder.text(name_node);

    // Accessor pairs would otherwise collide on name
    if has_child(node, "get") {
        name = format!("get {name}");
    } else if has_child(node, "set") {
        name = format!("set {name}");
    }

    let mut method = FunctionSymbol::new(name, start_line(node), end_line(node));
    method.parameters = functions::parameters(builder, node);
    method.return_type =
        field_text(node, "return_type", builder.source()).map(|raw| strip_annotation(&raw));
    method.type_parameters = type_parameters(builder, node);
    method.is_async = has_child(node, "async");
    method.is_generator = has_child(node, "*");
    method.visibility = member_visibility(builder, node, name_node);
    method.docstring = builder.docstring_before(node);

    method.decorators = decorators_of(builder, node);
    if has_child(node, "static") {
        method.decorators.push("@static".to_string());
    }
    if is_abstract || has_child(node, "abstract") {
        method.decorators.push("@abstract".to_string());
    }
    if has_child(node, "override") || find_child(node, "override_modifier").is_some() {
        method.decorators.push("@override".to_string());
    }
    Some(method)
}

fn field_symbol(builder: &mut TsBuilder, node: Node) -> Option<Field> {
    let name_node = node.child_by_field_name("name")?;
    Some(Field {
        name: builder.text(name_node),
        field_type: field_text(node, "type", builder.source()).map(|raw| strip_annotation(&raw)),
        visibility: member_visibility(builder, node, name_node),
        is_static: has_child(node, "static"),
        is_readonly: has_child(node, "readonly"),
    })
}

/// Member visibility: explicit accessibility modifier, or the `#name`
/// private-field prefix, else public.
fn member_visibility(builder: &TsBuilder, node: Node, name_node: Node) -> Visibility {
    if name_node.kind() == "private_property_identifier"
        || builder.text(name_node).starts_with('#')
    {
        return Visibility::Private;
    }
    if let Some(modifier) = find_child(node, "accessibility_modifier") {
        return match builder.text(modifier).as_str() {
            "private" => Visibility::Private,
            "protected" => Visibility::Protected,
            _ => Visibility::Public,
        };
    }
    Visibility::Public
}

/// Names referenced by an extends/implements clause, skipping type-argument
/// nodes so `Base<T>` records as `Base`.
fn heritage_names(builder: &TsBuilder, clause: Node) -> Vec<String> {
    let mut cursor = clause.walk();
    clause
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "type_arguments")
        .map(|c| builder.text(c))
        .collect()
}

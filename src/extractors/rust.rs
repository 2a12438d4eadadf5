//! Rust symbol extractor
//!
//! Two passes over the file. Pass 1 collects functions, structs, enums,
//! traits, `use` declarations, and `const`/`static` items, indexing
//! struct/enum/trait names. Pass 2 walks every `impl` block and attaches its
//! methods to the indexed target, merging trait names into `implements`.
//! The ordering matters: an `impl` can textually precede or follow its
//! target's definition, and single-pass attachment would silently miss one
//! direction. Impls targeting a type that never appears in the file
//! (primitives, external types) degrade their methods to free functions
//! rather than being dropped.
//!
//! Visibility defaults to private unless an explicit `pub` modifier is
//! present, the inverse of the TypeScript extractor. Preserved per language.

use crate::extractors::base::{
    truncate_value, ClassKind, ClassSymbol, ConstantSymbol, ExportInfo, ExportKind,
    ExtractorResult, Field, FunctionSymbol, ImportInfo, ImportSpecifier, Parameter, ParseError,
    Visibility,
};
use crate::extractors::tree::{end_line, field_text, find_child, node_text, start_line};
use crate::extractors::{LanguageExtractor, ParserType};
use std::collections::HashMap;
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

pub struct RustExtractor;

impl LanguageExtractor for RustExtractor {
    fn parser_type(&self) -> ParserType {
        ParserType::TreeSitter
    }

    fn extract(&self, tree: &Tree, source: &str) -> ExtractorResult {
        let mut builder = RustBuilder::new(source);
        builder.collect_items(tree.root_node());
        builder.attach_impls();
        builder.result
    }
}

/// Per-call accumulation state; pass 2 consumes the deferred impl nodes.
struct RustBuilder<'s, 't> {
    source: &'s str,
    result: ExtractorResult,
    /// Struct/enum/trait name -> index into `result.classes`.
    type_index: HashMap<String, usize>,
    impls: Vec<Node<'t>>,
}

impl<'s, 't> RustBuilder<'s, 't> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            result: ExtractorResult::empty(),
            type_index: HashMap::new(),
            impls: Vec::new(),
        }
    }

    fn text(&self, node: Node) -> String {
        node_text(node, self.source)
    }

    fn push_export(&mut self, info: ExportInfo) {
        if info.is_re_export {
            self.result.re_exports.push(info.clone());
        }
        self.result.exports.push(info);
    }

    // ── Pass 1 ──────────────────────────────────────────────────────────

    fn collect_items(&mut self, node: Node<'t>) {
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "function_item" => {
                    let func = self.function_symbol(child);
                    if func.visibility == Visibility::Public {
                        self.push_export(ExportInfo {
                            name: func.name.clone(),
                            kind: ExportKind::Function,
                            is_re_export: false,
                            source: None,
                            is_type_only: false,
                            line: func.line,
                        });
                    }
                    self.result.functions.push(func);
                }
                "struct_item" => {
                    let class = self.struct_symbol(child);
                    self.index_class(class, ExportKind::Class);
                }
                "enum_item" => {
                    let class = self.enum_symbol(child);
                    self.index_class(class, ExportKind::Enum);
                }
                "trait_item" => {
                    let class = self.trait_symbol(child);
                    self.index_class(class, ExportKind::Interface);
                }
                "impl_item" => {
                    self.impls.push(child);
                }
                "use_declaration" => {
                    self.extract_use(child);
                }
                "const_item" | "static_item" => {
                    self.extract_constant(child);
                }
                "mod_item" => {
                    // inline modules contribute to the same file-level result
                    if let Some(body) = find_child(child, "declaration_list") {
                        self.collect_items(body);
                    }
                }
                "ERROR" => {
                    let snippet: String = self.text(child).chars().take(40).collect();
                    self.result.parse_errors.push(ParseError {
                        line: start_line(child),
                        message: format!("syntax error near '{snippet}'"),
                    });
                }
                _ => {}
            }
        }
    }

    fn index_class(&mut self, class: ClassSymbol, export_kind: ExportKind) {
        if class.visibility == Visibility::Public {
            self.push_export(ExportInfo {
                name: class.name.clone(),
                kind: export_kind,
                is_re_export: false,
                source: None,
                is_type_only: false,
                line: class.line,
            });
        }
        let idx = self.result.classes.len();
        self.type_index.entry(class.name.clone()).or_insert(idx);
        self.result.classes.push(class);
    }

    fn function_symbol(&self, node: Node) -> FunctionSymbol {
        let name = field_text(node, "name", self.source).unwrap_or_else(|| "anonymous".into());

        let mut func = FunctionSymbol::new(name, start_line(node), end_line(node));
        func.parameters = self.function_parameters(node);
        func.return_type = field_text(node, "return_type", self.source);
        func.type_parameters = self.type_parameters(node);
        func.visibility = self.visibility_of(node);
        func.docstring = self.doc_comment_before(node);
        func.decorators = self.preceding_attributes(node);

        let modifiers = find_child(node, "function_modifiers");
        let has_modifier = |kw: &str| {
            modifiers
                .map(|m| {
                    let mut cursor = m.walk();
                    m.children(&mut cursor).any(|c| c.kind() == kw)
                })
                .unwrap_or(false)
        };
        func.is_async = has_modifier("async");
        if has_modifier("unsafe") {
            func.decorators.push("unsafe".to_string());
        }
        func
    }

    fn function_parameters(&self, node: Node) -> Vec<Parameter> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            match child.kind() {
                "parameter" => {
                    let Some(name) = field_text(child, "pattern", self.source) else {
                        debug!("dropping parameter with no pattern");
                        continue;
                    };
                    out.push(Parameter {
                        name,
                        param_type: field_text(child, "type", self.source),
                        default_value: None,
                        is_rest: false,
                    });
                }
                "self_parameter" => {
                    out.push(Parameter::plain(self.text(child)));
                }
                "variadic_parameter" => {
                    let mut param = Parameter::plain(self.text(child));
                    param.is_rest = true;
                    out.push(param);
                }
                _ => {}
            }
        }
        out
    }

    fn struct_symbol(&self, node: Node) -> ClassSymbol {
        let name = field_text(node, "name", self.source).unwrap_or_else(|| "Anonymous".into());

        let mut class = ClassSymbol::new(name, ClassKind::Struct, start_line(node), end_line(node));
        class.type_parameters = self.type_parameters(node);
        class.visibility = self.visibility_of(node);
        class.docstring = self.doc_comment_before(node);
        class.decorators = self.preceding_attributes(node);

        if let Some(list) = find_child(node, "field_declaration_list") {
            let mut cursor = list.walk();
            for field in list.named_children(&mut cursor) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                let Some(field_name) = field_text(field, "name", self.source) else {
                    continue;
                };
                class.fields.push(Field {
                    name: field_name,
                    field_type: field_text(field, "type", self.source),
                    visibility: self.visibility_of(field),
                    is_static: false,
                    is_readonly: false,
                });
            }
        }
        class
    }

    fn enum_symbol(&self, node: Node) -> ClassSymbol {
        let name = field_text(node, "name", self.source).unwrap_or_else(|| "Anonymous".into());

        let mut class = ClassSymbol::new(name, ClassKind::Enum, start_line(node), end_line(node));
        class.type_parameters = self.type_parameters(node);
        class.visibility = self.visibility_of(node);
        class.docstring = self.doc_comment_before(node);
        class.decorators = self.preceding_attributes(node);

        if let Some(list) = find_child(node, "enum_variant_list") {
            let mut cursor = list.walk();
            for variant in list.named_children(&mut cursor) {
                if variant.kind() != "enum_variant" {
                    continue;
                }
                let Some(variant_name) = field_text(variant, "name", self.source) else {
                    continue;
                };
                // variant payload recorded as the field's type text
                let payload = find_child(variant, "field_declaration_list")
                    .or_else(|| find_child(variant, "ordered_field_declaration_list"))
                    .map(|p| self.text(p));
                class.fields.push(Field {
                    name: variant_name,
                    field_type: payload,
                    visibility: Visibility::Public,
                    is_static: false,
                    is_readonly: false,
                });
            }
        }
        class
    }

    fn trait_symbol(&self, node: Node) -> ClassSymbol {
        let name = field_text(node, "name", self.source).unwrap_or_else(|| "Anonymous".into());

        let mut class = ClassSymbol::new(name, ClassKind::Trait, start_line(node), end_line(node));
        class.type_parameters = self.type_parameters(node);
        class.visibility = self.visibility_of(node);
        class.docstring = self.doc_comment_before(node);
        class.decorators = self.preceding_attributes(node);

        // supertraits
        if let Some(bounds) = node.child_by_field_name("bounds") {
            let mut cursor = bounds.walk();
            class.extends = bounds
                .named_children(&mut cursor)
                .map(|b| self.text(b))
                .collect();
        }

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            let items: Vec<Node> = body.named_children(&mut cursor).collect();
            for item in items {
                if matches!(item.kind(), "function_item" | "function_signature_item") {
                    class.methods.push(self.method_symbol(item));
                }
            }
        }
        class
    }

    /// A method is a function symbol plus an `@static` marker when it takes
    /// no `self` receiver.
    fn method_symbol(&self, node: Node) -> FunctionSymbol {
        let mut method = self.function_symbol(node);
        let has_receiver = node
            .child_by_field_name("parameters")
            .and_then(|params| find_child(params, "self_parameter"))
            .is_some();
        if !has_receiver {
            method.decorators.push("@static".to_string());
        }
        method
    }

    fn extract_constant(&mut self, node: Node) {
        let Some(name) = field_text(node, "name", self.source) else {
            return;
        };
        let visibility = self.visibility_of(node);
        let line = start_line(node);
        self.result.constants.push(ConstantSymbol {
            name: name.clone(),
            value_type: field_text(node, "type", self.source),
            value: field_text(node, "value", self.source).map(|raw| truncate_value(&raw)),
            is_exported: visibility == Visibility::Public,
            docstring: self.doc_comment_before(node),
            line,
        });
        if visibility == Visibility::Public {
            self.push_export(ExportInfo {
                name,
                kind: ExportKind::Variable,
                is_re_export: false,
                source: None,
                is_type_only: false,
                line,
            });
        }
    }

    // ── use declarations ────────────────────────────────────────────────

    fn extract_use(&mut self, node: Node) {
        let Some(argument) = node.child_by_field_name("argument") else {
            return;
        };
        let is_pub = self.visibility_of(node) == Visibility::Public;
        let line = start_line(node);

        let mut leaves = Vec::new();
        self.collect_use_leaves(argument, "", &mut leaves);

        for (source, specifier) in leaves {
            if is_pub {
                let name = specifier
                    .alias
                    .clone()
                    .unwrap_or_else(|| specifier.name.clone());
                self.push_export(ExportInfo {
                    name,
                    kind: ExportKind::ReExport,
                    is_re_export: true,
                    source: Some(source.clone()),
                    is_type_only: false,
                    line,
                });
            }
            self.result.imports.push(ImportInfo {
                source,
                specifiers: vec![specifier],
                is_type_only: false,
                line,
            });
        }
    }

    /// Recursively descend nested `use` path forms, producing one
    /// `(source, specifier)` pair per resolved leaf.
    fn collect_use_leaves(
        &self,
        node: Node,
        prefix: &str,
        out: &mut Vec<(String, ImportSpecifier)>,
    ) {
        match node.kind() {
            "identifier" | "self" | "crate" | "super" => {
                let name = self.text(node);
                let source = if prefix.is_empty() {
                    name.clone()
                } else {
                    prefix.to_string()
                };
                out.push((source, ImportSpecifier::named(name)));
            }
            "scoped_identifier" => {
                let path = node
                    .child_by_field_name("path")
                    .map(|p| self.text(p))
                    .unwrap_or_default();
                let full = join_path(prefix, &path);
                if let Some(name) = node.child_by_field_name("name") {
                    self.collect_use_leaves(name, &full, out);
                }
            }
            "use_as_clause" => {
                let alias = field_text(node, "alias", self.source);
                let mut inner = Vec::new();
                if let Some(path) = node.child_by_field_name("path") {
                    self.collect_use_leaves(path, prefix, &mut inner);
                }
                for (source, mut specifier) in inner {
                    specifier.alias = alias.clone();
                    out.push((source, specifier));
                }
            }
            "use_list" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.collect_use_leaves(child, prefix, out);
                }
            }
            "scoped_use_list" => {
                let path = node
                    .child_by_field_name("path")
                    .map(|p| self.text(p))
                    .unwrap_or_default();
                let full = join_path(prefix, &path);
                if let Some(list) = node.child_by_field_name("list") {
                    self.collect_use_leaves(list, &full, out);
                }
            }
            "use_wildcard" => {
                let mut cursor = node.walk();
                let path = node
                    .named_children(&mut cursor)
                    .next()
                    .map(|p| self.text(p));
                let source = match path {
                    Some(p) => join_path(prefix, &p),
                    None => prefix.to_string(),
                };
                out.push((
                    source,
                    ImportSpecifier {
                        name: "*".to_string(),
                        alias: None,
                        is_default: false,
                        is_namespace: true,
                    },
                ));
            }
            other => {
                debug!(kind = other, "unhandled use clause shape");
            }
        }
    }

    // ── Pass 2 ──────────────────────────────────────────────────────────

    fn attach_impls(&mut self) {
        let impls = std::mem::take(&mut self.impls);
        for impl_node in impls {
            let trait_name = impl_node
                .child_by_field_name("trait")
                .map(|n| self.base_type_name(n));
            let Some(type_node) = impl_node.child_by_field_name("type") else {
                continue;
            };
            let type_name = self.base_type_name(type_node);

            let mut methods = Vec::new();
            if let Some(body) = impl_node.child_by_field_name("body") {
                let mut cursor = body.walk();
                let items: Vec<Node> = body.named_children(&mut cursor).collect();
                for item in items {
                    if item.kind() == "function_item" {
                        methods.push(self.method_symbol(item));
                    }
                }
            }

            match self.type_index.get(&type_name).copied() {
                Some(idx) => {
                    let class = &mut self.result.classes[idx];
                    if let Some(trait_name) = trait_name {
                        if !class.implements.contains(&trait_name) {
                            class.implements.push(trait_name);
                        }
                    }
                    class.methods.extend(methods);
                }
                None => {
                    // primitives and external types: keep the methods as
                    // free functions instead of dropping them
                    warn!(target_type = %type_name, "impl target not declared in file; keeping methods as free functions");
                    self.result.functions.extend(methods);
                }
            }
        }
    }

    /// Base name of an impl target: `Foo<T>` -> `Foo`, references stripped.
    fn base_type_name(&self, node: Node) -> String {
        match node.kind() {
            "generic_type" => field_text(node, "type", self.source)
                .unwrap_or_else(|| self.text(node)),
            "reference_type" => node
                .child_by_field_name("type")
                .map(|inner| self.base_type_name(inner))
                .unwrap_or_else(|| self.text(node)),
            _ => self.text(node),
        }
    }

    // ── shared helpers ──────────────────────────────────────────────────

    fn visibility_of(&self, node: Node) -> Visibility {
        if find_child(node, "visibility_modifier").is_some() {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    fn type_parameters(&self, node: Node) -> Vec<String> {
        let Some(params) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };
        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .map(|p| self.text(p))
            .collect()
    }

    /// Attribute items immediately preceding a declaration (`#[derive(..)]`,
    /// `#[cfg(..)]`, ...), in source order.
    fn preceding_attributes(&self, node: Node) -> Vec<String> {
        let mut attrs = Vec::new();
        let mut current = node;
        while let Some(prev) = current.prev_sibling() {
            match prev.kind() {
                "attribute_item" => attrs.push(self.text(prev)),
                "line_comment" | "block_comment" => {}
                _ => break,
            }
            current = prev;
        }
        attrs.reverse();
        attrs
    }

    /// Rustdoc extraction: walk preceding siblings collecting contiguous
    /// `///`, `//!`, or `/** */` comments, skipping interleaved attribute
    /// items; fall back to a generic preceding comment when no doc-specific
    /// comment exists.
    fn doc_comment_before(&self, node: Node) -> Option<String> {
        let mut docs: Vec<String> = Vec::new();
        let mut fallback: Option<String> = None;
        let mut current = node;

        while let Some(prev) = current.prev_sibling() {
            match prev.kind() {
                "attribute_item" | "inner_attribute_item" => {}
                "line_comment" => {
                    let text = self.text(prev);
                    if let Some(doc) = strip_line_doc(&text) {
                        docs.push(doc);
                    } else {
                        if docs.is_empty() && fallback.is_none() {
                            fallback = Some(strip_plain_comment(&text));
                        }
                        break;
                    }
                }
                "block_comment" => {
                    let text = self.text(prev);
                    if text.starts_with("/**") {
                        docs.push(strip_block_doc(&text));
                    } else if docs.is_empty() && fallback.is_none() {
                        fallback = Some(strip_plain_comment(&text));
                        break;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
            current = prev;
        }

        if docs.is_empty() {
            return fallback.filter(|f| !f.is_empty());
        }
        docs.reverse();
        Some(docs.join("\n"))
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{prefix}::{path}")
    }
}

fn strip_line_doc(text: &str) -> Option<String> {
    let body = text
        .strip_prefix("///")
        .or_else(|| text.strip_prefix("//!"))?;
    Some(body.strip_prefix(' ').unwrap_or(body).trim_end().to_string())
}

fn strip_block_doc(text: &str) -> String {
    let body = text
        .trim_start_matches("/**")
        .trim_start_matches("/*!")
        .trim_end_matches("*/");
    body.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_plain_comment(text: &str) -> String {
    if text.starts_with("//") {
        let body = text.trim_start_matches('/');
        return body.trim().to_string();
    }
    text.trim_start_matches("/*")
        .trim_end_matches("*/")
        .trim()
        .to_string()
}

// Base Symbol Model for Quarry
//
// Every extractor, tree-based or regex-based, produces the records defined
// here. All entities are owned values constructed once per extraction call;
// none hold references back into the parse tree, and nothing is mutated after
// the extractor returns.

use serde::{Deserialize, Serialize};

/// Upper bound on a recorded constant value. Longer initializers are cut and
/// ellipsis-terminated so results stay cheap to store and ship downstream.
pub const MAX_CONSTANT_VALUE_LEN: usize = 100;

/// Everything extracted from one source file.
///
/// `re_exports` is always a subset of `exports`: every path that records a
/// re-export appends the same entry to both sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorResult {
    pub functions: Vec<FunctionSymbol>,
    pub classes: Vec<ClassSymbol>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub constants: Vec<ConstantSymbol>,
    pub re_exports: Vec<ExportInfo>,
    pub parse_errors: Vec<ParseError>,
}

impl ExtractorResult {
    /// Shared all-empty baseline every extraction starts from.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Visibility levels for symbols.
///
/// TypeScript-family extraction defaults to `Public`; Rust extraction
/// defaults to `Private` unless an explicit modifier is present. The
/// asymmetry is deliberate and per-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// A function, method, or const-assigned function expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSymbol {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Raw annotation text with the leading colon/arrow stripped; never a
    /// resolved type.
    pub return_type: Option<String>,
    pub type_parameters: Vec<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub visibility: Visibility,
    /// Language-native decorators/attributes and synthesized markers
    /// (`@static`, `@abstract`, `@override`, `@component`, `unsafe`) in one
    /// co-mingled list.
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
    /// 1-indexed; `line <= end_line` always. Text-based extraction cannot
    /// see a body's extent and sets `end_line = line`.
    pub line: u32,
    pub end_line: u32,
}

impl FunctionSymbol {
    /// Baseline symbol at a position; extractors fill in the rest.
    pub fn new(name: impl Into<String>, line: u32, end_line: u32) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            type_parameters: Vec::new(),
            is_async: false,
            is_generator: false,
            visibility: Visibility::Public,
            decorators: Vec::new(),
            docstring: None,
            line,
            end_line,
        }
    }
}

/// Discriminant for the shared class-like record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Struct,
    Enum,
    Trait,
}

/// Classes, interfaces, structs, enums, and traits share one record shape;
/// `kind` tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSymbol {
    pub name: String,
    pub kind: ClassKind,
    pub type_parameters: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    /// Reserved for mixin-style composition; may stay empty.
    pub mixins: Vec<String>,
    pub fields: Vec<Field>,
    /// Always present, never absent, including for empty bodies.
    pub methods: Vec<FunctionSymbol>,
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
    pub visibility: Visibility,
    pub line: u32,
    pub end_line: u32,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>, kind: ClassKind, line: u32, end_line: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            mixins: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            decorators: Vec::new(),
            docstring: None,
            visibility: Visibility::Public,
            line,
            end_line,
        }
    }
}

/// One import statement, resolved to its leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    /// Module specifier / path string, quotes stripped.
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    pub is_type_only: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
    pub is_default: bool,
    pub is_namespace: bool,
}

impl ImportSpecifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            is_default: false,
            is_namespace: false,
        }
    }
}

/// What kind of declaration an export points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Function,
    Class,
    Interface,
    Type,
    Enum,
    Variable,
    Default,
    Namespace,
    ReExport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub name: String,
    pub kind: ExportKind,
    pub is_re_export: bool,
    /// Origin module when the export re-exports from elsewhere.
    pub source: Option<String>,
    pub is_type_only: bool,
    pub line: u32,
}

/// An exported constant binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    /// Initializer text, truncated to [`MAX_CONSTANT_VALUE_LEN`] chars and
    /// ellipsis-terminated when cut.
    pub value: Option<String>,
    pub is_exported: bool,
    pub docstring: Option<String>,
    pub line: u32,
}

/// A data member of a class-like symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    pub default_value: Option<String>,
    pub is_rest: bool,
}

impl Parameter {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
            default_value: None,
            is_rest: false,
        }
    }
}

/// Non-fatal extraction diagnostic. Recorded, never thrown: a single
/// malformed construct must not abort extraction for the rest of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}

/// Truncate an initializer to the recorded bound, cutting at a char boundary
/// and terminating with an ellipsis.
pub(crate) fn truncate_value(raw: &str) -> String {
    if raw.chars().count() <= MAX_CONSTANT_VALUE_LEN {
        return raw.to_string();
    }
    let head: String = raw.chars().take(MAX_CONSTANT_VALUE_LEN - 3).collect();
    format!("{head}...")
}

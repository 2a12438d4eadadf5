// Quarry's Language Extractors Module
//
// This module contains the symbol model shared by every extractor, the
// extractor contract, and the per-strategy implementations: tree-sitter based
// extractors for TypeScript/JavaScript and Rust, and a regex fallback for
// languages without a grammar.

pub mod base;
pub mod fallback;
pub mod rust;
pub mod tree;
pub mod typescript;

// Re-export the base extractor types
pub use base::{
    ClassKind, ClassSymbol, ConstantSymbol, ExportInfo, ExportKind, ExtractorResult, Field,
    FunctionSymbol, ImportInfo, ImportSpecifier, Parameter, ParseError, Visibility,
};

use tree_sitter::Tree;

/// Which parsing strategy an extractor is wired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    TreeSitter,
    Regex,
}

/// Contract implemented by every language extractor.
///
/// An extractor declares its strategy through [`parser_type`] and implements
/// exactly the one extraction operation matching that tag: [`extract`] for
/// tree-sitter extractors, [`extract_from_source`] for regex extractors.
/// Invoking the non-matching operation is a wiring bug in the caller, not a
/// data condition, and panics immediately; every data-level anomaly instead
/// degrades to omission or a [`ParseError`](base::ParseError) entry.
///
/// Extraction is synchronous and holds no state between calls. The caller is
/// responsible for serializing calls when the underlying parser runtime does
/// not support concurrent invocation.
///
/// [`parser_type`]: LanguageExtractor::parser_type
/// [`extract`]: LanguageExtractor::extract
/// [`extract_from_source`]: LanguageExtractor::extract_from_source
pub trait LanguageExtractor {
    /// Strategy discriminant callers branch on.
    fn parser_type(&self) -> ParserType;

    /// Tree-based extraction. Only valid when `parser_type()` is
    /// [`ParserType::TreeSitter`].
    fn extract(&self, _tree: &Tree, _source: &str) -> ExtractorResult {
        panic!(
            "extract(tree, source) invoked on a {:?} extractor; call extract_from_source() instead",
            self.parser_type()
        );
    }

    /// Text-based extraction. Only valid when `parser_type()` is
    /// [`ParserType::Regex`].
    fn extract_from_source(&self, _source: &str) -> ExtractorResult {
        panic!(
            "extract_from_source(source) invoked on a {:?} extractor; call extract() instead",
            self.parser_type()
        );
    }
}

// quarry - Language-Neutral Symbol Extraction Library
//!
//! Quarry normalizes source files written in many programming languages into
//! one consistent symbol model (functions, classes, imports, exports,
//! constants) for a downstream static-analysis and documentation pipeline.
//!
//! Extraction follows a dual strategy: precise tree-based extractors where a
//! tree-sitter grammar exists, and a heuristic regex-based fallback grouped by
//! syntax family where it does not. The caller owns file discovery, language
//! detection, and parsing; this crate consumes a parse tree (or raw source)
//! and produces one [`ExtractorResult`] per file.

pub mod extractors;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use extractors::base::{
    ClassKind, ClassSymbol, ConstantSymbol, ExportInfo, ExportKind, ExtractorResult, Field,
    FunctionSymbol, ImportInfo, ImportSpecifier, Parameter, ParseError, Visibility,
};
pub use extractors::fallback::{FallbackExtractor, SyntaxFamily};
pub use extractors::rust::RustExtractor;
pub use extractors::typescript::TypeScriptExtractor;
pub use extractors::{LanguageExtractor, ParserType};

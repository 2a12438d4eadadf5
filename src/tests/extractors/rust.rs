//! Rust extractor tests
//!
//! These validate the two-pass impl attachment, `use` path resolution,
//! rustdoc extraction, and the private-by-default visibility rule.

#[cfg(test)]
mod tests {
    use crate::extractors::base::{ClassKind, ExportKind, Visibility};
    use crate::extractors::rust::RustExtractor;
    use crate::extractors::LanguageExtractor;

    fn extract(code: &str) -> crate::extractors::base::ExtractorResult {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        RustExtractor.extract(&tree, code)
    }

    #[test]
    fn test_use_brace_list() {
        let code = "use std::collections::{HashMap, HashSet};";
        let result = extract(code);

        assert_eq!(result.imports.len(), 2);
        for import in &result.imports {
            assert_eq!(import.source, "std::collections");
            assert_eq!(import.specifiers.len(), 1);
        }
        let names: Vec<&str> = result
            .imports
            .iter()
            .map(|i| i.specifiers[0].name.as_str())
            .collect();
        assert_eq!(names, vec!["HashMap", "HashSet"]);
    }

    #[test]
    fn test_use_nested_scoped_list() {
        let code = "use a::{b::C, d};";
        let result = extract(code);

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].source, "a::b");
        assert_eq!(result.imports[0].specifiers[0].name, "C");
        assert_eq!(result.imports[1].source, "a");
        assert_eq!(result.imports[1].specifiers[0].name, "d");
    }

    #[test]
    fn test_use_alias() {
        let code = "use std::fmt::Result as FmtResult;";
        let result = extract(code);

        assert_eq!(result.imports.len(), 1);
        let specifier = &result.imports[0].specifiers[0];
        assert_eq!(specifier.name, "Result");
        assert_eq!(specifier.alias.as_deref(), Some("FmtResult"));
        assert_eq!(result.imports[0].source, "std::fmt");
    }

    #[test]
    fn test_use_wildcard() {
        let code = "use crate::util::*;";
        let result = extract(code);

        assert_eq!(result.imports.len(), 1);
        let specifier = &result.imports[0].specifiers[0];
        assert_eq!(specifier.name, "*");
        assert!(specifier.is_namespace);
        assert_eq!(result.imports[0].source, "crate::util");
    }

    #[test]
    fn test_pub_use_alias_reexports_under_alias() {
        let code = "pub use engine::Core as PublicCore;";
        let result = extract(code);

        assert_eq!(result.re_exports.len(), 1);
        let re_export = &result.re_exports[0];
        assert_eq!(re_export.name, "PublicCore");
        assert_eq!(re_export.kind, ExportKind::ReExport);
        assert_eq!(re_export.source.as_deref(), Some("engine"));
        assert!(result.exports.contains(re_export));
    }

    #[test]
    fn test_trait_with_supertrait_and_methods() {
        let code = r#"
pub trait Storage: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String);
}
"#;
        let result = extract(code);

        assert_eq!(result.classes.len(), 1);
        let storage = &result.classes[0];
        assert_eq!(storage.kind, ClassKind::Trait);
        assert_eq!(storage.extends, vec!["Clone".to_string()]);
        assert_eq!(storage.methods.len(), 2);
        assert_eq!(storage.methods[0].name, "get");
        assert_eq!(
            storage.methods[0].return_type.as_deref(),
            Some("Option<String>")
        );

        let export = &result.exports[0];
        assert_eq!(export.kind, ExportKind::Interface);
        assert_eq!(export.name, "Storage");
    }

    #[test]
    fn test_trait_impl_merges_implements() {
        let code = r#"
struct Engine;

trait Run {
    fn run(&self);
}

impl Run for Engine {
    fn run(&self) {}
}
"#;
        let result = extract(code);

        let engine = result.classes.iter().find(|c| c.name == "Engine").unwrap();
        assert_eq!(engine.implements, vec!["Run".to_string()]);
        assert_eq!(engine.methods.len(), 1);
        assert_eq!(engine.methods[0].name, "run");
    }

    #[test]
    fn test_generic_impl_target_resolves_base_name() {
        let code = r#"
pub struct Wrapper<T> {
    inner: T,
}

impl<T> Wrapper<T> {
    pub fn into_inner(self) -> T { self.inner }
}
"#;
        let result = extract(code);

        let wrapper = result.classes.iter().find(|c| c.name == "Wrapper").unwrap();
        assert_eq!(wrapper.methods.len(), 1);
        assert_eq!(wrapper.methods[0].name, "into_inner");
    }

    #[test]
    fn test_associated_function_gets_static_marker() {
        let code = r#"
struct Pool;

impl Pool {
    fn new() -> Self { Pool }
    fn len(&self) -> usize { 0 }
}
"#;
        let result = extract(code);

        let pool = result.classes.iter().find(|c| c.name == "Pool").unwrap();
        let new = pool.methods.iter().find(|m| m.name == "new").unwrap();
        let len = pool.methods.iter().find(|m| m.name == "len").unwrap();
        assert!(new.decorators.contains(&"@static".to_string()));
        assert!(!len.decorators.contains(&"@static".to_string()));
    }

    #[test]
    fn test_async_and_unsafe_functions() {
        let code = r#"
pub async fn fetch_all() {}

pub unsafe fn raw_read(ptr: *const u8) -> u8 { *ptr }
"#;
        let result = extract(code);

        let fetch = result.functions.iter().find(|f| f.name == "fetch_all").unwrap();
        assert!(fetch.is_async);

        let raw = result.functions.iter().find(|f| f.name == "raw_read").unwrap();
        assert!(raw.decorators.contains(&"unsafe".to_string()));
        assert_eq!(raw.return_type.as_deref(), Some("u8"));
        assert_eq!(raw.parameters[0].name, "ptr");
        assert_eq!(raw.parameters[0].param_type.as_deref(), Some("*const u8"));
    }

    #[test]
    fn test_struct_fields_and_visibility() {
        let code = r#"
pub struct Config {
    pub path: String,
    timeout: u64,
}
"#;
        let result = extract(code);

        let config = &result.classes[0];
        assert_eq!(config.kind, ClassKind::Struct);
        assert_eq!(config.visibility, Visibility::Public);
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[0].visibility, Visibility::Public);
        assert_eq!(config.fields[1].visibility, Visibility::Private);
        assert_eq!(config.fields[1].field_type.as_deref(), Some("u64"));
    }

    #[test]
    fn test_enum_variants_recorded_as_fields() {
        let code = r#"
pub enum Event {
    Start,
    Message { text: String },
    Code(u32),
}
"#;
        let result = extract(code);

        let event = &result.classes[0];
        assert_eq!(event.kind, ClassKind::Enum);
        assert_eq!(event.fields.len(), 3);
        assert_eq!(event.fields[0].name, "Start");
        assert!(event.fields[0].field_type.is_none());
        assert!(event.fields[1].field_type.as_deref().unwrap().contains("text: String"));
    }

    #[test]
    fn test_constants_and_statics() {
        let code = r#"
/// Max retries before giving up.
pub const MAX_RETRIES: u32 = 5;

static INTERNAL: &str = "x";
"#;
        let result = extract(code);

        assert_eq!(result.constants.len(), 2);
        let max = result.constants.iter().find(|c| c.name == "MAX_RETRIES").unwrap();
        assert!(max.is_exported);
        assert_eq!(max.value_type.as_deref(), Some("u32"));
        assert_eq!(max.value.as_deref(), Some("5"));
        assert_eq!(max.docstring.as_deref(), Some("Max retries before giving up."));

        let internal = result.constants.iter().find(|c| c.name == "INTERNAL").unwrap();
        assert!(!internal.is_exported);

        let exported: Vec<&str> = result.exports.iter().map(|e| e.name.as_str()).collect();
        assert!(exported.contains(&"MAX_RETRIES"));
        assert!(!exported.contains(&"INTERNAL"));
    }

    #[test]
    fn test_constant_value_truncated() {
        let filler = "a".repeat(300);
        let code = format!("pub const BLOB: &str = \"{filler}\";");
        let result = extract(&code);

        let blob = &result.constants[0];
        let value = blob.value.as_deref().unwrap();
        assert!(value.chars().count() <= 100);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_block_doc_comment() {
        let code = "/** Block documented. */\npub struct Legacy;";
        let result = extract(code);

        assert_eq!(result.classes[0].docstring.as_deref(), Some("Block documented."));
    }

    #[test]
    fn test_multi_line_rustdoc_joined() {
        let code = r#"
/// Opens the store.
/// Creates the directory when missing.
pub fn open() {}
"#;
        let result = extract(code);

        let doc = result.functions[0].docstring.as_deref().unwrap();
        assert_eq!(doc, "Opens the store.\nCreates the directory when missing.");
    }

    #[test]
    fn test_inline_module_items_are_collected() {
        let code = r#"
mod inner {
    pub fn nested() {}
}
"#;
        let result = extract(code);
        assert!(result.functions.iter().any(|f| f.name == "nested"));
    }

    #[test]
    #[should_panic(expected = "extract_from_source(source) invoked")]
    fn test_wrong_strategy_panics() {
        RustExtractor.extract_from_source("fn main() {}");
    }
}

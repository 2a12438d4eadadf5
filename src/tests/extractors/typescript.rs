//! TypeScript/JavaScript extractor tests
//!
//! These validate import/export handling, class member extraction, function
//! flags, constant capture policy, and JSX component detection.

#[cfg(test)]
mod tests {
    use crate::extractors::base::{ClassKind, ExportKind, Visibility};
    use crate::extractors::typescript::TypeScriptExtractor;
    use crate::extractors::LanguageExtractor;

    fn extract(code: &str) -> crate::extractors::base::ExtractorResult {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        TypeScriptExtractor.extract(&tree, code)
    }

    fn extract_tsx(code: &str) -> crate::extractors::base::ExtractorResult {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        TypeScriptExtractor.extract(&tree, code)
    }

    #[test]
    fn test_import_forms() {
        let code = r#"
import def from './a';
import * as ns from './b';
import { x, y as z } from './c';
import type { T } from './d';
import './side-effect';
"#;
        let result = extract(code);
        assert_eq!(result.imports.len(), 5);

        let default_import = &result.imports[0];
        assert_eq!(default_import.source, "./a");
        assert!(default_import.specifiers[0].is_default);
        assert_eq!(default_import.specifiers[0].name, "def");

        let namespace_import = &result.imports[1];
        assert!(namespace_import.specifiers[0].is_namespace);
        assert_eq!(namespace_import.specifiers[0].name, "ns");

        let named_import = &result.imports[2];
        assert_eq!(named_import.specifiers.len(), 2);
        assert_eq!(named_import.specifiers[0].name, "x");
        assert_eq!(named_import.specifiers[1].name, "y");
        assert_eq!(named_import.specifiers[1].alias.as_deref(), Some("z"));

        assert!(result.imports[3].is_type_only);

        let side_effect = &result.imports[4];
        assert_eq!(side_effect.source, "./side-effect");
        assert!(side_effect.specifiers.is_empty());
    }

    #[test]
    fn test_named_reexport_lands_in_both_lists() {
        let code = "export { d, e as f } from './z';";
        let result = extract(code);

        assert_eq!(result.exports.len(), 2);
        assert_eq!(result.re_exports.len(), 2);
        for export in &result.exports {
            assert!(export.is_re_export);
            assert_eq!(export.kind, ExportKind::ReExport);
            assert_eq!(export.source.as_deref(), Some("./z"));
        }
        assert_eq!(result.exports[1].name, "f");
    }

    #[test]
    fn test_namespace_reexport_with_alias() {
        let code = "export * as util from './y';";
        let result = extract(code);

        assert_eq!(result.exports.len(), 1);
        let export = &result.exports[0];
        assert_eq!(export.name, "util");
        assert_eq!(export.kind, ExportKind::Namespace);
        assert!(export.is_re_export);
        assert_eq!(export.source.as_deref(), Some("./y"));
        assert_eq!(result.re_exports.len(), 1);
    }

    #[test]
    fn test_local_export_clause() {
        let code = "const a = 1;\nexport { a };";
        let result = extract(code);

        let export = result.exports.iter().find(|e| e.name == "a").unwrap();
        assert!(!export.is_re_export);
        assert!(export.source.is_none());
        assert!(result.re_exports.is_empty());
    }

    #[test]
    fn test_type_only_reexport() {
        let code = "export type { T } from './t';";
        let result = extract(code);

        assert_eq!(result.exports.len(), 1);
        assert!(result.exports[0].is_type_only);
        assert!(result.exports[0].is_re_export);
    }

    #[test]
    fn test_export_default_class() {
        let code = "export default class Foo {}";
        let result = extract(code);

        assert_eq!(result.classes.len(), 1);
        assert_eq!(result.classes[0].name, "Foo");
        assert_eq!(result.exports.len(), 1);
        assert_eq!(result.exports[0].name, "default");
        assert_eq!(result.exports[0].kind, ExportKind::Default);
    }

    #[test]
    fn test_exported_declarations() {
        let code = r#"
export function helper() {}
export class Widget {}
export enum Color { Red, Green }
export type Alias = string;
"#;
        let result = extract(code);

        let kind_of = |name: &str| {
            result
                .exports
                .iter()
                .find(|e| e.name == name)
                .map(|e| e.kind)
        };
        assert_eq!(kind_of("helper"), Some(ExportKind::Function));
        assert_eq!(kind_of("Widget"), Some(ExportKind::Class));
        assert_eq!(kind_of("Color"), Some(ExportKind::Enum));
        assert_eq!(kind_of("Alias"), Some(ExportKind::Type));
        assert!(result.re_exports.is_empty());

        let color = result.classes.iter().find(|c| c.name == "Color").unwrap();
        assert_eq!(color.kind, ClassKind::Enum);
        assert_eq!(color.fields.len(), 2);
    }

    #[test]
    fn test_interface_exports_are_type_only() {
        let code = "export interface Opts { port: number; retry(): void; }";
        let result = extract(code);

        assert_eq!(result.classes.len(), 1);
        let iface = &result.classes[0];
        assert_eq!(iface.kind, ClassKind::Interface);
        assert_eq!(iface.fields.len(), 1);
        assert_eq!(iface.fields[0].name, "port");
        assert_eq!(iface.fields[0].field_type.as_deref(), Some("number"));
        assert_eq!(iface.methods.len(), 1);
        assert_eq!(iface.methods[0].name, "retry");

        let export = &result.exports[0];
        assert_eq!(export.kind, ExportKind::Interface);
        assert!(export.is_type_only);
    }

    #[test]
    fn test_const_arrow_function_with_jsdoc() {
        let code = r#"
/** Adds numbers. */
export const add = (a: number, b: number): number => a + b;
"#;
        let result = extract(code);

        assert_eq!(result.functions.len(), 1);
        let func = &result.functions[0];
        assert_eq!(func.name, "add");
        assert_eq!(func.docstring.as_deref(), Some("Adds numbers."));
        assert_eq!(func.return_type.as_deref(), Some("number"));
        assert_eq!(func.parameters.len(), 2);
        assert_eq!(func.parameters[0].param_type.as_deref(), Some("number"));

        // function-valued const is exported as a function, not a constant
        assert!(result.constants.is_empty());
        let export = result.exports.iter().find(|e| e.name == "add").unwrap();
        assert_eq!(export.kind, ExportKind::Function);
    }

    #[test]
    fn test_constant_capture_policy() {
        let code = r#"
const internal = 42;
let counter = 0;
export const API_URL = "https://example.com";
"#;
        let result = extract(code);

        // only exported consts are tracked
        assert_eq!(result.constants.len(), 1);
        let constant = &result.constants[0];
        assert_eq!(constant.name, "API_URL");
        assert!(constant.is_exported);
        assert_eq!(constant.value.as_deref(), Some("\"https://example.com\""));
    }

    #[test]
    fn test_class_heritage_members_and_modifiers() {
        let code = r#"
class Widget extends Base implements Serializable, Loggable {
  #secret: string;
  static count: number = 0;
  readonly id: number;
  private name: string;

  constructor(id: number) {}
  static create(): Widget { return new Widget(1); }
  get label(): string { return this.name; }
  set label(v: string) { this.name = v; }
  async fetch(): Promise<void> {}
}
"#;
        let result = extract(code);
        assert_eq!(result.classes.len(), 1);
        let widget = &result.classes[0];

        assert_eq!(widget.extends, vec!["Base".to_string()]);
        assert_eq!(
            widget.implements,
            vec!["Serializable".to_string(), "Loggable".to_string()]
        );

        let field = |name: &str| widget.fields.iter().find(|f| f.name == name).unwrap();
        assert_eq!(field("#secret").visibility, Visibility::Private);
        assert!(field("count").is_static);
        assert!(field("id").is_readonly);
        assert_eq!(field("name").visibility, Visibility::Private);

        let method_names: Vec<&str> = widget.methods.iter().map(|m| m.name.as_str()).collect();
        assert!(method_names.contains(&"constructor"));
        assert!(method_names.contains(&"get label"));
        assert!(method_names.contains(&"set label"));

        let create = widget.methods.iter().find(|m| m.name == "create").unwrap();
        assert!(create.decorators.contains(&"@static".to_string()));

        let fetch = widget.methods.iter().find(|m| m.name == "fetch").unwrap();
        assert!(fetch.is_async);
        assert_eq!(fetch.return_type.as_deref(), Some("Promise<void>"));
    }

    #[test]
    fn test_abstract_class_markers() {
        let code = r#"
abstract class Shape {
  abstract area(): number;
}
"#;
        let result = extract(code);
        let shape = &result.classes[0];
        assert!(shape.decorators.contains(&"@abstract".to_string()));
        let area = &shape.methods[0];
        assert!(area.decorators.contains(&"@abstract".to_string()));
    }

    #[test]
    fn test_class_decorators_are_captured() {
        let code = r#"
@Component({ selector: 'app' })
export class AppComponent {}
"#;
        let result = extract(code);
        let class = &result.classes[0];
        assert!(class
            .decorators
            .iter()
            .any(|d| d.starts_with("@Component")));
    }

    #[test]
    fn test_async_and_generator_flags() {
        let code = "async function load() {}\nfunction* gen() { yield 1; }";
        let result = extract(code);

        let load = result.functions.iter().find(|f| f.name == "load").unwrap();
        assert!(load.is_async);
        assert!(!load.is_generator);

        let r#gen = result.functions.iter().find(|f| f.name == "gen").unwrap();
        assert!(r#gen.is_generator);
    }

    #[test]
    fn test_parameter_shapes() {
        let code = r#"
function f(a: string, b?: number, ...rest: string[]) {}
function g({ x, y }: Point) {}
"#;
        let result = extract(code);

        let f = result.functions.iter().find(|f| f.name == "f").unwrap();
        assert_eq!(f.parameters.len(), 3);
        assert_eq!(f.parameters[1].name, "b");
        assert_eq!(f.parameters[1].param_type.as_deref(), Some("number"));
        assert!(f.parameters[2].is_rest);
        assert_eq!(f.parameters[2].name, "rest");

        let g = result.functions.iter().find(|f| f.name == "g").unwrap();
        assert_eq!(g.parameters.len(), 1);
        assert_eq!(g.parameters[0].param_type.as_deref(), Some("Point"));
    }

    #[test]
    fn test_default_parameter_value() {
        let code = "function retry(times: number = 3) {}";
        let result = extract(code);

        let retry = &result.functions[0];
        assert_eq!(retry.parameters[0].default_value.as_deref(), Some("3"));
    }

    #[test]
    fn test_type_parameters() {
        let code = "function pick<T, K extends keyof T>(obj: T, key: K) {}";
        let result = extract(code);

        let pick = &result.functions[0];
        assert_eq!(pick.type_parameters.len(), 2);
        assert_eq!(pick.type_parameters[0], "T");
    }

    #[test]
    fn test_jsx_component_detection_is_recursive() {
        let code = r#"
export const App = () => {
  if (window.ready) {
    return <div>hello</div>;
  }
  return null;
};

function plain() { return 42; }
"#;
        let result = extract_tsx(code);

        let app = result.functions.iter().find(|f| f.name == "App").unwrap();
        assert!(app.decorators.contains(&"@component".to_string()));

        let plain = result.functions.iter().find(|f| f.name == "plain").unwrap();
        assert!(!plain.decorators.contains(&"@component".to_string()));
    }

    #[test]
    fn test_docstring_from_line_comment_run() {
        let code = "// Parses the config.\n// Returns defaults on failure.\nfunction parseConfig() {}";
        let result = extract(code);

        let doc = result.functions[0].docstring.as_deref().unwrap();
        assert!(doc.contains("Parses the config."));
        assert!(doc.contains("Returns defaults on failure."));
    }

    #[test]
    fn test_multi_line_span() {
        let code = "function long(\n  a: number,\n  b: number\n) {\n  return a + b;\n}";
        let result = extract(code);

        let func = &result.functions[0];
        assert_eq!(func.line, 1);
        assert_eq!(func.end_line, 6);
    }
}

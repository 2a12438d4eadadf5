//! Regex fallback extractor
//!
//! Heuristic text-based extraction for languages with no tree-sitter support.
//! Languages are grouped into three syntax families sharing one pattern
//! triple each (function, class, import): a C family covering curly-brace,
//! statically-flavored languages, a Ruby-like family, and a PHP family. One
//! shared pattern per family trades per-language precision for coverage; the
//! approximation is deliberate and bounded.
//!
//! Scanning is line-oriented: per line the function pattern is tested first,
//! then class, then import; first match wins, so a single line never yields
//! two symbol kinds. Candidate names pass a keyword denylist so control-flow
//! constructs are not misread as declarations. Line scanning cannot see a
//! body's extent, so every symbol gets `end_line = line`.

use crate::extractors::base::{
    ClassKind, ClassSymbol, ExportInfo, ExportKind, ExtractorResult, FunctionSymbol, ImportInfo,
    ImportSpecifier, Parameter, ParseError, Visibility,
};
use crate::extractors::{LanguageExtractor, ParserType};
use regex::Regex;
use tracing::debug;

/// Keywords that would otherwise be misread as declaration names.
const KEYWORD_DENYLIST: &[&str] = &[
    "if", "else", "elsif", "elif", "for", "foreach", "while", "switch", "match", "case", "when",
    "return", "new", "throw", "throws", "catch", "try", "do", "yield", "await", "break",
    "continue", "goto", "sizeof", "typeof", "instanceof", "super", "this", "unless", "until",
    "begin", "rescue", "raise", "assert", "delete",
];

/// Syntax family a language is grouped into for pattern selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxFamily {
    /// Curly-brace, statically-flavored languages (Java, C, C++, C#, Go,
    /// Kotlin, Scala, Swift, ...)
    CFamily,
    /// Ruby, Elixir, Crystal
    RubyLike,
    Php,
}

impl SyntaxFamily {
    /// Family for a detected language name, if the fallback covers it.
    pub fn for_language(language: &str) -> Option<Self> {
        match language {
            "java" | "c" | "cpp" | "csharp" | "go" | "kotlin" | "scala" | "swift" | "dart"
            | "groovy" | "objc" => Some(Self::CFamily),
            "ruby" | "elixir" | "crystal" => Some(Self::RubyLike),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::CFamily => "c-family",
            Self::RubyLike => "ruby-like",
            Self::Php => "php",
        }
    }
}

struct FamilyPatterns {
    function: Regex,
    class: Regex,
    import: Regex,
}

impl FamilyPatterns {
    fn for_family(family: SyntaxFamily) -> Self {
        match family {
            SyntaxFamily::CFamily => Self {
                function: Regex::new(
                    r"(?x)
                    ^\s*
                    (?:(?P<vis>public|private|protected|internal)\s+)?
                    (?P<mods>(?:(?:static|final|abstract|synchronized|virtual|override|async|unsafe|extern|inline|constexpr|native|default)\s+)*)
                    (?:
                        (?P<kw>func|fun|fn)\s+(?:\((?P<receiver>[^)]*)\)\s*)?
                      | (?P<ret>[A-Za-z_][\w<>\[\],.\s*&:]*?)\s+
                    )
                    (?P<name>[A-Za-z_]\w*)\s*
                    (?:<[^>]*>\s*)?
                    \((?P<params>[^)]*)\)
                    (?P<tail>[^\{;=]*)
                    (?:\{|;|=|$)",
                )
                .expect("c-family function pattern"),
                class: Regex::new(
                    r"(?x)
                    ^\s*
                    (?:(?P<vis>public|private|protected|internal)\s+)?
                    (?:(?:static|final|abstract|sealed|open|data|partial)\s+)*
                    (?P<kw>class|interface|struct|enum|record|trait|object)\s+
                    (?P<name>[A-Za-z_]\w*)
                    (?:<[^>]*>)?
                    (?P<heritage>[^\{]*)",
                )
                .expect("c-family class pattern"),
                import: Regex::new(
                    r#"(?x)
                    ^\s*(?:
                        import\s+(?:static\s+)?(?P<path>[\w.]+(?:\.\*)?)\s*;?\s*$
                      | import\s+(?:\w+\s+)?"(?P<qpath>[^"]+)"
                      | using\s+(?P<using>[\w.:]+)\s*;
                      | \#\s*include\s*[<"](?P<inc>[^>"]+)[>"]
                    )"#,
                )
                .expect("c-family import pattern"),
            },
            SyntaxFamily::RubyLike => Self {
                function: Regex::new(
                    r"(?x)
                    ^\s*def\s+
                    (?P<recv>self\.)?
                    (?P<name>[A-Za-z_]\w*[?!=]?)\s*
                    (?:\((?P<params>[^)]*)\))?",
                )
                .expect("ruby-like function pattern"),
                class: Regex::new(
                    r"(?x)
                    ^\s*(?P<kw>class|module)\s+
                    (?P<name>[A-Z]\w*(?:::\w+)*)
                    (?:\s*<\s*(?P<parent>[\w:]+))?",
                )
                .expect("ruby-like class pattern"),
                import: Regex::new(
                    r#"^\s*(?:require|require_relative|load|import)\s+['"](?P<path>[^'"]+)['"]"#,
                )
                .expect("ruby-like import pattern"),
            },
            SyntaxFamily::Php => Self {
                function: Regex::new(
                    r"(?x)
                    ^\s*
                    (?:(?P<vis>public|private|protected)\s+)?
                    (?P<mods>(?:(?:static|abstract|final)\s+)*)
                    function\s+&?\s*
                    (?P<name>[A-Za-z_]\w*)\s*
                    \((?P<params>[^)]*)\)
                    (?P<tail>[^\{;]*)",
                )
                .expect("php function pattern"),
                class: Regex::new(
                    r"(?x)
                    ^\s*
                    (?:(?:abstract|final)\s+)*
                    (?P<kw>class|interface|trait|enum)\s+
                    (?P<name>[A-Za-z_]\w*)
                    (?:\s+extends\s+(?P<parent>[\w\\]+))?
                    (?:\s+implements\s+(?P<ifaces>[^\{]+))?",
                )
                .expect("php class pattern"),
                import: Regex::new(
                    r#"(?x)
                    ^\s*(?:
                        use\s+(?P<use>[\w\\]+)(?:\s+as\s+(?P<alias>\w+))?\s*;
                      | (?:require|include)(?:_once)?\s*\(?\s*['"](?P<inc>[^'"]+)
                    )"#,
                )
                .expect("php import pattern"),
            },
        }
    }
}

pub struct FallbackExtractor {
    family: SyntaxFamily,
    patterns: FamilyPatterns,
}

impl FallbackExtractor {
    pub fn new(family: SyntaxFamily) -> Self {
        Self {
            family,
            patterns: FamilyPatterns::for_family(family),
        }
    }

    /// Convenience constructor from a detected language name.
    pub fn for_language(language: &str) -> Option<Self> {
        SyntaxFamily::for_language(language).map(Self::new)
    }

    pub fn family(&self) -> SyntaxFamily {
        self.family
    }
}

impl LanguageExtractor for FallbackExtractor {
    fn parser_type(&self) -> ParserType {
        ParserType::Regex
    }

    fn extract_from_source(&self, source: &str) -> ExtractorResult {
        let mut result = ExtractorResult::empty();
        let lines: Vec<&str> = source.lines().collect();

        for (idx, raw_line) in lines.iter().enumerate() {
            let line_no = (idx + 1) as u32;

            if let Some(func) = self.match_function(raw_line, &lines, idx, line_no) {
                if func.visibility == Visibility::Public {
                    result.exports.push(ExportInfo {
                        name: func.name.clone(),
                        kind: ExportKind::Function,
                        is_re_export: false,
                        source: None,
                        is_type_only: false,
                        line: line_no,
                    });
                }
                result.functions.push(func);
                continue;
            }

            if let Some(class) = self.match_class(raw_line, &lines, idx, line_no) {
                if class.visibility == Visibility::Public {
                    result.exports.push(ExportInfo {
                        name: class.name.clone(),
                        kind: export_kind_for_class(class.kind),
                        is_re_export: false,
                        source: None,
                        is_type_only: false,
                        line: line_no,
                    });
                }
                result.classes.push(class);
                continue;
            }

            if let Some(import) = self.match_import(raw_line, line_no) {
                result.imports.push(import);
            }
        }

        // Distinguish "patterns missed this file" from "file is empty"
        if !source.trim().is_empty()
            && result.functions.is_empty()
            && result.classes.is_empty()
            && result.imports.is_empty()
        {
            debug!(family = self.family.label(), "no fallback patterns matched");
            result.parse_errors.push(ParseError {
                line: 1,
                message: format!(
                    "no declarations matched {} fallback patterns",
                    self.family.label()
                ),
            });
        }

        result
    }
}

impl FallbackExtractor {
    fn match_function(
        &self,
        line: &str,
        lines: &[&str],
        idx: usize,
        line_no: u32,
    ) -> Option<FunctionSymbol> {
        let caps = self.patterns.function.captures(line)?;
        let name = caps.name("name")?.as_str().to_string();
        if is_denied(&name) {
            return None;
        }
        // A denied word in return-type position means the line is a
        // statement (`return foo(x);`), not a declaration.
        if let Some(ret) = caps.name("ret") {
            let first = ret.as_str().split_whitespace().next().unwrap_or("");
            if is_denied(first) {
                return None;
            }
        }

        let mods = caps.name("mods").map(|m| m.as_str()).unwrap_or("");
        let mut func = FunctionSymbol::new(name, line_no, line_no);
        func.visibility = visibility_from(caps.name("vis").map(|v| v.as_str()));
        func.is_async = mods.split_whitespace().any(|m| m == "async");
        if mods.split_whitespace().any(|m| m == "static")
            || caps.name("recv").is_some()
        {
            func.decorators.push("@static".to_string());
        }
        if mods.split_whitespace().any(|m| m == "abstract") {
            func.decorators.push("@abstract".to_string());
        }
        if mods.split_whitespace().any(|m| m == "override") {
            func.decorators.push("@override".to_string());
        }

        func.return_type = self.resolve_return_type(&caps);
        func.parameters = caps
            .name("params")
            .map(|p| self.parse_parameters(p.as_str()))
            .unwrap_or_default();
        func.docstring = docstring_above(lines, idx);
        Some(func)
    }

    fn resolve_return_type(&self, caps: &regex::Captures) -> Option<String> {
        if let Some(ret) = caps.name("ret") {
            let text = ret.as_str().trim();
            // modifier-only prefixes are not a type
            if !text.is_empty() && text != "void" {
                return Some(text.to_string());
            }
            return None;
        }
        let tail = caps.name("tail")?.as_str().trim();
        if let Some(stripped) = tail.strip_prefix("->").or_else(|| tail.strip_prefix(':')) {
            let stripped = stripped.trim();
            if !stripped.is_empty() {
                return Some(stripped.to_string());
            }
        } else if caps.name("kw").is_some() && !tail.is_empty() && !tail.starts_with("throws") {
            // Go-style trailing return
            return Some(tail.to_string());
        }
        None
    }

    fn match_class(
        &self,
        line: &str,
        lines: &[&str],
        idx: usize,
        line_no: u32,
    ) -> Option<ClassSymbol> {
        let caps = self.patterns.class.captures(line)?;
        let name = caps.name("name")?.as_str().to_string();
        if is_denied(&name) {
            return None;
        }

        let kind = match caps.name("kw").map(|k| k.as_str()).unwrap_or("class") {
            "interface" => ClassKind::Interface,
            "struct" => ClassKind::Struct,
            "enum" => ClassKind::Enum,
            "trait" => ClassKind::Trait,
            _ => ClassKind::Class,
        };

        let mut class = ClassSymbol::new(name, kind, line_no, line_no);
        class.visibility = visibility_from(caps.name("vis").map(|v| v.as_str()));
        class.docstring = docstring_above(lines, idx);

        if let Some(parent) = caps.name("parent") {
            class.extends.push(parent.as_str().to_string());
        }
        if let Some(ifaces) = caps.name("ifaces") {
            class.implements = split_heritage(ifaces.as_str());
        }
        if let Some(heritage) = caps.name("heritage") {
            let (extends, implements) = parse_heritage(heritage.as_str());
            class.extends.extend(extends);
            class.implements.extend(implements);
        }
        Some(class)
    }

    fn match_import(&self, line: &str, line_no: u32) -> Option<ImportInfo> {
        let caps = self.patterns.import.captures(line)?;
        let (group, source) = ["path", "qpath", "using", "inc", "use"]
            .iter()
            .find_map(|&group| caps.name(group).map(|m| (group, m.as_str().to_string())))?;

        let mut specifiers = Vec::new();
        if source.ends_with(".*") {
            specifiers.push(ImportSpecifier {
                name: "*".to_string(),
                alias: None,
                is_default: false,
                is_namespace: true,
            });
        } else if matches!(group, "path" | "using" | "use") {
            // dotted/namespaced paths carry a meaningful leaf name;
            // header/file includes do not
            if let Some(leaf) = source.rsplit(['.', '\\', ':']).next() {
                if !leaf.is_empty() && leaf != source {
                    let mut specifier = ImportSpecifier::named(leaf);
                    specifier.alias = caps.name("alias").map(|a| a.as_str().to_string());
                    specifiers.push(specifier);
                }
            }
        }

        Some(ImportInfo {
            source,
            specifiers,
            is_type_only: false,
            line: line_no,
        })
    }

    /// Split a raw parameter string on top-level commas only; generic and
    /// templated types contain commas that must not split the list.
    fn parse_parameters(&self, raw: &str) -> Vec<Parameter> {
        split_top_level(raw)
            .into_iter()
            .filter_map(|piece| self.parse_parameter(piece.trim()))
            .collect()
    }

    fn parse_parameter(&self, piece: &str) -> Option<Parameter> {
        if piece.is_empty() {
            return None;
        }
        match self.family {
            SyntaxFamily::RubyLike => {
                let (body, default) = split_default(piece, '=');
                let is_rest =
                    body.starts_with('*') || body.starts_with('&') || body.starts_with("**");
                let name = body.trim_start_matches(['*', '&']).to_string();
                if name.is_empty() {
                    return None;
                }
                Some(Parameter {
                    name,
                    param_type: None,
                    default_value: default,
                    is_rest,
                })
            }
            SyntaxFamily::Php => {
                let (body, default) = split_default(piece, '=');
                let is_rest = body.contains("...");
                let tokens: Vec<&str> = body.split_whitespace().collect();
                let name_token = tokens.iter().find(|t| t.trim_start_matches("...").starts_with('$'))?;
                let name = name_token
                    .trim_start_matches("...")
                    .trim_start_matches('$')
                    .to_string();
                let type_text: Vec<&str> = tokens
                    .iter()
                    .take_while(|t| !t.trim_start_matches("...").starts_with('$'))
                    .copied()
                    .collect();
                Some(Parameter {
                    name,
                    param_type: if type_text.is_empty() {
                        None
                    } else {
                        Some(type_text.join(" "))
                    },
                    default_value: default,
                    is_rest,
                })
            }
            SyntaxFamily::CFamily => {
                let (body, default) = split_default(piece, '=');
                if body == "void" {
                    return None;
                }
                let is_rest = body.contains("...") || body.starts_with("params ");
                // Kotlin/Swift/Scala annotate as `name: Type`
                if let Some((name, type_text)) = split_top_level_colon(&body) {
                    return Some(Parameter {
                        name: name.trim().trim_start_matches("vararg ").to_string(),
                        param_type: Some(type_text.trim().to_string()),
                        default_value: default,
                        is_rest,
                    });
                }
                // Java/C/C++/C# order: the name is the last token
                let cleaned = body.replace("...", "");
                let tokens: Vec<&str> = cleaned.split_whitespace().collect();
                let name = tokens.last()?.trim_matches(['*', '&']).to_string();
                if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
                    return None;
                }
                let type_text = tokens[..tokens.len() - 1].join(" ");
                Some(Parameter {
                    name,
                    param_type: if type_text.is_empty() {
                        None
                    } else {
                        Some(type_text)
                    },
                    default_value: default,
                    is_rest,
                })
            }
        }
    }
}

fn is_denied(word: &str) -> bool {
    KEYWORD_DENYLIST.contains(&word)
}

fn visibility_from(vis: Option<&str>) -> Visibility {
    match vis {
        Some("private") => Visibility::Private,
        Some("protected") => Visibility::Protected,
        // No explicit export keyword in these languages; public is the
        // heuristic public-surface default.
        _ => Visibility::Public,
    }
}

fn export_kind_for_class(kind: ClassKind) -> ExportKind {
    match kind {
        ClassKind::Interface | ClassKind::Trait => ExportKind::Interface,
        ClassKind::Enum => ExportKind::Enum,
        _ => ExportKind::Class,
    }
}

/// Split on commas outside any bracket nesting (`<>`, `()`, `[]`, `{}`).
fn split_top_level(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in raw.chars() {
        match ch {
            '<' | '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | ']' | '}' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                out.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        out.push(current.trim().to_string());
    }
    out.retain(|piece| !piece.is_empty());
    out
}

/// First colon outside bracket nesting, for `name: Type` parameter styles.
/// C++ scope operators (`::`) never split.
fn split_top_level_colon(raw: &str) -> Option<(String, String)> {
    let chars: Vec<char> = raw.chars().collect();
    let mut depth = 0i32;
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            ':' if depth == 0 => {
                let next_is_colon = chars.get(i + 1) == Some(&':');
                let prev_is_colon = i > 0 && chars[i - 1] == ':';
                if next_is_colon || prev_is_colon {
                    continue;
                }
                let name: String = chars[..i].iter().collect();
                let type_text: String = chars[i + 1..].iter().collect();
                if name.trim().is_empty() || name.trim().contains(' ') {
                    return None;
                }
                return Some((name, type_text));
            }
            _ => {}
        }
    }
    None
}

fn split_default(piece: &str, separator: char) -> (String, Option<String>) {
    let mut depth = 0i32;
    for (i, ch) in piece.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            c if c == separator && depth == 0 => {
                let body = piece[..i].trim().to_string();
                let default = piece[i + 1..].trim().to_string();
                let default = if default.is_empty() { None } else { Some(default) };
                return (body, default);
            }
            _ => {}
        }
    }
    (piece.trim().to_string(), None)
}

fn split_heritage(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parse a C-family heritage tail: `extends Base implements A, B` or the
/// colon form `: Base, A`.
fn parse_heritage(raw: &str) -> (Vec<String>, Vec<String>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (Vec::new(), Vec::new());
    }

    if let Some(idx) = raw.find("implements") {
        let extends_part = raw[..idx].trim().trim_start_matches("extends").trim();
        let implements_part = raw[idx + "implements".len()..].trim();
        return (split_heritage(extends_part), split_heritage(implements_part));
    }
    if let Some(stripped) = raw.strip_prefix("extends") {
        return (split_heritage(stripped), Vec::new());
    }
    if let Some(stripped) = raw.strip_prefix(':') {
        return (split_heritage(stripped), Vec::new());
    }
    (Vec::new(), Vec::new())
}

/// Backward state machine over preceding lines: recognizes single-line block
/// comments, multi-line block comments with `* ` continuations, and
/// contiguous line-comment runs; stops at the first non-comment line.
fn docstring_above(lines: &[&str], decl_idx: usize) -> Option<String> {
    if decl_idx == 0 {
        return None;
    }
    let above = lines[decl_idx - 1].trim();

    // Block comment ending directly above the declaration
    if above.ends_with("*/") {
        if let Some(open) = above.find("/*") {
            let inner = above[open..].trim_start_matches("/**").trim_start_matches("/*");
            let inner = inner.trim_end_matches("*/").trim();
            return if inner.is_empty() {
                None
            } else {
                Some(inner.to_string())
            };
        }
        // Multi-line block: collect upward until the opening fence
        let mut collected: Vec<String> = Vec::new();
        let tail = above.trim_end_matches("*/").trim();
        if !tail.is_empty() {
            collected.push(clean_block_line(tail));
        }
        for i in (0..decl_idx - 1).rev() {
            let line = lines[i].trim();
            if let Some(open) = line.find("/*") {
                let first = line[open..]
                    .trim_start_matches("/**")
                    .trim_start_matches("/*")
                    .trim();
                if !first.is_empty() {
                    collected.push(clean_block_line(first));
                }
                collected.reverse();
                collected.retain(|l| !l.is_empty());
                return if collected.is_empty() {
                    None
                } else {
                    Some(collected.join("\n"))
                };
            }
            collected.push(clean_block_line(line));
        }
        return None; // unterminated block, give up
    }

    // Contiguous run of line comments
    if above.starts_with("//") || above.starts_with('#') {
        let mut collected: Vec<String> = Vec::new();
        for i in (0..decl_idx).rev() {
            let line = lines[i].trim();
            if line.starts_with("//") {
                collected.push(line.trim_start_matches('/').trim().to_string());
            } else if line.starts_with('#') {
                collected.push(line.trim_start_matches('#').trim().to_string());
            } else {
                break;
            }
        }
        collected.reverse();
        collected.retain(|l| !l.is_empty());
        return if collected.is_empty() {
            None
        } else {
            Some(collected.join("\n"))
        };
    }

    None
}

fn clean_block_line(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.trim().to_string()
}

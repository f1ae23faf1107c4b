//! Language tag detection from file paths.
//!
//! The tag is derived once at load time and exposed read-only; the core
//! never interprets it. Syntax coloring is the rendering collaborator's
//! concern.

use std::path::Path;

/// Language associated with a buffer, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// No recognized language.
    #[default]
    None,
    /// C source or header.
    C,
    /// C++ source or header.
    Cpp,
    /// Python.
    Python,
    /// Java.
    Java,
    /// JavaScript.
    JavaScript,
    /// TypeScript.
    TypeScript,
    /// HTML.
    Html,
    /// CSS.
    Css,
    /// Shell script.
    Shell,
    /// Markdown.
    Markdown,
    /// Man page.
    Man,
    /// Rust.
    Rust,
    /// Go.
    Go,
    /// Ruby.
    Ruby,
    /// PHP.
    Php,
    /// SQL.
    Sql,
    /// JSON.
    Json,
    /// XML.
    Xml,
    /// YAML.
    Yaml,
}

impl Language {
    /// Detect the language tag for a file path.
    pub fn from_path(path: &str) -> Self {
        if path.contains("/man/") || path.ends_with(".man") {
            return Self::Man;
        }
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        match ext {
            "c" | "h" => Self::C,
            "cpp" | "cc" | "hpp" | "cxx" => Self::Cpp,
            "py" => Self::Python,
            "java" => Self::Java,
            "js" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "sh" | "bash" | "zsh" => Self::Shell,
            "md" | "markdown" => Self::Markdown,
            "rs" => Self::Rust,
            "go" => Self::Go,
            "rb" => Self::Ruby,
            "php" => Self::Php,
            "sql" => Self::Sql,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("main.rs"), Language::Rust);
        assert_eq!(Language::from_path("src/util.c"), Language::C);
        assert_eq!(Language::from_path("a/b/app.tsx"), Language::TypeScript);
        assert_eq!(Language::from_path("notes.txt"), Language::None);
        assert_eq!(Language::from_path(""), Language::None);
        assert_eq!(Language::from_path("/usr/share/man/ls.1"), Language::Man);
    }
}

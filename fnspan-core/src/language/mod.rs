//! Language detection and abstraction layer
//!
//! This module provides language-agnostic interfaces for parsing C and C++
//! source code and resolving which grammar a file should be parsed with.

pub mod c;
pub mod cpp;
pub mod declarator;

use crate::parser::LanguageParser;
use anyhow::Result;
use std::path::Path;

pub use c::CParser;
pub use cpp::CppParser;

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// C (.c, .h)
    C,
    /// C++ (.cc, .cpp, .cxx, .hpp, .hh, .hxx)
    Cpp,
}

impl Language {
    /// Detect language from file extension
    ///
    /// Returns `None` if the extension is not recognized. `.h` maps to C;
    /// use [`Language::detect`] when file contents are available, since
    /// many `.h` headers carry C++ code.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "c" | "h" => Some(Language::C),
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Detect language from file path
    ///
    /// Returns `None` if the file has no extension or the extension is not
    /// recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Detect language from file path and contents
    ///
    /// Same as [`Language::from_path`], except that a `.h` header whose
    /// contents show C++-only constructs resolves to C++ rather than C.
    pub fn detect(path: &Path, source: &str) -> Option<Self> {
        let by_extension = Self::from_path(path)?;
        if by_extension == Language::C
            && path.extension().and_then(|e| e.to_str()) == Some("h")
            && is_cpp_header(source)
        {
            return Some(Language::Cpp);
        }
        Some(by_extension)
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
        }
    }

    /// Get file extensions for this language
    ///
    /// Returns a list of file extensions (without the dot) that this
    /// language uses.
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            Language::C => &["c", "h"],
            Language::Cpp => &["cc", "cpp", "cxx", "hpp", "hh", "hxx"],
        }
    }

    /// Construct the parser for this language
    pub fn parser(&self) -> Result<Box<dyn LanguageParser>> {
        match self {
            Language::C => Ok(Box::new(CParser::new()?)),
            Language::Cpp => Ok(Box::new(CppParser::new()?)),
        }
    }
}

/// Detect whether a `.h` header contains C++ code
///
/// Checks for keywords and patterns that are not valid C, so the C grammar
/// is not asked to parse C++ headers. Only the first 32KB are scanned;
/// the indicators almost always appear near the top of a header.
fn is_cpp_header(source: &str) -> bool {
    let scan_limit = source.len().min(32 * 1024);
    let source = match source.get(..scan_limit) {
        Some(s) => s,
        // Not a char boundary; scan the whole header instead
        None => source,
    };

    if source.contains("template<") || source.contains("template <") {
        return true;
    }
    if source.contains("using namespace") || source.contains("constexpr ") {
        return true;
    }
    if source.contains("public:") || source.contains("private:") || source.contains("protected:") {
        return true;
    }
    // namespace followed by an identifier
    if let Some(pos) = source.find("namespace ") {
        let after = &source[pos + 10..];
        if let Some(first_char) = after.chars().next() {
            if first_char.is_alphabetic() || first_char == '_' {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_c() {
        assert_eq!(Language::from_extension("c"), Some(Language::C));
        assert_eq!(Language::from_extension("h"), Some(Language::C));
    }

    #[test]
    fn test_from_extension_cpp() {
        assert_eq!(Language::from_extension("cc"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("cxx"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("hpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("hh"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("hxx"), Some(Language::Cpp));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(Language::from_extension("rs"), None);
        assert_eq!(Language::from_extension("py"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path(Path::new("src/main.c")), Some(Language::C));
        assert_eq!(
            Language::from_path(Path::new("src/widget.cpp")),
            Some(Language::Cpp)
        );
        assert_eq!(Language::from_path(Path::new("include/api.h")), Some(Language::C));
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_detect_plain_c_header() {
        let source = "#ifndef API_H\n#define API_H\nint add(int a, int b);\n#endif\n";
        assert_eq!(
            Language::detect(Path::new("api.h"), source),
            Some(Language::C)
        );
    }

    #[test]
    fn test_detect_cpp_header() {
        let source = "namespace widgets {\nclass Widget {\npublic:\n  void draw();\n};\n}\n";
        assert_eq!(
            Language::detect(Path::new("widget.h"), source),
            Some(Language::Cpp)
        );
    }

    #[test]
    fn test_detect_does_not_override_explicit_extensions() {
        // A .c file is C no matter what its text resembles
        let source = "// template <- mentioned in a comment\nint f(void) { return 0; }\n";
        assert_eq!(Language::detect(Path::new("f.c"), source), Some(Language::C));
    }

    #[test]
    fn test_name() {
        assert_eq!(Language::C.name(), "C");
        assert_eq!(Language::Cpp.name(), "C++");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(Language::C.extensions(), &["c", "h"]);
        assert_eq!(
            Language::Cpp.extensions(),
            &["cc", "cpp", "cxx", "hpp", "hh", "hxx"]
        );
    }
}

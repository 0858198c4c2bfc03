use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::tokenizer::{CppTokenizer, JavaTokenizer, PythonTokenizer, Tokenizer};

/// Source languages with a built-in tokenizer and grammar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Java,
    Cpp,
    Python,
}

impl Language {
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Name of the base tokenizer used when the configuration names none.
    pub fn default_tokenizer(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Python => "python",
        }
    }

    /// Instance of the tokenizer named by [`Language::default_tokenizer`].
    pub fn base_tokenizer(&self) -> Box<dyn Tokenizer> {
        match self {
            Language::Java => Box::new(JavaTokenizer::new()),
            Language::Cpp => Box::new(CppTokenizer::new()),
            Language::Python => Box::new(PythonTokenizer::new()),
        }
    }

    /// Picks the language whose default tokenizer accepts `path`.
    pub fn for_path(path: &Path) -> Option<Language> {
        Language::iter().find(|language| language.base_tokenizer().file_filter().matches(path))
    }
}

#[cfg(test)]
mod tests {
    use crate::TokenizerRegistry;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Language::Cpp.to_string(), "cpp");
        assert_eq!(Language::from_str("python").unwrap(), Language::Python);
        assert!(Language::from_str("rust").is_err());
        assert_eq!(serde_json::to_string(&Language::Java).unwrap(), "\"java\"");
    }

    #[test]
    fn test_for_path() {
        assert_eq!(Language::for_path(Path::new("src/Main.java")), Some(Language::Java));
        assert_eq!(Language::for_path(Path::new("lib/x.hpp")), Some(Language::Cpp));
        assert_eq!(Language::for_path(Path::new("setup.py")), Some(Language::Python));
        assert_eq!(Language::for_path(Path::new("README.md")), None);
    }

    #[test]
    fn test_default_tokenizers_are_registered() {
        let registry = TokenizerRegistry::new();
        for language in Language::iter() {
            assert!(registry
                .names()
                .any(|(name, bound)| name == language.default_tokenizer() && bound == language));
            assert_eq!(language.base_tokenizer().identifier_kind(), "IDENTIFIER");
        }
    }
}

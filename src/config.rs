//! # Configuration
//!
//! Which base tokenizer, context format and error policy each language uses.
//! Configuration is plain JSON:
//!
//! ```json
//! {
//!   "languages": {
//!     "java": { "base_tokenizer": "java-whitespace", "format": "infix" },
//!     "cpp": { "recover_errors": true, "tokenize_comments": true }
//!   }
//! }
//! ```
//!
//! Every field is optional. Names are resolved through a
//! [`TokenizerRegistry`] when a tokenizer is built, so an unknown name is
//! reported before any buffer is processed.

use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
    str::FromStr,
};
use thiserror::Error;

use crate::{
    annotated::AnnotatedTokenizer,
    annotator::{AnnotationStyle, ContextFormat},
    language::Language,
    syntax::{SyntaxError, TreeSitterExtractor},
    tokenizer::{CppTokenizer, JavaTokenizer, PythonTokenizer, Tokenizer},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown tokenizer: {0}")]
    UnknownTokenizer(String),
    #[error("Tokenizer {name} is registered for {registered}, not {requested}")]
    LanguageMismatch {
        name: String,
        requested: Language,
        registered: Language,
    },
    #[error("Grammar error: {0}")]
    Grammar(#[from] SyntaxError),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Registry name of the base tokenizer; the language default when absent.
    pub base_tokenizer: Option<String>,
    /// Overrides the language's default context format.
    pub format: Option<ContextFormat>,
    /// Annotate trees with syntax errors instead of rejecting the buffer.
    pub recover_errors: bool,
    pub tokenize_comments: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub languages: HashMap<Language, LanguageConfig>,
}

impl TokenizerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Settings for `language`, defaults if the file has none.
    pub fn language(&self, language: Language) -> LanguageConfig {
        self.languages.get(&language).cloned().unwrap_or_default()
    }
}

impl FromStr for TokenizerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Builds a base tokenizer from a language's settings.
pub type TokenizerFactory = fn(&LanguageConfig) -> Box<dyn Tokenizer>;

#[derive(Debug, Clone, Copy)]
struct RegistryEntry {
    language: Language,
    factory: TokenizerFactory,
}

/// Named base tokenizer factories.
#[derive(Debug, Clone)]
pub struct TokenizerRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerRegistry {
    /// Registry holding the built-in tokenizers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("java", Language::Java, |config| {
            Box::new(JavaTokenizer::new().with_comments(config.tokenize_comments))
        });
        registry.register("java-whitespace", Language::Java, |config| {
            Box::new(JavaTokenizer::whitespace().with_comments(config.tokenize_comments))
        });
        registry.register("cpp", Language::Cpp, |config| {
            Box::new(CppTokenizer::new().with_comments(config.tokenize_comments))
        });
        registry.register("cpp-whitespace", Language::Cpp, |config| {
            Box::new(CppTokenizer::whitespace().with_comments(config.tokenize_comments))
        });
        registry.register("cpp-type", Language::Cpp, |config| {
            Box::new(CppTokenizer::typed().with_comments(config.tokenize_comments))
        });
        registry.register("python", Language::Python, |config| {
            Box::new(PythonTokenizer::new().with_comments(config.tokenize_comments))
        });
        registry
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces the tokenizer registered as `name`.
    pub fn register(&mut self, name: &str, language: Language, factory: TokenizerFactory) {
        self.entries
            .insert(name.to_string(), RegistryEntry { language, factory });
    }

    /// Registered names with their languages, sorted by name.
    pub fn names(&self) -> impl Iterator<Item = (&str, Language)> + '_ {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.language))
    }

    pub fn base_tokenizer(
        &self,
        language: Language,
        config: &LanguageConfig,
    ) -> Result<Box<dyn Tokenizer>, ConfigError> {
        let name = config
            .base_tokenizer
            .as_deref()
            .unwrap_or_else(|| language.default_tokenizer());
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTokenizer(name.to_string()))?;
        if entry.language != language {
            return Err(ConfigError::LanguageMismatch {
                name: name.to_string(),
                requested: language,
                registered: entry.language,
            });
        }
        tracing::debug!("using base tokenizer {} for {}", name, language);
        Ok((entry.factory)(config))
    }

    pub fn annotated_tokenizer(
        &self,
        language: Language,
        config: &LanguageConfig,
    ) -> Result<AnnotatedTokenizer, ConfigError> {
        let base = self.base_tokenizer(language, config)?;
        let extractor = TreeSitterExtractor::new(language)?.recover_errors(config.recover_errors);
        let mut style = AnnotationStyle::for_language(language);
        if let Some(format) = config.format {
            style = style.with_format(format);
        }
        Ok(AnnotatedTokenizer::new(base, extractor, style))
    }
}

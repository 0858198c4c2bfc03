use thiserror::Error;

use crate::config::ConfigError;
use crate::syntax::SyntaxError;
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    /// The syntax extractor rejected the buffer.
    #[error("Parse error: {0}")]
    Parse(#[from] SyntaxError),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Error::UnsupportedOperation(operation.into())
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

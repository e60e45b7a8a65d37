//! Error types for the core library

use thiserror::Error;

/// Error type for core operations
///
/// Nothing here is fatal to a host process: configuration problems skip the
/// affected feature, translation failures are scoped to one target language,
/// and document errors abort at most the current pass.
#[derive(Debug, Error)]
pub enum Error {
    /// Required external configuration is absent or invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single target-language translation lookup failed
    #[error("translation to '{language}' failed: {message}")]
    Translation {
        /// Target language code of the failed lookup
        language: String,
        /// Provider-reported failure message
        message: String,
    },

    /// The document accessor rejected an operation
    #[error("document error: {0}")]
    Document(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let error = Error::Configuration("missing glossary path".to_string());
        assert_eq!(
            error.to_string(),
            "configuration error: missing glossary path"
        );
    }

    #[test]
    fn test_translation_error_display() {
        let error = Error::Translation {
            language: "en".to_string(),
            message: "provider unreachable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "translation to 'en' failed: provider unreachable"
        );
    }

    #[test]
    fn test_document_error_display() {
        let error = Error::Document("range out of bounds".to_string());
        assert_eq!(error.to_string(), "document error: range out of bounds");
    }
}

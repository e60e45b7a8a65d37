//! Processing configuration

use crate::error::{Error, Result};

/// Default configuration constants
pub mod defaults {
    /// Default i18n call function name
    pub const FUNCTION_NAME: &str = "$t";

    /// Default source language code
    pub const SOURCE_LANGUAGE: &str = "zh";
}

/// Core processing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the i18n call function wrapped around assigned keys
    pub function_name: String,
    /// Language code of the scanned text
    pub source_language: String,
    /// Target language codes for translation
    pub languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            function_name: defaults::FUNCTION_NAME.to_string(),
            source_language: defaults::SOURCE_LANGUAGE.to_string(),
            languages: Vec::new(),
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.function_name.is_empty()
            || !self
                .function_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
        {
            return Err(Error::Configuration(format!(
                "'{}' is not a valid i18n function name",
                self.function_name
            )));
        }
        for code in std::iter::once(&self.source_language).chain(self.languages.iter()) {
            if code.is_empty()
                || !code
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                return Err(Error::Configuration(format!(
                    "'{code}' is not a valid language code"
                )));
            }
        }
        if self.languages.contains(&self.source_language) {
            return Err(Error::Configuration(format!(
                "source language '{}' repeated in targets",
                self.source_language
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    function_name: Option<String>,
    source_language: Option<String>,
    languages: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the i18n call function name
    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Set the source language code
    pub fn source_language(mut self, code: impl Into<String>) -> Self {
        self.source_language = Some(code.into());
        self
    }

    /// Add one target language
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    /// Replace the target language list
    pub fn languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();
        if let Some(name) = self.function_name {
            config.function_name = name;
        }
        if let Some(code) = self.source_language {
            config.source_language = code;
        }
        config.languages = self.languages;
        config.validate()?;
        Ok(config)
    }
}

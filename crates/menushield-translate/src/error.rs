//! Error types for the translation engine
//!
//! Construction errors are returned to the caller. Per-request errors are
//! folded into a [`crate::TranslationResult`] with method `error` and never
//! escape [`crate::TemplateTranslationService::translate_text`].

use menushield_templates::TemplateError;

/// Errors raised by the translation engine
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Input text is empty or whitespace
    #[error("text to translate is blank")]
    BlankText,

    /// Target language code is blank or not alphabetic
    #[error("invalid target language: '{0}'")]
    InvalidLanguage(String),

    /// Template tables failed to load or validate
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A template term could not be compiled into a substitution pattern
    #[error("invalid substitution pattern for '{term}': {source}")]
    Pattern {
        /// English term
        term: String,
        /// Regex compile error
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_language_display() {
        let err = TranslateError::InvalidLanguage("f1".to_string());
        assert_eq!(err.to_string(), "invalid target language: 'f1'");
    }

    #[test]
    fn template_error_converts() {
        let err: TranslateError = TemplateError::EmptyTable("dishes".to_string()).into();
        assert!(err.to_string().contains("dishes table is empty"));
    }
}

//! Error types for template loading and validation

use std::path::PathBuf;

/// Errors while loading or validating template tables
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Table source could not be parsed
    #[error("syntax error in {table} table: {message}")]
    Syntax {
        /// Table being parsed
        table: String,
        /// Parser message
        message: String,
    },

    /// IO error while reading a table file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Table has no categories or phrases
    #[error("{0} table is empty")]
    EmptyTable(String),

    /// Category has neither patterns nor translations
    #[error("category '{category}' in {table} table has no patterns or translations")]
    EmptyCategory {
        /// Owning table
        table: String,
        /// Offending category
        category: String,
    },

    /// Pattern, translation key or phrase is blank
    #[error("blank term in {table} table entry '{entry}'")]
    BlankTerm {
        /// Owning table
        table: String,
        /// Category or phrase containing the blank term
        entry: String,
    },

    /// Bundled tables failed to load
    #[error("bundled templates are invalid: {0}")]
    Builtin(String),
}

impl TemplateError {
    /// Create syntax error for a table
    pub fn syntax(table: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Syntax {
            table: table.into(),
            message: message.to_string(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

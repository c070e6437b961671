use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Unsupported SQL command: {0}")]
    UnsupportedCommand(String),

    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("No database selected. Use 'USE database_name;' first.")]
    NoDatabaseSelected,

    #[error("Table '{table}' not found in database '{database}'")]
    TableNotFound { table: String, database: String },

    #[error("Table '{table}' already exists in database '{database}'")]
    TableAlreadyExists { table: String, database: String },

    #[error("Invalid columns: {}", .0.join(", "))]
    UnknownColumn(Vec<String>),

    #[error("Column count doesn't match value count in row {row}: expected {expected}, got {actual}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Database '{0}' already exists")]
    DatabaseAlreadyExists(String),

    #[error("Database '{0}' does not exist")]
    DatabaseNotFound(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Machine-readable classification of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UnsupportedCommand,
    SyntaxError,
    NoDatabaseSelected,
    TableNotFound,
    TableAlreadyExists,
    UnknownColumn,
    ArityMismatch,
    DatabaseAlreadyExists,
    DatabaseNotFound,
    UnsupportedOperator,
    Storage,
}

/// Failure shape handed back to whoever renders the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl DbError {
    pub fn syntax(message: impl Into<String>) -> Self {
        DbError::SyntaxError(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::UnsupportedCommand(_) => ErrorKind::UnsupportedCommand,
            DbError::SyntaxError(_) => ErrorKind::SyntaxError,
            DbError::NoDatabaseSelected => ErrorKind::NoDatabaseSelected,
            DbError::TableNotFound { .. } => ErrorKind::TableNotFound,
            DbError::TableAlreadyExists { .. } => ErrorKind::TableAlreadyExists,
            DbError::UnknownColumn(_) => ErrorKind::UnknownColumn,
            DbError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            DbError::DatabaseAlreadyExists(_) => ErrorKind::DatabaseAlreadyExists,
            DbError::DatabaseNotFound(_) => ErrorKind::DatabaseNotFound,
            DbError::UnsupportedOperator(_) => ErrorKind::UnsupportedOperator,
            DbError::Storage(_) | DbError::IoError(_) | DbError::JsonError(_) => {
                ErrorKind::Storage
            }
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl serde::Serialize for DbError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

use thiserror::Error;

/// Every failure the engine can surface to the caller.
///
/// Validation always runs before mutation, so a failed command leaves the
/// database exactly as it was; the read-loop reports the message and keeps
/// going.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Table '{0}' does not exist in database")]
    TableNotFound(String),

    #[error("Table '{0}' already exists in database")]
    DuplicateTable(String),

    #[error("Column '{column}' does not exist in table '{table}'")]
    ColumnNotFound { column: String, table: String },

    #[error("Column '{column}' already exists in table '{table}'")]
    DuplicateColumn { column: String, table: String },

    #[error("Row has '{got}' values but table has '{expected}' columns")]
    RowArityMismatch { expected: usize, got: usize },

    #[error("Value '{value}' is not a valid number for column '{column}'")]
    TypeMismatch { value: String, column: String },

    #[error("Value '{0}' is not a valid number")]
    InvalidNumericLiteral(String),

    #[error("Operator '{0}' is not valid")]
    InvalidOperator(String),

    #[error("Order '{0}' is invalid")]
    InvalidSortDirection(String),

    #[error("Command '{0}' does not exist")]
    UnknownCommand(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

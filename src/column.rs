use crate::column_type::ColumnType;
use crate::error::DbError;

/// A named, typed sequence of cell values.
///
/// Row `i` across all columns of a table forms one logical row; the column
/// itself knows nothing about its siblings. Values are kept as text
/// regardless of the declared type, so NUMBER cells are validated when they
/// enter the column, not when they are read back.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub data: Vec<String>,
}

impl Column {
    /// Creates a new, empty column.
    pub fn new(name: String, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            data: Vec::new(),
        }
    }

    /// Creates a column with pre-existing cells (persistence load and
    /// back-filled `ADD_COLUMN`).
    pub fn with_data(name: String, column_type: ColumnType, data: Vec<String>) -> Self {
        Self {
            name,
            column_type,
            data,
        }
    }

    /// Returns the number of cells currently stored in the column.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks a candidate value against the declared type without storing it.
    ///
    /// TEXT accepts anything; NUMBER requires the value to parse as `f64`.
    pub fn validate(&self, value: &str) -> Result<(), DbError> {
        if self.column_type == ColumnType::Number && value.parse::<f64>().is_err() {
            return Err(DbError::TypeMismatch {
                value: value.to_string(),
                column: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Appends a cell. The caller is responsible for validation so that
    /// multi-column inserts can stay all-or-nothing.
    pub fn push(&mut self, value: String) {
        self.data.push(value);
    }

    /// Overwrites the cell at `row`. The index must be in bounds.
    pub fn set(&mut self, row: usize, value: &str) {
        self.data[row] = value.to_string();
    }

    /// Parses the cell at `row` as a number.
    pub fn number_at(&self, row: usize) -> Result<f64, DbError> {
        self.data[row]
            .parse()
            .map_err(|_| DbError::InvalidNumericLiteral(self.data[row].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_empty() {
        let col = Column::new("age".into(), ColumnType::Number);
        assert_eq!(col.name, "age");
        assert_eq!(col.column_type, ColumnType::Number);
        assert!(col.is_empty());
    }

    #[test]
    fn test_validate_number_column() {
        let col = Column::new("age".into(), ColumnType::Number);
        assert!(col.validate("42").is_ok());
        assert!(col.validate("3.14").is_ok());
        assert!(col.validate("-1e3").is_ok());
        assert!(col.validate("abc").is_err());
        assert!(col.validate("").is_err());
    }

    #[test]
    fn test_validate_text_column_accepts_anything() {
        let col = Column::new("name".into(), ColumnType::Text);
        assert!(col.validate("alice").is_ok());
        assert!(col.validate("123").is_ok());
        assert!(col.validate("").is_ok());
    }

    #[test]
    fn test_push_and_set() {
        let mut col = Column::new("name".into(), ColumnType::Text);
        col.push("alice".into());
        col.push("bob".into());
        assert_eq!(col.len(), 2);

        col.set(1, "carol");
        assert_eq!(col.data, vec!["alice".to_string(), "carol".to_string()]);
    }

    #[test]
    fn test_number_at() {
        let col = Column::with_data("n".into(), ColumnType::Number, vec!["1.5".into(), "x".into()]);
        assert_eq!(col.number_at(0).unwrap(), 1.5);
        assert!(matches!(
            col.number_at(1),
            Err(DbError::InvalidNumericLiteral(v)) if v == "x"
        ));
    }
}

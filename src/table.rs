use crate::column::Column;
use crate::column_type::ColumnType;
use crate::error::DbError;

/// A named, ordered collection of columns.
///
/// Every column always holds the same number of cells (the table's row
/// count); rows are addressed purely by integer position across the parallel
/// column vectors, never materialized as records. Column lookup is a linear
/// scan over the ordered sequence, which listing commands rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: String, columns: Vec<Column>) -> Self {
        Self { name, columns }
    }

    /// Number of logical rows, i.e. the cell count shared by every column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| col.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    /// Resolves a column or fails with the table's name in the message.
    pub fn require_column(&self, name: &str) -> Result<&Column, DbError> {
        self.column(name).ok_or_else(|| DbError::ColumnNotFound {
            column: name.to_string(),
            table: self.name.clone(),
        })
    }

    /// Appends a new column, back-filled with empty cells so it lines up
    /// with the existing rows.
    pub fn add_column(&mut self, name: String, column_type: ColumnType) -> Result<(), DbError> {
        if self.has_column(&name) {
            return Err(DbError::DuplicateColumn {
                column: name,
                table: self.name.clone(),
            });
        }
        let data = vec![String::new(); self.row_count()];
        self.columns.push(Column::with_data(name, column_type, data));
        Ok(())
    }

    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<(), DbError> {
        if !self.has_column(old) {
            return Err(DbError::ColumnNotFound {
                column: old.to_string(),
                table: self.name.clone(),
            });
        }
        if self.has_column(new) {
            return Err(DbError::DuplicateColumn {
                column: new.to_string(),
                table: self.name.clone(),
            });
        }
        if let Some(column) = self.column_mut(old) {
            column.name = new.to_string();
        }
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Result<(), DbError> {
        let position = self
            .columns
            .iter()
            .position(|col| col.name == name)
            .ok_or_else(|| DbError::ColumnNotFound {
                column: name.to_string(),
                table: self.name.clone(),
            })?;
        self.columns.remove(position);
        Ok(())
    }

    /// Appends one row, positionally.
    ///
    /// Arity and per-value types are checked up front; no column is touched
    /// until the whole row is known to be valid.
    pub fn insert_row(&mut self, values: Vec<String>) -> Result<(), DbError> {
        if values.len() != self.columns.len() {
            return Err(DbError::RowArityMismatch {
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(&values) {
            column.validate(value)?;
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
        Ok(())
    }

    /// Removes the given row positions from every column.
    ///
    /// `rows` must be sorted in descending order so earlier removals never
    /// shift a position that is still scheduled for removal.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        for column in &mut self.columns {
            for &row in rows {
                column.data.remove(row);
            }
        }
    }
}

use std::collections::{HashMap, HashSet};

use crate::column::Column;
use crate::condition::Condition;
use crate::error::DbError;
use crate::table::Table;

/// The in-memory tabular store: a named, ordered collection of tables.
///
/// Tables keep their declaration order (significant for `TABLES_NAMES`) in a
/// vector; an auxiliary name-to-position map gives O(1) lookup without
/// disturbing that order. The database exclusively owns every table, column
/// and cell below it, and it is the explicit context object every command
/// runs against.
#[derive(Debug, Clone)]
pub struct Database {
    pub name: String,
    tables: Vec<Table>,
    lookup: HashMap<String, usize>,
}

/// Materialized result of a `SELECT`, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Projected column names, in the order the query asked for them.
    pub columns: Vec<String>,
    /// One entry per selected row, cells in `columns` order.
    pub rows: Vec<Vec<String>>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            name: "db1".to_string(),
            tables: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    // --- Lookup ---

    pub fn table(&self, name: &str) -> Result<&Table, DbError> {
        self.lookup
            .get(name)
            .map(|&position| &self.tables[position])
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, DbError> {
        match self.lookup.get(name) {
            Some(&position) => Ok(&mut self.tables[position]),
            None => Err(DbError::TableNotFound(name.to_string())),
        }
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// All tables in declaration order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|table| table.name.as_str()).collect()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    // --- Schema operations ---

    /// Creates a table with the given columns and zero rows.
    ///
    /// Fails if the table name is taken or if two supplied columns share a
    /// name; nothing is created in either case.
    pub fn create_table(&mut self, name: String, columns: Vec<Column>) -> Result<(), DbError> {
        if self.has_table(&name) {
            return Err(DbError::DuplicateTable(name));
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DbError::DuplicateColumn {
                    column: column.name.clone(),
                    table: name,
                });
            }
        }
        self.lookup.insert(name.clone(), self.tables.len());
        self.tables.push(Table::new(name, columns));
        Ok(())
    }

    pub fn rename_table(&mut self, old: &str, new: &str) -> Result<(), DbError> {
        if !self.has_table(old) {
            return Err(DbError::TableNotFound(old.to_string()));
        }
        if self.has_table(new) {
            return Err(DbError::DuplicateTable(new.to_string()));
        }
        if let Some(position) = self.lookup.remove(old) {
            self.lookup.insert(new.to_string(), position);
            self.tables[position].name = new.to_string();
        }
        Ok(())
    }

    pub fn drop_table(&mut self, name: &str) -> Result<(), DbError> {
        match self.lookup.remove(name) {
            Some(position) => {
                self.tables.remove(position);
                self.reindex();
                Ok(())
            }
            None => Err(DbError::TableNotFound(name.to_string())),
        }
    }

    /// Wholesale replacement used by `READ_DATABASE`: the loaded state only
    /// takes effect once the whole file parsed cleanly.
    pub fn replace(&mut self, name: String, tables: Vec<Table>) {
        self.name = name;
        self.tables = tables;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.lookup = self
            .tables
            .iter()
            .enumerate()
            .map(|(position, table)| (table.name.clone(), position))
            .collect();
    }

    // --- Data operations ---

    /// Appends one positional row to a table.
    pub fn insert_row(&mut self, table: &str, values: Vec<String>) -> Result<(), DbError> {
        self.table_mut(table)?.insert_row(values)
    }

    /// Overwrites a column's cells with `new_value`: every cell when no
    /// condition is given, otherwise only the rows the condition selects.
    ///
    /// The value is type-checked and the row-index set computed before any
    /// cell changes.
    pub fn update_rows(
        &mut self,
        table: &str,
        column: &str,
        new_value: &str,
        condition: Option<&Condition>,
    ) -> Result<(), DbError> {
        let rows = {
            let table = self.table(table)?;
            table.require_column(column)?.validate(new_value)?;
            match condition {
                Some(condition) => condition.matching_rows(table)?,
                None => (0..table.row_count()).collect(),
            }
        };

        let table = self.table_mut(table)?;
        let name = table.name.clone();
        let column = table
            .column_mut(column)
            .ok_or_else(|| DbError::ColumnNotFound {
                column: column.to_string(),
                table: name,
            })?;
        for row in rows {
            column.set(row, new_value);
        }
        Ok(())
    }

    /// Removes every row the condition selects, from every column, walking
    /// the selected positions from highest to lowest so removals never shift
    /// a position still scheduled for removal.
    pub fn remove_rows(&mut self, table: &str, condition: &Condition) -> Result<(), DbError> {
        let mut doomed = condition.matching_rows(self.table(table)?)?;
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        self.table_mut(table)?.remove_rows(&doomed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_type::ColumnType;
    use crate::condition::CompareOp;

    fn users_columns() -> Vec<Column> {
        vec![
            Column::new("name".into(), ColumnType::Text),
            Column::new("age".into(), ColumnType::Number),
        ]
    }

    fn cond(column: &str, op: &str, value: &str) -> Condition {
        Condition {
            column: column.into(),
            op: CompareOp::parse(op).unwrap(),
            value: value.into(),
        }
    }

    #[test]
    fn test_create_table_starts_empty_in_declared_order() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();

        let table = db.table("users").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_names(), vec!["name", "age"]);
    }

    #[test]
    fn test_duplicate_table_leaves_database_unchanged() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();
        let result = db.create_table("users".into(), vec![]);

        assert!(matches!(result, Err(DbError::DuplicateTable(name)) if name == "users"));
        assert_eq!(db.table_count(), 1);
        assert_eq!(db.table("users").unwrap().columns.len(), 2);
    }

    #[test]
    fn test_duplicate_column_rejected_at_creation() {
        let mut db = Database::new();
        let columns = vec![
            Column::new("a".into(), ColumnType::Text),
            Column::new("a".into(), ColumnType::Number),
        ];
        let result = db.create_table("t".into(), columns);
        assert!(matches!(result, Err(DbError::DuplicateColumn { .. })));
        assert_eq!(db.table_count(), 0);
    }

    #[test]
    fn test_table_names_keep_declaration_order() {
        let mut db = Database::new();
        for name in ["zeta", "alpha", "mid"] {
            db.create_table(name.into(), vec![]).unwrap();
        }
        assert_eq!(db.table_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_rename_table_updates_lookup() {
        let mut db = Database::new();
        db.create_table("old".into(), users_columns()).unwrap();
        db.rename_table("old", "new").unwrap();

        assert!(db.table("old").is_err());
        assert_eq!(db.table("new").unwrap().name, "new");

        db.create_table("other".into(), vec![]).unwrap();
        assert!(matches!(
            db.rename_table("new", "other"),
            Err(DbError::DuplicateTable(_))
        ));
        assert!(matches!(
            db.rename_table("ghost", "x"),
            Err(DbError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_drop_table_reindexes_survivors() {
        let mut db = Database::new();
        for name in ["a", "b", "c"] {
            db.create_table(name.into(), vec![]).unwrap();
        }
        db.drop_table("b").unwrap();

        assert_eq!(db.table_names(), vec!["a", "c"]);
        // Lookup must still resolve the shifted table.
        assert_eq!(db.table("c").unwrap().name, "c");
        assert!(matches!(db.drop_table("b"), Err(DbError::TableNotFound(_))));
    }

    #[test]
    fn test_insert_row_type_failure_keeps_row_count() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();

        let result = db.insert_row("users", vec!["alice".into(), "abc".into()]);
        assert!(matches!(result, Err(DbError::TypeMismatch { .. })));
        assert_eq!(db.table("users").unwrap().row_count(), 0);
    }

    #[test]
    fn test_update_rows_without_condition_overwrites_all() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();
        db.insert_row("users", vec!["alice".into(), "30".into()]).unwrap();
        db.insert_row("users", vec!["bob".into(), "25".into()]).unwrap();

        db.update_rows("users", "age", "0", None).unwrap();
        assert_eq!(db.table("users").unwrap().column("age").unwrap().data, vec!["0", "0"]);
    }

    #[test]
    fn test_update_rows_with_condition() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();
        db.insert_row("users", vec!["alice".into(), "30".into()]).unwrap();
        db.insert_row("users", vec!["bob".into(), "25".into()]).unwrap();

        let condition = cond("name", "==", "bob");
        db.update_rows("users", "age", "26", Some(&condition)).unwrap();

        let ages = &db.table("users").unwrap().column("age").unwrap().data;
        assert_eq!(*ages, vec!["30".to_string(), "26".to_string()]);
    }

    #[test]
    fn test_update_rows_rejects_bad_value_before_mutating() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();
        db.insert_row("users", vec!["alice".into(), "30".into()]).unwrap();

        let result = db.update_rows("users", "age", "old", None);
        assert!(matches!(result, Err(DbError::TypeMismatch { .. })));
        assert_eq!(db.table("users").unwrap().column("age").unwrap().data, vec!["30"]);
    }

    #[test]
    fn test_remove_rows_by_condition() {
        let mut db = Database::new();
        db.create_table("users".into(), users_columns()).unwrap();
        for (name, age) in [("a", "10"), ("b", "20"), ("c", "30"), ("d", "40")] {
            db.insert_row("users", vec![name.into(), age.into()]).unwrap();
        }

        db.remove_rows("users", &cond("age", ">", "15")).unwrap();

        let table = db.table("users").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column("name").unwrap().data, vec!["a"]);
    }

    #[test]
    fn test_replace_swaps_everything() {
        let mut db = Database::new();
        db.create_table("old".into(), vec![]).unwrap();

        let tables = vec![Table::new("fresh".into(), users_columns())];
        db.replace("db2".into(), tables);

        assert_eq!(db.name, "db2");
        assert!(db.table("old").is_err());
        assert!(db.table("fresh").is_ok());
    }
}

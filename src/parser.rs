use crate::column::Column;
use crate::column_type::ColumnType;
use crate::condition::{Condition, WhereClause};
use crate::database::{Database, QueryResult};
use crate::error::DbError;
use crate::persist;
use crate::sort::OrderBy;
use crate::table::Table;
use crate::tokenizer::Tokens;

/// What a successfully executed command hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A human-readable confirmation or listing.
    Message(String),
    /// The materialized result set of a `SELECT`.
    Rows(QueryResult),
}

/// The command dispatcher: routes one query line to the store.
///
/// The parser is stateless between calls; it only borrows the database it
/// runs against. Every precondition (existence, uniqueness, arity, type) is
/// checked before any mutation, so a failed command is never observable as a
/// partial change.
pub struct Parser<'a> {
    database: &'a mut Database,
}

impl<'a> Parser<'a> {
    pub fn new(database: &'a mut Database) -> Self {
        Self { database }
    }

    /// Executes one line of the query language.
    pub fn run(&mut self, line: &str) -> Result<Response, DbError> {
        let mut tokens = Tokens::new(line);
        let command = tokens.keyword();

        match command.as_str() {
            "CREATE_TABLE" => self.create_table(&mut tokens),
            "RENAME_TABLE" => self.rename_table(&mut tokens),
            "DROP_TABLE" => self.drop_table(&mut tokens),
            "ALTER_TABLE" => self.alter_table(&mut tokens),
            "SELECT" => self.select(&mut tokens),
            "WRITE_DATABASE" => self.write_database(&mut tokens),
            "READ_DATABASE" => self.read_database(&mut tokens),
            "TABLES_NAMES" => Ok(Response::Message(format!(
                "Database '{}' has '{}' tables.",
                self.database.name,
                self.database.table_names().join(" ")
            ))),
            "COLUMNS_NAMES" => {
                let table = self.database.table(tokens.next_or_empty())?;
                Ok(Response::Message(format!(
                    "Table '{}' has '{}' columns.",
                    table.name,
                    table.column_names().join(" ")
                )))
            }
            "TABLES_COUNT" => Ok(Response::Message(format!(
                "Database '{}' has '{}' tables.",
                self.database.name,
                self.database.table_count()
            ))),
            "COLUMNS_COUNT" => {
                let table = self.database.table(tokens.next_or_empty())?;
                Ok(Response::Message(format!(
                    "Table '{}' has '{}' columns.",
                    table.name,
                    table.columns.len()
                )))
            }
            "RENAME_DATABASE" => {
                let old = self.database.name.clone();
                self.database.name = tokens.next_or_empty().to_string();
                Ok(Response::Message(format!(
                    "Database '{}' renamed to '{}'.",
                    old, self.database.name
                )))
            }
            _ => Err(DbError::UnknownCommand(command)),
        }
    }

    // --- Table DDL ---

    fn create_table(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let name = tokens.next_or_empty().to_string();

        // Column definitions come in (name, type) pairs until the line ends;
        // a trailing lone token is dropped, matching stream-pair extraction.
        let mut columns = Vec::new();
        while let Some(column_name) = tokens.next() {
            let Some(type_word) = tokens.next() else {
                break;
            };
            columns.push(Column::new(
                column_name.to_string(),
                ColumnType::parse_keyword(type_word),
            ));
        }

        self.database.create_table(name.clone(), columns)?;
        Ok(Response::Message(format!(
            "Table '{name}' created in database."
        )))
    }

    fn rename_table(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let old = tokens.next_or_empty().to_string();
        let new = tokens.next_or_empty().to_string();
        self.database.rename_table(&old, &new)?;
        Ok(Response::Message(format!(
            "Table '{old}' renamed to '{new}'."
        )))
    }

    fn drop_table(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let name = tokens.next_or_empty().to_string();
        self.database.drop_table(&name)?;
        Ok(Response::Message(format!(
            "Table '{name}' dropped from database."
        )))
    }

    // --- Column DDL and row DML, nested under ALTER_TABLE ---

    fn alter_table(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let table_name = tokens.next_or_empty().to_string();
        let operation = tokens.keyword();

        // The table must exist before any nested operation is considered.
        self.database.table(&table_name)?;

        match operation.as_str() {
            "ADD_COLUMN" => {
                let column = tokens.next_or_empty().to_string();
                let column_type = ColumnType::parse_keyword(tokens.next_or_empty());
                self.database
                    .table_mut(&table_name)?
                    .add_column(column.clone(), column_type)?;
                Ok(Response::Message(format!(
                    "Column '{column}' added to table '{table_name}'."
                )))
            }
            "RENAME_COLUMN" => {
                let old = tokens.next_or_empty().to_string();
                let new = tokens.next_or_empty().to_string();
                self.database
                    .table_mut(&table_name)?
                    .rename_column(&old, &new)?;
                Ok(Response::Message(format!(
                    "Column '{old}' renamed to '{new}' in table '{table_name}'."
                )))
            }
            "DROP_COLUMN" => {
                let column = tokens.next_or_empty().to_string();
                self.database.table_mut(&table_name)?.drop_column(&column)?;
                Ok(Response::Message(format!(
                    "Column '{column}' removed from table '{table_name}'."
                )))
            }
            "INSERT_ROW" => {
                let mut values = Vec::new();
                while let Some(value) = tokens.next() {
                    values.push(value.to_string());
                }
                self.database.insert_row(&table_name, values)?;
                Ok(Response::Message(format!(
                    "Row inserted to table '{table_name}'."
                )))
            }
            "UPDATE_ROW" => {
                let column = tokens.next_or_empty().to_string();
                let value = tokens.next_or_empty().to_string();

                // A single optional condition, not a full boolean expression;
                // the asymmetry with SELECT/DELETE is part of the grammar.
                let condition = if tokens.peek_keyword("WHERE") {
                    tokens.next();
                    let table = self.database.table(&table_name)?;
                    Some(Condition::parse(tokens, table)?)
                } else {
                    None
                };

                self.database
                    .update_rows(&table_name, &column, &value, condition.as_ref())?;
                Ok(Response::Message(format!(
                    "Row updated in table '{table_name}'."
                )))
            }
            "DELETE_ROW" => {
                let keyword = tokens.keyword();
                if keyword != "WHERE" {
                    return Err(DbError::UnknownCommand(keyword));
                }
                let condition = {
                    let table = self.database.table(&table_name)?;
                    Condition::parse(tokens, table)?
                };
                self.database.remove_rows(&table_name, &condition)?;
                Ok(Response::Message(format!(
                    "Row deleted from table '{table_name}'."
                )))
            }
            _ => Err(DbError::UnknownCommand(operation)),
        }
    }

    // --- SELECT pipeline ---

    fn select(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        // Projected columns run up to the FROM keyword.
        let mut selected = Vec::new();
        loop {
            let word = tokens.next_or_empty();
            if word.is_empty() || word.eq_ignore_ascii_case("FROM") {
                break;
            }
            selected.push(word.to_string());
        }

        let table = self.database.table(tokens.next_or_empty())?;

        if selected.len() == 1 && selected[0] == "*" {
            selected = table.column_names();
        }
        for column in &selected {
            table.require_column(column)?;
        }

        // The row-index set threads through the optional stages; cell values
        // are only copied at the very end.
        let mut rows: Vec<usize> = (0..table.row_count()).collect();

        if tokens.peek_keyword("WHERE") {
            tokens.next();
            let clause = WhereClause::parse(tokens, table)?;
            rows = clause.apply(table, &rows)?;
        }

        if tokens.peek_keyword("ORDER_BY") {
            tokens.next();
            let order_by = OrderBy::parse(tokens, table)?;
            order_by.apply(table, &mut rows)?;
        }

        Ok(Response::Rows(materialize(table, &selected, &rows)?))
    }

    fn write_database(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let path = tokens.next_or_empty().to_string();
        persist::write(self.database, &path)?;
        Ok(Response::Message(format!(
            "Database saved to file '{path}'."
        )))
    }

    fn read_database(&mut self, tokens: &mut Tokens) -> Result<Response, DbError> {
        let path = tokens.next_or_empty().to_string();
        persist::read(self.database, &path)?;
        Ok(Response::Message(format!(
            "Database loaded from file '{path}'."
        )))
    }
}

/// Copies the selected cells out of columnar storage, row by row.
fn materialize(table: &Table, columns: &[String], rows: &[usize]) -> Result<QueryResult, DbError> {
    let projected = columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, DbError>>()?;

    let rows = rows
        .iter()
        .map(|&row| projected.iter().map(|col| col.data[row].clone()).collect())
        .collect();

    Ok(QueryResult {
        columns: columns.to_vec(),
        rows,
    })
}

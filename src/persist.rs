//! Plain-text persistence: one token per line, no escaping.
//!
//! Layout: database name; table count; then per table its name and column
//! count; then per column its name, its type tag (`0` = TEXT, `1` = NUMBER),
//! its cell count and each cell on its own line. Writing then reading back
//! reproduces the database structure and ordering exactly.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use crate::column::Column;
use crate::column_type::ColumnType;
use crate::database::Database;
use crate::error::DbError;
use crate::table::Table;

/// Serializes the whole database to `path`, truncating any existing file.
pub fn write(database: &Database, path: impl AsRef<Path>) -> Result<(), DbError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", database.name)?;
    writeln!(out, "{}", database.table_count())?;
    for table in database.tables() {
        writeln!(out, "{}", table.name)?;
        writeln!(out, "{}", table.columns.len())?;
        for column in &table.columns {
            writeln!(out, "{}", column.name)?;
            writeln!(out, "{}", column.column_type.as_tag())?;
            writeln!(out, "{}", column.data.len())?;
            for value in &column.data {
                writeln!(out, "{value}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Replaces the database's entire contents, name included, with the state
/// stored at `path`.
///
/// The file is parsed completely before anything is swapped in, so a
/// truncated or malformed file leaves the database untouched.
pub fn read(database: &mut Database, path: impl AsRef<Path>) -> Result<(), DbError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let name = next_line(&mut lines)?;
    let table_count = parse_count(&next_line(&mut lines)?)?;

    let mut tables = Vec::with_capacity(table_count);
    for _ in 0..table_count {
        let table_name = next_line(&mut lines)?;
        let column_count = parse_count(&next_line(&mut lines)?)?;

        let mut columns = Vec::with_capacity(column_count);
        for _ in 0..column_count {
            let column_name = next_line(&mut lines)?;
            let tag = parse_count(&next_line(&mut lines)?)?;
            let column_type = ColumnType::from_tag(tag as u8)
                .ok_or_else(|| invalid_data(format!("unknown column type tag '{tag}'")))?;

            let cell_count = parse_count(&next_line(&mut lines)?)?;
            let mut data = Vec::with_capacity(cell_count);
            for _ in 0..cell_count {
                data.push(next_line(&mut lines)?);
            }
            columns.push(Column::with_data(column_name, column_type, data));
        }
        tables.push(Table::new(table_name, columns));
    }

    database.replace(name, tables);
    Ok(())
}

fn next_line(lines: &mut Lines<BufReader<File>>) -> Result<String, DbError> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(invalid_data("unexpected end of file".to_string())),
    }
}

fn parse_count(line: &str) -> Result<usize, DbError> {
    line.parse()
        .map_err(|_| invalid_data(format!("expected a count, found '{line}'")))
}

fn invalid_data(message: String) -> DbError {
    DbError::Io(io::Error::new(io::ErrorKind::InvalidData, message))
}

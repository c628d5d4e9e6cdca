use std::cmp::Ordering;

use crate::column_type::ColumnType;
use crate::error::DbError;
use crate::table::Table;
use crate::tokenizer::Tokens;

/// Per-key sort direction, parsed case-insensitively from `ASC`/`DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(token: &str) -> Result<Self, DbError> {
        if token.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if token.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(DbError::InvalidSortDirection(token.to_string()))
        }
    }
}

/// One `(column, direction)` sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

/// Multi-key ORDER_BY clause.
///
/// Keys compose into a single comparator: the first key decides unless its
/// cells compare equal, in which case the next key takes over. Rows equal
/// under every key keep their relative order from the incoming row-index set
/// (the underlying sort is stable).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    keys: Vec<SortKey>,
}

impl OrderBy {
    /// Consumes `(column, direction)` pairs until the line ends.
    pub fn parse(tokens: &mut Tokens, table: &Table) -> Result<Self, DbError> {
        let mut keys = Vec::new();
        while let Some(column) = tokens.next() {
            let column = column.to_string();
            table.require_column(&column)?;
            let direction = SortDirection::parse(tokens.next_or_empty())?;
            keys.push(SortKey { column, direction });
        }
        Ok(Self { keys })
    }

    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Reorders the row-index set in place.
    ///
    /// NUMBER keys compare as doubles; cells that fail to parse (a back-filled
    /// blank from ADD_COLUMN, for instance) order deterministically last via
    /// the IEEE total ordering. TEXT keys compare lexicographically.
    pub fn apply(&self, table: &Table, rows: &mut [usize]) -> Result<(), DbError> {
        let keys = self
            .keys
            .iter()
            .map(|key| {
                let column = table.require_column(&key.column)?;
                Ok((column, key.direction == SortDirection::Desc))
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        rows.sort_by(|&a, &b| {
            for (column, desc) in &keys {
                let cell_a = &column.data[a];
                let cell_b = &column.data[b];
                if cell_a == cell_b {
                    continue;
                }
                let mut ord = match column.column_type {
                    ColumnType::Number => {
                        let num_a = cell_a.parse::<f64>().unwrap_or(f64::NAN);
                        let num_b = cell_b.parse::<f64>().unwrap_or(f64::NAN);
                        num_a.total_cmp(&num_b)
                    }
                    ColumnType::Text => cell_a.cmp(cell_b),
                };
                if *desc {
                    ord = ord.reverse();
                }
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn scores_table() -> Table {
        let mut table = Table::new(
            "scores".into(),
            vec![
                Column::new("name".into(), ColumnType::Text),
                Column::new("score".into(), ColumnType::Number),
            ],
        );
        table.insert_row(vec!["x".into(), "1".into()]).unwrap();
        table.insert_row(vec!["y".into(), "1".into()]).unwrap();
        table.insert_row(vec!["z".into(), "2".into()]).unwrap();
        table
    }

    fn sorted(table: &Table, clause: &str) -> Vec<usize> {
        let mut tokens = Tokens::new(clause);
        let order_by = OrderBy::parse(&mut tokens, table).unwrap();
        let mut rows: Vec<usize> = (0..table.row_count()).collect();
        order_by.apply(table, &mut rows).unwrap();
        rows
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert!(matches!(
            SortDirection::parse("DOWN"),
            Err(DbError::InvalidSortDirection(d)) if d == "DOWN"
        ));
    }

    #[test]
    fn test_parse_unknown_column() {
        let table = scores_table();
        let mut tokens = Tokens::new("missing ASC");
        assert!(matches!(
            OrderBy::parse(&mut tokens, &table),
            Err(DbError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_numeric_sort_asc_and_desc() {
        let mut table = Table::new(
            "t".into(),
            vec![Column::new("n".into(), ColumnType::Number)],
        );
        for v in ["30", "4", "100"] {
            table.insert_row(vec![v.into()]).unwrap();
        }

        // Numeric, not lexicographic: 4 < 30 < 100.
        assert_eq!(sorted(&table, "n ASC"), vec![1, 0, 2]);
        assert_eq!(sorted(&table, "n DESC"), vec![2, 0, 1]);
    }

    #[test]
    fn test_text_sort_is_lexicographic() {
        let mut table = Table::new(
            "t".into(),
            vec![Column::new("s".into(), ColumnType::Text)],
        );
        for v in ["30", "4", "100"] {
            table.insert_row(vec![v.into()]).unwrap();
        }
        assert_eq!(sorted(&table, "s ASC"), vec![2, 0, 1]);
    }

    #[test]
    fn test_equal_keys_keep_incoming_order() {
        let table = scores_table();
        // "x" and "y" tie on score; their relative order must survive.
        assert_eq!(sorted(&table, "score ASC"), vec![0, 1, 2]);
        assert_eq!(sorted(&table, "score DESC"), vec![2, 0, 1]);
    }

    #[test]
    fn test_multi_key_fallthrough() {
        let table = scores_table();
        assert_eq!(sorted(&table, "score DESC name DESC"), vec![2, 1, 0]);
        assert_eq!(sorted(&table, "score ASC name DESC"), vec![1, 0, 2]);
    }

    #[test]
    fn test_missing_direction_is_malformed() {
        let table = scores_table();
        let mut tokens = Tokens::new("score");
        assert!(matches!(
            OrderBy::parse(&mut tokens, &table),
            Err(DbError::InvalidSortDirection(_))
        ));
    }
}

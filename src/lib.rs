pub mod column;
pub mod column_type;
pub mod condition;
pub mod database;
pub mod error;
pub mod parser;
pub mod persist;
pub mod printer;
pub mod sort;
pub mod table;
pub mod tokenizer;

pub use column::Column;
pub use column_type::ColumnType;
pub use condition::{CompareOp, Condition, Connective, WhereClause};
pub use database::{Database, QueryResult};
pub use error::DbError;
pub use parser::{Parser, Response};
pub use sort::{OrderBy, SortDirection, SortKey};
pub use table::Table;
pub use tokenizer::Tokens;

/// Declared scalar type of a column.
///
/// Cells are stored as text either way; the tag only decides how values are
/// validated and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Lexicographically compared character data.
    Text,
    /// Cells that must parse as 64-bit floats and compare numerically.
    Number,
}

impl ColumnType {
    /// Parses a type keyword, case-insensitively. Any keyword other than
    /// `NUMBER` is treated as `TEXT`.
    pub fn parse_keyword(word: &str) -> Self {
        if word.eq_ignore_ascii_case("NUMBER") {
            Self::Number
        } else {
            Self::Text
        }
    }

    /// Integer tag used by the persistence format (`0` = TEXT, `1` = NUMBER).
    pub fn as_tag(self) -> u8 {
        match self {
            Self::Text => 0,
            Self::Number => 1,
        }
    }

    /// Inverse of [ColumnType::as_tag]; `None` for unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Text),
            1 => Some(Self::Number),
            _ => None,
        }
    }
}

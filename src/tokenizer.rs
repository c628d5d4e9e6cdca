/// Whitespace token cursor over a single query line.
///
/// The query language is strictly whitespace-delimited, so tokenizing is a
/// split; the cursor exists so that clause parsers can peek at a token and
/// decline to consume it (the WHERE reducer stops at the first word that is
/// not a connective and leaves it for the ORDER_BY check).
pub struct Tokens<'a> {
    words: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            words: line.split_whitespace().collect(),
            position: 0,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.words.get(self.position).copied()
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<&'a str> {
        let word = self.peek();
        if word.is_some() {
            self.position += 1;
        }
        word
    }

    /// Consumes the next token, reading past the end of the line as an empty
    /// string. Downstream existence checks then fail with the empty name,
    /// which keeps truncated commands on the ordinary error paths.
    pub fn next_or_empty(&mut self) -> &'a str {
        self.next().unwrap_or("")
    }

    /// Consumes the next token uppercased, for keyword dispatch.
    pub fn keyword(&mut self) -> String {
        self.next_or_empty().to_ascii_uppercase()
    }

    /// True when `peek` equals `keyword`, case-insensitively.
    pub fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|word| word.eq_ignore_ascii_case(keyword))
    }
}

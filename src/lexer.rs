use crate::location::Location;
use crate::token::Word;

fn is_delimiter(c: char) -> bool {
    matches!(c, '=' | '(' | ')' | '<' | '>' | '/' | '*' | '+' | '-')
}

fn is_word_end(c: char) -> bool {
    c.is_whitespace() || is_delimiter(c)
}

/// Splits source text into words on whitespace and on the single character
/// delimiters `= ( ) < > / * + -`.
pub struct Lexer<'s> {
    text: &'s str,
    location: Location,
}

impl<'s> Lexer<'s> {
    pub fn text(&self) -> &str {
        self.text
    }

    fn skip_ws(&mut self) {
        let rest = self.text.trim_start();
        let skipped = &self.text.as_bytes()[..self.text.len() - rest.len()];
        let lines = memchr::memchr_iter(b'\n', skipped).count();

        self.location = self.location.skip_lines(lines);
        self.text = rest;
    }

    #[inline]
    fn split_off(&mut self, pos: usize) -> &'s str {
        let (word, rest) = self.text.split_at(pos);
        self.text = rest;
        word
    }

    fn read_word(&mut self) -> Option<&'s str> {
        let first = self.text.chars().next()?;

        let pos = if is_delimiter(first) {
            first.len_utf8()
        } else {
            self.text.find(is_word_end).unwrap_or_else(|| self.text.len())
        };

        Some(self.split_off(pos))
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Word<'s>;

    fn next(&mut self) -> Option<Word<'s>> {
        self.skip_ws();
        let location = self.location;
        self.read_word().map(|text| Word::new(text, location))
    }
}

pub fn lex(text: &str) -> Lexer<'_> {
    Lexer {
        text,
        location: Location::default(),
    }
}

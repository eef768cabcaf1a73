use crate::location::Location;
use crate::token::Word;

/// Forward only cursor over the words of one program.
///
/// Running out of words is not an error: [`Cursor::peek`] returns `None`
/// and [`Cursor::advance`] stays at the end.
pub struct Cursor<'s> {
    words: Vec<Word<'s>>,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(words: impl IntoIterator<Item = Word<'s>>) -> Self {
        Self {
            words: words.into_iter().collect(),
            pos: 0,
        }
    }

    /// Builds a cursor over words that were split by someone else. All of them
    /// are placed on the first line.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'s str>,
    {
        Self::new(
            words
                .into_iter()
                .map(|text| Word::new(text, Location::default())),
        )
    }

    #[inline]
    pub fn peek(&self, offset: usize) -> Option<&Word<'s>> {
        self.words.get(self.pos + offset)
    }

    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.words.len() {
            self.pos += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Words not consumed yet.
    pub fn remaining(&self) -> &[Word<'s>] {
        &self.words[self.pos..]
    }

    /// Location to blame when input ends too early.
    pub fn end_location(&self) -> Location {
        self.words
            .last()
            .map(|word| word.location)
            .unwrap_or_default()
    }
}

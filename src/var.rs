use serde::{Serialize, Serializer};
use static_assertions::{assert_eq_size, const_assert};
use std::fmt;
use std::iter::FromIterator;

/// One of the single letter variables `a`..`z`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u8);

assert_eq_size!(Var, u8);
// every variable needs its own bit in `VarSet`
const_assert!(Var::COUNT <= 32);

impl Var {
    pub const COUNT: usize = 26;

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Self(ch as u8 - b'a')),
            _ => None,
        }
    }

    /// Accepts exactly one lowercase ASCII letter.
    pub fn from_word(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch),
            _ => None,
        }
    }

    #[inline]
    pub fn name(self) -> char {
        (b'a' + self.0) as char
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All variables in letter order.
    pub fn all() -> impl Iterator<Item = Var> {
        (0..Self::COUNT as u8).map(Var)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Var {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.name())
    }
}

/// Set of variables, iterated in letter order.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct VarSet(u32);

impl VarSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Returns `true` if `var` was not in the set yet.
    pub fn insert(&mut self, var: Var) -> bool {
        let bit = 1 << var.index();
        let inserted = self.0 & bit == 0;
        self.0 |= bit;
        inserted
    }

    #[inline]
    pub fn contains(self, var: Var) -> bool {
        self.0 & (1 << var.index()) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Var> {
        Var::all().filter(move |&var| self.contains(var))
    }
}

impl FromIterator<Var> for VarSet {
    fn from_iter<I: IntoIterator<Item = Var>>(iter: I) -> Self {
        let mut set = Self::new();
        for var in iter {
            set.insert(var);
        }
        set
    }
}

impl fmt::Debug for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Var::name)).finish()
    }
}

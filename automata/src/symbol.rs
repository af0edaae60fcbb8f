use std::convert::TryFrom;
use std::fmt;

/// A transition label. Either a letter of the automaton's alphabet or the empty symbol.
///
/// `Epsilon` orders before every letter, so the epsilon transitions of a state are the first
/// entries of its range in a sorted transition set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A transition that is taken without consuming input.
    Epsilon,
    /// A lowercase ASCII letter or an ASCII digit.
    Letter(char),
}

impl Symbol {
    /// The character that stands for [`Symbol::Epsilon`] in automaton descriptions, regular
    /// expressions and input words.
    pub const EPSILON_CHAR: char = 'E';

    /// Determine if the given char may label a non-epsilon transition.
    #[inline]
    pub fn is_letter(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        *self == Symbol::Epsilon
    }

    /// The letter carried by this symbol, if any.
    #[inline]
    pub fn letter(&self) -> Option<char> {
        match *self {
            Symbol::Letter(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }

    #[inline]
    pub fn as_char(&self) -> char {
        match *self {
            Symbol::Letter(c) => c,
            Symbol::Epsilon => Self::EPSILON_CHAR,
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;

    #[inline]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c == Self::EPSILON_CHAR {
            Ok(Symbol::Epsilon)
        } else if Self::is_letter(c) {
            Ok(Symbol::Letter(c))
        } else {
            Err(c)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

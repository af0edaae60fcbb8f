//! The plain-text automaton description.
//!
//! ```text
//! <states> <number of final states>
//! <final state> <final state> ...
//! <number of transitions>
//! <from> <label> <to>
//! ...
//! ```
//!
//! Fields are separated by any whitespace. The final-state line is omitted when there are no
//! final states. A label is a single lowercase letter, a digit, or [`Symbol::EPSILON_CHAR`].
//! Anything after the last declared transition is ignored.

use crate::automaton::Automaton;
use crate::error::{FormatError, FormatResult};
use crate::symbol::Symbol;
use crate::transition::Transition;

use std::convert::TryFrom;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

struct Tokens<'s> {
    input: SplitWhitespace<'s>,
    position: usize,
}

impl<'s> Tokens<'s> {
    #[inline]
    fn new(s: &'s str) -> Self {
        Self {
            input: s.split_whitespace(),
            position: 0,
        }
    }

    #[inline]
    fn next_token(&mut self, expected: &'static str) -> FormatResult<(usize, &'s str)> {
        match self.input.next() {
            Some(token) => {
                let position = self.position;
                self.position += 1;
                Ok((position, token))
            }
            None => Err(FormatError::UnexpectedEof { expected }),
        }
    }

    #[inline]
    fn next_number(&mut self, expected: &'static str) -> FormatResult<usize> {
        let (position, token) = self.next_token(expected)?;
        token.parse().map_err(|_| FormatError::InvalidNumber {
            token: token.to_owned(),
            position,
        })
    }

    #[inline]
    fn next_symbol(&mut self) -> FormatResult<Symbol> {
        let (position, token) = self.next_token("a transition label")?;
        let invalid = || FormatError::InvalidSymbol {
            token: token.to_owned(),
            position,
        };

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Symbol::try_from(c).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Automaton {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        let mut tokens = Tokens::new(s);

        let states = tokens.next_number("the number of states")?;
        let final_count = tokens.next_number("the number of final states")?;
        let mut final_states = Vec::new();
        for _ in 0..final_count {
            final_states.push(tokens.next_number("a final state")?);
        }

        let transition_count = tokens.next_number("the number of transitions")?;
        let mut transitions = Vec::new();
        for _ in 0..transition_count {
            let from = tokens.next_number("a transition source")?;
            let label = tokens.next_symbol()?;
            let to = tokens.next_number("a transition target")?;
            transitions.push(Transition::new(from, label, to));
        }

        Automaton::from_parts(states, final_states, transitions)
    }
}

impl Automaton {
    /// Read an automaton description from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> FormatResult<Self> {
        let mut s = String::new();
        reader.read_to_string(&mut s)?;
        s.parse()
    }

    /// Read an automaton description from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> FormatResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Write the description of the automaton. Transitions are written in sorted order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)
    }

    /// Write the description of the automaton to a file, replacing its contents.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.states, self.final_states.len())?;

        let mut finals = self.final_states.iter();
        if let Some(first) = finals.next() {
            write!(f, "{}", first)?;
            for s in finals {
                write!(f, " {}", s)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.transitions.len())?;
        for t in self.transitions.iter() {
            writeln!(f, "{} {} {}", t.from(), t.label(), t.to())?;
        }
        Ok(())
    }
}

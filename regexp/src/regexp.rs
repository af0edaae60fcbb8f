use crate::parser::{self, ParseResult, SyntaxError};
use crate::rpn::{ArityError, Rpn};

use std::str::FromStr;

use fsa_automata::Automaton;

/// A parsed regular expression over lowercase letters and digits. It keeps its source and the
/// equivalent sequence in reverse Polish notation, computed once on construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegularExpression {
    /// The regular expression represented by this structure.
    expr: String,
    rpn: Rpn,
}

impl RegularExpression {
    /// Parse a regular expression. Fails on unknown characters, unbalanced parentheses, and
    /// operators that lack operands.
    pub fn new(expr: &str) -> ParseResult<Self> {
        let rpn = parser::parse(expr)?;
        rpn.check().map_err(|e| match e {
            ArityError::LeftoverOperands { count: 0 } => SyntaxError::EmptyExpression,
            ArityError::LeftoverOperands { .. } => SyntaxError::UnbalancedOperators {
                position: expr.chars().count(),
            },
            ArityError::MissingOperands { position, .. } => {
                SyntaxError::UnbalancedOperators { position }
            }
        })?;

        Ok(Self {
            expr: expr.to_owned(),
            rpn,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    #[inline]
    pub fn rpn(&self) -> &Rpn {
        &self.rpn
    }

    /// Build a nondeterministic automaton that accepts the language of the expression. The
    /// operand counts were checked by [`RegularExpression::new`], so an error here means the
    /// same as one from [`Rpn::compile`] on a hand-written sequence.
    #[inline]
    pub fn to_nfa(&self) -> Result<Automaton, ArityError> {
        self.rpn.compile()
    }
}

impl FromStr for RegularExpression {
    type Err = SyntaxError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

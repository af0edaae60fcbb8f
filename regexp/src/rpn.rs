use crate::parser::{Operator, SyntaxError};

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use fsa_automata::{Automaton, Symbol};
use log::{debug, trace};

/// Error returned when a sequence in reverse Polish notation does not describe exactly one
/// automaton.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ArityError {
    /// An operator found fewer operands on the stack than it takes.
    #[error("operator {operator:?} at position {position} is missing operands")]
    MissingOperands { operator: char, position: usize },

    /// The evaluation ended with a number of automata other than one on the stack.
    #[error("evaluation left {count} automata on the stack instead of one")]
    LeftoverOperands { count: usize },
}

/// One element of a sequence in reverse Polish notation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Item {
    Symbol(Symbol),
    Operator(Operator),
}

impl Item {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Item::Symbol(s) => s.as_char(),
            Item::Operator(op) => op.as_char(),
        }
    }
}

/// A regular expression in reverse Polish notation. Each item keeps the position it came from
/// in the source, which error messages refer to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rpn {
    items: Vec<(usize, Item)>,
}

impl Rpn {
    #[inline]
    pub(crate) fn from_items(items: Vec<(usize, Item)>) -> Self {
        Self { items }
    }

    /// Returns each item with its source position.
    #[inline]
    pub fn items(&self) -> impl Iterator<Item = (usize, Item)> + '_ {
        self.items.iter().copied()
    }

    /// Determine if evaluating the sequence would leave exactly one automaton, without building
    /// any.
    pub fn check(&self) -> Result<(), ArityError> {
        let mut depth = 0;
        for &(position, item) in self.items.iter() {
            match item {
                Item::Symbol(_) => depth += 1,
                Item::Operator(op) => {
                    if depth < op.arity() {
                        return Err(ArityError::MissingOperands {
                            operator: op.as_char(),
                            position,
                        });
                    }
                    depth = depth - op.arity() + 1;
                }
            }
        }

        if depth == 1 {
            Ok(())
        } else {
            Err(ArityError::LeftoverOperands { count: depth })
        }
    }

    /// Evaluate the sequence with a stack machine. A symbol pushes the two-state automaton for
    /// that symbol; `*` replaces the top automaton with its Kleene star; `&` and `|` pop the
    /// right operand, then the left one, and push their concatenation or union.
    pub fn compile(&self) -> Result<Automaton, ArityError> {
        let mut stack: Vec<Automaton> = Vec::new();

        for &(position, item) in self.items.iter() {
            let automaton = match item {
                Item::Symbol(s) => Automaton::symbol(s),
                Item::Operator(op @ Operator::KleeneStar) => {
                    pop_operand(&mut stack, op, position)?.kleene_star()
                }
                Item::Operator(op @ Operator::Concatenation) => {
                    let right = pop_operand(&mut stack, op, position)?;
                    let left = pop_operand(&mut stack, op, position)?;
                    left.concatenation(&right)
                }
                Item::Operator(op @ Operator::Union) => {
                    let right = pop_operand(&mut stack, op, position)?;
                    let left = pop_operand(&mut stack, op, position)?;
                    left.union(&right)
                }
            };

            trace!(
                "compile: {:?} at {} pushed {} states",
                item.as_char(),
                position,
                automaton.states()
            );
            stack.push(automaton);
        }

        match stack.pop() {
            Some(automaton) if stack.is_empty() => {
                debug!(
                    "compile: {} items built an automaton with {} states",
                    self.items.len(),
                    automaton.states()
                );
                Ok(automaton)
            }
            Some(_) => Err(ArityError::LeftoverOperands {
                count: stack.len() + 1,
            }),
            None => Err(ArityError::LeftoverOperands { count: 0 }),
        }
    }
}

#[inline]
fn pop_operand(
    stack: &mut Vec<Automaton>,
    operator: Operator,
    position: usize,
) -> Result<Automaton, ArityError> {
    stack.pop().ok_or(ArityError::MissingOperands {
        operator: operator.as_char(),
        position,
    })
}

impl fmt::Display for Rpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, item) in self.items.iter() {
            write!(f, "{}", item.as_char())?;
        }
        Ok(())
    }
}

/// Read a sequence already in reverse Polish notation: symbols and operators, no parentheses.
/// Operand counts are not checked here; see [`Rpn::check`].
impl FromStr for Rpn {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let items = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                let item = match Operator::from_char(c) {
                    Some(op) => Some(Item::Operator(op)),
                    None => Symbol::try_from(c).ok().map(Item::Symbol),
                };
                item.map(|item| (position, item))
                    .ok_or(SyntaxError::UnexpectedToken { token: c, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_items(items))
    }
}

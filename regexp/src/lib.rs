#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod regexp;
mod rpn;

pub mod parser;

pub use fsa_automata as automata;
pub use parser::{Operator, ParseResult, SyntaxError};
pub use regexp::*;
pub use rpn::{ArityError, Item, Rpn};

#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod automaton;
mod convert;
mod decide;
mod dfa;
mod error;
mod nfa;
mod symbol;
mod text;
mod transition;

pub use automaton::Automaton;
pub use error::{FormatError, FormatResult};
pub use symbol::Symbol;
pub use transition::Transition;

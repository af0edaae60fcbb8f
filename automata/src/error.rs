use std::io;

/// Error returned when an automaton description cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("could not read the automaton description")]
    Io(#[from] io::Error),

    /// The description ended before all declared fields were read.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid number {token:?} at token {position}")]
    InvalidNumber { token: String, position: usize },

    /// A transition label is not a single lowercase letter, digit or the epsilon marker.
    #[error("invalid transition label {token:?} at token {position}")]
    InvalidSymbol { token: String, position: usize },

    /// The declared number of states is above [`Automaton::MAX_STATES`].
    ///
    /// [`Automaton::MAX_STATES`]: crate::Automaton::MAX_STATES
    #[error("{states} states requested, at most {limit} are supported")]
    TooManyStates { states: usize, limit: usize },

    #[error("state {state} does not exist in an automaton with {states} states")]
    StateOutOfRange { state: usize, states: usize },
}

/// Alias for [`Result`] for [`FormatError`].
pub type FormatResult<T> = std::result::Result<T, FormatError>;

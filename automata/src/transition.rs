use crate::symbol::Symbol;

/// A labeled edge between two states of an [`Automaton`](crate::Automaton).
///
/// Transitions order lexicographically by `(from, label, to)`, which groups every edge leaving a
/// state together and, within that group, every edge on the same label.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Transition {
    from: usize,
    label: Symbol,
    to: usize,
}

impl Transition {
    #[inline]
    pub const fn new(from: usize, label: Symbol, to: usize) -> Self {
        Self { from, label, to }
    }

    #[inline]
    pub const fn epsilon(from: usize, to: usize) -> Self {
        Self::new(from, Symbol::Epsilon, to)
    }

    #[inline]
    pub const fn from(&self) -> usize {
        self.from
    }

    #[inline]
    pub const fn label(&self) -> Symbol {
        self.label
    }

    #[inline]
    pub const fn to(&self) -> usize {
        self.to
    }

    /// An epsilon transition from a state to itself never changes the configuration.
    #[inline]
    pub fn is_epsilon_loop(&self) -> bool {
        self.label.is_epsilon() && self.from == self.to
    }

    /// The same edge with both endpoints moved up by `offset`.
    #[inline]
    pub(crate) const fn shifted(&self, offset: usize) -> Self {
        Self::new(self.from + offset, self.label, self.to + offset)
    }

    /// The smallest transition leaving `from` on `label`. Used as the lower bound of range
    /// lookups.
    #[inline]
    pub(crate) const fn lower_bound(from: usize, label: Symbol) -> Self {
        Self::new(from, label, 0)
    }
}

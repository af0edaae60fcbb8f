use crate::error::{FormatError, FormatResult};
use crate::symbol::Symbol;
use crate::transition::Transition;

use im::OrdSet;

/// A finite automaton over lowercase letters and digits, with optional epsilon transitions.
///
/// There is a state labeled i for every i where 0 <= i < [`states`](Automaton::states), and state
/// 0 is always the start state. The same type represents both nondeterministic and deterministic
/// automata; whether an instance is deterministic is computed whenever its structure changes and
/// cached.
///
/// Union, concatenation and Kleene star build new automata and leave their operands untouched.
/// [`convert_to_dfa`](Automaton::convert_to_dfa) and [`minimize`](Automaton::minimize) rebuild
/// the receiver in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Automaton {
    pub(crate) states: usize,
    /// Sorted by `(from, label, to)` and free of duplicates.
    pub(crate) transitions: OrdSet<Transition>,
    /// Every non-epsilon label that appears in `transitions`.
    pub(crate) alphabet: OrdSet<char>,
    pub(crate) final_states: OrdSet<usize>,
    pub(crate) deterministic: bool,
}

impl Automaton {
    /// The largest number of states a description may declare. Algorithms allocate tables
    /// indexed by state, so larger counts are rejected before anything is built.
    pub const MAX_STATES: usize = 1 << 20;

    /// Create the automaton with no states. It accepts no words.
    #[inline]
    pub fn empty() -> Self {
        Self {
            states: 0,
            transitions: OrdSet::new(),
            alphabet: OrdSet::new(),
            final_states: OrdSet::new(),
            deterministic: true,
        }
    }

    /// Create a two-state automaton with a single transition on `symbol` from the start state to
    /// an accepting state. It accepts exactly the one-letter word `symbol`, or only the empty word
    /// when `symbol` is epsilon.
    #[inline]
    pub fn symbol(symbol: Symbol) -> Self {
        let mut automaton = Self::empty();
        automaton.states = 2;
        automaton.insert_transition(Transition::new(0, symbol, 1));
        automaton.final_states.insert(1);
        automaton.deterministic = automaton.is_determ();
        automaton
    }

    /// Build an automaton from its parts. Epsilon transitions from a state to itself are
    /// dropped. Fails if `states` is above [`Automaton::MAX_STATES`], or if a final state or a
    /// transition endpoint is not less than `states`.
    pub fn from_parts<F, T>(states: usize, final_states: F, transitions: T) -> FormatResult<Self>
    where
        F: IntoIterator<Item = usize>,
        T: IntoIterator<Item = Transition>,
    {
        if states > Self::MAX_STATES {
            return Err(FormatError::TooManyStates {
                states,
                limit: Self::MAX_STATES,
            });
        }

        let mut automaton = Self::empty();
        automaton.states = states;

        for f in final_states {
            automaton.check_state(f)?;
            automaton.final_states.insert(f);
        }

        for t in transitions {
            automaton.check_state(t.from())?;
            automaton.check_state(t.to())?;
            automaton.insert_transition(t);
        }

        automaton.deterministic = automaton.is_determ();
        Ok(automaton)
    }

    /// Assemble an automaton from parts that already satisfy the state-range invariant, and
    /// compute its determinism flag.
    #[inline]
    pub(crate) fn assemble(
        states: usize,
        alphabet: OrdSet<char>,
        transitions: OrdSet<Transition>,
        final_states: OrdSet<usize>,
    ) -> Self {
        let mut automaton = Self {
            states,
            transitions,
            alphabet,
            final_states,
            deterministic: false,
        };
        automaton.deterministic = automaton.is_determ();
        automaton
    }

    #[inline]
    fn check_state(&self, state: usize) -> FormatResult<()> {
        if state < self.states {
            Ok(())
        } else {
            Err(FormatError::StateOutOfRange {
                state,
                states: self.states,
            })
        }
    }

    /// Add a transition, registering its label in the alphabet. Epsilon self-loops are
    /// discarded.
    #[inline]
    pub(crate) fn insert_transition(&mut self, t: Transition) {
        if t.is_epsilon_loop() {
            return;
        }
        if let Some(c) = t.label().letter() {
            self.alphabet.insert(c);
        }
        self.transitions.insert(t);
    }

    /// Every state has exactly one outgoing transition per alphabet letter and there are no
    /// epsilon transitions. The automaton with no states is deterministic.
    pub(crate) fn is_determ(&self) -> bool {
        if self.transitions.len() != self.states * self.alphabet.len() {
            return false;
        }

        let mut prev: Option<&Transition> = None;
        for t in self.transitions.iter() {
            if t.label().is_epsilon() {
                return false;
            }
            if let Some(p) = prev {
                if p.from() == t.from() && p.label() == t.label() {
                    return false;
                }
            }
            prev = Some(t);
        }
        true
    }
}

impl Default for Automaton {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl Automaton {
    /// The number of states.
    #[inline]
    pub fn states(&self) -> usize {
        self.states
    }

    #[inline]
    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// The letters that label at least one transition, in ascending order.
    #[inline]
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    /// The accepting states, in ascending order.
    #[inline]
    pub fn final_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.final_states.iter().copied()
    }

    /// Every transition, in `(from, label, to)` order.
    #[inline]
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter()
    }

    #[inline]
    pub fn is_final(&self, state: usize) -> bool {
        self.final_states.contains(&state)
    }

    /// Returns the transitions leaving a specific state.
    #[inline]
    pub(crate) fn transitions_from(&self, state: usize) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .range(Transition::lower_bound(state, Symbol::Epsilon)..)
            .take_while(move |t| t.from() == state)
    }

    /// Returns the transitions leaving a specific state on a specific label.
    #[inline]
    pub(crate) fn transitions_on(
        &self,
        state: usize,
        label: Symbol,
    ) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .range(Transition::lower_bound(state, label)..)
            .take_while(move |t| t.from() == state && t.label() == label)
    }

    /// Determine if the given word is accepted. Occurrences of [`Symbol::EPSILON_CHAR`] in the
    /// word stand for no input and are skipped.
    #[inline]
    pub fn accepts(&self, word: &str) -> bool {
        if self.deterministic {
            self.accepts_deterministic(word)
        } else {
            self.accepts_nondeterministic(word)
        }
    }
}

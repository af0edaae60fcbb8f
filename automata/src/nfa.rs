use crate::automaton::Automaton;
use crate::symbol::Symbol;
use crate::transition::Transition;

use std::collections::{BTreeSet, HashSet, VecDeque};

use im::OrdSet;

impl Automaton {
    /// Construct a new automaton for the union of two automata. The new start state has epsilon
    /// transitions to the start states of both operands, which are copied in after it: the states
    /// of `self` are shifted by 1 and those of `other` by `self.states() + 1`.
    ///
    /// An operand with no states is the identity of union, so the other operand is returned.
    pub fn union(&self, other: &Automaton) -> Automaton {
        if self.states == 0 {
            return other.clone();
        }
        if other.states == 0 {
            return self.clone();
        }

        let offset = self.states + 1;
        let mut transitions = OrdSet::new();
        let mut final_states = OrdSet::new();

        transitions.insert(Transition::epsilon(0, 1));
        transitions.insert(Transition::epsilon(0, offset));
        for t in self.transitions.iter() {
            transitions.insert(t.shifted(1));
        }
        for t in other.transitions.iter() {
            transitions.insert(t.shifted(offset));
        }

        for f in self.final_states.iter() {
            final_states.insert(f + 1);
        }
        for f in other.final_states.iter() {
            final_states.insert(f + offset);
        }

        let alphabet = self.alphabet.clone().union(other.alphabet.clone());
        Automaton::assemble(self.states + other.states + 1, alphabet, transitions, final_states)
    }

    /// Construct a new automaton for the concatenation of two automata. The states of `self` keep
    /// their labels and the states of `other` follow them. There are epsilon transitions from the
    /// final states of the former to the start state of the latter, and the final states of the
    /// result are those of the latter.
    ///
    /// If either operand has no states, or `self` has no final states, no word is accepted and
    /// the empty automaton is returned.
    pub fn concatenation(&self, other: &Automaton) -> Automaton {
        if self.states == 0 || other.states == 0 || self.final_states.is_empty() {
            return Automaton::empty();
        }

        let offset = self.states;
        let mut transitions = self.transitions.clone();
        let mut final_states = OrdSet::new();

        for f in self.final_states.iter() {
            transitions.insert(Transition::epsilon(*f, offset));
        }
        for t in other.transitions.iter() {
            transitions.insert(t.shifted(offset));
        }
        for f in other.final_states.iter() {
            final_states.insert(f + offset);
        }

        let alphabet = self.alphabet.clone().union(other.alphabet.clone());
        Automaton::assemble(self.states + other.states, alphabet, transitions, final_states)
    }

    /// Construct a new automaton for the Kleene star of an automaton. A new start state, which is
    /// also final, is placed in front of the shifted operand. Every final state of the operand
    /// stays final and gets an epsilon transition back to the new start state.
    pub fn kleene_star(&self) -> Automaton {
        let mut transitions = OrdSet::new();
        let mut final_states = OrdSet::new();
        final_states.insert(0);

        if self.states > 0 {
            transitions.insert(Transition::epsilon(0, 1));
        }
        for t in self.transitions.iter() {
            transitions.insert(t.shifted(1));
        }
        for f in self.final_states.iter() {
            transitions.insert(Transition::epsilon(f + 1, 0));
            final_states.insert(f + 1);
        }

        Automaton::assemble(self.states + 1, self.alphabet.clone(), transitions, final_states)
    }

    /// Computes the union of epsilon-closures for each state in the given set of states: every
    /// state reachable from one of them on epsilon transitions only, the states themselves
    /// included.
    pub(crate) fn epsilon_closure<I>(&self, states: I) -> BTreeSet<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut closure = BTreeSet::new();
        let mut queue = VecDeque::new();
        for s in states {
            if closure.insert(s) {
                queue.push_back(s);
            }
        }

        while let Some(s) = queue.pop_front() {
            for t in self.transitions_on(s, Symbol::Epsilon) {
                if closure.insert(t.to()) {
                    queue.push_back(t.to());
                }
            }
        }
        closure
    }

    /// The states reachable from any state of the set on a single transition labeled `letter`.
    pub(crate) fn move_set(&self, states: &BTreeSet<usize>, letter: char) -> BTreeSet<usize> {
        states
            .iter()
            .flat_map(|&s| self.transitions_on(s, Symbol::Letter(letter)))
            .map(Transition::to)
            .collect()
    }

    /// Depth-first search over `(position, state)` configurations. From a configuration, the
    /// search follows every transition on the next input letter and every epsilon transition;
    /// once the input is exhausted only epsilon transitions are followed, and the configuration
    /// accepts if its state is final.
    ///
    /// A configuration that was already explored is a dead end. This is what keeps the search
    /// finite on epsilon cycles, and it bounds the work by the input length times the number of
    /// states.
    pub(crate) fn accepts_nondeterministic(&self, word: &str) -> bool {
        if self.states == 0 {
            return false;
        }

        let input: Vec<char> = word.chars().filter(|&c| c != Symbol::EPSILON_CHAR).collect();
        let mut visited = HashSet::new();
        let mut pending = vec![(0, 0)];

        while let Some((position, state)) = pending.pop() {
            if !visited.insert((position, state)) {
                continue;
            }

            match input.get(position) {
                Some(&c) => {
                    for t in self.transitions_from(state) {
                        match t.label() {
                            Symbol::Letter(l) if l == c => pending.push((position + 1, t.to())),
                            Symbol::Epsilon => pending.push((position, t.to())),
                            Symbol::Letter(_) => {}
                        }
                    }
                }
                None => {
                    if self.is_final(state) {
                        return true;
                    }
                    for t in self.transitions_on(state, Symbol::Epsilon) {
                        pending.push((position, t.to()));
                    }
                }
            }
        }

        false
    }
}

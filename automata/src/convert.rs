use crate::automaton::Automaton;
use crate::symbol::Symbol;
use crate::transition::Transition;

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, VecDeque};

use im::OrdSet;
use log::debug;

impl Automaton {
    /// Replace the automaton with an equivalent deterministic one using the subset construction.
    /// Does nothing if the automaton is already deterministic.
    ///
    /// Each state of the result is the epsilon-closure of a set of original states, labeled in
    /// the order the sets are discovered by a breadth-first search from the closure of the start
    /// state, which keeps label 0. Every set gets a transition on every letter of the alphabet,
    /// the empty set included, so the result is complete. A set is final if it contains a final
    /// state. The alphabet is unchanged.
    pub fn convert_to_dfa(&mut self) -> &mut Self {
        if self.deterministic {
            return self;
        }

        let letters: Vec<char> = self.alphabet.iter().copied().collect();
        let mut labels: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        let mut unmarked = VecDeque::new();
        let mut transitions = OrdSet::new();
        let mut final_states = OrdSet::new();

        let initial = self.epsilon_closure(vec![0]);
        if self.contains_final_state(&initial) {
            final_states.insert(0);
        }
        labels.insert(initial.clone(), 0);
        unmarked.push_back((0, initial));

        while let Some((label, set)) = unmarked.pop_front() {
            for &c in letters.iter() {
                let moved = self.move_set(&set, c);
                let closure = self.epsilon_closure(moved);

                let next = labels.len();
                let target = match labels.entry(closure) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        if self.contains_final_state(e.key()) {
                            final_states.insert(next);
                        }
                        unmarked.push_back((next, e.key().clone()));
                        e.insert(next);
                        next
                    }
                };

                transitions.insert(Transition::new(label, Symbol::Letter(c), target));
            }
        }

        debug!(
            "convert_to_dfa: {} states became {} subset states",
            self.states,
            labels.len()
        );

        self.states = labels.len();
        self.transitions = transitions;
        self.final_states = final_states;
        self.deterministic = true;
        self
    }

    #[inline]
    fn contains_final_state(&self, set: &BTreeSet<usize>) -> bool {
        set.iter().any(|s| self.is_final(*s))
    }
}

use crate::automaton::Automaton;
use crate::symbol::Symbol;
use crate::transition::Transition;

use std::collections::{BTreeMap, VecDeque};

use im::OrdSet;
use log::{debug, trace};

/// Transition function of a deterministic automaton as a table indexed by state, then by the
/// position of the letter in the sorted alphabet.
type DeltaTable = Vec<Vec<Option<usize>>>;

impl Automaton {
    /// Walk the unique path of a deterministic automaton. The word is rejected as soon as a
    /// letter has no transition.
    pub(crate) fn accepts_deterministic(&self, word: &str) -> bool {
        if self.states == 0 {
            return false;
        }

        let mut state = 0;
        for c in word.chars().filter(|&c| c != Symbol::EPSILON_CHAR) {
            match self.transitions_on(state, Symbol::Letter(c)).next() {
                Some(t) => state = t.to(),
                None => return false,
            }
        }
        self.is_final(state)
    }

    /// Marks every state reachable from the start state on any transitions.
    pub(crate) fn reachable_states(&self) -> Vec<bool> {
        self.reachable_from(0)
    }

    /// Marks every state reachable from `start`, `start` included.
    pub(crate) fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut seen = vec![false; self.states];
        if start >= self.states {
            return seen;
        }

        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);
        while let Some(s) = queue.pop_front() {
            for t in self.transitions_from(s) {
                if !seen[t.to()] {
                    seen[t.to()] = true;
                    queue.push_back(t.to());
                }
            }
        }
        seen
    }

    /// Drop the transitions and final states of every state that cannot be reached from the
    /// start state. The remaining states keep their labels, so the returned mask tells which
    /// labels below `states` are still in use.
    pub(crate) fn remove_unreachable_states(&mut self) -> Vec<bool> {
        let reachable = self.reachable_states();

        self.transitions = self
            .transitions
            .iter()
            .filter(|t| reachable[t.from()])
            .copied()
            .collect();
        self.final_states = self
            .final_states
            .iter()
            .filter(|&&f| reachable[f])
            .copied()
            .collect();

        reachable
    }

    fn delta_table(&self, letters: &[char]) -> DeltaTable {
        let mut delta = vec![vec![None; letters.len()]; self.states];
        for t in self.transitions.iter() {
            if let Some(c) = t.label().letter() {
                if let Ok(i) = letters.binary_search(&c) {
                    delta[t.from()][i] = Some(t.to());
                }
            }
        }
        delta
    }

    /// Replace the automaton with the minimal deterministic automaton for the same language.
    ///
    /// The automaton is determinized and trimmed to its reachable states, then its states are
    /// grouped by Moore's partition refinement: starting from the split into final and
    /// non-final states, a block is split whenever its members move to different blocks on some
    /// letter, until no block splits. Each block becomes one state. States are numbered in
    /// breadth-first order from the block of the start state, so the start state stays 0 and
    /// minimizing twice gives the same automaton.
    ///
    /// An automaton whose reachable part has no final state becomes [`Automaton::empty`], with
    /// no states and no alphabet. Otherwise the alphabet is left unchanged.
    pub fn minimize(&mut self) -> &mut Self {
        self.convert_to_dfa();
        let reachable = self.remove_unreachable_states();

        if self.final_states.is_empty() {
            debug!("minimize: no reachable final state, {} states dropped", self.states);
            *self = Automaton::empty();
            return self;
        }

        let alphabet = self.alphabet.clone();
        let letters: Vec<char> = alphabet.iter().copied().collect();
        let delta = self.delta_table(&letters);

        let (finals, non_finals): (Vec<usize>, Vec<usize>) = (0..self.states)
            .filter(|&s| reachable[s])
            .partition(|&s| self.is_final(s));
        let mut blocks: Vec<Vec<usize>> = vec![non_finals, finals]
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect();
        let mut block_of = vec![0; self.states];
        assign_blocks(&blocks, &mut block_of);

        let mut round = 0;
        loop {
            let mut refined = Vec::with_capacity(blocks.len());
            for block in blocks.iter() {
                if block.len() == 1 {
                    refined.push(block.clone());
                    continue;
                }

                // Group members by the blocks they move to, letter by letter.
                let mut groups: BTreeMap<Vec<Option<usize>>, Vec<usize>> = BTreeMap::new();
                for &s in block {
                    let signature = delta[s]
                        .iter()
                        .map(|dest| dest.map(|d| block_of[d]))
                        .collect();
                    groups.entry(signature).or_insert_with(Vec::new).push(s);
                }
                refined.extend(groups.into_iter().map(|(_, group)| group));
            }

            round += 1;
            trace!("minimize: round {} has {} blocks", round, refined.len());

            // Refinement only ever splits blocks, so an equal count means an equal partition.
            if refined.len() == blocks.len() {
                break;
            }
            blocks = refined;
            assign_blocks(&blocks, &mut block_of);
        }

        // Number blocks in breadth-first order from the block of the start state.
        let mut label: Vec<Option<usize>> = vec![None; blocks.len()];
        let mut order = Vec::with_capacity(blocks.len());
        let mut queue = VecDeque::new();
        label[block_of[0]] = Some(0);
        order.push(block_of[0]);
        queue.push_back(block_of[0]);
        while let Some(b) = queue.pop_front() {
            for dest in delta[blocks[b][0]].iter().flatten() {
                let target = block_of[*dest];
                if label[target].is_none() {
                    label[target] = Some(order.len());
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }

        let mut transitions = OrdSet::new();
        let mut final_states = OrdSet::new();
        for (id, &b) in order.iter().enumerate() {
            let representative = blocks[b][0];
            if self.is_final(representative) {
                final_states.insert(id);
            }
            for (i, dest) in delta[representative].iter().enumerate() {
                if let Some(target) = dest.and_then(|d| label[block_of[d]]) {
                    transitions.insert(Transition::new(id, Symbol::Letter(letters[i]), target));
                }
            }
        }

        debug!(
            "minimize: {} reachable states merged into {}",
            reachable.iter().filter(|&&r| r).count(),
            order.len()
        );
        *self = Automaton::assemble(order.len(), alphabet, transitions, final_states);
        self
    }
}

fn assign_blocks(blocks: &[Vec<usize>], block_of: &mut [usize]) {
    for (i, block) in blocks.iter().enumerate() {
        for &s in block {
            block_of[s] = i;
        }
    }
}

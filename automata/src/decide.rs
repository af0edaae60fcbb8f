use crate::automaton::Automaton;

use std::collections::VecDeque;

impl Automaton {
    /// Determine if the automaton accepts the empty language, i.e. no word at all. This is the
    /// case when no final state is reachable from the start state.
    #[inline]
    pub fn accepts_empty_lang(&self) -> bool {
        !self.is_final_state_reachable(0)
    }

    /// Determine if the automaton accepts finitely many words.
    ///
    /// A copy is minimized; the language is infinite exactly when some state of the minimal
    /// automaton lies on a cycle and can still reach a final state.
    pub fn accepts_finite_lang(&self) -> bool {
        let mut minimal = self.clone();
        minimal.minimize();

        !(0..minimal.states)
            .any(|s| minimal.is_final_state_reachable(s) && minimal.exists_nonempty_path(s, s))
    }

    fn is_final_state_reachable(&self, start: usize) -> bool {
        self.reachable_from(start)
            .into_iter()
            .enumerate()
            .any(|(s, reachable)| reachable && self.is_final(s))
    }

    /// Determine if `to` can be reached from `from` along at least one transition.
    fn exists_nonempty_path(&self, from: usize, to: usize) -> bool {
        if from >= self.states {
            return false;
        }

        let mut seen = vec![false; self.states];
        let mut queue = VecDeque::new();
        seen[from] = true;
        queue.push_back(from);
        while let Some(s) = queue.pop_front() {
            for t in self.transitions_from(s) {
                if t.to() == to {
                    return true;
                }
                if !seen[t.to()] {
                    seen[t.to()] = true;
                    queue.push_back(t.to());
                }
            }
        }
        false
    }
}

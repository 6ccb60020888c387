//! Normalization of NFAs into automata whose edges each read exactly one
//! character.

use crate::automaton::{Edge, FiniteAutomaton, State, nfa::Nfa};

impl Nfa {
    /// Replaces every edge whose word is longer than one character by a chain
    /// of single character edges through fresh intermediate states.
    ///
    /// The states of self keep their indices and terminal flags, the
    /// intermediate states are appended after them. Epsilon and single
    /// character edges are copied unchanged.
    pub fn split_long_words(&self) -> Nfa {
        let mut split = Nfa::with_state_count(self.state_count());
        for state in self.iter_states() {
            split.set_terminal(state, self.is_terminal(state));
        }
        split.set_start(self.start());

        for state in self.iter_states() {
            for edge in self.edges(state) {
                if edge.word_len() <= 1 {
                    split.add_edge(edge);
                    continue;
                }

                let mut chars = edge.word.chars().peekable();
                let mut previous = edge.from;

                while let Some(symbol) = chars.next() {
                    let next = if chars.peek().is_some() {
                        split.add_state()
                    } else {
                        edge.to
                    };

                    split.add_edge(Edge::new(previous, next, symbol));
                    previous = next;
                }
            }
        }

        tracing::debug!(
            "Split long words: {} states -> {} states",
            self.state_count(),
            split.state_count()
        );

        split
    }

    /// Returns the set of states reachable from `state` using only epsilon
    /// edges, `state` itself included, in discovery order.
    pub fn epsilon_closure(&self, state: State) -> Vec<State> {
        let mut visited = vec![false; self.state_count()];
        let mut closure = vec![];
        let mut stack = vec![state];

        while let Some(current) = stack.pop() {
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;
            closure.push(current);

            // reversed, so the first edge is explored first
            for edge in self.edges(current).into_iter().rev() {
                if edge.is_epsilon() && !visited[edge.to.index()] {
                    stack.push(edge.to);
                }
            }
        }

        closure
    }

    /// Removes all epsilon edges by folding each state's epsilon-closure into
    /// it.
    ///
    /// The result has the same states and start state. A state is terminal
    /// if anything in its closure is terminal, and it receives a copy of
    /// every non-epsilon edge leaving its closure.
    pub fn fold_epsilon_edges(&self) -> Nfa {
        let mut folded = Nfa::with_state_count(self.state_count());
        folded.set_start(self.start());

        for from in self.iter_states() {
            for reachable in self.epsilon_closure(from) {
                if self.is_terminal(reachable) {
                    folded.set_terminal(from, true);
                }

                for edge in self.edges(reachable) {
                    if !edge.is_epsilon() {
                        folded.add_edge(Edge::new(from, edge.to, edge.word));
                    }
                }
            }
        }

        folded
    }

    /// Splits long words and folds epsilon edges. Every edge of the result
    /// reads exactly one character, and the language is unchanged.
    pub fn normalize(&self) -> Nfa {
        self.split_long_words().fold_epsilon_edges()
    }
}

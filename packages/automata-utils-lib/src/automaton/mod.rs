use std::fmt::{Debug, Display};

use itertools::Itertools;
use petgraph::graph::NodeIndex;

pub mod determinize;
pub mod dfa;
pub mod format;
pub mod nfa;
pub mod node;
pub mod normalize;
pub mod random;
pub mod state_elimination;

/// A state of an automaton. States are dense indices starting at 0, assigned
/// in creation order. They are never removed, only edges are.
pub type State = NodeIndex;

/// An edge between two states, labeled with a word.
///
/// The empty word is an epsilon transition. Words with more than one
/// character stand for a chain of single character transitions. Only NFAs
/// may carry either of these, a DFA only accepts words of length exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: State,
    pub to: State,
    pub word: String,
}

impl Edge {
    pub fn new(from: State, to: State, word: impl Into<String>) -> Self {
        Edge {
            from,
            to,
            word: word.into(),
        }
    }

    pub fn epsilon(from: State, to: State) -> Self {
        Edge::new(from, to, String::new())
    }

    pub fn is_epsilon(&self) -> bool {
        self.word.is_empty()
    }

    /// The length of the word in characters.
    pub fn word_len(&self) -> usize {
        self.word.chars().count()
    }

    /// Returns the only character of the word, or None if the word does not
    /// have length 1.
    pub fn symbol(&self) -> Option<char> {
        let mut chars = self.word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} {}", self.from.index(), self.to.index(), self.word)
    }
}

/// An iterator over the compact state space `0..end` of an automaton.
///
/// It does not borrow the automaton, so the automaton can be modified while
/// iterating over the states that existed when the iterator was created.
#[derive(Debug, Clone)]
pub struct StateIterator {
    current: usize,
    end: usize,
}

impl StateIterator {
    pub fn new(start: usize, end: usize) -> Self {
        StateIterator {
            current: start,
            end,
        }
    }
}

impl Iterator for StateIterator {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.end {
            let state = State::new(self.current);
            self.current += 1;
            Some(state)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.current;
        (len, Some(len))
    }
}

impl ExactSizeIterator for StateIterator {}

impl DoubleEndedIterator for StateIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current < self.end {
            self.end -= 1;
            Some(State::new(self.end))
        } else {
            None
        }
    }
}

/// The capability contract shared by [nfa::Nfa] and [dfa::Dfa].
///
/// Every state index passed to these methods must be in
/// `0..state_count()`. Passing anything else is a caller bug and panics.
pub trait FiniteAutomaton: Debug + Clone {
    /// Returns the number of states.
    fn state_count(&self) -> usize;

    /// Appends a new non-terminal state without edges and returns it.
    fn add_state(&mut self) -> State;

    fn start(&self) -> State;
    fn set_start(&mut self, state: State);

    fn is_terminal(&self, state: State) -> bool;
    fn set_terminal(&mut self, state: State, terminal: bool);

    /// Returns the outgoing edges of a state.
    fn edges(&self, state: State) -> Vec<Edge>;

    fn add_edge(&mut self, edge: Edge);

    /// Removes an edge matching `edge` exactly. Returns whether such an edge
    /// existed.
    fn delete_edge(&mut self, edge: &Edge) -> bool;

    /// Returns an iterator over all states, in index order.
    fn iter_states(&self) -> StateIterator {
        StateIterator::new(0, self.state_count())
    }

    /// Returns all terminal states, in index order.
    fn terminal_states(&self) -> Vec<State> {
        self.iter_states()
            .filter(|&state| self.is_terminal(state))
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.iter_states().map(|state| self.edges(state).len()).sum()
    }

    /// Returns the sorted set of characters occurring on any edge.
    fn alphabet(&self) -> Vec<char> {
        self.iter_states()
            .flat_map(|state| self.edges(state))
            .flat_map(|edge| edge.word.chars().collect_vec())
            .sorted()
            .dedup()
            .collect()
    }
}

/// The basic trait for anything that defines a language over characters.
pub trait Language {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a char>) -> bool;
}

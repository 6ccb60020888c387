use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::automaton::{Edge, FiniteAutomaton, Language, State, node::StateNode};

/// A deterministic finite automaton.
///
/// Every state has at most one outgoing edge per symbol, and every edge word
/// has length exactly 1. Edges of a state are enumerated in ascending symbol
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    start: State,
    nodes: Vec<StateNode>,
    transitions: Vec<BTreeMap<char, State>>,
}

/// Extracts the symbol of a DFA edge. Anything but a single character is a
/// caller bug.
fn dfa_symbol(edge: &Edge) -> char {
    match edge.symbol() {
        Some(symbol) => symbol,
        None => panic!(
            "DFA edge words must have length 1, got {:?} on {}",
            edge.word, edge
        ),
    }
}

impl Dfa {
    pub fn new() -> Self {
        Dfa {
            start: NodeIndex::new(0),
            nodes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Returns the target of the transition on `symbol`, if there is one.
    pub fn successor(&self, state: State, symbol: char) -> Option<State> {
        self.transitions[state.index()].get(&symbol).copied()
    }

    /// Checks whether every state has a transition for every symbol of the
    /// alphabet.
    pub fn is_complete(&self, alphabet: &[char]) -> bool {
        self.transitions
            .iter()
            .all(|map| alphabet.iter().all(|symbol| map.contains_key(symbol)))
    }

    /// Assert that the DFA is complete over the given alphabet.
    ///
    /// If the DFA is not complete, this function will panic.
    pub fn assert_complete(&self, alphabet: &[char]) {
        for state in self.iter_states() {
            for symbol in alphabet {
                assert!(
                    self.successor(state, *symbol).is_some(),
                    "DFA is not complete. State {} does not have a transition for symbol {:?}",
                    state.index(),
                    symbol
                );
            }
        }
    }

    /// Adds a non-terminal sink state and routes every missing transition
    /// over `alphabet` into it, the sink's own transitions included. The DFA
    /// is total over `alphabet` afterwards. Returns the sink.
    ///
    /// The sink is always added, even if the DFA was already complete.
    pub fn make_complete(&mut self, alphabet: &[char]) -> State {
        let sink = self.add_state();

        for map in self.transitions.iter_mut() {
            for &symbol in alphabet {
                map.entry(symbol).or_insert(sink);
            }
        }

        tracing::debug!(
            "Completed DFA over {} symbols with sink state {}",
            alphabet.len(),
            sink.index()
        );

        sink
    }

    /// Flips the terminal flag of every state, modifying the DFA in place.
    ///
    /// The result is only the complement language if the DFA is complete over
    /// the alphabet of interest. This is not checked, see
    /// [`Dfa::make_complete`].
    pub fn complement_in_place(&mut self) {
        for node in self.nodes.iter_mut() {
            node.invert_mut();
        }
    }

    /// Returns a copy of self with every terminal flag flipped.
    ///
    /// See [`Dfa::complement_in_place`] for the precondition.
    pub fn complement(&self) -> Dfa {
        Dfa {
            start: self.start,
            nodes: self.nodes.iter().map(StateNode::invert).collect(),
            transitions: self.transitions.clone(),
        }
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Dfa::new()
    }
}

impl FiniteAutomaton for Dfa {
    fn state_count(&self) -> usize {
        self.nodes.len()
    }

    fn add_state(&mut self) -> State {
        self.nodes.push(StateNode::non_terminal());
        self.transitions.push(BTreeMap::new());
        NodeIndex::new(self.nodes.len() - 1)
    }

    fn start(&self) -> State {
        self.start
    }

    fn set_start(&mut self, state: State) {
        self.start = state;
    }

    fn is_terminal(&self, state: State) -> bool {
        self.nodes[state.index()].terminal
    }

    fn set_terminal(&mut self, state: State, terminal: bool) {
        self.nodes[state.index()].terminal = terminal;
    }

    fn edges(&self, state: State) -> Vec<Edge> {
        self.transitions[state.index()]
            .iter()
            .map(|(symbol, to)| Edge::new(state, *to, *symbol))
            .collect()
    }

    /// Adds the transition, replacing an existing one on the same symbol.
    fn add_edge(&mut self, edge: Edge) {
        let symbol = dfa_symbol(&edge);
        self.transitions[edge.from.index()].insert(symbol, edge.to);
    }

    fn delete_edge(&mut self, edge: &Edge) -> bool {
        let symbol = dfa_symbol(edge);
        let map = &mut self.transitions[edge.from.index()];

        if map.get(&symbol) == Some(&edge.to) {
            map.remove(&symbol);
            true
        } else {
            false
        }
    }
}

impl Language for Dfa {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a char>) -> bool {
        if self.state_count() == 0 {
            return false;
        }

        let mut current = self.start;

        for symbol in input {
            match self.successor(current, *symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_terminal(current)
    }
}

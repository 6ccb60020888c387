use hashbrown::HashSet;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{Edge, FiniteAutomaton, Language, State, node::StateNode};

/// A nondeterministic finite automaton.
///
/// Edges may be epsilon edges (empty word), single characters or longer
/// words. Any number of edges may leave a state, including parallel edges
/// with the same word. Edges of a state are enumerated in insertion order.
#[derive(Debug, Clone)]
pub struct Nfa {
    start: State,
    graph: DiGraph<StateNode, String>,
}

impl Nfa {
    pub fn new() -> Self {
        Nfa {
            start: NodeIndex::new(0),
            graph: DiGraph::new(),
        }
    }

    /// Creates an NFA with `count` non-terminal states and no edges.
    pub fn with_state_count(count: usize) -> Self {
        let mut nfa = Nfa::new();
        for _ in 0..count {
            nfa.add_state();
        }
        nfa
    }

    fn collect_edges(&self, state: State, direction: Direction) -> Vec<Edge> {
        // petgraph links the newest edge first
        self.graph
            .edges_directed(state, direction)
            .map(|edge| Edge::new(edge.source(), edge.target(), edge.weight().clone()))
            .collect_vec()
            .into_iter()
            .rev()
            .collect()
    }

    /// Returns the edges ending in a state, including its self-loops.
    pub fn incoming_edges(&self, state: State) -> Vec<Edge> {
        self.collect_edges(state, Direction::Incoming)
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Nfa::new()
    }
}

impl FiniteAutomaton for Nfa {
    fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    fn add_state(&mut self) -> State {
        self.graph.add_node(StateNode::non_terminal())
    }

    fn start(&self) -> State {
        self.start
    }

    fn set_start(&mut self, state: State) {
        self.start = state;
    }

    fn is_terminal(&self, state: State) -> bool {
        self.graph[state].terminal
    }

    fn set_terminal(&mut self, state: State, terminal: bool) {
        self.graph[state].terminal = terminal;
    }

    fn edges(&self, state: State) -> Vec<Edge> {
        self.collect_edges(state, Direction::Outgoing)
    }

    fn add_edge(&mut self, edge: Edge) {
        self.graph.add_edge(edge.from, edge.to, edge.word);
    }

    fn delete_edge(&mut self, edge: &Edge) -> bool {
        let found = self
            .graph
            .edges_connecting(edge.from, edge.to)
            .find(|candidate| *candidate.weight() == edge.word)
            .map(|candidate| candidate.id());

        match found {
            Some(id) => {
                self.graph.remove_edge(id);
                true
            }
            None => false,
        }
    }
}

impl Language for Nfa {
    /// Simulates the NFA on configurations of (state, input position), so
    /// epsilon edges and multi character words are followed directly.
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a char>) -> bool {
        if self.state_count() == 0 {
            return false;
        }

        let input = input.into_iter().copied().collect_vec();
        let mut visited = HashSet::new();
        let mut stack = vec![(self.start, 0)];

        while let Some((state, position)) = stack.pop() {
            if !visited.insert((state, position)) {
                continue;
            }

            if position == input.len() && self.is_terminal(state) {
                return true;
            }

            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                let word = edge.weight();
                let end = position + word.chars().count();

                if end <= input.len() && word.chars().eq(input[position..end].iter().copied()) {
                    stack.push((edge.target(), end));
                }
            }
        }

        false
    }
}

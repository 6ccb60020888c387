//! Conversion of NFAs into regular expressions by state elimination.
//!
//! The produced expressions use literal characters, `1` for the empty word,
//! `+` for alternation, a postfix `*` for the Kleene star, juxtaposition for
//! concatenation and parentheses for grouping. If the NFA accepts nothing,
//! the expression is `0`. No simplification is performed.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::automaton::{Edge, FiniteAutomaton, State, nfa::Nfa};

/// The expression for the empty word.
pub const EPSILON: &str = "1";
/// The expression for the empty language.
pub const EMPTY_LANGUAGE: &str = "0";

/// Joins the words of the edges into a parenthesized alternation, or returns
/// None if there are no edges.
fn alternation(edges: &[Edge]) -> Option<String> {
    if edges.is_empty() {
        return None;
    }

    let alternatives = edges
        .iter()
        .map(|edge| {
            if edge.is_epsilon() {
                EPSILON
            } else {
                edge.word.as_str()
            }
        })
        .join("+");

    Some(format!("({alternatives})"))
}

fn loop_alternation(edges: &[Edge]) -> String {
    alternation(edges).unwrap_or_else(|| EPSILON.to_string())
}

impl Nfa {
    /// Adds a fresh terminal state that every formerly terminal state reaches
    /// by an epsilon edge. The new state is the only terminal state
    /// afterwards. Returns it.
    pub fn add_single_terminal(&mut self) -> State {
        let previous = self.terminal_states();
        let terminal = self.add_state();
        self.set_terminal(terminal, true);

        for state in previous {
            self.set_terminal(state, false);
            self.add_edge(Edge::epsilon(state, terminal));
        }

        terminal
    }

    /// Removes every edge touching `state` and bridges each pair of a
    /// predecessor and a successor with an edge labeled
    /// `(in loop* out)`. The state itself stays, without edges.
    fn eliminate_state(&mut self, state: State) {
        let mut loops = vec![];
        let mut incoming: BTreeMap<State, Vec<Edge>> = BTreeMap::new();
        let mut outgoing: BTreeMap<State, Vec<Edge>> = BTreeMap::new();

        for edge in self.incoming_edges(state) {
            if edge.from == state {
                loops.push(edge);
            } else {
                incoming.entry(edge.from).or_default().push(edge);
            }
        }

        for edge in self.edges(state) {
            if edge.to != state {
                outgoing.entry(edge.to).or_default().push(edge);
            }
        }

        tracing::debug!(
            "Eliminating state {} with {} loops, {} predecessors, {} successors",
            state.index(),
            loops.len(),
            incoming.len(),
            outgoing.len()
        );

        let loop_regex = loop_alternation(&loops);

        let bridges = incoming
            .iter()
            .cartesian_product(outgoing.iter())
            .filter_map(|((from, in_edges), (to, out_edges))| {
                let in_regex = alternation(in_edges)?;
                let out_regex = alternation(out_edges)?;
                Some(Edge::new(
                    *from,
                    *to,
                    format!("({in_regex}{loop_regex}*{out_regex})"),
                ))
            })
            .collect_vec();

        for edge in loops
            .iter()
            .chain(incoming.values().flatten())
            .chain(outgoing.values().flatten())
        {
            self.delete_edge(edge);
        }

        for bridge in bridges {
            self.add_edge(bridge);
        }
    }

    /// Converts the NFA into an equivalent regular expression.
    ///
    /// A single terminal state T is added, then every state other than the
    /// start and T is eliminated in ascending index order. The remaining two
    /// state automaton with loop expressions `S` on the start and `U` on T,
    /// start to T expression `R` and T to start expression `B` is read off as
    /// `(S* R U* B)* S* R U*`. The round trip group is left out if there is
    /// no edge from T back to the start.
    ///
    /// Self is not modified, the elimination runs on a copy.
    pub fn to_regex(&self) -> String {
        let _span = tracing::span!(tracing::Level::DEBUG, "Nfa::to_regex").entered();

        if self.state_count() == 0 {
            return EMPTY_LANGUAGE.to_string();
        }

        let mut nfa = self.clone();
        let start = nfa.start();
        let terminal = nfa.add_single_terminal();

        for state in nfa.iter_states() {
            if state != start && state != terminal {
                nfa.eliminate_state(state);
            }
        }

        let (start_loops, start_to_terminal): (Vec<Edge>, Vec<Edge>) = nfa
            .edges(start)
            .into_iter()
            .partition(|edge| edge.to == start);
        let (terminal_loops, terminal_to_start): (Vec<Edge>, Vec<Edge>) = nfa
            .edges(terminal)
            .into_iter()
            .partition(|edge| edge.to == terminal);

        let Some(forward) = alternation(&start_to_terminal) else {
            tracing::debug!("No edge from the start state to the terminal state is left");
            return EMPTY_LANGUAGE.to_string();
        };

        let start_loop = loop_alternation(&start_loops);
        let terminal_loop = loop_alternation(&terminal_loops);
        let last_excursion = format!("{start_loop}*{forward}{terminal_loop}*");

        let regex = match alternation(&terminal_to_start) {
            Some(backward) => format!("({last_excursion}{backward})*{last_excursion}"),
            None => last_excursion,
        };

        tracing::info!(
            "Synthesized regex of length {} from NFA with {} states",
            regex.len(),
            self.state_count()
        );

        regex
    }
}

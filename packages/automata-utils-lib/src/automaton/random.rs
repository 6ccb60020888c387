use rand::{RngExt, SeedableRng, rngs::StdRng};

use crate::automaton::{Edge, FiniteAutomaton, State, nfa::Nfa};

/// Parameters for generating random NFAs.
#[derive(Debug, Clone)]
pub struct RandomNfaOptions {
    pub seed: u64,
    pub state_count: usize,
    pub alphabet: Vec<char>,
    /// Probability of an edge between an ordered pair of states, checked
    /// once per symbol and once for epsilon.
    pub edge_probability: f64,
    pub epsilon_probability: f64,
    /// Probability that a generated symbol edge reads two or three characters
    /// instead of one.
    pub long_word_probability: f64,
    pub terminal_probability: f64,
}

impl Default for RandomNfaOptions {
    fn default() -> Self {
        RandomNfaOptions {
            seed: 1,
            state_count: 4,
            alphabet: vec!['a', 'b'],
            edge_probability: 0.25,
            epsilon_probability: 0.1,
            long_word_probability: 0.0,
            terminal_probability: 0.3,
        }
    }
}

impl RandomNfaOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_state_count(mut self, state_count: usize) -> Self {
        self.state_count = state_count;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Vec<char>) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_edge_probability(mut self, edge_probability: f64) -> Self {
        self.edge_probability = edge_probability;
        self
    }

    pub fn with_epsilon_probability(mut self, epsilon_probability: f64) -> Self {
        self.epsilon_probability = epsilon_probability;
        self
    }

    pub fn with_long_word_probability(mut self, long_word_probability: f64) -> Self {
        self.long_word_probability = long_word_probability;
        self
    }

    pub fn with_terminal_probability(mut self, terminal_probability: f64) -> Self {
        self.terminal_probability = terminal_probability;
        self
    }
}

/// Generates an NFA with state 0 as start state. The same options always
/// produce the same NFA.
pub fn random_nfa(options: &RandomNfaOptions) -> Nfa {
    let mut r = StdRng::seed_from_u64(options.seed);
    let mut nfa = Nfa::with_state_count(options.state_count);

    if options.state_count == 0 {
        return nfa;
    }

    nfa.set_start(State::new(0));

    for state in nfa.iter_states() {
        let terminal = r.random_bool(options.terminal_probability);
        nfa.set_terminal(state, terminal);
    }

    for from in nfa.iter_states() {
        for to in nfa.iter_states() {
            if r.random_bool(options.epsilon_probability) {
                nfa.add_edge(Edge::epsilon(from, to));
            }

            for &symbol in &options.alphabet {
                if !r.random_bool(options.edge_probability) {
                    continue;
                }

                let mut word = symbol.to_string();
                if r.random_bool(options.long_word_probability) {
                    for _ in 0..r.random_range(1..3) {
                        let index = r.random_range(0..options.alphabet.len());
                        word.push(options.alphabet[index]);
                    }
                }

                nfa.add_edge(Edge::new(from, to, word));
            }
        }
    }

    nfa
}

use crate::automaton::{FiniteAutomaton, dfa::Dfa};

pub mod same_language;

/// Tests that every state of a DFA has exactly one transition for every
/// symbol of the alphabet.
pub fn test_totality(dfa: &Dfa, alphabet: &[char]) {
    for state in dfa.iter_states() {
        for symbol in alphabet {
            let count = dfa
                .edges(state)
                .iter()
                .filter(|edge| edge.symbol() == Some(*symbol))
                .count();

            assert_eq!(
                count,
                1,
                "state {} has {} transitions on {:?}",
                state.index(),
                count,
                symbol
            );
        }
    }
}

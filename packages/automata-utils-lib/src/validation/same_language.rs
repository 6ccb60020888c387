use itertools::{Itertools, repeat_n};

use crate::automaton::Language;

/// Returns all words over the alphabet with length at most
/// `max_word_length`, shortest first.
pub fn words_up_to(alphabet: &[char], max_word_length: usize) -> Vec<Vec<char>> {
    (0..=max_word_length)
        .flat_map(|length| {
            if length == 0 {
                return vec![vec![]];
            }
            repeat_n(alphabet.iter().copied(), length)
                .multi_cartesian_product()
                .collect_vec()
        })
        .collect()
}

/// Checks if two automata accept the same words over `alphabet` up to a
/// certain length.
pub fn same_language(
    a: &impl Language,
    b: &impl Language,
    alphabet: &[char],
    max_word_length: usize,
) -> bool {
    words_up_to(alphabet, max_word_length)
        .iter()
        .all(|word| a.accepts(word) == b.accepts(word))
}

pub fn assert_same_language(
    a: &impl Language,
    b: &impl Language,
    alphabet: &[char],
    max_word_length: usize,
) {
    for word in words_up_to(alphabet, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language(
    a: &impl Language,
    b: &impl Language,
    alphabet: &[char],
    max_word_length: usize,
) {
    for word in words_up_to(alphabet, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            _ => {}
        }
    }
}

#[test]
fn test_words_up_to() {
    let words = words_up_to(&['a', 'b'], 2);
    assert_eq!(words.len(), 1 + 2 + 4);
    assert_eq!(words[0], Vec::<char>::new());
    assert_eq!(words[3], vec!['a', 'a']);
}

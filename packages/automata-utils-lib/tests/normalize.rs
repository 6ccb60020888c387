use automata_utils_lib::{
    automaton::{
        Edge, FiniteAutomaton, Language, State,
        nfa::Nfa,
        random::{RandomNfaOptions, random_nfa},
    },
    validation::same_language::{assert_same_language, words_up_to},
};

fn word(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_split_long_word_between_two_states() {
    let mut nfa = Nfa::with_state_count(2);
    let p = State::new(0);
    let q = State::new(1);
    nfa.set_terminal(q, true);
    nfa.add_edge(Edge::new(p, q, "ab"));

    let split = nfa.split_long_words();

    assert_eq!(split.state_count(), 3);
    assert_eq!(split.start(), p);
    assert_eq!(split.terminal_states(), vec![q]);

    let fresh = State::new(2);
    assert_eq!(split.edges(p), vec![Edge::new(p, fresh, "a")]);
    assert_eq!(split.edges(fresh), vec![Edge::new(fresh, q, "b")]);

    for candidate in words_up_to(&['a', 'b'], 4) {
        assert_eq!(split.accepts(&candidate), candidate == word("ab"));
    }
}

#[test]
fn test_split_long_word_self_loop() {
    let mut nfa = Nfa::with_state_count(1);
    let p = State::new(0);
    nfa.set_terminal(p, true);
    nfa.add_edge(Edge::new(p, p, "ab"));

    let split = nfa.split_long_words();

    let fresh = State::new(1);
    assert_eq!(split.edges(p), vec![Edge::new(p, fresh, "a")]);
    assert_eq!(split.edges(fresh), vec![Edge::new(fresh, p, "b")]);
    assert!(!split.is_terminal(fresh));

    assert_same_language(&nfa, &split, &['a', 'b'], 6);
    assert!(split.accepts(&word("abab")));
    assert!(!split.accepts(&word("aba")));
}

#[test]
fn test_split_keeps_short_edges_and_order() {
    let mut nfa = Nfa::with_state_count(2);
    let q0 = State::new(0);
    let q1 = State::new(1);
    nfa.set_start(q1);
    nfa.add_edge(Edge::new(q0, q1, "abc"));
    nfa.add_edge(Edge::epsilon(q1, q0));
    nfa.add_edge(Edge::new(q1, q1, "c"));

    let split = nfa.split_long_words();

    assert_eq!(split.start(), q1);
    assert_eq!(split.state_count(), 4);
    assert_eq!(
        split.edges(q1),
        vec![Edge::epsilon(q1, q0), Edge::new(q1, q1, "c")]
    );
    assert_eq!(
        split.edges(State::new(2)),
        vec![Edge::new(State::new(2), State::new(3), "b")]
    );
    assert_eq!(
        split.edges(State::new(3)),
        vec![Edge::new(State::new(3), q1, "c")]
    );
    // the input is left alone
    assert_eq!(nfa.state_count(), 2);
}

#[test]
fn test_epsilon_closure_with_cycle() {
    let mut nfa = Nfa::with_state_count(4);
    let q = (0..4).map(State::new).collect::<Vec<_>>();

    nfa.add_edge(Edge::epsilon(q[0], q[1]));
    nfa.add_edge(Edge::epsilon(q[1], q[2]));
    nfa.add_edge(Edge::epsilon(q[2], q[0]));
    nfa.add_edge(Edge::new(q[2], q[3], "a"));

    let mut closure = nfa.epsilon_closure(q[1]);
    closure.sort();
    assert_eq!(closure, vec![q[0], q[1], q[2]]);

    assert_eq!(nfa.epsilon_closure(q[3]), vec![q[3]]);
}

#[test]
fn test_fold_epsilon_edges() {
    let mut nfa = Nfa::with_state_count(3);
    let q0 = State::new(0);
    let q1 = State::new(1);
    let q2 = State::new(2);

    nfa.set_terminal(q2, true);
    nfa.add_edge(Edge::epsilon(q0, q1));
    nfa.add_edge(Edge::new(q1, q2, "a"));
    nfa.add_edge(Edge::epsilon(q1, q2));
    nfa.add_edge(Edge::epsilon(q2, q0));

    let folded = nfa.fold_epsilon_edges();

    assert_eq!(folded.state_count(), 3);
    assert_eq!(folded.start(), q0);
    assert_eq!(folded.terminal_states(), vec![q0, q1, q2]);

    for state in folded.iter_states() {
        let edges = folded.edges(state);
        assert!(edges.iter().all(|edge| edge.word_len() == 1));
        assert!(edges.contains(&Edge::new(state, q2, "a")));
    }

    assert_same_language(&nfa, &folded, &['a', 'b'], 6);
}

#[test]
fn test_normalize_random() {
    for seed in 0..60 {
        let options = RandomNfaOptions::default()
            .with_seed(seed)
            .with_state_count(1 + (seed as usize % 8))
            .with_epsilon_probability(0.15)
            .with_long_word_probability(0.2);
        let nfa = random_nfa(&options);

        let normalized = nfa.normalize();

        for state in normalized.iter_states() {
            assert!(
                normalized
                    .edges(state)
                    .iter()
                    .all(|edge| edge.word_len() == 1),
                "seed {seed}: normalized NFA has an edge that does not read exactly one character"
            );
        }

        assert_same_language(&nfa, &normalized, &['a', 'b'], 6);
    }
}

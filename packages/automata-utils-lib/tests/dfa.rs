use automata_utils_lib::{
    automaton::{
        Edge, FiniteAutomaton, Language, State,
        dfa::Dfa,
        nfa::Nfa,
        random::{RandomNfaOptions, random_nfa},
    },
    config::{DeterminizeConfig, MetaStateKeyMode},
    validation::{
        same_language::{assert_inverse_language, assert_same_language, same_language},
        test_totality,
    },
};

fn word(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn random_corpus() -> impl Iterator<Item = Nfa> {
    (0..60).map(|seed| {
        let options = RandomNfaOptions::default()
            .with_seed(seed)
            .with_state_count(1 + (seed as usize % 8))
            .with_epsilon_probability(0.15);
        random_nfa(&options)
    })
}

#[test]
fn test_dfa_edges_are_sorted_and_overwritten() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    let q1 = dfa.add_state();

    dfa.add_edge(Edge::new(q0, q1, "c"));
    dfa.add_edge(Edge::new(q0, q0, "a"));
    dfa.add_edge(Edge::new(q0, q0, "c"));

    assert_eq!(
        dfa.edges(q0),
        vec![Edge::new(q0, q0, "a"), Edge::new(q0, q0, "c")]
    );
    assert_eq!(dfa.successor(q0, 'c'), Some(q0));
    assert_eq!(dfa.successor(q1, 'a'), None);
}

#[test]
fn test_dfa_delete_edge_checks_target() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    let q1 = dfa.add_state();
    dfa.add_edge(Edge::new(q0, q1, "a"));

    assert!(!dfa.delete_edge(&Edge::new(q0, q0, "a")));
    assert!(!dfa.delete_edge(&Edge::new(q0, q1, "b")));
    assert!(dfa.delete_edge(&Edge::new(q0, q1, "a")));
    assert!(dfa.edges(q0).is_empty());
}

#[test]
#[should_panic(expected = "DFA edge words must have length 1")]
fn test_dfa_rejects_long_words() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    dfa.add_edge(Edge::new(q0, q0, "ab"));
}

#[test]
#[should_panic(expected = "DFA edge words must have length 1")]
fn test_dfa_rejects_epsilon() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    dfa.delete_edge(&Edge::epsilon(q0, q0));
}

#[test]
fn test_nfa_to_dfa() {
    let mut nfa = Nfa::with_state_count(3);
    let q0 = State::new(0);
    let q1 = State::new(1);
    let q2 = State::new(2);
    nfa.set_terminal(q2, true);

    nfa.add_edge(Edge::new(q0, q0, "a"));
    nfa.add_edge(Edge::new(q0, q1, "b"));

    nfa.add_edge(Edge::new(q1, q2, "a"));
    nfa.add_edge(Edge::new(q2, q1, "b"));

    nfa.add_edge(Edge::new(q1, q1, "a"));
    nfa.add_edge(Edge::new(q1, q1, "b"));

    nfa.add_edge(Edge::new(q2, q2, "a"));
    nfa.add_edge(Edge::new(q2, q2, "b"));

    let dfa = nfa.determinize();

    assert_same_language(&nfa, &dfa, &['a', 'b'], 6);
}

#[test]
fn test_nfa_to_dfa_2() {
    let mut nfa = Nfa::with_state_count(3);
    let q0 = State::new(0);
    let q1 = State::new(1);
    let q2 = State::new(2);
    nfa.set_terminal(q2, true);

    nfa.add_edge(Edge::new(q0, q0, "a"));
    nfa.add_edge(Edge::new(q0, q0, "b"));

    nfa.add_edge(Edge::new(q0, q1, "a"));
    nfa.add_edge(Edge::new(q1, q2, "b"));

    let dfa = nfa.determinize();

    // {0}, {0, 1} and {0, 2}
    assert_eq!(dfa.state_count(), 3);
    assert_same_language(&nfa, &dfa, &['a', 'b'], 6);
}

#[test]
fn test_nfa_to_dfa_3() {
    // An NFA that has empty transitions and long words
    let mut nfa = Nfa::with_state_count(5);
    let q = (0..5).map(State::new).collect::<Vec<_>>();
    nfa.set_terminal(q[4], true);

    nfa.add_edge(Edge::new(q[0], q[1], "a"));
    nfa.add_edge(Edge::epsilon(q[0], q[2]));

    nfa.add_edge(Edge::new(q[1], q[2], "b"));

    nfa.add_edge(Edge::new(q[2], q[3], "ab"));
    nfa.add_edge(Edge::epsilon(q[2], q[4]));

    nfa.add_edge(Edge::epsilon(q[3], q[2]));

    let dfa = nfa.determinize();

    assert!(dfa.accepts(&word("")));
    assert!(dfa.accepts(&word("ab")));
    assert!(dfa.accepts(&word("abab")));
    assert!(!dfa.accepts(&word("aba")));
    assert_same_language(&nfa, &dfa, &['a', 'b'], 6);
}

#[test]
fn test_determinize_does_not_modify_input() {
    let mut nfa = Nfa::with_state_count(2);
    nfa.add_edge(Edge::new(State::new(0), State::new(1), "abc"));
    nfa.add_edge(Edge::epsilon(State::new(1), State::new(0)));

    let before = nfa.edges(State::new(0));
    let _ = nfa.determinize();

    assert_eq!(nfa.state_count(), 2);
    assert_eq!(nfa.edges(State::new(0)), before);
}

#[test]
fn test_determinize_random() {
    for (seed, nfa) in random_corpus().enumerate() {
        let dfa = nfa.determinize();

        for state in dfa.iter_states() {
            assert!(
                dfa.edges(state).iter().all(|edge| edge.word_len() == 1),
                "seed {seed}"
            );
        }

        assert_same_language(&nfa, &dfa, &['a', 'b'], 6);
    }
}

#[test]
fn test_determinize_digest_keys() {
    let config = DeterminizeConfig::default().with_meta_state_key(MetaStateKeyMode::Digest);

    for nfa in random_corpus() {
        let by_members = nfa.determinize();
        let by_digest = nfa.determinize_with(&config);

        assert_eq!(by_members.state_count(), by_digest.state_count());
        assert!(same_language(&by_members, &by_digest, &['a', 'b'], 6));
    }
}

#[test]
fn test_make_complete() {
    for nfa in random_corpus() {
        let mut dfa = nfa.determinize();
        let original = dfa.clone();
        let count = dfa.state_count();

        let sink = dfa.make_complete(&['a', 'b']);

        assert_eq!(sink.index(), count);
        assert_eq!(dfa.state_count(), count + 1);
        assert!(!dfa.is_terminal(sink));
        assert!(dfa.is_complete(&['a', 'b']));
        dfa.assert_complete(&['a', 'b']);
        test_totality(&dfa, &['a', 'b']);
        assert_eq!(
            dfa.edges(sink),
            vec![Edge::new(sink, sink, "a"), Edge::new(sink, sink, "b")]
        );

        assert_same_language(&original, &dfa, &['a', 'b'], 6);
    }
}

#[test]
fn test_make_complete_keeps_existing_edges() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    dfa.set_terminal(q0, true);
    dfa.add_edge(Edge::new(q0, q0, "a"));

    let sink = dfa.make_complete(&['a', 'b', 'c']);

    assert_eq!(
        dfa.edges(q0),
        vec![
            Edge::new(q0, q0, "a"),
            Edge::new(q0, sink, "b"),
            Edge::new(q0, sink, "c"),
        ]
    );
}

#[test]
fn test_make_complete_adds_sink_to_total_dfa() {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state();
    dfa.add_edge(Edge::new(q0, q0, "a"));

    let sink = dfa.make_complete(&['a']);

    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.edges(q0), vec![Edge::new(q0, q0, "a")]);
    assert_eq!(dfa.edges(sink), vec![Edge::new(sink, sink, "a")]);
}

#[test]
fn test_complement() {
    for nfa in random_corpus() {
        let mut dfa = nfa.determinize();
        dfa.make_complete(&['a', 'b']);

        let mut complement = dfa.clone();
        complement.complement_in_place();

        assert_inverse_language(&dfa, &complement, &['a', 'b'], 6);
        assert_inverse_language(&nfa, &complement, &['a', 'b'], 6);
        assert_eq!(complement, dfa.complement());
    }
}

#[test]
fn test_double_complement() {
    for nfa in random_corpus() {
        let mut dfa = nfa.determinize();
        dfa.make_complete(&['a', 'b']);

        let mut twice = dfa.clone();
        twice.complement_in_place();
        twice.complement_in_place();

        assert_eq!(twice, dfa);
        assert_same_language(&dfa, &twice, &['a', 'b'], 6);
    }
}

#[test]
fn test_complement_needs_completion() {
    // without a sink, "b" is rejected by both the DFA and its complement
    let mut nfa = Nfa::with_state_count(1);
    nfa.set_terminal(State::new(0), true);
    nfa.add_edge(Edge::new(State::new(0), State::new(0), "a"));

    let dfa = nfa.determinize();
    let complement = dfa.complement();

    assert!(!dfa.accepts(&word("b")));
    assert!(!complement.accepts(&word("b")));
}

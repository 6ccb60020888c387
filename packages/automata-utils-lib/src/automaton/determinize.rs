//! Subset construction, turning an NFA into a DFA.

use std::{
    collections::BTreeMap,
    hash::{DefaultHasher, Hash, Hasher},
};

use hashbrown::HashMap;

use crate::{
    automaton::{Edge, FiniteAutomaton, State, dfa::Dfa, nfa::Nfa},
    config::{DeterminizeConfig, MetaStateKeyMode},
};

/// A set of NFA states that becomes a single DFA state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaState {
    members: Vec<bool>,
    id: Option<State>,
}

/// The key under which a [MetaState] is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MetaStateKey {
    Members(Vec<bool>),
    Digest(u64),
}

impl MetaState {
    pub fn empty(state_count: usize) -> Self {
        MetaState {
            members: vec![false; state_count],
            id: None,
        }
    }

    pub fn singleton(state_count: usize, state: State) -> Self {
        let mut meta = MetaState::empty(state_count);
        meta.insert(state);
        meta
    }

    pub fn insert(&mut self, state: State) {
        self.members[state.index()] = true;
    }

    pub fn contains(&self, state: State) -> bool {
        self.members[state.index()]
    }

    pub fn id(&self) -> Option<State> {
        self.id
    }

    /// Iterates over the member states in index order.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .map(|(index, _)| State::new(index))
    }

    /// A 64 bit content hash of the membership vector.
    pub fn digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.members.hash(&mut hasher);
        hasher.finish()
    }

    fn key(&self, mode: MetaStateKeyMode) -> MetaStateKey {
        match mode {
            MetaStateKeyMode::Members => MetaStateKey::Members(self.members.clone()),
            MetaStateKeyMode::Digest => MetaStateKey::Digest(self.digest()),
        }
    }
}

impl Nfa {
    /// Determinizes the NFA with the default configuration.
    ///
    /// See [`Nfa::determinize_with`].
    pub fn determinize(&self) -> Dfa {
        self.determinize_with(&DeterminizeConfig::default())
    }

    /// Determinizes the NFA by the subset construction.
    ///
    /// The NFA is normalized first. Only subsets reachable from `{start}` are
    /// built, and a DFA state only gets an edge on a symbol if some member
    /// has an edge on it, so the result is usually not complete.
    pub fn determinize_with(&self, config: &DeterminizeConfig) -> Dfa {
        let _span = tracing::span!(tracing::Level::DEBUG, "Nfa::determinize").entered();

        let nfa = self.normalize();
        let mode = *config.get_meta_state_key();
        let mut dfa = Dfa::new();

        if nfa.state_count() == 0 {
            return dfa;
        }

        let mut meta_states: HashMap<MetaStateKey, MetaState> = HashMap::new();

        let mut start = MetaState::singleton(nfa.state_count(), nfa.start());
        let dfa_start = dfa.add_state();
        start.id = Some(dfa_start);
        dfa.set_start(dfa_start);
        meta_states.insert(start.key(mode), start.clone());

        let mut stack = vec![start];

        while let Some(meta_from) = stack.pop() {
            let Some(from) = meta_from.id else {
                unreachable!("MetaStates on the stack always have an id");
            };

            let mut successors: BTreeMap<char, MetaState> = BTreeMap::new();

            for state in meta_from.iter() {
                if nfa.is_terminal(state) {
                    dfa.set_terminal(from, true);
                }

                for edge in nfa.edges(state) {
                    let Some(symbol) = edge.symbol() else {
                        unreachable!("normalized NFAs only have single character edges");
                    };

                    successors
                        .entry(symbol)
                        .or_insert_with(|| MetaState::empty(nfa.state_count()))
                        .insert(edge.to);
                }
            }

            tracing::debug!(
                "Exploring DFA state {} with successors on {} symbols",
                from.index(),
                successors.len()
            );

            for (symbol, mut meta_to) in successors {
                let key = meta_to.key(mode);

                let to = match meta_states.get(&key).and_then(MetaState::id) {
                    Some(to) => to,
                    None => {
                        let to = dfa.add_state();
                        meta_to.id = Some(to);
                        meta_states.insert(key, meta_to.clone());
                        stack.push(meta_to);
                        to
                    }
                };

                dfa.add_edge(Edge::new(from, to, symbol));
            }
        }

        tracing::info!(
            "Determinized NFA with {} states into DFA with {} states",
            self.state_count(),
            dfa.state_count()
        );

        dfa
    }
}

#[test]
fn test_meta_state() {
    let mut meta = MetaState::singleton(4, State::new(2));
    meta.insert(State::new(0));
    meta.insert(State::new(2));

    assert!(meta.contains(State::new(0)));
    assert!(!meta.contains(State::new(1)));
    assert_eq!(meta.iter().collect::<Vec<_>>(), vec![State::new(0), State::new(2)]);
    assert_eq!(meta.id(), None);

    let mut other = MetaState::empty(4);
    other.insert(State::new(2));
    other.insert(State::new(0));
    assert_eq!(meta.digest(), other.digest());
    assert_eq!(
        meta.key(MetaStateKeyMode::Members),
        other.key(MetaStateKeyMode::Members)
    );
}

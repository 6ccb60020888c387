//! In this file, we read and write the plain text representation of automata.
//!
//! The input format is a whitespace separated token stream:
//! ```text
//! 3              state count
//! 0              start state
//! false false true
//! 2              edge count
//! 0 1 ab         from, to, word
//! 1 2 eps        `eps` is the empty word
//! ```
//!
//! The output format is line based and does not repeat the state count or
//! the per state flags:
//! ```text
//! Start: 0
//! Terminals: 2
//! 0->1 ab
//! 1->2
//! ```
//!
//! Words cannot contain whitespace. Reading and then writing an automaton
//! does not reproduce the input, only its content.
use std::io::{Read, Write};

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{digit1, multispace0},
    combinator::{all_consuming, map_res, value},
    error::ParseError,
    sequence::preceded,
};
use thiserror::Error;

use crate::automaton::{Edge, FiniteAutomaton, State, nfa::Nfa};

/// The token standing for the empty word in the input format.
pub const EPSILON_TOKEN: &str = "eps";

type NomError<'a> = nom::error::Error<&'a str>;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("invalid token {token:?}, expected {expected}")]
    InvalidToken {
        token: String,
        expected: &'static str,
    },
    #[error("{what} {state} is out of range, the automaton has {count} states")]
    StateOutOfRange {
        what: &'static str,
        state: usize,
        count: usize,
    },
    #[error("failed to read the automaton")]
    Io(#[from] std::io::Error),
}

fn token<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    preceded(multispace0, take_till1(char::is_whitespace)).parse(input)
}

fn unsigned<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, usize, E>
where
    E: nom::error::FromExternalError<&'a str, std::num::ParseIntError>,
{
    map_res(digit1, str::parse::<usize>).parse(input)
}

fn boolean<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, bool, E> {
    alt((
        value(
            true,
            alt((
                tag("true"),
                tag("TRUE"),
                tag("True"),
                tag("t"),
                tag("T"),
                tag("1"),
            )),
        ),
        value(
            false,
            alt((
                tag("false"),
                tag("FALSE"),
                tag("False"),
                tag("f"),
                tag("F"),
                tag("0"),
            )),
        ),
    ))
    .parse(input)
}

/// Hands out the tokens of the input one at a time.
struct TokenReader<'a> {
    rest: &'a str,
}

impl<'a> TokenReader<'a> {
    fn new(input: &'a str) -> Self {
        TokenReader { rest: input }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, FormatError> {
        match token::<NomError<'a>>(self.rest) {
            Ok((rest, token)) => {
                self.rest = rest;
                Ok(token)
            }
            Err(_) => Err(FormatError::UnexpectedEnd { expected }),
        }
    }

    fn next_with<T, P>(&mut self, parser: P, expected: &'static str) -> Result<T, FormatError>
    where
        P: Parser<&'a str, Output = T, Error = NomError<'a>>,
    {
        let token = self.next_token(expected)?;

        all_consuming(parser)
            .parse(token)
            .map(|(_, value)| value)
            .map_err(|_| FormatError::InvalidToken {
                token: token.to_string(),
                expected,
            })
    }

    fn next_unsigned(&mut self, expected: &'static str) -> Result<usize, FormatError> {
        self.next_with(unsigned::<NomError<'a>>, expected)
    }

    fn next_state(&mut self, expected: &'static str, count: usize) -> Result<State, FormatError> {
        let state = self.next_unsigned(expected)?;
        if state >= count {
            return Err(FormatError::StateOutOfRange {
                what: expected,
                state,
                count,
            });
        }
        Ok(State::new(state))
    }
}

/// Parses an NFA from the input format. Anything after the last edge is
/// ignored.
pub fn parse_nfa(input: &str) -> Result<Nfa, FormatError> {
    let mut tokens = TokenReader::new(input);

    let count = tokens.next_unsigned("state count")?;
    let start = tokens.next_unsigned("start state")?;
    if start >= count && !(count == 0 && start == 0) {
        return Err(FormatError::StateOutOfRange {
            what: "start state",
            state: start,
            count,
        });
    }

    // states are only added once their flag is read, a short input must not
    // allocate the announced count up front
    let mut nfa = Nfa::new();
    for _ in 0..count {
        let terminal = tokens.next_with(boolean::<NomError<'_>>, "terminal flag")?;
        let state = nfa.add_state();
        nfa.set_terminal(state, terminal);
    }
    nfa.set_start(State::new(start));

    let edge_count = tokens.next_unsigned("edge count")?;
    for _ in 0..edge_count {
        let from = tokens.next_state("edge source", count)?;
        let to = tokens.next_state("edge target", count)?;
        let word = match tokens.next_token("edge word")? {
            EPSILON_TOKEN => "",
            word => word,
        };

        nfa.add_edge(Edge::new(from, to, word));
    }

    tracing::debug!(
        "Parsed NFA with {} states and {} edges",
        count,
        edge_count
    );

    Ok(nfa)
}

impl Nfa {
    /// Reads the whole reader and parses it with [parse_nfa].
    pub fn from_reader(mut reader: impl Read) -> Result<Nfa, FormatError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        parse_nfa(&input)
    }
}

pub trait ToTextFormat {
    fn to_text_format(&self) -> String;
}

impl<A: FiniteAutomaton> ToTextFormat for A {
    fn to_text_format(&self) -> String {
        let mut text = format!("Start: {}\nTerminals:", self.start().index());

        for state in self.terminal_states() {
            text.push_str(&format!(" {}", state.index()));
        }
        text.push('\n');

        for state in self.iter_states() {
            for edge in self.edges(state) {
                text.push_str(&format!("{edge}\n"));
            }
        }

        text
    }
}

/// Writes the automaton in the output format.
pub fn write_automaton<W: Write>(
    writer: &mut W,
    automaton: &impl FiniteAutomaton,
) -> std::io::Result<()> {
    writer.write_all(automaton.to_text_format().as_bytes())?;
    writer.flush()
}

#[test]
fn test_token() {
    let (rest, token) = token::<nom::error::Error<&str>>("  \n ab\tc").unwrap();
    assert_eq!(token, "ab");
    assert_eq!(rest, "\tc");
}

#[test]
fn test_boolean() {
    for (input, expected) in [("true", true), ("T", true), ("1", true), ("False", false)] {
        let (_, parsed) = all_consuming(boolean::<nom::error::Error<&str>>)
            .parse(input)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    assert!(
        all_consuming(boolean::<nom::error::Error<&str>>)
            .parse("tru")
            .is_err()
    );
}

#[test]
fn test_parse_nfa_1() {
    let nfa = parse_nfa("3 0\nfalse false true\n2\n0 1 ab\n1 2 eps\n").unwrap();

    assert_eq!(nfa.state_count(), 3);
    assert_eq!(nfa.start(), State::new(0));
    assert_eq!(nfa.terminal_states(), vec![State::new(2)]);
    assert_eq!(
        nfa.edges(State::new(1)),
        vec![Edge::epsilon(State::new(1), State::new(2))]
    );
}

#[test]
fn test_parse_nfa_errors() {
    assert!(matches!(
        parse_nfa("2 0 true"),
        Err(FormatError::UnexpectedEnd {
            expected: "terminal flag"
        })
    ));
    assert!(matches!(
        parse_nfa("2 0 true maybe 0"),
        Err(FormatError::InvalidToken { .. })
    ));
    assert!(matches!(
        parse_nfa("2 0 true false 1 0 2 a"),
        Err(FormatError::StateOutOfRange { state: 2, .. })
    ));
    assert!(matches!(
        parse_nfa("2 5 true false 0"),
        Err(FormatError::StateOutOfRange { state: 5, .. })
    ));
}

#[test]
fn test_parse_nfa_huge_state_count() {
    assert!(matches!(
        parse_nfa("99999999999999 0"),
        Err(FormatError::UnexpectedEnd {
            expected: "terminal flag"
        })
    ));
    assert!(matches!(
        parse_nfa("99999999999999 0 true false maybe"),
        Err(FormatError::InvalidToken { .. })
    ));
}

#[test]
fn test_write_nfa() {
    let nfa = parse_nfa("3 1\ntrue false true\n3\n1 0 eps\n0 2 ab\n0 0 a\n").unwrap();

    let mut buffer = Vec::new();
    write_automaton(&mut buffer, &nfa).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "Start: 1\nTerminals: 0 2\n0->2 ab\n0->0 a\n1->0 \n"
    );
}

use std::{
    fmt::Display,
    io::{self, Read, Write},
    str::FromStr,
};

use anyhow::Context;
use automata_utils_lib::{
    automaton::{FiniteAutomaton, format::ToTextFormat, nfa::Nfa},
    config::AutomataConfig,
    logger::init_logging,
};
use clap::Parser;

/// The transformation applied to the NFA read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Split,
    Normalize,
    Determinize,
    Complete,
    Complement,
    Regex,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "split" => Ok(Mode::Split),
            "normalize" | "norm" => Ok(Mode::Normalize),
            "determinize" | "det" => Ok(Mode::Determinize),
            "complete" => Ok(Mode::Complete),
            "complement" => Ok(Mode::Complement),
            "regex" => Ok(Mode::Regex),
            _ => Err(anyhow::anyhow!("Invalid mode: {}", s)),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Split => write!(f, "split"),
            Mode::Normalize => write!(f, "normalize"),
            Mode::Determinize => write!(f, "determinize"),
            Mode::Complete => write!(f, "complete"),
            Mode::Complement => write!(f, "complement"),
            Mode::Regex => write!(f, "regex"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "automata-utils")]
#[command(version = "0.1")]
#[command(about = "Reads an NFA from stdin, transforms it and writes the result to stdout", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = Mode::Split)]
    mode: Mode,

    /// Alphabet used by `complete` and `complement`, e.g. `ab`. Defaults to
    /// the symbols of the determinized automaton.
    #[arg(short, long)]
    alphabet: Option<String>,

    #[arg(short, long)]
    config: Option<String>,
}

fn run(mode: Mode, alphabet: Option<&str>, config: &AutomataConfig, nfa: &Nfa) -> String {
    match mode {
        Mode::Split => nfa.split_long_words().to_text_format(),
        Mode::Normalize => nfa.normalize().to_text_format(),
        Mode::Determinize => nfa
            .determinize_with(config.get_determinize())
            .to_text_format(),
        Mode::Complete | Mode::Complement => {
            let mut dfa = nfa.determinize_with(config.get_determinize());
            let alphabet = match alphabet {
                Some(alphabet) => alphabet.chars().collect(),
                None => dfa.alphabet(),
            };

            dfa.make_complete(&alphabet);
            if mode == Mode::Complement {
                dfa.complement_in_place();
            }

            dfa.to_text_format()
        }
        Mode::Regex => format!("{}\n", nfa.to_regex()),
    }
}

/// Reads an NFA from `input` and returns the complete output of `mode`.
/// Nothing is produced unless the whole input parses.
fn filter(
    mode: Mode,
    alphabet: Option<&str>,
    config: &AutomataConfig,
    input: impl Read,
) -> anyhow::Result<String> {
    let nfa = Nfa::from_reader(input).context("failed to read the NFA from stdin")?;
    tracing::debug!("Running {} on NFA with {} states", mode, nfa.state_count());

    Ok(run(mode, alphabet, config, &nfa))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AutomataConfig::from_optional_file(args.config)?;
    init_logging(config.get_logger(), "automata")?;

    let output = filter(
        args.mode,
        args.alphabet.as_deref(),
        &config,
        io::stdin().lock(),
    )?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write the result to stdout")?;

    Ok(())
}

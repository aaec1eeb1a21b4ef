use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gram_synth_core::{generate, Oracle, QueryCounter, Synthesizer};
use gram_synth_oracle::{CommandOracle, RegexOracle, XmlOracle};

use crate::print::grammar_to_json;
use crate::trace::Granularity;
use crate::utils::ErrorContext as EC;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OracleKind {
  /// Accept candidates that are well-formed XML fragments
  #[default]
  Xml,
  /// Accept candidates fully matching --pattern
  Regex,
  /// Accept candidates for which --command exits successfully
  Command,
}

#[derive(Parser)]
pub struct RunArg {
  /// The seed input. Must itself be accepted by the oracle for the
  /// synthesized grammar to be useful.
  seed: Option<String>,

  /// Read the seed from a file instead of the command line.
  #[clap(short, long, value_name = "FILE", conflicts_with = "seed")]
  file: Option<PathBuf>,

  /// The membership oracle that decides which candidates stay in the
  /// language.
  #[clap(short, long, value_enum, default_value_t)]
  oracle: OracleKind,

  /// Regular expression for the regex oracle, anchored to the whole
  /// candidate.
  #[clap(long, value_name = "REGEX", required_if_eq("oracle", "regex"))]
  pattern: Option<String>,

  /// External command for the command oracle. Candidates are piped to its
  /// stdin; exit status zero accepts.
  #[clap(
    long,
    value_name = "CMD",
    num_args = 1..,
    required_if_eq("oracle", "command")
  )]
  command: Vec<String>,

  /// Output the grammar as a JSON tree instead of the canonical form.
  #[clap(long)]
  json: bool,

  /// Emit N example productions generated from the synthesized grammar,
  /// one per line after the grammar itself.
  #[clap(long, value_name = "N")]
  samples: Option<usize>,

  /// RNG seed for --samples, for reproducible output.
  #[clap(long, value_name = "SEED", requires = "samples")]
  sample_seed: Option<u64>,

  /// Upper bound on Star repetitions when emitting samples.
  #[clap(long, value_name = "N", default_value_t = 3)]
  max_reps: usize,

  /// Granularity of synthesis statistics printed to stderr.
  #[clap(long, value_enum, default_value_t)]
  tracing: Granularity,
}

pub fn run_with_seed(arg: RunArg) -> Result<()> {
  let seed = read_seed(&arg)?;
  match arg.oracle {
    OracleKind::Xml => synthesize_and_report(arg, &seed, XmlOracle::new()),
    OracleKind::Regex => {
      let pattern = arg.pattern.as_deref().unwrap_or_default();
      let oracle = RegexOracle::new(pattern).context(EC::InvalidOraclePattern)?;
      synthesize_and_report(arg, &seed, oracle)
    }
    OracleKind::Command => {
      let mut command = arg.command.iter();
      let program = command.next().cloned().unwrap_or_default();
      let oracle = CommandOracle::new(program).args(command.cloned());
      synthesize_and_report(arg, &seed, oracle)
    }
  }
}

fn read_seed(arg: &RunArg) -> Result<String> {
  if let Some(path) = &arg.file {
    let content = read_to_string(path).context(EC::CannotReadSeedFile)?;
    // a trailing newline is an editor artifact, not part of the language
    return Ok(content.trim_end_matches('\n').to_string());
  }
  arg.seed.clone().context(EC::NoSeedProvided)
}

fn synthesize_and_report<O: Oracle>(arg: RunArg, seed: &str, oracle: O) -> Result<()> {
  let trace = arg.tracing.run_trace();
  let result = Synthesizer::new(seed, QueryCounter::new(oracle)).synthesize()?;
  if arg.json {
    println!("{}", grammar_to_json(result.tree(), result.grammar())?);
  } else {
    println!("{result}");
  }
  if let Some(count) = arg.samples {
    let mut rng = match arg.sample_seed {
      Some(sample_seed) => StdRng::seed_from_u64(sample_seed),
      None => StdRng::from_os_rng(),
    };
    for _ in 0..count {
      println!(
        "{}",
        generate::sample(result.tree(), result.grammar(), &mut rng, arg.max_reps)
      );
    }
  }
  trace.print_synthesis(&result)?;
  Ok(())
}

#[cfg(test)]
mod test {
  use super::*;
  use clap::Parser;

  fn parse(args: &[&str]) -> RunArg {
    RunArg::parse_from(std::iter::once(&"gram-synth").chain(args))
  }

  #[test]
  fn test_defaults() {
    let arg = parse(&["<a>hi</a>"]);
    assert!(matches!(arg.oracle, OracleKind::Xml));
    assert!(!arg.json);
    assert!(arg.samples.is_none());
  }

  #[test]
  fn test_regex_oracle_requires_pattern() {
    let result = RunArg::try_parse_from(["gram-synth", "ab", "--oracle", "regex"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_run_with_regex_oracle() {
    let arg = parse(&["abc", "--oracle", "regex", "--pattern", "abc"]);
    run_with_seed(arg).expect("synthesis succeeds");
  }

  #[test]
  fn test_invalid_pattern_reports_context() {
    let arg = parse(&["ab", "--oracle", "regex", "--pattern", "(unclosed"]);
    let error = run_with_seed(arg).expect_err("pattern is invalid");
    assert!(error.downcast_ref::<EC>().is_some());
  }

  #[test]
  fn test_missing_seed_reports_context() {
    let arg = parse(&[]);
    let error = run_with_seed(arg).expect_err("no seed given");
    assert!(error.downcast_ref::<EC>().is_some());
  }
}

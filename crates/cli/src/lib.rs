mod completions;
mod print;
mod run;
mod trace;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use completions::{run_shell_completion, CompletionsArg};
use run::{run_with_seed, RunArg};
use utils::exit_with_error;

#[derive(Parser)]
#[clap(author, version, about)]
/// Synthesize a context-free grammar from one seed input and a membership
/// oracle.
///
/// Example: gram-synth run '<a>hi</a>' --oracle xml
struct App {
  #[clap(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Synthesize a grammar from a seed string. (default command)
  Run(RunArg),
  /// Generate shell completion script.
  Completions(CompletionsArg),
}

pub fn execute_main() -> Result<()> {
  match main_with_args(std::env::args()) {
    Err(error) => exit_with_error(error),
    ok => ok,
  }
}

fn is_app_argument(arg: &str) -> bool {
  matches!(
    arg,
    "run" | "completions" | "help" | "-h" | "--help" | "-V" | "--version"
  )
}

fn main_with_args(args: impl Iterator<Item = String>) -> Result<()> {
  let args: Vec<String> = args.collect();
  // allow `gram-synth '<seed>'` without spelling out the run subcommand
  let default_run = args
    .get(1)
    .is_some_and(|arg| !is_app_argument(arg));
  if default_run {
    let arg = RunArg::parse_from(&args);
    return run_with_seed(arg);
  }
  let app = App::parse_from(&args);
  match app.command {
    Commands::Run(arg) => run_with_seed(arg),
    Commands::Completions(arg) => run_shell_completion::<App>(arg),
  }
}

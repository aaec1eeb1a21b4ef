//! Generate shell completions, e.g.
//! ```console
//! gram-synth completions zsh > $HOME/.zsh/site-functions/_gram-synth
//! ```

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use std::io;

#[derive(Parser)]
pub struct CompletionsArg {
  /// Output the completion file for given shell.
  /// If not provided, shell flavor will be inferred from environment.
  #[arg(value_enum)]
  shell: Option<Shell>,
}

pub fn run_shell_completion<C: CommandFactory>(arg: CompletionsArg) -> Result<()> {
  run_shell_completion_impl::<C, _>(arg, &mut io::stdout())
}

fn run_shell_completion_impl<C: CommandFactory, W: io::Write>(
  arg: CompletionsArg,
  output: &mut W,
) -> Result<()> {
  let shell = arg
    .shell
    .or_else(Shell::from_env)
    .ok_or_else(|| anyhow!("cannot infer shell from environment"))?;
  let mut cmd = C::command();
  let name = cmd.get_name().to_string();
  generate(shell, &mut cmd, name, output);
  Ok(())
}

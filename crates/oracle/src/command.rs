use std::io::Write;
use std::process::{Command, Stdio};

use gram_synth_core::Oracle;

/// Treats an external program as the membership predicate.
///
/// The candidate is written to the child's stdin and membership is the
/// child's exit status: success accepts, anything else rejects. Failing to
/// spawn the program at all also rejects, per the oracle contract that
/// internal failures translate to `false`.
#[derive(Clone, Debug)]
pub struct CommandOracle {
  program: String,
  args: Vec<String>,
}

impl CommandOracle {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  fn query(&self, candidate: &str) -> std::io::Result<bool> {
    let mut child = Command::new(&self.program)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
      // the child may exit before draining its stdin; a broken pipe here is
      // not a verdict, the exit status is
      let _ = stdin.write_all(candidate.as_bytes());
    }
    Ok(child.wait()?.success())
  }
}

impl Oracle for CommandOracle {
  fn accepts(&self, candidate: &str) -> bool {
    self.query(candidate).unwrap_or(false)
  }
}

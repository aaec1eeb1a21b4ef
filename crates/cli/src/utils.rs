use ansi_term::{Color, Style};
use anyhow::{Error, Result};

use std::fmt;

/// ErrorContext stands for gram-synth command line usage.
/// It provides abstraction around exit code, context, message and
/// potential fix.
#[derive(Debug, Clone)]
pub enum ErrorContext {
  NoSeedProvided,
  CannotReadSeedFile,
  InvalidOraclePattern,
}

impl ErrorContext {
  fn exit_code(&self) -> i32 {
    use ErrorContext::*;
    match self {
      NoSeedProvided => 2,
      _ => 1,
    }
  }
}

impl fmt::Display for ErrorContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let err_msg = ErrorMessage::from_context(self);
    write!(f, "{}", err_msg.title)
  }
}

struct ErrorMessage {
  title: String,
  description: String,
}

impl ErrorMessage {
  fn new<S: ToString>(title: S, description: S) -> Self {
    Self {
      title: title.to_string(),
      description: description.to_string(),
    }
  }

  fn from_context(ctx: &ErrorContext) -> ErrorMessage {
    use ErrorContext::*;
    match ctx {
      NoSeedProvided => Self::new(
        "No seed input provided.",
        "Pass the seed as an argument, or use --file to read it from disk.",
      ),
      CannotReadSeedFile => Self::new(
        "Cannot read seed file.",
        "Please check that the --file path exists and is readable.",
      ),
      InvalidOraclePattern => Self::new(
        "Cannot compile oracle pattern.",
        "The --pattern argument is not a valid regular expression.",
      ),
    }
  }
}

pub fn exit_with_error(error: Error) -> Result<()> {
  if let Some(e) = error.downcast_ref::<clap::Error>() {
    e.exit()
  }
  if let Some(e) = error.downcast_ref::<ErrorContext>() {
    let error_fmt = ErrorFormat {
      context: e,
      inner: &error,
    };
    eprintln!("{error_fmt}");
    std::process::exit(e.exit_code())
  }
  // use anyhow's default error reporting
  Err(error)
}

struct ErrorFormat<'a> {
  context: &'a ErrorContext,
  inner: &'a Error,
}

impl fmt::Display for ErrorFormat<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let ErrorMessage { title, description } = ErrorMessage::from_context(self.context);
    let bold = Style::new().bold();
    let error = Color::Red.paint("Error:");
    let message = bold.paint(title);
    writeln!(f, "{error} {message}")?;
    let help = Color::Blue.paint("Help:");
    writeln!(f, "{help} {description}")?;
    // skip the context itself, it is already rendered above
    for err in self.inner.chain().skip(1) {
      let prefix = Color::Red.paint("↳");
      writeln!(f, "{prefix} {err}")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use anyhow::anyhow;

  #[test]
  fn test_display_uses_title() {
    let ctx = ErrorContext::CannotReadSeedFile;
    assert_eq!(ctx.to_string(), "Cannot read seed file.");
  }

  #[test]
  fn test_error_format_lists_causes() {
    let error = anyhow!("root cause").context(ErrorContext::InvalidOraclePattern);
    let context = error
      .downcast_ref::<ErrorContext>()
      .expect("context is attached");
    let rendered = ErrorFormat {
      context,
      inner: &error,
    }
    .to_string();
    assert!(rendered.contains("Cannot compile oracle pattern."));
    assert!(rendered.contains("root cause"));
  }
}

use gram_synth_core::Oracle;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegexOracleError {
  #[error("the oracle pattern is not a valid regular expression")]
  Parse(#[from] regex::Error),
}

/// Accepts candidates fully matched by a regular expression.
///
/// The pattern is anchored on both ends, so it must cover the whole
/// candidate; a substring match is not membership.
#[derive(Clone, Debug)]
pub struct RegexOracle {
  regex: Regex,
}

impl RegexOracle {
  pub fn new(pattern: &str) -> Result<Self, RegexOracleError> {
    let anchored = format!("^(?:{pattern})$");
    Ok(Self {
      regex: Regex::new(&anchored)?,
    })
  }
}

impl Oracle for RegexOracle {
  fn accepts(&self, candidate: &str) -> bool {
    self.regex.is_match(candidate)
  }
}

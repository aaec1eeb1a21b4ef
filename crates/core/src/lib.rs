/*!
This crate is the core library for gram-synth.

It synthesizes a context-free grammar that generalizes a single seed string,
guided by a black-box membership [`Oracle`]. The result is a sequence of
grammar nodes whose language contains the seed and whose oracle-checked
witnesses are all accepted; it is sound with respect to those witnesses, not
minimal or complete. Usually you will only need the gram-synth CLI instead of
this crate, but the [`Synthesizer`] API is the right entry point for using
synthesis as a library.
*/

pub mod context;
pub mod generalize;
pub mod generate;
pub mod memo;
pub mod node;
pub mod oracle;
pub mod printer;
pub mod synthesize;

pub use node::{Grammar, GrammarTree, NodeId, NodeKind, TargetMissing};
pub use oracle::{Oracle, QueryCounter};
pub use synthesize::{SynthError, Synthesis, Synthesizer};

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_synthesize_repetition() {
    let xml_like = |s: &str| {
      let mut rest = s;
      while let Some(stripped) = rest.strip_prefix("<a>hi</a>") {
        rest = stripped;
      }
      rest.is_empty()
    };
    let result = Synthesizer::new("<a>hi</a>", xml_like)
      .synthesize()
      .expect("synthesis terminates");
    assert_eq!(result.to_string(), "( <a>hi</a> )*");
  }

  #[test]
  fn test_final_grammar_is_oracle_sound() {
    // every bounded unrolling of the final grammar stays inside the language
    let all_as = |s: &str| s.chars().all(|c| c == 'a');
    let result = Synthesizer::new("aaa", all_as)
      .synthesize()
      .expect("synthesis terminates");
    for production in generate::enumerate(result.tree(), result.grammar(), 3) {
      assert!(all_as(&production), "oracle rejects {production:?}");
    }
  }

  #[test]
  fn test_terminal_only_grammar_is_fixed_point() {
    let result = Synthesizer::new("xy", |s: &str| s == "xy")
      .synthesize()
      .expect("synthesis terminates");
    assert_eq!(result.to_string(), "xy");
    // re-running synthesis over an inert seed changes nothing
    let again = Synthesizer::new("xy", |s: &str| s == "xy")
      .synthesize()
      .expect("synthesis terminates");
    assert_eq!(again.to_string(), "xy");
  }
}

use gram_synth_core::Oracle;

/// Accepts candidates that are well-formed XML fragments.
///
/// A fragment need not be single-rooted: text, sibling elements and the empty
/// string are all fragments. Candidates are therefore wrapped in a
/// synthesized root element before parsing, and the oracle answers whether
/// the wrapped document parses.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlOracle;

impl XmlOracle {
  pub fn new() -> Self {
    Self
  }

  fn wrap(candidate: &str) -> String {
    let mut doc = String::with_capacity(candidate.len() + 9);
    doc.push_str("<i> ");
    doc.push_str(candidate);
    doc.push_str("</i>");
    doc
  }
}

impl Oracle for XmlOracle {
  fn accepts(&self, candidate: &str) -> bool {
    roxmltree::Document::parse(&Self::wrap(candidate)).is_ok()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_accepts_elements() {
    let oracle = XmlOracle::new();
    assert!(oracle.accepts("<a>hi</a>"));
    assert!(oracle.accepts("<a><b/></a>"));
  }

  #[test]
  fn test_accepts_fragments_without_single_root() {
    let oracle = XmlOracle::new();
    assert!(oracle.accepts(""));
    assert!(oracle.accepts("hi"));
    assert!(oracle.accepts("<a>hi</a><a>hi</a>"));
  }

  #[test]
  fn test_rejects_malformed_markup() {
    let oracle = XmlOracle::new();
    assert!(!oracle.accepts("<a>hi"));
    assert!(!oracle.accepts("<a>hi</b>"));
    assert!(!oracle.accepts("</a>"));
  }

  #[test]
  fn test_supports_repetition_of_the_seed() {
    // the wrapped root tolerates zero or many children, which is what lets
    // synthesis discover a Kleene star over the seed
    let oracle = XmlOracle::new();
    assert!(oracle.accepts(""));
    assert!(oracle.accepts("<a>hi</a><a>hi</a><a>hi</a>"));
  }
}

//! Produce strings from a synthesized grammar.
//!
//! Synthesis exists so that a decision procedure can be turned back into a
//! generator; this module is the generator half. [`enumerate`] unrolls a
//! grammar exhaustively up to a repetition bound and [`sample`] draws one
//! random production.

use rand::Rng;

use crate::node::{GrammarTree, NodeId, NodeKind};

/// Exhaustively unroll `grammar`, expanding every `Star` with `0..=reps`
/// repetitions. The result is sorted and deduplicated.
///
/// Output size is multiplicative in grammar breadth and `reps`; callers are
/// expected to keep both small.
pub fn enumerate(tree: &GrammarTree, grammar: &[NodeId], reps: usize) -> Vec<String> {
  let mut out = enumerate_sequence(tree, grammar, reps);
  out.sort();
  out.dedup();
  out
}

fn enumerate_sequence(tree: &GrammarTree, grammar: &[NodeId], reps: usize) -> Vec<String> {
  let mut out = vec![String::new()];
  for &node in grammar {
    let expansions = enumerate_node(tree, node, reps);
    let mut next = Vec::with_capacity(out.len() * expansions.len());
    for prefix in &out {
      for expansion in &expansions {
        next.push([prefix.as_str(), expansion.as_str()].concat());
      }
    }
    out = next;
  }
  out
}

fn enumerate_node(tree: &GrammarTree, node: NodeId, reps: usize) -> Vec<String> {
  if let Some(label) = tree.label(node) {
    return vec![label.to_string()];
  }
  let children = tree.children(node).unwrap_or_default();
  match tree.kind(node) {
    NodeKind::Star => {
      let round = enumerate_sequence(tree, children, reps);
      let mut tails = vec![String::new()];
      let mut out = vec![String::new()];
      for _ in 0..reps {
        let mut next = Vec::with_capacity(tails.len() * round.len());
        for tail in &tails {
          for unit in &round {
            next.push([tail.as_str(), unit.as_str()].concat());
          }
        }
        tails = next;
        out.extend(tails.iter().cloned());
      }
      out
    }
    NodeKind::Plus => children
      .iter()
      .flat_map(|&child| enumerate_node(tree, child, reps))
      .collect(),
    _ => vec![String::new()],
  }
}

/// Draw one random production. `Star` repetition counts are uniform in
/// `0..=max_reps`; `Plus` alternatives are uniform over the children.
pub fn sample<R: Rng>(
  tree: &GrammarTree,
  grammar: &[NodeId],
  rng: &mut R,
  max_reps: usize,
) -> String {
  let mut out = String::new();
  for &node in grammar {
    sample_node(tree, node, rng, max_reps, &mut out);
  }
  out
}

fn sample_node<R: Rng>(
  tree: &GrammarTree,
  node: NodeId,
  rng: &mut R,
  max_reps: usize,
  out: &mut String,
) {
  if let Some(label) = tree.label(node) {
    out.push_str(label);
    return;
  }
  let children = tree.children(node).unwrap_or_default();
  match tree.kind(node) {
    NodeKind::Star => {
      let rounds = rng.random_range(0..=max_reps);
      for _ in 0..rounds {
        for &child in children {
          sample_node(tree, child, rng, max_reps, out);
        }
      }
    }
    NodeKind::Plus => {
      if !children.is_empty() {
        let pick = rng.random_range(0..children.len());
        sample_node(tree, children[pick], rng, max_reps, out);
      }
    }
    _ => {}
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_enumerate_terminals() {
    let mut tree = GrammarTree::new();
    let a = tree.terminal("a");
    let b = tree.rep("b");
    assert_eq!(enumerate(&tree, &[a, b], 2), vec!["ab"]);
  }

  #[test]
  fn test_enumerate_star() {
    let mut tree = GrammarTree::new();
    let ab = tree.alt("ab");
    let star = tree.star(vec![ab]);
    assert_eq!(enumerate(&tree, &[star], 2), vec!["", "ab", "abab"]);
  }

  #[test]
  fn test_enumerate_plus() {
    let mut tree = GrammarTree::new();
    let a = tree.rep("a");
    let b = tree.alt("b");
    let plus = tree.plus(vec![a, b]);
    let t = tree.terminal("!");
    assert_eq!(enumerate(&tree, &[plus, t], 1), vec!["a!", "b!"]);
  }

  #[test]
  fn test_enumerate_nested() {
    let mut tree = GrammarTree::new();
    let a = tree.rep("a");
    let b = tree.alt("b");
    let plus = tree.plus(vec![a, b]);
    let star = tree.star(vec![plus]);
    assert_eq!(
      enumerate(&tree, &[star], 2),
      vec!["", "a", "aa", "ab", "b", "ba", "bb"]
    );
  }

  #[test]
  fn test_sample_stays_within_language() {
    let mut tree = GrammarTree::new();
    let ab = tree.alt("ab");
    let star = tree.star(vec![ab]);
    let grammar = vec![star];
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..32 {
      let production = sample(&tree, &grammar, &mut rng, 3);
      let mut rest = production.as_str();
      while let Some(stripped) = rest.strip_prefix("ab") {
        rest = stripped;
      }
      assert!(rest.is_empty(), "unexpected production {production:?}");
    }
  }

  #[test]
  fn test_sample_is_reproducible() {
    let mut tree = GrammarTree::new();
    let a = tree.rep("a");
    let b = tree.alt("b");
    let plus = tree.plus(vec![a, b]);
    let star = tree.star(vec![plus]);
    let grammar = vec![star];
    let one: Vec<String> = {
      let mut rng = StdRng::seed_from_u64(7);
      (0..8).map(|_| sample(&tree, &grammar, &mut rng, 4)).collect()
    };
    let two: Vec<String> = {
      let mut rng = StdRng::seed_from_u64(7);
      (0..8).map(|_| sample(&tree, &grammar, &mut rng, 4)).collect()
    };
    assert_eq!(one, two);
  }
}

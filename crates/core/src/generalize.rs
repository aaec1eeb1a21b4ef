//! Per-node-kind rewrite strategies, driven by the oracle.
//!
//! A single visit dispatches on the node's kind. `Rep` and `Alt` nodes search
//! for a decomposition the oracle admits in the node's textual context;
//! `Star` and `Plus` frames recurse into their children and splice rewrites
//! in place; `Terminal` is inert. At most one rewrite happens per pass: the
//! first committed visit sets the ambient flag and every later visit in the
//! same pass returns an empty sequence immediately.

use crate::context::{self, Context};
use crate::memo::ConsiderationSet;
use crate::node::{Grammar, GrammarTree, NodeId, NodeKind, TargetMissing};
use crate::oracle::Oracle;

/// One pass worth of rewrite state over a bound root grammar.
///
/// The consideration set outlives the visitor; the driver re-creates a
/// visitor per pass around the same set so that a candidate offered on any
/// earlier pass is never offered again.
pub struct GeneralizeVisitor<'a, O> {
  tree: &'a mut GrammarTree,
  root: &'a [NodeId],
  oracle: &'a O,
  memo: &'a mut ConsiderationSet,
  generalized: bool,
}

impl<'a, O: Oracle> GeneralizeVisitor<'a, O> {
  pub fn new(
    tree: &'a mut GrammarTree,
    root: &'a [NodeId],
    oracle: &'a O,
    memo: &'a mut ConsiderationSet,
  ) -> Self {
    Self {
      tree,
      root,
      oracle,
      memo,
      generalized: false,
    }
  }

  /// Whether some visit of this pass committed to a rewrite.
  pub fn generalized(&self) -> bool {
    self.generalized
  }

  /// Visit one node. The returned sequence replaces the node in its
  /// top-level slot; an empty return either means "nothing to do" or that a
  /// structural frame already rewrote one of its own children in place.
  pub fn generalize(&mut self, node: NodeId) -> Result<Grammar, TargetMissing> {
    match self.tree.kind(node) {
      NodeKind::Terminal => Ok(Grammar::new()),
      NodeKind::Rep => self.generalize_rep(node),
      NodeKind::Alt => self.generalize_alt(node),
      NodeKind::Star | NodeKind::Plus => self.generalize_structural(node),
    }
  }

  /// Decompose `Rep(α)` into `Terminal(sub₁) Star([Alt(sub₂)]) Rep(sub₃)`.
  ///
  /// Decompositions are enumerated shortest `sub₁` first, then longest
  /// `sub₂` first. A decomposition is admissible when the oracle accepts the
  /// context with `sub₂` pumped zero times and twice. When no admissible,
  /// unseen decomposition exists the node is frozen as a plain terminal,
  /// which later passes will not revisit.
  fn generalize_rep(&mut self, node: NodeId) -> Result<Grammar, TargetMissing> {
    if self.generalized {
      return Ok(Grammar::new());
    }
    self.generalized = true;
    let ctx = context::extract(self.tree, self.root, node)?;
    let alpha = self.tree.label(node).unwrap_or_default().to_string();
    let bounds = char_bounds(&alpha);
    let len = bounds.len() - 1;
    for lo in 0..len {
      for hi in (lo + 1..=len).rev() {
        let sub1 = &alpha[..bounds[lo]];
        let sub2 = &alpha[bounds[lo]..bounds[hi]];
        let sub3 = &alpha[bounds[hi]..];
        let [zero, double] = rep_residuals(sub1, sub2, sub3);
        if !self.probe(&ctx, &zero) || !self.probe(&ctx, &double) {
          continue;
        }
        let key = rep_rewrite_key(sub1, sub2, sub3);
        if self.memo.contains(&key) {
          continue;
        }
        self.memo.insert(key);
        let mut rewrite = Grammar::new();
        if !sub1.is_empty() {
          rewrite.push(self.tree.terminal(sub1));
        }
        let alt = self.tree.alt(sub2);
        rewrite.push(self.tree.star(vec![alt]));
        if !sub3.is_empty() {
          rewrite.push(self.tree.rep(sub3));
        }
        return Ok(rewrite);
      }
    }
    // last resort: strip the Rep tag and freeze the string as inert
    Ok(vec![self.tree.terminal(alpha)])
  }

  /// Split `Alt(α)` into `Plus([Rep(sub₁), Alt(sub₂)])`.
  ///
  /// Binary splits are enumerated shortest `sub₁` first; a split is
  /// admissible when the oracle accepts each half alone in context. The last
  /// resort retags the node to `Rep`, handing it to the other rewrite
  /// family.
  fn generalize_alt(&mut self, node: NodeId) -> Result<Grammar, TargetMissing> {
    if self.generalized {
      return Ok(Grammar::new());
    }
    self.generalized = true;
    let ctx = context::extract(self.tree, self.root, node)?;
    let alpha = self.tree.label(node).unwrap_or_default().to_string();
    let bounds = char_bounds(&alpha);
    let len = bounds.len() - 1;
    for mid in 1..len {
      let (sub1, sub2) = alpha.split_at(bounds[mid]);
      if !self.probe(&ctx, sub1) || !self.probe(&ctx, sub2) {
        continue;
      }
      let key = alt_rewrite_key(sub1, sub2);
      if self.memo.contains(&key) {
        continue;
      }
      self.memo.insert(key);
      let rep = self.tree.rep(sub1);
      let alt = self.tree.alt(sub2);
      return Ok(vec![self.tree.plus(vec![rep, alt])]);
    }
    Ok(vec![self.tree.rep(alpha)])
  }

  /// Sweep a `Star`/`Plus` frame's children right to left and splice the
  /// first rewrite in place. The frame itself is opaque: it is never
  /// replaced, so the returned sequence is empty even when a child changed.
  fn generalize_structural(&mut self, node: NodeId) -> Result<Grammar, TargetMissing> {
    if self.generalized {
      return Ok(Grammar::new());
    }
    let children: Grammar = self
      .tree
      .children(node)
      .map(<[NodeId]>::to_vec)
      .unwrap_or_default();
    for &child in children.iter().rev() {
      let rewrite = self.generalize(child)?;
      if self.generalized {
        if !rewrite.is_empty() {
          self.tree.replace_child(node, child, &rewrite)?;
        }
        break;
      }
    }
    Ok(Grammar::new())
  }

  fn probe(&self, ctx: &Context, residual: &str) -> bool {
    let mut candidate =
      String::with_capacity(ctx.left.len() + residual.len() + ctx.right.len());
    candidate.push_str(&ctx.left);
    candidate.push_str(residual);
    candidate.push_str(&ctx.right);
    self.oracle.accepts(&candidate)
  }
}

/// Byte offsets of every char boundary in `s`, including `s.len()`.
/// Decomposition indices range over these so multi-byte text never splits
/// mid-codepoint.
fn char_bounds(s: &str) -> Vec<usize> {
  s.char_indices()
    .map(|(i, _)| i)
    .chain(std::iter::once(s.len()))
    .collect()
}

/// Residuals witnessing the star-language inclusion at multiplicities 0 and
/// 2. Each is a fresh string; the parts are never appended onto a shared
/// prefix.
fn rep_residuals(sub1: &str, sub2: &str, sub3: &str) -> [String; 2] {
  [[sub1, sub3].concat(), [sub1, sub2, sub2, sub3].concat()]
}

/// Canonical form of the Rep rewrite, as [`crate::printer`] would print it,
/// with the empty edge nodes suppressed.
fn rep_rewrite_key(sub1: &str, sub2: &str, sub3: &str) -> String {
  let mut key = String::from(sub1);
  key.push_str("( [ ");
  key.push_str(sub2);
  key.push_str(" ]alt )*");
  if !sub3.is_empty() {
    key.push_str("[ ");
    key.push_str(sub3);
    key.push_str(" ]rep");
  }
  key
}

/// Canonical form of the Alt rewrite.
fn alt_rewrite_key(sub1: &str, sub2: &str) -> String {
  format!("( [ {sub1} ]rep + [ {sub2} ]alt )")
}

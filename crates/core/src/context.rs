use crate::node::{GrammarTree, NodeId, TargetMissing};

/// Textual environment surrounding a target node within a grammar: the
/// concatenated terminal labels to its left and to its right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
  pub left: String,
  pub right: String,
}

/// Materialize the context of `target` by in-order traversal of `grammar`.
///
/// Structural frames contribute no text of their own; only their leaves do.
/// Reaching the target switches the active side from left to right without
/// contributing the target's own label, so
/// `left + label(target) + right` equals the in-order label concatenation of
/// the whole grammar.
///
/// The target is looked up by handle identity. A target absent from the
/// grammar is an invariant violation and surfaces as [`TargetMissing`].
pub fn extract(
  tree: &GrammarTree,
  grammar: &[NodeId],
  target: NodeId,
) -> Result<Context, TargetMissing> {
  let mut ctx = Context::default();
  let mut after_target = false;
  for &node in grammar {
    walk(tree, node, target, &mut ctx, &mut after_target);
  }
  if !after_target {
    return Err(TargetMissing);
  }
  Ok(ctx)
}

fn walk(tree: &GrammarTree, node: NodeId, target: NodeId, ctx: &mut Context, after: &mut bool) {
  if node == target {
    *after = true;
    return;
  }
  if let Some(label) = tree.label(node) {
    let side = if *after { &mut ctx.right } else { &mut ctx.left };
    side.push_str(label);
    return;
  }
  if let Some(children) = tree.children(node) {
    for &child in children {
      walk(tree, child, target, ctx, after);
    }
  }
}

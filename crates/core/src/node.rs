use thiserror::Error;

/// Stable handle to a node inside a [`GrammarTree`].
///
/// Handles compare by identity, not by shape: two `Rep("a")` nodes allocated
/// separately are distinct nodes. A handle stays valid across splices of
/// neighboring slots, so a rewrite never invalidates the rest of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// A grammar is an ordered sequence of nodes.
/// Its language is the concatenation of the node languages, left to right.
pub type Grammar = Vec<NodeId>;

/// The closed set of node kinds.
///
/// `Terminal`, `Rep` and `Alt` all produce exactly their literal string;
/// the kind is a role tag consumed by the rewriter. `Star` is Kleene closure
/// over its child sequence, `Plus` is disjunction over its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  Terminal,
  Rep,
  Alt,
  Star,
  Plus,
}

impl NodeKind {
  pub fn is_terminal_bearing(&self) -> bool {
    matches!(self, NodeKind::Terminal | NodeKind::Rep | NodeKind::Alt)
  }

  pub fn is_structural(&self) -> bool {
    matches!(self, NodeKind::Star | NodeKind::Plus)
  }
}

#[derive(Debug, Clone)]
enum NodeData {
  Terminal(String),
  Rep(String),
  Alt(String),
  Star(Grammar),
  Plus(Grammar),
}

/// The node slated for replacement is not present in the sequence it was
/// looked up in. Raised by identity-keyed splices and context extraction;
/// a structural invariant violation, not a recoverable condition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("replacement target is missing from the grammar sequence")]
pub struct TargetMissing;

/// Arena owning every node of a synthesis run.
///
/// Nodes are addressed by [`NodeId`] and never move. A node spliced out of
/// its sequence is only unreferenced; its slot stays allocated so that no
/// surviving handle is ever dangling.
#[derive(Debug, Clone, Default)]
pub struct GrammarTree {
  nodes: Vec<NodeData>,
}

impl GrammarTree {
  pub fn new() -> Self {
    Self::default()
  }

  fn alloc(&mut self, data: NodeData) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    self.nodes.push(data);
    id
  }

  fn data(&self, id: NodeId) -> &NodeData {
    &self.nodes[id.0 as usize]
  }

  pub fn terminal(&mut self, text: impl Into<String>) -> NodeId {
    self.alloc(NodeData::Terminal(text.into()))
  }

  pub fn rep(&mut self, text: impl Into<String>) -> NodeId {
    self.alloc(NodeData::Rep(text.into()))
  }

  pub fn alt(&mut self, text: impl Into<String>) -> NodeId {
    self.alloc(NodeData::Alt(text.into()))
  }

  pub fn star(&mut self, children: Grammar) -> NodeId {
    debug_assert!(!children.is_empty(), "Star must have at least one child");
    self.alloc(NodeData::Star(children))
  }

  pub fn plus(&mut self, children: Grammar) -> NodeId {
    debug_assert!(children.len() >= 2, "Plus must have at least two children");
    self.alloc(NodeData::Plus(children))
  }

  pub fn kind(&self, id: NodeId) -> NodeKind {
    match self.data(id) {
      NodeData::Terminal(_) => NodeKind::Terminal,
      NodeData::Rep(_) => NodeKind::Rep,
      NodeData::Alt(_) => NodeKind::Alt,
      NodeData::Star(_) => NodeKind::Star,
      NodeData::Plus(_) => NodeKind::Plus,
    }
  }

  /// Literal payload of a terminal-bearing node.
  pub fn label(&self, id: NodeId) -> Option<&str> {
    match self.data(id) {
      NodeData::Terminal(s) | NodeData::Rep(s) | NodeData::Alt(s) => Some(s),
      _ => None,
    }
  }

  /// Child sequence of a structural node.
  pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
    match self.data(id) {
      NodeData::Star(c) | NodeData::Plus(c) => Some(c),
      _ => None,
    }
  }

  /// Replace `target` inside `parent`'s child sequence by identity, splicing
  /// `replacement` into its position. This is the in-place channel: a
  /// structural node owns its children and rewrites them itself.
  pub fn replace_child(
    &mut self,
    parent: NodeId,
    target: NodeId,
    replacement: &[NodeId],
  ) -> Result<(), TargetMissing> {
    let children = match &mut self.nodes[parent.0 as usize] {
      NodeData::Star(c) | NodeData::Plus(c) => c,
      _ => return Err(TargetMissing),
    };
    splice_by_identity(children, target, replacement)
  }
}

/// Splice `replacement` into the slot of `sequence` holding `target`.
/// The lookup is by handle identity; value-equal nodes elsewhere in the
/// sequence are not candidates.
pub fn splice_by_identity(
  sequence: &mut Grammar,
  target: NodeId,
  replacement: &[NodeId],
) -> Result<(), TargetMissing> {
  let slot = sequence
    .iter()
    .position(|&node| node == target)
    .ok_or(TargetMissing)?;
  sequence.splice(slot..=slot, replacement.iter().copied());
  Ok(())
}

//! Output shapes for a synthesized grammar.
//!
//! The default output is the canonical print form from the core crate; this
//! module adds the JSON tree for downstream tooling.

use anyhow::Result;
use serde::Serialize;

use gram_synth_core::{GrammarTree, NodeId, NodeKind};

/// Serializable view of a grammar node. Handles are resolved away; what
/// remains is shape and labels, the same information the canonical print
/// form carries.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonNode {
  Terminal { text: String },
  Rep { text: String },
  Alt { text: String },
  Star { children: Vec<JsonNode> },
  Plus { children: Vec<JsonNode> },
}

fn json_node(tree: &GrammarTree, node: NodeId) -> JsonNode {
  let text = || tree.label(node).unwrap_or_default().to_string();
  let children = || {
    tree
      .children(node)
      .unwrap_or_default()
      .iter()
      .map(|&child| json_node(tree, child))
      .collect()
  };
  match tree.kind(node) {
    NodeKind::Terminal => JsonNode::Terminal { text: text() },
    NodeKind::Rep => JsonNode::Rep { text: text() },
    NodeKind::Alt => JsonNode::Alt { text: text() },
    NodeKind::Star => JsonNode::Star {
      children: children(),
    },
    NodeKind::Plus => JsonNode::Plus {
      children: children(),
    },
  }
}

pub fn grammar_to_json(tree: &GrammarTree, grammar: &[NodeId]) -> Result<String> {
  let nodes: Vec<JsonNode> = grammar.iter().map(|&node| json_node(tree, node)).collect();
  Ok(serde_json::to_string_pretty(&nodes)?)
}

//! Text renderings of derivation trees and grammars.
//!
//! Treeviz prints one node per line and encodes nesting with box-drawing
//! connectors:
//!
//! ```text
//! S
//! ├─ a
//! └─ A
//!    └─ &
//! ```

use grammar::Grammar;
use validator::DerivationTree;

pub fn treeviz(tree: &DerivationTree) -> String {
    let mut result = String::new();
    // One entry per ancestor below the root: whether it has siblings still
    // to come, which keeps its vertical line open.
    let mut open: Vec<bool> = Vec::new();
    for (depth, node) in tree.iter() {
        if depth == 0 {
            result.push_str(&format!("{}\n", node.symbol));
            continue;
        }
        open.truncate(depth - 1);
        for &more in &open {
            result.push_str(if more { "│  " } else { "   " });
        }
        let more = node.next_sibling.is_some();
        let connector = if more { "├─" } else { "└─" };
        result.push_str(&format!("{} {}\n", connector, node.symbol));
        open.push(more);
    }
    result
}

/// Single line form, e.g. `S(a A(&))`. Leaves are written bare.
pub fn bracketed(tree: &DerivationTree) -> String {
    let mut result = String::new();
    let mut open = 0;
    for (depth, node) in tree.iter() {
        while open > depth {
            result.push(')');
            open -= 1;
        }
        if depth > 0 && !result.ends_with('(') {
            result.push(' ');
        }
        result.push(node.symbol.0);
        if !node.is_leaf() {
            result.push('(');
            open += 1;
        }
    }
    for _ in 0..open {
        result.push(')');
    }
    result
}

/// One `X -> a | bY` line per non-terminal that has a rule.
pub fn productions(grammar: &Grammar) -> String {
    grammar
        .rules()
        .iter()
        .map(|rule| format!("{}\n", rule))
        .collect()
}

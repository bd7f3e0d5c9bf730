//! Membership validation for right-linear grammars.
//!
//! ```
//! use validator::{Grammar, Validator};
//!
//! let grammar: Grammar = "G = ({S, A}, {a}, {S -> aA\nA -> &}, S)".parse().unwrap();
//! let tree = Validator::new(&grammar).validate("a").unwrap();
//! assert_eq!(tree.word(), "a");
//! ```

mod error;
mod first;
mod position;
mod state;
mod tree;
mod validate;

pub use error::Diagnostic;
pub use first::FirstSets;
pub use grammar::{Grammar, Production, Symbol};
pub use tree::{Children, DerivationTree, DfsParseTreeIterator, Node};
pub use validate::{Outcome, Validator};

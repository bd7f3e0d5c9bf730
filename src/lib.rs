//! Regular grammar membership checking.
//!
//! Grammars are loaded from their textual description with
//! [`parse_source`], words are checked with [`Validator`], and accepted
//! derivations are displayed through [`render`].

pub mod render;

pub use grammar::{parse_source, Grammar, Production, Rule, Source, Symbol};
pub use validator::{DerivationTree, Diagnostic, FirstSets, Node, Outcome, Validator};

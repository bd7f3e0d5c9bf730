//! Backtracking membership test for right-linear grammars.
//!
//! A non-terminal can only appear last in a production, so a derivation is a
//! single chain of expansions. The chain is kept on an explicit stack of
//! frames instead of the call stack, which keeps long words from exhausting
//! it.

use grammar::{Grammar, Production, Symbol};

use crate::error::Diagnostic;
use crate::first::FirstSets;
use crate::state::{Failure, State};
use crate::tree::{DerivationTree, Node};

/// Result of validating a word: the derivation on acceptance, otherwise the
/// most specific diagnostic.
pub type Outcome = Result<DerivationTree, Diagnostic>;

/// Decides membership of words in the language of a grammar.
///
/// The validator holds no per-word state; every call to
/// [`validate`](Validator::validate) starts fresh.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'g> {
    grammar: &'g Grammar,
    first: FirstSets<'g>,
}

/// A non-terminal being expanded.
#[derive(Debug)]
struct Frame {
    symbol: Symbol,
    /// Index of the alternative currently tried.
    alternative: usize,
    /// Cursor position the expansion started at.
    start: usize,
}

enum Expansion {
    /// The symbol derived the rest of the word without needing a frame.
    Derived(Node),
    Failed,
    /// A frame was pushed for the symbol.
    Opened,
}

enum Prefix {
    /// Every terminal matched and the word is consumed.
    Complete,
    /// Every terminal matched; the trailing non-terminal still has to derive
    /// the rest.
    Descend(Symbol),
    Failed,
}

impl<'g> Validator<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Validator {
            grammar,
            first: FirstSets::new(grammar),
        }
    }

    /// Validate `word` against the grammar, starting from its start symbol.
    ///
    /// Epsilon markers in `word` are ignored. Alternatives are tried in
    /// declaration order and the first one that derives the whole word wins.
    pub fn validate(&self, word: &str) -> Outcome {
        let input = self.normalize(word)?;
        let mut state = State::new(&input);
        match self.derive(self.grammar.start(), &mut state)? {
            Some(tree) => Ok(tree),
            None => Err(state.into_diagnostic()),
        }
    }

    /// Strip epsilon markers and check every symbol against the terminal
    /// alphabet.
    fn normalize(&self, word: &str) -> Result<Vec<Symbol>, Diagnostic> {
        word.chars()
            .map(Symbol)
            .filter(|sym| !sym.is_epsilon())
            .enumerate()
            .map(|(position, symbol)| {
                if self.grammar.is_terminal(symbol) {
                    Ok(symbol)
                } else {
                    Err(Diagnostic::LexicalError { symbol, position })
                }
            })
            .collect()
    }

    /// Derive the rest of the word from `start`. `Ok(None)` means no
    /// derivation exists; `Err` aborts the whole validation.
    fn derive(&self, start: Symbol, state: &mut State) -> Result<Option<Node>, Diagnostic> {
        let mut frames = Vec::new();
        match self.expand(start, state, &mut frames)? {
            Expansion::Derived(node) => return Ok(Some(node)),
            Expansion::Failed => return Ok(None),
            Expansion::Opened => {}
        }

        while let Some(frame) = frames.last_mut() {
            let production = match self.grammar.alternatives(frame.symbol).get(frame.alternative) {
                Some(production) => production,
                None => {
                    // Exhausted, so the parent's alternative fails with it.
                    frames.pop();
                    state.leave();
                    if let Some(parent) = frames.last_mut() {
                        parent.alternative += 1;
                    }
                    continue;
                }
            };

            state.cursor.rewind(frame.start);
            match self.match_prefix(production, state) {
                Prefix::Complete => return Ok(self.build(frames, None)),
                Prefix::Failed => frame.alternative += 1,
                Prefix::Descend(next) => match self.expand(next, state, &mut frames)? {
                    Expansion::Derived(tail) => return Ok(self.build(frames, Some(tail))),
                    Expansion::Failed => {
                        if let Some(frame) = frames.last_mut() {
                            frame.alternative += 1;
                        }
                    }
                    Expansion::Opened => {}
                },
            }
        }

        Ok(None)
    }

    /// Start expanding non-terminal `sym` at the cursor.
    fn expand(
        &self,
        sym: Symbol,
        state: &mut State,
        frames: &mut Vec<Frame>,
    ) -> Result<Expansion, Diagnostic> {
        if state.cursor.is_at_end() {
            return Ok(match self.match_end(sym, state) {
                Some(node) => Expansion::Derived(node),
                None => Expansion::Failed,
            });
        }

        if self.grammar.alternatives(sym).is_empty() {
            state.record(Failure::Trailing {
                position: state.cursor.idx,
            });
            return Ok(Expansion::Failed);
        }

        state.enter(sym)?;
        frames.push(Frame {
            symbol: sym,
            alternative: 0,
            start: state.cursor.checkpoint(),
        });
        Ok(Expansion::Opened)
    }

    /// The word is exhausted: `sym` matches only through an empty
    /// derivation, which is materialized as its chain of unit expansions.
    fn match_end(&self, sym: Symbol, state: &mut State) -> Option<Node> {
        match self.first.first_direct_path(sym, Symbol::EPSILON) {
            Some(path) => Some(Node::epsilon_chain(&path)),
            None => {
                state.record(Failure::Incomplete {
                    position: state.cursor.idx,
                });
                None
            }
        }
    }

    /// Match the terminals of `production` in order. Without a trailing
    /// non-terminal the production has to consume the rest of the word.
    fn match_prefix(&self, production: &Production, state: &mut State) -> Prefix {
        for &sym in production.symbols() {
            if self.grammar.is_non_terminal(sym) {
                return Prefix::Descend(sym);
            } else if !sym.is_epsilon() && !state.cursor.match_symbol(sym) {
                state.record(Failure::Expected {
                    expected: sym,
                    found: state.cursor.peek(),
                    position: state.cursor.idx,
                });
                return Prefix::Failed;
            }
        }

        if !state.cursor.is_at_end() {
            state.record(Failure::Trailing {
                position: state.cursor.idx,
            });
            return Prefix::Failed;
        }
        Prefix::Complete
    }

    /// Assemble the derivation from the accepted chain of expansions,
    /// innermost first. `tail` is the empty derivation closing the chain, if
    /// any.
    fn build(&self, frames: Vec<Frame>, mut tail: Option<Node>) -> Option<Node> {
        for frame in frames.into_iter().rev() {
            let production = &self.grammar.alternatives(frame.symbol)[frame.alternative];
            let children: Vec<Node> = production
                .symbols()
                .iter()
                .filter_map(|&sym| {
                    if self.grammar.is_non_terminal(sym) {
                        tail.take()
                    } else {
                        Some(Node::leaf(sym))
                    }
                })
                .collect();
            tail = Some(Node::with_children(frame.symbol, children));
        }
        tail
    }
}

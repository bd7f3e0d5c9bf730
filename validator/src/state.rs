use std::collections::HashSet;

use grammar::Symbol;

use crate::error::Diagnostic;
use crate::position::Position;

/// A failed attempt, kept only if it got farther than every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Expected {
        expected: Symbol,
        found: Option<Symbol>,
        position: usize,
    },
    Incomplete {
        position: usize,
    },
    Trailing {
        position: usize,
    },
}

impl Failure {
    pub fn position(&self) -> usize {
        match *self {
            Failure::Expected { position, .. }
            | Failure::Incomplete { position }
            | Failure::Trailing { position } => position,
        }
    }

    /// A mismatched terminal says more than running out of input or having
    /// input left over, so it outranks them at the same position.
    fn rank(&self) -> (usize, u8) {
        let kind = match self {
            Failure::Expected { .. } => 1,
            Failure::Incomplete { .. } | Failure::Trailing { .. } => 0,
        };
        (self.position(), kind)
    }
}

impl From<Failure> for Diagnostic {
    fn from(failure: Failure) -> Diagnostic {
        match failure {
            Failure::Expected {
                expected,
                found,
                position,
            } => Diagnostic::UnexpectedSymbol {
                expected,
                found,
                position,
            },
            Failure::Incomplete { position } => Diagnostic::IncompleteWord { position },
            Failure::Trailing { position } => Diagnostic::TrailingInput { position },
        }
    }
}

/// Validation state for a single word.
#[derive(Debug)]
pub struct State<'a> {
    /// Shared by the whole descent, rewound on backtrack.
    pub cursor: Position<'a>,
    farthest: Option<Failure>,
    /// Non-terminals currently being expanded and where each started.
    active: Vec<(Symbol, usize)>,
    active_set: HashSet<(Symbol, usize)>,
}

impl<'a> State<'a> {
    pub fn new(input: &'a [Symbol]) -> Self {
        State {
            cursor: Position::new(input),
            farthest: None,
            active: Vec::new(),
            active_set: HashSet::new(),
        }
    }

    /// Remember `failure` if it outranks the current one: farther wins, then
    /// an expected terminal wins over the other kinds. Otherwise the first
    /// failure recorded stays.
    pub fn record(&mut self, failure: Failure) {
        match self.farthest {
            Some(current) if current.rank() >= failure.rank() => {}
            _ => self.farthest = Some(failure),
        }
    }

    /// Mark `sym` as being expanded at the cursor. Expanding it again before
    /// the cursor moves can never terminate.
    pub fn enter(&mut self, sym: Symbol) -> Result<(), Diagnostic> {
        let at = self.cursor.idx;
        if !self.active_set.insert((sym, at)) {
            return Err(Diagnostic::NonProductiveGrammar { symbol: sym });
        }
        self.active.push((sym, at));
        Ok(())
    }

    pub fn leave(&mut self) {
        if let Some(entry) = self.active.pop() {
            self.active_set.remove(&entry);
        }
    }

    /// The most specific failure observed.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.farthest
            .unwrap_or(Failure::Trailing { position: 0 })
            .into()
    }
}

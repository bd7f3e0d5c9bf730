use std::error;
use std::fmt::{self, Display};

use grammar::Symbol;

/// Why a word was rejected. Positions index the word after epsilon markers
/// have been stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The word contains a symbol outside the terminal alphabet.
    LexicalError { symbol: Symbol, position: usize },
    /// The word ended where no empty continuation exists.
    IncompleteWord { position: usize },
    /// The farthest mismatch seen across every attempted alternative.
    UnexpectedSymbol {
        expected: Symbol,
        found: Option<Symbol>,
        position: usize,
    },
    /// Input from `position` on could not be derived by any alternative.
    TrailingInput { position: usize },
    /// A non-terminal was re-entered without consuming anything.
    NonProductiveGrammar { symbol: Symbol },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::LexicalError { symbol, position } => write!(
                f,
                "lexical error: '{}' at position {} is not a terminal",
                symbol, position
            ),
            Diagnostic::IncompleteWord { position } => {
                write!(f, "incomplete word: input ends at position {}", position)
            }
            Diagnostic::UnexpectedSymbol {
                expected,
                found: Some(found),
                position,
            } => write!(
                f,
                "unexpected symbol at position {}: expected '{}', found '{}'",
                position, expected, found
            ),
            Diagnostic::UnexpectedSymbol {
                expected,
                found: None,
                position,
            } => write!(
                f,
                "unexpected end at position {}: expected '{}'",
                position, expected
            ),
            Diagnostic::TrailingInput { position } => {
                write!(f, "input at position {} cannot be derived", position)
            }
            Diagnostic::NonProductiveGrammar { symbol } => write!(
                f,
                "non-productive grammar: '{}' expands to itself without consuming input",
                symbol
            ),
        }
    }
}

impl error::Error for Diagnostic {}

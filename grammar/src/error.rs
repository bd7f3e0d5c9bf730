use std::error;
use std::fmt::{self, Display};

use crate::{Production, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The grammar text is structurally malformed.
    ParseError { line: usize, near: String },
    /// A symbol is declared both as terminal and non-terminal.
    Overlapping(Symbol),
    /// A symbol is declared twice in the same set.
    Duplicate(Symbol),
    /// A production body references a symbol that was never declared.
    Undeclared(Symbol),
    /// A rule is written for a symbol that is not a non-terminal.
    UnknownLhs(Symbol),
    StartNotNonTerminal(Symbol),
    /// Epsilon used alongside other symbols in one production.
    MisplacedEpsilon { lhs: Symbol, production: Production },
    /// A non-terminal appears before the last position of a production.
    NotRightLinear { lhs: Symbol, production: Production },
    EmptyProduction(Symbol),
    EpsilonNonTerminal,
}

impl Error {
    /// Builds a `ParseError` locating `err` inside `source`.
    pub(crate) fn syntax(source: &str, err: nom::Err<nom::error::Error<&str>>) -> Error {
        let remaining = match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
            nom::Err::Incomplete(_) => "",
        };
        let consumed = source.len() - remaining.len();
        let line = source[..consumed].matches('\n').count() + 1;
        let near = remaining
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(16)
            .collect();
        Error::ParseError { line, near }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError { line, ref near } if near.is_empty() => {
                write!(f, "failed to parse grammar at line {}: unexpected end", line)
            }
            Error::ParseError { line, ref near } => {
                write!(f, "failed to parse grammar at line {}, near '{}'", line, near)
            }
            Error::Overlapping(s) => {
                write!(f, "symbol '{}' is both a terminal and a non-terminal", s)
            }
            Error::Duplicate(s) => write!(f, "symbol '{}' is declared more than once", s),
            Error::Undeclared(s) => write!(f, "symbol '{}' is not declared", s),
            Error::UnknownLhs(s) => {
                write!(f, "rule written for '{}', which is not a non-terminal", s)
            }
            Error::StartNotNonTerminal(s) => {
                write!(f, "start symbol '{}' is not a non-terminal", s)
            }
            Error::MisplacedEpsilon {
                lhs,
                ref production,
            } => write!(
                f,
                "epsilon must be the only symbol of a production: {} -> {}",
                lhs, production
            ),
            Error::NotRightLinear {
                lhs,
                ref production,
            } => write!(
                f,
                "production is not right-linear, a non-terminal may only come last: {} -> {}",
                lhs, production
            ),
            Error::EmptyProduction(s) => write!(f, "empty production for '{}'", s),
            Error::EpsilonNonTerminal => {
                write!(f, "epsilon '{}' cannot be a non-terminal", Symbol::EPSILON)
            }
        }
    }
}

impl error::Error for Error {}

use std::fmt::{self, Display};
use std::str::FromStr;

mod error;
pub use error::Error;
mod parser;

/// A single grammar symbol. Terminals, non-terminals and epsilon are all one
/// character wide.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Symbol(pub char);

impl Symbol {
    /// The empty derivation marker. Never matches an input position.
    pub const EPSILON: Symbol = Symbol('&');

    pub fn is_epsilon(self) -> bool {
        self == Symbol::EPSILON
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c)
    }
}

/// One alternative expansion of a non-terminal.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Production(pub Vec<Symbol>);

impl Production {
    pub fn epsilon() -> Self {
        Self(vec![Symbol::EPSILON])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Whether this is exactly `[epsilon]`.
    pub fn is_epsilon(&self) -> bool {
        self.0 == [Symbol::EPSILON]
    }

    /// The leftmost symbol of the body.
    pub fn first(&self) -> Option<Symbol> {
        self.0.first().copied()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for sym in &self.0 {
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

impl From<&str> for Production {
    fn from(s: &str) -> Self {
        Self(s.chars().map(Symbol).collect())
    }
}

/// Every alternative of one non-terminal, in declaration order. The order is
/// the match precedence used during validation.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Rule {
    pub lhs: Symbol,
    pub alternatives: Vec<Production>,
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            write!(f, " {}", alt)?;
        }
        Ok(())
    }
}

/// A right-linear grammar.
///
/// Only constructible through [`Grammar::new`] (or by parsing), so a value of
/// this type always satisfies the grammar invariants: disjoint alphabets,
/// declared symbols only, epsilon alone in its production, and at most one
/// non-terminal per production in the last position.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grammar {
    non_terminals: Vec<Symbol>,
    terminals: Vec<Symbol>,
    rules: Vec<Rule>,
    start: Symbol,
}

impl Grammar {
    /// Check the declarations and assemble a grammar. Productions sharing a
    /// left-hand side are merged in order of appearance.
    pub fn new(
        non_terminals: Vec<Symbol>,
        terminals: Vec<Symbol>,
        productions: Vec<(Symbol, Production)>,
        start: Symbol,
    ) -> Result<Self, Error> {
        let mut nts: Vec<Symbol> = Vec::with_capacity(non_terminals.len());
        for sym in non_terminals {
            if sym.is_epsilon() {
                return Err(Error::EpsilonNonTerminal);
            }
            if nts.contains(&sym) {
                return Err(Error::Duplicate(sym));
            }
            nts.push(sym);
        }

        let mut ts: Vec<Symbol> = Vec::with_capacity(terminals.len());
        for sym in terminals {
            // Epsilon is always available, declaring it is tolerated.
            if sym.is_epsilon() {
                continue;
            }
            if nts.contains(&sym) {
                return Err(Error::Overlapping(sym));
            }
            if ts.contains(&sym) {
                return Err(Error::Duplicate(sym));
            }
            ts.push(sym);
        }

        let mut rules: Vec<Rule> = Vec::new();
        for (lhs, production) in productions {
            if !nts.contains(&lhs) {
                return Err(Error::UnknownLhs(lhs));
            }
            check_production(lhs, &production, &nts, &ts)?;
            match rules.iter_mut().find(|r| r.lhs == lhs) {
                Some(rule) => rule.alternatives.push(production),
                None => rules.push(Rule {
                    lhs,
                    alternatives: vec![production],
                }),
            }
        }

        if !nts.contains(&start) {
            return Err(Error::StartNotNonTerminal(start));
        }

        Ok(Grammar {
            non_terminals: nts,
            terminals: ts,
            rules,
            start,
        })
    }

    pub fn non_terminals(&self) -> &[Symbol] {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals.contains(&sym)
    }

    pub fn is_non_terminal(&self, sym: Symbol) -> bool {
        self.non_terminals.contains(&sym)
    }

    /// Alternatives of `sym` in precedence order. Empty for terminals and for
    /// non-terminals that have no rule.
    pub fn alternatives(&self, sym: Symbol) -> &[Production] {
        self.rules
            .iter()
            .find(|r| r.lhs == sym)
            .map(|r| r.alternatives.as_slice())
            .unwrap_or(&[])
    }
}

fn check_production(
    lhs: Symbol,
    production: &Production,
    non_terminals: &[Symbol],
    terminals: &[Symbol],
) -> Result<(), Error> {
    let body = production.symbols();
    if body.is_empty() {
        return Err(Error::EmptyProduction(lhs));
    }
    if production.is_epsilon() {
        return Ok(());
    }

    let last = body.len() - 1;
    for (i, &sym) in body.iter().enumerate() {
        if sym.is_epsilon() {
            return Err(Error::MisplacedEpsilon {
                lhs,
                production: production.clone(),
            });
        }
        if non_terminals.contains(&sym) {
            if i != last {
                return Err(Error::NotRightLinear {
                    lhs,
                    production: production.clone(),
                });
            }
        } else if !terminals.contains(&sym) {
            return Err(Error::Undeclared(sym));
        }
    }
    Ok(())
}

fn write_set(f: &mut fmt::Formatter, set: &[Symbol]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, sym) in set.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", sym)?;
    }
    write!(f, "}}")
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "G = (")?;
        write_set(f, &self.non_terminals)?;
        write!(f, ", ")?;
        write_set(f, &self.terminals)?;
        writeln!(f, ", {{")?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        write!(f, "}}, {})", self.start)
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = parse_source(s)?;
        match source.word {
            Some(word) => Err(Error::ParseError {
                line: s.trim_end().lines().count(),
                near: word,
            }),
            None => Ok(source.grammar),
        }
    }
}

/// A grammar file: the grammar and, optionally, a word to validate written
/// on the lines after it.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Source {
    pub grammar: Grammar,
    pub word: Option<String>,
}

/// Parse a grammar description, e.g.
///
/// ```text
/// G = ({S, A}, {a, b}, {S -> aA | b
/// A -> &}, S)
/// aab
/// ```
///
/// Spaces, tabs and carriage returns are insignificant and removed up front.
pub fn parse_source(s: &str) -> Result<Source, Error> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r'))
        .collect();

    // Lines are counted from `cleaned`, which keeps every newline of `s`.
    let (_, (parts, word)) = parser::source(cleaned.trim_start_matches('\n'))
        .map_err(|e| Error::syntax(&cleaned, e))?;
    let word = word.map(str::to_owned);

    let productions = parts
        .rules
        .into_iter()
        .flat_map(|(lhs, alts)| alts.into_iter().map(move |p| (lhs, p)))
        .collect();
    let grammar = Grammar::new(
        parts.non_terminals,
        parts.terminals,
        productions,
        parts.start,
    )?;

    Ok(Source { grammar, word })
}

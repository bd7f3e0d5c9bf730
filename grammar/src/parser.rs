use nom::{
    bytes::complete::tag,
    character::complete::{char, none_of},
    combinator::{all_consuming, map, opt, rest},
    multi::{many0_count, many1, many1_count, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    IResult,
};

use crate::{Production, Symbol};

/// Characters with structural meaning in the grammar text.
const RESERVED: &str = "{}(),|\n";

/// Raw pieces of a grammar, before any invariant is checked.
#[derive(PartialEq, Eq, Debug)]
pub struct Parts {
    pub non_terminals: Vec<Symbol>,
    pub terminals: Vec<Symbol>,
    pub rules: Vec<(Symbol, Vec<Production>)>,
    pub start: Symbol,
}

pub fn symbol(input: &str) -> IResult<&str, Symbol> {
    map(none_of(RESERVED), Symbol)(input)
}

pub fn symbol_set(input: &str) -> IResult<&str, Vec<Symbol>> {
    delimited(char('{'), separated_list0(char(','), symbol), char('}'))(input)
}

pub fn alternatives(input: &str) -> IResult<&str, Vec<Production>> {
    separated_list1(char('|'), map(many1(symbol), Production))(input)
}

pub fn rule(input: &str) -> IResult<&str, (Symbol, Vec<Production>)> {
    separated_pair(symbol, tag("->"), alternatives)(input)
}

/// The production block: one rule per line, blank lines allowed around and
/// between rules.
pub fn rule_block(input: &str) -> IResult<&str, Vec<(Symbol, Vec<Production>)>> {
    delimited(
        pair(char('{'), many0_count(char('\n'))),
        separated_list0(many1_count(char('\n')), rule),
        pair(many0_count(char('\n')), char('}')),
    )(input)
}

pub fn grammar(input: &str) -> IResult<&str, Parts> {
    let (rem, (non_terminals, _, terminals, _, rules, _, start)) = delimited(
        pair(opt(tag("G=")), char('(')),
        tuple((
            symbol_set,
            char(','),
            symbol_set,
            char(','),
            rule_block,
            char(','),
            symbol,
        )),
        char(')'),
    )(input)?;
    Ok((
        rem,
        Parts {
            non_terminals,
            terminals,
            rules,
            start,
        },
    ))
}

/// A grammar followed by an optional word on the remaining lines. The word
/// has to start on a new line.
pub fn source(input: &str) -> IResult<&str, (Parts, Option<&str>)> {
    let (rem, (parts, word)) = all_consuming(pair(
        grammar,
        opt(preceded(many1_count(char('\n')), rest)),
    ))(input)?;
    let word = word
        .map(|w| w.trim_end_matches('\n'))
        .filter(|w| !w.is_empty());
    Ok((rem, (parts, word)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    struct TestCase<T> {
        input: &'static str,
        // Some indicates success, None indicates error.
        out: Option<IResult<&'static str, T>>,
    }

    fn assert_test_cases<T, F>(f: F, tests: Vec<TestCase<T>>)
    where
        T: Debug + Eq,
        F: Fn(&'static str) -> IResult<&'static str, T>,
    {
        for t in tests {
            let res = f(t.input);
            match t.out {
                Some(out) => assert_eq!(res, out, "input: {:?}", t.input),
                None => assert!(res.is_err(), "expected error: {:?}", res),
            }
        }
    }

    fn syms(s: &str) -> Vec<Symbol> {
        s.chars().map(Symbol).collect()
    }

    #[test]
    fn parse_symbol_set() {
        let tests = vec![
            TestCase {
                input: "{S,A}",
                out: Some(Ok(("", syms("SA")))),
            },
            TestCase {
                input: "{a},rest",
                out: Some(Ok((",rest", syms("a")))),
            },
            TestCase {
                input: "{}",
                out: Some(Ok(("", vec![]))),
            },
            TestCase {
                input: "{S,}",
                out: None,
            },
            TestCase {
                input: "S,A}",
                out: None,
            },
        ];

        assert_test_cases(symbol_set, tests);
    }

    #[test]
    fn parse_rule() {
        let tests = vec![
            TestCase {
                input: "S->aS|a",
                out: Some(Ok((
                    "",
                    (Symbol('S'), vec![Production::from("aS"), Production::from("a")]),
                ))),
            },
            TestCase {
                input: "A->&\nB->b",
                out: Some(Ok(("\nB->b", (Symbol('A'), vec![Production::epsilon()])))),
            },
            TestCase {
                input: "S->",
                out: None,
            },
            TestCase {
                input: "S=>a",
                out: None,
            },
        ];

        assert_test_cases(rule, tests);
    }

    #[test]
    fn parse_rule_block() {
        let tests = vec![
            TestCase {
                input: "{S->aA\nA->b}",
                out: Some(Ok((
                    "",
                    vec![
                        (Symbol('S'), vec![Production::from("aA")]),
                        (Symbol('A'), vec![Production::from("b")]),
                    ],
                ))),
            },
            TestCase {
                input: "{\nS->a\n\nA->b\n}",
                out: Some(Ok((
                    "",
                    vec![
                        (Symbol('S'), vec![Production::from("a")]),
                        (Symbol('A'), vec![Production::from("b")]),
                    ],
                ))),
            },
            TestCase {
                input: "{\n}",
                out: Some(Ok(("", vec![]))),
            },
            TestCase {
                input: "{S->a",
                out: None,
            },
        ];

        assert_test_cases(rule_block, tests);
    }

    #[test]
    fn parse_grammar() {
        let tests = vec![
            TestCase {
                input: "G=({S},{a},{S->a},S)",
                out: Some(Ok((
                    "",
                    Parts {
                        non_terminals: syms("S"),
                        terminals: syms("a"),
                        rules: vec![(Symbol('S'), vec![Production::from("a")])],
                        start: Symbol('S'),
                    },
                ))),
            },
            TestCase {
                input: "({S},{a},{S->a},S)\nword",
                out: Some(Ok((
                    "\nword",
                    Parts {
                        non_terminals: syms("S"),
                        terminals: syms("a"),
                        rules: vec![(Symbol('S'), vec![Production::from("a")])],
                        start: Symbol('S'),
                    },
                ))),
            },
            TestCase {
                input: "G=({S},{a},S)",
                out: None,
            },
        ];

        assert_test_cases(grammar, tests);
    }

    #[test]
    fn parse_source_word() {
        let (_, (_, word)) = source("({S},{a},{S->a},S)\n\naa\n\n").unwrap();
        assert_eq!(word, Some("aa"));

        let (_, (_, word)) = source("({S},{a},{S->a},S)\n").unwrap();
        assert_eq!(word, None);

        let (_, (_, word)) = source("({S},{a},{S->a},S)").unwrap();
        assert_eq!(word, None);

        assert!(source("({S},{a},{S->a},S)aa").is_err());
    }
}

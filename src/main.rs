//! Command-line interface for regram.
//!
//! Usage:
//!   regram `<grammar>` [--word `<word>`] [--format `<format>`] [--show-grammar]
//!
//! The word is taken from `--word`, then from the lines following the grammar
//! in the file, and finally read from stdin.
//!
//! Exit status is 0 when the word is accepted, 1 when it is rejected and 2
//! when the grammar cannot be loaded.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use regram::{parse_source, render, Validator};

fn cli() -> Command {
    Command::new("regram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check whether a word belongs to the language of a regular grammar")
        .arg(
            Arg::new("grammar")
                .help("Path to the grammar file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("word")
                .long("word")
                .short('w')
                .help("Word to validate (defaults to the word written in the grammar file, then stdin)")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format of the derivation tree")
                .value_parser(["treeviz", "bracketed", "none"])
                .default_value("treeviz"),
        )
        .arg(
            Arg::new("show-grammar")
                .long("show-grammar")
                .help("Print the loaded productions before validating")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the word was accepted.
fn run(matches: &ArgMatches) -> Result<bool> {
    let path = matches
        .get_one::<PathBuf>("grammar")
        .context("missing grammar path")?;
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let source =
        parse_source(&text).with_context(|| format!("invalid grammar in {}", path.display()))?;

    if matches.get_flag("show-grammar") {
        print!("{}", render::productions(&source.grammar));
    }

    let word = match (matches.get_one::<String>("word"), source.word) {
        (Some(word), _) => word.clone(),
        (None, Some(word)) => word,
        (None, None) => prompt_word()?,
    };

    match Validator::new(&source.grammar).validate(&word) {
        Ok(tree) => {
            println!("accepted");
            match matches.get_one::<String>("format").map(String::as_str) {
                Some("bracketed") => println!("{}", render::bracketed(&tree)),
                Some("none") => {}
                _ => print!("{}", render::treeviz(&tree)),
            }
            Ok(true)
        }
        Err(diagnostic) => {
            println!("rejected: {}", diagnostic);
            Ok(false)
        }
    }
}

fn prompt_word() -> Result<String> {
    eprint!("Enter the word to validate: ");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the word from stdin")?;
    Ok(line.trim_end_matches(&['\n', '\r'][..]).to_owned())
}

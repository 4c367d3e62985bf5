// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use piconest::{IgnorePair, Registry, TokenPair};

/// Parse a file into nested regions and print the resulting tree
#[derive(Parser, Debug)]
#[command(name = "piconest-demo")]
struct Args {
    /// Input file
    path: PathBuf,

    /// Token pair as `name:open:close`, may be repeated. Defaults to parentheses,
    /// brackets and braces when none is given.
    #[arg(short, long = "pair", value_parser = parse_pair)]
    pairs: Vec<TokenPair>,

    /// Ignore pair as `start:end`, may be repeated
    #[arg(short, long = "ignore", value_parser = parse_ignore)]
    ignores: Vec<IgnorePair>,

    /// Fail when regions nest deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the raw event stream instead of the tree
    #[arg(long)]
    events: bool,
}

fn parse_pair(arg: &str) -> Result<TokenPair, String> {
    let mut parts = arg.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(open), Some(close)) => Ok(TokenPair::new(name, open, close)),
        _ => Err(format!("expected name:open:close, got '{}'", arg)),
    }
}

fn parse_ignore(arg: &str) -> Result<IgnorePair, String> {
    match arg.split_once(':') {
        Some((start, end)) => Ok(IgnorePair::new(start, end)),
        None => Err(format!("expected start:end, got '{}'", arg)),
    }
}

fn default_pairs() -> Vec<TokenPair> {
    vec![
        TokenPair::new("paren", "(", ")"),
        TokenPair::new("bracket", "[", "]"),
        TokenPair::new("brace", "{", "}"),
    ]
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut s = String::new();
    let mut f = match File::open(&args.path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: Unable to open file '{}': {}", args.path.display(), e);
            std::process::exit(1);
        }
    };
    if let Err(e) = f.read_to_string(&mut s) {
        eprintln!("Error: Unable to read file '{}': {}", args.path.display(), e);
        std::process::exit(1);
    }

    let pairs = if args.pairs.is_empty() {
        default_pairs()
    } else {
        args.pairs
    };
    let mut builder = Registry::builder();
    for pair in pairs {
        builder = builder.token_pair(pair);
    }
    for ignore in args.ignores {
        builder = builder.ignore_pair(ignore);
    }
    if let Some(limit) = args.max_depth {
        builder = builder.max_depth(limit);
    }
    let registry = match builder.build() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    log::debug!("{} pairs, {} ignores", registry.pairs().len(), registry.ignores().len());

    if args.events {
        match piconest::scan(&s, &registry) {
            Ok(events) => {
                for (event, span) in events {
                    println!("{:?} {}..{}", event, span.start, span.end);
                }
            }
            Err(e) => {
                eprintln!("Error: Parsing failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match piconest::parse(&s, &registry) {
        Ok(root) => print!("{}", root.display(&s, &registry)),
        Err(e) => {
            eprintln!("Error: Parsing failed: {}", e);
            std::process::exit(1);
        }
    }
}

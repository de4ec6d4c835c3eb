//! Command-line harness that replays a newline-delimited JSON command
//! stream into one [`clob_art::state::OrderBook`] and prints book
//! summaries at a configurable depth.
//!
//! `clap`-derived `Args`, a `tracing-subscriber` bootstrap, and periodic
//! book snapshots over a synchronous stdin/file reader — no event stream
//! or chain to follow here, just a command feed.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use itertools::Itertools;

use clob_art::state::OrderBook;
use clob_art::types::OrderCommand;

/// Replay a newline-delimited JSON `OrderCommand` stream against one
/// in-memory order book.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print a book summary every N commands (0 disables periodic prints;
    /// a final summary is always printed once the stream is exhausted).
    #[arg(long, default_value_t = 1000)]
    summary_every: usize,

    /// Number of price levels to print per side in each summary.
    #[arg(long, default_value_t = 5)]
    depth: usize,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        // SAFETY: single-threaded at startup, before any other code reads the
        // environment.
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open input file");
                exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut book = OrderBook::new();
    let mut applied = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(line = lineno, error = %e, "failed to read line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let cmd: OrderCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(line = lineno, error = %e, "failed to parse command, skipping");
                continue;
            }
        };
        if let Err(e) = book.new_order(cmd) {
            tracing::warn!(line = lineno, error = %e, "command rejected");
            continue;
        }
        applied += 1;
        if args.summary_every > 0 && applied % args.summary_every == 0 {
            print_summary(&book, args.depth, applied);
        }
    }
    print_summary(&book, args.depth, applied);
}

fn print_summary(book: &OrderBook, depth: usize, applied: usize) {
    let asks = book.ask_levels();
    let bids = book.bid_levels();
    let mut ask_lines = Vec::new();
    book.for_each_ask(depth, |price, bucket| {
        ask_lines.push(format!("{price}@{}", bucket.total_volume()));
    });
    let mut bid_lines = Vec::new();
    book.for_each_bid_desc(depth, |price, bucket| {
        bid_lines.push(format!("{price}@{}", bucket.total_volume()));
    });
    println!(
        "[{applied} applied] asks({asks} levels): {} | bids({bids} levels): {}",
        ask_lines.iter().join(", "),
        bid_lines.iter().join(", "),
    );
}

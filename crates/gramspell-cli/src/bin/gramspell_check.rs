// gramspell-check: Check words against a word list.
//
// Prints one line per word:
//   C: word    (in the word list)
//   W: word    (not in the word list)
//
// Words shorter than three characters are never indexed and are always
// reported as W.
//
// Usage:
//   gramspell-check -w WORDS [-v] [WORD...]

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if gramspell_cli::wants_help(&args) {
        println!("gramspell-check: Check words against a word list.");
        println!();
        println!("Usage: gramspell-check -w WORDS [-v] [WORD...]");
        println!();
        println!("Reads words from stdin (one per line) unless WORD arguments are given.");
        println!("Prints:");
        println!("  C: word    (in the word list)");
        println!("  W: word    (not in the word list)");
        println!();
        println!("Options:");
        println!("  -w, --words PATH   Word list, one word per line (required)");
        println!("  -v, --verbose      Debug logging (RUST_LOG overrides)");
        println!("  -h, --help         Print this help");
        return;
    }

    let args = gramspell_cli::parse_args(&args).unwrap_or_else(|e| gramspell_cli::fatal(&e));
    gramspell_cli::init_logging(args.verbose);

    let Some(words_path) = args.words.as_deref() else {
        gramspell_cli::fatal("--words is required");
    };
    let checker = gramspell_cli::load_checker(words_path, args.config.as_deref())
        .unwrap_or_else(|e| gramspell_cli::fatal(&e));

    let inputs = gramspell_cli::input_words(args.inputs)
        .unwrap_or_else(|e| gramspell_cli::fatal(&format!("error reading stdin: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for word in &inputs {
        match checker.exists(word) {
            Ok(true) => {
                let _ = writeln!(out, "C: {word}");
            }
            Ok(false) => {
                let _ = writeln!(out, "W: {word}");
            }
            Err(e) => gramspell_cli::fatal(&format!("{word}: {e}")),
        }
    }
}

// gramspell-suggest: Suggest corrections for words from a word list.
//
// Indexes the word list into an in-memory spell index, then prints
// suggestions for each WORD argument, or for each stdin line when no
// words are given.
//
// Usage:
//   gramspell-suggest -w WORDS [OPTIONS] [WORD...]
//
// Options:
//   -w, --words PATH            Word list, one word per line (required)
//   -n, --max-suggestions N     Maximum number of suggestions (default: 5)
//   -c, --config PATH           JSON file with engine options
//   -r, --reference PATH        Reference corpus, one document per line
//   -f, --field FIELD           Reference field(s): name, comma list or "all"
//   --more-popular              Only suggest words more frequent than WORD
//   -v, --verbose               Debug logging (RUST_LOG overrides)
//   -h, --help                  Print help

use std::io::{self, Write};

use gramspell::Popularity;
use gramspell_index::IndexLocation;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if gramspell_cli::wants_help(&args) {
        println!("gramspell-suggest: Suggest corrections from a word list.");
        println!();
        println!("Usage: gramspell-suggest -w WORDS [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -w, --words PATH         Word list, one word per line (required)");
        println!("  -n, --max-suggestions N  Maximum number of suggestions (default: 5)");
        println!("  -c, --config PATH        JSON file with engine options");
        println!("  -r, --reference PATH     Reference corpus, one document per line");
        println!("  -f, --field FIELD        Reference field(s): name, comma list or \"all\"");
        println!("  --more-popular           Only suggest words more frequent than WORD");
        println!("  -v, --verbose            Debug logging (RUST_LOG overrides)");
        println!("  -h, --help               Print this help");
        return;
    }

    let args = gramspell_cli::parse_args(&args).unwrap_or_else(|e| gramspell_cli::fatal(&e));
    gramspell_cli::init_logging(args.verbose);

    let Some(words_path) = args.words.as_deref() else {
        gramspell_cli::fatal("--words is required");
    };
    let checker = gramspell_cli::load_checker(words_path, args.config.as_deref())
        .unwrap_or_else(|e| gramspell_cli::fatal(&e));

    let reference = args
        .reference
        .as_deref()
        .map(gramspell_cli::load_corpus)
        .transpose()
        .unwrap_or_else(|e| gramspell_cli::fatal(&e));
    let view = reference
        .as_ref()
        .map(|index| index.searcher())
        .transpose()
        .unwrap_or_else(|e| gramspell_cli::fatal(&e.to_string()));

    let inputs = gramspell_cli::input_words(args.inputs)
        .unwrap_or_else(|e| gramspell_cli::fatal(&format!("error reading stdin: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for word in &inputs {
        let popularity = view.as_deref().map(|searcher| {
            let popularity = Popularity::new(searcher, &args.field);
            if args.more_popular { popularity.more_popular() } else { popularity }
        });

        match checker.suggest(word, args.max_suggestions, popularity) {
            Ok(suggestions) if suggestions.is_empty() => {
                let _ = writeln!(out, "{word}: (no suggestions)");
            }
            Ok(suggestions) => {
                let _ = writeln!(out, "{word}:");
                for s in &suggestions {
                    let _ = writeln!(out, "  {s}");
                }
            }
            Err(e) => gramspell_cli::fatal(&format!("{word}: {e}")),
        }
    }
}

// gramspell-cli: shared utilities for CLI tools.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;
use std::sync::Arc;

use gramspell::{PlainTextDictionary, SpellChecker, SpellOptions};
use gramspell_index::{MemoryIndex, Record};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Field holding the terms of a reference corpus document.
pub const CORPUS_FIELD: &str = "text";

/// Default number of suggestions per word.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Options shared by the gramspell tools.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// Word list to index (one word per line).
    pub words: Option<String>,
    /// JSON file with engine options.
    pub config: Option<String>,
    /// Reference corpus (one document per line).
    pub reference: Option<String>,
    /// Reference field selector: a field, a comma list or `all`.
    pub field: String,
    pub more_popular: bool,
    pub max_suggestions: usize,
    pub verbose: bool,
    /// Positional words.
    pub inputs: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            words: None,
            config: None,
            reference: None,
            field: CORPUS_FIELD.to_string(),
            more_popular: false,
            max_suggestions: DEFAULT_SUGGESTIONS,
            verbose: false,
            inputs: Vec::new(),
        }
    }
}

/// Parse command line args (without the program name).
///
/// Value options accept both `-w PATH` and `--words=PATH`.
pub fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| iter.next().cloned())
                .ok_or_else(|| format!("{name} requires a value"))
        };

        match name {
            "-w" | "--words" => parsed.words = Some(value()?),
            "-c" | "--config" => parsed.config = Some(value()?),
            "-r" | "--reference" => parsed.reference = Some(value()?),
            "-f" | "--field" => parsed.field = value()?,
            "-n" | "--max-suggestions" => {
                let raw = value()?;
                parsed.max_suggestions = raw
                    .parse()
                    .map_err(|_| format!("invalid number for --max-suggestions: {raw}"))?;
            }
            "--more-popular" => parsed.more_popular = true,
            "-v" | "--verbose" => parsed.verbose = true,
            _ if name.starts_with('-') && name.len() > 1 => {
                return Err(format!("unknown option: {name}"));
            }
            _ => parsed.inputs.push(arg.clone()),
        }
    }

    Ok(parsed)
}

/// Install the tracing subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .init();
}

/// Build a spell checker over a fresh in-memory index and index the word
/// list at `words_path` into it.
pub fn load_checker(words_path: &str, config_path: Option<&str>) -> Result<SpellChecker, String> {
    let options = match config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {path}: {e}"))?;
            SpellOptions::from_json(&json).map_err(|e| format!("invalid config {path}: {e}"))?
        }
        None => SpellOptions::default(),
    };

    let checker = SpellChecker::new(Arc::new(MemoryIndex::new()), options);
    let mut dict = PlainTextDictionary::open(words_path)
        .map_err(|e| format!("failed to open {words_path}: {e}"))?;
    let added = checker
        .index_dictionary(&mut dict)
        .map_err(|e| format!("failed to index {words_path}: {e}"))?;
    info!(added, path = words_path, "loaded word list");

    Ok(checker)
}

/// Load a reference corpus file.
pub fn load_corpus(path: &str) -> Result<MemoryIndex, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {path}: {e}"))?;
    let index = corpus_from_reader(BufReader::new(file))
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    info!(path, "loaded reference corpus");
    Ok(index)
}

/// One document per non-blank line, its whitespace-separated terms under
/// [`CORPUS_FIELD`].
pub fn corpus_from_reader<R: BufRead>(reader: R) -> io::Result<MemoryIndex> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let record = line
            .split_whitespace()
            .fold(Record::new(), |record, term| record.with(CORPUS_FIELD, term));
        if !record.is_empty() {
            records.push(record);
        }
    }
    Ok(MemoryIndex::with_records(records))
}

/// The positional words, or the trimmed non-blank lines of stdin when
/// there are none.
pub fn input_words(inputs: Vec<String>) -> io::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }
    let mut words = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
